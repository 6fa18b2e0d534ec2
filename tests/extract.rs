// Command-line behaviour of the `extract` binary

use std::process::Command;

fn extract() -> Command {
    Command::new(env!("CARGO_BIN_EXE_extract"))
}

#[test]
fn usage() {
    let output = extract().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Usage: "), "{stdout}");
    assert!(stdout.trim_end().ends_with("<path>"));

    let output = extract().args(["a", "b"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn missing_file() {
    let path = std::env::temp_dir().join(format!("cfnt-tools-missing-{}.bcfnt", std::process::id()));
    let output = extract().arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Could not load"), "{stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn not_a_font() {
    let dir = std::env::temp_dir().join(format!("cfnt-tools-extract-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("garbage.bin");
    std::fs::write(&path, [0u8; 16]).unwrap();

    let output = extract().arg(&path).current_dir(&dir).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    // nothing is extracted from a file that fails to parse
    assert!(!dir.join("tmp").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}
