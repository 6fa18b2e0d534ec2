// Glyph texture generation against the installed system fonts
//
// These tests skip when no system fonts are available.

use cfnt_tools::fonts::FontLibrary;
use cfnt_tools::generate::{run, Error, GenerateConfig};
use cfnt_tools::surface::SurfaceError;
use std::fs::File;
use std::path::PathBuf;

fn library() -> Option<FontLibrary> {
    let library = FontLibrary::new();
    if library.is_empty() {
        eprintln!("no system fonts installed; skipping");
        return None;
    }
    Some(library)
}

fn output_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cfnt-tools-{}-{name}", std::process::id()))
}

fn decode(path: &PathBuf) -> (png::OutputInfo, Vec<u8>) {
    let decoder = png::Decoder::new(File::open(path).unwrap());
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());
    (info, buf)
}

#[test]
fn texture() {
    let Some(mut library) = library() else { return };
    let output = output_path("texture.png");
    let config = GenerateConfig {
        output: output.clone(),
        ..Default::default()
    };

    let mut out = Vec::new();
    let report = run(&mut library, &config, &mut out).unwrap();

    let (info, data) = decode(&output);
    assert_eq!((info.width, info.height), (128, 32));
    assert_eq!(info.color_type, png::ColorType::Rgba);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);
    // something was drawn; white text keeps full green wherever it has coverage
    assert!(data.chunks(4).any(|p| p[3] > 0));
    assert!(data.chunks(4).filter(|p| p[3] > 0).all(|p| p[1] == 255));

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with('['));
    assert_eq!(lines[0], format!("{:?}", report.families));
    for (line, (w, h)) in lines[1..].iter().zip(&report.sizes) {
        assert_eq!(*line, format!("({w}, {h})"));
    }

    assert_eq!(report.sizes.len(), 5);
    assert!(report.sizes.iter().all(|(w, h)| *w >= 0 && *h > 0));
    // one line of text each: heights agree
    assert!(report.sizes.iter().all(|(_, h)| *h == report.sizes[0].1));
    // ' ' is narrower than '#'
    assert!(report.sizes[0].0 < report.sizes[3].0);

    std::fs::remove_file(&output).unwrap();
}

#[test]
fn repeatable_dimensions() {
    let Some(mut library) = library() else { return };
    let output = output_path("repeat.png");
    let config = GenerateConfig {
        output: output.clone(),
        ..Default::default()
    };

    let first = run(&mut library, &config, &mut std::io::sink()).unwrap();
    let (info1, _) = decode(&output);
    let second = run(&mut library, &config, &mut std::io::sink()).unwrap();
    let (info2, _) = decode(&output);

    assert_eq!((info1.width, info1.height), (info2.width, info2.height));
    assert_eq!(first.sizes, second.sizes);
    assert_eq!(first.family, second.family);

    std::fs::remove_file(&output).unwrap();
}

#[test]
fn unwritable_output() {
    let Some(mut library) = library() else { return };
    let config = GenerateConfig {
        output: output_path("missing-dir").join("texture.png"),
        ..Default::default()
    };

    let mut out = Vec::new();
    let result = run(&mut library, &config, &mut out);
    assert!(matches!(result, Err(Error::Surface(SurfaceError::Io(_)))));

    // the PNG is written after every glyph is drawn
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 6);
}
