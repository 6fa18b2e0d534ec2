// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Print a BCFNT font report and extract its glyph sheets to `tmp/`

use cfnt_tools::bcfnt::Font;
use std::error::Error;
use std::process::ExitCode;
use std::{env, fs};

const SHEET_DIR: &str = "tmp";

fn extract(path: &str) -> Result<(), Box<dyn Error>> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) => {
            log::debug!("reading '{path}': {err}");
            return Err(format!("Could not load '{path}'").into());
        }
    };

    let font = Font::parse(&data)?;
    print!("{font}");

    font.write_sheets(&data, SHEET_DIR)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        let program = args.first().map(String::as_str).unwrap_or("extract");
        println!("Usage: {program} <path>");
        return ExitCode::FAILURE;
    }

    match extract(&args[1]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
