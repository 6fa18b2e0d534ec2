// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Render glyphs 32–36 from "Sans 20" into `texture.png`

use cfnt_tools::fonts::FontLibrary;
use cfnt_tools::generate::{self, GenerateConfig};
use std::error::Error;
use std::io::Write;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut library = FontLibrary::new();
    let config = GenerateConfig::default();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = generate::run(&mut library, &config, &mut out);
    out.flush()?;
    result?;
    Ok(())
}
