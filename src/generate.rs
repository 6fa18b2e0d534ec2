// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph texture generation
//!
//! Renders a run of consecutive characters side by side into a small
//! texture, one fixed-width column per glyph, and writes it as PNG. With the
//! default [`GenerateConfig`] this draws code points 32–36 (`' '` to `'$'`)
//! in "Sans 20" on a 128×32 surface and writes `texture.png`.
//!
//! Diagnostics (the installed font families, then the pixel size of each
//! glyph as it is drawn) are written to a caller-supplied writer.
//!
//! Glyph shapes depend on the installed fonts: "Sans" resolves to whichever
//! sans-serif family is available, silently substituting another face if
//! none is. Output is therefore not reproducible across systems.

use crate::fonts::{DescriptionError, FontDescription, FontLibrary, NoFontMatch};
use crate::layout::Layout;
use crate::raster::Antialias;
use crate::surface::{Format, Surface, SurfaceError};
use crate::{Environment, Rgba};
use easy_cast::Conv;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Generation errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid font description")]
    Description(#[from] DescriptionError),
    #[error(transparent)]
    NoFontMatch(#[from] NoFontMatch),
    #[error("invalid code point: {0:#X}")]
    InvalidChar(u32),
    #[error("surface error")]
    Surface(#[from] SurfaceError),
    #[error("failed to write diagnostics")]
    Io(#[from] std::io::Error),
}

/// Texture generation configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerateConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Font description, e.g. `"Sans 20"`
    pub font: String,
    /// First code point to draw
    pub first_char: u32,
    /// Number of consecutive code points to draw
    ///
    /// Each glyph is drawn at `i × (width / count)` (integer division).
    pub count: u32,
    /// Antialiasing mode
    pub antialias: Antialias,
    /// Text colour
    pub color: Rgba,
    /// Output path of the PNG
    pub output: PathBuf,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        GenerateConfig {
            width: 128,
            height: 32,
            font: "Sans 20".to_string(),
            first_char: 32,
            count: 5,
            antialias: Antialias::Subpixel,
            color: Rgba::WHITE,
            output: PathBuf::from("texture.png"),
        }
    }
}

impl GenerateConfig {
    /// Horizontal offset of glyph `i`
    #[inline]
    pub fn column_offset(&self, i: u32) -> u32 {
        i * (self.width / self.count.max(1))
    }
}

/// Summary of a generation run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    /// Installed font families
    pub families: Vec<String>,
    /// Family of the face used for drawing
    pub family: String,
    /// Pixel size `(width, height)` of each glyph, in drawing order
    pub sizes: Vec<(i32, i32)>,
}

/// Draw the glyphs onto a new surface
///
/// This performs every step except writing the PNG.
pub fn render(
    library: &mut FontLibrary,
    config: &GenerateConfig,
    out: &mut impl Write,
) -> Result<(Surface, Report), Error> {
    let mut surface = Surface::new(Format::Argb32, config.width, config.height)?;

    let families = library.families();
    writeln!(out, "{families:?}")?;

    let mut env = Environment::new();
    env.set_antialias(config.antialias);

    let desc = FontDescription::parse(&config.font)?;
    let mut layout = Layout::new(library, &env, desc)?;
    log::info!("Drawing with \"{}\" at {} px/em", layout.family(), layout.dpem());

    let mut sizes = Vec::with_capacity(usize::conv(config.count));
    let mut text = String::new();
    for i in 0..config.count {
        surface.identity_matrix();
        surface.translate(f32::conv(config.column_offset(i)), 0.0);
        let Rgba { r, g, b, a } = config.color;
        surface.set_source_rgba(r, g, b, a);

        let code = config.first_char + i;
        let c = char::from_u32(code).ok_or(Error::InvalidChar(code))?;
        text.clear();
        text.push(c);
        layout.set_text(&text);

        let (w, h) = layout.pixel_size();
        writeln!(out, "({w}, {h})")?;
        sizes.push((w, h));

        layout.show(&mut surface);
    }

    let report = Report {
        families,
        family: layout.family().to_string(),
        sizes,
    };
    Ok((surface, report))
}

/// Draw the glyphs and write the PNG to [`GenerateConfig::output`]
///
/// The output file is only touched after all glyphs are drawn; an existing
/// file is overwritten.
pub fn run(
    library: &mut FontLibrary,
    config: &GenerateConfig,
    out: &mut impl Write,
) -> Result<Report, Error> {
    let (surface, report) = render(library, config, out)?;
    surface.write_to_png_file(&config.output)?;
    log::info!("Wrote {}", config.output.display());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_geometry() {
        let config = GenerateConfig::default();
        let offsets: Vec<u32> = (0..config.count).map(|i| config.column_offset(i)).collect();
        assert_eq!(offsets, [0, 25, 50, 75, 100]);
        assert_eq!((config.width, config.height), (128, 32));
        assert_eq!(config.font, "Sans 20");
        assert_eq!(config.output, PathBuf::from("texture.png"));
    }

    #[test]
    fn zero_count() {
        let config = GenerateConfig {
            count: 0,
            ..Default::default()
        };
        assert_eq!(config.column_offset(0), 0);
    }

    #[test]
    fn bad_description() {
        let mut library = FontLibrary::from_database(fontdb::Database::new());
        let config = GenerateConfig {
            font: String::new(),
            ..Default::default()
        };
        let mut out = Vec::new();
        let result = render(&mut library, &config, &mut out);
        assert!(matches!(result, Err(Error::Description(DescriptionError::Empty))));
        // the family list is printed before the layout is created
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }

    #[test]
    fn no_fonts() {
        let mut library = FontLibrary::from_database(fontdb::Database::new());
        let mut out = Vec::new();
        let result = render(&mut library, &GenerateConfig::default(), &mut out);
        assert!(matches!(result, Err(Error::NoFontMatch(_))));
    }

    #[test]
    fn invalid_char() {
        let mut library = FontLibrary::new();
        if library.is_empty() {
            eprintln!("no system fonts installed; skipping");
            return;
        }
        let config = GenerateConfig {
            first_char: 0xD7FF,
            count: 2,
            ..Default::default()
        };
        let mut out = Vec::new();
        let result = render(&mut library, &config, &mut out);
        assert!(matches!(result, Err(Error::InvalidChar(0xD800))));
    }
}
