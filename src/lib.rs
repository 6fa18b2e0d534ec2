// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph sheet tools
//!
//! Two small utilities around bitmap font glyph sheets:
//!
//! -   [`generate`] rasterizes a run of glyphs from a system font into a small
//!     ARGB32 texture and writes it as PNG
//! -   [`bcfnt`] parses BCFNT fonts, printing a field-by-field report and
//!     extracting the raw glyph sheets
//!
//! The supporting modules ([`fonts`], [`raster`], [`surface`], [`layout`])
//! form a minimal text rendering stack: font discovery and matching,
//! glyph rastering with optional subpixel antialiasing, and compositing onto
//! an image surface.

#![cfg_attr(doc_cfg, feature(doc_cfg))]

pub mod conv;

mod env;
pub use env::*;

mod data;
pub use data::*;

pub mod bcfnt;
pub mod fonts;
pub mod generate;
pub mod layout;
pub mod raster;
pub mod surface;
pub mod unicode;

/// Glyph identifier
///
/// An index into a font face's glyph table. `GlyphId(0)` is the missing
/// glyph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphId(pub u16);
