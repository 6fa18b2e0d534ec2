// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Support for rastering glyphs
//!
//! Glyphs are rastered to coverage masks ([`Sprite`]), which are composited
//! onto a [`Surface`](crate::surface::Surface) with its current source colour.
//!
//! # Example
//!
//! ```no_run
//! use cfnt_tools::fonts::{FontDescription, FontLibrary};
//! use cfnt_tools::raster::{raster, Config};
//! use cfnt_tools::Vec2;
//!
//! let mut library = FontLibrary::new();
//! let desc = FontDescription::parse("Sans 20").unwrap();
//! let id = library.select(&desc).unwrap();
//! let face = library.get_face_store(id);
//! let glyph = face.face_ref().glyph_index('#');
//!
//! if let Some(sprite) = raster(&Config::default(), &face, glyph, 26.0, Vec2::ZERO) {
//!     // sprite.offset is relative to the glyph's baseline origin
//!     println!("{:?} at {:?}", sprite.size, sprite.offset);
//! }
//! ```

use crate::fonts::FaceStore;
use crate::{GlyphId, Vec2};
use easy_cast::{CastFloat, Conv, ConvFloat};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Antialiasing mode
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Antialias {
    /// Bilevel: each pixel is either fully covered or not at all
    None,
    /// Grayscale coverage
    #[default]
    Gray,
    /// Subpixel coverage, for horizontal RGB displays
    Subpixel,
}

/// Glyph rastering backend
///
/// Depending on crate features, not all backends are available; an
/// unavailable backend falls back to [`Backend::AbGlyph`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Backend {
    /// Raster with `ab_glyph`
    #[default]
    AbGlyph,
    /// Raster with `ab_glyph`, aligning glyphs to their side bearings
    AbGlyphSideBearing,
    /// Raster with `fontdue` (requires the `fontdue` feature)
    Fontdue,
}

/// Raster configuration
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    backend: Backend,
    antialias: Antialias,
}

impl Config {
    /// Construct configuration
    pub fn new(backend: Backend, antialias: Antialias) -> Self {
        Config { backend, antialias }
    }

    /// Get the rastering backend
    #[inline]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Get the antialiasing mode
    #[inline]
    pub fn antialias(&self) -> Antialias {
        self.antialias
    }

    /// Set the antialiasing mode
    #[inline]
    pub fn set_antialias(&mut self, antialias: Antialias) {
        self.antialias = antialias;
    }
}

/// Format of a [`Sprite`]'s coverage data
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MaskFormat {
    /// One coverage byte per pixel
    A8,
    /// Three coverage bytes per pixel: red, green, blue sub-pixels
    Rgb24,
}

impl MaskFormat {
    /// Bytes per pixel
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            MaskFormat::A8 => 1,
            MaskFormat::Rgb24 => 3,
        }
    }
}

/// A rastered sprite
#[derive(Debug, PartialEq, Eq)]
pub struct Sprite {
    /// Offset to be added to the glyph position
    pub offset: (i32, i32),
    /// Size of the sprite in pixels
    pub size: (u32, u32),
    /// Format of `data`
    pub format: MaskFormat,
    /// Coverage, row major order, length `size.0 * size.1 * bytes_per_pixel`
    pub data: Vec<u8>,
}

impl Sprite {
    /// Coverage of pixel `(x, y)` as `[red, green, blue]`
    ///
    /// For [`MaskFormat::A8`] all three components are equal.
    #[inline]
    pub fn coverage(&self, x: u32, y: u32) -> [u8; 3] {
        let i = usize::conv(y * self.size.0 + x);
        match self.format {
            MaskFormat::A8 => {
                let c = self.data[i];
                [c, c, c]
            }
            MaskFormat::Rgb24 => {
                let i = 3 * i;
                [self.data[i], self.data[i + 1], self.data[i + 2]]
            }
        }
    }
}

/// Weights of the 5-tap LCD filter (sum: 256)
const LCD_FILTER: [u32; 5] = [8, 77, 86, 77, 8];

/// Convert a 3×-horizontal-resolution grayscale raster to RGB sub-pixels
///
/// `min_x` is the horizontal offset of `data` in sub-pixel units. Returns the
/// pixel-space horizontal offset and width of the result.
fn lcd_filter(data: &[u8], width: u32, height: u32, min_x: i32) -> (i32, u32, Vec<u8>) {
    let spread = 2;
    let w = i32::conv(width);
    let start = (min_x - spread).div_euclid(3);
    let end = (min_x + w + spread + 2).div_euclid(3);
    let out_width = u32::conv(end - start);

    let raw = |row: &[u8], s: i32| -> u32 {
        let i = s - min_x;
        if 0 <= i && i < w {
            u32::from(row[usize::conv(i)])
        } else {
            0
        }
    };

    let mut out = Vec::with_capacity(usize::conv(out_width * height * 3));
    for row in data.chunks(usize::conv(width)).take(usize::conv(height)) {
        for p in start..end {
            for c in 0..3 {
                let s = 3 * p + c;
                let sum: u32 = (-spread..=spread)
                    .zip(LCD_FILTER)
                    .map(|(k, weight)| weight * raw(row, s + k))
                    .sum();
                out.push(u8::conv((sum / 256).min(255)));
            }
        }
    }

    (start, out_width, out)
}

fn raster_ab(config: &Config, face: &FaceStore, id: GlyphId, dpem: f32, fract: Vec2) -> Option<Sprite> {
    use ab_glyph::Font;

    let (mut x, y) = (fract.0, fract.1);
    if config.backend == Backend::AbGlyphSideBearing {
        let sf = face.face_ref().scale_by_dpem(dpem);
        x -= sf.h_side_bearing(id);
    }

    let font = face.ab_glyph();
    // ab_glyph's scale is the pixel height of (ascent - descent)
    let scale = dpem * font.height_unscaled() / font.units_per_em()?;
    let subpixel = config.antialias == Antialias::Subpixel;
    let h_mult = if subpixel { 3.0 } else { 1.0 };
    let glyph = ab_glyph::Glyph {
        id: ab_glyph::GlyphId(id.0),
        scale: ab_glyph::PxScale {
            x: scale * h_mult,
            y: scale,
        },
        position: ab_glyph::point(x * h_mult, y),
    };
    let Some(outline) = font.outline_glyph(glyph) else {
        log::debug!("No outline for glyph: {id:?}");
        return None;
    };

    let bounds = outline.px_bounds();
    let min: (i32, i32) = (bounds.min.x.cast_trunc(), bounds.min.y.cast_trunc());
    let size = bounds.max - bounds.min;
    let size = (u32::conv_trunc(size.x), u32::conv_trunc(size.y));
    if size.0 == 0 || size.1 == 0 {
        log::warn!("Zero-sized glyph: {id:?}");
        return None; // nothing to draw
    }

    let mut data = vec![0; usize::conv(size.0 * size.1)];
    outline.draw(|x, y, c| {
        // Convert to u8 with saturating conversion, rounding down:
        data[usize::conv((y * size.0) + x)] = (c * 256.0) as u8;
    });

    Some(match config.antialias {
        Antialias::None => {
            for c in data.iter_mut() {
                *c = if *c >= 128 { 255 } else { 0 };
            }
            Sprite {
                offset: min,
                size,
                format: MaskFormat::A8,
                data,
            }
        }
        Antialias::Gray => Sprite {
            offset: min,
            size,
            format: MaskFormat::A8,
            data,
        },
        Antialias::Subpixel => {
            let (x, width, data) = lcd_filter(&data, size.0, size.1, min.0);
            Sprite {
                offset: (x, min.1),
                size: (width, size.1),
                format: MaskFormat::Rgb24,
                data,
            }
        }
    })
}

#[cfg(feature = "fontdue")]
fn raster_fontdue(config: &Config, face: &FaceStore, id: GlyphId, dpem: f32) -> Option<Sprite> {
    let font = face.fontdue();

    let (metrics, mut data, format) = match config.antialias {
        Antialias::Subpixel => {
            let (metrics, data) = font.rasterize_indexed_subpixel(id.0, dpem);
            (metrics, data, MaskFormat::Rgb24)
        }
        _ => {
            let (metrics, data) = font.rasterize_indexed(id.0, dpem);
            (metrics, data, MaskFormat::A8)
        }
    };
    if config.antialias == Antialias::None {
        for c in data.iter_mut() {
            *c = if *c >= 128 { 255 } else { 0 };
        }
    }

    let size = (u32::conv(metrics.width), u32::conv(metrics.height));
    let h_off = -metrics.ymin - i32::conv(metrics.height);
    let offset = (metrics.xmin, h_off);
    if size.0 == 0 || size.1 == 0 {
        log::debug!("Zero-sized glyph: {id:?}");
        return None; // nothing to draw
    }

    Some(Sprite {
        offset,
        size,
        format,
        data,
    })
}

/// Raster a glyph
///
/// `fract` is the fractional part of the glyph's baseline position (in the
/// range `0.0 ≤ x < 1.0`); the resulting sprite should be drawn at the
/// floor of the glyph position plus [`Sprite::offset`].
///
/// Attempts to raster a glyph. Can fail (if the glyph in the given font face
/// has no outline, e.g. a space), in which case `None` is returned.
pub fn raster(config: &Config, face: &FaceStore, id: GlyphId, dpem: f32, fract: Vec2) -> Option<Sprite> {
    cfg_if::cfg_if! {
        if #[cfg(feature = "fontdue")] {
            if config.backend == Backend::Fontdue {
                return raster_fontdue(config, face, id, dpem);
            }
        }
    }
    raster_ab(config, face, id, dpem, fract)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcd_filter_spreads_coverage() {
        // A single fully covered sub-pixel at sub-pixel x = 4 (pixel 1, green)
        let data = [255u8];
        let (x, width, out) = lcd_filter(&data, 1, 1, 4);
        assert_eq!(x, 0);
        assert_eq!(width, 3);
        assert_eq!(out.len(), 9);
        // sub-pixels 2..=6 receive the filter weights
        let expected = [0, 0, 7, 76, 85, 76, 7, 0, 0];
        assert_eq!(out, expected);
    }

    #[test]
    fn lcd_filter_solid_row() {
        let data = [255u8; 9];
        let (x, width, out) = lcd_filter(&data, 9, 1, 0);
        assert_eq!(x, -1);
        assert_eq!(width, 5);
        // the centre pixel is fully covered
        assert_eq!(&out[6..9], &[255, 255, 255]);
        assert_eq!(&out[3..6], &[170, 247, 255]);
    }

    #[test]
    fn sprite_coverage() {
        let gray = Sprite {
            offset: (0, 0),
            size: (2, 1),
            format: MaskFormat::A8,
            data: vec![10, 200],
        };
        assert_eq!(gray.coverage(1, 0), [200, 200, 200]);

        let rgb = Sprite {
            offset: (0, 0),
            size: (1, 2),
            format: MaskFormat::Rgb24,
            data: vec![1, 2, 3, 4, 5, 6],
        };
        assert_eq!(rgb.coverage(0, 1), [4, 5, 6]);
    }

    #[test]
    fn config_modes() {
        let config = Config::new(Backend::AbGlyphSideBearing, Antialias::Subpixel);
        assert_eq!(config.backend(), Backend::AbGlyphSideBearing);
        assert_eq!(config.antialias(), Antialias::Subpixel);

        let config = Config::default();
        assert_eq!(config.backend(), Backend::AbGlyph);
        assert_eq!(config.antialias(), Antialias::Gray);
    }
}
