// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Image surface
//!
//! A [`Surface`] is an in-memory ARGB32 pixel buffer: one native-endian `u32`
//! per pixel, laid out as `0xAARRGGBB` with premultiplied alpha. It starts
//! fully transparent. Drawing happens at the current origin (a translation
//! from the identity transform) with the current source colour.

use crate::conv::to_usize;
use crate::raster::{MaskFormat, Sprite};
use crate::{Rgba, Vec2};
use easy_cast::{Conv, ConvFloat};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Pixel format
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// 32-bit ARGB with premultiplied alpha
    #[default]
    Argb32,
}

/// Surface errors
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("invalid surface size: {0}×{1}")]
    InvalidSize(u32, u32),
    #[error("PNG encoding failed")]
    Png(#[from] png::EncodingError),
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// Multiply two 8-bit values, dividing by 255 with rounding
#[inline]
fn mul_un8(a: u32, b: u32) -> u32 {
    let t = a * b + 0x80;
    ((t >> 8) + t) >> 8
}

#[inline]
fn unpack(p: u32) -> [u32; 4] {
    [p >> 24, (p >> 16) & 0xFF, (p >> 8) & 0xFF, p & 0xFF]
}

#[inline]
fn pack([a, r, g, b]: [u32; 4]) -> u32 {
    (a << 24) | (r << 16) | (g << 8) | b
}

/// An image surface
#[derive(Clone, Debug)]
pub struct Surface {
    format: Format,
    width: u32,
    height: u32,
    data: Vec<u32>,
    origin: Vec2,
    source: Rgba,
}

impl Surface {
    /// Construct a transparent surface
    ///
    /// Fails if either dimension is zero or the pixel count exceeds
    /// `i32::MAX`.
    pub fn new(format: Format, width: u32, height: u32) -> Result<Self, SurfaceError> {
        let len = i32::try_from(u64::from(width) * u64::from(height))
            .ok()
            .filter(|len| *len > 0)
            .map(usize::conv)
            .ok_or(SurfaceError::InvalidSize(width, height))?;
        Ok(Surface {
            format,
            width,
            height,
            data: vec![0; len],
            origin: Vec2::ZERO,
            source: Rgba::BLACK,
        })
    }

    /// Pixel format
    #[inline]
    pub fn format(&self) -> Format {
        self.format
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel data, row major order
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Get pixel `(x, y)` as `0xAARRGGBB` (premultiplied)
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.data[to_usize(y) * to_usize(self.width) + to_usize(x)])
        } else {
            None
        }
    }

    /// Reset the transform to identity
    #[inline]
    pub fn identity_matrix(&mut self) {
        self.origin = Vec2::ZERO;
    }

    /// Translate the origin
    ///
    /// Translations accumulate until [`Self::identity_matrix`] is called.
    #[inline]
    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.origin += Vec2(tx, ty);
    }

    /// Current origin in device pixels
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Set an opaque source colour
    ///
    /// Components are clamped to `0.0 ..= 1.0`.
    #[inline]
    pub fn set_source_rgb(&mut self, r: f32, g: f32, b: f32) {
        self.source = Rgba::rgb(r, g, b);
    }

    /// Set a source colour
    ///
    /// Components are clamped to `0.0 ..= 1.0`.
    #[inline]
    pub fn set_source_rgba(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.source = Rgba::rgba(r, g, b, a);
    }

    /// Current source colour
    #[inline]
    pub fn source(&self) -> Rgba {
        self.source
    }

    /// Premultiplied source as `[a, r, g, b]`
    fn source_un8(&self) -> [u32; 4] {
        let s = self.source;
        let a = u32::conv_nearest(s.a * 255.0);
        let c = |x: f32| u32::conv_nearest(x * s.a * 255.0);
        [a, c(s.r), c(s.g), c(s.b)]
    }

    /// Composite the source colour through `sprite` at device position `(x, y)`
    ///
    /// This is an OVER operation. For [`MaskFormat::Rgb24`] masks each colour
    /// channel uses its own coverage (component alpha) while the alpha channel
    /// uses the green coverage. Pixels outside the surface are clipped.
    pub fn mask(&mut self, sprite: &Sprite, x: i32, y: i32) {
        let [sa, sr, sg, sb] = self.source_un8();
        let (w, h) = (i32::conv(self.width), i32::conv(self.height));

        for my in 0..sprite.size.1 {
            let dy = y + i32::conv(my);
            if dy < 0 || dy >= h {
                continue;
            }
            for mx in 0..sprite.size.0 {
                let dx = x + i32::conv(mx);
                if dx < 0 || dx >= w {
                    continue;
                }

                let [mr, mg, mb] = sprite.coverage(mx, my).map(u32::from);
                if mr == 0 && mg == 0 && mb == 0 {
                    continue;
                }

                let index = usize::conv(dy) * to_usize(self.width) + usize::conv(dx);
                let [da, dr, dg, db] = unpack(self.data[index]);
                let result = match sprite.format {
                    MaskFormat::A8 => {
                        let m = mg;
                        let a = mul_un8(sa, m);
                        let over = |s: u32, d: u32| mul_un8(s, m) + mul_un8(d, 255 - a);
                        [over(sa, da), over(sr, dr), over(sg, dg), over(sb, db)]
                    }
                    MaskFormat::Rgb24 => {
                        let over = |s: u32, d: u32, m: u32| {
                            mul_un8(s, m) + mul_un8(d, 255 - mul_un8(sa, m))
                        };
                        [
                            over(sa, da, mg),
                            over(sr, dr, mr),
                            over(sg, dg, mg),
                            over(sb, db, mb),
                        ]
                    }
                };
                self.data[index] = pack(result.map(|c| c.min(255)));
            }
        }
    }

    /// Write the surface as PNG
    ///
    /// Output is 8-bit RGBA with straight (un-premultiplied) alpha.
    pub fn write_to_png<W: Write>(&self, w: W) -> Result<(), SurfaceError> {
        let mut encoder = png::Encoder::new(w, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;

        let mut rgba = Vec::with_capacity(self.data.len() * 4);
        for pixel in &self.data {
            let [a, r, g, b] = unpack(*pixel);
            if a == 0 {
                rgba.extend_from_slice(&[0, 0, 0, 0]);
                continue;
            }
            let unmul = |c: u32| u8::conv(((c * 255 + a / 2) / a).min(255));
            rgba.extend_from_slice(&[unmul(r), unmul(g), unmul(b), u8::conv(a)]);
        }
        writer.write_image_data(&rgba)?;
        writer.finish()?;
        Ok(())
    }

    /// Write the surface as PNG to the file at `path`
    ///
    /// The file is created or truncated.
    pub fn write_to_png_file(&self, path: impl AsRef<Path>) -> Result<(), SurfaceError> {
        let file = File::create(path)?;
        let mut w = BufWriter::new(file);
        self.write_to_png(&mut w)?;
        w.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a8(size: (u32, u32), data: Vec<u8>) -> Sprite {
        Sprite {
            offset: (0, 0),
            size,
            format: MaskFormat::A8,
            data,
        }
    }

    #[test]
    fn invalid_size() {
        assert!(matches!(
            Surface::new(Format::Argb32, 0, 32),
            Err(SurfaceError::InvalidSize(0, 32))
        ));
        // 2.5 billion pixels
        assert!(matches!(
            Surface::new(Format::Argb32, 50_000, 50_000),
            Err(SurfaceError::InvalidSize(50_000, 50_000))
        ));
        let surface = Surface::new(Format::Argb32, 128, 32).unwrap();
        assert_eq!(surface.data().len(), 128 * 32);
        assert!(surface.data().iter().all(|p| *p == 0));
    }

    #[test]
    fn transform() {
        let mut surface = Surface::new(Format::Argb32, 4, 4).unwrap();
        surface.translate(25.0, 0.0);
        surface.translate(25.0, 1.0);
        assert_eq!(surface.origin(), Vec2(50.0, 1.0));
        surface.identity_matrix();
        assert_eq!(surface.origin(), Vec2::ZERO);
    }

    #[test]
    fn source_clamped() {
        let mut surface = Surface::new(Format::Argb32, 1, 1).unwrap();
        assert_eq!(surface.source(), Rgba::BLACK);
        surface.set_source_rgb(255.0, 255.0, 255.0);
        assert_eq!(surface.source(), Rgba::WHITE);
    }

    #[test]
    fn mask_gray_over() {
        let mut surface = Surface::new(Format::Argb32, 3, 1).unwrap();
        surface.set_source_rgb(1.0, 1.0, 1.0);
        surface.mask(&a8((2, 1), vec![255, 128]), 1, 0);
        assert_eq!(surface.pixel(0, 0), Some(0));
        assert_eq!(surface.pixel(1, 0), Some(0xFFFF_FFFF));
        assert_eq!(surface.pixel(2, 0), Some(0x8080_8080));

        // OVER onto existing coverage
        surface.mask(&a8((1, 1), vec![128]), 2, 0);
        assert_eq!(surface.pixel(2, 0), Some(0xC0C0_C0C0));
    }

    #[test]
    fn mask_clipped() {
        let mut surface = Surface::new(Format::Argb32, 2, 2).unwrap();
        surface.set_source_rgb(1.0, 0.0, 0.0);
        surface.mask(&a8((3, 3), vec![255; 9]), -1, 1);
        assert_eq!(surface.pixel(0, 0), Some(0));
        assert_eq!(surface.pixel(0, 1), Some(0xFFFF_0000));
        assert_eq!(surface.pixel(1, 1), Some(0xFFFF_0000));
        assert_eq!(surface.pixel(2, 1), None);
    }

    #[test]
    fn mask_component_alpha() {
        let mut surface = Surface::new(Format::Argb32, 1, 1).unwrap();
        surface.set_source_rgb(1.0, 1.0, 1.0);
        let sprite = Sprite {
            offset: (0, 0),
            size: (1, 1),
            format: MaskFormat::Rgb24,
            data: vec![255, 128, 0],
        };
        surface.mask(&sprite, 0, 0);
        assert_eq!(surface.pixel(0, 0), Some(0x80FF_8000));
    }

    #[test]
    fn png_unpremultiplied() {
        let mut surface = Surface::new(Format::Argb32, 3, 2).unwrap();
        surface.set_source_rgb(1.0, 0.5, 0.0);
        surface.mask(&a8((1, 1), vec![128]), 0, 0);

        let mut bytes = Vec::new();
        surface.write_to_png(&mut bytes).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!((info.width, info.height), (3, 2));
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(&buf[0..4], &[255, 128, 0, 128]);
        assert_eq!(&buf[4..8], &[0, 0, 0, 0]);
    }
}
