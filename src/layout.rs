// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Text layout
//!
//! A [`Layout`] binds a [`FontDescription`] (resolved to a single face) to an
//! [`Environment`]. Its text may be replaced at any time; glyphs are
//! positioned immediately, using each glyph's horizontal advance plus kerning
//! where the face provides it. Explicit line breaks (`\n`) start a new line.
//!
//! This *does not* perform complex shaping, bidirectional reordering or
//! line wrapping.

use crate::conv::{ceil_px, to_u32};
use crate::fonts::{FaceId, FaceStore, FontDescription, FontLibrary, FontSize, NoFontMatch};
use crate::raster::raster;
use crate::surface::Surface;
use crate::{Environment, GlyphId, Vec2};
use ab_glyph::{Font, ScaleFont};
use easy_cast::{Conv, ConvFloat};
use std::sync::Arc;

/// A positioned glyph
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    /// Index of char in source text
    pub index: u32,
    /// Glyph identifier in font
    pub id: GlyphId,
    /// Position of the glyph's baseline origin, relative to the layout's
    /// top-left corner
    pub position: Vec2,
}

/// A text layout
#[derive(Debug)]
pub struct Layout {
    env: Environment,
    desc: FontDescription,
    face_id: FaceId,
    face: Arc<FaceStore>,
    dpem: f32,
    text: String,
    glyphs: Vec<Glyph>,
    width: f32,
    lines: u32,
}

impl Layout {
    /// Construct, resolving `desc` to a font face
    ///
    /// The layout is initially empty.
    pub fn new(
        library: &mut FontLibrary,
        env: &Environment,
        desc: FontDescription,
    ) -> Result<Self, NoFontMatch> {
        let face_id = library.select(&desc)?;
        let face = library.get_face_store(face_id);
        let dpem = match desc.size() {
            Some(FontSize::Points(pt)) => env.dpem(pt),
            Some(FontSize::Pixels(px)) => px,
            None => env.dpem(env.pt_size),
        };

        Ok(Layout {
            env: env.clone(),
            desc,
            face_id,
            face,
            dpem,
            text: String::new(),
            glyphs: vec![],
            width: 0.0,
            lines: 1,
        })
    }

    /// The font description
    pub fn description(&self) -> &FontDescription {
        &self.desc
    }

    /// The resolved face
    pub fn face_id(&self) -> FaceId {
        self.face_id
    }

    /// Family name of the resolved face
    pub fn family(&self) -> &str {
        self.face.family()
    }

    /// Font size in pixels per Em
    pub fn dpem(&self) -> f32 {
        self.dpem
    }

    /// The environment
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Text contents
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Positioned glyphs
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Replace the text
    ///
    /// Existing contents are replaced entirely and glyphs repositioned.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.position_glyphs();
    }

    fn position_glyphs(&mut self) {
        self.glyphs.clear();
        self.width = 0.0;
        self.lines = 1;

        let sf = self.face.face_ref().scale_by_dpem(self.dpem);
        let font = self.face.ab_glyph();
        let kern_font = font
            .units_per_em()
            .map(|upem| font.as_scaled(self.dpem * font.height_unscaled() / upem));
        let line_height = sf.height();

        let mut caret = Vec2(0.0, sf.ascent());
        let mut prev: Option<GlyphId> = None;
        for (index, c) in self.text.char_indices() {
            if c == '\n' {
                self.width = self.width.max(caret.0);
                caret = Vec2(0.0, caret.1 + line_height);
                self.lines += 1;
                prev = None;
                continue;
            }

            let id = sf.face().glyph_index(c);
            if let (Some(prev), Some(kf)) = (prev, kern_font.as_ref()) {
                caret.0 += kf.kern(ab_glyph::GlyphId(prev.0), ab_glyph::GlyphId(id.0));
            }

            self.glyphs.push(Glyph {
                index: to_u32(index),
                id,
                position: caret,
            });
            caret.0 += sf.h_advance(id);
            prev = Some(id);
        }
        self.width = self.width.max(caret.0);
    }

    /// Logical size in pixels: `(width, height)`
    ///
    /// The width is the advance of the longest line; the height is the line
    /// height (`ascent - descent`) times the number of lines. Both are rounded
    /// up to whole pixels. An empty layout has zero width and the height of
    /// one line.
    pub fn pixel_size(&self) -> (i32, i32) {
        let sf = self.face.face_ref().scale_by_dpem(self.dpem);
        let height = sf.height() * f32::conv(self.lines);
        (ceil_px(self.width), ceil_px(height))
    }

    /// Paint the text onto `surface`
    ///
    /// The layout's top-left corner is placed at the surface's current
    /// origin; glyphs are painted with the surface's source colour.
    pub fn show(&self, surface: &mut Surface) {
        let origin = surface.origin();
        for glyph in &self.glyphs {
            let pos = origin + glyph.position;
            let Some(sprite) = raster(&self.env.raster, &self.face, glyph.id, self.dpem, pos.fract())
            else {
                continue;
            };
            let base = pos.floor();
            let x = i32::conv_floor(base.0) + sprite.offset.0;
            let y = i32::conv_floor(base.1) + sprite.offset.1;
            surface.mask(&sprite, x, y);
        }
    }
}
