// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Simple data types

use std::ops::{Add, AddAssign, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 2D vector (position/size/offset) over `f32`
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2(pub f32, pub f32);

impl Vec2 {
    /// Zero
    pub const ZERO: Vec2 = Vec2(0.0, 0.0);

    /// Round both components down
    #[inline]
    pub fn floor(self) -> Self {
        Vec2(self.0.floor(), self.1.floor())
    }

    /// Fractional part of both components
    ///
    /// Unlike `f32::fract`, this is always in the range `0.0 ≤ x < 1.0`.
    #[inline]
    pub fn fract(self) -> Self {
        self - self.floor()
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Vec2(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
        self.1 += rhs.1;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Vec2(self.0 - rhs.0, self.1 - rhs.1)
    }
}

/// A colour with straight (non-premultiplied) alpha
///
/// Components are in the range `0.0 ..= 1.0`; the constructors clamp.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Opaque black
    pub const BLACK: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    /// Opaque white
    pub const WHITE: Rgba = Rgba {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Construct an opaque colour
    ///
    /// Components are clamped to `0.0 ..= 1.0`.
    #[inline]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Rgba::rgba(r, g, b, 1.0)
    }

    /// Construct a colour with alpha
    ///
    /// Components are clamped to `0.0 ..= 1.0`.
    #[inline]
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Rgba {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
            a: clamp_unit(a),
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::BLACK
    }
}

// NaN maps to 0
fn clamp_unit(x: f32) -> f32 {
    if x >= 1.0 {
        1.0
    } else if x > 0.0 {
        x
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec2_fract() {
        let v = Vec2(25.75, -0.25);
        assert_eq!(v.floor(), Vec2(25.0, -1.0));
        assert_eq!(v.fract(), Vec2(0.75, 0.75));
    }

    #[test]
    fn rgb_clamps() {
        assert_eq!(Rgba::rgb(255.0, 255.0, 255.0), Rgba::WHITE);
        assert_eq!(Rgba::rgba(-1.0, 0.5, f32::NAN, 2.0), Rgba::rgba(0.0, 0.5, 0.0, 1.0));
    }
}
