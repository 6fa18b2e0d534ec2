// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Type conversion utilities
//!
//! Indices into fonts and surfaces are represented as `u32` instead of `usize`
//! (note that we do not expect `usize` smaller than `u32`, and neither surfaces
//! nor face lists come anywhere close to `u32::MAX` elements).

use easy_cast::{Cast, ConvFloat};

/// Convert `usize` → `u32`
///
/// This is a "safer" wrapper around `as` ensuring (on debug builds) that the
/// input value may be represented correctly by `u32`.
#[inline]
pub fn to_u32(x: usize) -> u32 {
    x.cast()
}

/// Convert `u32` → `usize`
///
/// This is a "safer" wrapper around `as` ensuring that the operation is
/// zero-extension.
#[inline]
pub fn to_usize(x: u32) -> usize {
    x.cast()
}

/// Round a pixel measure up to whole pixels
///
/// Negative and non-finite inputs resolve to 0.
#[inline]
pub fn ceil_px(x: f32) -> i32 {
    if x.is_finite() && x > 0.0 {
        i32::conv_ceil(x)
    } else {
        0
    }
}

/// Scale factor: pixels per font unit
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DPU(pub f32);

impl DPU {
    pub(crate) fn i16_to_px(self, x: i16) -> f32 {
        f32::from(x) * self.0
    }
    pub(crate) fn u16_to_px(self, x: u16) -> f32 {
        f32::from(x) * self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil() {
        assert_eq!(ceil_px(0.0), 0);
        assert_eq!(ceil_px(7.01), 8);
        assert_eq!(ceil_px(31.0), 31);
        assert_eq!(ceil_px(-2.5), 0);
        assert_eq!(ceil_px(f32::NAN), 0);
    }

    #[test]
    fn dpu() {
        let dpu = DPU(0.5);
        assert_eq!(dpu.i16_to_px(-10), -5.0);
        assert_eq!(dpu.u16_to_px(2048), 1024.0);
    }
}
