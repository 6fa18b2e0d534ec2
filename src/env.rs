// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Environment in which text is rastered

use crate::raster::{Antialias, Config};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Environment in which text is prepared for display
///
/// This plays the role of the drawing context's font options: resolution and
/// antialiasing. An `Environment` can be default-constructed (96 DPI, 10pt,
/// grayscale antialiasing).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Environment {
    /// Pixels-per-point
    ///
    /// This is a scaling factor used to convert font sizes (in points) to a
    /// size in pixels (dots). Units are `pixels/point`.
    ///
    /// Since "72 pt = 1 in" and the "standard" DPI is 96, calculate as:
    /// ```none
    /// dpp = dpi / 72 = scale_factor * (96 / 72)
    /// ```
    pub dpp: f32,
    /// Default font size in points
    ///
    /// Used when a font description does not specify a size.
    pub pt_size: f32,
    /// Raster configuration
    pub raster: Config,
}

impl Default for Environment {
    fn default() -> Self {
        Environment {
            dpp: 96.0 / 72.0,
            pt_size: 10.0,
            raster: Config::default(),
        }
    }
}

impl Environment {
    /// Alternative default constructor
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the antialiasing mode
    pub fn set_antialias(&mut self, antialias: Antialias) {
        self.raster.set_antialias(antialias);
    }

    /// Get the antialiasing mode
    pub fn antialias(&self) -> Antialias {
        self.raster.antialias()
    }

    /// Convert a point size to pixels per Em
    #[inline]
    pub fn dpem(&self, pt_size: f32) -> f32 {
        pt_size * self.dpp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sans_20_dpem() {
        let env = Environment::new();
        let dpem = env.dpem(20.0);
        assert!((dpem - 26.666_666).abs() < 1e-4);
    }

    #[test]
    fn antialias() {
        let mut env = Environment::new();
        assert_eq!(env.antialias(), Antialias::Gray);
        env.set_antialias(Antialias::Subpixel);
        assert_eq!(env.antialias(), Antialias::Subpixel);
    }
}
