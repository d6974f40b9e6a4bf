// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning an escape count into a colour.

use image::Rgba;
use std::fmt;
use std::str::FromStr;

/// Which channel carries the +50 offset.  Every palette is fully
/// opaque and wraps each channel modulo 256.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    /// `(n + 50, n, n)`; the single-pipeline default.
    Red,
    /// `(n, n + 50, n)`; the tiled default.
    Green,
}

impl Palette {
    /// Colour for an escape count.
    #[inline]
    pub fn colour(self, n: u32) -> Rgba<u8> {
        let base = (n % 256) as u8;
        let shifted = (n.wrapping_add(50) % 256) as u8;
        match self {
            Palette::Red => Rgba([shifted, base, base, 255]),
            Palette::Green => Rgba([base, shifted, base, 255]),
        }
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Palette::Red),
            "green" => Ok(Palette::Green),
            _ => Err(format!("Unknown palette '{}', expected red or green", s)),
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Palette::Red => write!(f, "red"),
            Palette::Green => write!(f, "green"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_offsets_the_red_channel() {
        assert_eq!(Palette::Red.colour(10), Rgba([60, 10, 10, 255]));
    }

    #[test]
    fn green_offsets_the_green_channel() {
        assert_eq!(Palette::Green.colour(10), Rgba([10, 60, 10, 255]));
    }

    #[test]
    fn channels_wrap() {
        assert_eq!(Palette::Red.colour(2048), Rgba([50, 0, 0, 255]));
        assert_eq!(Palette::Green.colour(210), Rgba([210, 4, 210, 255]));
    }

    #[test]
    fn parses_names() {
        assert_eq!("red".parse::<Palette>(), Ok(Palette::Red));
        assert_eq!("green".parse::<Palette>(), Ok(Palette::Green));
        assert!("blue".parse::<Palette>().is_err());
    }
}
