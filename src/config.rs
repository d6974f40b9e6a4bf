// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render parameters, their defaults, and the little parsers the
//! command line uses to read them.

use crate::error::RenderError;
use crate::palette::Palette;
use crate::planes::PlaneMapper;
use crate::tiles::{Grid, Tiling};
use num::Complex;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default image width and height, in pixels.
pub const DEFAULT_SIZE: (u32, u32) = (1000, 1000);
/// Default left-lower corner of the window.
pub const DEFAULT_LEFTLOWER: (f64, f64) = (-2.0, -1.25);
/// Default right-upper corner of the window.
pub const DEFAULT_RIGHTUPPER: (f64, f64) = (0.5, 1.25);
/// Default iteration cap.
pub const DEFAULT_MAX_COUNT: u32 = 2048;
/// Default tile grid.
pub const DEFAULT_GRID: (u32, u32) = (3, 2);
/// Default JPEG quality.
pub const DEFAULT_QUALITY: u8 = 75;

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// A specific implementation of parse_pair using a comma and expecting
/// floating point numbers.
pub fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

/// Which pipeline layout to run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// One producer and one writer for the whole image.
    Single,
    /// One producer and one writer per tile.
    Tiled,
}

impl Mode {
    /// The palette a mode uses unless told otherwise.
    pub fn default_palette(self) -> Palette {
        match self {
            Mode::Single => Palette::Red,
            Mode::Tiled => Palette::Green,
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Mode::Single),
            "tiled" => Ok(Mode::Tiled),
            _ => Err(format!("Unknown mode '{}', expected single or tiled", s)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Single => write!(f, "single"),
            Mode::Tiled => write!(f, "tiled"),
        }
    }
}

/// Everything needed for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Left-lower corner of the complex window.
    pub leftlower: Complex<f64>,
    /// Right-upper corner of the complex window.
    pub rightupper: Complex<f64>,
    /// Iteration cap for the escape test.
    pub max_count: u32,
    /// Pipeline layout.
    pub mode: Mode,
    /// Tile grid, used in tiled mode.
    pub grid: Grid,
    /// Most tiles in flight at once, used in tiled mode.
    pub threads: usize,
    /// Palette override; each mode has its own default.
    pub palette: Option<Palette>,
    /// Where the image goes.
    pub output: PathBuf,
    /// JPEG quality, 1 to 100.
    pub quality: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: DEFAULT_SIZE.0,
            height: DEFAULT_SIZE.1,
            leftlower: Complex::new(DEFAULT_LEFTLOWER.0, DEFAULT_LEFTLOWER.1),
            rightupper: Complex::new(DEFAULT_RIGHTUPPER.0, DEFAULT_RIGHTUPPER.1),
            max_count: DEFAULT_MAX_COUNT,
            mode: Mode::Tiled,
            grid: Grid::new(DEFAULT_GRID.0, DEFAULT_GRID.1),
            threads: num_cpus::get(),
            palette: None,
            output: PathBuf::from("mandelbrot.jpg"),
            quality: DEFAULT_QUALITY,
        }
    }
}

impl RenderConfig {
    /// The plane described by the size and window.
    pub fn plane(&self) -> Result<PlaneMapper, RenderError> {
        if self.max_count == 0 {
            return Err(RenderError::Plane(
                "The iteration cap must be at least 1.".to_string(),
            ));
        }
        PlaneMapper::new(self.width, self.height, self.leftlower, self.rightupper)
    }

    /// The tiles for tiled mode.
    pub fn tiling(&self) -> Result<Tiling, RenderError> {
        Tiling::new(&self.plane()?, self.grid)
    }

    /// The palette in effect.
    pub fn palette(&self) -> Palette {
        self.palette.unwrap_or_else(|| self.mode.default_palette())
    }
}
