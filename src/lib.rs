#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane for
//! which repeatedly squaring `z` and adding `c` never sends `z` off to
//! infinity.  Counting how many steps it takes a point to leave the
//! circle of radius 2 gives every pixel a number, and the number gives
//! it a colour.
//!
//! Every pixel is independent of every other, which makes the set an
//! easy thing to compute in parallel and a good thing to practise
//! pipelines on.  Two layouts are provided.  In the single layout one
//! producer walks the whole plane and hands its results, one at a
//! time, to one writer that owns the image.  In the tiled layout the
//! image is cut into a grid of tiles, each with its own producer,
//! writer and slice of the image buffer, and the image is only handed
//! to the encoder once every tile is done.

pub mod canvas;
pub mod config;
pub mod coords;
pub mod error;
pub mod escape;
pub mod output;
pub mod palette;
pub mod pipeline;
pub mod planes;
pub mod tiled;
pub mod tiles;

pub use config::{Mode, RenderConfig};
pub use error::RenderError;
pub use output::write_image;
pub use palette::Palette;
pub use pipeline::RenderReport;

use image::RgbaImage;

/// Allocate an image and fill it the way `config` asks.
pub fn render(config: &RenderConfig) -> Result<(RgbaImage, RenderReport), RenderError> {
    let plane = config.plane()?;
    let mut image = RgbaImage::new(plane.width(), plane.height());
    let report = match config.mode {
        Mode::Single => {
            pipeline::render_single(&plane, config.max_count, config.palette(), &mut image)?
        }
        Mode::Tiled => tiled::render_tiled(
            &config.tiling()?,
            config.max_count,
            config.palette(),
            config.threads,
            &mut image,
        )?,
    };
    Ok((image, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Complex;

    fn small(mode: Mode) -> RenderConfig {
        RenderConfig {
            width: 30,
            height: 20,
            max_count: 50,
            mode,
            threads: 4,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn both_modes_fill_the_image() {
        for mode in [Mode::Single, Mode::Tiled] {
            let (image, report) = render(&small(mode)).unwrap();
            assert_eq!(image.dimensions(), (30, 20));
            assert_eq!(report.pixels, 600);
            assert!(image.pixels().all(|p| p.0[3] == 255));
        }
    }

    #[test]
    fn tiled_mode_reports_its_tiles() {
        let (_, report) = render(&small(Mode::Tiled)).unwrap();
        assert_eq!(report.tiles, 6);
        let (_, report) = render(&small(Mode::Single)).unwrap();
        assert_eq!(report.tiles, 1);
    }

    #[test]
    fn bad_configuration_is_refused() {
        let inverted = RenderConfig {
            leftlower: Complex::new(1.0, 1.0),
            rightupper: Complex::new(-1.0, -1.0),
            ..small(Mode::Single)
        };
        assert!(matches!(render(&inverted), Err(RenderError::Plane(_))));

        let crowded = RenderConfig {
            grid: tiles::Grid::new(31, 1),
            ..small(Mode::Tiled)
        };
        assert!(matches!(render(&crowded), Err(RenderError::Tiling { .. })));
    }
}
