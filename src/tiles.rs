// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Partitioning an image into a grid of tiles.
//!
//! Every tile is described by its position in the grid, its top-left
//! pixel in the image, and a PlaneMapper of its own whose integral
//! plane is the tile's size and whose complex plane is the tile's
//! slice of the window.  Tiles are kept in row-major order.

use crate::error::RenderError;
use crate::planes::{ComplexPlane, Pixel, PlaneMapper};
use num::Complex;
use std::fmt;
use std::str::FromStr;

/// How many tiles across and down.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Tiles across.
    pub columns: u32,
    /// Tiles down.
    pub rows: u32,
}

impl Grid {
    /// A grid of `columns` by `rows` tiles.
    pub fn new(columns: u32, rows: u32) -> Self {
        Grid { columns, rows }
    }

    /// Total number of tiles.
    pub fn len(&self) -> usize {
        (self.columns as usize) * (self.rows as usize)
    }

    /// True when the grid has no tiles at all.
    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }
}

impl FromStr for Grid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match crate::config::parse_pair::<u32>(s, 'x') {
            Some((columns, rows)) if columns > 0 && rows > 0 => Ok(Grid { columns, rows }),
            Some(_) => Err("A tile grid needs at least one tile each way".to_string()),
            None => Err(format!("Could not parse tile grid '{}'", s)),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// One rectangle of the image and the part of the complex plane it
/// shows.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tile {
    /// Column of the tile in the grid.
    pub column: u32,
    /// Row of the tile in the grid.
    pub row: u32,
    /// The image pixel at the tile's top-left corner.
    pub origin: Pixel,
    /// The tile's own pixel size and coordinate sub-range.
    pub plane: PlaneMapper,
}

impl Tile {
    /// Tile width in pixels.
    pub fn width(&self) -> u32 {
        self.plane.width()
    }

    /// Tile height in pixels.
    pub fn height(&self) -> u32 {
        self.plane.height()
    }

    /// Whether an image pixel falls inside this tile.
    pub fn contains(&self, pixel: &Pixel) -> bool {
        self.origin.0 <= pixel.0
            && pixel.0 < self.origin.0 + self.width()
            && self.origin.1 <= pixel.1
            && pixel.1 < self.origin.1 + self.height()
    }
}

// One tile's share of a single axis.
#[derive(Copy, Clone, Debug)]
struct Span {
    start: u32,
    size: u32,
    min: f64,
    max: f64,
}

// Pixel sizes come from integer division, with the last span taking
// the remainder.  Coordinate bounds step by an equal share of the
// window, except that the last one is pinned to `max`.
fn split_axis(pixels: u32, parts: u32, min: f64, max: f64) -> Vec<Span> {
    let size = pixels / parts;
    let step = (max - min) / (parts as f64);
    (0..parts)
        .map(|i| {
            let last = i == parts - 1;
            Span {
                start: i * size,
                size: if last { pixels - i * size } else { size },
                min: min + (i as f64) * step,
                max: if last {
                    max
                } else {
                    min + ((i + 1) as f64) * step
                },
            }
        })
        .collect()
}

/// The image and the tiles it has been cut into.
#[derive(Clone, Debug)]
pub struct Tiling {
    image: PlaneMapper,
    grid: Grid,
    tiles: Vec<Tile>,
}

impl Tiling {
    /// Cut `image` into `grid`.  Each axis needs at least one tile and
    /// no more tiles than it has pixels.
    pub fn new(image: &PlaneMapper, grid: Grid) -> Result<Tiling, RenderError> {
        if grid.is_empty() || grid.columns > image.width() || grid.rows > image.height() {
            return Err(RenderError::Tiling {
                width: image.width(),
                height: image.height(),
                columns: grid.columns,
                rows: grid.rows,
            });
        }

        let ComplexPlane(leftlower, rightupper) = image.complex_plane;
        let columns = split_axis(image.width(), grid.columns, leftlower.re, rightupper.re);
        let rows = split_axis(image.height(), grid.rows, leftlower.im, rightupper.im);

        let mut tiles = Vec::with_capacity(grid.len());
        for (row, ys) in rows.iter().enumerate() {
            for (column, xs) in columns.iter().enumerate() {
                tiles.push(Tile {
                    column: column as u32,
                    row: row as u32,
                    origin: Pixel(xs.start, ys.start),
                    plane: PlaneMapper::new(
                        xs.size,
                        ys.size,
                        Complex::new(xs.min, ys.min),
                        Complex::new(xs.max, ys.max),
                    )?,
                });
            }
        }

        Ok(Tiling {
            image: *image,
            grid,
            tiles,
        })
    }

    /// The whole image.
    pub fn image(&self) -> &PlaneMapper {
        &self.image
    }

    /// The grid the image was cut into.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// All tiles, row by row.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Check that the tiles cover every pixel of the image exactly
    /// once, and that the outermost tiles reach exactly to the edges
    /// of the complex window.
    pub fn verify(&self) -> Result<(), RenderError> {
        let broken = |why: String| Err(RenderError::Partition(why));
        let ComplexPlane(leftlower, rightupper) = self.image.complex_plane;

        if self.tiles.len() != self.grid.len() {
            return broken(format!(
                "{} tiles for a {} grid",
                self.tiles.len(),
                self.grid
            ));
        }

        let mut top = 0;
        for band in self.tiles.chunks(self.grid.columns as usize) {
            let mut left = 0;
            for tile in band {
                if tile.origin != Pixel(left, top) || tile.height() != band[0].height() {
                    return broken(format!(
                        "tile {},{} starts at {:?}, expected {},{}",
                        tile.column, tile.row, tile.origin, left, top
                    ));
                }
                left += tile.width();
            }
            if left != self.image.width() {
                return broken(format!("a band of tiles is {} pixels wide", left));
            }
            top += band[0].height();
        }
        if top != self.image.height() {
            return broken(format!("the tiles are {} pixels tall", top));
        }

        for tile in &self.tiles {
            let ComplexPlane(low, high) = tile.plane.complex_plane;
            let first_column = tile.column == 0;
            let first_row = tile.row == 0;
            let last_column = tile.column == self.grid.columns - 1;
            let last_row = tile.row == self.grid.rows - 1;
            if (first_column && low.re != leftlower.re)
                || (first_row && low.im != leftlower.im)
                || (last_column && high.re != rightupper.re)
                || (last_row && high.im != rightupper.im)
            {
                return broken(format!(
                    "tile {},{} does not reach the edge of the window",
                    tile.column, tile.row
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(width: u32, height: u32) -> PlaneMapper {
        PlaneMapper::new(
            width,
            height,
            Complex::new(-2.0, -1.25),
            Complex::new(0.5, 1.25),
        )
        .unwrap()
    }

    fn coverage(tiling: &Tiling) -> Vec<u32> {
        let image = tiling.image();
        let mut hits = vec![0; image.len()];
        for tile in tiling.tiles() {
            for y in tile.origin.1..tile.origin.1 + tile.height() {
                for x in tile.origin.0..tile.origin.0 + tile.width() {
                    hits[(y * image.width() + x) as usize] += 1;
                }
            }
        }
        hits
    }

    #[test]
    fn even_grid_covers_every_pixel_once() {
        let tiling = Tiling::new(&plane(12, 8), Grid::new(3, 2)).unwrap();
        assert_eq!(tiling.tiles().len(), 6);
        assert!(coverage(&tiling).iter().all(|&hits| hits == 1));
        assert!(tiling.verify().is_ok());
        for tile in tiling.tiles() {
            assert_eq!((tile.width(), tile.height()), (4, 4));
        }
    }

    #[test]
    fn uneven_grid_gives_the_remainder_to_the_last_tiles() {
        let tiling = Tiling::new(&plane(1000, 1000), Grid::new(3, 2)).unwrap();
        assert!(coverage(&tiling).iter().all(|&hits| hits == 1));
        assert!(tiling.verify().is_ok());
        let widths: Vec<u32> = tiling.tiles()[..3].iter().map(Tile::width).collect();
        assert_eq!(widths, vec![333, 333, 334]);
        assert_eq!(tiling.tiles()[5].origin, Pixel(666, 500));
    }

    #[test]
    fn last_tiles_are_pinned_to_the_window_edge() {
        let tiling = Tiling::new(&plane(1000, 1000), Grid::new(3, 2)).unwrap();
        let last = tiling.tiles()[5];
        assert_eq!(last.plane.complex_plane.1, Complex::new(0.5, 1.25));
        let first = tiling.tiles()[0];
        assert_eq!(first.plane.complex_plane.0, Complex::new(-2.0, -1.25));
    }

    #[test]
    fn interior_bounds_step_by_an_equal_share() {
        let tiling = Tiling::new(&plane(1000, 1000), Grid::new(3, 2)).unwrap();
        let step = 2.5 / 3.0;
        let first = tiling.tiles()[0];
        assert_eq!(first.plane.complex_plane.1.re, -2.0 + step);
        let second = tiling.tiles()[1];
        assert_eq!(second.plane.complex_plane.0.re, -2.0 + step);
        assert_eq!(second.plane.complex_plane.1.re, -2.0 + 2.0 * step);
        assert_eq!(first.plane.complex_plane.1.im, 0.0);
    }

    #[test]
    fn single_tile_is_the_whole_image() {
        let image = plane(10, 10);
        let tiling = Tiling::new(&image, Grid::new(1, 1)).unwrap();
        assert_eq!(tiling.tiles().len(), 1);
        assert_eq!(tiling.tiles()[0].plane, image);
        assert!(tiling.verify().is_ok());
    }

    #[test]
    fn a_tile_per_pixel_still_partitions() {
        let tiling = Tiling::new(&plane(5, 3), Grid::new(5, 3)).unwrap();
        assert!(coverage(&tiling).iter().all(|&hits| hits == 1));
        assert!(tiling.verify().is_ok());
    }

    #[test]
    fn rejects_empty_and_oversized_grids() {
        assert!(Tiling::new(&plane(10, 10), Grid::new(0, 2)).is_err());
        assert!(Tiling::new(&plane(10, 10), Grid::new(11, 2)).is_err());
        assert!(Tiling::new(&plane(10, 10), Grid::new(2, 11)).is_err());
    }

    #[test]
    fn verify_catches_an_overlap() {
        let mut tiling = Tiling::new(&plane(12, 8), Grid::new(3, 2)).unwrap();
        tiling.tiles[1].origin = Pixel(3, 0);
        assert!(tiling.verify().is_err());
    }

    #[test]
    fn tiles_know_their_pixels() {
        let tiling = Tiling::new(&plane(12, 8), Grid::new(3, 2)).unwrap();
        let tile = tiling.tiles()[4];
        assert!(tile.contains(&Pixel(4, 4)));
        assert!(tile.contains(&Pixel(7, 7)));
        assert!(!tile.contains(&Pixel(8, 4)));
        assert!(!tile.contains(&Pixel(4, 3)));
    }

    #[test]
    fn grid_parses() {
        assert_eq!("3x2".parse::<Grid>(), Ok(Grid::new(3, 2)));
        assert!("0x2".parse::<Grid>().is_err());
        assert!("three".parse::<Grid>().is_err());
    }
}
