// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writable views onto the image buffer.
//!
//! A CanvasRegion holds mutable slices of the rows of one rectangle of
//! the image.  Splitting the buffer hands every tile the slices of its
//! own rectangle and nothing else, so writers on different threads can
//! never touch the same pixel, and the borrow checker keeps the buffer
//! out of the encoder's reach until every region is gone.

use crate::planes::Pixel;
use crate::tiles::Tiling;
use image::{Rgba, RgbaImage};

const CHANNELS: usize = 4;

/// Anything a writer can put coloured pixels into.
pub trait PixelSink {
    /// Store `colour` at `pixel`, in image coordinates.
    fn put(&mut self, pixel: Pixel, colour: Rgba<u8>);
}

/// One rectangle of the image, mutably borrowed row by row.
#[derive(Debug)]
pub struct CanvasRegion<'a> {
    origin: Pixel,
    width: u32,
    rows: Vec<&'a mut [u8]>,
}

impl<'a> CanvasRegion<'a> {
    /// The entire image as a single region.
    pub fn whole(image: &'a mut RgbaImage) -> CanvasRegion<'a> {
        let width = image.width();
        let stride = (width as usize) * CHANNELS;
        let raw: &'a mut [u8] = &mut **image;
        let rows = if stride == 0 {
            vec![]
        } else {
            raw.chunks_mut(stride).collect()
        };
        CanvasRegion {
            origin: Pixel(0, 0),
            width,
            rows,
        }
    }

    /// Cut the image into one region per tile, in the tiling's order.
    /// The image must be the size the tiling was made for.
    pub fn split(image: &'a mut RgbaImage, tiling: &Tiling) -> Vec<CanvasRegion<'a>> {
        let plane = tiling.image();
        assert_eq!(image.dimensions(), (plane.width(), plane.height()));

        let stride = (plane.width() as usize) * CHANNELS;
        let mut regions: Vec<CanvasRegion<'a>> = tiling
            .tiles()
            .iter()
            .map(|tile| CanvasRegion {
                origin: tile.origin,
                width: tile.width(),
                rows: Vec::with_capacity(tile.height() as usize),
            })
            .collect();

        let raw: &'a mut [u8] = &mut **image;
        let mut rows = raw.chunks_mut(stride);
        for (band, tiles) in regions
            .chunks_mut(tiling.grid().columns as usize)
            .zip(tiling.tiles().chunks(tiling.grid().columns as usize))
        {
            for row in rows.by_ref().take(tiles[0].height() as usize) {
                let mut rest = row;
                for region in band.iter_mut() {
                    let (mine, tail) =
                        std::mem::take(&mut rest).split_at_mut((region.width as usize) * CHANNELS);
                    region.rows.push(mine);
                    rest = tail;
                }
                assert!(rest.is_empty(), "tiles do not span the full row");
            }
        }
        assert!(rows.next().is_none(), "tiles do not span the full height");

        regions
    }

    /// Top-left pixel of the region, in image coordinates.
    pub fn origin(&self) -> Pixel {
        self.origin
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Number of pixels in the region.
    pub fn len(&self) -> usize {
        (self.width as usize) * self.rows.len()
    }

    /// True when the region holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an image pixel belongs to this region.
    pub fn contains(&self, pixel: &Pixel) -> bool {
        self.origin.0 <= pixel.0
            && pixel.0 < self.origin.0 + self.width
            && self.origin.1 <= pixel.1
            && pixel.1 < self.origin.1 + self.height()
    }
}

impl<'a> PixelSink for CanvasRegion<'a> {
    fn put(&mut self, pixel: Pixel, colour: Rgba<u8>) {
        assert!(
            self.contains(&pixel),
            "pixel {:?} lies outside the region at {:?}",
            pixel,
            self.origin
        );
        let row = &mut self.rows[(pixel.1 - self.origin.1) as usize];
        let at = ((pixel.0 - self.origin.0) as usize) * CHANNELS;
        row[at..at + CHANNELS].copy_from_slice(&colour.0);
    }
}
