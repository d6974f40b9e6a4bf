// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The tiled renderer.
//!
//! The image is cut into a grid of tiles and the buffer into one
//! region per tile.  A pool of workers takes tiles off a shared queue;
//! for each tile the worker starts the tile's producer on a fresh
//! channel and acts as the tile's writer.  The scope every worker runs
//! in is the barrier: it does not return until every tile has been
//! drained, and until it returns the buffer is still lent out.

use crate::canvas::CanvasRegion;
use crate::error::RenderError;
use crate::escape::escape_time;
use crate::palette::Palette;
use crate::pipeline::{drain, produce, RenderReport};
use crate::planes::Pixel;
use crate::tiles::{Tile, Tiling};
use crossbeam::channel::bounded;
use crossbeam::thread::Scope;
use image::RgbaImage;
use itertools::iproduct;
use log::{debug, info};
use std::sync::Mutex;

// Run one tile's producer on its own thread and write its samples from
// this one.
fn run_tile<'env>(
    scope: &Scope<'env>,
    tile: &Tile,
    region: &mut CanvasRegion,
    max_count: u32,
    palette: Palette,
) -> Result<usize, RenderError> {
    debug!(
        "tile {},{} ({}x{} at {:?}) started",
        tile.column,
        tile.row,
        tile.width(),
        tile.height(),
        tile.origin
    );
    let (tx, rx) = bounded(0);
    let origin = tile.origin;
    let plane = tile.plane;
    let producer = scope.spawn(move |_| produce(origin, &plane, max_count, tx));
    let written = drain(rx, region, palette);
    producer.join().map_err(|_| RenderError::WorkerPanicked)?;
    debug!("tile {},{} done, {} pixels", tile.column, tile.row, written);
    Ok(written)
}

/// Fill `image` tile by tile, with up to `threads` tiles in flight at
/// once.  Returns only after every tile is finished.
pub fn render_tiled(
    tiling: &Tiling,
    max_count: u32,
    palette: Palette,
    threads: usize,
    image: &mut RgbaImage,
) -> Result<RenderReport, RenderError> {
    tiling.verify()?;
    let tiles = tiling.tiles();
    let workers = threads.max(1).min(tiles.len());
    info!(
        "rendering {}x{} as {} tiles on {} workers",
        image.width(),
        image.height(),
        tiling.grid(),
        workers
    );

    let regions = CanvasRegion::split(image, tiling);
    let queue = Mutex::new(tiles.iter().zip(regions));
    let queue = &queue;

    let pixels = crossbeam::thread::scope(|scope| -> Result<usize, RenderError> {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(move |scope| -> Result<usize, RenderError> {
                    let mut written = 0;
                    loop {
                        let next = queue
                            .lock()
                            .map_err(|_| RenderError::WorkerPanicked)?
                            .next();
                        match next {
                            Some((tile, mut region)) => {
                                written += run_tile(scope, tile, &mut region, max_count, palette)?;
                            }
                            None => break,
                        }
                    }
                    Ok(written)
                })
            })
            .collect();

        let mut pixels = 0;
        for handle in handles {
            pixels += handle.join().map_err(|_| RenderError::WorkerPanicked)??;
        }
        Ok(pixels)
    })
    .map_err(|_| RenderError::WorkerPanicked)??;

    info!("all {} tiles done, {} pixels", tiles.len(), pixels);
    Ok(RenderReport {
        tiles: tiles.len(),
        pixels,
    })
}

/// The same fill as render_tiled, one tile after another on the
/// calling thread, without channels.
pub fn render_sequential(
    tiling: &Tiling,
    max_count: u32,
    palette: Palette,
    image: &mut RgbaImage,
) -> Result<RenderReport, RenderError> {
    tiling.verify()?;
    let mut pixels = 0;
    for tile in tiling.tiles() {
        for (x, y) in iproduct!(0..tile.width(), 0..tile.height()) {
            let point = tile.plane.pixel_to_point(&Pixel(x, y));
            let colour = palette.colour(escape_time(point, max_count));
            image.put_pixel(tile.origin.0 + x, tile.origin.1 + y, colour);
            pixels += 1;
        }
    }
    Ok(RenderReport {
        tiles: tiling.tiles().len(),
        pixels,
    })
}
