// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The producer/writer pipeline.
//!
//! A producer walks the pixels of a plane by nesting two coordinate
//! streams, evaluates every point, and hands each result to a writer
//! over a rendezvous channel.  The writer colours the results and
//! stores them until the producer hangs up.  Neither side can get
//! more than one sample ahead of the other.

use crate::canvas::{CanvasRegion, PixelSink};
use crate::error::RenderError;
use crate::escape::escape_time;
use crate::palette::Palette;
use crate::planes::{Pixel, PlaneMapper};
use crossbeam::channel::{bounded, Receiver, Sender};
use image::RgbaImage;
use log::{debug, info};
use num::Complex;

/// The escape count for one pixel of the image.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    /// Pixel column.
    pub x: u32,
    /// Pixel row.
    pub y: u32,
    /// Escape count, in `1..=max_count`.
    pub n: u32,
}

/// What a finished render did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderReport {
    /// Number of producer/writer pipelines that ran.
    pub tiles: usize,
    /// Number of pixels the writers stored.
    pub pixels: usize,
}

/// Evaluate every pixel of `plane` and send the samples, offset by
/// `origin`, down `results`.  Columns come from the outer stream; a
/// fresh row stream is started for every column.  Returns the number
/// of samples sent.  The channel closes when this returns.
pub fn produce(origin: Pixel, plane: &PlaneMapper, max_count: u32, results: Sender<Sample>) -> usize {
    let mut sent = 0;
    for (column, re) in plane.columns().spawn().iter().enumerate() {
        for (row, im) in plane.rows().spawn().iter().enumerate() {
            let sample = Sample {
                x: origin.0 + column as u32,
                y: origin.1 + row as u32,
                n: escape_time(Complex::new(re, im), max_count),
            };
            // The writer only hangs up if it died.
            if results.send(sample).is_err() {
                return sent;
            }
            sent += 1;
        }
    }
    sent
}

/// Colour and store every sample until the channel is closed.
/// Returns the number of pixels written.
pub fn drain<S: PixelSink>(results: Receiver<Sample>, sink: &mut S, palette: Palette) -> usize {
    let mut written = 0;
    for sample in results.iter() {
        sink.put(Pixel(sample.x, sample.y), palette.colour(sample.n));
        written += 1;
    }
    written
}

/// Fill `image` with one producer and one writer for the whole plane.
/// The writer runs on its own thread; the calling thread produces.
/// Returns once the writer has drained the channel.
pub fn render_single(
    plane: &PlaneMapper,
    max_count: u32,
    palette: Palette,
    image: &mut RgbaImage,
) -> Result<RenderReport, RenderError> {
    assert_eq!(image.dimensions(), (plane.width(), plane.height()));
    info!(
        "rendering {}x{} in a single pipeline",
        plane.width(),
        plane.height()
    );

    let mut canvas = CanvasRegion::whole(image);
    let (tx, rx) = bounded(0);
    let pixels = crossbeam::thread::scope(|scope| {
        let writer = scope.spawn(move |_| drain(rx, &mut canvas, palette));
        let sent = produce(Pixel(0, 0), plane, max_count, tx);
        debug!("producer finished after {} samples", sent);
        writer.join()
    })
    .map_err(|_| RenderError::WorkerPanicked)?
    .map_err(|_| RenderError::WorkerPanicked)?;

    info!("single pipeline wrote {} pixels", pixels);
    Ok(RenderReport { tiles: 1, pixels })
}
