// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The things that can go wrong.  Computing the set itself cannot
//! fail; only describing a bad plane or grid, or getting the finished
//! image onto disk, can.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The pixel grid or the complex window is unusable.
    #[error("bad plane: {0}")]
    Plane(String),

    /// The tile grid cannot partition the image.
    #[error("cannot split a {width}x{height} image into {columns}x{rows} tiles")]
    Tiling {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Requested tile columns.
        columns: u32,
        /// Requested tile rows.
        rows: u32,
    },

    /// The tiles do not cover the image exactly once.
    #[error("broken partition: {0}")]
    Partition(String),

    /// The output file could not be created.
    #[error("could not create {}: {source}", .path.display())]
    SinkCreation {
        /// Where we tried to write.
        path: PathBuf,
        /// Why the filesystem refused.
        #[source]
        source: io::Error,
    },

    /// The encoder rejected the buffer, or the file failed mid-write.
    #[error("could not encode image: {0}")]
    Encoding(#[from] image::ImageError),

    /// A producer or writer thread panicked.
    #[error("a render thread panicked")]
    WorkerPanicked,
}
