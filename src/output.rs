// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Putting the finished image on disk.

use crate::error::RenderError;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageError, ImageFormat, RgbaImage};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the finished buffer to `outfile`.  The format follows the
/// extension, falling back to JPEG; `quality` only matters for JPEG.
/// Every pixel is opaque, so the alpha channel is dropped.
pub fn write_image(outfile: &Path, pixels: &RgbaImage, quality: u8) -> Result<(), RenderError> {
    let format = ImageFormat::from_path(outfile).unwrap_or(ImageFormat::Jpeg);
    let output = File::create(outfile).map_err(|source| RenderError::SinkCreation {
        path: outfile.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(output);
    let rgb = DynamicImage::ImageRgba8(pixels.clone()).into_rgb8();

    match format {
        ImageFormat::Jpeg => {
            JpegEncoder::new_with_quality(&mut writer, quality).encode_image(&rgb)?;
        }
        other => rgb.write_to(&mut writer, other)?,
    }
    writer.flush().map_err(ImageError::IoError)?;

    info!(
        "wrote {}x{} {:?} to {}",
        rgb.width(),
        rgb.height(),
        format,
        outfile.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checkerboard() -> RgbaImage {
        RgbaImage::from_fn(8, 6, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn writes_a_readable_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        write_image(&path, &checkerboard(), 90).unwrap();
        let read = image::open(&path).unwrap();
        assert_eq!((read.width(), read.height()), (8, 6));
    }

    #[test]
    fn png_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        write_image(&path, &checkerboard(), 90).unwrap();
        let read = image::open(&path).unwrap().into_rgba8();
        assert_eq!(read, checkerboard());
    }

    #[test]
    fn unknown_extensions_become_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.picture");
        write_image(&path, &checkerboard(), 75).unwrap();
        let format = image::ImageReader::open(&path)
            .unwrap()
            .with_guessed_format()
            .unwrap()
            .format();
        assert_eq!(format, Some(ImageFormat::Jpeg));
    }

    #[test]
    fn missing_directory_is_a_sink_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nowhere").join("out.jpg");
        match write_image(&path, &checkerboard(), 75) {
            Err(RenderError::SinkCreation { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected a sink failure, got {:?}", other),
        }
    }
}
