use crate::errors::{Result, ViewerError};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Jpeg,
    Png,
}

/// The 2D drawing target the viewport paints into.
///
/// The viewport owns exactly one surface; it paints the source image at an
/// offset/size, reads and writes raw RGBA pixels for the filter pipeline,
/// and encodes snapshots for export.
pub trait RenderSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Erase the whole surface to transparent black.
    fn clear(&mut self);

    /// Paint `source` scaled to `width`×`height` with its top-left corner
    /// at `(x, y)`. Painting is clipped to the surface bounds; negative
    /// coordinates are valid.
    fn paint_image(&mut self, source: &RgbaImage, x: f32, y: f32, width: f32, height: f32);

    /// Read back a rectangle of tightly packed RGBA bytes. The rectangle
    /// is clipped to the surface.
    fn read_pixels(&self, x: u32, y: u32, width: u32, height: u32) -> Vec<u8>;

    /// Write a tightly packed RGBA rectangle at `(x, y)`.
    fn write_pixels(&mut self, pixels: &[u8], x: u32, y: u32, width: u32, height: u32);

    /// Encode the current surface contents.
    fn encode_snapshot(&self, format: SnapshotFormat, quality: u8) -> Result<Vec<u8>>;
}

/// CPU surface backed by an `image::RgbaImage` sized to the workspace.
pub struct PixmapSurface {
    buffer: RgbaImage,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: RgbaImage::new(width, height),
        }
    }

    pub fn buffer(&self) -> &RgbaImage {
        &self.buffer
    }
}

impl RenderSurface for PixmapSurface {
    fn width(&self) -> u32 {
        self.buffer.width()
    }

    fn height(&self) -> u32 {
        self.buffer.height()
    }

    fn clear(&mut self) {
        self.buffer.fill(0);
    }

    fn paint_image(&mut self, source: &RgbaImage, x: f32, y: f32, width: f32, height: f32) {
        let target_w = width.round().max(0.0) as u32;
        let target_h = height.round().max(0.0) as u32;
        if target_w == 0 || target_h == 0 {
            return;
        }

        let scaled = if (target_w, target_h) == source.dimensions() {
            source.clone()
        } else {
            imageops::resize(source, target_w, target_h, FilterType::Triangle)
        };
        imageops::replace(&mut self.buffer, &scaled, x.round() as i64, y.round() as i64);
    }

    fn read_pixels(&self, x: u32, y: u32, width: u32, height: u32) -> Vec<u8> {
        imageops::crop_imm(&self.buffer, x, y, width, height)
            .to_image()
            .into_raw()
    }

    fn write_pixels(&mut self, pixels: &[u8], x: u32, y: u32, width: u32, height: u32) {
        let Some(patch) = RgbaImage::from_raw(width, height, pixels.to_vec()) else {
            log::warn!("write_pixels: buffer length does not match {width}x{height}, ignoring");
            return;
        };
        imageops::replace(&mut self.buffer, &patch, x as i64, y as i64);
    }

    fn encode_snapshot(&self, format: SnapshotFormat, quality: u8) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        match format {
            SnapshotFormat::Jpeg => {
                // JPEG has no alpha channel
                let rgb = DynamicImage::ImageRgba8(self.buffer.clone()).to_rgb8();
                JpegEncoder::new_with_quality(&mut out, quality)
                    .encode_image(&rgb)
                    .map_err(|e| ViewerError::Snapshot {
                        message: e.to_string(),
                    })?;
            }
            SnapshotFormat::Png => {
                self.buffer
                    .write_to(&mut out, ImageFormat::Png)
                    .map_err(|e| ViewerError::Snapshot {
                        message: e.to_string(),
                    })?;
            }
        }
        Ok(out.into_inner())
    }
}
