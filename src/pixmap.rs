// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use tiny_canvas_path::IntSize;

use crate::color::{Color, PremultipliedColorU8};
use crate::error::CanvasError;
use crate::int_rect::IntRect;
use crate::screen_int_rect::ScreenIntRect;

#[cfg(feature = "png-format")]
use crate::color::{premultiply_u8, ALPHA_U8_OPAQUE};

/// Number of bytes per pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// The maximum width/height of a `Pixmap`.
pub const MAX_DIMENSION: u32 = 16384;

/// A container that owns premultiplied RGBA pixels.
///
/// The data is not aligned, therefore stride == width * 4.
///
/// # Guarantees
///
/// - Pixels are premultiplied: for every pixel, each of R, G and B is <= A.
#[derive(Clone, PartialEq)]
pub struct Pixmap {
    data: Vec<u8>,
    size: IntSize,
}

impl Pixmap {
    /// Allocates a new pixmap.
    ///
    /// A pixmap is filled with transparent black by default, aka (0, 0, 0, 0).
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        let size = IntSize::from_wh(width, height).ok_or(CanvasError::InvalidDimensions)?;
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(CanvasError::SurfaceTooLarge);
        }

        let data_len = data_len_for_size(size).ok_or(CanvasError::SurfaceTooLarge)?;
        Ok(Pixmap {
            data: vec![0; data_len],
            size,
        })
    }

    #[cfg(feature = "png-format")]
    pub(crate) fn from_vec(data: Vec<u8>, size: IntSize) -> Option<Self> {
        let data_len = data_len_for_size(size)?;
        if data.len() != data_len {
            return None;
        }

        Some(Pixmap { data, size })
    }

    /// Returns pixmap's width.
    pub fn width(&self) -> u32 {
        self.size.width()
    }

    /// Returns pixmap's height.
    pub fn height(&self) -> u32 {
        self.size.height()
    }

    /// Returns the length of a pixel row in bytes.
    pub fn stride(&self) -> usize {
        self.size.width() as usize * BYTES_PER_PIXEL
    }

    pub(crate) fn rect(&self) -> ScreenIntRect {
        // A pixmap size is always a valid rect.
        ScreenIntRect::from_xywh(0, 0, self.size.width(), self.size.height()).unwrap()
    }

    /// Fills the entire pixmap with a specified color.
    pub fn fill(&mut self, color: Color) {
        let c = color.premultiply_u8();
        for p in self.pixels_mut() {
            *p = c;
        }
    }

    /// Returns the internal data.
    ///
    /// Bytes are ordered as RGBA.
    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Returns the mutable internal data.
    ///
    /// Bytes are ordered as RGBA.
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.data.as_mut_slice()
    }

    /// Returns a pixel color.
    ///
    /// Returns `None` when position is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremultipliedColorU8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }

        let idx = (self.width() * y + x) as usize;
        self.pixels().get(idx).cloned()
    }

    /// Returns a slice of pixels.
    pub fn pixels(&self) -> &[PremultipliedColorU8] {
        bytemuck::cast_slice(self.data())
    }

    /// Returns a mutable slice of pixels.
    pub fn pixels_mut(&mut self) -> &mut [PremultipliedColorU8] {
        bytemuck::cast_slice_mut(self.data_mut())
    }

    /// Returns a container that references pixmap's data.
    pub fn as_ref(&self) -> PixmapRef {
        PixmapRef {
            data: &self.data,
            size: self.size,
        }
    }

    /// Consumes the internal data.
    ///
    /// Bytes are ordered as RGBA.
    pub fn take(self) -> Vec<u8> {
        self.data
    }

    /// Returns a copy of the pixmap that intersects the `rect`.
    ///
    /// Returns `None` when `rect` doesn't overlap the pixmap.
    pub fn clone_rect(&self, rect: IntRect) -> Option<Pixmap> {
        self.as_ref().clone_rect(rect)
    }

    /// Decodes a PNG data into a `Pixmap`.
    ///
    /// Only 8-bit images are supported.
    /// Index PNGs are not supported.
    #[cfg(feature = "png-format")]
    pub fn decode_png(data: &[u8]) -> Result<Self, png::DecodingError> {
        fn invalid(msg: &str) -> png::DecodingError {
            png::DecodingError::from(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                msg.to_string(),
            ))
        }

        let mut decoder = png::Decoder::new(data);
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info()?;
        let mut img_data = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut img_data)?;

        if info.bit_depth != png::BitDepth::Eight {
            return Err(invalid("unsupported bit depth"));
        }

        let size = IntSize::from_wh(info.width, info.height)
            .ok_or_else(|| invalid("invalid image size"))?;

        img_data = match info.color_type {
            png::ColorType::Rgb => {
                let mut rgba_data = Vec::with_capacity(img_data.len() / 3 * 4);
                for rgb in img_data.chunks(3) {
                    rgba_data.push(rgb[0]);
                    rgba_data.push(rgb[1]);
                    rgba_data.push(rgb[2]);
                    rgba_data.push(ALPHA_U8_OPAQUE);
                }

                rgba_data
            }
            png::ColorType::Rgba => img_data,
            png::ColorType::Grayscale => {
                let mut rgba_data = Vec::with_capacity(img_data.len() * 4);
                for gray in img_data {
                    rgba_data.push(gray);
                    rgba_data.push(gray);
                    rgba_data.push(gray);
                    rgba_data.push(ALPHA_U8_OPAQUE);
                }

                rgba_data
            }
            png::ColorType::GrayscaleAlpha => {
                let mut rgba_data = Vec::with_capacity(img_data.len() * 2);
                for slice in img_data.chunks(2) {
                    let gray = slice[0];
                    let alpha = slice[1];
                    rgba_data.push(gray);
                    rgba_data.push(gray);
                    rgba_data.push(gray);
                    rgba_data.push(alpha);
                }

                rgba_data
            }
            png::ColorType::Indexed => {
                return Err(invalid("indexed PNG is not supported"));
            }
        };

        // Premultiply alpha.
        for pixel in img_data.chunks_mut(BYTES_PER_PIXEL) {
            let a = pixel[3];
            pixel[0] = premultiply_u8(pixel[0], a);
            pixel[1] = premultiply_u8(pixel[1], a);
            pixel[2] = premultiply_u8(pixel[2], a);
        }

        Pixmap::from_vec(img_data, size).ok_or_else(|| invalid("failed to create a pixmap"))
    }

    /// Loads a PNG file into a `Pixmap`.
    ///
    /// Only 8-bit images are supported.
    /// Index PNGs are not supported.
    #[cfg(feature = "png-format")]
    pub fn load_png<P: AsRef<std::path::Path>>(path: P) -> Result<Self, png::DecodingError> {
        // `png::Decoder` is generic over input, which means that it will instance
        // two copies: one for `&[]` and one for `File`. Which will simply bloat the code.
        // Therefore we're using only one type for input.
        let data = std::fs::read(path)?;
        Self::decode_png(&data)
    }

    /// Encodes pixmap into a PNG data.
    ///
    /// The pixels are demultiplied on the way out, since PNG stores
    /// straight alpha.
    #[cfg(feature = "png-format")]
    pub fn encode_png(&self) -> Result<Vec<u8>, png::EncodingError> {
        let mut tmp_data = Vec::with_capacity(self.data.len());
        for pixel in self.pixels() {
            let c = pixel.demultiply();
            tmp_data.push(c.red());
            tmp_data.push(c.green());
            tmp_data.push(c.blue());
            tmp_data.push(c.alpha());
        }

        let mut data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut data, self.width(), self.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&tmp_data)?;
        }

        Ok(data)
    }

    /// Saves pixmap as a PNG file.
    #[cfg(feature = "png-format")]
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), png::EncodingError> {
        let data = self.encode_png()?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

impl std::fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pixmap")
            .field("data", &"...")
            .field("width", &self.size.width())
            .field("height", &self.size.height())
            .finish()
    }
}

/// A container that references premultiplied RGBA pixels.
///
/// Can be created from a `Pixmap`.
#[derive(Clone, Copy, PartialEq)]
pub struct PixmapRef<'a> {
    data: &'a [u8],
    size: IntSize,
}

impl<'a> PixmapRef<'a> {
    /// Returns pixmap's width.
    pub fn width(&self) -> u32 {
        self.size.width()
    }

    /// Returns pixmap's height.
    pub fn height(&self) -> u32 {
        self.size.height()
    }

    /// Returns the internal data.
    ///
    /// Bytes are ordered as RGBA.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns a slice of pixels.
    pub fn pixels(&self) -> &'a [PremultipliedColorU8] {
        bytemuck::cast_slice(self.data())
    }

    /// Returns a pixel color.
    ///
    /// Returns `None` when position is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremultipliedColorU8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }

        let idx = (self.width() * y + x) as usize;
        self.pixels().get(idx).cloned()
    }

    /// Creates a new `Pixmap` from the current data.
    ///
    /// Clones the underlying data.
    pub fn to_owned(&self) -> Pixmap {
        Pixmap {
            data: self.data.to_vec(),
            size: self.size,
        }
    }

    /// Returns a copy of the pixmap that intersects the `rect`.
    ///
    /// Returns `None` when `rect` doesn't overlap the pixmap.
    pub fn clone_rect(&self, rect: IntRect) -> Option<Pixmap> {
        let bounds = IntRect::from_xywh(0, 0, self.width(), self.height())?;
        let rect = bounds.intersect(&rect)?;
        let mut new = Pixmap::new(rect.width(), rect.height()).ok()?;

        let old_pixels = self.pixels();
        let new_pixels = new.pixels_mut();
        for y in 0..rect.height() {
            for x in 0..rect.width() {
                let old_idx = (y + rect.y() as u32) * self.width() + (x + rect.x() as u32);
                let new_idx = y * rect.width() + x;
                new_pixels[new_idx as usize] = old_pixels[old_idx as usize];
            }
        }

        Some(new)
    }
}

impl std::fmt::Debug for PixmapRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapRef")
            .field("data", &"...")
            .field("width", &self.size.width())
            .field("height", &self.size.height())
            .finish()
    }
}

/// Returns storage size required by pixel array.
fn data_len_for_size(size: IntSize) -> Option<usize> {
    let len = (size.width() as usize).checked_mul(size.height() as usize)?;
    len.checked_mul(BYTES_PER_PIXEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation() {
        assert_eq!(Pixmap::new(0, 1).unwrap_err(), CanvasError::InvalidDimensions);
        assert_eq!(Pixmap::new(1, 0).unwrap_err(), CanvasError::InvalidDimensions);
        assert_eq!(
            Pixmap::new(MAX_DIMENSION + 1, 1).unwrap_err(),
            CanvasError::SurfaceTooLarge
        );

        let pixmap = Pixmap::new(100, 50).unwrap();
        assert_eq!(pixmap.stride(), 400);
        assert_eq!(pixmap.pixel(0, 0), Some(PremultipliedColorU8::TRANSPARENT));
        assert_eq!(pixmap.pixel(100, 0), None);
    }

    #[test]
    fn fill_keeps_premultiplied_invariant() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        pixmap.fill(Color::from_rgba(1.0, 0.5, 0.0, 0.5).unwrap());
        for p in pixmap.pixels() {
            assert!(p.red() <= p.alpha());
            assert!(p.green() <= p.alpha());
            assert!(p.blue() <= p.alpha());
        }
    }
}
