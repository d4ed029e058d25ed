//! # RGB Pixel Buffer
//!
//! Engine-independent pixel storage consumed by the codec: a flat, row-major
//! run of 8-bit channels, three per pixel, with a stride of `width * 3`.

use image::RgbImage;

use crate::error::{Result, StegoError};

/// Number of color channels per pixel (R, G, B).
pub const CHANNELS_PER_PIXEL: usize = 3;

/// An owned RGB8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    width: u32,
    height: u32,
    channels: Vec<u8>,
}

impl RgbBuffer {
    /// Wraps raw channel bytes, checking they match `width * height * 3`.
    pub fn from_raw(width: u32, height: u32, channels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS_PER_PIXEL;
        if channels.len() != expected {
            return Err(StegoError::InvalidDimensions {
                width,
                height,
                len: channels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
        })
    }

    /// Creates a buffer where every channel holds `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        let len = width as usize * height as usize * CHANNELS_PER_PIXEL;
        Self {
            width,
            height,
            channels: vec![value; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes between the starts of two consecutive rows.
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS_PER_PIXEL
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Channels in pixel order: R, G, B of pixel 0, then pixel 1, ...
    pub fn channels(&self) -> &[u8] {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut [u8] {
        &mut self.channels
    }

    /// Returns the `[r, g, b]` triplet at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y as usize * self.stride() + x as usize * CHANNELS_PER_PIXEL;
        let px = &self.channels[start..start + CHANNELS_PER_PIXEL];
        Some([px[0], px[1], px[2]])
    }
}

impl From<RgbImage> for RgbBuffer {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            channels: image.into_raw(),
        }
    }
}
