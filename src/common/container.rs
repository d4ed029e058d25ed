//! # Image Container Layer
//!
//! Moves [`RgbBuffer`]s in and out of image files. Reading accepts anything
//! the `image` crate decodes; alpha is dropped. Writing is limited to lossless
//! formats, since any lossy recompression destroys the hidden LSBs.

use image::{ColorType, GenericImageView, ImageFormat};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::error::{Result, StegoError};
use crate::processing::pixels::RgbBuffer;

/// Lossless formats an encoded image may be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    #[default]
    Png,
    Bmp,
    Tiff,
}

impl ContainerFormat {
    /// Maps a file extension to a lossless format.
    ///
    /// # Errors
    /// [`StegoError::UnsupportedContainer`] for lossy or unknown extensions.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(ContainerFormat::Png),
            "bmp" => Ok(ContainerFormat::Bmp),
            "tif" | "tiff" => Ok(ContainerFormat::Tiff),
            _ => Err(StegoError::UnsupportedContainer(ext.to_string())),
        }
    }

    /// Picks the format for `path` from its extension, or `fallback` if it has none.
    pub fn for_path(path: &Path, fallback: ContainerFormat) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => Self::from_extension(ext),
            None => Ok(fallback),
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ContainerFormat::Png => ImageFormat::Png,
            ContainerFormat::Bmp => ImageFormat::Bmp,
            ContainerFormat::Tiff => ImageFormat::Tiff,
        }
    }
}

/// Decodes image bytes (any supported format) into an RGB buffer.
pub fn load_from_bytes(bytes: &[u8]) -> Result<RgbBuffer> {
    let image = image::load_from_memory(bytes)?;
    let (width, height) = image.dimensions();
    debug!("Loaded {}x{} image ({:?})", width, height, image.color());
    Ok(RgbBuffer::from(image.to_rgb8()))
}

/// Reads and decodes an image file. The format is guessed from its content.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<RgbBuffer> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let buffer = load_from_bytes(&bytes)?;
    info!(
        "📂 Loaded {} ({}x{}, {} bytes)",
        path.display(),
        buffer.width(),
        buffer.height(),
        bytes.len()
    );
    Ok(buffer)
}

/// Serializes the buffer in the given lossless format.
pub fn to_bytes(buffer: &RgbBuffer, format: ContainerFormat) -> Result<Vec<u8>> {
    let mut output_bytes = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut output_bytes),
        buffer.channels(),
        buffer.width(),
        buffer.height(),
        ColorType::Rgb8,
        format.image_format(),
    )?;
    Ok(output_bytes)
}

/// Writes the buffer to `path`, choosing the format from the extension.
///
/// Paths without an extension use `fallback`. Returns the format written.
pub fn save_to_path<P: AsRef<Path>>(
    buffer: &RgbBuffer,
    path: P,
    fallback: ContainerFormat,
) -> Result<ContainerFormat> {
    let path = path.as_ref();
    let format = ContainerFormat::for_path(path, fallback)?;
    let bytes = to_bytes(buffer, format)?;
    fs::write(path, &bytes)?;
    info!(
        "💾 Saved {} as {:?} ({} bytes)",
        path.display(),
        format,
        bytes.len()
    );
    Ok(format)
}
