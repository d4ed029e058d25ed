//! Error types shared by the codec and the image container layer.

use thiserror::Error;

use crate::processing::text::TextEncoding;

/// Errors that can occur while hiding or recovering a payload.
#[derive(Error, Debug)]
pub enum StegoError {
    /// The payload does not fit in the pixel buffer.
    #[error("Payload of {payload_len} bytes does not fit: image holds at most {max} bytes")]
    CapacityExceeded {
        /// Length of the rejected payload.
        payload_len: usize,
        /// Largest payload length the buffer accepts.
        max: usize,
    },

    /// There is no byte to attach a terminator to.
    #[error("Cannot encode an empty payload")]
    EmptyPayload,

    /// The buffer ran out before an end marker was seen.
    #[error("No end marker found after {recovered} bytes; image is not encoded or is corrupted")]
    UnterminatedPayload {
        /// Number of complete bytes read before the buffer ran out.
        recovered: usize,
    },

    /// Decoded bytes are not valid text in the requested encoding.
    #[error("Payload is not valid {encoding}: {reason}")]
    EncodingConversion {
        encoding: TextEncoding,
        reason: String,
    },

    /// Raw channel data does not match the declared dimensions.
    #[error("Invalid dimensions {width}x{height} for {len} channel bytes")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    /// Output format would not preserve the least significant bits.
    #[error("Unsupported container format: {0} (use png, bmp or tiff)")]
    UnsupportedContainer(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StegoError>;
