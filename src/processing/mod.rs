//! # Payload Processing
//!
//! The pixel buffer, bit helpers and LSB codec used to hide a payload inside
//! an RGB image, plus text encodings for string payloads.
//!
//! ## Modules
//!
//! - [`bits`]: positional bit get/set helpers
//! - [`pixels`]: the [`RgbBuffer`](pixels::RgbBuffer) pixel store
//! - [`steganography`]: capacity queries, encode and decode
//! - [`text`]: character encodings for text payloads

pub mod bits;
pub mod pixels;
pub mod steganography;
pub mod text;

// Re-export main items for convenience
pub use pixels::RgbBuffer;
pub use steganography::{
    bytes_left, bytes_left_for, can_encode, data_store_size, decode, decode_text, encode, encode_text,
    max_payload_len, DecodePolicy,
};
pub use text::TextEncoding;
