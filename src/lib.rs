pub mod common;
pub mod error;
pub mod processing;
pub mod utils;

pub use error::{Result, StegoError};
pub use processing::{DecodePolicy, RgbBuffer, TextEncoding};
