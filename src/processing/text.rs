//! Character encodings for text payloads.
//!
//! The codec itself only moves bytes; these helpers turn a message into
//! bytes before encoding and back into a `String` after decoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StegoError};

/// Supported text encodings for payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    Ascii,
}

impl TextEncoding {
    /// Canonical lowercase name, as accepted in config files and on the CLI.
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16Le => "utf-16le",
            TextEncoding::Utf16Be => "utf-16be",
            TextEncoding::Ascii => "ascii",
        }
    }

    /// Converts `text` into payload bytes.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            TextEncoding::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            TextEncoding::Ascii => match text.chars().find(|c| !c.is_ascii()) {
                Some(c) => Err(self.conversion_error(format!(
                    "character {:?} (U+{:04X}) is outside ASCII",
                    c, c as u32
                ))),
                None => Ok(text.as_bytes().to_vec()),
            },
        }
    }

    /// Interprets decoded payload bytes as text.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|e| self.conversion_error(e.to_string())),
            TextEncoding::Utf16Le => self.decode_utf16(bytes, u16::from_le_bytes),
            TextEncoding::Utf16Be => self.decode_utf16(bytes, u16::from_be_bytes),
            TextEncoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(index) => Err(self.conversion_error(format!(
                    "byte 0x{:02X} at offset {} is outside ASCII",
                    bytes[index], index
                ))),
                // ASCII is a subset of UTF-8
                None => Ok(bytes.iter().map(|&b| b as char).collect()),
            },
        }
    }

    fn decode_utf16(self, bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
        if bytes.len() % 2 != 0 {
            return Err(self.conversion_error(format!(
                "odd byte count {} for 16-bit code units",
                bytes.len()
            )));
        }

        let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
        char::decode_utf16(units)
            .collect::<std::result::Result<String, _>>()
            .map_err(|e| self.conversion_error(e.to_string()))
    }

    fn conversion_error(self, reason: String) -> StegoError {
        StegoError::EncodingConversion {
            encoding: self,
            reason,
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "utf-16le" | "utf16le" => Ok(TextEncoding::Utf16Le),
            "utf-16be" | "utf16be" => Ok(TextEncoding::Utf16Be),
            "ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
            other => Err(format!(
                "unknown text encoding '{}' (expected utf-8, utf-16le, utf-16be or ascii)",
                other
            )),
        }
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TextEncoding> for String {
    fn from(encoding: TextEncoding) -> Self {
        encoding.name().to_string()
    }
}
