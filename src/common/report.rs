use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::processing::pixels::RgbBuffer;
use crate::processing::steganography::{
    bytes_left_for, data_store_size, max_payload_len, required_channels,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Encode,
    Decode,
}

/// Summary of a single encode or decode run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub operation: Operation,
    pub image: String,
    pub timestamp: String, // RFC 3339, local time
    pub width: u32,
    pub height: u32,
    pub data_store_size: usize,
    pub max_payload_len: usize,
    pub payload_len: usize,
    pub bytes_left: i64,
    pub channels_used: usize,
    pub duration_ms: u64,
}

impl RunReport {
    pub fn new(
        operation: Operation,
        image: &Path,
        buffer: &RgbBuffer,
        payload_len: usize,
        elapsed: Duration,
    ) -> Self {
        Self {
            operation,
            image: image.display().to_string(),
            timestamp: chrono::Local::now().to_rfc3339(),
            width: buffer.width(),
            height: buffer.height(),
            data_store_size: data_store_size(buffer),
            max_payload_len: max_payload_len(buffer),
            payload_len,
            bytes_left: bytes_left_for(buffer, payload_len),
            channels_used: required_channels(payload_len),
            duration_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn export_to_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json_string = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json_string.as_bytes())?;

        Ok(())
    }
}
