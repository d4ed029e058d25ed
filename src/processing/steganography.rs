//! # LSB Steganography Codec
//!
//! Hides a byte payload in the least significant bits of an RGB pixel buffer
//! and recovers it again.
//!
//! ## Frame Format
//!
//! Channels are visited in pixel order (R, G, B of pixel 0, then pixel 1, ...).
//! Every payload byte occupies one frame of 9 consecutive channels:
//!
//! ```text
//! channel:  0    1    2    3    4    5    6    7    8
//! LSB:      b0   b1   b2   b3   b4   b5   b6   b7   marker
//! ```
//!
//! Data bits are written least significant first. The marker LSB is `0` when
//! another byte follows and `1` after the last byte. Nothing past the final
//! marker is touched.
//!
//! ### Encoding Process
//! 1. Reject empty payloads and payloads that do not fit
//! 2. Walk the channels, replacing each LSB with the next data bit
//! 3. After 8 data bits, write the marker and move to the next byte
//! 4. Stop right after the end marker
//!
//! ### Decoding Process
//! 1. Walk the channels, collecting LSBs into the current byte
//! 2. On each marker, emit the byte and stop if the marker is `1`
//! 3. If the buffer runs out first, apply the [`DecodePolicy`]
//!
//! ### Capacity
//! [`data_store_size`] reports one byte per pixel and [`can_encode`] requires
//! it to exceed the payload length. Since a frame spans 9 channels, a buffer
//! physically holds `channel_count / 9` bytes; [`encode`] enforces both limits
//! and [`max_payload_len`] reports the combined bound.
//!
//! Example: a 3x3 image has a store size of 9 but fits at most 3 bytes.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StegoError};
use crate::processing::bits::{is_bit_set, is_lsb_set, set_bit, set_lsb};
use crate::processing::pixels::{RgbBuffer, CHANNELS_PER_PIXEL};
use crate::processing::text::TextEncoding;

/// Channels consumed per payload byte: 8 data bits plus one marker.
pub const CHANNELS_PER_FRAME: usize = 9;

const DATA_BITS_PER_FRAME: u8 = 8;

/// What [`decode`] does when the buffer ends without an end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Fail with [`StegoError::UnterminatedPayload`].
    #[default]
    Strict,
    /// Return every complete byte read so far.
    Lenient,
}

/// Position within the current 9-channel frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    /// The next channel carries data bit `n` of the current byte.
    ReadingBits(u8),
    /// The next channel is the continue/end marker.
    AwaitingTerminator,
}

impl FrameState {
    const START: FrameState = FrameState::ReadingBits(0);

    fn next(self) -> Self {
        match self {
            FrameState::ReadingBits(bit) if bit + 1 == DATA_BITS_PER_FRAME => {
                FrameState::AwaitingTerminator
            }
            FrameState::ReadingBits(bit) => FrameState::ReadingBits(bit + 1),
            FrameState::AwaitingTerminator => FrameState::START,
        }
    }
}

/// Number of payload bytes the buffer nominally stores: `channel_count / 3`.
pub fn data_store_size(buffer: &RgbBuffer) -> usize {
    buffer.channel_count() / CHANNELS_PER_PIXEL
}

/// Whether the store size strictly exceeds the payload length.
pub fn can_encode(buffer: &RgbBuffer, payload: &[u8]) -> bool {
    data_store_size(buffer) > payload.len()
}

/// Store size minus payload length. Negative means the payload does not fit.
pub fn bytes_left(buffer: &RgbBuffer, payload: &[u8]) -> i64 {
    bytes_left_for(buffer, payload.len())
}

/// [`bytes_left`] for a payload known only by its length.
pub fn bytes_left_for(buffer: &RgbBuffer, payload_len: usize) -> i64 {
    data_store_size(buffer) as i64 - payload_len as i64
}

/// Channels a payload of `payload_len` bytes occupies.
pub fn required_channels(payload_len: usize) -> usize {
    payload_len.saturating_mul(CHANNELS_PER_FRAME)
}

/// Largest payload length [`encode`] accepts for this buffer.
pub fn max_payload_len(buffer: &RgbBuffer) -> usize {
    data_store_size(buffer)
        .saturating_sub(1)
        .min(buffer.channel_count() / CHANNELS_PER_FRAME)
}

/// Checks every precondition of [`encode`] without touching the buffer.
pub fn check_fits(buffer: &RgbBuffer, payload: &[u8]) -> Result<()> {
    if payload.is_empty() {
        return Err(StegoError::EmptyPayload);
    }

    if !can_encode(buffer, payload) || required_channels(payload.len()) > buffer.channel_count() {
        return Err(StegoError::CapacityExceeded {
            payload_len: payload.len(),
            max: max_payload_len(buffer),
        });
    }

    Ok(())
}

/// Writes `payload` into the channel LSBs of `buffer`.
///
/// Only the least significant bit of the first `payload.len() * 9` channels
/// changes. On error the buffer is left untouched.
///
/// # Errors
/// - [`StegoError::EmptyPayload`] if `payload` is empty
/// - [`StegoError::CapacityExceeded`] if `payload` is longer than [`max_payload_len`]
pub fn encode(buffer: &mut RgbBuffer, payload: &[u8]) -> Result<()> {
    check_fits(buffer, payload)?;

    let mut remaining = payload.iter().copied();
    let mut current = remaining.next().ok_or(StegoError::EmptyPayload)?;
    let mut state = FrameState::START;

    for channel in buffer.channels_mut().iter_mut() {
        match state {
            FrameState::ReadingBits(bit) => {
                *channel = set_lsb(*channel, is_bit_set(current, bit));
            }
            FrameState::AwaitingTerminator => match remaining.next() {
                Some(next) => {
                    *channel = set_lsb(*channel, false);
                    current = next;
                }
                None => {
                    *channel = set_lsb(*channel, true);
                    debug!(
                        "Encoded {} bytes into {} channels",
                        payload.len(),
                        required_channels(payload.len())
                    );
                    return Ok(());
                }
            },
        }
        state = state.next();
    }

    // Unreachable after check_fits: the end marker always lands in bounds
    Err(StegoError::CapacityExceeded {
        payload_len: payload.len(),
        max: max_payload_len(buffer),
    })
}

/// Reads a payload back out of the channel LSBs of `buffer`.
///
/// # Errors
/// - [`StegoError::UnterminatedPayload`] if no end marker is found and
///   `policy` is [`DecodePolicy::Strict`]
pub fn decode(buffer: &RgbBuffer, policy: DecodePolicy) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(buffer.channel_count() / CHANNELS_PER_FRAME);
    let mut current = 0u8;
    let mut state = FrameState::START;

    for &channel in buffer.channels() {
        match state {
            FrameState::ReadingBits(bit) => {
                current = set_bit(current, bit, is_lsb_set(channel));
            }
            FrameState::AwaitingTerminator => {
                bytes.push(current);
                current = 0;
                if is_lsb_set(channel) {
                    debug!("Decoded {} bytes", bytes.len());
                    return Ok(bytes);
                }
            }
        }
        state = state.next();
    }

    match policy {
        DecodePolicy::Strict => Err(StegoError::UnterminatedPayload {
            recovered: bytes.len(),
        }),
        DecodePolicy::Lenient => {
            warn!(
                "No end marker found; returning {} unterminated bytes",
                bytes.len()
            );
            Ok(bytes)
        }
    }
}

/// Encodes `text` with `encoding` and hides it in `buffer`.
pub fn encode_text(buffer: &mut RgbBuffer, text: &str, encoding: TextEncoding) -> Result<()> {
    let payload = encoding.encode(text)?;
    encode(buffer, &payload)
}

/// Decodes the hidden payload and interprets it as `encoding` text.
pub fn decode_text(
    buffer: &RgbBuffer,
    encoding: TextEncoding,
    policy: DecodePolicy,
) -> Result<String> {
    let payload = decode(buffer, policy)?;
    encoding.decode(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lsbs(buffer: &RgbBuffer) -> Vec<u8> {
        buffer.channels().iter().map(|c| c & 1).collect()
    }

    /// Buffer whose channels hold a varied, non-trivial pattern.
    fn patterned(width: u32, height: u32) -> RgbBuffer {
        let len = width as usize * height as usize * 3;
        let channels = (0..len).map(|i| ((i * 37 + 11) % 256) as u8).collect();
        RgbBuffer::from_raw(width, height, channels).unwrap()
    }

    #[test]
    fn test_frame_state_cycle() {
        let mut state = FrameState::START;
        for bit in 0..8 {
            assert_eq!(state, FrameState::ReadingBits(bit));
            state = state.next();
        }
        assert_eq!(state, FrameState::AwaitingTerminator);
        assert_eq!(state.next(), FrameState::START);
    }

    #[test]
    fn test_capacity_is_pixel_count() {
        for (w, h) in [(1, 1), (3, 3), (10, 7), (64, 64)] {
            let buffer = RgbBuffer::filled(w, h, 0);
            assert_eq!(data_store_size(&buffer), (w * h) as usize);
        }
    }

    #[test]
    fn test_can_encode_boundary() {
        let buffer = RgbBuffer::filled(2, 2, 0);

        assert!(can_encode(&buffer, &[0; 3]));
        assert!(!can_encode(&buffer, &[0; 4]));
        assert!(!can_encode(&buffer, &[0; 5]));

        assert_eq!(bytes_left(&buffer, &[0; 3]), 1);
        assert_eq!(bytes_left(&buffer, &[0; 4]), 0);
        assert_eq!(bytes_left(&buffer, &[0; 6]), -2);
        assert_eq!(bytes_left_for(&buffer, 6), bytes_left(&buffer, &[0; 6]));
    }

    #[test]
    fn test_max_payload_len() {
        assert_eq!(max_payload_len(&RgbBuffer::filled(3, 3, 0)), 3);
        assert_eq!(max_payload_len(&RgbBuffer::filled(2, 2, 0)), 1);
        assert_eq!(max_payload_len(&RgbBuffer::filled(1, 1, 0)), 0);
        assert_eq!(max_payload_len(&RgbBuffer::filled(0, 0, 0)), 0);
    }

    #[test]
    fn test_three_by_three_scenario() {
        let mut buffer = RgbBuffer::filled(3, 3, 0);
        assert_eq!(data_store_size(&buffer), 9);

        encode(&mut buffer, &[0x41]).unwrap();

        assert_eq!(&lsbs(&buffer)[..9], &[1, 0, 0, 0, 0, 0, 1, 0, 1]);
        assert!(buffer.channels()[9..].iter().all(|&c| c == 0));
        assert_eq!(decode(&buffer, DecodePolicy::Strict).unwrap(), vec![0x41]);
    }

    #[test]
    fn test_single_byte_terminator_placement() {
        let original = patterned(4, 4);
        let mut buffer = original.clone();

        encode(&mut buffer, &[0xFF]).unwrap();

        assert_eq!(buffer.channels()[8] & 1, 1);
        assert_eq!(&buffer.channels()[9..], &original.channels()[9..]);
    }

    #[test]
    fn test_two_byte_continuation_marker() {
        let mut buffer = RgbBuffer::filled(3, 3, 0xFF);

        encode(&mut buffer, &[0x00, 0x00]).unwrap();

        let bits = lsbs(&buffer);
        assert_eq!(bits[8], 0);
        assert_eq!(bits[17], 1);
        assert!(bits[..8].iter().all(|&b| b == 0));
        assert!(bits[9..17].iter().all(|&b| b == 0));
        // Untouched tail keeps its original value
        assert!(buffer.channels()[18..].iter().all(|&c| c == 0xFF));
    }

    #[test]
    fn test_only_lsb_changes() {
        let original = patterned(8, 8);
        let mut buffer = original.clone();

        encode(&mut buffer, b"upper bits stay").unwrap();

        for (before, after) in original.channels().iter().zip(buffer.channels()) {
            assert_eq!(before & 0xFE, after & 0xFE);
        }
    }

    #[test]
    fn test_roundtrip_all_byte_values() {
        let payload: Vec<u8> = (0..=255).collect();
        let mut buffer = patterned(40, 20);

        encode(&mut buffer, &payload).unwrap();

        assert_eq!(decode(&buffer, DecodePolicy::Strict).unwrap(), payload);
    }

    #[test]
    fn test_roundtrip_at_max_length() {
        let mut buffer = patterned(5, 6);
        let max = max_payload_len(&buffer);
        assert_eq!(max, 10);

        let payload: Vec<u8> = (0..max as u8).map(|i| i.wrapping_mul(29)).collect();
        encode(&mut buffer, &payload).unwrap();

        assert_eq!(decode(&buffer, DecodePolicy::Strict).unwrap(), payload);
    }

    #[test]
    fn test_empty_payload_rejected() {
        let mut buffer = RgbBuffer::filled(3, 3, 0);
        assert!(matches!(encode(&mut buffer, &[]), Err(StegoError::EmptyPayload)));
    }

    #[test]
    fn test_capacity_exceeded_leaves_buffer_untouched() {
        let original = patterned(2, 2);
        let mut buffer = original.clone();

        // Passes can_encode but needs 27 channels out of 12
        assert!(can_encode(&buffer, &[1, 2, 3]));
        let result = encode(&mut buffer, &[1, 2, 3]);

        assert!(matches!(
            result,
            Err(StegoError::CapacityExceeded { payload_len: 3, max: 1 })
        ));
        assert_eq!(buffer, original);

        // Fails can_encode outright
        let result = encode(&mut buffer, &[0; 4]);
        assert!(matches!(result, Err(StegoError::CapacityExceeded { .. })));
        assert_eq!(buffer, original);
    }

    #[test]
    fn test_unterminated_strict() {
        let buffer = RgbBuffer::filled(4, 3, 0);
        let result = decode(&buffer, DecodePolicy::Strict);

        // 36 channels = 4 complete frames
        assert!(matches!(
            result,
            Err(StegoError::UnterminatedPayload { recovered: 4 })
        ));
    }

    #[test]
    fn test_unterminated_partial() {
        for (w, h) in [(3, 3), (4, 3), (5, 5)] {
            let buffer = RgbBuffer::filled(w, h, 0);
            let bytes = decode(&buffer, DecodePolicy::Lenient).unwrap();
            assert_eq!(bytes.len(), buffer.channel_count() / CHANNELS_PER_FRAME);
            assert!(bytes.iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_decode_empty_buffer() {
        let buffer = RgbBuffer::filled(0, 0, 0);
        assert!(decode(&buffer, DecodePolicy::Lenient).unwrap().is_empty());
        assert!(decode(&buffer, DecodePolicy::Strict).is_err());
    }

    #[test]
    fn test_text_helpers() {
        let mut buffer = patterned(30, 30);

        encode_text(&mut buffer, "Example test message", TextEncoding::Utf16Be).unwrap();
        let text = decode_text(&buffer, TextEncoding::Utf16Be, DecodePolicy::Strict).unwrap();

        assert_eq!(text, "Example test message");
    }

    #[test]
    fn test_decode_text_invalid_utf8() {
        let mut buffer = RgbBuffer::filled(3, 3, 0);
        encode(&mut buffer, &[0xFF]).unwrap();

        let result = decode_text(&buffer, TextEncoding::Utf8, DecodePolicy::Strict);
        assert!(matches!(result, Err(StegoError::EncodingConversion { .. })));
    }

    #[test]
    fn test_policy_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: DecodePolicy,
        }

        let parsed: Wrapper = toml::from_str("policy = \"lenient\"").unwrap();
        assert_eq!(parsed.policy, DecodePolicy::Lenient);
        let parsed: Wrapper = toml::from_str("policy = \"strict\"").unwrap();
        assert_eq!(parsed.policy, DecodePolicy::Strict);
        assert!(toml::from_str::<Wrapper>("policy = \"partial\"").is_err());
    }
}
