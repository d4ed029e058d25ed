//! Positional bit helpers shared by the encode and decode paths.
//!
//! Bit positions run from 0 (least significant) to 7 (most significant).

/// Returns whether bit `pos` of `byte` is set.
#[inline]
pub fn is_bit_set(byte: u8, pos: u8) -> bool {
    debug_assert!(pos < 8);
    (byte >> pos) & 1 == 1
}

/// Returns `byte` with bit `pos` forced to `value`.
#[inline]
pub fn set_bit(byte: u8, pos: u8, value: bool) -> u8 {
    debug_assert!(pos < 8);
    (byte & !(1 << pos)) | ((value as u8) << pos)
}

#[inline]
pub fn is_lsb_set(byte: u8) -> bool {
    is_bit_set(byte, 0)
}

#[inline]
pub fn set_lsb(byte: u8, value: bool) -> u8 {
    set_bit(byte, 0, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_bit_set_matches_shift() {
        for byte in 0..=255u8 {
            for pos in 0..8u8 {
                assert_eq!(is_bit_set(byte, pos), byte & (1 << pos) != 0);
            }
        }
    }

    #[test]
    fn test_set_bit_reconstructs_original() {
        for byte in 0..=255u8 {
            for pos in 0..8u8 {
                let cleared = byte & !(1 << pos);
                assert_eq!(set_bit(cleared, pos, is_bit_set(byte, pos)), byte);
            }
        }
    }

    #[test]
    fn test_set_bit_then_read() {
        for byte in 0..=255u8 {
            for pos in 0..8u8 {
                let on = set_bit(byte, pos, true);
                let off = set_bit(byte, pos, false);
                assert!(is_bit_set(on, pos));
                assert!(!is_bit_set(off, pos));

                // Other bits are untouched
                let mask = !(1u8 << pos);
                assert_eq!(on & mask, byte & mask);
                assert_eq!(off & mask, byte & mask);
            }
        }
    }

    #[test]
    fn test_lsb_shorthands() {
        assert_eq!(set_lsb(0xFE, true), 0xFF);
        assert_eq!(set_lsb(0xFF, false), 0xFE);
        assert!(is_lsb_set(0x01));
        assert!(!is_lsb_set(0x80));
    }
}
