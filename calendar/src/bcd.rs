//! Two-digit binary-coded decimal conversion.

use crate::CalendarError;

/// Decodes a packed BCD byte without checking the nibbles.
pub const fn bcd_to_bin(value: u8) -> u8 {
    value - 6 * (value >> 4)
}

/// Encodes a value in `0..=99` as packed BCD without range checking.
pub const fn bin_to_bcd(value: u8) -> u8 {
    value.wrapping_add(6 * (value / 10))
}

/// Decodes a packed BCD byte, rejecting nibbles above 9.
pub fn try_bcd_to_bin(value: u8) -> Result<u8, CalendarError> {
    if value >> 4 > 9 || value & 0x0F > 9 {
        return Err(CalendarError::InvalidBcd(value));
    }
    Ok(bcd_to_bin(value))
}

/// Encodes a value as packed BCD, rejecting values that need three digits.
pub fn try_bin_to_bcd(value: u8) -> Result<u8, CalendarError> {
    if value > 99 {
        return Err(CalendarError::InvalidDate);
    }
    Ok(bin_to_bcd(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_two_digit_values() {
        for value in 0..=99u8 {
            assert_eq!(bcd_to_bin(bin_to_bcd(value)), value);
            assert_eq!(try_bcd_to_bin(bin_to_bcd(value)), Ok(value));
        }
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(bin_to_bcd(59), 0x59);
        assert_eq!(bcd_to_bin(0x26), 26);
        assert_eq!(try_bin_to_bcd(7), Ok(0x07));
    }

    #[test]
    fn test_rejects_invalid_nibbles() {
        assert_eq!(try_bcd_to_bin(0x1A), Err(CalendarError::InvalidBcd(0x1A)));
        assert_eq!(try_bcd_to_bin(0xA1), Err(CalendarError::InvalidBcd(0xA1)));
        assert_eq!(try_bin_to_bcd(100), Err(CalendarError::InvalidDate));
    }
}
