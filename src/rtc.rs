use rtc_calendar::bcd::{try_bcd_to_bin, try_bin_to_bcd};
use rtc_calendar::{CalendarError, DateTime};

/// The operations every clock in this crate provides.
pub trait Rtc {
    type Error;

    /// Checks that the clock is reachable.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Reads the current date and time.
    fn now(&mut self) -> Result<DateTime, Self::Error>;

    /// Sets the current date and time.
    fn adjust(&mut self, datetime: &DateTime) -> Result<(), Self::Error>;
}

/// Number of registers in a seconds..years block.
pub(crate) const TIME_BLOCK_LEN: usize = 7;

/// Where the weekday register sits in the time block and how it counts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum TimeBlockLayout {
    /// seconds, minutes, hours, weekday (1..=7), date, month, year
    WeekdayBeforeDate,
    /// seconds, minutes, hours, date, weekday (0..=6), month, year
    WeekdayAfterDate,
}

impl TimeBlockLayout {
    const fn date_index(self) -> usize {
        match self {
            TimeBlockLayout::WeekdayBeforeDate => 4,
            TimeBlockLayout::WeekdayAfterDate => 3,
        }
    }

    const fn weekday_index(self) -> usize {
        match self {
            TimeBlockLayout::WeekdayBeforeDate => 3,
            TimeBlockLayout::WeekdayAfterDate => 4,
        }
    }

    const fn first_weekday(self) -> u8 {
        match self {
            TimeBlockLayout::WeekdayBeforeDate => 1,
            TimeBlockLayout::WeekdayAfterDate => 0,
        }
    }

    /// Decodes a raw time block. Control bits sharing the time registers
    /// (clock halt, oscillator stop, 12/24 hour, century) are masked off.
    pub(crate) fn decode(self, raw: &[u8; TIME_BLOCK_LEN]) -> Result<DateTime, CalendarError> {
        let second = try_bcd_to_bin(raw[0] & 0x7F)?;
        let minute = try_bcd_to_bin(raw[1] & 0x7F)?;
        let hour = try_bcd_to_bin(raw[2] & 0x3F)?;
        let day = try_bcd_to_bin(raw[self.date_index()] & 0x3F)?;
        let month = try_bcd_to_bin(raw[5] & 0x1F)?;
        let year_offset = try_bcd_to_bin(raw[6])?;

        let datetime = DateTime::from_offset_ymd_hms(year_offset, month, day, hour, minute, second);
        if !datetime.is_valid() {
            return Err(CalendarError::InvalidDate);
        }
        Ok(datetime)
    }

    /// Encodes a date and time; the seconds register is written with its
    /// control bit cleared.
    pub(crate) fn encode(self, datetime: &DateTime) -> Result<[u8; TIME_BLOCK_LEN], CalendarError> {
        if !datetime.is_valid() {
            return Err(CalendarError::InvalidDate);
        }
        let mut raw = [0u8; TIME_BLOCK_LEN];
        raw[0] = try_bin_to_bcd(datetime.second())?;
        raw[1] = try_bin_to_bcd(datetime.minute())?;
        raw[2] = try_bin_to_bcd(datetime.hour())?;
        raw[self.weekday_index()] = datetime.day_of_week() + self.first_weekday();
        raw[self.date_index()] = try_bin_to_bcd(datetime.day())?;
        raw[5] = try_bin_to_bcd(datetime.month())?;
        raw[6] = try_bin_to_bcd(datetime.year_offset())?;
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ds_layout() {
        // Saturday
        let dt = DateTime::from_ymd_hms(2009, 12, 26, 12, 34, 56);
        assert_eq!(
            TimeBlockLayout::WeekdayBeforeDate.encode(&dt),
            Ok([0x56, 0x34, 0x12, 0x07, 0x26, 0x12, 0x09])
        );
        assert_eq!(
            TimeBlockLayout::WeekdayAfterDate.encode(&dt),
            Ok([0x56, 0x34, 0x12, 0x26, 0x06, 0x12, 0x09])
        );
    }

    #[test]
    fn test_decode_masks_control_bits() {
        let raw = [0x80 | 0x45, 0x59, 0x23, 0x01, 0x31, 0x80 | 0x12, 0x99];
        assert_eq!(
            TimeBlockLayout::WeekdayBeforeDate.decode(&raw),
            Ok(DateTime::from_ymd_hms(2099, 12, 31, 23, 59, 45))
        );
    }

    #[test]
    fn test_decode_rejects_malformed_registers() {
        let raw = [0x5A, 0x00, 0x00, 0x01, 0x01, 0x01, 0x00];
        assert_eq!(
            TimeBlockLayout::WeekdayBeforeDate.decode(&raw),
            Err(CalendarError::InvalidBcd(0x5A))
        );

        let raw = [0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00];
        assert_eq!(
            TimeBlockLayout::WeekdayBeforeDate.decode(&raw),
            Err(CalendarError::InvalidDate)
        );
    }

    #[test]
    fn test_encode_rejects_invalid_date() {
        let dt = DateTime::from_ymd_hms(2001, 2, 29, 0, 0, 0);
        assert_eq!(
            TimeBlockLayout::WeekdayBeforeDate.encode(&dt),
            Err(CalendarError::InvalidDate)
        );
    }
}
