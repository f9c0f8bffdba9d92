use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::math::{self, SECONDS_FROM_1970_TO_2000};
use crate::{CalendarError, TimeSpan, parse};

/// A calendar point between 2000-01-01 00:00:00 and 2099-12-31 23:59:59.
///
/// Fields are stored as given; the unchecked constructors perform no
/// validation, so out-of-range values convert to meaningless instants.
/// The derived ordering is chronological for valid values.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateTime {
    year_offset: u8,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    /// Maps 0 = Sunday .. 6 = Saturday; larger values wrap modulo 7.
    pub const fn from_index(index: u8) -> Self {
        match index % 7 {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }
}

impl DateTime {
    /// Builds a value from a four-digit year without validation.
    pub const fn from_ymd_hms(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self::from_offset_ymd_hms(year.wrapping_sub(2000) as u8, month, day, hour, minute, second)
    }

    /// Builds a value from a two-digit year offset (`9` means 2009) without validation.
    pub const fn from_offset_ymd_hms(
        year_offset: u8,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Self {
        Self {
            year_offset,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Builds a value from a four-digit year, rejecting anything that is not a
    /// real instant between 2000 and 2099 (for example 2001-02-29).
    pub fn try_from_ymd_hms(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, CalendarError> {
        if !(2000..=2099).contains(&year) {
            return Err(CalendarError::YearOutOfRange);
        }
        let value = Self::from_ymd_hms(year, month, day, hour, minute, second);
        if !value.is_valid() {
            return Err(CalendarError::InvalidDate);
        }
        Ok(value)
    }

    /// Decomposes seconds since the Unix epoch. Instants before 2000 wrap.
    pub fn from_unixtime(seconds: u32) -> Self {
        Self::from_seconds_since_y2k(seconds.wrapping_sub(SECONDS_FROM_1970_TO_2000))
    }

    pub fn from_seconds_since_y2k(mut seconds: u32) -> Self {
        let second = (seconds % 60) as u8;
        seconds /= 60;
        let minute = (seconds % 60) as u8;
        seconds /= 60;
        let hour = (seconds % 24) as u8;
        let (year_offset, month, day) = math::days_to_date(seconds / 24);

        Self {
            year_offset,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Parses the compiler stamp pair, e.g. `("Dec 26 2009", "12:34:56")`.
    ///
    /// Fields are read by position. Only the two low digits of the year are used.
    pub fn from_compile_stamp(date: &str, time: &str) -> Result<Self, CalendarError> {
        parse::parse_compile_stamp(date, time)
    }

    pub fn is_valid(&self) -> bool {
        self.year_offset <= 99
            && self.day >= 1
            && self.day <= math::days_in_month(u16::from(self.year_offset), self.month)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }

    pub const fn year(&self) -> u16 {
        2000 + self.year_offset as u16
    }

    pub const fn year_offset(&self) -> u8 {
        self.year_offset
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    /// 0 = Sunday .. 6 = Saturday. 2000-01-01 was a Saturday.
    pub fn day_of_week(&self) -> u8 {
        let days = math::date_to_days(u16::from(self.year_offset), self.month, self.day);
        ((u32::from(days) + 6) % 7) as u8
    }

    pub fn weekday(&self) -> Weekday {
        Weekday::from_index(self.day_of_week())
    }

    pub fn seconds_since_y2k(&self) -> u32 {
        let days = math::date_to_days(u16::from(self.year_offset), self.month, self.day);
        math::time_to_seconds(days, self.hour, self.minute, self.second)
    }

    pub fn unixtime(&self) -> u32 {
        self.seconds_since_y2k().wrapping_add(SECONDS_FROM_1970_TO_2000)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year(),
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }
}

impl Add<TimeSpan> for DateTime {
    type Output = DateTime;

    fn add(self, span: TimeSpan) -> DateTime {
        DateTime::from_unixtime(self.unixtime().wrapping_add_signed(span.total_seconds()))
    }
}

impl Sub<TimeSpan> for DateTime {
    type Output = DateTime;

    fn sub(self, span: TimeSpan) -> DateTime {
        DateTime::from_unixtime(self.unixtime().wrapping_add_signed(span.total_seconds().wrapping_neg()))
    }
}

impl AddAssign<TimeSpan> for DateTime {
    fn add_assign(&mut self, span: TimeSpan) {
        *self = *self + span;
    }
}

impl SubAssign<TimeSpan> for DateTime {
    fn sub_assign(&mut self, span: TimeSpan) {
        *self = *self - span;
    }
}

/// The difference wraps into `TimeSpan`'s `i32` seconds, so spans longer
/// than about 68 years come out with the wrong sign.
impl Sub for DateTime {
    type Output = TimeSpan;

    fn sub(self, other: DateTime) -> TimeSpan {
        TimeSpan::from_seconds(self.unixtime().wrapping_sub(other.unixtime()) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Force std for tests even if building for embedded target
    extern crate std;
    use std::string::ToString;

    #[test]
    fn test_unixtime_round_trip_every_day() {
        let mut days_checked = 0;
        for year in 2000..=2099u16 {
            for month in 1..=12u8 {
                let last = math::days_in_month(year - 2000, month);
                for day in 1..=last {
                    let dt = DateTime::from_ymd_hms(year, month, day, 23, 59, 58);
                    assert_eq!(DateTime::from_unixtime(dt.unixtime()), dt);
                    days_checked += 1;
                }
            }
        }
        assert_eq!(days_checked, 36_525);
    }

    #[test]
    fn test_known_unixtime() {
        let dt = DateTime::from_ymd_hms(2000, 1, 1, 0, 0, 0);
        assert_eq!(dt.unixtime(), 946_684_800);
        assert_eq!(dt.seconds_since_y2k(), 0);

        let dt = DateTime::from_unixtime(1_700_000_000);
        assert_eq!(dt, DateTime::from_ymd_hms(2023, 11, 14, 22, 13, 20));
    }

    #[test]
    fn test_day_of_week() {
        assert_eq!(DateTime::from_ymd_hms(2000, 1, 1, 0, 0, 0).day_of_week(), 6);
        assert_eq!(DateTime::from_ymd_hms(2000, 1, 1, 0, 0, 0).weekday(), Weekday::Saturday);
        assert_eq!(DateTime::from_ymd_hms(2000, 1, 2, 0, 0, 0).weekday(), Weekday::Sunday);
        assert_eq!(DateTime::from_ymd_hms(2024, 2, 29, 12, 0, 0).weekday(), Weekday::Thursday);
        assert_eq!(DateTime::from_ymd_hms(2009, 12, 26, 0, 0, 0).weekday(), Weekday::Saturday);
    }

    #[test]
    fn test_leap_day_validation() {
        let leap = DateTime::try_from_ymd_hms(2000, 2, 29, 0, 0, 0).unwrap();
        assert_eq!(DateTime::from_unixtime(leap.unixtime()), leap);
        assert_eq!(
            DateTime::try_from_ymd_hms(2001, 2, 29, 0, 0, 0),
            Err(CalendarError::InvalidDate)
        );
        // The unchecked constructor keeps the fields; conversion rolls over to March 1st.
        let rolled = DateTime::from_unixtime(DateTime::from_ymd_hms(2001, 2, 29, 0, 0, 0).unixtime());
        assert_eq!(rolled, DateTime::from_ymd_hms(2001, 3, 1, 0, 0, 0));
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert_eq!(
            DateTime::try_from_ymd_hms(1999, 12, 31, 0, 0, 0),
            Err(CalendarError::YearOutOfRange)
        );
        assert_eq!(
            DateTime::try_from_ymd_hms(2100, 1, 1, 0, 0, 0),
            Err(CalendarError::YearOutOfRange)
        );
        assert_eq!(
            DateTime::try_from_ymd_hms(2020, 13, 1, 0, 0, 0),
            Err(CalendarError::InvalidDate)
        );
        assert_eq!(
            DateTime::try_from_ymd_hms(2020, 1, 1, 24, 0, 0),
            Err(CalendarError::InvalidDate)
        );
        assert_eq!(
            DateTime::try_from_ymd_hms(2020, 4, 31, 0, 0, 0),
            Err(CalendarError::InvalidDate)
        );
    }

    #[test]
    fn test_offset_and_full_year_constructors_agree() {
        assert_eq!(
            DateTime::from_offset_ymd_hms(9, 12, 26, 12, 34, 56),
            DateTime::from_ymd_hms(2009, 12, 26, 12, 34, 56)
        );
        assert_eq!(DateTime::from_offset_ymd_hms(9, 1, 1, 0, 0, 0).year(), 2009);
    }

    #[test]
    fn test_arithmetic_with_time_span() {
        let start = DateTime::from_ymd_hms(2000, 1, 1, 0, 0, 0);
        let next = DateTime::from_ymd_hms(2000, 1, 2, 0, 0, 0);
        assert_eq!(next - start, TimeSpan::from_seconds(86_400));
        assert_eq!(start - next, TimeSpan::from_seconds(-86_400));
        assert_eq!(start + TimeSpan::new(1, 0, 0, 0), next);
        assert_eq!(next - TimeSpan::new(1, 0, 0, 0), start);

        let mut dt = DateTime::from_ymd_hms(2023, 12, 31, 23, 59, 59);
        dt += TimeSpan::from_seconds(1);
        assert_eq!(dt, DateTime::from_ymd_hms(2024, 1, 1, 0, 0, 0));
        dt -= TimeSpan::new(0, 0, 0, 2);
        assert_eq!(dt, DateTime::from_ymd_hms(2023, 12, 31, 23, 59, 58));
    }

    #[test]
    fn test_difference_beyond_i32_wraps() {
        let first = DateTime::from_ymd_hms(2000, 1, 1, 0, 0, 0);
        let last = DateTime::from_ymd_hms(2099, 12, 31, 0, 0, 0);
        // 36524 days is 3_155_673_600 s, past i32::MAX
        assert_eq!((last - first).total_seconds(), -1_139_293_696);
        assert_eq!(first + (last - first), last);
    }

    #[test]
    fn test_ordering_is_chronological() {
        let earlier = DateTime::from_ymd_hms(2020, 12, 31, 23, 59, 59);
        let later = DateTime::from_ymd_hms(2021, 1, 1, 0, 0, 0);
        assert!(earlier < later);
    }

    #[test]
    fn test_display() {
        let dt = DateTime::from_ymd_hms(2009, 2, 6, 7, 8, 9);
        assert_eq!(dt.to_string(), "2009-02-06 07:08:09");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_encoding() {
        let dt = DateTime::from_ymd_hms(2024, 5, 1, 19, 59, 58);
        let mut buffer = [0u8; 16];
        let encoded = postcard::to_slice(&dt, &mut buffer).unwrap();
        assert_eq!(encoded, &[24, 5, 1, 19, 59, 58]);
        let decoded: DateTime = postcard::from_bytes(encoded).unwrap();
        assert_eq!(decoded, dt);
    }
}
