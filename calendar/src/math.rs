//! Day and second counting relative to 2000-01-01 00:00:00.

/// Seconds between the Unix epoch and 2000-01-01 00:00:00.
pub const SECONDS_FROM_1970_TO_2000: u32 = 946_684_800;

pub const SECONDS_PER_DAY: u32 = 86_400;

const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Leap test for a year offset from 2000. The four-year rule is exact for 2000..=2099.
pub const fn is_leap_year(year_offset: u16) -> bool {
    year_offset % 4 == 0
}

/// Length of `month` (1..=12) in the given year, or 0 for an invalid month.
pub fn days_in_month(year_offset: u16, month: u8) -> u8 {
    match DAYS_IN_MONTH.get(usize::from(month).wrapping_sub(1)) {
        Some(&length) if month == 2 && is_leap_year(year_offset) => length + 1,
        Some(&length) => length,
        None => 0,
    }
}

/// Number of days since 2000-01-01.
///
/// `year` may be either a four-digit year or an offset from 2000. Out-of-range
/// fields produce a meaningless count but never panic.
pub fn date_to_days(year: u16, month: u8, day: u8) -> u16 {
    let year = u32::from(if year >= 2000 { year - 2000 } else { year });
    let previous_months: u32 = DAYS_IN_MONTH
        .iter()
        .take(usize::from(month.saturating_sub(1)))
        .map(|&length| u32::from(length))
        .sum();

    let mut days = u32::from(day) + previous_months;
    if month > 2 && year % 4 == 0 {
        days += 1;
    }
    (days + 365 * year + (year + 3) / 4).wrapping_sub(1) as u16
}

/// Collapses a day count and time of day into seconds.
pub fn time_to_seconds(days: u16, hour: u8, minute: u8, second: u8) -> u32 {
    u32::from(days)
        .wrapping_mul(24)
        .wrapping_add(u32::from(hour))
        .wrapping_mul(60)
        .wrapping_add(u32::from(minute))
        .wrapping_mul(60)
        .wrapping_add(u32::from(second))
}

/// Splits a day count into a year offset, month and day of month.
pub(crate) fn days_to_date(mut days: u32) -> (u8, u8, u8) {
    let mut year_offset: u8 = 0;
    let mut leap;
    loop {
        leap = is_leap_year(u16::from(year_offset));
        let year_length = if leap { 366 } else { 365 };
        if days < year_length {
            break;
        }
        days -= year_length;
        year_offset = year_offset.wrapping_add(1);
    }

    let mut month: u8 = 1;
    for (index, &length) in DAYS_IN_MONTH.iter().enumerate() {
        let length = u32::from(length) + u32::from(leap && index == 1);
        if days < length {
            break;
        }
        days -= length;
        month += 1;
    }

    (year_offset, month, days as u8 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_to_days_anchor_points() {
        assert_eq!(date_to_days(2000, 1, 1), 0);
        assert_eq!(date_to_days(2000, 3, 1), 60);
        assert_eq!(date_to_days(2001, 1, 1), 366);
        assert_eq!(date_to_days(1, 1, 1), 366);
        assert_eq!(date_to_days(2099, 12, 31), 36_524);
    }

    #[test]
    fn test_days_to_date_inverts_date_to_days() {
        for days in 0..=36_524u32 {
            let (year_offset, month, day) = days_to_date(days);
            assert_eq!(u32::from(date_to_days(u16::from(year_offset), month, day)), days);
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(0, 2), 29);
        assert_eq!(days_in_month(1, 2), 28);
        assert_eq!(days_in_month(24, 2), 29);
        assert_eq!(days_in_month(1, 12), 31);
        assert_eq!(days_in_month(1, 0), 0);
        assert_eq!(days_in_month(1, 13), 0);
    }

    #[test]
    fn test_time_to_seconds() {
        assert_eq!(time_to_seconds(1, 0, 0, 0), SECONDS_PER_DAY);
        assert_eq!(time_to_seconds(0, 12, 34, 56), 45_296);
    }

    #[test]
    fn test_garbage_fields_do_not_panic() {
        let _ = date_to_days(2000, 0, 0);
        let _ = date_to_days(2000, 200, 255);
        let _ = time_to_seconds(u16::MAX, 255, 255, 255);
    }
}
