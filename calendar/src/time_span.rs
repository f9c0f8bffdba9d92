use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

const SECONDS_PER_MINUTE: i32 = 60;
const SECONDS_PER_HOUR: i32 = 3_600;
const SECONDS_PER_DAY: i32 = 86_400;

/// A signed duration in whole seconds.
///
/// Arithmetic wraps on `i32` overflow instead of panicking.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSpan {
    seconds: i32,
}

impl TimeSpan {
    pub const fn from_seconds(seconds: i32) -> Self {
        Self { seconds }
    }

    pub const fn new(days: i16, hours: i8, minutes: i8, seconds: i8) -> Self {
        Self {
            seconds: (days as i32)
                .wrapping_mul(SECONDS_PER_DAY)
                .wrapping_add((hours as i32) * SECONDS_PER_HOUR)
                .wrapping_add((minutes as i32) * SECONDS_PER_MINUTE)
                .wrapping_add(seconds as i32),
        }
    }

    /// Whole days, truncated toward zero.
    pub const fn days(&self) -> i16 {
        (self.seconds / SECONDS_PER_DAY) as i16
    }

    /// Hours within the current day.
    pub const fn hours(&self) -> i8 {
        (self.seconds / SECONDS_PER_HOUR % 24) as i8
    }

    pub const fn minutes(&self) -> i8 {
        (self.seconds / SECONDS_PER_MINUTE % 60) as i8
    }

    pub const fn seconds(&self) -> i8 {
        (self.seconds % 60) as i8
    }

    pub const fn total_seconds(&self) -> i32 {
        self.seconds
    }
}

impl Add for TimeSpan {
    type Output = TimeSpan;

    fn add(self, other: TimeSpan) -> TimeSpan {
        TimeSpan::from_seconds(self.seconds.wrapping_add(other.seconds))
    }
}

impl Sub for TimeSpan {
    type Output = TimeSpan;

    fn sub(self, other: TimeSpan) -> TimeSpan {
        TimeSpan::from_seconds(self.seconds.wrapping_sub(other.seconds))
    }
}

impl Neg for TimeSpan {
    type Output = TimeSpan;

    fn neg(self) -> TimeSpan {
        TimeSpan::from_seconds(self.seconds.wrapping_neg())
    }
}

impl AddAssign for TimeSpan {
    fn add_assign(&mut self, other: TimeSpan) {
        *self = *self + other;
    }
}

impl SubAssign for TimeSpan {
    fn sub_assign(&mut self, other: TimeSpan) {
        *self = *self - other;
    }
}
