//! A clock without hardware: wall time derived from a monotonic millisecond counter.
//!
//! The offset lives in the [`MillisClock`] value, so every clock is owned by
//! its caller. Wrap it in a [`SharedRtc`](crate::SharedRtc) to share it.
//! Nothing survives a restart and accuracy follows the counter's crystal.

use core::convert::Infallible;

use defmt_or_log as log;
use rtc_calendar::DateTime;

use crate::Rtc;

/// Monotonic milliseconds since an arbitrary start, usually boot.
pub trait MillisSource {
    fn millis(&self) -> u64;
}

impl<F: Fn() -> u64> MillisSource for F {
    fn millis(&self) -> u64 {
        self()
    }
}

/// Reads the embassy time driver.
#[cfg(feature = "embassy-time")]
#[derive(Debug, Copy, Clone, Default)]
pub struct EmbassyMillis;

#[cfg(feature = "embassy-time")]
impl MillisSource for EmbassyMillis {
    fn millis(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}

pub struct MillisClock<S> {
    source: S,
    offset: i64,
}

impl<S: MillisSource> MillisClock<S> {
    /// A clock reading 1970-01-01 plus uptime until it is adjusted.
    pub const fn new(source: S) -> Self {
        Self { source, offset: 0 }
    }

    /// Unix seconds at the source's zero.
    pub const fn offset(&self) -> i64 {
        self.offset
    }

    fn elapsed_seconds(&self) -> i64 {
        (self.source.millis() / 1000) as i64
    }

    pub fn adjust(&mut self, datetime: &DateTime) {
        self.offset = i64::from(datetime.unixtime()) - self.elapsed_seconds();
        log::debug!("Millis clock: offset set to {}", self.offset);
    }

    pub fn now(&self) -> DateTime {
        DateTime::from_unixtime((self.offset + self.elapsed_seconds()) as u32)
    }
}

impl<S: MillisSource> Rtc for MillisClock<S> {
    type Error = Infallible;

    fn begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn now(&mut self) -> Result<DateTime, Self::Error> {
        Ok(MillisClock::now(self))
    }

    fn adjust(&mut self, datetime: &DateTime) -> Result<(), Self::Error> {
        MillisClock::adjust(self, datetime);
        Ok(())
    }
}
