//! Drivers for the DS1307, PCF8523 and DS3231 real-time clocks, a clock
//! backed by a millisecond counter, and the calendar types they share.
//!
//! Every driver talks to its chip through [`embedded_hal::i2c::I2c`] and
//! implements [`Rtc`]:
//!
//! ```ignore
//! use rtc_extended::{DateTime, Rtc, ds3231::Ds3231};
//!
//! let mut rtc = Ds3231::new(i2c);
//! rtc.begin()?;
//! if rtc.lost_power()? {
//!     rtc.adjust(&DateTime::from_compile_stamp("Dec 26 2009", "12:34:56")?)?;
//! }
//! let now = rtc.now()?;
//! ```
//!
//! Logging goes through `defmt-or-log`; enable exactly one of the `log`
//! (default) or `defmt` features.
#![no_std]

mod bus;
mod config;
pub mod ds1307;
pub mod ds3231;
mod error;
pub mod millis;
pub mod pcf8523;
mod rtc;
mod shared;
#[cfg(test)]
mod testing;

pub use config::{DEFAULT_ADDRESS, DEFAULT_CONVERSION_POLL_LIMIT, RtcConfig};
pub use error::Error;
pub use rtc::Rtc;
pub use rtc_calendar::{CalendarError, DateTime, TimeSpan, Weekday, bcd, math};
pub use shared::SharedRtc;
