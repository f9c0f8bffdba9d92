//! Calendar arithmetic for real-time clocks that store a two-digit year.
//!
//! All values are anchored at 2000-01-01 00:00:00 and are meaningful for the
//! years 2000 through 2099. Time zones, daylight saving and leap seconds are
//! ignored.
#![no_std]

pub mod bcd;
mod date_time;
mod error;
pub mod math;
mod parse;
mod time_span;

pub use date_time::{DateTime, Weekday};
pub use error::CalendarError;
pub use time_span::TimeSpan;
