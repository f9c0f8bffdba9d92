use core::fmt;

use rtc_calendar::CalendarError;

/// Failure of a driver operation. `E` is the error type of the I2C bus.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus transaction failed (no device present, NACK, arbitration loss).
    I2c(E),
    /// The chip returned bytes that do not decode to a valid date or time,
    /// or the caller passed one that cannot be encoded.
    Calendar(CalendarError),
    /// A register or memory address lies outside what the chip supports.
    OutOfRange,
    /// The chip did not clear a busy flag within the configured number of polls.
    Timeout,
}

impl<E> Error<E> {
    pub fn error_description(&self) -> &'static str {
        match self {
            Error::I2c(_) => "I2C bus error",
            Error::Calendar(e) => e.error_description(),
            Error::OutOfRange => "Value out of range",
            Error::Timeout => "Timeout waiting for device",
        }
    }
}

impl<E> From<CalendarError> for Error<E> {
    fn from(e: CalendarError) -> Self {
        Error::Calendar(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "{}: {:?}", self.error_description(), e),
            Error::Calendar(e) => fmt::Display::fmt(e, f),
            _ => f.write_str(self.error_description()),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}
