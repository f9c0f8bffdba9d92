use core::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalendarError {
    /// A register byte contains a nibble greater than 9.
    InvalidBcd(u8),
    /// The fields do not form a date and time of day.
    InvalidDate,
    /// The year lies outside 2000..=2099.
    YearOutOfRange,
    /// A date/time stamp does not follow the `"Mmm dd yyyy"` / `"hh:mm:ss"` layout.
    MalformedStamp,
}

impl CalendarError {
    pub fn error_description(&self) -> &'static str {
        match self {
            CalendarError::InvalidBcd(_) => "Invalid BCD value",
            CalendarError::InvalidDate => "Invalid calendar date",
            CalendarError::YearOutOfRange => "Year out of range 2000-2099",
            CalendarError::MalformedStamp => "Malformed date/time stamp",
        }
    }
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarError::InvalidBcd(byte) => write!(f, "{}: {:#04x}", self.error_description(), byte),
            _ => f.write_str(self.error_description()),
        }
    }
}

impl core::error::Error for CalendarError {}
