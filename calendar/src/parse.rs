use crate::{CalendarError, DateTime};

const MONTH_ABBREVIATIONS: [&[u8; 3]; 12] = [
    b"Jan", b"Feb", b"Mar", b"Apr", b"May", b"Jun", b"Jul", b"Aug", b"Sep", b"Oct", b"Nov", b"Dec",
];

// "Dec 26 2009"
const DATE_LEN: usize = 11;
// "12:34:56"
const TIME_LEN: usize = 8;

/// A non-digit tens position reads as zero so that `" 6"` parses as 6.
fn two_digits(field: &[u8]) -> Result<u8, CalendarError> {
    let &[tens, ones] = field else {
        return Err(CalendarError::MalformedStamp);
    };
    if !ones.is_ascii_digit() {
        return Err(CalendarError::MalformedStamp);
    }
    let tens = if tens.is_ascii_digit() { tens - b'0' } else { 0 };
    Ok(10 * tens + (ones - b'0'))
}

fn month_number(abbreviation: &[u8]) -> Result<u8, CalendarError> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|month| month.as_slice() == abbreviation)
        .map(|index| index as u8 + 1)
        .ok_or(CalendarError::MalformedStamp)
}

pub(crate) fn parse_compile_stamp(date: &str, time: &str) -> Result<DateTime, CalendarError> {
    let date = date.as_bytes();
    let time = time.as_bytes();
    if date.len() < DATE_LEN || time.len() < TIME_LEN {
        return Err(CalendarError::MalformedStamp);
    }

    let month = month_number(&date[0..3])?;
    let day = two_digits(&date[4..6])?;
    let year_offset = two_digits(&date[9..11])?;
    let hour = two_digits(&time[0..2])?;
    let minute = two_digits(&time[3..5])?;
    let second = two_digits(&time[6..8])?;

    Ok(DateTime::from_offset_ymd_hms(year_offset, month, day, hour, minute, second))
}
