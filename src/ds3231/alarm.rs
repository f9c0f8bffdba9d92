//! The two DS3231 alarms. All state lives in the chip; nothing is cached.

use defmt_or_log as log;
use embedded_hal::i2c::I2c;
use rtc_calendar::CalendarError;
use rtc_calendar::bcd::bin_to_bcd;

use super::registers::{self, ALARM_DAY_OF_WEEK, ALARM_MASK, Control, Status};
use super::Ds3231;
use crate::Error;
use crate::bus::BusResult;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alarm {
    /// Matches down to the second.
    One,
    /// Matches down to the minute; has no seconds register.
    Two,
}

impl Alarm {
    fn interrupt_enable(self) -> Control {
        match self {
            Alarm::One => Control::A1IE,
            Alarm::Two => Control::A2IE,
        }
    }

    fn flag(self) -> Status {
        match self {
            Alarm::One => Status::A1F,
            Alarm::Two => Status::A2F,
        }
    }
}

const IGNORE_SECONDS: u8 = 0x01;
const IGNORE_MINUTES: u8 = 0x02;
const IGNORE_HOURS: u8 = 0x04;
const IGNORE_DAY_DATE: u8 = 0x08;
const MATCH_DAY_OF_WEEK: u8 = 0x10;
const SECOND_ALARM: u8 = 0x80;

/// What an alarm compares against the clock.
///
/// The low bits mark fields to ignore, bit 4 selects day-of-week instead of
/// date, bit 7 selects alarm 2.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AlarmType {
    Alarm1EverySecond = 0x0F,
    Alarm1MatchSeconds = 0x0E,
    Alarm1MatchMinutes = 0x0C,
    Alarm1MatchHours = 0x08,
    Alarm1MatchDate = 0x00,
    Alarm1MatchDay = 0x10,
    Alarm2EveryMinute = 0x8E,
    Alarm2MatchMinutes = 0x8C,
    Alarm2MatchHours = 0x88,
    Alarm2MatchDate = 0x80,
    Alarm2MatchDay = 0x90,
}

impl AlarmType {
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn alarm(self) -> Alarm {
        if self.bits() & SECOND_ALARM != 0 {
            Alarm::Two
        } else {
            Alarm::One
        }
    }

    fn day_or_date_fits(self, day_or_date: u8) -> bool {
        if self.bits() & MATCH_DAY_OF_WEEK != 0 {
            (1..=7).contains(&day_or_date)
        } else if self.bits() & IGNORE_DAY_DATE != 0 {
            day_or_date <= 31
        } else {
            (1..=31).contains(&day_or_date)
        }
    }

    fn masked(self, ignore: u8, value: u8) -> u8 {
        if self.bits() & ignore != 0 {
            value | ALARM_MASK
        } else {
            value
        }
    }
}

impl<I2C: I2c> Ds3231<I2C> {
    /// Programs an alarm, then arms it and clears a stale match flag.
    ///
    /// `day_or_date` is a day of week (1..=7) for the `MatchDay` types and a
    /// day of month (1..=31) otherwise. `seconds` is ignored for alarm 2.
    /// Fields the type ignores are still written and must be in range; an
    /// ignored day/date may be 0.
    pub fn set_alarm(
        &mut self,
        alarm_type: AlarmType,
        seconds: u8,
        minutes: u8,
        hours: u8,
        day_or_date: u8,
    ) -> BusResult<(), I2C> {
        if seconds > 59 || minutes > 59 || hours > 23 || !alarm_type.day_or_date_fits(day_or_date) {
            log::warn!("DS3231: alarm fields out of range");
            return Err(Error::Calendar(CalendarError::InvalidDate));
        }

        let seconds = alarm_type.masked(IGNORE_SECONDS, bin_to_bcd(seconds));
        let minutes = alarm_type.masked(IGNORE_MINUTES, bin_to_bcd(minutes));
        let hours = alarm_type.masked(IGNORE_HOURS, bin_to_bcd(hours));
        let mut day_or_date = alarm_type.masked(IGNORE_DAY_DATE, bin_to_bcd(day_or_date));
        if alarm_type.bits() & MATCH_DAY_OF_WEEK != 0 {
            day_or_date |= ALARM_DAY_OF_WEEK;
        }

        let alarm = alarm_type.alarm();
        log::debug!(
            "DS3231: alarm {:?} type {:#x} set to {:#x} {:#x} {:#x} {:#x}",
            alarm,
            alarm_type.bits(),
            seconds,
            minutes,
            hours,
            day_or_date
        );
        match alarm {
            Alarm::One => self
                .bus
                .write_block(registers::ALARM1_SECONDS, &[seconds, minutes, hours, day_or_date])?,
            Alarm::Two => self
                .bus
                .write_block(registers::ALARM2_MINUTES, &[minutes, hours, day_or_date])?,
        }

        self.arm_alarm(alarm, true)?;
        self.clear_alarm(alarm)
    }

    /// [`set_alarm`](Self::set_alarm) with the seconds field at zero.
    pub fn set_alarm_hm(
        &mut self,
        alarm_type: AlarmType,
        minutes: u8,
        hours: u8,
        day_or_date: u8,
    ) -> BusResult<(), I2C> {
        self.set_alarm(alarm_type, 0, minutes, hours, day_or_date)
    }

    /// Enables or disables the alarm's interrupt on the INT/SQW pin.
    pub fn arm_alarm(&mut self, alarm: Alarm, armed: bool) -> BusResult<(), I2C> {
        self.update_control(|mut control| {
            control.set(alarm.interrupt_enable(), armed);
            control
        })?;
        Ok(())
    }

    pub fn is_armed(&mut self, alarm: Alarm) -> BusResult<bool, I2C> {
        Ok(self.control()?.contains(alarm.interrupt_enable()))
    }

    /// Clears the alarm's match flag, releasing the interrupt line.
    pub fn clear_alarm(&mut self, alarm: Alarm) -> BusResult<(), I2C> {
        self.update_status(|status| status - alarm.flag())?;
        Ok(())
    }

    /// `true` once the alarm has matched, until [`clear_alarm`](Self::clear_alarm).
    pub fn alarm_triggered(&mut self, alarm: Alarm) -> BusResult<bool, I2C> {
        Ok(self.status()?.contains(alarm.flag()))
    }
}
