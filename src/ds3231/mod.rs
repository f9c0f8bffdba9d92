//! Maxim DS3231 driver: time, temperature, output pins and the two alarms.

mod alarm;
mod registers;

use defmt_or_log as log;
use embedded_hal::i2c::I2c;
use rtc_calendar::DateTime;

use crate::bus::{BusResult, RegisterBus};
use crate::rtc::{TIME_BLOCK_LEN, TimeBlockLayout};
use crate::{Error, Rtc, RtcConfig};

pub use alarm::{Alarm, AlarmType};
pub use registers::{Control, Status};

/// Function of the INT/SQW pin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SqwPinMode {
    /// Interrupt output (INTCN set), driven by the alarms.
    Off,
    SquareWave1Hz,
    SquareWave1kHz,
    SquareWave4kHz,
    SquareWave8kHz,
}

impl SqwPinMode {
    fn rate_bits(self) -> Control {
        match self {
            SqwPinMode::Off | SqwPinMode::SquareWave1Hz => Control::empty(),
            SqwPinMode::SquareWave1kHz => Control::RS1,
            SqwPinMode::SquareWave4kHz => Control::RS2,
            SqwPinMode::SquareWave8kHz => Control::RS1 | Control::RS2,
        }
    }

    fn from_control(control: Control) -> Self {
        if control.contains(Control::INTCN) {
            return SqwPinMode::Off;
        }
        match (control.contains(Control::RS2), control.contains(Control::RS1)) {
            (false, false) => SqwPinMode::SquareWave1Hz,
            (false, true) => SqwPinMode::SquareWave1kHz,
            (true, false) => SqwPinMode::SquareWave4kHz,
            (true, true) => SqwPinMode::SquareWave8kHz,
        }
    }
}

/// Converts the temperature register pair: a signed integer part and two
/// fractional bits at the top of the low byte, in 0.25 °C steps.
fn decode_temperature(msb: u8, lsb: u8) -> f32 {
    let quarters = i16::from(msb as i8) * 4 + i16::from(lsb >> 6);
    f32::from(quarters) * 0.25
}

pub struct Ds3231<I2C> {
    bus: RegisterBus<I2C>,
    conversion_poll_limit: u32,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_config(i2c, RtcConfig::default())
    }

    pub fn with_config(i2c: I2C, config: RtcConfig) -> Self {
        Self {
            bus: RegisterBus::new(i2c, config.address()),
            conversion_poll_limit: config.conversion_poll_limit(),
        }
    }

    pub fn release(self) -> I2C {
        self.bus.release()
    }

    /// Reads any register in 0x00..=0x12.
    pub fn read_register(&mut self, register: u8) -> BusResult<u8, I2C> {
        if register > registers::LAST {
            return Err(Error::OutOfRange);
        }
        self.bus.read_register(register)
    }

    /// Writes any register in 0x00..=0x12.
    pub fn write_register(&mut self, register: u8, value: u8) -> BusResult<(), I2C> {
        if register > registers::LAST {
            return Err(Error::OutOfRange);
        }
        self.bus.write_register(register, value)
    }

    pub fn control(&mut self) -> BusResult<Control, I2C> {
        let value = self.bus.read_register(registers::CONTROL)?;
        Ok(Control::from_bits_retain(value))
    }

    pub fn status(&mut self) -> BusResult<Status, I2C> {
        let value = self.bus.read_register(registers::STATUS)?;
        Ok(Status::from_bits_retain(value))
    }

    fn update_control(&mut self, update: impl FnOnce(Control) -> Control) -> BusResult<Control, I2C> {
        let value = self.bus.update_register(registers::CONTROL, |value| {
            update(Control::from_bits_retain(value)).bits()
        })?;
        Ok(Control::from_bits_retain(value))
    }

    fn update_status(&mut self, update: impl FnOnce(Status) -> Status) -> BusResult<Status, I2C> {
        let value = self.bus.update_register(registers::STATUS, |value| {
            update(Status::from_bits_retain(value)).bits()
        })?;
        Ok(Status::from_bits_retain(value))
    }

    /// `true` if the oscillator stopped since the time was last set.
    pub fn lost_power(&mut self) -> BusResult<bool, I2C> {
        let lost = self.status()?.contains(Status::OSF);
        if lost {
            log::warn!("DS3231: oscillator stop flag set, time is not reliable");
        }
        Ok(lost)
    }

    /// Die temperature in °C with 0.25 °C resolution. The chip refreshes it every 64 s.
    pub fn temperature(&mut self) -> BusResult<f32, I2C> {
        let mut raw = [0u8; 2];
        self.bus.read_block(registers::TEMPERATURE_MSB, &mut raw)?;
        Ok(decode_temperature(raw[0], raw[1]))
    }

    /// Starts a temperature conversion and waits until the chip reports it done.
    ///
    /// Gives up with [`Error::Timeout`] after the configured number of polls.
    pub fn force_conversion(&mut self) -> BusResult<(), I2C> {
        self.update_control(|control| control | Control::CONV)?;
        for _ in 0..self.conversion_poll_limit {
            if !self.control()?.contains(Control::CONV) {
                return Ok(());
            }
        }
        log::warn!(
            "DS3231: conversion still busy after {} polls",
            self.conversion_poll_limit
        );
        Err(Error::Timeout)
    }

    /// `true` if the 32 kHz pin is driven.
    pub fn en32khz(&mut self) -> BusResult<bool, I2C> {
        Ok(self.status()?.contains(Status::EN32KHZ))
    }

    /// Enables or tri-states the 32 kHz output. Returns the new status register.
    pub fn set_en32khz(&mut self, enable: bool) -> BusResult<Status, I2C> {
        log::debug!("DS3231: 32kHz output {}", enable);
        self.update_status(|mut status| {
            status.set(Status::EN32KHZ, enable);
            status
        })
    }

    /// `true` if INT/SQW stays active on battery power.
    pub fn bbsqw(&mut self) -> BusResult<bool, I2C> {
        Ok(self.control()?.contains(Control::BBSQW))
    }

    /// Keeps INT/SQW active on battery power. Needed for alarm interrupts
    /// while the main supply is off. Returns the new control register.
    pub fn set_bbsqw(&mut self, enable: bool) -> BusResult<Control, I2C> {
        log::debug!("DS3231: battery-backed SQW {}", enable);
        self.update_control(|mut control| {
            control.set(Control::BBSQW, enable);
            control
        })
    }

    pub fn read_sqw_pin_mode(&mut self) -> BusResult<SqwPinMode, I2C> {
        Ok(SqwPinMode::from_control(self.control()?))
    }

    /// Selects a square wave, or [`SqwPinMode::Off`] for alarm interrupts.
    pub fn write_sqw_pin_mode(&mut self, mode: SqwPinMode) -> BusResult<(), I2C> {
        log::debug!("DS3231: SQW mode {:?}", mode);
        self.update_control(|control| {
            let mut control = control - (Control::INTCN | Control::RS1 | Control::RS2);
            if mode == SqwPinMode::Off {
                control |= Control::INTCN;
            }
            control | mode.rate_bits()
        })?;
        Ok(())
    }
}

impl<I2C: I2c> Rtc for Ds3231<I2C> {
    type Error = Error<I2C::Error>;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.bus.read_register(registers::STATUS)?;
        log::info!("DS3231 found at address {:#x}", self.bus.address());
        Ok(())
    }

    fn now(&mut self) -> Result<DateTime, Self::Error> {
        let mut raw = [0u8; TIME_BLOCK_LEN];
        self.bus.read_block(registers::SECONDS, &mut raw)?;
        Ok(TimeBlockLayout::WeekdayBeforeDate.decode(&raw)?)
    }

    /// Also clears the oscillator stop flag.
    fn adjust(&mut self, datetime: &DateTime) -> Result<(), Self::Error> {
        let raw = TimeBlockLayout::WeekdayBeforeDate.encode(datetime)?;
        log::debug!("DS3231: setting time to {}", datetime);
        self.bus.write_block(registers::SECONDS, &raw)?;
        self.update_status(|status| status - Status::OSF)?;
        Ok(())
    }
}
