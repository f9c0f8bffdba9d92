//! Maxim DS1307 driver: time registers, SQW/OUT pin and 56 bytes of battery-backed RAM.

use defmt_or_log as log;
use embedded_hal::i2c::I2c;
use rtc_calendar::DateTime;

use crate::bus::{BusResult, RegisterBus};
use crate::rtc::{TIME_BLOCK_LEN, TimeBlockLayout};
use crate::{Error, Rtc, RtcConfig};

const REG_SECONDS: u8 = 0x00;
const REG_CONTROL: u8 = 0x07;
const REG_NVRAM: u8 = 0x08;

/// Size of the battery-backed RAM.
pub const NVRAM_SIZE: usize = 56;

const CLOCK_HALT: u8 = 0x80;

const CONTROL_OUT: u8 = 0x80;
const CONTROL_SQWE: u8 = 0x10;
const CONTROL_RATE: u8 = 0x03;

/// Function of the SQW/OUT pin. Discriminants are control register values.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SqwPinMode {
    /// Static low output.
    Off = 0x00,
    /// Static high output.
    On = 0x80,
    SquareWave1Hz = 0x10,
    SquareWave4kHz = 0x11,
    SquareWave8kHz = 0x12,
    SquareWave32kHz = 0x13,
}

impl SqwPinMode {
    fn from_control(control: u8) -> Self {
        if control & CONTROL_SQWE != 0 {
            match control & CONTROL_RATE {
                0 => SqwPinMode::SquareWave1Hz,
                1 => SqwPinMode::SquareWave4kHz,
                2 => SqwPinMode::SquareWave8kHz,
                _ => SqwPinMode::SquareWave32kHz,
            }
        } else if control & CONTROL_OUT != 0 {
            SqwPinMode::On
        } else {
            SqwPinMode::Off
        }
    }
}

fn nvram_range_fits(address: u8, len: usize) -> bool {
    usize::from(address)
        .checked_add(len)
        .is_some_and(|end| end <= NVRAM_SIZE)
}

pub struct Ds1307<I2C> {
    bus: RegisterBus<I2C>,
}

impl<I2C: I2c> Ds1307<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_config(i2c, RtcConfig::default())
    }

    pub fn with_config(i2c: I2C, config: RtcConfig) -> Self {
        Self {
            bus: RegisterBus::new(i2c, config.address()),
        }
    }

    /// Gives the bus back.
    pub fn release(self) -> I2C {
        self.bus.release()
    }

    /// `false` while the clock-halt bit is set, e.g. after first power-up.
    pub fn is_running(&mut self) -> BusResult<bool, I2C> {
        let seconds = self.bus.read_register(REG_SECONDS)?;
        Ok(seconds & CLOCK_HALT == 0)
    }

    pub fn read_sqw_pin_mode(&mut self) -> BusResult<SqwPinMode, I2C> {
        let control = self.bus.read_register(REG_CONTROL)?;
        Ok(SqwPinMode::from_control(control))
    }

    pub fn write_sqw_pin_mode(&mut self, mode: SqwPinMode) -> BusResult<(), I2C> {
        log::debug!("DS1307: SQW/OUT control {:#x}", mode as u8);
        self.bus.write_register(REG_CONTROL, mode as u8)
    }

    /// Reads `buffer.len()` bytes of RAM starting at `address` (0-based).
    pub fn read_nvram(&mut self, address: u8, buffer: &mut [u8]) -> BusResult<(), I2C> {
        if !nvram_range_fits(address, buffer.len()) {
            log::warn!("DS1307: NVRAM read of {} bytes at {} out of range", buffer.len(), address);
            return Err(Error::OutOfRange);
        }
        if buffer.is_empty() {
            return Ok(());
        }
        self.bus.read_block(REG_NVRAM + address, buffer)
    }

    /// Writes `data` to RAM starting at `address` (0-based).
    pub fn write_nvram(&mut self, address: u8, data: &[u8]) -> BusResult<(), I2C> {
        if !nvram_range_fits(address, data.len()) {
            log::warn!("DS1307: NVRAM write of {} bytes at {} out of range", data.len(), address);
            return Err(Error::OutOfRange);
        }
        if data.is_empty() {
            return Ok(());
        }
        self.bus.write_block(REG_NVRAM + address, data)
    }

    pub fn read_nvram_byte(&mut self, address: u8) -> BusResult<u8, I2C> {
        let mut value = [0u8; 1];
        self.read_nvram(address, &mut value)?;
        Ok(value[0])
    }

    pub fn write_nvram_byte(&mut self, address: u8, value: u8) -> BusResult<(), I2C> {
        self.write_nvram(address, &[value])
    }

    /// Reads `len` bytes of RAM into an owned buffer.
    pub fn read_nvram_vec(
        &mut self,
        address: u8,
        len: usize,
    ) -> BusResult<heapless::Vec<u8, NVRAM_SIZE>, I2C> {
        let mut data = heapless::Vec::new();
        data.resize(len, 0).map_err(|_| Error::OutOfRange)?;
        self.read_nvram(address, &mut data)?;
        Ok(data)
    }
}

impl<I2C: I2c> Rtc for Ds1307<I2C> {
    type Error = Error<I2C::Error>;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.bus.read_register(REG_SECONDS)?;
        log::info!("DS1307 found at address {:#x}", self.bus.address());
        Ok(())
    }

    fn now(&mut self) -> Result<DateTime, Self::Error> {
        let mut raw = [0u8; TIME_BLOCK_LEN];
        self.bus.read_block(REG_SECONDS, &mut raw)?;
        Ok(TimeBlockLayout::WeekdayBeforeDate.decode(&raw)?)
    }

    /// Also clears the clock-halt bit, starting the oscillator.
    fn adjust(&mut self, datetime: &DateTime) -> Result<(), Self::Error> {
        let raw = TimeBlockLayout::WeekdayBeforeDate.encode(datetime)?;
        log::debug!("DS1307: setting time to {}", datetime);
        self.bus.write_block(REG_SECONDS, &raw)
    }
}
