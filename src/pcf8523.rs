//! NXP PCF8523 driver.

use defmt_or_log as log;
use embedded_hal::i2c::I2c;
use rtc_calendar::DateTime;

use crate::bus::{BusResult, RegisterBus};
use crate::rtc::{TIME_BLOCK_LEN, TimeBlockLayout};
use crate::{Error, Rtc, RtcConfig};

const REG_CONTROL_3: u8 = 0x02;
const REG_SECONDS: u8 = 0x03;
const REG_CLKOUT_CONTROL: u8 = 0x0F;

/// Power management bits PM[2:0] of control 3; all ones after a power failure.
const POWER_MANAGEMENT_MASK: u8 = 0xE0;
/// Battery switch-over in standard mode, low detection enabled.
const BATTERY_SWITCHOVER: u8 = 0x00;

const CLKOUT_SHIFT: u8 = 3;
const CLKOUT_MASK: u8 = 0x07;

/// CLKOUT pin frequency, the COF[2:0] field of the CLKOUT control register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SqwPinMode {
    SquareWave32kHz = 0,
    SquareWave16kHz = 1,
    SquareWave8kHz = 2,
    SquareWave4kHz = 3,
    SquareWave1kHz = 4,
    SquareWave32Hz = 5,
    SquareWave1Hz = 6,
    Off = 7,
}

impl SqwPinMode {
    fn from_field(field: u8) -> Self {
        match field & CLKOUT_MASK {
            0 => SqwPinMode::SquareWave32kHz,
            1 => SqwPinMode::SquareWave16kHz,
            2 => SqwPinMode::SquareWave8kHz,
            3 => SqwPinMode::SquareWave4kHz,
            4 => SqwPinMode::SquareWave1kHz,
            5 => SqwPinMode::SquareWave32Hz,
            6 => SqwPinMode::SquareWave1Hz,
            _ => SqwPinMode::Off,
        }
    }
}

pub struct Pcf8523<I2C> {
    bus: RegisterBus<I2C>,
}

impl<I2C: I2c> Pcf8523<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_config(i2c, RtcConfig::default())
    }

    pub fn with_config(i2c: I2C, config: RtcConfig) -> Self {
        Self {
            bus: RegisterBus::new(i2c, config.address()),
        }
    }

    pub fn release(self) -> I2C {
        self.bus.release()
    }

    /// `false` when the power management bits still hold their reset value,
    /// i.e. the time was never set or the backup supply failed.
    pub fn initialized(&mut self) -> BusResult<bool, I2C> {
        let control = self.bus.read_register(REG_CONTROL_3)?;
        Ok(control & POWER_MANAGEMENT_MASK != POWER_MANAGEMENT_MASK)
    }

    pub fn read_sqw_pin_mode(&mut self) -> BusResult<SqwPinMode, I2C> {
        let control = self.bus.read_register(REG_CLKOUT_CONTROL)?;
        Ok(SqwPinMode::from_field(control >> CLKOUT_SHIFT))
    }

    pub fn write_sqw_pin_mode(&mut self, mode: SqwPinMode) -> BusResult<(), I2C> {
        log::debug!("PCF8523: CLKOUT mode {:?}", mode);
        self.bus
            .write_register(REG_CLKOUT_CONTROL, (mode as u8) << CLKOUT_SHIFT)
    }
}

impl<I2C: I2c> Rtc for Pcf8523<I2C> {
    type Error = Error<I2C::Error>;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.bus.read_register(REG_CONTROL_3)?;
        log::info!("PCF8523 found at address {:#x}", self.bus.address());
        Ok(())
    }

    fn now(&mut self) -> Result<DateTime, Self::Error> {
        let mut raw = [0u8; TIME_BLOCK_LEN];
        self.bus.read_block(REG_SECONDS, &mut raw)?;
        Ok(TimeBlockLayout::WeekdayAfterDate.decode(&raw)?)
    }

    /// Also enables battery switch-over, which marks the clock initialized.
    fn adjust(&mut self, datetime: &DateTime) -> Result<(), Self::Error> {
        let raw = TimeBlockLayout::WeekdayAfterDate.encode(datetime)?;
        log::debug!("PCF8523: setting time to {}", datetime);
        self.bus.write_block(REG_SECONDS, &raw)?;
        self.bus.write_register(REG_CONTROL_3, BATTERY_SWITCHOVER)
    }
}
