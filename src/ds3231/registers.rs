use bitflags::bitflags;

pub(crate) const SECONDS: u8 = 0x00;
pub(crate) const ALARM1_SECONDS: u8 = 0x07;
pub(crate) const ALARM2_MINUTES: u8 = 0x0B;
pub(crate) const CONTROL: u8 = 0x0E;
pub(crate) const STATUS: u8 = 0x0F;
pub(crate) const TEMPERATURE_MSB: u8 = 0x11;
/// Highest register index on the chip.
pub(crate) const LAST: u8 = 0x12;

/// Alarm field bit: ignore this field when matching.
pub(crate) const ALARM_MASK: u8 = 0x80;
/// Alarm day/date register bit: match the day of week instead of the date.
pub(crate) const ALARM_DAY_OF_WEEK: u8 = 0x40;

bitflags! {
    /// Control register (0x0E)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Control: u8 {
        /// Alarm 1 interrupt enable
        const A1IE = 1 << 0;
        /// Alarm 2 interrupt enable
        const A2IE = 1 << 1;
        /// INT/SQW pin is an interrupt output instead of a square wave
        const INTCN = 1 << 2;
        const RS1 = 1 << 3;
        const RS2 = 1 << 4;
        /// Force a temperature conversion; cleared by the chip when done
        const CONV = 1 << 5;
        /// Battery-backed square wave enable
        const BBSQW = 1 << 6;
        /// Oscillator disabled on battery (active low enable)
        const EOSC = 1 << 7;
    }
}

bitflags! {
    /// Status register (0x0F)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        /// Alarm 1 matched
        const A1F = 1 << 0;
        /// Alarm 2 matched
        const A2F = 1 << 1;
        /// TCXO conversion in progress
        const BSY = 1 << 2;
        /// 32 kHz output enable
        const EN32KHZ = 1 << 3;
        /// Oscillator stopped since the flag was last cleared
        const OSF = 1 << 7;
    }
}
