/// Default bus address shared by the DS1307, PCF8523 and DS3231.
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Default number of control register polls while waiting for a forced
/// temperature conversion. A conversion takes up to 200 ms on a DS3231; at
/// 400 kHz one poll is roughly 50 µs.
pub const DEFAULT_CONVERSION_POLL_LIMIT: u32 = 5_000;

macro_rules! positive_u32 {
    ($value:expr) => {{
        const _: () = core::assert!($value > 0, "Value must be positive");
        $value
    }};
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcConfig {
    address: u8,
    conversion_poll_limit: u32,
}

impl RtcConfig {
    pub const fn new() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            conversion_poll_limit: positive_u32!(DEFAULT_CONVERSION_POLL_LIMIT),
        }
    }

    pub const fn address(&self) -> u8 {
        self.address
    }

    pub fn set_address(&mut self, address: u8) -> Result<(), &'static str> {
        if address > 0x7F {
            return Err("Address must fit in 7 bits");
        }
        self.address = address;
        Ok(())
    }

    pub const fn conversion_poll_limit(&self) -> u32 {
        self.conversion_poll_limit
    }

    pub fn set_conversion_poll_limit(&mut self, polls: u32) -> Result<(), &'static str> {
        if polls == 0 {
            return Err("Conversion poll limit must be positive");
        }
        self.conversion_poll_limit = polls;
        Ok(())
    }
}

impl Default for RtcConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RtcConfig::default();
        assert_eq!(config.address(), 0x68);
        assert_eq!(config.conversion_poll_limit(), DEFAULT_CONVERSION_POLL_LIMIT);
        assert_eq!(config.conversion_poll_limit(), 5_000);
    }

    #[test]
    fn test_setters_validate() {
        let mut config = RtcConfig::new();
        assert!(config.set_address(0x80).is_err());
        assert!(config.set_conversion_poll_limit(0).is_err());
        assert_eq!(config, RtcConfig::new());

        config.set_address(0x51).unwrap();
        config.set_conversion_poll_limit(3).unwrap();
        assert_eq!(config.address(), 0x51);
        assert_eq!(config.conversion_poll_limit(), 3);
    }
}
