use embedded_hal::i2c::I2c;

use crate::Error;

/// Longest register write: one pointer byte plus the DS1307 NVRAM.
const MAX_WRITE_FRAME: usize = 1 + 56;

pub(crate) type BusResult<T, I2C> = Result<T, Error<<I2C as embedded_hal::i2c::ErrorType>::Error>>;

/// Register-pointer access to a device with auto-incrementing registers.
///
/// Reads are framed as a pointer write terminated by a stop condition followed
/// by a separate read, which every supported chip accepts.
#[derive(Debug)]
pub(crate) struct RegisterBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> RegisterBus<I2C> {
    pub(crate) fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub(crate) fn address(&self) -> u8 {
        self.address
    }

    pub(crate) fn release(self) -> I2C {
        self.i2c
    }

    pub(crate) fn read_block(&mut self, register: u8, buffer: &mut [u8]) -> BusResult<(), I2C> {
        self.i2c.write(self.address, &[register]).map_err(Error::I2c)?;
        self.i2c.read(self.address, buffer).map_err(Error::I2c)
    }

    pub(crate) fn read_register(&mut self, register: u8) -> BusResult<u8, I2C> {
        let mut value = [0u8; 1];
        self.read_block(register, &mut value)?;
        Ok(value[0])
    }

    pub(crate) fn write_block(&mut self, register: u8, data: &[u8]) -> BusResult<(), I2C> {
        if data.len() >= MAX_WRITE_FRAME {
            return Err(Error::OutOfRange);
        }
        let mut frame = [0u8; MAX_WRITE_FRAME];
        frame[0] = register;
        frame[1..=data.len()].copy_from_slice(data);
        self.i2c
            .write(self.address, &frame[..=data.len()])
            .map_err(Error::I2c)
    }

    pub(crate) fn write_register(&mut self, register: u8, value: u8) -> BusResult<(), I2C> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(Error::I2c)
    }

    /// Read-modify-write of a single register. Returns the value written.
    pub(crate) fn update_register(
        &mut self,
        register: u8,
        update: impl FnOnce(u8) -> u8,
    ) -> BusResult<u8, I2C> {
        let value = update(self.read_register(register)?);
        self.write_register(register, value)?;
        Ok(value)
    }
}
