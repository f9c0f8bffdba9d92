//! In-memory register file that behaves like an auto-incrementing RTC on the bus.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

const REGISTER_COUNT: usize = 64;
const DS3231_CONTROL: usize = 0x0E;
const DS3231_CONV: u8 = 0x20;

pub(crate) struct RegisterBank {
    pub(crate) registers: [u8; REGISTER_COUNT],
    address: u8,
    pointer: usize,
    /// Answer every transaction with a NACK.
    pub(crate) absent: bool,
    /// Reads of the DS3231 control register left before CONV clears; `None` never clears it.
    pub(crate) conversion_reads: Option<u32>,
    pub(crate) transactions: usize,
}

impl RegisterBank {
    pub(crate) fn new(address: u8) -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
            address,
            pointer: 0,
            absent: false,
            conversion_reads: Some(0),
            transactions: 0,
        }
    }

    pub(crate) fn with_registers(address: u8, start: usize, values: &[u8]) -> Self {
        let mut bank = Self::new(address);
        bank.registers[start..start + values.len()].copy_from_slice(values);
        bank
    }

    fn read_next(&mut self) -> u8 {
        let index = self.pointer % REGISTER_COUNT;
        if index == DS3231_CONTROL && self.registers[index] & DS3231_CONV != 0 {
            match self.conversion_reads {
                Some(0) => self.registers[index] &= !DS3231_CONV,
                Some(left) => self.conversion_reads = Some(left - 1),
                None => {}
            }
        }
        self.pointer += 1;
        self.registers[index]
    }
}

impl ErrorType for RegisterBank {
    type Error = ErrorKind;
}

impl I2c for RegisterBank {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        self.transactions += 1;
        if self.absent || address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    if let Some((&pointer, data)) = bytes.split_first() {
                        self.pointer = usize::from(pointer);
                        for &byte in data {
                            self.registers[self.pointer % REGISTER_COUNT] = byte;
                            self.pointer += 1;
                        }
                    }
                }
                Operation::Read(buffer) => {
                    for slot in buffer.iter_mut() {
                        *slot = self.read_next();
                    }
                }
            }
        }
        Ok(())
    }
}
