// SPDX-License-Identifier: Apache-2.0
// Copyright © 2026 thermocan developers
extern crate std;

use std::cell::{Cell, RefCell, RefMut};
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::blocking::i2c;

use crate::mlx90640::{EEPROM_WORDS, RAM_WORDS};
use crate::register::{ControlRegister, Register, StatusRegister};
use crate::test::CALIBRATION_MARKER;

const EEPROM_BASE: u16 = 0x2400;
const RAM_BASE: u16 = 0x0400;
const STATUS_ADDRESS: u16 = 0x8000;
const CONTROL_ADDRESS: u16 = 0x800D;

/// The MLX90640 power-on control register value: subpages enabled, 2Hz,
/// 18-bit, chess pattern.
const CONTROL_DEFAULT: u16 = 0x1901;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MockError {
    /// An unknown I²C address was given.
    UnknownI2cAddress(u8),

    /// The transaction was shaped wrong: a write-read whose write part isn't
    /// exactly a register address, a read of zero or an odd number of bytes,
    /// or a write that isn't address-plus-one-word.
    IllegalOperation,

    /// The address isn't mapped on this device.
    UnknownMemoryAddress(u16),

    /// The address cannot be written.
    IllegalWriteAddress(u16),

    /// Injected bus rejection.
    Nack,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Operation {
    Read { address: u16, words: usize },
    Write { address: u16, words: usize },
}

/// A mock MLX90640 on a mock bus.
///
/// All state is behind `Rc` so tests can keep a handle for inspection and
/// injection after a driver takes ownership of its clone.
#[derive(Clone)]
pub(crate) struct MockSensorBus {
    i2c_address: u8,
    eeprom: Rc<RefCell<[u16; EEPROM_WORDS]>>,
    ram: Rc<RefCell<[u16; RAM_WORDS]>>,
    status_register: Rc<Cell<u16>>,
    control_register: Rc<Cell<u16>>,
    operations: Rc<RefCell<Vec<Operation>>>,
    nack_reads: Rc<Cell<bool>>,
    nack_ram_reads: Rc<Cell<bool>>,
    nack_writes: Rc<Cell<bool>>,
    drop_writes: Rc<Cell<bool>>,
}

impl MockSensorBus {
    pub(crate) fn new(i2c_address: u8) -> Self {
        let mut eeprom = [0u16; EEPROM_WORDS];
        // A blob the test compensation model accepts, with a scale of 0.1.
        eeprom[0] = CALIBRATION_MARKER;
        eeprom[1] = 10;
        Self {
            i2c_address,
            eeprom: Rc::new(RefCell::new(eeprom)),
            ram: Rc::new(RefCell::new([0u16; RAM_WORDS])),
            status_register: Rc::new(Cell::new(0x0008)),
            control_register: Rc::new(Cell::new(CONTROL_DEFAULT)),
            operations: Rc::new(RefCell::new(Vec::new())),
            nack_reads: Rc::new(Cell::new(false)),
            nack_ram_reads: Rc::new(Cell::new(false)),
            nack_writes: Rc::new(Cell::new(false)),
            drop_writes: Rc::new(Cell::new(false)),
        }
    }

    pub(crate) fn eeprom(&self) -> RefMut<'_, [u16; EEPROM_WORDS]> {
        self.eeprom.borrow_mut()
    }

    /// Make the calibration blob fail extraction.
    pub(crate) fn corrupt_calibration(&self) {
        self.eeprom.borrow_mut()[0] = 0;
    }

    pub(crate) fn set_ram_word(&self, index: usize, value: u16) {
        self.ram.borrow_mut()[index] = value;
    }

    /// Set or clear the new-data flag in the status register.
    pub(crate) fn set_data_available(&self, available: bool) {
        let status = self.status_register.get();
        if available {
            self.status_register.set(status | 0x0008);
        } else {
            self.status_register.set(status & !0x0008);
        }
    }

    pub(crate) fn status_register(&self) -> u16 {
        self.status_register.get()
    }

    pub(crate) fn control_register(&self) -> u16 {
        self.control_register.get()
    }

    pub(crate) fn operations(&self) -> Vec<Operation> {
        self.operations.borrow().clone()
    }

    pub(crate) fn clear_operations(&self) {
        self.operations.borrow_mut().clear();
    }

    /// Reject every read transaction.
    pub(crate) fn nack_reads(&self, enabled: bool) {
        self.nack_reads.set(enabled);
    }

    /// Reject only reads of measurement RAM, leaving register reads working.
    pub(crate) fn nack_ram_reads(&self, enabled: bool) {
        self.nack_ram_reads.set(enabled);
    }

    /// Reject every write transaction.
    pub(crate) fn nack_writes(&self, enabled: bool) {
        self.nack_writes.set(enabled);
    }

    /// Accept writes on the bus but discard their payloads, so read-back
    /// verification sees the old value.
    pub(crate) fn drop_writes(&self, enabled: bool) {
        self.drop_writes.set(enabled);
    }

    fn serve_read(&self, start: u16, destination: &mut [u8]) -> Result<(), MockError> {
        let words = destination.len() / 2;
        let eeprom_range = EEPROM_BASE..EEPROM_BASE + EEPROM_WORDS as u16;
        let ram_range = RAM_BASE..RAM_BASE + RAM_WORDS as u16;
        if eeprom_range.contains(&start) {
            let end = start as usize + words;
            if end > eeprom_range.end as usize {
                return Err(MockError::UnknownMemoryAddress(end as u16 - 1));
            }
            let offset = (start - EEPROM_BASE) as usize;
            copy_words(&self.eeprom.borrow()[offset..offset + words], destination);
            Ok(())
        } else if ram_range.contains(&start) {
            if self.nack_ram_reads.get() {
                return Err(MockError::Nack);
            }
            let end = start as usize + words;
            if end > ram_range.end as usize {
                return Err(MockError::UnknownMemoryAddress(end as u16 - 1));
            }
            let offset = (start - RAM_BASE) as usize;
            copy_words(&self.ram.borrow()[offset..offset + words], destination);
            Ok(())
        } else if start == STATUS_ADDRESS && words == 1 {
            destination.copy_from_slice(&self.status_register.get().to_be_bytes());
            Ok(())
        } else if start == CONTROL_ADDRESS && words == 1 {
            destination.copy_from_slice(&self.control_register.get().to_be_bytes());
            Ok(())
        } else {
            Err(MockError::UnknownMemoryAddress(start))
        }
    }
}

fn copy_words(words: &[u16], destination: &mut [u8]) {
    for (word, bytes) in words.iter().zip(destination.chunks_exact_mut(2)) {
        bytes.copy_from_slice(&word.to_be_bytes());
    }
}

fn masked_store(cell: &Cell<u16>, mask: u16, value: u16) {
    let current = cell.get();
    cell.set((current & !mask) | (value & mask));
}

impl i2c::WriteRead for MockSensorBus {
    type Error = MockError;

    fn write_read(
        &mut self,
        i2c_address: u8,
        write_buffer: &[u8],
        out_buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        if i2c_address != self.i2c_address {
            return Err(MockError::UnknownI2cAddress(i2c_address));
        }
        // Write-reads should only be writing the register address.
        if write_buffer.len() != 2 || out_buffer.is_empty() || out_buffer.len() % 2 != 0 {
            return Err(MockError::IllegalOperation);
        }
        let start = u16::from_be_bytes([write_buffer[0], write_buffer[1]]);
        self.operations.borrow_mut().push(Operation::Read {
            address: start,
            words: out_buffer.len() / 2,
        });
        if self.nack_reads.get() {
            return Err(MockError::Nack);
        }
        self.serve_read(start, out_buffer)
    }
}

impl i2c::Write for MockSensorBus {
    type Error = MockError;

    fn write(&mut self, i2c_address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        if i2c_address != self.i2c_address {
            return Err(MockError::UnknownI2cAddress(i2c_address));
        }
        // Only single-word register writes exist in this protocol.
        if bytes.len() != 4 {
            return Err(MockError::IllegalOperation);
        }
        let register = u16::from_be_bytes([bytes[0], bytes[1]]);
        let value = u16::from_be_bytes([bytes[2], bytes[3]]);
        self.operations.borrow_mut().push(Operation::Write {
            address: register,
            words: 1,
        });
        if self.nack_writes.get() {
            return Err(MockError::Nack);
        }
        if self.drop_writes.get() {
            // Accepted on the wire, never stored.
            return Ok(());
        }
        match register {
            STATUS_ADDRESS => {
                masked_store(&self.status_register, StatusRegister::WRITE_MASK, value);
                Ok(())
            }
            CONTROL_ADDRESS => {
                masked_store(&self.control_register, ControlRegister::WRITE_MASK, value);
                Ok(())
            }
            _ => Err(MockError::IllegalWriteAddress(register)),
        }
    }
}
