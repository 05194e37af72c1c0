// SPDX-License-Identifier: Apache-2.0
// Copyright © 2026 thermocan developers
//! Word-oriented register transport over blocking I²C.
//!
//! The sensor speaks a simple address-plus-data protocol: a read is a 2-byte
//! big-endian register address written to the device followed by a read of
//! `2 * n` bytes, and a write is a single 4-byte payload (address then
//! value). What makes the transport interesting is the buffer limit: the
//! I²C peripheral this was written against can move at most
//! [`MAX_TRANSFER_WORDS`] words per transaction, while a calibration dump is
//! 832 words. Reads larger than one buffer are split into consecutive
//! transactions that advance the register address, and the splitting is
//! invisible to callers.

use embedded_hal::blocking::i2c;

use crate::common::Address;
use crate::error::{Error, LibraryError};
use crate::register::Register;

/// The largest number of 16-bit words a single I²C transaction can carry.
///
/// Sized to the peripheral driver's transfer buffer, not to anything on the
/// sensor side.
pub const MAX_TRANSFER_WORDS: usize = 64;

/// Read `destination.len()` consecutive words starting at `start`.
///
/// Words are big-endian on the wire and returned in host order. Reads wider
/// than [`MAX_TRANSFER_WORDS`] are chunked; the result is indistinguishable
/// from one contiguous read. An empty destination is rejected with
/// [`LibraryError::InvalidArgument`].
pub fn read_words<I2C>(
    bus: &mut I2C,
    i2c_address: u8,
    start: Address,
    destination: &mut [u16],
) -> Result<(), Error<I2C>>
where
    I2C: i2c::WriteRead + i2c::Write,
{
    read_words_chunked(bus, i2c_address, start, destination, MAX_TRANSFER_WORDS)
}

// The chunk size is a parameter so tests can exercise the reassembly with
// pathological sizes; production reads always come through `read_words`.
pub(crate) fn read_words_chunked<I2C>(
    bus: &mut I2C,
    i2c_address: u8,
    start: Address,
    destination: &mut [u16],
    max_chunk_words: usize,
) -> Result<(), Error<I2C>>
where
    I2C: i2c::WriteRead + i2c::Write,
{
    if destination.is_empty() {
        return Err(LibraryError::InvalidArgument("read of zero words").into());
    }
    debug_assert!(max_chunk_words > 0 && max_chunk_words <= MAX_TRANSFER_WORDS);
    let mut buffer = [0u8; MAX_TRANSFER_WORDS * 2];
    let mut register_address: u16 = start.into();
    for chunk in destination.chunks_mut(max_chunk_words) {
        let byte_count = chunk.len() * 2;
        bus.write_read(
            i2c_address,
            &Address::new(register_address).as_bytes(),
            &mut buffer[..byte_count],
        )
        .map_err(Error::I2cWriteRead)?;
        for (word, bytes) in chunk.iter_mut().zip(buffer[..byte_count].chunks_exact(2)) {
            *word = u16::from_be_bytes([bytes[0], bytes[1]]);
        }
        register_address += chunk.len() as u16;
    }
    Ok(())
}

/// Write one word to `register`, then read it back to verify.
///
/// The payload is `[address high, address low, value high, value low]`. A
/// read-back that differs from the written value (which happens whenever the
/// write touched read-only or reserved bits) fails with
/// [`LibraryError::VerificationMismatch`].
pub fn write_word<I2C>(
    bus: &mut I2C,
    i2c_address: u8,
    register: Address,
    value: u16,
) -> Result<(), Error<I2C>>
where
    I2C: i2c::WriteRead + i2c::Write,
{
    let address_bytes = register.as_bytes();
    let value_bytes = value.to_be_bytes();
    let payload = [
        address_bytes[0],
        address_bytes[1],
        value_bytes[0],
        value_bytes[1],
    ];
    bus.write(i2c_address, &payload).map_err(Error::I2cWrite)?;

    let mut read_back = [0u16; 1];
    read_words(bus, i2c_address, register, &mut read_back)?;
    if read_back[0] != value {
        return Err(LibraryError::VerificationMismatch {
            register,
            written: value,
            read_back: read_back[0],
        }
        .into());
    }
    Ok(())
}

/// Read a typed register.
pub(crate) fn read_register<I2C, R>(bus: &mut I2C, i2c_address: u8) -> Result<R, Error<I2C>>
where
    I2C: i2c::WriteRead + i2c::Write,
    R: Register,
{
    let mut word = [0u16; 1];
    read_words(bus, i2c_address, R::ADDRESS, &mut word)?;
    Ok(R::from(word[0]))
}

/// Write a typed register, with the usual read-back verification.
pub(crate) fn write_register<I2C, R>(
    bus: &mut I2C,
    i2c_address: u8,
    register: R,
) -> Result<(), Error<I2C>>
where
    I2C: i2c::WriteRead + i2c::Write,
    R: Register,
{
    write_word(bus, i2c_address, R::ADDRESS, register.into())
}
