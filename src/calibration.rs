// SPDX-License-Identifier: Apache-2.0
// Copyright © 2026 thermocan developers
//! One-time acquisition of the factory calibration blob.

use embedded_hal::blocking::i2c;

use crate::common::CompensationModel;
use crate::error::Error;
use crate::mlx90640::{EEPROM_BASE, EEPROM_WORDS};
use crate::transport::read_words;

/// Dump the sensor's EEPROM and extract the calibration parameter set.
///
/// This is a single chunked 832-word read followed by the compensation
/// model's extraction step. It is performed once, at camera construction;
/// the resulting parameters are immutable for the life of the process.
///
/// Failures are either the propagated transport error or
/// [`InvalidCalibrationData`][crate::error::LibraryError::InvalidCalibrationData]
/// when the extractor rejects the blob.
pub fn read_calibration<I2C, M>(
    bus: &mut I2C,
    i2c_address: u8,
) -> Result<M::Parameters, Error<I2C>>
where
    I2C: i2c::WriteRead + i2c::Write,
    M: CompensationModel,
{
    let mut eeprom = [0u16; EEPROM_WORDS];
    read_words(bus, i2c_address, EEPROM_BASE, &mut eeprom)?;
    let parameters = M::extract_parameters(&eeprom)?;
    Ok(parameters)
}
