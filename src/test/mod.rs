// SPDX-License-Identifier: Apache-2.0
// Copyright © 2026 thermocan developers
//! Shared test support: mock buses and a deterministic compensation model.

pub(crate) mod i2c_mock;

use crate::common::CompensationModel;
use crate::error::LibraryError;
use crate::mlx90640::{EEPROM_WORDS, FRAME_WORDS, NUM_PIXELS};

/// Deliberately not the factory-default address, so nothing in the crate can
/// get away with assuming 0x33.
pub(crate) const TEST_I2C_ADDRESS: u8 = 0x30;

/// The word the mock model expects at the start of a healthy EEPROM blob.
pub(crate) const CALIBRATION_MARKER: u16 = 0x00A5;

pub(crate) struct ScaledParameters {
    pub(crate) scale: f32,
}

/// A stand-in for the vendor compensation library with arithmetic simple
/// enough to predict in tests: every pixel is its raw word times a scale
/// factor taken from the calibration blob.
pub(crate) struct ScaledReadout;

impl CompensationModel for ScaledReadout {
    type Parameters = ScaledParameters;

    fn extract_parameters(eeprom: &[u16; EEPROM_WORDS]) -> Result<Self::Parameters, LibraryError> {
        if eeprom[0] != CALIBRATION_MARKER {
            return Err(LibraryError::InvalidCalibrationData(
                "device marker missing from calibration blob",
            ));
        }
        Ok(ScaledParameters {
            scale: f32::from(eeprom[1]) / 100.0,
        })
    }

    fn compensate(
        frame: &[u16; FRAME_WORDS],
        parameters: &Self::Parameters,
        _emissivity: f32,
        _reflected_temperature: f32,
        destination: &mut [f32; NUM_PIXELS],
    ) {
        for (temperature, raw) in destination.iter_mut().zip(frame[..NUM_PIXELS].iter()) {
            *temperature = f32::from(*raw) * parameters.scale;
        }
    }
}
