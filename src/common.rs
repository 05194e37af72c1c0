// SPDX-License-Identifier: Apache-2.0
// Copyright © 2026 thermocan developers
//! Shared types and the seam to the vendor calibration library.

use core::fmt;

use crate::error::LibraryError;
use crate::mlx90640::{EEPROM_WORDS, FRAME_WORDS, NUM_PIXELS};

/// Marker newtype for register addresses accessible over I²C.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Address(u16);

impl Address {
    /// Wrap the given address in an `Address`.
    ///
    /// This function is intended to be used in const contexts; in other cases
    /// the [`From`][core::convert::From] implementations are probably easier
    /// to use.
    pub const fn new(address: u16) -> Self {
        Self(address)
    }

    /// The on-wire representation: big-endian, regardless of host byte order.
    pub(crate) fn as_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({:#06X})", self.0)
    }
}

impl From<u16> for Address {
    fn from(raw_address: u16) -> Self {
        Self::new(raw_address)
    }
}

impl From<Address> for u16 {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl From<Address> for usize {
    fn from(address: Address) -> Self {
        address.0 as usize
    }
}

/// The seam to the manufacturer's calibration library.
///
/// The MLX90640 stores a large factory calibration blob in EEPROM, and turning
/// a raw frame into temperatures requires a long chain of compensation
/// formulas parameterized by that blob. Both steps are pure functions of
/// their inputs and live outside this crate: implementations wrap the vendor
/// code (or a reimplementation of it) without the rest of the driver caring
/// which.
pub trait CompensationModel {
    /// The extracted calibration parameter set.
    ///
    /// Created once at startup from the EEPROM blob and never modified
    /// afterwards.
    type Parameters;

    /// Derive the calibration parameters from a full EEPROM dump.
    ///
    /// Implementations should reject blobs that fail their internal
    /// consistency checks with
    /// [`InvalidCalibrationData`][LibraryError::InvalidCalibrationData].
    fn extract_parameters(eeprom: &[u16; EEPROM_WORDS]) -> Result<Self::Parameters, LibraryError>;

    /// Convert one raw frame into a row-major 32×24 temperature image, in
    /// degrees Celsius.
    ///
    /// `frame` is laid out as described in [`crate::mlx90640`]: the full RAM
    /// dump followed by the control-register and subpage words. `emissivity`
    /// and `reflected_temperature` compensate for the observed surface and
    /// the ambient radiation it reflects.
    fn compensate(
        frame: &[u16; FRAME_WORDS],
        parameters: &Self::Parameters,
        emissivity: f32,
        reflected_temperature: f32,
        destination: &mut [f32; NUM_PIXELS],
    );
}
