// SPDX-License-Identifier: Apache-2.0
// Copyright © 2026 thermocan developers
#[cfg(feature = "std")]
extern crate std;

use core::fmt;

use embedded_hal::blocking::i2c;

use crate::common::Address;

/// Errors that don't involve the I²C bus.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LibraryError {
    /// A call was malformed, such as a read into an empty destination buffer.
    InvalidArgument(&'static str),

    /// The calibration blob read from the sensor was rejected by the
    /// compensation model.
    InvalidCalibrationData(&'static str),

    /// A register write was accepted by the bus, but reading the register
    /// back returned a different value.
    VerificationMismatch {
        register: Address,
        written: u16,
        read_back: u16,
    },

    /// A frame operation was attempted on a camera whose calibration never
    /// loaded.
    NotInitialized,
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::InvalidArgument(msg) => write!(f, "{}", msg),
            LibraryError::InvalidCalibrationData(msg) => write!(f, "{}", msg),
            LibraryError::VerificationMismatch {
                register,
                written,
                read_back,
            } => write!(
                f,
                "{:?}: wrote {:#06X}, read back {:#06X}",
                register, written, read_back
            ),
            LibraryError::NotInitialized => {
                write!(f, "calibration was never loaded for this camera")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LibraryError {}

/// The combined error type for sensor operations.
///
/// The two I²C variants exist because the `embedded-hal` blocking write and
/// write-read traits each carry their own associated error type.
pub enum Error<I2C>
where
    I2C: i2c::WriteRead + i2c::Write,
{
    /// A combined write-read transaction was rejected by the bus.
    I2cWriteRead(<I2C as i2c::WriteRead>::Error),

    /// A plain write transaction was rejected by the bus.
    I2cWrite(<I2C as i2c::Write>::Error),

    /// Errors originating from within this library.
    Library(LibraryError),
}

// Manual Clone/PartialEq so the bounds land on the associated I²C error types
// rather than on I2C itself (as a `#[derive]` would require).
impl<I2C> Clone for Error<I2C>
where
    I2C: i2c::WriteRead + i2c::Write,
    <I2C as i2c::WriteRead>::Error: Clone,
    <I2C as i2c::Write>::Error: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Error::I2cWriteRead(err) => Error::I2cWriteRead(err.clone()),
            Error::I2cWrite(err) => Error::I2cWrite(err.clone()),
            Error::Library(err) => Error::Library(err.clone()),
        }
    }
}

impl<I2C> PartialEq for Error<I2C>
where
    I2C: i2c::WriteRead + i2c::Write,
    <I2C as i2c::WriteRead>::Error: PartialEq,
    <I2C as i2c::Write>::Error: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Error::I2cWriteRead(a), Error::I2cWriteRead(b)) => a == b,
            (Error::I2cWrite(a), Error::I2cWrite(b)) => a == b,
            (Error::Library(a), Error::Library(b)) => a == b,
            _ => false,
        }
    }
}

// Custom Debug implementation so that I2C doesn't need to implement Debug
// (like the one from linux-embedded-hal).
impl<I2C> fmt::Debug for Error<I2C>
where
    I2C: i2c::WriteRead + i2c::Write,
    <I2C as i2c::WriteRead>::Error: fmt::Debug,
    <I2C as i2c::Write>::Error: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2cWriteRead(err) => f.debug_tuple("Error::I2cWriteRead").field(err).finish(),
            Error::I2cWrite(err) => f.debug_tuple("Error::I2cWrite").field(err).finish(),
            Error::Library(err) => f.debug_tuple("Error::Library").field(err).finish(),
        }
    }
}

impl<I2C> fmt::Display for Error<I2C>
where
    I2C: i2c::WriteRead + i2c::Write,
    <I2C as i2c::WriteRead>::Error: fmt::Debug,
    <I2C as i2c::Write>::Error: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2cWriteRead(err) => write!(f, "I2C error: {:?}", err),
            Error::I2cWrite(err) => write!(f, "I2C error: {:?}", err),
            Error::Library(err) => write!(f, "{}", err),
        }
    }
}

#[cfg(feature = "std")]
impl<I2C> std::error::Error for Error<I2C>
where
    I2C: i2c::WriteRead + i2c::Write,
    <I2C as i2c::WriteRead>::Error: std::error::Error + 'static,
    <I2C as i2c::Write>::Error: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::I2cWriteRead(err) => Some(err),
            Error::I2cWrite(err) => Some(err),
            Error::Library(err) => Some(err),
        }
    }
}

impl<I2C> From<LibraryError> for Error<I2C>
where
    I2C: i2c::WriteRead + i2c::Write,
{
    fn from(lib_err: LibraryError) -> Self {
        Self::Library(lib_err)
    }
}
