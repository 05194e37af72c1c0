// SPDX-License-Identifier: Apache-2.0
// Copyright © 2026 thermocan developers
//! The MLX90640's status and control registers.
//!
//! Registers are kept as the raw 16-bit word read off the bus, with accessors
//! for the documented fields. Keeping the raw word around means a
//! read-modify-write cycle preserves reserved bits without any re-packing
//! step. That matters because the sensor rejects nothing: it silently
//! discards writes to reserved bits, and a later read-back verification
//! would fail.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::common::Address;
use crate::util::is_bit_set;

/// Trait for common register functionality.
pub trait Register: From<u16> + Into<u16> + Copy {
    /// The address of this register in the sensor's memory map.
    const ADDRESS: Address;

    /// A bit mask of which bits can be modified by the controller.
    ///
    /// The sensor ignores writes to bits outside this mask, so anything a
    /// write changes outside of it will not survive a read-back.
    const WRITE_MASK: u16;
}

/// Identify which subpage a measurement belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum Subpage {
    Zero = 0,
    One = 1,
}

/// The refresh rates supported by the sensor.
///
/// Before using the higher rates, make sure the I²C bus is fast enough to
/// move a full frame between measurements: 100kHz manages 4Hz, 400kHz
/// manages 16Hz, and only a 1MHz bus can keep up with 64Hz.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum FrameRate {
    /// 0.5 Hz, one frame every two seconds.
    Half = 0,

    /// 1Hz.
    One = 1,

    /// 2Hz, the power-on default.
    Two = 2,

    /// 4Hz.
    Four = 3,

    /// 8Hz.
    Eight = 4,

    /// 16Hz.
    Sixteen = 5,

    /// 32Hz.
    ThirtyTwo = 6,

    /// 64Hz.
    SixtyFour = 7,
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::Two
    }
}

/// The resolution of the sensor's internal ADC.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum Resolution {
    /// 16-bit.
    Sixteen = 0,

    /// 17-bit.
    Seventeen = 1,

    /// 18-bit, the power-on default.
    Eighteen = 2,

    /// 19-bit.
    Nineteen = 3,
}

impl Default for Resolution {
    fn default() -> Self {
        Self::Eighteen
    }
}

/// The pixel access pattern used when updating subpages.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum AccessPattern {
    /// Each row of pixels is in the same subpage, with the rows alternating
    /// between subpages.
    Interleave = 0,

    /// Pixels alternate between subpages in both axes, resulting in a chess
    /// or checker board pattern. The power-on default.
    Chess = 1,
}

/// The status register (0x8000).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatusRegister(u16);

impl StatusRegister {
    const NEW_DATA_BIT: usize = 3;
    const OVERWRITE_BIT: usize = 4;

    /// The subpage which was last updated by the sensor. Read-only.
    pub fn last_updated_subpage(&self) -> Subpage {
        // Only the first bit is used; the two bits above it are reserved.
        if is_bit_set(self.0, 0) {
            Subpage::One
        } else {
            Subpage::Zero
        }
    }

    /// Set when there is a new measurement available in RAM.
    ///
    /// This flag is set by the sensor, and can only be reset by the
    /// controller.
    pub fn new_data(&self) -> bool {
        is_bit_set(self.0, Self::NEW_DATA_BIT)
    }

    /// Clear the new-data flag, signaling to the sensor that the controller
    /// has consumed the current frame.
    pub fn reset_new_data(&mut self) {
        self.0 &= !(1 << Self::NEW_DATA_BIT);
    }

    /// Whether data in RAM may be overwritten by new measurements.
    pub fn overwrite_enabled(&self) -> bool {
        is_bit_set(self.0, Self::OVERWRITE_BIT)
    }
}

impl Register for StatusRegister {
    const ADDRESS: Address = Address::new(0x8000);

    // The last-updated subpage in the three least significant bits is
    // read-only.
    const WRITE_MASK: u16 = 0x0038;
}

impl From<u16> for StatusRegister {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<StatusRegister> for u16 {
    fn from(register: StatusRegister) -> Self {
        register.0
    }
}

/// The control register (0x800D).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ControlRegister(u16);

impl ControlRegister {
    const FRAME_RATE_SHIFT: u16 = 7;
    const FRAME_RATE_MASK: u16 = 0x0380;
    const RESOLUTION_SHIFT: u16 = 10;
    const RESOLUTION_MASK: u16 = 0x0C00;
    const ACCESS_PATTERN_BIT: usize = 12;

    /// Whether the sensor alternates between subpages. The default is
    /// enabled.
    pub fn use_subpages(&self) -> bool {
        is_bit_set(self.0, 0)
    }

    /// The refresh rate the sensor is measuring at.
    pub fn frame_rate(&self) -> FrameRate {
        let raw = (self.0 & Self::FRAME_RATE_MASK) >> Self::FRAME_RATE_SHIFT;
        // Safe to unwrap: only three bits survive the mask, and all eight
        // values are defined.
        FrameRate::try_from(raw).unwrap()
    }

    pub fn set_frame_rate(&mut self, frame_rate: FrameRate) {
        let raw: u16 = frame_rate.into();
        self.0 = (self.0 & !Self::FRAME_RATE_MASK) | (raw << Self::FRAME_RATE_SHIFT);
    }

    /// The resolution the internal ADC is running at.
    pub fn resolution(&self) -> Resolution {
        let raw = (self.0 & Self::RESOLUTION_MASK) >> Self::RESOLUTION_SHIFT;
        // Safe to unwrap: two bits, four defined values.
        Resolution::try_from(raw).unwrap()
    }

    pub fn set_resolution(&mut self, resolution: Resolution) {
        let raw: u16 = resolution.into();
        self.0 = (self.0 & !Self::RESOLUTION_MASK) | (raw << Self::RESOLUTION_SHIFT);
    }

    /// The access pattern used when updating subpages.
    pub fn access_pattern(&self) -> AccessPattern {
        if is_bit_set(self.0, Self::ACCESS_PATTERN_BIT) {
            AccessPattern::Chess
        } else {
            AccessPattern::Interleave
        }
    }

    pub fn set_access_pattern(&mut self, access_pattern: AccessPattern) {
        match access_pattern {
            AccessPattern::Chess => self.0 |= 1 << Self::ACCESS_PATTERN_BIT,
            AccessPattern::Interleave => self.0 &= !(1 << Self::ACCESS_PATTERN_BIT),
        }
    }
}

impl Register for ControlRegister {
    const ADDRESS: Address = Address::new(0x800D);

    // Only the top three bits are reserved.
    const WRITE_MASK: u16 = 0x1FFF;
}

impl From<u16> for ControlRegister {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<ControlRegister> for u16 {
    fn from(register: ControlRegister) -> Self {
        register.0
    }
}
