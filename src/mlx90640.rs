// SPDX-License-Identifier: Apache-2.0
// Copyright © 2026 thermocan developers
//! MLX90640 geometry and memory map.
//!
//! All addresses are in the sensor's 16-bit word-addressed memory space. The
//! discriminating constants are written out explicitly to make comparison
//! with the datasheet easier.

use crate::common::Address;

/// The width of the thermal image, in pixels.
pub const WIDTH: usize = 32;

/// The height of the thermal image, in pixels.
pub const HEIGHT: usize = 24;

/// The total number of pixels in one frame.
pub const NUM_PIXELS: usize = WIDTH * HEIGHT;

/// The factory-default I²C address.
///
/// The address is reconfigurable in EEPROM, so the driver never assumes it.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x33;

/// The first word of the calibration EEPROM.
pub const EEPROM_BASE: Address = Address::new(0x2400);

/// The size of the calibration EEPROM, in 16-bit words.
pub const EEPROM_WORDS: usize = 832;

/// The first word of measurement RAM.
pub const RAM_BASE: Address = Address::new(0x0400);

/// The words of measurement RAM read for one frame: 768 pixels followed by
/// the 64-word auxiliary block (gain, PTAT, compensation pixels and
/// reserved words).
pub const RAM_WORDS: usize = 832;

/// The size of one raw frame handed to the compensation model.
///
/// The layout follows the vendor frame-data convention: the full RAM dump,
/// then the control-register word, then the subpage that produced the
/// measurement.
pub const FRAME_WORDS: usize = RAM_WORDS + 2;

/// Index of the control-register word within a raw frame.
pub(crate) const FRAME_CONTROL_INDEX: usize = RAM_WORDS;

/// Index of the subpage word within a raw frame.
pub(crate) const FRAME_SUBPAGE_INDEX: usize = RAM_WORDS + 1;

/// The emissivity assumed for every observed surface.
///
/// 0.95 covers most matte materials; a shinier target will read low.
pub const EMISSIVITY: f32 = 0.95;

/// The assumed temperature of the environment reflected by the target, in
/// degrees Celsius.
pub const REFLECTED_TEMPERATURE: f32 = 21.0;
