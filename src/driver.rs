// SPDX-License-Identifier: Apache-2.0
// Copyright © 2026 thermocan developers
//! The camera driver: calibration bring-up, readiness polling and frame
//! acquisition.

use embedded_hal::blocking::i2c;
use log::{debug, warn};
use paste::paste;

use crate::calibration::read_calibration;
use crate::common::CompensationModel;
use crate::error::{Error, LibraryError};
use crate::mlx90640::{
    EMISSIVITY, FRAME_CONTROL_INDEX, FRAME_SUBPAGE_INDEX, FRAME_WORDS, NUM_PIXELS, RAM_BASE,
    RAM_WORDS, REFLECTED_TEMPERATURE,
};
use crate::register::{
    AccessPattern, ControlRegister, FrameRate, Resolution, StatusRegister,
};
use crate::transport::{read_register, read_words, write_register};

/// DRY macro for the `set_*` methods that modify a register field.
///
/// Reads the current register, and only writes it back when the field
/// actually changes.
macro_rules! set_register_field {
    { $register:ty, $field:ident, $typ:ty, $doc:literal } => {
        paste! {
            #[doc = $doc]
            pub fn [< set_ $field >](&mut self, new_value: $typ) -> Result<(), Error<I2C>> {
                let mut current: $register = read_register(&mut self.bus, self.address)?;
                if current.$field() != new_value {
                    current.[< set_ $field >](new_value);
                    write_register(&mut self.bus, self.address, current)?;
                }
                Ok(())
            }
        }
    };
}

enum State<P> {
    /// Calibration loaded; frames may be read.
    Ready(P),

    /// Calibration never loaded. Every frame operation short-circuits with
    /// [`LibraryError::NotInitialized`]; the rest of the system keeps
    /// running on sentinel values.
    Degraded,
}

/// A driver for one MLX90640 on an I²C bus.
///
/// Construction never fails: if the calibration blob cannot be read or is
/// rejected, the camera comes up degraded instead, and the acquisition loop
/// is expected to keep running without it. This mirrors the intended
/// deployment: a sensor node that must keep its bus traffic (and therefore
/// its liveness signal) going even when the sensor is dead.
pub struct Camera<I2C, M>
where
    M: CompensationModel,
{
    /// The I²C bus the camera is connected to.
    bus: I2C,

    /// The camera's I²C address.
    address: u8,

    state: State<M::Parameters>,

    /// Scratch buffer for one raw frame. Overwritten on every read; no data
    /// outlives a cycle.
    frame_buffer: [u16; FRAME_WORDS],
}

impl<I2C, M> Camera<I2C, M>
where
    I2C: i2c::WriteRead + i2c::Write,
    M: CompensationModel,
{
    /// Create a `Camera`, loading the calibration data from the sensor.
    ///
    /// On a successful load the sensor is also configured for this
    /// application: 8Hz refresh, 18-bit resolution, interleaved access
    /// pattern. Each of those writes is idempotent and non-fatal; a
    /// rejected write is logged and the sensor keeps its current setting.
    pub fn new(bus: I2C, address: u8) -> Self {
        let mut bus = bus;
        let state = match read_calibration::<I2C, M>(&mut bus, address) {
            Ok(parameters) => State::Ready(parameters),
            Err(_) => {
                warn!("calibration load failed; camera is degraded and will not produce frames");
                State::Degraded
            }
        };
        let mut camera = Self {
            bus,
            address,
            state,
            frame_buffer: [0u16; FRAME_WORDS],
        };
        if camera.is_ready() {
            camera.apply_startup_configuration();
        }
        camera
    }

    /// Create a `Camera` from pre-extracted calibration parameters.
    ///
    /// Useful when the parameters were computed once and stored in flash to
    /// save the EEPROM dump at boot. No sensor configuration is touched;
    /// the caller owns that decision.
    pub fn new_with_calibration(bus: I2C, address: u8, parameters: M::Parameters) -> Self {
        Self {
            bus,
            address,
            state: State::Ready(parameters),
            frame_buffer: [0u16; FRAME_WORDS],
        }
    }

    /// Whether calibration loaded and frames can be read.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    /// Whether the camera came up without calibration.
    pub fn is_degraded(&self) -> bool {
        !self.is_ready()
    }

    fn apply_startup_configuration(&mut self) {
        if self.set_frame_rate(FrameRate::Eight).is_err() {
            warn!("refresh rate configuration rejected; keeping the sensor default");
        }
        if self.set_resolution(Resolution::Eighteen).is_err() {
            warn!("resolution configuration rejected; keeping the sensor default");
        }
        if self.set_access_pattern(AccessPattern::Interleave).is_err() {
            warn!("access pattern configuration rejected; keeping the sensor default");
        }
        debug!("camera configured");
    }

    /// Check whether the sensor has finished measuring a new frame.
    ///
    /// One status-register read. The flag stays set until a frame is
    /// consumed by [`read_frame`][Self::read_frame], so a missed poll only
    /// defers the frame to the next cycle.
    pub fn data_ready(&mut self) -> Result<bool, Error<I2C>> {
        if self.is_degraded() {
            return Err(LibraryError::NotInitialized.into());
        }
        let status: StatusRegister = read_register(&mut self.bus, self.address)?;
        Ok(status.new_data())
    }

    /// Read one frame and convert it into a 32×24 temperature image.
    ///
    /// The raw frame is assembled the way the compensation model expects it:
    /// the full RAM dump, then the control-register word, then the subpage
    /// that produced the measurement. The sensor's new-data flag is cleared
    /// before compensation runs, handing RAM back to the sensor for the next
    /// measurement.
    pub fn read_frame(&mut self, destination: &mut [f32; NUM_PIXELS]) -> Result<(), Error<I2C>> {
        let Self {
            bus,
            address,
            state,
            frame_buffer,
        } = self;
        let parameters = match state {
            State::Ready(parameters) => parameters,
            State::Degraded => return Err(LibraryError::NotInitialized.into()),
        };
        let address = *address;

        read_words(bus, address, RAM_BASE, &mut frame_buffer[..RAM_WORDS])?;
        let control: ControlRegister = read_register(bus, address)?;
        let mut status: StatusRegister = read_register(bus, address)?;
        frame_buffer[FRAME_CONTROL_INDEX] = control.into();
        frame_buffer[FRAME_SUBPAGE_INDEX] = status.last_updated_subpage().into();
        status.reset_new_data();
        write_register(bus, address, status)?;

        M::compensate(
            frame_buffer,
            parameters,
            EMISSIVITY,
            REFLECTED_TEMPERATURE,
            destination,
        );
        Ok(())
    }

    /// Read the refresh rate from the sensor.
    pub fn frame_rate(&mut self) -> Result<FrameRate, Error<I2C>> {
        let control: ControlRegister = read_register(&mut self.bus, self.address)?;
        Ok(control.frame_rate())
    }

    set_register_field! {
        ControlRegister,
        frame_rate,
        FrameRate,
        "Set the sensor's refresh rate."
    }

    /// Read the ADC resolution from the sensor.
    pub fn resolution(&mut self) -> Result<Resolution, Error<I2C>> {
        let control: ControlRegister = read_register(&mut self.bus, self.address)?;
        Ok(control.resolution())
    }

    set_register_field! {
        ControlRegister,
        resolution,
        Resolution,
        "Set the sensor's ADC resolution."
    }

    /// Read the subpage access pattern from the sensor.
    pub fn access_pattern(&mut self) -> Result<AccessPattern, Error<I2C>> {
        let control: ControlRegister = read_register(&mut self.bus, self.address)?;
        Ok(control.access_pattern())
    }

    set_register_field! {
        ControlRegister,
        access_pattern,
        AccessPattern,
        "Set the subpage access pattern used by the sensor."
    }
}
