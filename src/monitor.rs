// SPDX-License-Identifier: Apache-2.0
// Copyright © 2026 thermocan developers
//! The acquisition loop: poll, read, reduce, report.

use embedded_hal::blocking::i2c;
use log::warn;

use crate::can::{CanController, TemperatureReporter, TransmitError};
use crate::common::CompensationModel;
use crate::driver::Camera;
use crate::frame::max_temperature;
use crate::mlx90640::NUM_PIXELS;

/// The value reported when there is no fresh measurement to report.
///
/// Receivers tell it apart from a genuine 0.0°C reading by convention only;
/// the rolling counter is what carries the "this node is alive" signal.
pub const NO_DATA_SENTINEL: f32 = 0.0;

/// What one loop cycle did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CycleOutcome {
    /// A fresh frame was read; its hottest pixel was reported.
    Reported { celsius: f32, accepted: bool },

    /// No fresh frame (not ready, degraded camera, or a failed read); the
    /// sentinel was reported instead.
    Sentinel { accepted: bool },
}

/// The whole node in one owning context: camera, reporter and the per-cycle
/// temperature scratch buffer.
///
/// No state lives outside this struct. The single transport handle and the
/// rolling counter are owned here for the life of the process, and a future
/// multi-threaded caller has one obvious thing to lock.
pub struct ThermalMonitor<I2C, C, M>
where
    M: CompensationModel,
{
    camera: Camera<I2C, M>,
    reporter: TemperatureReporter<C>,
    temperatures: [f32; NUM_PIXELS],
}

impl<I2C, C, M> ThermalMonitor<I2C, C, M>
where
    I2C: i2c::WriteRead + i2c::Write,
    C: CanController,
    M: CompensationModel,
{
    pub fn new(camera: Camera<I2C, M>, reporter: TemperatureReporter<C>) -> Self {
        Self {
            camera,
            reporter,
            temperatures: [0f32; NUM_PIXELS],
        }
    }

    /// Run one acquisition cycle.
    ///
    /// Every cycle reports exactly once: a measurement when a frame was read,
    /// the sentinel otherwise. A frame read that fails partway is treated
    /// the same as a frame that never arrived, so the counter advances once
    /// per cycle either way and receivers can rely on it for gap detection.
    pub fn step(&mut self) -> CycleOutcome {
        match self.camera.data_ready() {
            Ok(true) => match self.camera.read_frame(&mut self.temperatures) {
                Ok(()) => {
                    let hottest = max_temperature(&self.temperatures);
                    let accepted = self.report(hottest);
                    CycleOutcome::Reported {
                        celsius: hottest,
                        accepted,
                    }
                }
                Err(_) => {
                    warn!("frame read failed; reporting the sentinel this cycle");
                    CycleOutcome::Sentinel {
                        accepted: self.report(NO_DATA_SENTINEL),
                    }
                }
            },
            Ok(false) | Err(_) => CycleOutcome::Sentinel {
                accepted: self.report(NO_DATA_SENTINEL),
            },
        }
    }

    /// Run forever. No cycle outcome is ever fatal.
    pub fn run(&mut self) -> ! {
        loop {
            let _ = self.step();
        }
    }

    fn report(&mut self, celsius: f32) -> bool {
        match self.reporter.send(celsius) {
            Ok(()) => true,
            Err(TransmitError::NotOperational) => {
                warn!("CAN controller never reached normal mode; report dropped");
                false
            }
            Err(TransmitError::Controller(_)) => {
                warn!("CAN controller rejected the report");
                false
            }
        }
    }

    /// The camera, for configuration from the embedding firmware.
    pub fn camera(&mut self) -> &mut Camera<I2C, M> {
        &mut self.camera
    }

    /// The reporter, mostly for inspecting the counter.
    pub fn reporter(&self) -> &TemperatureReporter<C> {
        &self.reporter
    }
}
