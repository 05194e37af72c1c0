//! The acquisition core of a thermal watchdog node: an MLX90640 thermal
//! camera on one side, a CAN bus on the other, and a loop in between that
//! reduces every 32×24 frame to its hottest pixel and publishes it.
//!
//! The crate handles the two genuinely fiddly parts of that job:
//!
//! * **Moving data off the sensor.** The MLX90640's calibration blob is 832
//!   words and a frame is 834, while the I²C peripheral this was written for
//!   can only move 64 words per transaction. The [`transport`] module chunks
//!   large reads into consecutive address-advancing transactions, invisibly
//!   to callers, and verifies every register write with a read-back.
//! * **The acquisition cycle.** [`ThermalMonitor`] polls the sensor's
//!   ready flag, reads and compensates a frame when one is available, and
//!   reports the maximum on CAN identifier `0x611`: four little-endian
//!   `f32` bytes and a rolling counter that advances on *every* attempt, so
//!   receivers can use it for gap detection and as a liveness signal.
//!
//! Hardware stays behind seams: the I²C bus is any [`embedded-hal`]
//! blocking implementation, the CAN peripheral is anything implementing
//! [`CanController`], and the vendor calibration math (parameter extraction
//! and raw-to-temperature compensation) is a [`CompensationModel`]
//! implementation supplied by the embedding firmware. The crate is `no_std`;
//! the default `std` feature only exists for host-side tests and
//! `std::error::Error` impls.
//!
//! [embedded-hal]: https://docs.rs/embedded-hal/0.2/embedded_hal/blocking/i2c/index.html
//!
//! ```ignore
//! use thermocan::{Camera, TemperatureReporter, ThermalMonitor};
//!
//! let camera = Camera::<_, VendorModel>::new(i2c, thermocan::mlx90640::DEFAULT_I2C_ADDRESS);
//! let reporter = TemperatureReporter::new(mcan);
//! let mut monitor = ThermalMonitor::new(camera, reporter);
//! monitor.run()
//! ```
//!
//! # Degraded operation
//!
//! Nothing here ever halts the node. If the calibration blob can't be read
//! at boot the camera comes up degraded, and the monitor keeps transmitting
//! the `0.0` sentinel forever. The counter keeps counting, so the node
//! still looks alive from the bus, which is exactly the point.

#![no_std]

pub mod calibration;
pub mod can;
pub mod common;
pub mod driver;
pub mod error;
pub mod frame;
pub mod mlx90640;
pub mod monitor;
pub mod register;
#[cfg(test)]
mod test;
pub mod transport;
mod util;

pub use can::{CanController, TemperatureReporter, TransmitError, TxFrame};
pub use common::{Address, CompensationModel};
pub use driver::Camera;
pub use error::{Error, LibraryError};
pub use frame::max_temperature;
pub use monitor::{CycleOutcome, ThermalMonitor, NO_DATA_SENTINEL};
pub use register::*;
