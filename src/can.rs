// SPDX-License-Identifier: Apache-2.0
// Copyright © 2026 thermocan developers
//! Outbound reporting on the CAN bus.
//!
//! The node publishes exactly one message: the hottest pixel of the last
//! frame as a little-endian `f32`, followed by a rolling counter, on a fixed
//! standard identifier. The counter lets receivers detect dropped or
//! reordered reports, so it advances on every attempt whether or not the
//! controller accepts the frame.

use core::fmt;

use arrayvec::ArrayVec;

/// The identifier every temperature report is sent under.
pub const TEMPERATURE_FRAME_ID: u16 = 0x611;

/// Temperature reports are 5 bytes: 4 bytes of `f32` plus the counter.
pub const TEMPERATURE_PAYLOAD_LENGTH: usize = 5;

/// The hardware TX buffer slot used for temperature reports.
pub const TX_BUFFER_SLOT: u8 = 0;

/// The message marker stamped on every outgoing buffer element, reported
/// back through the controller's event FIFO.
pub const MESSAGE_MARKER: u8 = 0xAA;

/// How many operational-mode polls to spend before giving up on a transmit.
///
/// An unbounded wait would freeze the whole acquisition loop behind a
/// controller stuck in init or bus-off. Bounding by iteration count keeps
/// the crate free of any clock dependency.
pub const MODE_POLL_BUDGET: u32 = 100_000;

/// One classic-CAN data frame, shaped like an MCAN TX buffer element.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TxFrame {
    /// The message identifier.
    pub id: u16,

    /// Whether `id` is a 29-bit extended identifier.
    pub extended: bool,

    /// Store a TX event in the event FIFO once the frame goes out.
    pub event_fifo: bool,

    /// Marker copied into the TX event for correlation.
    pub marker: u8,

    /// Up to 8 data bytes.
    pub data: ArrayVec<u8, 8>,
}

impl TxFrame {
    /// An empty data frame with a standard (11-bit) identifier and this
    /// node's event-FIFO settings.
    pub fn standard(id: u16) -> Self {
        Self {
            id,
            extended: false,
            event_fifo: true,
            marker: MESSAGE_MARKER,
            data: ArrayVec::new(),
        }
    }
}

/// The seam to the CAN peripheral.
///
/// Modelled on message-RAM controllers (MCAN and friends): a frame is loaded
/// into a numbered buffer slot, then transmission of that slot is requested.
/// Implementations wrap the platform's register interface; this crate only
/// ever uses [`TX_BUFFER_SLOT`].
pub trait CanController {
    type Error;

    /// Whether the controller has reached its normal operating mode.
    ///
    /// Frames must not be submitted before this; controllers either reject
    /// them or silently drop them depending on the hardware.
    fn is_operational(&mut self) -> bool;

    /// Load a frame into a TX buffer slot.
    fn load_buffer(&mut self, slot: u8, frame: &TxFrame) -> Result<(), Self::Error>;

    /// Request transmission of a previously loaded slot.
    fn request_transmission(&mut self, slot: u8) -> Result<(), Self::Error>;
}

/// Why a temperature report didn't go out.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransmitError<E> {
    /// The controller never reached normal operating mode within the poll
    /// budget.
    NotOperational,

    /// The controller rejected the buffer load or the transmit request.
    Controller(E),
}

impl<E> fmt::Display for TransmitError<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransmitError::NotOperational => {
                write!(f, "CAN controller not in normal operating mode")
            }
            TransmitError::Controller(err) => write!(f, "CAN controller error: {:?}", err),
        }
    }
}

/// Packs temperature reports and owns the rolling counter.
pub struct TemperatureReporter<C> {
    can: C,
    counter: u8,
}

impl<C> TemperatureReporter<C>
where
    C: CanController,
{
    pub fn new(can: C) -> Self {
        Self { can, counter: 0 }
    }

    /// The counter value the *next* report will carry.
    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Encode and submit one temperature report.
    ///
    /// The payload is the four bytes of `celsius` (little-endian, preserved
    /// bit for bit) followed by the rolling counter. The counter wraps
    /// modulo 256 and advances unconditionally, before anything can fail, so
    /// consecutive attempts always carry consecutive values: a receiver
    /// seeing a gap knows frames were lost on the wire, not skipped here.
    pub fn send(&mut self, celsius: f32) -> Result<(), TransmitError<C::Error>> {
        let sequence = self.counter;
        self.counter = self.counter.wrapping_add(1);

        let mut frame = TxFrame::standard(TEMPERATURE_FRAME_ID);
        frame.data.extend(celsius.to_le_bytes());
        frame.data.push(sequence);

        self.wait_operational()?;
        self.can
            .load_buffer(TX_BUFFER_SLOT, &frame)
            .map_err(TransmitError::Controller)?;
        self.can
            .request_transmission(TX_BUFFER_SLOT)
            .map_err(TransmitError::Controller)
    }

    fn wait_operational(&mut self) -> Result<(), TransmitError<C::Error>> {
        for _ in 0..MODE_POLL_BUDGET {
            if self.can.is_operational() {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        Err(TransmitError::NotOperational)
    }
}
