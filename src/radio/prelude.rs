//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use rf24_session::radio::prelude::*;
//! ```

use crate::types::{Event, FifoState, Payload, RegisterValue, Status};

use super::RadioConfig;

/// A trait to represent raw register access of a transceiver.
pub trait EsbRegister {
    type RegisterErrorType;

    /// Read the register at the given `address` (in range [0, 31]).
    ///
    /// The returned value is exactly as long as the register
    /// (see [`RegisterDescriptor::size`](value@crate::RegisterDescriptor::size)).
    /// The register's mask is not applied to the result.
    fn read_register(&mut self, address: u8) -> Result<RegisterValue, Self::RegisterErrorType>;

    /// Write the given `buf` to the register at the given `address` (in range [0, 31]).
    ///
    /// The `buf` must not be longer than the register. A shorter `buf` is sent as is;
    /// the remaining bytes of a multi-byte register are not written by this call.
    fn write_register(&mut self, address: u8, buf: &[u8]) -> Result<Status, Self::RegisterErrorType>;

    /// A convenience wrapper around [`EsbRegister::write_register()`]
    /// for single byte values.
    fn write_register_byte(
        &mut self,
        address: u8,
        value: u8,
    ) -> Result<Status, Self::RegisterErrorType> {
        self.write_register(address, &[value])
    }
}

/// A trait to represent payload framing of a transceiver.
pub trait EsbPayload {
    type PayloadErrorType;

    /// Get the length of the first payload in the RX FIFO.
    ///
    /// A length of 0 means the RX FIFO is empty.
    fn read_rx_payload_width(&mut self) -> Result<u8, Self::PayloadErrorType>;

    /// Fetch the first payload in the RX FIFO.
    ///
    /// The payload's length is queried first.
    /// If the RX FIFO is empty, then an empty [`Payload`] is returned.
    fn read_rx_payload(&mut self) -> Result<Payload, Self::PayloadErrorType>;

    /// Put the given `buf` in the TX FIFO.
    ///
    /// The `buf` must be 1 to 32 bytes long.
    fn write_tx_payload(&mut self, buf: &[u8]) -> Result<Status, Self::PayloadErrorType>;
}

/// A trait to represent manipulation of RX and TX FIFOs
/// for an ESB capable transceiver.
pub trait EsbFifo {
    type FifoErrorType;

    /// Discard all 3 layers in the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<Status, Self::FifoErrorType>;

    /// Discard all 3 layers in the radio's TX FIFO.
    ///
    /// Useful after a [`Event::RetransmitLimitExceeded`] because the
    /// failed payload is not removed from the TX FIFO.
    fn flush_tx(&mut self) -> Result<Status, Self::FifoErrorType>;

    /// Get the state of the specified FIFO.
    ///
    /// - Pass `true` to `about_tx` parameter to get the state of the TX FIFO.
    /// - Pass `false` to `about_tx` parameter to get the state of the RX FIFO.
    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType>;
}

/// A trait to represent manipulation of [`Status`]
/// for an ESB capable transceiver.
pub trait EsbStatus {
    type StatusErrorType;

    /// Sample the STATUS byte without side effects on any register or FIFO.
    fn read_state(&mut self) -> Result<Status, Self::StatusErrorType>;

    /// Get the [`Status`] that was cached from the latest SPI transaction.
    ///
    /// No SPI transaction is performed.
    fn get_last_state(&self) -> Status;

    /// Clear the radio's IRQ status flags.
    ///
    /// Set any IRQ flag of the given [`Status`] to `true` to clear the
    /// corresponding event. Flags set to `false` are left untouched.
    fn clear_status_flags(&mut self, flags: Status) -> Result<Status, Self::StatusErrorType>;
}

/// A trait to represent the session (RX/TX mode) of an ESB capable transceiver.
pub trait EsbRadio {
    type RadioErrorType;

    /// Power up as a primary receiver and start listening.
    ///
    /// Returns the [`Status`] observed when updating the CONFIG register.
    fn receive(&mut self) -> Result<Status, Self::RadioErrorType>;

    /// Power up as a primary transmitter and start draining the TX FIFO.
    ///
    /// Returns the [`Status`] observed when updating the CONFIG register.
    /// This does not wait for the TX FIFO to be emptied.
    /// Use [`EsbRadio::process_state()`] to observe the outcome.
    fn transmit(&mut self) -> Result<Status, Self::RadioErrorType>;

    /// Return to Standby-I mode.
    fn deactivate_ce(&mut self) -> Result<(), Self::RadioErrorType>;

    /// Poll the radio for a single event.
    ///
    /// Events are checked in the order `RX_DR`, `TX_DS`, `MAX_RT`.
    /// Only the first asserted event is reported and no IRQ flag is cleared;
    /// use [`EsbStatus::clear_status_flags()`] after handling the event.
    /// Events are not queued: polling too slowly may miss an event.
    fn process_state(&mut self) -> Result<Event, Self::RadioErrorType>;
}

/// A trait to represent manipulation of data pipes
/// for an ESB capable transceiver.
pub trait EsbPipe {
    type PipeErrorType;

    /// Set the address used when transmitting.
    ///
    /// The same address is put on pipe 0 so auto-ack packets can be received.
    fn open_tx_pipe(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Set the address of a `pipe` (in range [0, 5]) and enable the pipe.
    ///
    /// Pipes 0 and 1 store up to 5 bytes. Pipes 2 - 5 store only the first byte
    /// of `address`, borrowing the remaining bytes from pipe 1.
    fn open_rx_pipe(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Disable a `pipe` (in range [0, 5]) from receiving.
    fn close_rx_pipe(&mut self, pipe: u8) -> Result<(), Self::PipeErrorType>;

    /// Get the address used when transmitting.
    fn get_tx_address(&mut self) -> Result<RegisterValue, Self::PipeErrorType>;

    /// Get the full address of a `pipe` (in range [0, 5]).
    fn get_rx_address(&mut self, pipe: u8) -> Result<RegisterValue, Self::PipeErrorType>;
}

/// A trait to represent manipulation of a channel (aka frequency)
/// for an ESB capable transceiver.
pub trait EsbChannel {
    type ChannelErrorType;

    /// Set the radio's currently selected channel.
    ///
    /// These channels translate to the RF frequency as an offset of Hz from 2400 MHz.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType>;

    /// Get the radio's currently selected channel.
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType>;
}

/// A trait to represent the initialization of an ESB capable transceiver.
pub trait EsbInit {
    type ConfigErrorType;

    /// Initialize the radio with the [`RadioConfig::default()`] settings.
    fn init(&mut self) -> Result<(), Self::ConfigErrorType>;

    /// Reconfigure the radio using the given `config` object.
    ///
    /// The radio is left in Standby-I mode (CE inactive) with both FIFOs flushed
    /// and all IRQ flags cleared.
    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType>;
}
