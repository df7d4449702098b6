use core::fmt::{Debug, Display, Formatter};

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
pub(crate) mod bit_fields;
mod channel;
mod constants;
mod descriptor;
mod fifo;
mod init;
mod payload;
mod pipe;
mod radio;
mod register;
mod status;
mod transport;
pub use constants::{commands, mnemonics, registers};
pub use descriptor::{descriptor, RegisterDescriptor, REGISTERS};
use transport::Transport;

use crate::types::Status;

/// The minimum time (in microseconds) that the CE pin must stay asserted
/// before radio activity is guaranteed.
pub const CE_HOLD_US: u32 = 10;

/// A collection of error types to describe both hardware malfunctions and
/// misuse of the radio's command set.
///
/// None of these errors leave the driver in an unusable state.
/// Each error only aborts the call that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Nrf24Error<SPI, DO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error (for the CE pin).
    Gpo(DO),
    /// A register address greater than 31 or a pipe number greater than 5.
    OutOfRange(u8),
    /// More bytes were given than the register can hold.
    SizeMismatch {
        /// The register's address.
        address: u8,
        /// The register's size (in bytes).
        size: u8,
        /// The number of bytes given.
        given: usize,
    },
    /// A TX payload must be 1 to 32 bytes long and an address must not be empty.
    /// This carries the length given.
    InvalidLength(usize),
    /// Represents a corruption of binary data (as it was transferred over the SPI bus' MISO)
    BinaryCorruption,
}

impl<SPI: Debug, DO: Debug> Display for Nrf24Error<SPI, DO> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Nrf24Error::Spi(e) => write!(f, "SPI transaction failed: {e:?}"),
            Nrf24Error::Gpo(e) => write!(f, "CE pin failed: {e:?}"),
            Nrf24Error::OutOfRange(value) => write!(f, "{value} is out of range"),
            Nrf24Error::SizeMismatch {
                address,
                size,
                given,
            } => write!(
                f,
                "register 0x{address:02X} holds {size} bytes, but {given} bytes were given"
            ),
            Nrf24Error::InvalidLength(len) => write!(f, "invalid buffer length: {len} bytes"),
            Nrf24Error::BinaryCorruption => write!(f, "corrupted data received from the radio"),
        }
    }
}

/// This struct implements the [`Esb*` traits](mod@crate::radio::prelude)
/// for the nRF24L01 transceiver.
///
/// The driver is single-owner: every operation borrows it mutably, so an
/// operation that needs more than one SPI exchange (like
/// [`EsbPayload::read_rx_payload()`](fn@crate::radio::prelude::EsbPayload::read_rx_payload))
/// can never be interleaved with another caller's transaction.
/// Wrap it in a mutex to share it between threads.
pub struct Nrf24<SPI, DO, DELAY> {
    /// The CE pin for the radio.
    ///
    /// This really only exposed for advanced manipulation of active TX mode.
    /// It is strongly recommended to enter RX or TX mode using
    /// [`EsbRadio::receive()`](fn@crate::radio::prelude::EsbRadio::receive) and
    /// [`EsbRadio::transmit()`](fn@crate::radio::prelude::EsbRadio::transmit)
    /// because those methods respect the CE timing requirements.
    pub ce_pin: DO,
    _transport: Transport<SPI>,
    _delay_impl: DELAY,
}

impl<SPI, DO, DELAY> Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Instantiate an [`Nrf24`] object for use on the specified
    /// `spi` bus with the given `ce_pin`.
    ///
    /// The radio's CSN pin (aka Chip Select pin) shall be defined
    /// when instantiating the [`SpiDevice`](trait@embedded_hal::spi::SpiDevice)
    /// object (passed to the `spi` parameter).
    ///
    /// No SPI transaction is performed here.
    pub fn new(ce_pin: DO, spi: SPI, delay_impl: DELAY) -> Nrf24<SPI, DO, DELAY> {
        Nrf24 {
            ce_pin,
            _transport: Transport::new(spi),
            _delay_impl: delay_impl,
        }
    }

    fn spi_read(&mut self, len: u8, command: u8) -> Result<Status, Nrf24Error<SPI::Error, DO::Error>> {
        self._transport
            .read(command, len as usize)
            .map_err(Nrf24Error::Spi)
    }

    fn spi_write_buf(
        &mut self,
        command: u8,
        buf: &[u8],
    ) -> Result<Status, Nrf24Error<SPI::Error, DO::Error>> {
        self._transport.write(command, buf).map_err(Nrf24Error::Spi)
    }

    /// The bytes fetched by the last call to [`Nrf24::spi_read()`].
    fn response(&self, len: u8) -> &[u8] {
        self._transport.response(len as usize)
    }

    /// Assert the CE pin and block for [`CE_HOLD_US`].
    fn ce_high(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._delay_impl.delay_us(CE_HOLD_US);
        Ok(())
    }

    fn ce_low(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)
    }
}
