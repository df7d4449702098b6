//! This module defines the value types passed in and out of the driver.
//! These types carry no reference to the SPI or GPIO implementation.

use core::{
    fmt::{Display, Formatter, Result},
    ops::Deref,
    write,
};

use bitfield_struct::bitfield;

/// The maximum length of a single payload (in bytes).
pub const MAX_PAYLOAD_LEN: usize = 32;

/// The maximum length of a single register (in bytes).
pub const MAX_REGISTER_LEN: usize = 5;

/// A snapshot of the STATUS byte.
///
/// The radio clocks out its STATUS register as the first byte of every SPI exchange,
/// so a fresh [`Status`] is produced by every transaction.
/// ```
/// use rf24_session::Status;
/// let status = Status::from_bits(0b0100_0011);
/// assert!(status.rx_data_ready());
/// assert!(status.tx_full());
/// assert_eq!(status.rx_pipe_number(), 1);
/// ```
#[bitfield(u8, new = false, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct Status {
    #[bits(1)]
    _padding: u8,

    /// A flag to describe if RX Data Ready to read (`RX_DR`).
    #[bits(1, access = RO)]
    pub rx_data_ready: bool,

    /// A flag to describe if TX Data Sent (`TX_DS`).
    ///
    /// With auto-ack enabled, this is only asserted once the ACK was received.
    #[bits(1, access = RO)]
    pub tx_data_sent: bool,

    /// A flag to describe if the auto-retransmit limit was reached (`MAX_RT`).
    #[bits(1, access = RO)]
    pub max_rt: bool,

    /// The pipe number of the payload available in the RX FIFO (`RX_P_NO`).
    ///
    /// The radio reports `7` when the RX FIFO is empty (`6` is unused).
    /// Neither value is treated specially here.
    #[bits(3, access = RO)]
    pub rx_pipe_number: u8,

    /// A flag to describe if the TX FIFO is full.
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

impl Status {
    /// A mask to isolate only the IRQ flags. Useful for STATUS and CONFIG registers.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// A convenience constructor similar to [`Status::default`] except
    /// all IRQ flags are set to `true`.
    ///
    /// Mostly useful with [`EsbStatus::clear_status_flags()`](fn@crate::radio::prelude::EsbStatus::clear_status_flags).
    pub fn irq_flags() -> Self {
        Self::from_bits(Self::IRQ_MASK)
    }

    /// Set or clear the `RX_DR` flag.
    pub fn with_rx_data_ready(self, flag: bool) -> Self {
        self.with_flag(1 << Self::RX_DATA_READY_OFFSET, flag)
    }

    /// Set or clear the `TX_DS` flag.
    pub fn with_tx_data_sent(self, flag: bool) -> Self {
        self.with_flag(1 << Self::TX_DATA_SENT_OFFSET, flag)
    }

    /// Set or clear the `MAX_RT` flag.
    pub fn with_max_rt(self, flag: bool) -> Self {
        self.with_flag(1 << Self::MAX_RT_OFFSET, flag)
    }

    fn with_flag(self, mask: u8, flag: bool) -> Self {
        let new_val = self.into_bits() & !mask;
        Self::from_bits(new_val | (mask * flag as u8))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Status {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Status rx_dr: {}, tx_ds: {}, max_rt: {}, rx_pipe: {}, tx_full: {}",
            self.rx_data_ready(),
            self.tx_data_sent(),
            self.max_rt(),
            self.rx_pipe_number(),
            self.tx_full()
        )
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "Status rx_dr: {}, tx_ds: {}, max_rt: {}, rx_pipe: {}, tx_full: {}",
            self.rx_data_ready(),
            self.tx_data_sent(),
            self.max_rt(),
            self.rx_pipe_number(),
            self.tx_full()
        )
    }
}

/// A fixed capacity sequence of bytes, as transferred over the SPI bus.
///
/// Bytes are kept in on-wire order. No byte-order conversion is performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteBuf<const N: usize> {
    buf: [u8; N],
    len: u8,
}

/// The content of a single register (1 - 5 bytes).
pub type RegisterValue = ByteBuf<MAX_REGISTER_LEN>;

/// The body of a single radio packet (0 - 32 bytes).
pub type Payload = ByteBuf<MAX_PAYLOAD_LEN>;

impl<const N: usize> ByteBuf<N> {
    /// Copy the given `data` into a new object.
    ///
    /// Any bytes beyond the capacity `N` are discarded.
    pub fn from_slice(data: &[u8]) -> Self {
        let len = data.len().min(N);
        let mut buf = [0u8; N];
        buf[..len].copy_from_slice(&data[..len]);
        Self {
            buf,
            len: len as u8,
        }
    }

    /// The bytes held by this object.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

impl<const N: usize> Default for ByteBuf<N> {
    fn default() -> Self {
        Self {
            buf: [0u8; N],
            len: 0,
        }
    }
}

impl<const N: usize> Deref for ByteBuf<N> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<const N: usize> AsRef<[u8]> for ByteBuf<N> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for ByteBuf<N> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=[u8]:X}", self.as_slice())
    }
}

/// The outcome of a single call to
/// [`EsbRadio::process_state()`](fn@crate::radio::prelude::EsbRadio::process_state).
///
/// At most one outcome is produced per poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// No event flag was asserted.
    Idle,
    /// A payload was fetched from the RX FIFO.
    Received {
        /// The pipe number that received the `payload`.
        pipe: u8,
        /// The fetched payload.
        payload: Payload,
    },
    /// A payload was sent (and acknowledged if auto-ack is enabled).
    Sent,
    /// The auto-retransmit limit was reached without an acknowledgement.
    RetransmitLimitExceeded,
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Event::Idle => write!(f, "Idle"),
            Event::Received { pipe, payload } => {
                write!(f, "Received {} bytes on pipe {}", payload.len(), pipe)
            }
            Event::Sent => write!(f, "Sent"),
            Event::RetransmitLimitExceeded => write!(f, "Retransmit limit exceeded"),
        }
    }
}

/// The possible states of a FIFO.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoState {
    /// Represent the state of a FIFO when it is full.
    Full,
    /// Represent the state of a FIFO when it is empty.
    Empty,
    /// Represent the state of a FIFO when it is not full but not empty either.
    Occupied,
}

impl Display for FifoState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FifoState::Empty => write!(f, "Empty"),
            FifoState::Full => write!(f, "Full"),
            FifoState::Occupied => write!(f, "Occupied"),
        }
    }
}

/// Power Amplifier level. The units dBm (decibel-milliwatts or dB<sub>mW</sub>)
/// represents a logarithmic signal loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PaLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

impl PaLevel {
    pub(crate) const MASK: u8 = 6;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            PaLevel::Min => 0,
            PaLevel::Low => 2,
            PaLevel::High => 4,
            PaLevel::Max => 6,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0 => PaLevel::Min,
            2 => PaLevel::Low,
            4 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }
}

/// How fast data moves through the air. Units are in bits per second (bps).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    /// represents 1 Mbps
    Mbps1,
    /// represents 2 Mbps
    Mbps2,
    /// represents 250 Kbps
    Kbps250,
}

impl DataRate {
    pub(crate) const MASK: u8 = 0x28;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => 0x8,
            DataRate::Kbps250 => 0x20,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0x8 => DataRate::Mbps2,
            0x20 => DataRate::Kbps250,
            _ => DataRate::Mbps1,
        }
    }
}

/// The length of a CRC checksum that is used (if any).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CrcLength {
    /// represents no CRC checksum is used
    Disabled,
    /// represents CRC 8 bit checksum is used
    Bit8,
    /// represents CRC 16 bit checksum is used
    Bit16,
}

impl CrcLength {
    pub(crate) const MASK: u8 = 0b1100;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            CrcLength::Disabled => 0,
            CrcLength::Bit8 => 8,
            CrcLength::Bit16 => 12,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            8 => CrcLength::Bit8,
            12 => CrcLength::Bit16,
            _ => CrcLength::Disabled,
        }
    }
}
