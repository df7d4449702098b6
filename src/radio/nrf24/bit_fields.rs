use bitfield_struct::bitfield;

use crate::CrcLength;

/// The CONFIG register.
///
/// The IRQ `mask_*` bits are active high: a set bit hides the event from the IRQ pin.
#[bitfield(u8, order = Msb)]
pub(crate) struct Config {
    #[bits(1)]
    _padding: u8,

    pub mask_rx_dr: bool,

    pub mask_tx_ds: bool,

    pub mask_max_rt: bool,

    #[bits(2, access = None, default = 3)]
    crc: u8,

    pub power: bool,

    pub prim_rx: bool,
}

impl Config {
    pub const fn crc_length(&self) -> CrcLength {
        CrcLength::from_bits(self.into_bits())
    }

    pub fn with_crc_length(self, length: CrcLength) -> Self {
        Self::from_bits(self.into_bits() & !CrcLength::MASK | length.into_bits())
    }

    /// Power up as a primary receiver (`PWR_UP` and `PRIM_RX` set).
    pub fn as_rx(self) -> Self {
        self.with_power(true).with_prim_rx(true)
    }

    /// Power up as a primary transmitter (`PWR_UP` set, `PRIM_RX` cleared).
    pub fn as_tx(self) -> Self {
        self.with_power(true).with_prim_rx(false)
    }
}

/// The SETUP_RETR register. Defaults to the chip's power-on value.
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// The auto-retry feature's `delay`.
    #[bits(4)]
    pub ard: u8,

    /// The auto-retry feature's `count`.
    #[bits(4, default = 3)]
    pub arc: u8,
}
