use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, Nrf24, Nrf24Error};
use crate::radio::prelude::{EsbChannel, EsbRegister};

/// The highest channel supported by the nRF24L01.
pub(super) const MAX_CHANNEL: u8 = 125;

impl<SPI, DO, DELAY> EsbChannel for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ChannelErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// The nRF24L01 supports 126 channels. The specified `channel` is
    /// clamped to the range [0, 125].
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType> {
        self.write_register_byte(registers::RF_CH, channel.min(MAX_CHANNEL))?;
        Ok(())
    }

    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType> {
        self.read_register_byte(registers::RF_CH)
    }
}
