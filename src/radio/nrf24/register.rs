use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, descriptor, registers, Nrf24, Nrf24Error};
use crate::{
    radio::prelude::EsbRegister,
    types::{DataRate, PaLevel, RegisterValue, Status},
};

impl<SPI, DO, DELAY> EsbRegister for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type RegisterErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn read_register(&mut self, address: u8) -> Result<RegisterValue, Self::RegisterErrorType> {
        let size = descriptor(address)
            .ok_or(Nrf24Error::OutOfRange(address))?
            .size;
        self.spi_read(size, commands::R_REGISTER | address)?;
        Ok(RegisterValue::from_slice(self.response(size)))
    }

    fn write_register(&mut self, address: u8, buf: &[u8]) -> Result<Status, Self::RegisterErrorType> {
        let size = descriptor(address)
            .ok_or(Nrf24Error::OutOfRange(address))?
            .size;
        if buf.len() > size as usize {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Register {=u8:#x} holds {=u8} bytes, refusing to write {=usize}",
                address,
                size,
                buf.len()
            );
            return Err(Nrf24Error::SizeMismatch {
                address,
                size,
                given: buf.len(),
            });
        }
        self.spi_write_buf(commands::W_REGISTER | address, buf)
    }
}

impl<SPI, DO, DELAY> Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Read the single byte of a 1 byte register.
    pub(super) fn read_register_byte(
        &mut self,
        address: u8,
    ) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        let value = self.read_register(address)?;
        // every register is at least 1 byte long
        Ok(value.first().copied().unwrap_or_default())
    }

    /// Is the radio's RX power above -64 dBm?
    ///
    /// See the RPD register in the datasheet.
    pub fn rpd(&mut self) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        Ok(self.read_register_byte(registers::RPD)? & 1 == 1)
    }

    /// Get the number of retransmissions used for the last payload sent.
    pub fn get_last_arc(&mut self) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        Ok(self.read_register_byte(registers::OBSERVE_TX)? & 0xF)
    }

    /// Get the Power Amplifier level currently set in the RF_SETUP register.
    pub fn get_pa_level(&mut self) -> Result<PaLevel, Nrf24Error<SPI::Error, DO::Error>> {
        Ok(PaLevel::from_bits(self.read_register_byte(registers::RF_SETUP)?))
    }

    /// Get the data rate currently set in the RF_SETUP register.
    pub fn get_data_rate(&mut self) -> Result<DataRate, Nrf24Error<SPI::Error, DO::Error>> {
        Ok(DataRate::from_bits(self.read_register_byte(registers::RF_SETUP)?))
    }
}
