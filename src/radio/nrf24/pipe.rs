use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, Nrf24, Nrf24Error};
use crate::{
    radio::prelude::{EsbPipe, EsbRegister},
    types::{RegisterValue, MAX_REGISTER_LEN},
};

/// The number of data pipes.
const PIPES: u8 = 6;

impl<SPI, DO, DELAY> Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn check_pipe(pipe: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if pipe >= PIPES {
            #[cfg(feature = "defmt")]
            defmt::warn!("Pipe {=u8} does not exist", pipe);
            return Err(Nrf24Error::OutOfRange(pipe));
        }
        Ok(())
    }

    /// Read-modify-write the EN_RXADDR bit for the given `pipe`.
    fn set_pipe_enabled(
        &mut self,
        pipe: u8,
        enable: bool,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let mask = 1 << pipe;
        let value = self.read_register_byte(registers::EN_RXADDR)?;
        let out = if enable { value | mask } else { value & !mask };
        self.write_register_byte(registers::EN_RXADDR, out)?;
        Ok(())
    }
}

impl<SPI, DO, DELAY> EsbPipe for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PipeErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn open_tx_pipe(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        if address.is_empty() {
            return Err(Nrf24Error::InvalidLength(0));
        }
        self.write_register(registers::TX_ADDR, address)?;
        self.write_register(registers::RX_ADDR_P0, address)?;
        Ok(())
    }

    fn open_rx_pipe(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        Self::check_pipe(pipe)?;
        if address.is_empty() {
            return Err(Nrf24Error::InvalidLength(0));
        }
        if pipe < 2 {
            self.write_register(registers::RX_ADDR_P0 + pipe, address)?;
        } else {
            // only the LSByte is stored for pipes 2 - 5
            self.write_register_byte(registers::RX_ADDR_P0 + pipe, address[0])?;
        }
        self.set_pipe_enabled(pipe, true)
    }

    fn close_rx_pipe(&mut self, pipe: u8) -> Result<(), Self::PipeErrorType> {
        Self::check_pipe(pipe)?;
        self.set_pipe_enabled(pipe, false)
    }

    fn get_tx_address(&mut self) -> Result<RegisterValue, Self::PipeErrorType> {
        self.read_register(registers::TX_ADDR)
    }

    fn get_rx_address(&mut self, pipe: u8) -> Result<RegisterValue, Self::PipeErrorType> {
        Self::check_pipe(pipe)?;
        if pipe < 2 {
            return self.read_register(registers::RX_ADDR_P0 + pipe);
        }
        let lsb = self.read_register_byte(registers::RX_ADDR_P0 + pipe)?;
        let pipe1 = self.read_register(registers::RX_ADDR_P1)?;
        let mut address = [0u8; MAX_REGISTER_LEN];
        address[..pipe1.len()].copy_from_slice(&pipe1);
        address[0] = lsb;
        Ok(RegisterValue::from_slice(&address[..pipe1.len()]))
    }
}
