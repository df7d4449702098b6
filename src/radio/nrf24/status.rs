use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, registers, Nrf24, Nrf24Error};
use crate::{
    radio::prelude::{EsbRegister, EsbStatus},
    types::Status,
};

impl<SPI, DO, DELAY> EsbStatus for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type StatusErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn read_state(&mut self) -> Result<Status, Self::StatusErrorType> {
        self.spi_read(0, commands::NOP)
    }

    fn get_last_state(&self) -> Status {
        self._transport.status()
    }

    fn clear_status_flags(&mut self, flags: Status) -> Result<Status, Self::StatusErrorType> {
        self.write_register_byte(registers::STATUS, flags.into_bits() & Status::IRQ_MASK)
    }
}
