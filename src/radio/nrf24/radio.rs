use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{bit_fields::Config, registers, Nrf24, Nrf24Error};
use crate::{
    radio::prelude::{EsbPayload, EsbRadio, EsbRegister, EsbStatus},
    types::{Event, Status},
};

impl<SPI, DO, DELAY> EsbRadio for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type RadioErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn receive(&mut self) -> Result<Status, Self::RadioErrorType> {
        let config = Config::from_bits(self.read_register_byte(registers::CONFIG)?).as_rx();
        let status = self.write_register_byte(registers::CONFIG, config.into_bits())?;
        #[cfg(feature = "defmt")]
        defmt::debug!("Entering RX mode (CONFIG = {=u8:#x})", config.into_bits());
        self.ce_high()?;
        Ok(status)
    }

    fn transmit(&mut self) -> Result<Status, Self::RadioErrorType> {
        let config = Config::from_bits(self.read_register_byte(registers::CONFIG)?).as_tx();
        let status = self.write_register_byte(registers::CONFIG, config.into_bits())?;
        #[cfg(feature = "defmt")]
        defmt::debug!("Entering TX mode (CONFIG = {=u8:#x})", config.into_bits());
        self.ce_high()?;
        Ok(status)
    }

    fn deactivate_ce(&mut self) -> Result<(), Self::RadioErrorType> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Entering Standby-I mode");
        self.ce_low()
    }

    /// See [`EsbRadio::process_state()`] for implementation-agnostic detail.
    ///
    /// The pipe number of a [`Event::Received`] is taken from the same STATUS byte
    /// that reported the event.
    fn process_state(&mut self) -> Result<Event, Self::RadioErrorType> {
        let status = self.read_state()?;
        if status.rx_data_ready() {
            let payload = self.read_rx_payload()?;
            Ok(Event::Received {
                pipe: status.rx_pipe_number(),
                payload,
            })
        } else if status.tx_data_sent() {
            Ok(Event::Sent)
        } else if status.max_rt() {
            Ok(Event::RetransmitLimitExceeded)
        } else {
            Ok(Event::Idle)
        }
    }
}
