use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, registers, Nrf24, Nrf24Error};
use crate::{
    radio::prelude::EsbFifo,
    types::{FifoState, Status},
};

impl<SPI, DO, DELAY> EsbFifo for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type FifoErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn flush_rx(&mut self) -> Result<Status, Self::FifoErrorType> {
        self.spi_read(0, commands::FLUSH_RX)
    }

    fn flush_tx(&mut self) -> Result<Status, Self::FifoErrorType> {
        self.spi_read(0, commands::FLUSH_TX)
    }

    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType> {
        let fifo_status = self.read_register_byte(registers::FIFO_STATUS)?;
        let offset = about_tx as u8 * 4;
        match (fifo_status >> offset) & 3 {
            1 => Ok(FifoState::Empty),
            2 => Ok(FifoState::Full),
            _ => Ok(FifoState::Occupied),
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, registers, EsbFifo, FifoState};
    use crate::{spi_test_expects, test::mk_radio};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::{vec, vec::Vec};

    #[test]
    fn flush_fifos() {
        let spi_expectations = spi_test_expects![
            (vec![commands::FLUSH_TX], vec![0x1Fu8]),
            (vec![commands::FLUSH_RX], vec![0x0Eu8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let status = radio.flush_tx().unwrap();
        assert!(status.max_rt());
        assert!(status.tx_full());
        assert_eq!(radio.flush_rx().unwrap().into_bits(), 0x0E);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn get_fifo_state() {
        // (FIFO_STATUS value, about_tx, expected state)
        let cases = [
            (0x11u8, true, FifoState::Empty),
            (0x21, true, FifoState::Full),
            (0x01, true, FifoState::Occupied),
            (0x31, true, FifoState::Occupied),
            (0x21, false, FifoState::Empty),
            (0x12, false, FifoState::Full),
            (0x10, false, FifoState::Occupied),
        ];
        let mut spi_expectations = Vec::new();
        for (value, _, _) in cases.iter() {
            spi_expectations.extend(spi_test_expects![(
                vec![registers::FIFO_STATUS, 0u8],
                vec![0xEu8, *value]
            ),]);
        }
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        for (_, about_tx, expected) in cases {
            assert_eq!(radio.get_fifo_state(about_tx), Ok(expected));
        }
        spi.done();
        ce_pin.done();
    }
}
