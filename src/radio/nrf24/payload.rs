use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, Nrf24, Nrf24Error};
use crate::{
    radio::prelude::{EsbFifo, EsbPayload},
    types::{Payload, Status, MAX_PAYLOAD_LEN},
};

impl<SPI, DO, DELAY> EsbPayload for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PayloadErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn read_rx_payload_width(&mut self) -> Result<u8, Self::PayloadErrorType> {
        self.spi_read(1, commands::R_RX_PL_WID)?;
        Ok(self.response(1)[0])
    }

    /// See [`EsbPayload::read_rx_payload()`] for implementation-agnostic detail.
    ///
    /// If the radio reports a width greater than 32 bytes, then the RX FIFO
    /// is flushed (as the datasheet instructs) and
    /// [`Nrf24Error::BinaryCorruption`] is returned.
    fn read_rx_payload(&mut self) -> Result<Payload, Self::PayloadErrorType> {
        let width = self.read_rx_payload_width()?;
        if width == 0 {
            return Ok(Payload::default());
        }
        if width as usize > MAX_PAYLOAD_LEN {
            #[cfg(feature = "defmt")]
            defmt::warn!("Corrupted RX payload width {=u8}; flushing RX FIFO", width);
            self.flush_rx()?;
            return Err(Nrf24Error::BinaryCorruption);
        }
        self.spi_read(width, commands::R_RX_PAYLOAD)?;
        Ok(Payload::from_slice(self.response(width)))
    }

    fn write_tx_payload(&mut self, buf: &[u8]) -> Result<Status, Self::PayloadErrorType> {
        if buf.is_empty() || buf.len() > MAX_PAYLOAD_LEN {
            return Err(Nrf24Error::InvalidLength(buf.len()));
        }
        self.spi_write_buf(commands::W_TX_PAYLOAD, buf)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, EsbPayload, Nrf24Error};
    use crate::{spi_test_expects, test::mk_radio};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    fn read_payload_width() {
        let spi_expectations = spi_test_expects![(
            vec![commands::R_RX_PL_WID, 0u8],
            vec![0x40u8, 12u8]
        ),];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.read_rx_payload_width().unwrap(), 12);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn read_empty_fifo_in_one_exchange() {
        let spi_expectations = spi_test_expects![
            // only the width is queried
            (vec![commands::R_RX_PL_WID, 0u8], vec![0x0Eu8, 0u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert!(radio.read_rx_payload().unwrap().is_empty());
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn read_payload() {
        let spi_expectations = spi_test_expects![
            (vec![commands::R_RX_PL_WID, 0u8], vec![0x42u8, 3u8]),
            (
                vec![commands::R_RX_PAYLOAD, 0, 0, 0],
                vec![0x42u8, 0xDE, 0xAD, 0x01],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let payload = radio.read_rx_payload().unwrap();
        assert_eq!(payload.as_slice(), &[0xDEu8, 0xAD, 0x01]);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn read_full_payload() {
        let mut expected = vec![0u8; 33];
        expected[0] = commands::R_RX_PAYLOAD;
        let mut response = vec![0x55u8; 33];
        response[0] = 0x40;
        let spi_expectations = spi_test_expects![
            (vec![commands::R_RX_PL_WID, 0u8], vec![0x40u8, 32u8]),
            (expected, response),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let payload = radio.read_rx_payload().unwrap();
        assert_eq!(payload.len(), 32);
        assert!(payload.iter().all(|b| *b == 0x55));
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn corrupted_width_flushes_rx() {
        let spi_expectations = spi_test_expects![
            (vec![commands::R_RX_PL_WID, 0u8], vec![0x40u8, 0xFFu8]),
            (vec![commands::FLUSH_RX], vec![0x0Eu8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.read_rx_payload(), Err(Nrf24Error::BinaryCorruption));
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn write_payload() {
        let spi_expectations = spi_test_expects![(
            vec![commands::W_TX_PAYLOAD, 1u8, 2u8, 3u8],
            vec![0x0Eu8, 0u8, 0u8, 0u8],
        ),];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let status = radio.write_tx_payload(&[1, 2, 3]).unwrap();
        assert!(!status.tx_full());
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn write_payload_invalid_length() {
        let mocks = mk_radio(&[], &[]);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(
            radio.write_tx_payload(&[]),
            Err(Nrf24Error::InvalidLength(0))
        );
        assert_eq!(
            radio.write_tx_payload(&[0u8; 33]),
            Err(Nrf24Error::InvalidLength(33))
        );
        spi.done();
        ce_pin.done();
    }
}
