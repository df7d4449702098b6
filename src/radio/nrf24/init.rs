use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{mnemonics, registers, Nrf24, Nrf24Error};
use crate::{
    radio::{
        prelude::{EsbChannel, EsbFifo, EsbInit, EsbRegister, EsbStatus},
        RadioConfig,
    },
    types::Status,
};

impl<SPI, DO, DELAY> EsbInit for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ConfigErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Initialize the radio's hardware using the [`SpiDevice`] and [`OutputPin`] given
    /// to [`Nrf24::new()`].
    fn init(&mut self) -> Result<(), Self::ConfigErrorType> {
        // The radio needs up to 4.5 ms + 14 us to settle after power on.
        self._delay_impl.delay_ms(5);
        self.with_config(&RadioConfig::default())
    }

    /// See [`EsbInit::with_config()`] for implementation-agnostic detail.
    ///
    /// The CONFIG register is read back at the end. If it does not hold the
    /// value written, then [`Nrf24Error::BinaryCorruption`] is returned.
    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType> {
        self.ce_low()?;
        self.flush_rx()?;
        self.flush_tx()?;
        self.clear_status_flags(Status::irq_flags())?;

        // CRC and IRQ masks from `config`, powered up in RX mode (Standby-I while CE is low)
        let config_reg = config.config_reg.as_rx();
        self.write_register_byte(registers::CONFIG, config_reg.into_bits())?;
        // 5 byte addresses
        self.write_register_byte(registers::SETUP_AW, 3)?;
        self.write_register_byte(registers::EN_AA, config.auto_ack())?;
        self.write_register_byte(registers::SETUP_RETR, config.auto_retries.into_bits())?;
        self.write_register_byte(registers::RF_SETUP, config.rf_setup())?;
        self.set_channel(config.channel())?;
        self.write_register_byte(registers::DYNPD, config.dynamic_payloads())?;
        let feature = if config.dynamic_payloads() > 0 {
            mnemonics::EN_DPL
        } else {
            0
        };
        self.write_register_byte(registers::FEATURE, feature)?;

        for pipe in 0..6u8 {
            if let Some(address) = config.rx_address(pipe) {
                if pipe < 2 {
                    self.write_register(registers::RX_ADDR_P0 + pipe, &address)?;
                } else {
                    self.write_register_byte(registers::RX_ADDR_P0 + pipe, address[0])?;
                }
            }
        }
        self.write_register(registers::TX_ADDR, &config.tx_address())?;
        self.write_register_byte(registers::EN_RXADDR, config.rx_pipes())?;

        let readback = self.read_register_byte(registers::CONFIG)?;
        if readback != config_reg.into_bits() {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "CONFIG reads {=u8:#x}, expected {=u8:#x}",
                readback,
                config_reg.into_bits()
            );
            return Err(Nrf24Error::BinaryCorruption);
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("Radio configured on channel {=u8}", config.channel());
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, EsbInit, Nrf24Error, RadioConfig};
    use crate::{radio::commands, spi_test_expects, test::mk_radio, CrcLength, DataRate, PaLevel};
    use embedded_hal_mock::eh1::{
        digital::{State as PinState, Transaction as PinTransaction},
        spi::Transaction as SpiTransaction,
    };
    use std::{vec, vec::Vec};

    /// Register values expected to be written by `with_config()`.
    struct Expected {
        config: u8,
        en_aa: u8,
        setup_retr: u8,
        rf_setup: u8,
        channel: u8,
        dynpd: u8,
        feature: u8,
        pipe1: [u8; 5],
        tx_addr: [u8; 5],
        en_rxaddr: u8,
    }

    impl Default for Expected {
        fn default() -> Self {
            Self {
                config: 0x0F,
                en_aa: 0,
                setup_retr: 0x03,
                rf_setup: 0x06,
                channel: 76,
                dynpd: 0x03,
                feature: 0x04,
                pipe1: [0xC2; 5],
                tx_addr: [0xE7; 5],
                en_rxaddr: 1,
            }
        }
    }

    fn write_byte(address: u8, value: u8) -> [SpiTransaction<u8>; 3] {
        spi_test_expects![(
            vec![address | commands::W_REGISTER, value],
            vec![0xEu8, 0u8]
        ),]
    }

    fn write_address(address: u8, value: [u8; 5]) -> [SpiTransaction<u8>; 3] {
        let mut expected = vec![address | commands::W_REGISTER];
        expected.extend(value);
        spi_test_expects![(expected, vec![0xEu8; 6]),]
    }

    fn with_config_expects(expected: &Expected, readback: u8) -> Vec<SpiTransaction<u8>> {
        let mut spi_expectations = spi_test_expects![
            (vec![commands::FLUSH_RX], vec![0xEu8]),
            (vec![commands::FLUSH_TX], vec![0xEu8]),
        ]
        .to_vec();
        spi_expectations.extend(write_byte(registers::STATUS, 0x70));
        spi_expectations.extend(write_byte(registers::CONFIG, expected.config));
        spi_expectations.extend(write_byte(registers::SETUP_AW, 3));
        spi_expectations.extend(write_byte(registers::EN_AA, expected.en_aa));
        spi_expectations.extend(write_byte(registers::SETUP_RETR, expected.setup_retr));
        spi_expectations.extend(write_byte(registers::RF_SETUP, expected.rf_setup));
        spi_expectations.extend(write_byte(registers::RF_CH, expected.channel));
        spi_expectations.extend(write_byte(registers::DYNPD, expected.dynpd));
        spi_expectations.extend(write_byte(registers::FEATURE, expected.feature));
        spi_expectations.extend(write_address(registers::RX_ADDR_P0, [0xE7; 5]));
        spi_expectations.extend(write_address(registers::RX_ADDR_P1, expected.pipe1));
        for (offset, lsb) in [0xC3u8, 0xC4, 0xC5, 0xC6].iter().enumerate() {
            spi_expectations.extend(write_byte(
                registers::RX_ADDR_P0 + 2 + offset as u8,
                *lsb,
            ));
        }
        spi_expectations.extend(write_address(registers::TX_ADDR, expected.tx_addr));
        spi_expectations.extend(write_byte(registers::EN_RXADDR, expected.en_rxaddr));
        spi_expectations.extend(spi_test_expects![(
            vec![registers::CONFIG, 0u8],
            vec![0xEu8, readback]
        ),]);
        spi_expectations
    }

    #[test]
    fn init_defaults() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let spi_expectations = with_config_expects(&Expected::default(), 0x0F);
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.init().unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn init_bin_corrupt() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let spi_expectations = with_config_expects(&Expected::default(), 0xFF);
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.init(), Err(Nrf24Error::BinaryCorruption));
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn with_custom_config() {
        let config = RadioConfig::default()
            .with_crc_length(CrcLength::Bit8)
            .with_data_rate(DataRate::Mbps2)
            .with_pa_level(PaLevel::Min)
            .with_channel(2)
            .with_auto_ack(0x3F)
            .with_auto_retries(5, 15)
            .with_dynamic_payloads(0)
            .with_tx_address(b"1Node")
            .with_rx_address(1, b"2Node");
        let expected = Expected {
            config: 0x0B,
            en_aa: 0x3F,
            setup_retr: 0x5F,
            rf_setup: 0x08,
            channel: 2,
            dynpd: 0,
            feature: 0,
            pipe1: *b"2Node",
            tx_addr: *b"1Node",
            en_rxaddr: 3,
        };
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let spi_expectations = with_config_expects(&expected, 0x0B);
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.with_config(&config).unwrap();
        spi.done();
        ce_pin.done();
    }
}
