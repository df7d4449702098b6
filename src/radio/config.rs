use crate::radio::nrf24::bit_fields::{Config, SetupRetry};
use crate::{CrcLength, DataRate, PaLevel};

/// The address of every data pipe (and the TX address).
#[derive(Debug, Clone, Copy)]
struct PipeAddresses {
    tx_address: [u8; 5],
    pipe0: [u8; 5],
    pipe1: [u8; 5],
    /// The LSByte of pipes 2 - 5.
    lsb: [u8; 4],
    enabled: u8,
}

impl Default for PipeAddresses {
    fn default() -> Self {
        Self {
            tx_address: [0xE7; 5],
            pipe0: [0xE7; 5],
            pipe1: [0xC2; 5],
            lsb: [0xC3, 0xC4, 0xC5, 0xC6],
            enabled: 1,
        }
    }
}

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Start with [`RadioConfig::default()`],
/// then chain the `with_*()` methods.
/// ```
/// use rf24_session::{radio::RadioConfig, DataRate};
/// let config = RadioConfig::default()
///     .with_channel(42)
///     .with_data_rate(DataRate::Mbps2);
/// assert_eq!(config.channel(), 42);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RadioConfig {
    pub(crate) config_reg: Config,
    pub(crate) auto_retries: SetupRetry,
    data_rate: DataRate,
    pa_level: PaLevel,
    channel: u8,
    auto_ack: u8,
    dynamic_payloads: u8,
    pipes: PipeAddresses,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::channel()`] | `76` |
    /// | [`RadioConfig::crc_length()`] | [`CrcLength::Bit16`] |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps1`] |
    /// | [`RadioConfig::pa_level()`] | [`PaLevel::Max`] |
    /// | [`RadioConfig::auto_ack()`] | `0` (disabled for all pipes) |
    /// | [`RadioConfig::auto_retry_delay()`] | `0` |
    /// | [`RadioConfig::auto_retry_count()`] | `3` |
    /// | [`RadioConfig::dynamic_payloads()`] | `0x03` (pipes 0 and 1) |
    /// | [`RadioConfig::tx_address()`] | `[0xE7; 5]` |
    ///
    /// ## Default RX pipes' configuration
    ///
    /// | pipe number | state  | address     |
    /// |-------------|--------|-------------|
    /// |      0      | open   | `[0xE7; 5]` |
    /// |      1      | closed | `[0xC2; 5]` |
    /// |      2[^1]  | closed | `0xC3`      |
    /// |      3[^1]  | closed | `0xC4`      |
    /// |      4[^1]  | closed | `0xC5`      |
    /// |      5[^1]  | closed | `0xC6`      |
    ///
    /// [^1]: Pipes 2 - 5 share the 4 upper bytes of pipe 1's address.
    fn default() -> Self {
        Self {
            // all events on the IRQ pin, 16 bit CRC, powered down
            config_reg: Config::default(),
            auto_retries: SetupRetry::default(),
            data_rate: DataRate::Mbps1,
            pa_level: PaLevel::Max,
            channel: 76,
            auto_ack: 0,
            dynamic_payloads: 0x03,
            pipes: PipeAddresses::default(),
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_crc_length()`].
    pub const fn crc_length(&self) -> CrcLength {
        self.config_reg.crc_length()
    }

    /// The Cyclical Redundancy Checksum (CRC) length.
    pub fn with_crc_length(self, length: CrcLength) -> Self {
        Self {
            config_reg: self.config_reg.with_crc_length(length),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        self.data_rate
    }

    /// The Data Rate (over the air).
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self { data_rate, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_pa_level()`].
    pub const fn pa_level(&self) -> PaLevel {
        self.pa_level
    }

    /// The Power Amplitude (PA) level.
    pub fn with_pa_level(self, pa_level: PaLevel) -> Self {
        Self { pa_level, ..self }
    }

    /// The RF_SETUP register value derived from [`RadioConfig::data_rate()`]
    /// and [`RadioConfig::pa_level()`].
    pub(crate) const fn rf_setup(&self) -> u8 {
        self.data_rate.into_bits() | self.pa_level.into_bits()
    }

    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Set the channel (over the air frequency).
    ///
    /// This value is clamped to range [0, 125].
    /// The radio's frequency can be determined by the following equation:
    /// ```text
    /// frequency (in MHz) = channel + 2400
    /// ```
    pub fn with_channel(self, value: u8) -> Self {
        Self {
            channel: value.min(125),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_auto_ack()`].
    pub const fn auto_ack(&self) -> u8 {
        self.auto_ack
    }

    /// Enable or disable the auto-ACK feature per pipe.
    ///
    /// Bit 0 controls the feature for pipe 0, bit 1 for pipe 1, and so on.
    /// Bits 6 and 7 are ignored.
    pub fn with_auto_ack(self, enable: u8) -> Self {
        Self {
            auto_ack: enable & 0x3F,
            ..self
        }
    }

    /// The auto-retry feature's `delay` (set via [`RadioConfig::with_auto_retries()`])
    pub const fn auto_retry_delay(&self) -> u8 {
        self.auto_retries.ard()
    }

    /// The auto-retry feature's `count` (set via [`RadioConfig::with_auto_retries()`])
    pub const fn auto_retry_count(&self) -> u8 {
        self.auto_retries.arc()
    }

    /// Set the auto-retry feature's `delay` and `count` parameters.
    ///
    /// Both values are clamped to range [0, 15].
    /// The delay between attempts is `250 * delay + 250` microseconds.
    pub fn with_auto_retries(self, delay: u8, count: u8) -> Self {
        Self {
            auto_retries: self
                .auto_retries
                .with_ard(delay.min(15))
                .with_arc(count.min(15)),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_dynamic_payloads()`].
    pub const fn dynamic_payloads(&self) -> u8 {
        self.dynamic_payloads
    }

    /// Enable or disable dynamically sized payloads per pipe.
    ///
    /// Bit 0 controls the feature for pipe 0, bit 1 for pipe 1, and so on.
    /// The FEATURE register's `EN_DPL` bit is set when any pipe uses this feature.
    pub fn with_dynamic_payloads(self, enable: u8) -> Self {
        Self {
            dynamic_payloads: enable & 0x3F,
            ..self
        }
    }

    /// Returns the TX address set by [`RadioConfig::with_tx_address()`].
    pub const fn tx_address(&self) -> [u8; 5] {
        self.pipes.tx_address
    }

    /// Set the TX address (also used on pipe 0 to receive auto-ack packets).
    ///
    /// Only the first 5 bytes of `address` are used.
    pub fn with_tx_address(self, address: &[u8]) -> Self {
        let mut pipes = self.pipes;
        let len = address.len().min(5);
        pipes.tx_address[..len].copy_from_slice(&address[..len]);
        Self { pipes, ..self }
    }

    /// Set the address of a `pipe` and open it.
    ///
    /// Pipes 0 and 1 use the first 5 bytes of `address`.
    /// Pipes 2 - 5 only use the first byte.
    /// An empty `address` or a `pipe` greater than 5 is ignored.
    pub fn with_rx_address(self, pipe: u8, address: &[u8]) -> Self {
        if pipe > 5 || address.is_empty() {
            return self;
        }
        let mut pipes = self.pipes;
        let len = address.len().min(5);
        match pipe {
            0 => pipes.pipe0[..len].copy_from_slice(&address[..len]),
            1 => pipes.pipe1[..len].copy_from_slice(&address[..len]),
            _ => pipes.lsb[pipe as usize - 2] = address[0],
        }
        pipes.enabled |= 1 << pipe;
        Self { pipes, ..self }
    }

    /// Open or close a `pipe` without changing its address.
    pub fn with_rx_pipe(self, pipe: u8, enable: bool) -> Self {
        if pipe > 5 {
            return self;
        }
        let mut pipes = self.pipes;
        if enable {
            pipes.enabled |= 1 << pipe;
        } else {
            pipes.enabled &= !(1 << pipe);
        }
        Self { pipes, ..self }
    }

    /// Is the given `pipe` open?
    pub const fn is_rx_pipe_enabled(&self, pipe: u8) -> bool {
        pipe < 6 && self.pipes.enabled & (1 << pipe) > 0
    }

    /// The EN_RXADDR register value.
    pub(crate) const fn rx_pipes(&self) -> u8 {
        self.pipes.enabled
    }

    /// Get the full address of a `pipe` (in range [0, 5]).
    ///
    /// The address of pipes 2 - 5 is completed with the upper bytes of pipe 1.
    /// Returns `None` if `pipe` is out of range.
    pub fn rx_address(&self, pipe: u8) -> Option<[u8; 5]> {
        match pipe {
            0 => Some(self.pipes.pipe0),
            1 => Some(self.pipes.pipe1),
            2..=5 => {
                let mut address = self.pipes.pipe1;
                address[0] = self.pipes.lsb[pipe as usize - 2];
                Some(address)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::RadioConfig;
    use crate::{CrcLength, DataRate, PaLevel};

    #[test]
    fn defaults() {
        let config = RadioConfig::default();
        assert_eq!(config.crc_length(), CrcLength::Bit16);
        assert_eq!(config.data_rate(), DataRate::Mbps1);
        assert_eq!(config.pa_level(), PaLevel::Max);
        assert_eq!(config.rf_setup(), 0x06);
        assert_eq!(config.channel(), 76);
        assert_eq!(config.auto_ack(), 0);
        assert_eq!(config.dynamic_payloads(), 3);
        assert_eq!(config.rx_pipes(), 1);
        assert_eq!(config.auto_retries.into_bits(), 3);
        assert_eq!(config.rx_address(3), Some([0xC4, 0xC2, 0xC2, 0xC2, 0xC2]));
        assert_eq!(config.rx_address(6), None);
    }

    #[test]
    fn builders() {
        let config = RadioConfig::default()
            .with_crc_length(CrcLength::Bit8)
            .with_data_rate(DataRate::Kbps250)
            .with_pa_level(PaLevel::Low)
            .with_channel(200)
            .with_auto_ack(0xFF)
            .with_auto_retries(20, 7)
            .with_dynamic_payloads(0);
        assert_eq!(config.config_reg.into_bits(), 0x08);
        assert_eq!(config.rf_setup(), 0x22);
        assert_eq!(config.channel(), 125);
        assert_eq!(config.auto_ack(), 0x3F);
        assert_eq!(config.auto_retry_delay(), 15);
        assert_eq!(config.auto_retry_count(), 7);
        assert_eq!(config.dynamic_payloads(), 0);
    }

    #[test]
    fn pipe_addresses() {
        let config = RadioConfig::default()
            .with_tx_address(b"1Node")
            .with_rx_address(1, b"2Node")
            .with_rx_address(4, b"xNode")
            .with_rx_address(7, b"bogus")
            .with_rx_pipe(0, false);
        assert_eq!(config.tx_address(), *b"1Node");
        assert_eq!(config.rx_address(1), Some(*b"2Node"));
        assert_eq!(config.rx_address(4), Some(*b"xNode"));
        assert!(!config.is_rx_pipe_enabled(0));
        assert!(config.is_rx_pipe_enabled(1));
        assert!(config.is_rx_pipe_enabled(4));
        assert!(!config.is_rx_pipe_enabled(7));
        assert_eq!(config.rx_pipes(), 0x12);
    }
}
