use embedded_hal::spi::SpiDevice;

use crate::types::{Status, MAX_PAYLOAD_LEN};

/// The longest frame used by the nRF24L01 command set: 1 opcode + 32 payload bytes.
pub(crate) const BUF_LEN: usize = MAX_PAYLOAD_LEN + 1;

/// The SPI exchange primitive.
///
/// Each call performs exactly one full-duplex transfer over a single reusable
/// buffer. Byte 0 of each frame is the opcode going out and the STATUS byte
/// coming back.
pub(crate) struct Transport<SPI> {
    spi: SPI,
    buf: [u8; BUF_LEN],
    status: Status,
}

impl<SPI> Transport<SPI>
where
    SPI: SpiDevice,
{
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            buf: [0u8; BUF_LEN],
            status: Status::from_bits(0),
        }
    }

    /// The STATUS byte observed by the last successful exchange.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Send `command` followed by `len` dummy bytes.
    ///
    /// The `len` bytes clocked back are available from [`Transport::response()`].
    /// This is also used for commands that consist of 1 byte:
    /// ```ignore
    /// transport.read(commands::NOP, 0)?;
    /// ```
    pub fn read(&mut self, command: u8, len: usize) -> Result<Status, SPI::Error> {
        self.prepare(command);
        self.transfer(len + 1)
    }

    /// Send `command` followed by the given `data` bytes.
    pub fn write(&mut self, command: u8, data: &[u8]) -> Result<Status, SPI::Error> {
        self.prepare(command);
        self.buf[1..(data.len() + 1)].copy_from_slice(data);
        self.transfer(data.len() + 1)
    }

    /// The `len` bytes that followed the STATUS byte in the last exchange.
    pub fn response(&self, len: usize) -> &[u8] {
        &self.buf[1..(len + 1)]
    }

    fn prepare(&mut self, command: u8) {
        // the whole buffer is reset so no stale bytes leak into the next frame
        self.buf = [0u8; BUF_LEN];
        self.buf[0] = command;
    }

    fn transfer(&mut self, len: usize) -> Result<Status, SPI::Error> {
        debug_assert!(len <= BUF_LEN);
        #[cfg(feature = "defmt")]
        let command = self.buf[0];
        self.spi.transfer_in_place(&mut self.buf[..len])?;
        self.status = Status::from_bits(self.buf[0]);
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "SPI command {=u8:#x} ({=usize} bytes) -> {}",
            command,
            len,
            self.status
        );
        Ok(self.status)
    }
}
