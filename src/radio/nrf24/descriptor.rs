use core::fmt::{Display, Formatter, Result};

/// Static metadata about a single register of the nRF24L01.
///
/// The `mask` describes which bits of the register are meaningful. It is
/// informational only; the driver never applies it to read or written values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterDescriptor {
    /// The datasheet name (`"n/a"` for reserved addresses).
    pub name: &'static str,
    /// The register's address. This always equals its index in [`REGISTERS`].
    pub address: u8,
    /// The register's length in bytes (1 or 5).
    pub size: u8,
    /// The bits of the register that are meaningful.
    pub mask: u8,
}

const fn reg(name: &'static str, address: u8, size: u8, mask: u8) -> RegisterDescriptor {
    RegisterDescriptor {
        name,
        address,
        size,
        mask,
    }
}

/// The register map of the nRF24L01, indexed by address.
pub static REGISTERS: [RegisterDescriptor; 32] = [
    reg("CONFIG", 0x00, 1, 0xFF),
    reg("EN_AA", 0x01, 1, 0x3F),
    reg("EN_RXADDR", 0x02, 1, 0x3F),
    reg("SETUP_AW", 0x03, 1, 0x03),
    reg("SETUP_RETR", 0x04, 1, 0x0F),
    reg("RF_CH", 0x05, 1, 0x7F),
    reg("RF_SETUP", 0x06, 1, 0xFF),
    reg("STATUS", 0x07, 1, 0x7F),
    reg("OBSERVE_TX", 0x08, 1, 0xFF),
    reg("RPD", 0x09, 1, 0x01),
    reg("RX_ADDR_P0", 0x0A, 5, 0xFF),
    reg("RX_ADDR_P1", 0x0B, 5, 0xFF),
    reg("RX_ADDR_P2", 0x0C, 1, 0xFF),
    reg("RX_ADDR_P3", 0x0D, 1, 0xFF),
    reg("RX_ADDR_P4", 0x0E, 1, 0xFF),
    reg("RX_ADDR_P5", 0x0F, 1, 0xFF),
    reg("TX_ADDR", 0x10, 5, 0xFF),
    reg("RX_PW_P0", 0x11, 1, 0x3F),
    reg("RX_PW_P1", 0x12, 1, 0x3F),
    reg("RX_PW_P2", 0x13, 1, 0x3F),
    reg("RX_PW_P3", 0x14, 1, 0x3F),
    reg("RX_PW_P4", 0x15, 1, 0x3F),
    reg("RX_PW_P5", 0x16, 1, 0x3F),
    reg("FIFO_STATUS", 0x17, 1, 0x73),
    reg("n/a", 0x18, 1, 0xFF),
    reg("n/a", 0x19, 1, 0xFF),
    reg("n/a", 0x1A, 1, 0xFF),
    reg("n/a", 0x1B, 1, 0xFF),
    reg("DYNPD", 0x1C, 1, 0x3F),
    reg("FEATURE", 0x1D, 1, 0x07),
    reg("n/a", 0x1E, 1, 0xFF),
    reg("n/a", 0x1F, 1, 0xFF),
];

/// Look up the [`RegisterDescriptor`] for a given `address`.
///
/// Returns [`None`] if `address` is greater than 31.
pub fn descriptor(address: u8) -> Option<&'static RegisterDescriptor> {
    REGISTERS.get(address as usize)
}

impl Display for RegisterDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "0x{:02X} {} ({} byte{})",
            self.address,
            self.name,
            self.size,
            if self.size > 1 { "s" } else { "" }
        )
    }
}

#[cfg(test)]
mod test {
    use super::{descriptor, REGISTERS};
    use crate::radio::registers;
    extern crate std;
    use std::{format, string::String};

    #[test]
    fn address_matches_index() {
        for (index, reg) in REGISTERS.iter().enumerate() {
            assert_eq!(reg.address as usize, index);
            assert!(reg.size == 1 || reg.size == 5);
        }
    }

    #[test]
    fn multi_byte_registers() {
        let wide: std::vec::Vec<&str> = REGISTERS
            .iter()
            .filter(|reg| reg.size == 5)
            .map(|reg| reg.name)
            .collect();
        assert_eq!(wide, ["RX_ADDR_P0", "RX_ADDR_P1", "TX_ADDR"]);
    }

    #[test]
    fn lookup_out_of_range() {
        assert!(descriptor(registers::MAX_ADDRESS).is_some());
        assert!(descriptor(32).is_none());
        assert!(descriptor(0xFF).is_none());
        assert_eq!(descriptor(0x17).map(|r| r.mask), Some(0x73));
    }

    #[test]
    fn display_descriptor() {
        assert_eq!(
            format!("{}", REGISTERS[0x10]),
            String::from("0x10 TX_ADDR (5 bytes)")
        );
        assert_eq!(
            format!("{}", REGISTERS[0x05]),
            String::from("0x05 RF_CH (1 byte)")
        );
    }
}
