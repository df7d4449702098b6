//! A module to encapsulate all things related to radio operation.
pub mod prelude;

mod nrf24;
pub use nrf24::{
    commands, descriptor, mnemonics, registers, Nrf24, Nrf24Error, RegisterDescriptor,
    CE_HOLD_US, REGISTERS,
};

mod config;
pub use config::RadioConfig;

#[cfg(any(test, feature = "std"))]
mod timeout;
#[cfg(any(test, feature = "std"))]
pub use timeout::{TimeoutError, TimeoutSpi};
