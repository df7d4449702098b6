#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`Nrf24::new()`](fn@crate::radio::Nrf24::new)
//! - [`Nrf24::init()`](radio/struct.Nrf24.html#method.init)
//! - [`Nrf24::receive()`](radio/struct.Nrf24.html#method.receive)
//! - [`Nrf24::transmit()`](radio/struct.Nrf24.html#method.transmit)
//! - [`Nrf24::deactivate_ce()`](radio/struct.Nrf24.html#method.deactivate_ce)
//! - [`Nrf24::process_state()`](radio/struct.Nrf24.html#method.process_state)
//! - [`Nrf24::read_rx_payload()`](radio/struct.Nrf24.html#method.read_rx_payload)
//! - [`Nrf24::write_tx_payload()`](radio/struct.Nrf24.html#method.write_tx_payload)
//! - [`Nrf24::open_tx_pipe()`](radio/struct.Nrf24.html#method.open_tx_pipe)
//! - [`Nrf24::open_rx_pipe()`](radio/struct.Nrf24.html#method.open_rx_pipe)
//! - [`Nrf24::close_rx_pipe()`](radio/struct.Nrf24.html#method.close_rx_pipe)
//! - [`Nrf24::set_channel()`](radio/struct.Nrf24.html#method.set_channel)
//! - [`Nrf24::get_channel()`](radio/struct.Nrf24.html#method.get_channel)
//!
//! ## Advanced API
//!
//! - [`Nrf24::read_register()`](radio/struct.Nrf24.html#method.read_register)
//! - [`Nrf24::write_register()`](radio/struct.Nrf24.html#method.write_register)
//! - [`Nrf24::read_rx_payload_width()`](radio/struct.Nrf24.html#method.read_rx_payload_width)
//! - [`Nrf24::read_state()`](radio/struct.Nrf24.html#method.read_state)
//! - [`Nrf24::get_last_state()`](radio/struct.Nrf24.html#method.get_last_state)
//! - [`Nrf24::clear_status_flags()`](radio/struct.Nrf24.html#method.clear_status_flags)
//! - [`Nrf24::get_fifo_state()`](radio/struct.Nrf24.html#method.get_fifo_state)
//! - [`Nrf24::flush_rx()`](radio/struct.Nrf24.html#method.flush_rx)
//! - [`Nrf24::flush_tx()`](radio/struct.Nrf24.html#method.flush_tx)
//! - [`Nrf24::get_tx_address()`](radio/struct.Nrf24.html#method.get_tx_address)
//! - [`Nrf24::get_rx_address()`](radio/struct.Nrf24.html#method.get_rx_address)
//! - [`Nrf24::rpd()`](fn@crate::radio::Nrf24::rpd)
//! - [`Nrf24::get_last_arc()`](fn@crate::radio::Nrf24::get_last_arc)
//! - [`Nrf24::get_pa_level()`](fn@crate::radio::Nrf24::get_pa_level)
//! - [`Nrf24::get_data_rate()`](fn@crate::radio::Nrf24::get_data_rate)
//! - [`descriptor()`](fn@crate::descriptor)
//!
//! ## Configuration API
//!
//! - [`Nrf24::with_config()`](radio/struct.Nrf24.html#method.with_config)
//! - [`RadioConfig`](struct@crate::radio::RadioConfig)
//!
#![no_std]

mod types;
pub use types::{
    ByteBuf, CrcLength, DataRate, Event, FifoState, PaLevel, Payload, RegisterValue, Status,
    MAX_PAYLOAD_LEN, MAX_REGISTER_LEN,
};
pub mod radio;
pub use radio::{descriptor, RegisterDescriptor, REGISTERS};
