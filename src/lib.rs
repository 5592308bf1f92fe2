//! # libthingspeak - ThingSpeak client for IoT devices
//!
//! A `no_std` Rust client that lets any IoT device write measurements to, and
//! read them back from, [ThingSpeak](https://thingspeak.com) channels.
//!
//! ## Features
//!
//! - Single-field and multi-field channel updates, with location, status,
//!   ThingTweet and created-at metadata
//! - Reads of the latest field values as text, float or integer, of the latest
//!   status and timestamp, or of the whole latest entry
//! - Local validation of field numbers and value lengths before anything goes
//!   on the wire
//! - Numeric status codes compatible with the ThingSpeak device libraries
//! - A small blocking HTTP/1.1 client with fixed-size buffers
//! - Transport agnostic: bring your own TCP stack through the
//!   [`network::Connect`] trait
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libthingspeak = "0.1.0"
//! ```
//!
//! ### Writing a measurement
//!
//! ```rust,no_run
//! use libthingspeak::thingspeak::ThingSpeak;
//! # use libthingspeak::network::{Close, Connect, Connection, Read, Write};
//! # use libthingspeak::network::error::Error;
//! # struct Socket;
//! # impl Connection for Socket {}
//! # impl Read for Socket {
//! #     type Error = Error;
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for Socket {
//! #     type Error = Error;
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Close for Socket {
//! #     type Error = Error;
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct Stack;
//! # impl Connect for Stack {
//! #     type Connection = Socket;
//! #     type Error = Error;
//! #     fn connect(&mut self, _remote: &str) -> Result<Socket, Error> { Ok(Socket) }
//! # }
//!
//! let mut thingspeak = ThingSpeak::new(Stack);
//!
//! match thingspeak.write_field(31461, 1, 23.5_f32, "XXXXXXXXXXXXXXXX") {
//!     Ok(entry_id) => { /* stored as entry `entry_id` */ }
//!     Err(err) => { let _code = err.code(); /* e.g. -401 when rate limited */ }
//! }
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers with a TCP/IP stack (ESP32, RP2040 + WiFi, ...)
//! - Linux-based IoT gateways (Raspberry Pi, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (`std::error::Error` impls)
//! - `defmt`: Enable defmt logging and `defmt::Format` for error types

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Network abstraction layer: transport traits and the HTTP client.
///
/// The platform implements the traits in this module for its TCP stack; the
/// ThingSpeak client builds on top of them.
pub mod network;

/// ThingSpeak channel writes and reads.
pub mod thingspeak;
