//! # ThingSpeak channel client
//!
//! Writes and reads ThingSpeak channel data over the public REST API:
//!
//! - **Writes** are form-encoded `POST /update` requests authenticated with the
//!   channel's write API key. The server answers with the new entry id, or `0`
//!   when it refused the point (usually the rate limit of one update every 15
//!   seconds on free accounts).
//! - **Reads** are `GET /channels/<id>/...` requests, authenticated with the read
//!   API key for private channels.
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
//! // One field at a time
//! // thingspeak.write_field(31461, 1, 23.5_f32, "WRITE_KEY")?;
//!
//! // Several fields in one update
//! thingspeak.set_field(1, 23.5_f32).unwrap();
//! thingspeak.set_field(2, "open").unwrap();
//! thingspeak.set_status("door sensor ok").unwrap();
//! // let entry_id = thingspeak.write_fields(31461, "WRITE_KEY")?;
//!
//! // let temperature = thingspeak.read_float_field(31461, 1, None)?;
//! ```

pub mod client;
pub mod error;
pub mod json;
pub mod update;
pub mod value;


pub use client::ThingSpeak;
pub use error::{Error, OK_SUCCESS};
pub use json::{FeedEntry, value_by_key};
pub use update::Update;
pub use value::FieldValue;

/// Public ThingSpeak API host.
pub const THINGSPEAK_HOST: &str = "api.thingspeak.com";
/// Plain HTTP port of the API.
pub const THINGSPEAK_PORT: u16 = 80;
/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("tslib-rs/", env!("CARGO_PKG_VERSION"));
/// Lowest field number in a channel.
pub const FIELD_NUM_MIN: u8 = 1;
/// Highest field number in a channel.
pub const FIELD_NUM_MAX: u8 = 8;
/// Longest value the server stores in a field, in bytes of UTF-8.
pub const FIELD_LENGTH_MAX: usize = 255;

pub(crate) const FIELD_COUNT: usize = FIELD_NUM_MAX as usize;

/// Where and how the client talks to ThingSpeak.
///
/// The defaults point at the public service; self-hosted ThingSpeak-compatible
/// servers only need a different `host` and `port`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options<'a> {
    /// Server host name, also sent as the `Host` header.
    pub host: &'a str,
    /// Server TCP port.
    pub port: u16,
    /// `User-Agent` header value.
    pub user_agent: &'a str,
}

impl Default for Options<'static> {
    fn default() -> Self {
        Self {
            host: THINGSPEAK_HOST,
            port: THINGSPEAK_PORT,
            user_agent: USER_AGENT,
        }
    }
}
