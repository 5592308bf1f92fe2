//! HTTP/1.1 client for embedded systems.
//!
//! A blocking, allocation-free client: the request head is serialized into a
//! fixed-size buffer, the body is written straight from the caller's slice, and
//! the response is framed by `Content-Length`, chunked transfer coding, or the
//! peer closing the connection.
//!
//! Every request carries `Connection: close`; the connection is meant to be
//! used for a single exchange and then handed back with
//! [`Client::into_inner`].
//!
//! ```rust,no_run
//! use libthingspeak::network::application::http::{Client, Method, Request};
//! # use libthingspeak::network::{Close, Connection, Read, Write};
//! # use libthingspeak::network::error::Error;
//! # struct MockConnection;
//! # impl Connection for MockConnection {}
//! # impl Read for MockConnection {
//! #     type Error = Error;
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for MockConnection {
//! #     type Error = Error;
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Close for MockConnection {
//! #     type Error = Error;
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//!
//! let mut client = Client::new(MockConnection);
//!
//! let request = Request {
//!     method: Method::Get,
//!     host: "api.thingspeak.com",
//!     path: "/channels/9/fields/1/last",
//!     headers: heapless::Vec::new(),
//!     body: None,
//! };
//!
//! // let response = client.request(&request)?;
//! ```

/// HTTP client implementation and supporting types.
pub mod client;

pub use client::{Client, Header, Method, Request, Response, encode_head};
