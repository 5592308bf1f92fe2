//! # Application Layer Protocols
//!
//! The ThingSpeak REST API is plain HTTP/1.1, so this layer carries a single
//! protocol: a blocking [`http`] client that works with any type implementing
//! [`Connection`](crate::network::Connection).

/// HTTP client implementation.
///
/// Provides a small HTTP/1.1 client suitable for embedded systems,
/// supporting GET and POST with custom headers.
pub mod http;
