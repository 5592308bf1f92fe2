//! Errors reported by the ThingSpeak client.
//!
//! Every variant carries the numeric status code used by the ThingSpeak device
//! libraries, so firmware that reports codes upstream (over a serial console, a
//! status LED pattern, an MQTT topic...) stays compatible with existing
//! dashboards. Positive codes are HTTP statuses, negative codes are raised
//! locally.

use crate::network::error::Error as NetworkError;

/// HTTP status of a successful exchange.
pub const OK_SUCCESS: i32 = 200;

/// An error from a ThingSpeak write or read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// HTTP 400: incorrect API key (or invalid server address).
    BadApiKey,
    /// HTTP 404: incorrect API key (or invalid server address).
    BadUrl,
    /// Any other non-200 HTTP status.
    Http(u16),
    /// Value is out of range or a string is longer than 255 bytes.
    OutOfRange,
    /// Field number is not within 1..=8.
    InvalidField,
    /// `write_fields` was called with nothing set.
    SetFieldNotCalled,
    /// Failed to connect to the server.
    ConnectFailed,
    /// Unexpected failure while talking to the server.
    UnexpectedFail,
    /// The response could not be parsed.
    BadResponse,
    /// Timed out waiting for the server to respond.
    Timeout,
    /// The point was not inserted, most likely because of the rate limit.
    NotInserted,
}

impl Error {
    /// Maps a non-200 HTTP status to an error.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Error::BadApiKey,
            404 => Error::BadUrl,
            other => Error::Http(other),
        }
    }

    /// The numeric status code for this error.
    pub fn code(&self) -> i32 {
        match self {
            Error::BadApiKey => 400,
            Error::BadUrl => 404,
            Error::Http(status) => i32::from(*status),
            Error::OutOfRange => -101,
            Error::InvalidField => -201,
            Error::SetFieldNotCalled => -210,
            Error::ConnectFailed => -301,
            Error::UnexpectedFail => -302,
            Error::BadResponse => -303,
            Error::Timeout => -304,
            Error::NotInserted => -401,
        }
    }
}

impl From<NetworkError> for Error {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::Timeout => Error::Timeout,
            NetworkError::ConnectionRefused | NetworkError::InvalidAddress => Error::ConnectFailed,
            NetworkError::ProtocolError | NetworkError::BufferOverflow => Error::BadResponse,
            NetworkError::NotOpen
            | NetworkError::WriteError
            | NetworkError::ReadError
            | NetworkError::ConnectionClosed => Error::UnexpectedFail,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::BadApiKey => f.write_str("bad API key (HTTP 400)"),
            Error::BadUrl => f.write_str("bad API key or URL (HTTP 404)"),
            Error::Http(status) => write!(f, "unexpected HTTP status {}", status),
            Error::OutOfRange => f.write_str("value out of range or longer than 255 bytes"),
            Error::InvalidField => f.write_str("field number must be 1 to 8"),
            Error::SetFieldNotCalled => f.write_str("no field set before writing"),
            Error::ConnectFailed => f.write_str("failed to connect to ThingSpeak"),
            Error::UnexpectedFail => f.write_str("unexpected failure talking to ThingSpeak"),
            Error::BadResponse => f.write_str("unable to parse response"),
            Error::Timeout => f.write_str("timed out waiting for ThingSpeak"),
            Error::NotInserted => f.write_str("point was not inserted"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::BadApiKey => defmt::write!(f, "BadApiKey"),
            Error::BadUrl => defmt::write!(f, "BadUrl"),
            Error::Http(status) => defmt::write!(f, "Http({=u16})", status),
            Error::OutOfRange => defmt::write!(f, "OutOfRange"),
            Error::InvalidField => defmt::write!(f, "InvalidField"),
            Error::SetFieldNotCalled => defmt::write!(f, "SetFieldNotCalled"),
            Error::ConnectFailed => defmt::write!(f, "ConnectFailed"),
            Error::UnexpectedFail => defmt::write!(f, "UnexpectedFail"),
            Error::BadResponse => defmt::write!(f, "BadResponse"),
            Error::Timeout => defmt::write!(f, "Timeout"),
            Error::NotInserted => defmt::write!(f, "NotInserted"),
        }
    }
}
