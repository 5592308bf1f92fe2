//! Text form of values written to channel fields.

use super::{Error, FIELD_LENGTH_MAX};
use core::fmt::Write as _;
use heapless::String;

/// Largest magnitude accepted for floating point values. Wider numbers should be
/// formatted by the caller and written as text.
pub const FLOAT_MAGNITUDE_MAX: f64 = 999_999_000_000.0;

/// Fractional digits used when formatting floating point values.
const FLOAT_PRECISION: usize = 5;

/// A validated field value: at most [`FIELD_LENGTH_MAX`] bytes of UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldValue(String<FIELD_LENGTH_MAX>);

impl FieldValue {
    /// The value as sent to the server.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the value is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<&str> for FieldValue {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        String::try_from(value)
            .map(FieldValue)
            .map_err(|_| Error::OutOfRange)
    }
}

macro_rules! integer_field_value {
    ($($ty:ty),+) => {
        $(
            impl TryFrom<$ty> for FieldValue {
                type Error = Error;

                fn try_from(value: $ty) -> Result<Self, Self::Error> {
                    let mut text = String::new();
                    write!(text, "{}", value).map_err(|_| Error::OutOfRange)?;
                    Ok(FieldValue(text))
                }
            }
        )+
    };
}

integer_field_value!(i32, i64, u32);

macro_rules! float_field_value {
    ($($ty:ty),+) => {
        $(
            impl TryFrom<$ty> for FieldValue {
                type Error = Error;

                fn try_from(value: $ty) -> Result<Self, Self::Error> {
                    let mut text = String::new();
                    if value.is_nan() {
                        text.push_str("NaN").map_err(|_| Error::OutOfRange)?;
                    } else if value.is_infinite() {
                        let inf = if value.is_sign_negative() { "-Inf" } else { "Inf" };
                        text.push_str(inf).map_err(|_| Error::OutOfRange)?;
                    } else if !(-FLOAT_MAGNITUDE_MAX..=FLOAT_MAGNITUDE_MAX).contains(&(value as f64)) {
                        return Err(Error::OutOfRange);
                    } else {
                        write!(text, "{:.*}", FLOAT_PRECISION, value).map_err(|_| Error::OutOfRange)?;
                    }
                    Ok(FieldValue(text))
                }
            }
        )+
    };
}

float_field_value!(f32, f64);

/// Checks a free-text value (status, tweet, timestamp...) against the field
/// length limit.
pub(crate) fn check_text(text: &str) -> Result<(), Error> {
    if text.len() > FIELD_LENGTH_MAX {
        return Err(Error::OutOfRange);
    }
    Ok(())
}

/// Parses the float text returned by a field read. `NaN`, `Inf` and `-Inf` are
/// valid results.
pub(crate) fn parse_float(text: &str) -> Result<f32, Error> {
    match text.trim() {
        "NaN" => Ok(f32::NAN),
        "Inf" => Ok(f32::INFINITY),
        "-Inf" => Ok(f32::NEG_INFINITY),
        other => other.parse().map_err(|_| Error::BadResponse),
    }
}

/// Parses the integer text returned by a field read.
pub(crate) fn parse_long(text: &str) -> Result<i64, Error> {
    text.trim().parse().map_err(|_| Error::BadResponse)
}
