//! Pending multi-field channel update.
//!
//! Values are collected with the `set_*` methods and sent in one POST by
//! [`ThingSpeak::write_fields`](super::ThingSpeak::write_fields). The body is a
//! form-encoded string such as
//!
//! ```text
//! field1=21.50000&field3=on&lat=52.52000&status=ok&headers=false
//! ```
//!
//! Values are concatenated as given, without percent-encoding.

use super::value::{FieldValue, check_text};
use super::{Error, FIELD_COUNT, FIELD_LENGTH_MAX, FIELD_NUM_MAX, FIELD_NUM_MIN};
use core::fmt::{self, Write as _};
use heapless::String;

/// Capacity needed for the largest possible update body.
pub const UPDATE_BODY_LEN: usize = 4096;

/// Suffix asking the server to answer with a bare entry id.
pub(crate) const HEADERS_FALSE: &str = "headers=false";

/// Fields, location and metadata waiting to be written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    fields: [FieldValue; FIELD_COUNT],
    latitude: Option<f32>,
    longitude: Option<f32>,
    elevation: Option<f32>,
    status: String<FIELD_LENGTH_MAX>,
    twitter: String<FIELD_LENGTH_MAX>,
    tweet: String<FIELD_LENGTH_MAX>,
    created_at: String<FIELD_LENGTH_MAX>,
}

impl Update {
    /// An update with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets field `field` (1..=8). An empty value clears the field.
    pub fn set_field<V>(&mut self, field: u8, value: V) -> Result<(), Error>
    where
        V: TryInto<FieldValue, Error = Error>,
    {
        let slot = field_index(field)?;
        self.fields[slot] = value.try_into()?;
        Ok(())
    }

    /// The value currently set for `field`, if any.
    pub fn field(&self, field: u8) -> Option<&str> {
        let slot = field_index(field).ok()?;
        let value = &self.fields[slot];
        (!value.is_empty()).then(|| value.as_str())
    }

    /// Latitude in degrees north; negative for south. `NaN` clears it.
    pub fn set_latitude(&mut self, latitude: f32) {
        self.latitude = unless_nan(latitude);
    }

    /// Longitude in degrees east; negative for west. `NaN` clears it.
    pub fn set_longitude(&mut self, longitude: f32) {
        self.longitude = unless_nan(longitude);
    }

    /// Elevation in meters above sea level. `NaN` clears it.
    pub fn set_elevation(&mut self, elevation: f32) {
        self.elevation = unless_nan(elevation);
    }

    /// Status message stored with the entry.
    pub fn set_status(&mut self, status: &str) -> Result<(), Error> {
        check_text(status)?;
        self.status = copy_text(status)?;
        Ok(())
    }

    /// Twitter account and message for a ThingTweet update. Both are stored
    /// together or not at all.
    pub fn set_twitter_tweet(&mut self, twitter: &str, tweet: &str) -> Result<(), Error> {
        check_text(twitter)?;
        check_text(tweet)?;
        self.twitter = copy_text(twitter)?;
        self.tweet = copy_text(tweet)?;
        Ok(())
    }

    /// ISO 8601 timestamp for the entry, e.g. `2017-01-12 13:22:54-05`.
    ///
    /// Only the length is checked here; the server rejects malformed
    /// timestamps.
    pub fn set_created_at(&mut self, created_at: &str) -> Result<(), Error> {
        check_text(created_at)?;
        self.created_at = copy_text(created_at)?;
        Ok(())
    }

    /// Whether nothing has been set.
    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(FieldValue::is_empty)
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.elevation.is_none()
            && self.status.is_empty()
            && self.twitter.is_empty()
            && self.tweet.is_empty()
            && self.created_at.is_empty()
    }

    /// Length of the encoded body, `0` when nothing is set.
    pub fn content_length(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let mut counter = Counter(0);
        // Counting never fails.
        let _ = self.write_body(&mut counter);
        counter.0
    }

    /// Drops everything that was set.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Encodes the update as a form body, including the trailing
    /// `headers=false`.
    pub fn encode<const N: usize>(&self, out: &mut String<N>) -> Result<(), Error> {
        out.clear();
        if self.is_empty() {
            return Err(Error::SetFieldNotCalled);
        }
        self.write_body(out).map_err(|_| Error::OutOfRange)
    }

    fn write_body<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let mut sep = Separator::default();

        for (slot, value) in self.fields.iter().enumerate() {
            if !value.is_empty() {
                sep.write(out)?;
                write!(out, "field{}={}", slot + 1, value.as_str())?;
            }
        }

        let location = [
            ("lat", self.latitude),
            ("long", self.longitude),
            ("elevation", self.elevation),
        ];
        for (key, value) in location {
            if let Some(value) = value {
                sep.write(out)?;
                write!(out, "{}={:.5}", key, value)?;
            }
        }

        let texts = [
            ("status", &self.status),
            ("twitter", &self.twitter),
            ("tweet", &self.tweet),
            ("created_at", &self.created_at),
        ];
        for (key, value) in texts {
            if !value.is_empty() {
                sep.write(out)?;
                write!(out, "{}={}", key, value)?;
            }
        }

        sep.write(out)?;
        out.write_str(HEADERS_FALSE)
    }
}

/// Zero-based slot for a one-based field number.
pub(crate) fn field_index(field: u8) -> Result<usize, Error> {
    if !(FIELD_NUM_MIN..=FIELD_NUM_MAX).contains(&field) {
        return Err(Error::InvalidField);
    }
    Ok(usize::from(field - FIELD_NUM_MIN))
}

fn unless_nan(value: f32) -> Option<f32> {
    (!value.is_nan()).then_some(value)
}

fn copy_text(text: &str) -> Result<String<FIELD_LENGTH_MAX>, Error> {
    String::try_from(text).map_err(|_| Error::OutOfRange)
}

/// Emits `&` before every item but the first.
#[derive(Default)]
struct Separator {
    started: bool,
}

impl Separator {
    fn write<W: fmt::Write>(&mut self, out: &mut W) -> fmt::Result {
        if self.started {
            out.write_char('&')?;
        }
        self.started = true;
        Ok(())
    }
}

struct Counter(usize);

impl fmt::Write for Counter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}
