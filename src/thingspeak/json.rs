//! Value extraction from ThingSpeak feed responses.

use super::update::field_index;
use super::{Error, FIELD_LENGTH_MAX};
use heapless::String;
use serde::Deserialize;

/// Capacity for timestamps and coordinates in a [`FeedEntry`].
const SHORT_TEXT_LEN: usize = 32;

/// Returns the string value of the first `"key":"value"` pair in `text`.
///
/// This is a plain substring search, not a JSON parser: escaped quotes end the
/// value early and keys nested anywhere in the text match. `None` when the key
/// is absent, its value is not a string (`null`, a number...), or the closing
/// quote is missing.
pub fn value_by_key<'t>(text: &'t str, key: &str) -> Option<&'t str> {
    if text.is_empty() {
        return None;
    }
    let start = text.match_indices(key).find_map(|(at, _)| {
        let after = at + key.len();
        (text[..at].ends_with('"') && text[after..].starts_with("\":\"")).then_some(after + 3)
    })?;
    let len = text[start..].find('"')?;
    Some(&text[start..start + len])
}

/// The latest entry of a channel, as returned by `feeds/last.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedEntry {
    /// Server timestamp of the entry.
    pub created_at: Option<String<SHORT_TEXT_LEN>>,
    /// Sequential id of the entry within the channel.
    pub entry_id: u32,
    /// Field 1
    pub field1: Option<String<FIELD_LENGTH_MAX>>,
    /// Field 2
    pub field2: Option<String<FIELD_LENGTH_MAX>>,
    /// Field 3
    pub field3: Option<String<FIELD_LENGTH_MAX>>,
    /// Field 4
    pub field4: Option<String<FIELD_LENGTH_MAX>>,
    /// Field 5
    pub field5: Option<String<FIELD_LENGTH_MAX>>,
    /// Field 6
    pub field6: Option<String<FIELD_LENGTH_MAX>>,
    /// Field 7
    pub field7: Option<String<FIELD_LENGTH_MAX>>,
    /// Field 8
    pub field8: Option<String<FIELD_LENGTH_MAX>>,
    /// Status message, when requested with `status=true`.
    pub status: Option<String<FIELD_LENGTH_MAX>>,
    /// Latitude, when requested with `location=true`.
    pub latitude: Option<String<SHORT_TEXT_LEN>>,
    /// Longitude, when requested with `location=true`.
    pub longitude: Option<String<SHORT_TEXT_LEN>>,
    /// Elevation, when requested with `location=true`.
    pub elevation: Option<String<SHORT_TEXT_LEN>>,
}

impl FeedEntry {
    /// Decodes an entry from a JSON response body.
    pub fn parse(body: &str) -> Result<Self, Error> {
        serde_json_core::from_str::<FeedEntry>(body)
            .map(|(entry, _)| entry)
            .map_err(|_| Error::BadResponse)
    }

    /// Value of field `field` (1..=8), `None` when it is empty or out of range.
    pub fn field(&self, field: u8) -> Option<&str> {
        let value = match field_index(field).ok()? {
            0 => &self.field1,
            1 => &self.field2,
            2 => &self.field3,
            3 => &self.field4,
            4 => &self.field5,
            5 => &self.field6,
            6 => &self.field7,
            _ => &self.field8,
        };
        value.as_deref().filter(|text| !text.is_empty())
    }
}
