//! The ThingSpeak client.

use super::error::OK_SUCCESS;
use super::json::{FeedEntry, value_by_key};
use super::update::{HEADERS_FALSE, UPDATE_BODY_LEN, Update, field_index};
use super::value::{FieldValue, parse_float, parse_long};
use super::{Error, FIELD_LENGTH_MAX, Options};
use crate::network::application::http::client::{
    Client, Header, MAX_BODY_LEN, MAX_HEADERS, Method, Request, Response,
};
use crate::network::{Close, Connect};
use core::fmt::Write as _;
use heapless::{String, Vec};

/// Text returned by raw reads.
pub type Body = String<MAX_BODY_LEN>;
/// Text of a single field, status or timestamp.
pub type Text = String<FIELD_LENGTH_MAX>;

const UPDATE_PATH: &str = "/update";
const API_KEY_HEADER: &str = "X-THINGSPEAKAPIKEY";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

const REMOTE_LEN: usize = 96;
const PATH_LEN: usize = 256;
const FIELD_BODY_LEN: usize = FIELD_LENGTH_MAX + 32;

/// Client for one ThingSpeak server.
///
/// Every write or read opens a fresh connection through the [`Connect`]
/// implementation, performs one HTTP exchange and closes it again. Values for
/// a multi-field update are held in a pending [`Update`] until
/// [`write_fields`](Self::write_fields) sends them.
pub struct ThingSpeak<'a, N: Connect> {
    network: N,
    options: Options<'a>,
    pending: Update,
    last_read_status: i32,
}

impl<N: Connect> ThingSpeak<'static, N> {
    /// A client for the public ThingSpeak service.
    pub fn new(network: N) -> Self {
        Self::with_options(network, Options::default())
    }
}

impl<'a, N: Connect> ThingSpeak<'a, N> {
    /// A client with custom server settings.
    pub fn with_options(network: N, options: Options<'a>) -> Self {
        Self {
            network,
            options,
            pending: Update::new(),
            last_read_status: OK_SUCCESS,
        }
    }

    /// The server settings in use.
    pub fn options(&self) -> &Options<'a> {
        &self.options
    }

    /// The underlying network stack.
    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    /// The multi-field update that the next [`write_fields`](Self::write_fields)
    /// will send.
    pub fn pending(&self) -> &Update {
        &self.pending
    }

    /// Writes a single field and returns the new entry id.
    ///
    /// The write API key selects the channel on the server side; `channel` is
    /// only used for logging. The pending multi-field update is left alone,
    /// unlike the Arduino ThingSpeak library where `writeField` also resets it.
    pub fn write_field<V>(
        &mut self,
        channel: u32,
        field: u8,
        value: V,
        write_key: &str,
    ) -> Result<u32, Error>
    where
        V: TryInto<FieldValue, Error = Error>,
    {
        let slot = field_index(field)?;
        let value = value.try_into()?;
        debug!("thingspeak: write_field channel {=u32} field {=u8}", channel, field);

        let mut body: String<FIELD_BODY_LEN> = String::new();
        write!(body, "field{}={}&{}", slot + 1, value.as_str(), HEADERS_FALSE)
            .map_err(|_| Error::OutOfRange)?;
        self.post_update(body.as_str(), write_key)
    }

    /// Sets a field of the pending multi-field update.
    pub fn set_field<V>(&mut self, field: u8, value: V) -> Result<(), Error>
    where
        V: TryInto<FieldValue, Error = Error>,
    {
        self.pending.set_field(field, value)
    }

    /// Sets the latitude of the pending update, in degrees (negative for south).
    pub fn set_latitude(&mut self, latitude: f32) {
        self.pending.set_latitude(latitude);
    }

    /// Sets the longitude of the pending update, in degrees (negative for west).
    pub fn set_longitude(&mut self, longitude: f32) {
        self.pending.set_longitude(longitude);
    }

    /// Sets the elevation of the pending update, in meters above sea level.
    pub fn set_elevation(&mut self, elevation: f32) {
        self.pending.set_elevation(elevation);
    }

    /// Sets the status message of the pending update.
    pub fn set_status(&mut self, status: &str) -> Result<(), Error> {
        self.pending.set_status(status)
    }

    /// Sets the Twitter account and message of the pending update.
    pub fn set_twitter_tweet(&mut self, twitter: &str, tweet: &str) -> Result<(), Error> {
        self.pending.set_twitter_tweet(twitter, tweet)
    }

    /// Sets the ISO 8601 created-at timestamp of the pending update.
    pub fn set_created_at(&mut self, created_at: &str) -> Result<(), Error> {
        self.pending.set_created_at(created_at)
    }

    /// Sends the pending multi-field update and returns the new entry id.
    ///
    /// The pending update is cleared whether or not the write succeeds.
    pub fn write_fields(&mut self, channel: u32, write_key: &str) -> Result<u32, Error> {
        if self.pending.is_empty() {
            warn!("thingspeak: write_fields called with nothing set");
            return Err(Error::SetFieldNotCalled);
        }
        debug!(
            "thingspeak: write_fields channel {=u32}, {=usize} bytes",
            channel,
            self.pending.content_length()
        );

        let mut body: String<UPDATE_BODY_LEN> = String::new();
        let encoded = self.pending.encode(&mut body);
        self.pending.clear();
        encoded?;
        self.post_update(body.as_str(), write_key)
    }

    /// Posts a caller-built form body, e.g. `field1=3&field4=on`, and returns
    /// the new entry id.
    ///
    /// `headers=false` is appended. The body is sent as given: values must
    /// already be in their wire form.
    pub fn write_raw(&mut self, channel: u32, post_message: &str, write_key: &str) -> Result<u32, Error> {
        debug!("thingspeak: write_raw channel {=u32}", channel);
        let mut body: String<UPDATE_BODY_LEN> = String::new();
        write!(body, "{}&{}", post_message, HEADERS_FALSE).map_err(|_| Error::OutOfRange)?;
        self.post_update(body.as_str(), write_key)
    }

    /// Reads the latest value of a field as text.
    pub fn read_string_field(&mut self, channel: u32, field: u8, read_key: Option<&str>) -> Result<Text, Error> {
        let slot = self.record(field_index(field))?;
        let mut suffix: String<24> = String::new();
        write!(suffix, "/fields/{}/last", slot + 1).map_err(|_| Error::OutOfRange)?;
        let body = self.read_raw(channel, &suffix, read_key)?;
        self.record(String::try_from(body.as_str()).map_err(|_| Error::BadResponse))
    }

    /// Reads the latest value of a field as a float. `NaN`, `Inf` and `-Inf`
    /// are valid results.
    pub fn read_float_field(&mut self, channel: u32, field: u8, read_key: Option<&str>) -> Result<f32, Error> {
        let text = self.read_string_field(channel, field, read_key)?;
        self.record(parse_float(&text))
    }

    /// Reads the latest value of a field as a 64-bit integer.
    pub fn read_long_field(&mut self, channel: u32, field: u8, read_key: Option<&str>) -> Result<i64, Error> {
        let text = self.read_string_field(channel, field, read_key)?;
        self.record(parse_long(&text))
    }

    /// Reads the latest value of a field as a 32-bit integer.
    pub fn read_int_field(&mut self, channel: u32, field: u8, read_key: Option<&str>) -> Result<i32, Error> {
        let value = self.read_long_field(channel, field, read_key)?;
        self.record(i32::try_from(value).map_err(|_| Error::OutOfRange))
    }

    /// Reads the status message of the latest entry. Empty when the entry has
    /// none.
    pub fn read_status(&mut self, channel: u32, read_key: Option<&str>) -> Result<Text, Error> {
        let body = self.read_raw(channel, "/feeds/last.txt?status=true", read_key)?;
        self.extract(&body, "status")
    }

    /// Reads the created-at timestamp of the latest entry. Empty when absent.
    pub fn read_created_at(&mut self, channel: u32, read_key: Option<&str>) -> Result<Text, Error> {
        let body = self.read_raw(channel, "/feeds/last.txt", read_key)?;
        self.extract(&body, "created_at")
    }

    /// Reads every field, the status and the location of the latest entry in
    /// one request.
    pub fn read_multiple_fields(&mut self, channel: u32, read_key: Option<&str>) -> Result<FeedEntry, Error> {
        let body = self.read_raw(channel, "/feeds/last.json?status=true&location=true", read_key)?;
        self.record(FeedEntry::parse(&body))
    }

    /// Reads `/channels/<channel><url_suffix>` and returns the body.
    pub fn read_raw(&mut self, channel: u32, url_suffix: &str, read_key: Option<&str>) -> Result<Body, Error> {
        let result = self.fetch(channel, url_suffix, read_key);
        self.record(result)
    }

    /// Outcome of the most recent read: `200` on success, otherwise the
    /// [`Error::code`] of the failure.
    pub fn last_read_status(&self) -> i32 {
        self.last_read_status
    }

    fn fetch(&mut self, channel: u32, url_suffix: &str, read_key: Option<&str>) -> Result<Body, Error> {
        let mut path: String<PATH_LEN> = String::new();
        write!(path, "/channels/{}{}", channel, url_suffix).map_err(|_| Error::OutOfRange)?;
        debug!("thingspeak: GET {=str}", path.as_str());

        let mut headers = Vec::new();
        push_header(&mut headers, "User-Agent", self.options.user_agent)?;
        if let Some(key) = read_key {
            push_header(&mut headers, API_KEY_HEADER, key)?;
        }

        let response = self.exchange(&Request {
            method: Method::Get,
            host: self.options.host,
            path: &path,
            headers,
            body: None,
        })?;
        if response.status_code != 200 {
            return Err(Error::from_status(response.status_code));
        }
        String::from_utf8(response.body).map_err(|_| Error::BadResponse)
    }

    fn post_update(&mut self, body: &str, write_key: &str) -> Result<u32, Error> {
        trace!("thingspeak: POST {=str}", body);

        let mut headers = Vec::new();
        push_header(&mut headers, "User-Agent", self.options.user_agent)?;
        push_header(&mut headers, API_KEY_HEADER, write_key)?;
        push_header(&mut headers, "Content-Type", FORM_CONTENT_TYPE)?;

        let response = self.exchange(&Request {
            method: Method::Post,
            host: self.options.host,
            path: UPDATE_PATH,
            headers,
            body: Some(body.as_bytes()),
        })?;
        if response.status_code != 200 {
            warn!("thingspeak: update rejected with HTTP {=u16}", response.status_code);
            return Err(Error::from_status(response.status_code));
        }

        let text = response.body_str().map_err(|_| Error::BadResponse)?;
        let entry_id = parse_long(text)?;
        if entry_id == 0 {
            warn!("thingspeak: point not inserted");
            return Err(Error::NotInserted);
        }
        debug!("thingspeak: entry {=i64} created", entry_id);
        u32::try_from(entry_id).map_err(|_| Error::BadResponse)
    }

    /// One request/response round trip on a fresh connection.
    fn exchange(&mut self, request: &Request) -> Result<Response, Error> {
        let mut remote: String<REMOTE_LEN> = String::new();
        write!(remote, "{}:{}", self.options.host, self.options.port).map_err(|_| Error::ConnectFailed)?;

        let connection = self.network.connect(&remote).map_err(|_| {
            warn!("thingspeak: connect to {=str} failed", remote.as_str());
            Error::ConnectFailed
        })?;

        let mut client = Client::new(connection);
        let result = client.request(request);
        if client.into_inner().close().is_err() {
            trace!("thingspeak: close failed");
        }
        result.map_err(Error::from)
    }

    fn extract(&mut self, body: &str, key: &str) -> Result<Text, Error> {
        let value = value_by_key(body, key).unwrap_or("");
        self.record(String::try_from(value).map_err(|_| Error::BadResponse))
    }

    fn record<T>(&mut self, result: Result<T, Error>) -> Result<T, Error> {
        self.last_read_status = match &result {
            Ok(_) => OK_SUCCESS,
            Err(err) => err.code(),
        };
        result
    }
}

impl<N: Connect + core::fmt::Debug> core::fmt::Debug for ThingSpeak<'_, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ThingSpeak")
            .field("network", &self.network)
            .field("options", &self.options)
            .field("pending", &self.pending)
            .field("last_read_status", &self.last_read_status)
            .finish()
    }
}

fn push_header(headers: &mut Vec<Header, MAX_HEADERS>, name: &str, value: &str) -> Result<(), Error> {
    let header = Header::new(name, value).map_err(|_| Error::OutOfRange)?;
    headers.push(header).map_err(|_| Error::OutOfRange)
}
