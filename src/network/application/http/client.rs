use crate::network::Connection;
use crate::network::error::Error;
use core::fmt::Write as _;
use heapless::{String, Vec};

/// Maximum number of response headers kept in [`Response::headers`].
pub const MAX_HEADERS: usize = 16;
/// Maximum header name length.
pub const MAX_HEADER_NAME_LEN: usize = 64;
/// Maximum header value length.
pub const MAX_HEADER_VALUE_LEN: usize = 256;
/// Capacity of the serialized request head (request line and headers).
pub const MAX_HEAD_LEN: usize = 1024;
/// Capacity of a response body.
pub const MAX_BODY_LEN: usize = 2048;

/// Longest status, header or chunk-size line accepted from the server.
const MAX_LINE_LEN: usize = 1024;
const READ_CHUNK: usize = 256;
const DEFAULT_USER_AGENT: &str = concat!("libthingspeak/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String<MAX_HEADER_NAME_LEN>,
    pub value: String<MAX_HEADER_VALUE_LEN>,
}

impl Header {
    /// Builds a header, failing with [`Error::BufferOverflow`] when either part
    /// exceeds its capacity.
    pub fn new(name: &str, value: &str) -> Result<Self, Error> {
        Ok(Self {
            name: String::try_from(name).map_err(|_| Error::BufferOverflow)?,
            value: String::try_from(value).map_err(|_| Error::BufferOverflow)?,
        })
    }
}

#[derive(Debug)]
pub struct Request<'a> {
    pub method: Method,
    /// Value of the `Host` header.
    pub host: &'a str,
    /// Origin-form target, including any query string.
    pub path: &'a str,
    pub headers: Vec<Header, MAX_HEADERS>,
    pub body: Option<&'a [u8]>,
}

#[derive(Debug)]
pub struct Response {
    pub status_code: u16,
    pub headers: Vec<Header, MAX_HEADERS>,
    pub body: Vec<u8, MAX_BODY_LEN>,
}

impl Response {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|header| header.name.eq_ignore_ascii_case(name))
            .map(|header| header.value.as_str())
    }

    /// The body as UTF-8 text.
    pub fn body_str(&self) -> Result<&str, Error> {
        core::str::from_utf8(&self.body).map_err(|_| Error::ProtocolError)
    }
}

/// Serializes the request line and headers of `request` into `out`.
///
/// `Host` and `Connection: close` are always emitted. A `User-Agent` is added
/// when the caller did not supply one, and `Content-Length` whenever the
/// request carries a body.
pub fn encode_head<const N: usize>(request: &Request, out: &mut String<N>) -> Result<(), Error> {
    out.clear();
    write!(
        out,
        "{} {} HTTP/1.1\r\nHost: {}\r\n",
        request.method.as_str(),
        request.path,
        request.host
    )
    .map_err(|_| Error::BufferOverflow)?;

    let mut has_user_agent = false;
    for header in &request.headers {
        if header.name.eq_ignore_ascii_case("User-Agent") {
            has_user_agent = true;
        }
        write!(out, "{}: {}\r\n", header.name, header.value).map_err(|_| Error::BufferOverflow)?;
    }
    if !has_user_agent {
        write!(out, "User-Agent: {}\r\n", DEFAULT_USER_AGENT).map_err(|_| Error::BufferOverflow)?;
    }

    out.push_str("Connection: close\r\n")
        .map_err(|_| Error::BufferOverflow)?;
    if let Some(body) = request.body {
        write!(out, "Content-Length: {}\r\n", body.len()).map_err(|_| Error::BufferOverflow)?;
    }
    out.push_str("\r\n").map_err(|_| Error::BufferOverflow)
}

#[derive(Debug)]
pub struct Client<C: Connection> {
    connection: C,
}

impl<C: Connection> Client<C> {
    pub fn new(connection: C) -> Self {
        Self { connection }
    }

    /// Gives the connection back, e.g. to close it.
    pub fn into_inner(self) -> C {
        self.connection
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    /// Sends `request` and blocks until the full response has been received.
    pub fn request(&mut self, request: &Request) -> Result<Response, Error> {
        let mut head: String<MAX_HEAD_LEN> = String::new();
        encode_head(request, &mut head)?;

        trace!("http: {=str} {=str}", request.method.as_str(), request.path);
        self.write_all(head.as_bytes())?;
        if let Some(body) = request.body {
            self.write_all(body)?;
        }
        self.connection.flush().map_err(write_error)?;

        let mut reader = Reader::new(&mut self.connection);
        let mut line: Vec<u8, MAX_LINE_LEN> = Vec::new();

        if !reader.read_line(&mut line)? {
            return Err(Error::ConnectionClosed);
        }
        let status_code = parse_status_line(&line)?;

        let mut headers: Vec<Header, MAX_HEADERS> = Vec::new();
        let mut content_length: Option<usize> = None;
        let mut chunked = false;
        loop {
            if !reader.read_line(&mut line)? {
                return Err(Error::ProtocolError);
            }
            if line.is_empty() {
                break;
            }
            let text = core::str::from_utf8(&line).map_err(|_| Error::ProtocolError)?;
            let (name, value) = text.split_once(':').ok_or(Error::ProtocolError)?;
            let (name, value) = (name.trim(), value.trim());

            if name.eq_ignore_ascii_case("Content-Length") {
                content_length = Some(value.parse().map_err(|_| Error::ProtocolError)?);
            } else if name.eq_ignore_ascii_case("Transfer-Encoding") {
                chunked = value
                    .rsplit(',')
                    .next()
                    .is_some_and(|coding| coding.trim().eq_ignore_ascii_case("chunked"));
            }

            // Headers beyond our capacity are dropped; framing has already been
            // picked out above.
            match Header::new(name, value) {
                Ok(header) => {
                    if headers.push(header).is_err() {
                        warn!("http: dropping header {=str}", name);
                    }
                }
                Err(_) => warn!("http: header {=str} too long, dropped", name),
            }
        }

        let mut body: Vec<u8, MAX_BODY_LEN> = Vec::new();
        if has_body(status_code) {
            if chunked {
                reader.read_chunked(&mut body)?;
            } else if let Some(len) = content_length {
                reader.read_exact(len, &mut body)?;
            } else {
                reader.read_to_end(&mut body)?;
            }
        }

        trace!("http: status {=u16}, {=usize} body bytes", status_code, body.len());
        Ok(Response {
            status_code,
            headers,
            body,
        })
    }

    fn write_all(&mut self, mut data: &[u8]) -> Result<(), Error> {
        while !data.is_empty() {
            let n = self.connection.write(data).map_err(write_error)?;
            if n == 0 {
                return Err(Error::WriteError);
            }
            data = &data[n..];
        }
        Ok(())
    }
}

fn has_body(status_code: u16) -> bool {
    !matches!(status_code, 100..=199 | 204 | 304)
}

fn parse_status_line(line: &[u8]) -> Result<u16, Error> {
    let text = core::str::from_utf8(line).map_err(|_| Error::ProtocolError)?;
    let mut parts = text.splitn(3, ' ');
    let version = parts.next().ok_or(Error::ProtocolError)?;
    if !version.starts_with("HTTP/") {
        return Err(Error::ProtocolError);
    }
    parts
        .next()
        .ok_or(Error::ProtocolError)?
        .parse::<u16>()
        .map_err(|_| Error::ProtocolError)
}

fn read_error<E: Into<Error>>(err: E) -> Error {
    match err.into() {
        Error::Timeout => Error::Timeout,
        _ => Error::ReadError,
    }
}

fn write_error<E: Into<Error>>(err: E) -> Error {
    match err.into() {
        Error::Timeout => Error::Timeout,
        _ => Error::WriteError,
    }
}

/// Buffered reader over a connection, used to split the response into lines
/// and body bytes.
struct Reader<'c, C: Connection> {
    connection: &'c mut C,
    buf: [u8; READ_CHUNK],
    start: usize,
    end: usize,
    eof: bool,
}

impl<'c, C: Connection> Reader<'c, C> {
    fn new(connection: &'c mut C) -> Self {
        Self {
            connection,
            buf: [0; READ_CHUNK],
            start: 0,
            end: 0,
            eof: false,
        }
    }

    /// Returns `false` once the peer has closed and the buffer is drained.
    fn fill(&mut self) -> Result<bool, Error> {
        if self.start < self.end {
            return Ok(true);
        }
        if self.eof {
            return Ok(false);
        }
        let n = self.connection.read(&mut self.buf).map_err(read_error)?;
        if n == 0 {
            self.eof = true;
            return Ok(false);
        }
        self.start = 0;
        self.end = n;
        Ok(true)
    }

    /// Up to `max` buffered bytes; empty at end of stream.
    fn take(&mut self, max: usize) -> Result<&[u8], Error> {
        if !self.fill()? {
            return Ok(&[]);
        }
        let n = core::cmp::min(max, self.end - self.start);
        let chunk = &self.buf[self.start..self.start + n];
        self.start += n;
        Ok(chunk)
    }

    /// Reads one line without its terminator. Returns `false` when the stream
    /// ended before any byte of the line.
    fn read_line<const N: usize>(&mut self, line: &mut Vec<u8, N>) -> Result<bool, Error> {
        line.clear();
        let mut started = false;
        loop {
            if !self.fill()? {
                return if started {
                    Err(Error::ProtocolError)
                } else {
                    Ok(false)
                };
            }
            started = true;
            let byte = self.buf[self.start];
            self.start += 1;
            if byte == b'\n' {
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                return Ok(true);
            }
            line.push(byte).map_err(|_| Error::BufferOverflow)?;
        }
    }

    fn read_exact<const N: usize>(&mut self, len: usize, body: &mut Vec<u8, N>) -> Result<(), Error> {
        if len > N - body.len() {
            return Err(Error::BufferOverflow);
        }
        let mut remaining = len;
        while remaining > 0 {
            let chunk = self.take(remaining)?;
            if chunk.is_empty() {
                return Err(Error::ConnectionClosed);
            }
            remaining -= chunk.len();
            body.extend_from_slice(chunk)
                .map_err(|_| Error::BufferOverflow)?;
        }
        Ok(())
    }

    fn read_to_end<const N: usize>(&mut self, body: &mut Vec<u8, N>) -> Result<(), Error> {
        loop {
            let chunk = self.take(READ_CHUNK)?;
            if chunk.is_empty() {
                return Ok(());
            }
            body.extend_from_slice(chunk)
                .map_err(|_| Error::BufferOverflow)?;
        }
    }

    fn read_chunked<const N: usize>(&mut self, body: &mut Vec<u8, N>) -> Result<(), Error> {
        let mut line: Vec<u8, MAX_LINE_LEN> = Vec::new();
        loop {
            if !self.read_line(&mut line)? {
                return Err(Error::ConnectionClosed);
            }
            let text = core::str::from_utf8(&line).map_err(|_| Error::ProtocolError)?;
            let size_text = text.split(';').next().unwrap_or("").trim();
            let size = usize::from_str_radix(size_text, 16).map_err(|_| Error::ProtocolError)?;

            if size == 0 {
                // Trailer section, terminated by an empty line or by the close.
                while self.read_line(&mut line)? && !line.is_empty() {}
                return Ok(());
            }

            self.read_exact(size, body)?;
            if !self.read_line(&mut line)? || !line.is_empty() {
                return Err(Error::ProtocolError);
            }
        }
    }
}
