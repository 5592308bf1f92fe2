//! Scripted in-memory network used by the integration tests.
//!
//! Each `connect` hands out a connection that replays the next queued response
//! and records everything written to it, so tests can assert on the exact
//! request bytes.

#![allow(dead_code)]

use libthingspeak::network::error::Error;
use libthingspeak::network::{Close, Connect, Connection, Read, Write};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// What happened on the mock network.
#[derive(Debug, Default)]
pub struct Log {
    pub remotes: Vec<String>,
    pub requests: Vec<Vec<u8>>,
    pub closed: usize,
}

impl Log {
    pub fn request(&self, index: usize) -> String {
        String::from_utf8_lossy(&self.requests[index]).into_owned()
    }

    /// Body of a recorded request (everything after the blank line).
    pub fn request_body(&self, index: usize) -> String {
        let text = self.request(index);
        match text.split_once("\r\n\r\n") {
            Some((_, body)) => body.to_string(),
            None => String::new(),
        }
    }
}

/// A scripted reply for one connection.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub response: Vec<u8>,
    /// Largest number of bytes handed out per `read`.
    pub read_chunk: usize,
    /// Largest number of bytes accepted per `write`.
    pub write_limit: usize,
    /// Returned by `read` once the response is exhausted, instead of EOF.
    pub read_error: Option<Error>,
}

impl Script {
    pub fn new(response: impl Into<Vec<u8>>) -> Self {
        Self {
            response: response.into(),
            read_chunk: usize::MAX,
            write_limit: usize::MAX,
            read_error: None,
        }
    }

    pub fn read_chunk(mut self, size: usize) -> Self {
        self.read_chunk = size;
        self
    }

    pub fn write_limit(mut self, size: usize) -> Self {
        self.write_limit = size;
        self
    }

    pub fn then_error(mut self, error: Error) -> Self {
        self.read_error = Some(error);
        self
    }
}

#[derive(Debug)]
pub struct MockConnection {
    script: Script,
    pos: usize,
    index: usize,
    log: Rc<RefCell<Log>>,
}

impl MockConnection {
    /// A standalone connection for driving the HTTP client directly.
    pub fn new(script: Script) -> (Self, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        log.borrow_mut().requests.push(Vec::new());
        let conn = Self {
            script,
            pos: 0,
            index: 0,
            log: log.clone(),
        };
        (conn, log)
    }
}

impl Read for MockConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let remaining = &self.script.response[self.pos..];
        if remaining.is_empty() {
            return match self.script.read_error.take() {
                Some(err) => Err(err),
                None => Ok(0),
            };
        }
        let n = remaining.len().min(buf.len()).min(self.script.read_chunk);
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}

impl Write for MockConnection {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.script.write_limit);
        self.log.borrow_mut().requests[self.index].extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Close for MockConnection {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        self.log.borrow_mut().closed += 1;
        Ok(())
    }
}

impl Connection for MockConnection {}

/// Hands out one connection per queued script; refuses once the queue is empty.
#[derive(Debug, Default)]
pub struct MockNetwork {
    scripts: VecDeque<Script>,
    log: Rc<RefCell<Log>>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, script: Script) -> Self {
        self.scripts.push_back(script);
        self
    }

    pub fn log(&self) -> Rc<RefCell<Log>> {
        self.log.clone()
    }
}

impl Connect for MockNetwork {
    type Connection = MockConnection;
    type Error = Error;

    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error> {
        let script = self.scripts.pop_front().ok_or(Error::ConnectionRefused)?;
        let mut log = self.log.borrow_mut();
        log.remotes.push(remote.to_string());
        log.requests.push(Vec::new());
        Ok(MockConnection {
            script,
            pos: 0,
            index: log.requests.len() - 1,
            log: self.log.clone(),
        })
    }
}

/// `200 OK` with a `Content-Length` framed body.
pub fn ok(body: &str) -> Script {
    status(200, "OK", body)
}

pub fn status(code: u16, reason: &str, body: &str) -> Script {
    Script::new(format!(
        "HTTP/1.1 {code} {reason}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    ))
}

/// `200 OK` with the body split into the given chunks.
pub fn chunked(chunks: &[&str]) -> Script {
    let mut text = String::from("HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n");
    for chunk in chunks {
        text.push_str(&format!("{:x}\r\n{chunk}\r\n", chunk.len()));
    }
    text.push_str("0\r\n\r\n");
    Script::new(text)
}
