use criterion::{Criterion, Throughput};
use libthingspeak::network::error::Error;
use libthingspeak::network::{Close, Connect, Connection, Read, Write};
use libthingspeak::thingspeak::update::UPDATE_BODY_LEN;
use libthingspeak::thingspeak::{FeedEntry, ThingSpeak, Update, value_by_key};
use rand::Rng;
use std::hint::black_box;

const LAST_ENTRY: &str = r#"{"created_at":"2024-03-01T10:00:00Z","entry_id":1042,"field1":"21.50000","field2":"64","field3":"1013.2","field4":null,"field5":null,"field6":null,"field7":null,"field8":"on","latitude":"52.52","longitude":"13.405","elevation":"34","status":"all sensors nominal"}"#;

/// Answers every request with a fixed `200 OK` carrying an entry id.
struct Loopback {
    response: &'static [u8],
    pos: usize,
}

impl Read for Loopback {
    type Error = Error;
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let remaining = &self.response[self.pos..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}

impl Write for Loopback {
    type Error = Error;
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Close for Loopback {
    type Error = Error;
    fn close(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Connection for Loopback {}

struct LoopbackNetwork;

impl Connect for LoopbackNetwork {
    type Connection = Loopback;
    type Error = Error;

    fn connect(&mut self, _remote: &str) -> Result<Self::Connection, Self::Error> {
        Ok(Loopback {
            response: b"HTTP/1.1 200 OK\r\nContent-Length: 4\r\nConnection: close\r\n\r\n1042",
            pos: 0,
        })
    }
}

fn random_update() -> Update {
    let mut rng = rand::thread_rng();
    let mut update = Update::new();
    for field in 1..=8 {
        update.set_field(field, rng.gen_range(-1000.0_f32..1000.0)).unwrap();
    }
    update.set_latitude(rng.gen_range(-90.0..90.0));
    update.set_longitude(rng.gen_range(-180.0..180.0));
    update.set_elevation(rng.gen_range(0.0..4000.0));
    update.set_status("all sensors nominal").unwrap();
    update
}

pub fn bench_encode_update(c: &mut Criterion) {
    let update = random_update();
    let mut group = c.benchmark_group("update");
    group.throughput(Throughput::Bytes(update.content_length() as u64));
    group.bench_function("encode", |b| {
        b.iter(|| {
            let mut body: heapless::String<UPDATE_BODY_LEN> = heapless::String::new();
            black_box(&update).encode(&mut body).unwrap();
            body
        })
    });
    group.finish();
}

pub fn bench_value_by_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("json");
    group.throughput(Throughput::Bytes(LAST_ENTRY.len() as u64));
    group.bench_function("value_by_key", |b| {
        b.iter(|| value_by_key(black_box(LAST_ENTRY), black_box("status")))
    });
    group.finish();
}

pub fn bench_parse_feed_entry(c: &mut Criterion) {
    let mut group = c.benchmark_group("json");
    group.throughput(Throughput::Bytes(LAST_ENTRY.len() as u64));
    group.bench_function("feed_entry", |b| {
        b.iter(|| FeedEntry::parse(black_box(LAST_ENTRY)).unwrap())
    });
    group.finish();
}

pub fn bench_write_field(c: &mut Criterion) {
    let mut ts = ThingSpeak::new(LoopbackNetwork);
    let mut rng = rand::thread_rng();
    c.bench_function("write_field", |b| {
        b.iter(|| {
            let value: i32 = rng.gen_range(0..10_000);
            ts.write_field(31461, 1, value, "XXXXXXXXXXXXXXXX").unwrap()
        })
    });
}
