use criterion::{criterion_group, criterion_main};

mod thingspeak;

criterion_group!(
    benches,
    thingspeak::bench_encode_update,
    thingspeak::bench_value_by_key,
    thingspeak::bench_parse_feed_entry,
    thingspeak::bench_write_field
);
criterion_main!(benches);
