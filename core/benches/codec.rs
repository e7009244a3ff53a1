//! Benchmarks for schema parsing and the codec.
//!
//! Run with: `cargo bench --bench codec` in the core/ directory.
//!
//! Benchmark groups:
//! 1. parse: parsing schema text into types
//! 2. decode: decoding records of growing vector length
//! 3. encode: encoding the same records

use binschema_core::parser::parse_schema;
use binschema_core::{Codec, Record, TypeManager, Value};
use bumpalo::Bump;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const SCHEMA: &str = "id: u64, name: string, shape: enum Circle[r: f32], Square[side: u16], \
     samples: [i16]";

fn record(samples: usize) -> Record {
    Record::new()
        .with("id", 42u64)
        .with("name", "bench")
        .with("shape", Value::enumeration("Circle", Record::new().with("r", 1.0f32)))
        .with(
            "samples",
            (0..samples)
                .map(|i| Value::Int(i as i64 - 100))
                .collect::<Vec<_>>(),
        )
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse/schema", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let type_mgr = TypeManager::new(&arena);
            black_box(parse_schema(type_mgr, black_box(SCHEMA)).is_ok())
        })
    });
}

fn bench_decode(c: &mut Criterion) {
    let arena = Bump::new();
    let codec = Codec::from_schema_str(&arena, SCHEMA).unwrap();
    let mut group = c.benchmark_group("decode");

    for samples in [0usize, 16, 1024] {
        let bytes = codec.encode(&record(samples)).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &bytes, |b, bytes| {
            b.iter(|| codec.decode(black_box(bytes), 0).unwrap())
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let arena = Bump::new();
    let codec = Codec::from_schema_str(&arena, SCHEMA).unwrap();
    let mut group = c.benchmark_group("encode");

    for samples in [0usize, 16, 1024] {
        let input = record(samples);
        group.bench_with_input(BenchmarkId::from_parameter(samples), &input, |b, input| {
            let mut out = Vec::new();
            b.iter(|| {
                out.clear();
                codec.encode_into(black_box(input), &mut out).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_decode, bench_encode);
criterion_main!(benches);
