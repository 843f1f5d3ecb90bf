// benches/decode_performance.rs
//! Benchmarks for tpm2_rc decoding and rendering.
//!
//! Decoding should cost a handful of branches regardless of the branch
//! taken; rendering pays for formatting only.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tpm2_rc::ring_buffer::ResponseJournal;
use tpm2_rc::{decode, decode_response, ResponseCode};

/// One representative code per decision-tree branch.
const BRANCHES: [(&str, u32); 7] = [
    ("legacy", 0x0000_001E),
    ("general", 0x0000_0143),
    ("vendor", 0x0000_0D2A),
    ("warning", 0x0000_0921),
    ("parameter", 0x0000_09C4),
    ("handle", 0x0000_018B),
    ("session", 0x0000_098E),
];

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    group.bench_function("success", |b| {
        b.iter(|| decode(black_box(ResponseCode::SUCCESS)))
    });

    for (name, raw) in BRANCHES {
        group.bench_with_input(BenchmarkId::from_parameter(name), &raw, |b, &raw| {
            b.iter(|| decode(black_box(ResponseCode::new(raw))))
        });
    }

    group.bench_function("sweep_12_bits", |b| {
        b.iter(|| {
            let mut failures = 0u32;
            for raw in 0..0x1000u32 {
                if decode_response(black_box(raw)).is_err() {
                    failures += 1;
                }
            }
            failures
        })
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for (name, raw) in BRANCHES {
        let err = decode(ResponseCode::new(raw)).expect("non-zero code");

        group.bench_with_input(BenchmarkId::new("display", name), &err, |b, err| {
            b.iter(|| black_box(err).to_string())
        });

        group.bench_with_input(BenchmarkId::new("internal_log", name), &err, |b, err| {
            let mut buffer = String::with_capacity(256);
            b.iter(|| {
                buffer.clear();
                black_box(err).internal_log().write_to(&mut buffer).unwrap();
                buffer.len()
            })
        });
    }

    group.finish();
}

fn bench_journal(c: &mut Criterion) {
    let mut group = c.benchmark_group("journal");

    for capacity in [16usize, 1024] {
        let journal = ResponseJournal::new(capacity, 64);
        group.bench_with_input(
            BenchmarkId::new("record_response", capacity),
            &journal,
            |b, journal| b.iter(|| journal.record_response(black_box(0x921u32), "TPM2_Unseal")),
        );
    }

    let journal = ResponseJournal::new(1024, 64);
    for (_, raw) in BRANCHES.iter().cycle().take(1024) {
        let _ = journal.record_response(*raw, "TPM2_Load");
    }
    group.bench_function("kind_counts", |b| b.iter(|| journal.kind_counts()));
    group.bench_function("get_recent_10", |b| b.iter(|| journal.get_recent(10)));

    group.finish();
}

criterion_group!(benches, bench_decode, bench_render, bench_journal);
criterion_main!(benches);
