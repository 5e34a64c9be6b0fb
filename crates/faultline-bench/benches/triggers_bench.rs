//! Trigger benchmarks over the guarded (non-crashing) paths only.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use faultline_triggers::{crash, heap, registry, stack};

fn bench_registry_dispatch(c: &mut Criterion) {
    let input = [0u8; 10]; // the one length instant_crash survives
    c.bench_function("registry_dispatch", |b| {
        b.iter(|| {
            let trigger = registry::find(black_box("instant_crash")).unwrap();
            (trigger.run)(black_box(&input));
        });
    });
}

fn bench_guarded_triggers(c: &mut Criterion) {
    let mut group = c.benchmark_group("guarded_paths");

    // Zero-length chunks only; larger lengths would overflow by design.
    let chunk_input: &[u8] = &[8, 0, 0, 0, 0, 0, 0, 0, 0, 0x7F];
    group.throughput(Throughput::Bytes(chunk_input.len() as u64));
    group.bench_function("parse_chunks_zero_len", |b| {
        b.iter(|| heap::parse_chunks(black_box(chunk_input)));
    });

    // Product (128) comfortably exceeds the 4-byte payload.
    let copy_input: &[u8] = &[0, 0, 0, 8, 1, 0xAA, 0xBB, 0xCC];
    group.bench_function("undersized_copy_in_bounds", |b| {
        b.iter(|| heap::undersized_copy(black_box(copy_input)));
    });

    group.bench_function("instant_crash_guarded", |b| {
        b.iter(|| crash::instant_crash(black_box(&[0u8; 10])));
    });

    group.finish();
}

fn bench_stack_copy_sizes(c: &mut Criterion) {
    let sizes: &[usize] = &[8, 32, 64];
    let mut group = c.benchmark_group("copy_to_stack");
    for &size in sizes {
        let input = vec![0x41u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| stack::copy_to_stack(black_box(&input)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_registry_dispatch,
    bench_guarded_triggers,
    bench_stack_copy_sizes
);
criterion_main!(benches);
