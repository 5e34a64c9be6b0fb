//! Workbench scan benchmarks.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use faultline_harness::code_db::extract_functions;
use faultline_harness::crash_report::parse_crash_filename;

fn synthetic_source(functions: usize) -> String {
    let mut source = String::new();
    for i in 0..functions {
        source.push_str(&format!(
            "/// Doc line.\nfn generated_{i}(x: u32) -> u32 {{\n    if x > {i} {{\n        x\n    }} else {{\n        {i}\n    }}\n}}\n\n"
        ));
    }
    source
}

fn bench_extract_functions(c: &mut Criterion) {
    let source = synthetic_source(64);
    let mut group = c.benchmark_group("extract_functions");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("64_functions", |b| {
        b.iter(|| extract_functions(black_box(&source)));
    });
    group.finish();
}

fn bench_parse_crash_filename(c: &mut Criterion) {
    let name = "id:000013,sig:11,src:000002,time:26783,execs:29431,op:havoc,rep:4";
    c.bench_function("parse_crash_filename", |b| {
        b.iter(|| parse_crash_filename(black_box(name)));
    });
}

criterion_group!(benches, bench_extract_functions, bench_parse_crash_filename);
criterion_main!(benches);
