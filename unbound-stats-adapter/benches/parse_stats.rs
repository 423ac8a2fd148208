use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use unbound_stats_adapter::parse_stats;

/// Build output resembling `stats_noreset` with the given thread count.
fn stats_output(threads: usize) -> String {
    let mut out = String::new();
    for t in 0..threads {
        for name in ["queries", "cachehits", "cachemiss", "prefetch", "recursivereplies"] {
            out.push_str(&format!("thread{}.num.{}={}\n", t, name, t * 100));
        }
        out.push_str(&format!("thread{}.requestlist.avg=0.5\n", t));
    }
    for name in ["queries", "cachehits", "cachemiss", "prefetch", "recursivereplies"] {
        out.push_str(&format!("total.num.{}={}\n", name, threads * 100));
    }
    out.push_str("time.now=1700000000.123456\n");
    out
}

/// Benchmark parsing with varying thread counts
fn bench_parse_varying_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_stats");

    for threads in [1, 4, 16, 64].iter() {
        let output = stats_output(*threads);

        group.bench_with_input(BenchmarkId::from_parameter(threads), &output, |b, output| {
            b.iter(|| {
                black_box(parse_stats(output.as_bytes()).ok());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse_varying_threads);
criterion_main!(benches);
