use burndown_core::{State, StageStats, WorkItem, forecast};
use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const TIERS: [usize; 3] = [100, 1_000, 10_000];

const LABEL_SETS: [&[&str]; 6] = [
    &["est-8", "stt-new"],
    &["est-16", "stt-in-progress"],
    &["est-4", "stt-test"],
    &["est-2", "bug"],
    &["est-32", "stt-in-progress", "frontend"],
    &[],
];

fn synthetic_items(count: usize) -> Vec<WorkItem> {
    (0..count)
        .map(|i| {
            let state = if i % 3 == 0 { State::Closed } else { State::Open };
            WorkItem::new(state, LABEL_SETS[i % LABEL_SETS.len()].iter().copied())
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("burndown.classify");
    let start = NaiveDate::from_ymd_opt(2015, 5, 11).expect("valid date");
    let today = NaiveDate::from_ymd_opt(2015, 6, 22).expect("valid date");

    for count in TIERS {
        let items = synthetic_items(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("classify", count), &items, |b, items| {
            b.iter(|| black_box(StageStats::classify(items)));
        });

        group.bench_with_input(BenchmarkId::new("forecast", count), &items, |b, items| {
            b.iter(|| black_box(forecast(items, start, today)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
