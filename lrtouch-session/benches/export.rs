use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lrtouch_core::{LogEntry, Response};
use lrtouch_session::SessionLog;

fn long_session(rows: usize) -> SessionLog {
    let mut log = SessionLog::new();
    for i in 0..rows {
        log.push(LogEntry {
            timestamp: "2024-05-01T09:30:00.125Z".to_string(),
            trial_index: i / 3 + 1,
            // every fourth target needs quoting
            target: if i % 4 == 0 { "ice cream, vanilla".to_string() } else { "cat".to_string() },
            left: "cat".to_string(),
            right: "dog".to_string(),
            response: if i % 3 == 0 { Response::Outside } else { Response::Left },
            correct: i % 3 == 2,
            reaction_time_ms: (i as u64 * 37) % 4000,
        });
    }
    log
}

fn bench_export(c: &mut Criterion) {
    let log = long_session(10_000);
    c.bench_function("to_csv_10k", |b| b.iter(|| black_box(log.to_csv())));
    c.bench_function("export_records_10k", |b| {
        b.iter(|| black_box(log.export_records()))
    });
}

criterion_group!(benches, bench_export);
criterion_main!(benches);
