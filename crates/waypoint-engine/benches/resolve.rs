use criterion::{Criterion, criterion_group, criterion_main};
use waypoint_engine::{PointTrackingMode, TrackingFidelity};
mod common;

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    group.sample_size(10);

    for versions in [10, 100, 1000] {
        let (buffer, initial) = common::edited_buffer(200, versions);
        let latest = buffer.current_snapshot();
        let point = initial
            .create_tracking_point(
                initial.len() / 2,
                PointTrackingMode::Positive,
                TrackingFidelity::Backward,
            )
            .unwrap();
        let late_point = latest
            .create_tracking_point(
                latest.len() / 2,
                PointTrackingMode::Negative,
                TrackingFidelity::Backward,
            )
            .unwrap();

        group.bench_function(format!("forward_{versions}_versions"), |b| {
            b.iter(|| point.position(std::hint::black_box(&latest)).unwrap());
        });

        group.bench_function(format!("backward_{versions}_versions"), |b| {
            b.iter(|| late_point.position(std::hint::black_box(&initial)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
