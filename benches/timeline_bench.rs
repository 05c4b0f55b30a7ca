// Benchmark for the timeline core
// Measures conflict checks, layout and visible-range computation at service scale

use chrono::{Duration, NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use table_timeline::models::interval::Interval;
use table_timeline::models::resource::{Resource, ResourceGroup};
use table_timeline::models::settings::TimelineSettings;
use table_timeline::models::snapshot::TimelineSnapshot;
use table_timeline::services::conflict::{ConflictService, ProposedInterval};
use table_timeline::timeline::{
    compute_layout, compute_visible_range, GridExtent, LayoutMetrics, Overscan, TimelineView,
    ViewportWindow,
};

fn opening() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 14)
        .unwrap()
        .and_hms_opt(11, 0, 0)
        .unwrap()
}

/// A floor of `tables` tables in sectors of ten, each booked back to back.
fn busy_floor(tables: usize) -> TimelineSnapshot {
    let mut snapshot = TimelineSnapshot::new(opening().date());
    snapshot.groups = (0..tables.div_ceil(10))
        .map(|g| ResourceGroup::new(format!("S{}", g), format!("Sector {}", g), g as i32))
        .collect();
    snapshot.resources = (0..tables)
        .map(|t| Resource::new(format!("T{}", t), format!("S{}", t / 10), 2, 6, t as i32))
        .collect();

    for t in 0..tables {
        for seating in 0..6 {
            let start = opening() + Duration::minutes(seating * 120 + (t as i64 % 4) * 15);
            if let Ok(interval) =
                Interval::new(format!("R{}-{}", t, seating), format!("T{}", t), start, 90, 2)
            {
                snapshot.intervals.push(interval);
            }
        }
    }
    snapshot
}

fn bench_conflict_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("conflict_check");

    for tables in [10, 50, 200].iter() {
        let snapshot = busy_floor(*tables);
        let proposed = ProposedInterval::from_duration("T3", opening() + Duration::hours(3), 120);
        group.bench_with_input(BenchmarkId::from_parameter(tables), tables, |b, _| {
            b.iter(|| {
                let service = ConflictService::new(&snapshot.intervals);
                black_box(service.check(black_box(&proposed), None))
            });
        });
    }

    group.finish();
}

fn bench_audit(c: &mut Criterion) {
    let snapshot = busy_floor(200);
    c.bench_function("audit_200_tables", |b| {
        b.iter(|| black_box(ConflictService::new(&snapshot.intervals).audit()));
    });
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_layout");
    let metrics = LayoutMetrics {
        row_height: 48.0,
        header_height: 28.0,
    };

    for tables in [50, 500].iter() {
        let snapshot = busy_floor(*tables);
        group.bench_with_input(BenchmarkId::from_parameter(tables), tables, |b, _| {
            b.iter(|| {
                black_box(compute_layout(
                    &snapshot.groups,
                    &snapshot.resources,
                    &snapshot.collapsed_group_ids,
                    metrics,
                ))
            });
        });
    }

    group.finish();
}

fn bench_visible_range(c: &mut Criterion) {
    let snapshot = busy_floor(200);
    let settings = TimelineSettings::default();
    let view = TimelineView::new(&snapshot, &settings);
    let extent = GridExtent::from_view(&view);
    let overscan = Overscan {
        columns: settings.overscan_columns,
        rows: settings.overscan_rows,
    };

    c.bench_function("visible_range", |b| {
        b.iter(|| {
            compute_visible_range(
                black_box(&ViewportWindow::new(640.0, 2400.0, 1280.0, 720.0)),
                &extent,
                overscan,
            )
        });
    });

    let range = compute_visible_range(&ViewportWindow::new(640.0, 2400.0, 1280.0, 720.0), &extent, overscan);
    c.bench_function("visible_intervals_200_tables", |b| {
        b.iter(|| black_box(range.visible_intervals(&view).len()));
    });
}

criterion_group!(
    benches,
    bench_conflict_check,
    bench_audit,
    bench_layout,
    bench_visible_range
);
criterion_main!(benches);
