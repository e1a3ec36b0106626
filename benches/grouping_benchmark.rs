use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fieldfinder::engine::group_facilities;
use fieldfinder::models::{Facility, Sport};
use std::hint::black_box;

/// Facilities laid out as parks of four fields on a grid, with every tenth
/// park a golf course.
fn synthetic_facilities(count: usize) -> Vec<Facility> {
    (0..count)
        .map(|i| {
            let park = i / 4;
            let sport = if park % 10 == 0 { Sport::Golf } else { Sport::Soccer };
            let lat = 37.0 + (park / 50) as f64 * 0.02 + (i % 4) as f64 * 0.0003;
            let lng = -122.0 + (park % 50) as f64 * 0.02;
            Facility::new(i.to_string(), format!("Park {}", park), lat, lng).with_sport(sport)
        })
        .collect()
}

fn benchmark_group_facilities(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_facilities");

    for count in [100, 500, 2000] {
        let facilities = synthetic_facilities(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &facilities, |b, input| {
            b.iter(|| group_facilities(black_box(input.clone())))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_group_facilities);
criterion_main!(benches);
