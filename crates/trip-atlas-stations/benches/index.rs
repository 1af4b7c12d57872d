//! Benchmarks for StationIndex build and rectangle queries

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trip_atlas_core::GeoRect;
use trip_atlas_stations::StationIndex;
use trip_atlas_test_utils::stations::{BRANDENBURG, random_rects, random_stations, scan_query};

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("station_index_build");

    for size in [1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));
        let stations = random_stations(size, 1, BRANDENBURG);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| StationIndex::build(black_box(stations.clone())));
        });
    }

    group.finish();
}

/// Tile-sized queries (about 0.02° square, a zoom 14 tile) against a linear scan.
fn bench_tile_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("station_tile_query");

    for size in [1_000, 10_000, 100_000] {
        let stations = random_stations(size, 2, BRANDENBURG);
        let index = StationIndex::build(stations.clone());
        let rects: Vec<GeoRect> = random_rects(64, 3, BRANDENBURG)
            .into_iter()
            .map(|r| GeoRect::new(r.min_x, r.min_y, r.min_x + 0.02, r.min_y + 0.02))
            .collect();

        group.bench_with_input(BenchmarkId::new("rtree", size), &size, |b, _| {
            b.iter(|| {
                rects
                    .iter()
                    .map(|r| index.query(black_box(r)).len())
                    .sum::<usize>()
            });
        });

        group.bench_with_input(BenchmarkId::new("scan", size), &size, |b, _| {
            b.iter(|| {
                rects
                    .iter()
                    .map(|r| scan_query(&stations, black_box(r)).len())
                    .sum::<usize>()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_index_build, bench_tile_query);
criterion_main!(benches);
