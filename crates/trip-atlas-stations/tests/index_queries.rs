//! StationIndex query tests against a linear scan.

use std::sync::Arc;

use trip_atlas_core::{GeoRect, Station};
use trip_atlas_stations::StationIndex;
use trip_atlas_test_utils::stations::{
    BRANDENBURG, grid_stations, random_rects, random_stations, scan_query,
};

fn sorted_names(stations: Vec<&Station>) -> Vec<String> {
    let mut names: Vec<String> = stations.into_iter().map(|s| s.name.clone()).collect();
    names.sort();
    names
}

#[test]
fn test_query_matches_scan_on_random_data() {
    let stations = random_stations(2_000, 42, BRANDENBURG);
    let index = StationIndex::build(stations.clone());

    for rect in random_rects(200, 43, BRANDENBURG) {
        assert_eq!(
            sorted_names(index.query(&rect)),
            sorted_names(scan_query(&stations, &rect)),
            "mismatch for {:?}",
            rect
        );
    }
}

#[test]
fn test_query_matches_scan_on_grid_edges() {
    // Grid points sit exactly on the query boundaries.
    let stations = grid_stations(GeoRect::new(0.0, 0.0, 10.0, 10.0), 11, 11);
    let index = StationIndex::build(stations.clone());

    let rects = [
        GeoRect::new(2.0, 3.0, 5.0, 7.0),
        GeoRect::new(0.0, 0.0, 0.0, 10.0),
        GeoRect::point(10.0, 10.0),
        GeoRect::new(-5.0, -5.0, 20.0, 20.0),
        GeoRect::new(2.5, 2.5, 2.9, 2.9),
    ];
    for rect in rects {
        let hits = index.query(&rect);
        assert_eq!(hits.len(), scan_query(&stations, &rect).len(), "{:?}", rect);
    }

    assert_eq!(index.query(&GeoRect::new(2.0, 3.0, 5.0, 7.0)).len(), 4 * 5);
    assert!(index.query(&GeoRect::new(2.5, 2.5, 2.9, 2.9)).is_empty());
}

#[test]
fn test_concurrent_queries_share_index() {
    let stations = random_stations(5_000, 7, BRANDENBURG);
    let index = Arc::new(StationIndex::build(stations.clone()));
    let rects = random_rects(64, 8, BRANDENBURG);

    std::thread::scope(|scope| {
        for chunk in rects.chunks(16) {
            let index = Arc::clone(&index);
            let stations = &stations;
            scope.spawn(move || {
                for rect in chunk {
                    assert_eq!(index.query(rect).len(), scan_query(stations, rect).len());
                }
            });
        }
    });
}
