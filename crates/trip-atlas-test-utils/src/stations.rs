//! Deterministic station fixtures.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trip_atlas_core::{GeoRect, Station, StationTime};

/// Rough bounding box of Berlin and Brandenburg, `(lng, lat)`.
pub const BRANDENBURG: GeoRect = GeoRect {
    min_x: 11.2,
    min_y: 51.3,
    max_x: 14.8,
    max_y: 53.6,
};

/// Two-station dataset with one known and one unknown time.
pub const SCENARIO_JSON: &str = r#"{
    "stations": [
        { "latitude": 52.0, "longitude": 13.0, "name": "Known", "time": 1500 },
        { "latitude": 52.5, "longitude": 13.5, "name": "Unknown" }
    ]
}"#;

pub fn scenario_stations() -> Vec<Station> {
    vec![
        Station::new("Known", 52.0, 13.0, StationTime::Known(1500.0)),
        Station::new("Unknown", 52.5, 13.5, StationTime::Unknown),
    ]
}

/// `columns * rows` stations on a regular grid, including points exactly on
/// the rectangle's edges.
pub fn grid_stations(rect: GeoRect, columns: usize, rows: usize) -> Vec<Station> {
    let step = |min: f64, max: f64, n: usize, i: usize| {
        if n <= 1 {
            min
        } else {
            min + (max - min) * i as f64 / (n - 1) as f64
        }
    };

    let mut stations = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for column in 0..columns {
            let lng = step(rect.min_x, rect.max_x, columns, column);
            let lat = step(rect.min_y, rect.max_y, rows, row);
            let time = StationTime::Known(((row * columns + column) * 60) as f64);
            stations.push(Station::new(format!("grid-{}-{}", row, column), lat, lng, time));
        }
    }
    stations
}

/// `count` uniformly distributed stations inside `rect`; same seed, same stations.
///
/// Roughly one in ten stations has an unknown time.
pub fn random_stations(count: usize, seed: u64, rect: GeoRect) -> Vec<Station> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let lng = rng.random_range(rect.min_x..=rect.max_x);
            let lat = rng.random_range(rect.min_y..=rect.max_y);
            let time = if rng.random_bool(0.1) {
                StationTime::Unknown
            } else {
                StationTime::Known(rng.random_range(0.0..6000.0))
            };
            Station::new(format!("station-{}", i), lat, lng, time)
        })
        .collect()
}

/// Reference rectangle query by linear scan, inclusive on all bounds.
pub fn scan_query<'a>(stations: &'a [Station], rect: &GeoRect) -> Vec<&'a Station> {
    stations
        .iter()
        .filter(|s| rect.contains(s.longitude, s.latitude))
        .collect()
}

/// Random query rectangles inside `rect`, from point-sized up to a quarter of its extent.
pub fn random_rects(count: usize, seed: u64, rect: GeoRect) -> Vec<GeoRect> {
    let mut rng = StdRng::seed_from_u64(seed);
    let max_w = (rect.max_x - rect.min_x) * 0.25;
    let max_h = (rect.max_y - rect.min_y) * 0.25;
    (0..count)
        .map(|_| {
            let x = rng.random_range(rect.min_x..=rect.max_x);
            let y = rng.random_range(rect.min_y..=rect.max_y);
            let w = rng.random_range(0.0..=max_w);
            let h = rng.random_range(0.0..=max_h);
            GeoRect::new(x, y, x + w, y + h)
        })
        .collect()
}
