//! Build-once, query-many rectangle lookup over station positions.

use rstar::{AABB, RTree, RTreeObject};
use trip_atlas_core::profiling::{profile_function, profile_scope};
use trip_atlas_core::{GeoRect, Station};

use crate::dataset::StationDataset;

/// A station position in `(lng, lat)` order with its slot in the station list.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedPoint {
    idx: usize,
    lng: f64,
    lat: f64,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.lng, self.lat])
    }
}

/// Immutable R-tree over station positions.
///
/// There are no writers after [`StationIndex::build`], so a shared
/// `Arc<StationIndex>` can be queried from many tiles at once.
///
/// ```
/// use trip_atlas_core::{GeoRect, Station, StationTime};
/// use trip_atlas_stations::StationIndex;
///
/// let index = StationIndex::build(vec![
///     Station::new("A", 52.0, 13.0, StationTime::Known(1500.0)),
///     Station::new("B", 52.5, 13.5, StationTime::Unknown),
/// ]);
/// let hits = index.query(&GeoRect::point(13.0, 52.0));
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name, "A");
/// ```
#[derive(Debug)]
pub struct StationIndex {
    tree: RTree<IndexedPoint>,
    stations: Vec<Station>,
    dropped: usize,
}

impl StationIndex {
    /// Bulk-load the tree. Stations with non-finite coordinates are skipped.
    pub fn build(stations: Vec<Station>) -> Self {
        profile_function!();

        let total = stations.len();
        let stations: Vec<Station> = stations
            .into_iter()
            .filter(|s| {
                let keep = s.has_finite_location();
                if !keep {
                    tracing::warn!("Skipping station {:?} with non-finite position", s.name);
                }
                keep
            })
            .collect();
        let dropped = total - stations.len();

        let points: Vec<IndexedPoint> = stations
            .iter()
            .enumerate()
            .map(|(idx, s)| IndexedPoint {
                idx,
                lng: s.longitude,
                lat: s.latitude,
            })
            .collect();

        let tree = {
            profile_scope!("bulk_load");
            RTree::bulk_load(points)
        };

        tracing::info!("Built station index over {} stations", stations.len());
        Self {
            tree,
            stations,
            dropped,
        }
    }

    pub fn from_dataset(dataset: StationDataset) -> Self {
        Self::build(dataset.into_stations())
    }

    /// All stations inside `rect`, inclusive on every bound, in no particular order.
    pub fn query(&self, rect: &GeoRect) -> Vec<&Station> {
        profile_function!();
        self.query_iter(rect).collect()
    }

    /// Lazy form of [`query`](Self::query); the tree is walked as the
    /// iterator is consumed.
    pub fn query_iter<'a>(&'a self, rect: &GeoRect) -> impl Iterator<Item = &'a Station> + use<'a> {
        // A NaN bound would match nothing in a scan either.
        let envelope = rect
            .is_finite()
            .then(|| AABB::from_corners([rect.min_x, rect.min_y], [rect.max_x, rect.max_y]));

        envelope
            .into_iter()
            .flat_map(move |envelope| self.tree.locate_in_envelope(&envelope))
            .filter_map(move |point| self.stations.get(point.idx))
    }

    /// The indexed stations, in load order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of stations skipped at build time.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_atlas_core::StationTime;
    use trip_atlas_test_utils::stations::{BRANDENBURG, grid_stations, scenario_stations};

    fn names(stations: Vec<&Station>) -> Vec<String> {
        let mut names: Vec<String> = stations.into_iter().map(|s| s.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_degenerate_rect_hits_exact_point() {
        let index = StationIndex::build(scenario_stations());
        assert_eq!(names(index.query(&GeoRect::point(13.0, 52.0))), vec!["Known"]);
        assert!(index.query(&GeoRect::point(13.0, 52.000001)).is_empty());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let index = StationIndex::build(scenario_stations());
        let rect = GeoRect::new(13.0, 52.0, 13.5, 52.5);
        assert_eq!(names(index.query(&rect)), vec!["Known", "Unknown"]);
    }

    #[test]
    fn test_non_finite_stations_are_skipped() {
        let mut stations = scenario_stations();
        stations.push(Station::new("nan", f64::NAN, 13.0, StationTime::Unknown));
        stations.push(Station::new("inf", 52.0, f64::INFINITY, StationTime::Unknown));

        let index = StationIndex::build(stations);
        assert_eq!(index.len(), 2);
        assert_eq!(index.dropped(), 2);
    }

    #[test]
    fn test_non_finite_rect_matches_nothing() {
        let index = StationIndex::build(grid_stations(BRANDENBURG, 4, 4));
        let rect = GeoRect {
            min_x: f64::NAN,
            ..BRANDENBURG
        };
        assert!(index.query(&rect).is_empty());
    }

    #[test]
    fn test_empty_index() {
        let index = StationIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.query(&BRANDENBURG).is_empty());
    }
}
