//! Dataset file loading and export tests.

use std::io::Write;

use trip_atlas_core::StationTime;
use trip_atlas_stations::{DatasetError, DatasetSource, StationDataset, StationIndex};
use trip_atlas_test_utils::stations::{BRANDENBURG, SCENARIO_JSON, random_stations};

#[test]
fn test_load_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SCENARIO_JSON.as_bytes()).unwrap();

    let dataset = StationDataset::load_file(file.path()).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.stations()[0].name, "Known");
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stations.json");

    match StationDataset::load_file(&path) {
        Err(DatasetError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an I/O error, got {:?}", other),
    }
}

#[test]
fn test_export_then_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.json");

    let dataset = StationDataset::new(random_stations(100, 5, BRANDENBURG));
    dataset.write_file(&path).unwrap();

    let reloaded = DatasetSource::File(path).load().unwrap();
    assert_eq!(reloaded.len(), 100);
    assert_eq!(
        reloaded.report().unknown_times,
        dataset.stations().iter().filter(|s| s.time == StationTime::Unknown).count()
    );
    for (a, b) in reloaded.stations().iter().zip(dataset.stations()) {
        assert_eq!(a.name, b.name);
        assert!((a.latitude - b.latitude).abs() < 1e-12);
        assert!((a.longitude - b.longitude).abs() < 1e-12);
        assert_eq!(a.time.is_known(), b.time.is_known());
    }
}

#[test]
fn test_scenario_end_to_end() {
    let dataset = StationDataset::from_json_str(SCENARIO_JSON).unwrap();
    let index = StationIndex::from_dataset(dataset);

    assert_eq!(index.len(), 2);
    let hits = index.query(&trip_atlas_core::GeoRect::point(13.0, 52.0));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].time, StationTime::Known(1500.0));
}
