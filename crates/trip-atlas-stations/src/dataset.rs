//! Loading and exporting the `{ "stations": [...] }` JSON document.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use trip_atlas_core::profiling::profile_function;
use trip_atlas_core::{Station, StationTime};

use crate::error::{DatasetError, RecordError};

#[derive(Deserialize)]
struct Document {
    stations: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct StationRecord {
    latitude: f64,
    longitude: f64,
    name: String,
    #[serde(default)]
    time: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    stations: Vec<ExportRecord<'a>>,
}

#[derive(Serialize)]
struct ExportRecord<'a> {
    name: &'a str,
    latitude: f64,
    longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<f64>,
}

/// What happened to the individual records during a load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Number of entries in the source `stations` array.
    pub total_records: usize,
    /// Records that were dropped, in source order.
    pub dropped: Vec<RecordError>,
    /// Kept stations whose time was missing or not a finite number.
    pub unknown_times: usize,
}

impl LoadReport {
    pub fn loaded(&self) -> usize {
        self.total_records - self.dropped.len()
    }

    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// An ordered station set. Replaced as a whole on reload, never edited in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationDataset {
    stations: Vec<Station>,
    report: LoadReport,
}

impl StationDataset {
    pub fn new(stations: Vec<Station>) -> Self {
        let report = LoadReport {
            total_records: stations.len(),
            dropped: Vec::new(),
            unknown_times: stations.iter().filter(|s| !s.time.is_known()).count(),
        };
        Self { stations, report }
    }

    /// Parse a dataset document.
    ///
    /// Records with missing fields or unusable coordinates are dropped and
    /// listed in the [`LoadReport`]; a missing or non-numeric `time` makes
    /// the station's time `Unknown`. Only a document that is not valid JSON
    /// or has no `stations` array is an error.
    ///
    /// ```
    /// use trip_atlas_stations::StationDataset;
    ///
    /// let dataset = StationDataset::from_json_str(
    ///     r#"{ "stations": [
    ///         { "latitude": 52.0, "longitude": 13.0, "name": "A", "time": 1500 },
    ///         { "latitude": "north", "longitude": 13.0, "name": "B" }
    ///     ] }"#,
    /// )
    /// .unwrap();
    /// assert_eq!(dataset.len(), 1);
    /// assert_eq!(dataset.report().dropped.len(), 1);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let document: Document =
            serde_json::from_str(json).map_err(|source| DatasetError::Parse { source })?;
        Ok(Self::from_document(document))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let document: Document =
            serde_json::from_reader(reader).map_err(|source| DatasetError::Parse { source })?;
        Ok(Self::from_document(document))
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            "Loaded {} stations from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Fetch a dataset over HTTP. Blocks until the whole body is received.
    #[cfg(feature = "remote")]
    pub fn fetch(url: &str) -> Result<Self, DatasetError> {
        let response = reqwest::blocking::get(url).map_err(|source| DatasetError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DatasetError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| DatasetError::Request {
            url: url.to_string(),
            source,
        })?;
        let dataset = Self::from_json_str(&body)?;
        tracing::info!("Fetched {} stations from {}", dataset.len(), url);
        Ok(dataset)
    }

    fn from_document(document: Document) -> Self {
        profile_function!();

        let total_records = document.stations.len();
        let mut stations = Vec::with_capacity(total_records);
        let mut dropped = Vec::new();
        let mut unknown_times = 0;

        for (index, value) in document.stations.into_iter().enumerate() {
            match parse_record(index, value) {
                Ok(station) => {
                    if !station.time.is_known() {
                        unknown_times += 1;
                    }
                    stations.push(station);
                }
                Err(e) => {
                    tracing::warn!("Dropping station: {}", e);
                    dropped.push(e);
                }
            }
        }

        if !dropped.is_empty() {
            tracing::warn!("Dropped {} of {} station records", dropped.len(), total_records);
        }
        tracing::debug!(
            "{} stations loaded, {} without a time",
            stations.len(),
            unknown_times
        );

        Self {
            stations,
            report: LoadReport {
                total_records,
                dropped,
                unknown_times,
            },
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn into_stations(self) -> Vec<Station> {
        self.stations
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Serialize back to the dataset document shape. Unknown times are omitted.
    pub fn to_json_pretty(&self) -> Result<String, DatasetError> {
        serde_json::to_string_pretty(&self.export_document())
            .map_err(|source| DatasetError::Serialize { source })
    }

    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let path = path.as_ref();
        let io_error = |source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.export_document())
            .map_err(|source| DatasetError::Serialize { source })?;
        writer.flush().map_err(io_error)?;

        tracing::info!("Wrote {} stations to {}", self.len(), path.display());
        Ok(())
    }

    fn export_document(&self) -> ExportDocument<'_> {
        ExportDocument {
            stations: self
                .stations
                .iter()
                .map(|s| ExportRecord {
                    name: &s.name,
                    latitude: s.latitude,
                    longitude: s.longitude,
                    time: s.time.known(),
                })
                .collect(),
        }
    }
}

fn parse_record(index: usize, value: serde_json::Value) -> Result<Station, RecordError> {
    let record: StationRecord =
        serde_json::from_value(value).map_err(|e| RecordError::Malformed {
            index,
            message: e.to_string(),
        })?;

    let valid = record.latitude.is_finite()
        && record.longitude.is_finite()
        && (-90.0..=90.0).contains(&record.latitude)
        && (-180.0..=180.0).contains(&record.longitude);
    if !valid {
        return Err(RecordError::InvalidCoordinate {
            index,
            name: record.name,
            latitude: record.latitude,
            longitude: record.longitude,
        });
    }

    let time = StationTime::from_option(record.time.as_ref().and_then(serde_json::Value::as_f64));
    Ok(Station::new(
        record.name,
        record.latitude,
        record.longitude,
        time,
    ))
}

/// Where a dataset comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetSource {
    /// A bundled or local JSON file
    File(PathBuf),
    /// A remote JSON document
    #[cfg(feature = "remote")]
    Url(String),
    /// A JSON document already in memory
    Inline(String),
}

impl DatasetSource {
    pub fn load(&self) -> Result<StationDataset, DatasetError> {
        match self {
            Self::File(path) => StationDataset::load_file(path),
            #[cfg(feature = "remote")]
            Self::Url(url) => StationDataset::fetch(url),
            Self::Inline(json) => StationDataset::from_json_str(json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_document() {
        let dataset = StationDataset::from_json_str(trip_atlas_test_utils::stations::SCENARIO_JSON)
            .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.stations()[0].time, StationTime::Known(1500.0));
        assert_eq!(dataset.stations()[1].time, StationTime::Unknown);
        assert_eq!(dataset.report().unknown_times, 1);
        assert!(dataset.report().is_clean());
    }

    #[test]
    fn test_bad_records_are_dropped_not_fatal() {
        let json = r#"{ "stations": [
            { "latitude": 52.0, "longitude": 13.0, "name": "ok" },
            { "longitude": 13.0, "name": "no latitude" },
            { "latitude": 95.0, "longitude": 13.0, "name": "too far north" },
            { "latitude": 52.0, "longitude": 13.0, "name": "bad time", "time": "soon" },
            42
        ] }"#;
        let dataset = StationDataset::from_json_str(json).unwrap();
        let report = dataset.report();

        assert_eq!(report.total_records, 5);
        assert_eq!(report.loaded(), 2);
        assert_eq!(
            report.dropped.iter().map(RecordError::index).collect::<Vec<_>>(),
            vec![1, 2, 4]
        );
        assert!(matches!(report.dropped[1], RecordError::InvalidCoordinate { .. }));
        assert_eq!(report.unknown_times, 2);
        assert_eq!(dataset.stations()[1].name, "bad time");
    }

    #[test]
    fn test_null_time_is_unknown() {
        let json = r#"{ "stations": [ { "latitude": 1.0, "longitude": 2.0, "name": "x", "time": null } ] }"#;
        let dataset = StationDataset::from_json_str(json).unwrap();
        assert_eq!(dataset.stations()[0].time, StationTime::Unknown);
    }

    #[test]
    fn test_missing_stations_array_is_fatal() {
        assert!(matches!(
            StationDataset::from_json_str(r#"{ "places": [] }"#),
            Err(DatasetError::Parse { .. })
        ));
        assert!(matches!(
            StationDataset::from_json_str("not json"),
            Err(DatasetError::Parse { .. })
        ));
    }

    #[test]
    fn test_export_omits_unknown_time() {
        let dataset = StationDataset::new(trip_atlas_test_utils::stations::scenario_stations());
        let json = dataset.to_json_pretty().unwrap();

        assert_eq!(json.matches("\"time\"").count(), 1);
        assert_eq!(StationDataset::from_json_str(&json).unwrap(), dataset);
    }

    #[test]
    fn test_inline_source() {
        let source = DatasetSource::Inline(trip_atlas_test_utils::stations::SCENARIO_JSON.into());
        assert_eq!(source.load().unwrap().len(), 2);
    }
}
