use std::fmt;
use std::path::PathBuf;

/// A dataset could not be loaded or written as a whole.
///
/// Loading is all-or-nothing at this level: no partial dataset is returned
/// alongside a `DatasetError`.
#[derive(Debug)]
pub enum DatasetError {
    /// Reading or writing a dataset file failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The document is not valid JSON or lacks the `stations` array
    Parse { source: serde_json::Error },
    /// The HTTP request failed
    #[cfg(feature = "remote")]
    Request {
        url: String,
        source: reqwest::Error,
    },
    /// The server answered with a non-success status
    #[cfg(feature = "remote")]
    Status { url: String, status: u16 },
    /// Serializing the dataset failed
    Serialize { source: serde_json::Error },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error on {}: {}", path.display(), source),
            Self::Parse { source } => write!(f, "Invalid station dataset: {}", source),
            #[cfg(feature = "remote")]
            Self::Request { url, source } => write!(f, "Failed to fetch {}: {}", url, source),
            #[cfg(feature = "remote")]
            Self::Status { url, status } => write!(f, "Fetching {} returned HTTP {}", url, status),
            Self::Serialize { source } => write!(f, "Failed to serialize stations: {}", source),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source } | Self::Serialize { source } => Some(source),
            #[cfg(feature = "remote")]
            Self::Request { source, .. } => Some(source),
            #[cfg(feature = "remote")]
            Self::Status { .. } => None,
        }
    }
}

/// A single station record was rejected; the rest of the dataset is kept.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    /// The record is missing a required field or has the wrong shape
    Malformed { index: usize, message: String },
    /// Latitude or longitude is non-finite or out of range
    InvalidCoordinate {
        index: usize,
        name: String,
        latitude: f64,
        longitude: f64,
    },
}

impl RecordError {
    /// Position of the record in the source `stations` array.
    pub fn index(&self) -> usize {
        match self {
            Self::Malformed { index, .. } | Self::InvalidCoordinate { index, .. } => *index,
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { index, message } => {
                write!(f, "Station record {} is malformed: {}", index, message)
            }
            Self::InvalidCoordinate {
                index,
                name,
                latitude,
                longitude,
            } => write!(
                f,
                "Station record {} ({}) has invalid coordinates ({}, {})",
                index, name, latitude, longitude
            ),
        }
    }
}

impl std::error::Error for RecordError {}
