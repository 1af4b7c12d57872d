//! Station datasets and the spatial index built over them.
//!
//! A dataset is loaded once at startup (from a file, an inline document or,
//! with the `remote` feature, a URL), then handed to [`StationIndex::build`].
//! The index answers the rectangle queries issued by every tile.

pub mod dataset;
pub mod error;
pub mod index;

pub use dataset::{DatasetSource, LoadReport, StationDataset};
pub use error::{DatasetError, RecordError};
pub use index::StationIndex;
