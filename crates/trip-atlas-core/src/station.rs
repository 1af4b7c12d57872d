use crate::geometry::LatLng;

/// Travel time to a station in seconds, or `Unknown` when it is unreachable
/// or was never measured.
///
/// Arithmetic only ever happens on `Known` values; the "no data" sentinel is
/// produced at the last moment by [`StationTime::sentinel_value`] and
/// [`StationTime::gpu_value`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StationTime {
    Known(f64),
    #[default]
    Unknown,
}

impl StationTime {
    /// Sentinel standing in for `Unknown` in numeric pipelines.
    pub const SENTINEL: f64 = f64::MAX;

    /// `None` and non-finite values become `Unknown`.
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(seconds) if seconds.is_finite() => Self::Known(seconds),
            _ => Self::Unknown,
        }
    }

    pub fn known(self) -> Option<f64> {
        match self {
            Self::Known(seconds) => Some(seconds),
            Self::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }

    pub fn sentinel_value(self) -> f64 {
        self.known().unwrap_or(Self::SENTINEL)
    }

    /// Single precision value uploaded to the GPU; saturates at `f32::MAX`.
    pub fn gpu_value(self) -> f32 {
        match self {
            Self::Known(seconds) => seconds.clamp(f32::MIN as f64, f32::MAX as f64) as f32,
            Self::Unknown => f32::MAX,
        }
    }
}

impl From<Option<f64>> for StationTime {
    fn from(value: Option<f64>) -> Self {
        Self::from_option(value)
    }
}

/// A named point on the map. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub time: StationTime,
}

impl Station {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, time: StationTime) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            time,
        }
    }

    pub fn location(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    pub fn has_finite_location(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_option() {
        assert_eq!(StationTime::from_option(Some(12.0)), StationTime::Known(12.0));
        assert_eq!(StationTime::from_option(None), StationTime::Unknown);
        assert_eq!(StationTime::from_option(Some(f64::NAN)), StationTime::Unknown);
        assert_eq!(StationTime::from_option(Some(f64::INFINITY)), StationTime::Unknown);
    }

    #[test]
    fn test_sentinel_only_for_unknown() {
        assert_eq!(StationTime::Known(1500.0).sentinel_value(), 1500.0);
        assert_eq!(StationTime::Unknown.sentinel_value(), f64::MAX);
        assert_eq!(StationTime::Unknown.gpu_value(), f32::MAX);
        assert_eq!(StationTime::Known(1e300).gpu_value(), f32::MAX);
        assert_eq!(StationTime::Known(0.0).gpu_value(), 0.0);
    }

    #[test]
    fn test_station_location() {
        let station = Station::new("Hennigsdorf", 52.637778, 13.203611, StationTime::Unknown);
        assert_eq!(station.location(), LatLng::new(52.637778, 13.203611));
        assert!(station.has_finite_location());
        assert!(!Station::new("x", f64::NAN, 0.0, StationTime::Unknown).has_finite_location());
    }
}
