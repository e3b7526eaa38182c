use serde::{Deserialize, Serialize};

use crate::coordinate::GeoCoordinate;

/// Sign convention the mount firmware expects for the site longitude.
/// Coordinates entering the crate are always positive East.
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongitudeConvention {
    #[default]
    EastPositive,
    WestPositive,
}

impl LongitudeConvention {
    /// Converts a positive East longitude into this convention
    pub fn apply(&self, longitude: GeoCoordinate) -> GeoCoordinate {
        match self {
            LongitudeConvention::EastPositive => longitude,
            LongitudeConvention::WestPositive => longitude.negated(),
        }
    }
}
