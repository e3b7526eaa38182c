use std::fmt::{Display, Formatter};

use crate::astro_math::Degrees;
use crate::coordinate::GeoCoordinate;
use crate::util::SetupResult;

/// Which geographic axis a coordinate belongs to
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Axis {
    /// North/South, positive North
    Latitude,
    /// East/West, positive East
    Longitude,
}

impl Axis {
    /// Largest valid magnitude in degrees, inclusive
    pub fn bound(&self) -> u16 {
        match self {
            Axis::Latitude => 90,
            Axis::Longitude => 180,
        }
    }

    /// Number of degree digits in the wire token
    pub fn degree_width(&self) -> usize {
        match self {
            Axis::Latitude => 2,
            Axis::Longitude => 3,
        }
    }

    pub fn contains(&self, degrees: Degrees) -> bool {
        let bound = self.bound() as Degrees;
        (-bound..=bound).contains(&degrees)
    }

    /// Parses `text` as a coordinate on this axis
    pub fn parse(self, text: &str) -> SetupResult<GeoCoordinate> {
        crate::coordinate::parse(text, self)
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Latitude => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}
