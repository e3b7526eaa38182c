//! Latitude/longitude text handling.
//!
//! Two notations are accepted, decimal degrees (`59.33`, `-18.07`) and the
//! sign-degree-minute token the mount speaks (`+59*19`, `-018*04`).
//! Everything is stored at arc-minute precision.

use std::fmt::{Display, Formatter};

use crate::astro_math::{self, Degrees, Minutes, MINUTES_PER_DEGREE};
use crate::util::*;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub struct GeoCoordinate {
    axis: Axis,
    negative: bool,
    degrees: u32,
    minutes: Minutes,
}

impl GeoCoordinate {
    /// Truncates `value` to whole arc-minutes
    pub fn from_degrees(value: Degrees, axis: Axis) -> SetupResult<Self> {
        Self::from_degrees_text(value, axis, &value.to_string())
    }

    fn from_degrees_text(value: Degrees, axis: Axis, text: &str) -> SetupResult<Self> {
        if !value.is_finite() {
            return Err(SetupError::Format {
                axis,
                text: text.to_string(),
            });
        }
        if !axis.contains(value) {
            return Err(range_error(axis, text));
        }

        let (degrees, minutes) = astro_math::dec_to_dm(value.abs());
        Self::from_parts(axis, value < 0., degrees, minutes, text)
    }

    fn from_parts(
        axis: Axis,
        negative: bool,
        degrees: u32,
        minutes: Minutes,
        text: &str,
    ) -> SetupResult<Self> {
        let total = degrees * MINUTES_PER_DEGREE + minutes;
        if total > axis.bound() as Minutes * MINUTES_PER_DEGREE {
            return Err(range_error(axis, text));
        }

        Ok(GeoCoordinate {
            axis,
            negative: negative && total != 0,
            degrees,
            minutes,
        })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn degrees(&self) -> u32 {
        self.degrees
    }

    pub fn minutes(&self) -> Minutes {
        self.minutes
    }

    pub fn to_degrees(&self) -> Degrees {
        let magnitude = astro_math::dm_to_dec(self.degrees, self.minutes);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Mirror across zero. Zero stays positive.
    pub fn negated(self) -> Self {
        let is_zero = self.degrees == 0 && self.minutes == 0;
        GeoCoordinate {
            negative: !self.negative && !is_zero,
            ..self
        }
    }

    /// The fixed-width `sDD*MM` (latitude) or `sDDD*MM` (longitude) token
    pub fn encode(&self) -> String {
        format!(
            "{}{:0width$}*{:02}",
            if self.negative { '-' } else { '+' },
            self.degrees,
            self.minutes,
            width = self.axis.degree_width()
        )
    }
}

impl Display for GeoCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Parse decimal degrees or an `sDDD*MM` token as a coordinate on `axis`
pub fn parse(text: &str, axis: Axis) -> SetupResult<GeoCoordinate> {
    let text = text.trim();

    if let Some((negative, degrees, minutes)) = split_dm_token(text, axis) {
        return GeoCoordinate::from_parts(axis, negative, degrees, minutes, text);
    }

    if is_decimal(text) {
        let value: Degrees = text.parse().map_err(|_| SetupError::Format {
            axis,
            text: text.to_string(),
        })?;
        // Well-formed but too large for an f64
        if value.is_infinite() {
            return Err(range_error(axis, text));
        }
        return GeoCoordinate::from_degrees_text(value, axis, text);
    }

    Err(SetupError::Format {
        axis,
        text: text.to_string(),
    })
}

pub fn encode(coordinate: &GeoCoordinate) -> String {
    coordinate.encode()
}

fn range_error(axis: Axis, text: &str) -> SetupError {
    SetupError::Range {
        axis,
        text: text.to_string(),
        bound: axis.bound(),
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `sDD*MM` (latitude) or `sDDD*MM` (longitude): mandatory sign, exactly
/// the axis' degree width and exactly 2 minute digits
fn split_dm_token(text: &str, axis: Axis) -> Option<(bool, u32, Minutes)> {
    let negative = match text.as_bytes().first()? {
        b'+' => false,
        b'-' => true,
        _ => return None,
    };

    let (degrees, minutes) = text[1..].split_once('*')?;
    if !all_digits(degrees)
        || degrees.len() != axis.degree_width()
        || !all_digits(minutes)
        || minutes.len() != 2
    {
        return None;
    }

    let degrees = degrees.parse().ok()?;
    let minutes: Minutes = minutes.parse().ok()?;
    if minutes >= MINUTES_PER_DEGREE {
        return None;
    }

    Some((negative, degrees, minutes))
}

/// Optional sign, integer digits, then optionally `.` and fraction digits
fn is_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);
    match unsigned.split_once('.') {
        Some((int, frac)) => all_digits(int) && all_digits(frac),
        None => all_digits(unsigned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        let lat = parse("59.33", Axis::Latitude).unwrap();
        assert!(!lat.is_negative());
        assert_eq!((lat.degrees(), lat.minutes()), (59, 19));
        assert_eq!(lat.encode(), "+59*19");

        let lon = parse("-18.07", Axis::Longitude).unwrap();
        assert!(lon.is_negative());
        assert_eq!(lon.encode(), "-018*04");

        assert_eq!(parse("+5", Axis::Latitude).unwrap().encode(), "+05*00");
        assert_eq!(parse("  7.5 ", Axis::Longitude).unwrap().encode(), "+007*30");
    }

    #[test]
    fn test_parse_dm_token() {
        let lat = parse("+59*19", Axis::Latitude).unwrap();
        assert_float_absolute_eq!(lat.to_degrees(), 59.3166667, 1E-6);

        let lon = parse("-018*04", Axis::Longitude).unwrap();
        assert_float_absolute_eq!(lon.to_degrees(), -18.0666667, 1E-6);
    }

    #[test]
    fn test_non_canonical_width_rejected() {
        for (text, axis) in [
            ("+059*19", Axis::Latitude),
            ("+5*07", Axis::Latitude),
            ("+18*04", Axis::Longitude),
            ("-5*07", Axis::Longitude),
            ("+0180*00", Axis::Longitude),
        ] {
            assert!(
                matches!(parse(text, axis), Err(SetupError::Format { .. })),
                "{:?} should not be accepted as a {}",
                text,
                axis
            );
        }
    }

    #[test]
    fn test_canonical_tokens_round_trip() {
        for token in ["+59*19", "-33*52", "+00*00", "+90*00", "-90*00", "+00*01"] {
            assert_eq!(encode(&parse(token, Axis::Latitude).unwrap()), token);
        }
        for token in ["+018*04", "-122*25", "+180*00", "-180*00", "+000*59"] {
            assert_eq!(encode(&parse(token, Axis::Longitude).unwrap()), token);
        }
    }

    #[test]
    fn test_decimal_within_a_minute() {
        let mut lat = -90.;
        while lat <= 90. {
            let text = format!("{:.4}", lat);
            let value: Degrees = text.parse().unwrap();
            let encoded = parse(&text, Axis::Latitude).unwrap().encode();
            let decoded = parse(&encoded, Axis::Latitude).unwrap().to_degrees();
            assert!(
                (decoded - value).abs() < 1. / 60.,
                "{} encoded as {}",
                text,
                encoded
            );
            lat += 0.0137;
        }
    }

    #[test]
    fn test_zero_is_positive() {
        assert_eq!(parse("-0", Axis::Latitude).unwrap().encode(), "+00*00");
        assert_eq!(parse("-0.001", Axis::Latitude).unwrap().encode(), "+00*00");
        assert_eq!(parse("-000*00", Axis::Longitude).unwrap().encode(), "+000*00");
        assert!(!parse("-0.0", Axis::Longitude).unwrap().negated().is_negative());
    }

    #[test]
    fn test_negative_fraction_of_a_degree() {
        let lat = parse("-0.5", Axis::Latitude).unwrap();
        assert_eq!(lat.encode(), "-00*30");
        assert_float_absolute_eq!(lat.to_degrees(), -0.5, 1E-9);
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            parse("+91*00", Axis::Latitude),
            Err(SetupError::Range {
                axis: Axis::Latitude,
                bound: 90,
                ..
            })
        ));
        assert!(matches!(
            parse("+90*01", Axis::Latitude),
            Err(SetupError::Range { .. })
        ));
        assert!(matches!(
            parse("90.005", Axis::Latitude),
            Err(SetupError::Range { .. })
        ));
        assert!(matches!(
            parse("-180.5", Axis::Longitude),
            Err(SetupError::Range {
                axis: Axis::Longitude,
                bound: 180,
                ..
            })
        ));
        assert!(parse("-180", Axis::Longitude).is_ok());
        assert!(parse("120", Axis::Longitude).is_ok());
        assert!(parse("120", Axis::Latitude).is_err());
    }

    #[test]
    fn test_bad_format() {
        for text in [
            "abc", "", "59,33", "59.", ".5", "+-5", "59*19", "+59*1", "+59*190", "+1234*00",
            "+59*60", "+59:19", "1e3", "NaN", "inf",
        ] {
            assert!(
                matches!(
                    parse(text, Axis::Longitude),
                    Err(SetupError::Format {
                        axis: Axis::Longitude,
                        ..
                    })
                ),
                "{:?} should be a format error",
                text
            );
        }
    }

    #[test]
    fn test_from_degrees() {
        let lon = GeoCoordinate::from_degrees(-122.4194, Axis::Longitude).unwrap();
        assert_eq!(lon.encode(), "-122*25");
        assert!(GeoCoordinate::from_degrees(f64::NAN, Axis::Latitude).is_err());
        assert!(GeoCoordinate::from_degrees(-91., Axis::Latitude).is_err());
    }

    #[test]
    fn test_huge_decimal_is_out_of_range() {
        let text = format!("1{}", "0".repeat(400));
        assert!(matches!(
            parse(&text, Axis::Latitude),
            Err(SetupError::Range {
                axis: Axis::Latitude,
                ..
            })
        ));
        assert!(matches!(
            parse(&format!("-{}", text), Axis::Longitude),
            Err(SetupError::Range { .. })
        ));
        assert!(matches!(
            GeoCoordinate::from_degrees(f64::INFINITY, Axis::Latitude),
            Err(SetupError::Format { .. })
        ));
    }

    #[test]
    fn test_negated() {
        let lon = parse("+018*04", Axis::Longitude).unwrap();
        assert_eq!(lon.negated().encode(), "-018*04");
        assert_eq!(lon.negated().negated(), lon);
    }
}
