//! Coordinate validation, parsing and formatting.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Number of decimals used by [`CoordinateFormat::Decimal`] unless specified otherwise.
pub const DEFAULT_DECIMAL_PRECISION: usize = 6;

lazy_static! {
    static ref DECIMAL_RE: Regex =
        Regex::new(r"^\s*([-+]?\d+(?:\.\d+)?)\s*[,\s]\s*([-+]?\d+(?:\.\d+)?)\s*$")
            .expect("invalid decimal coordinates regex");
    static ref DMS_RE: Regex = Regex::new(concat!(
        r#"(\d{1,3})\s*°\s*(\d{1,2})\s*['′]\s*"#,
        r#"(\d{1,2}(?:\.\d+)?)\s*(?:"|″|'')?\s*([NSEWnsew])"#,
    ))
    .expect("invalid DMS coordinates regex");
}

/// Text representation of a coordinate pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateFormat {
    /// Decimal degrees: `51.507400, -0.127800`.
    #[default]
    Decimal,
    /// Degrees, minutes and seconds: `51°30'26.6"N, 0°7'40.1"W`.
    Dms,
    /// Degrees and decimal minutes: `51°30.444'N, 0°7.668'W`.
    Dmm,
}

/// All supported coordinate formats.
pub const COORDINATE_FORMATS: [CoordinateFormat; 3] = [
    CoordinateFormat::Decimal,
    CoordinateFormat::Dms,
    CoordinateFormat::Dmm,
];

impl CoordinateFormat {
    /// Human readable name of the format.
    pub fn label(&self) -> &'static str {
        match self {
            CoordinateFormat::Decimal => "Decimal Degrees",
            CoordinateFormat::Dms => "Degrees Minutes Seconds",
            CoordinateFormat::Dmm => "Degrees Decimal Minutes",
        }
    }

    /// Example of a formatted coordinate pair.
    pub fn example(&self) -> &'static str {
        match self {
            CoordinateFormat::Decimal => "51.507400, -0.127800",
            CoordinateFormat::Dms => "51°30'26.6\"N, 0°7'40.1\"W",
            CoordinateFormat::Dmm => "51°30.444'N, 0°7.668'W",
        }
    }
}

/// Returns true if `lat` is a finite value within `[-90, 90]`.
pub fn is_valid_latitude(lat: f64) -> bool {
    (-90.0..=90.0).contains(&lat)
}

/// Returns true if `lng` is a finite value within `[-180, 180]`.
pub fn is_valid_longitude(lng: f64) -> bool {
    (-180.0..=180.0).contains(&lng)
}

/// Returns true if both latitude and longitude are valid.
pub fn is_valid_coordinates(lat: f64, lng: f64) -> bool {
    is_valid_latitude(lat) && is_valid_longitude(lng)
}

/// Parses a coordinate pair.
///
/// Accepted inputs are a decimal `"lat, lng"` pair or two DMS values (`DD°MM'SS.S"H`) with
/// hemisphere letters. The DMS values may come in any order, the hemisphere letter decides which
/// axis each one belongs to.
///
/// Returns `None` if the input matches neither form or the parsed values are out of range.
pub fn parse_coordinates(input: &str) -> Option<Position> {
    let parsed = parse_decimal(input).or_else(|| parse_dms(input));
    match parsed {
        Some(position) if position.is_valid() => Some(position),
        Some(position) => {
            log::debug!("Parsed coordinates are out of range: {position:?}");
            None
        }
        None => {
            log::debug!("Failed to parse coordinates from {input:?}");
            None
        }
    }
}

fn parse_decimal(input: &str) -> Option<Position> {
    let caps = DECIMAL_RE.captures(input)?;
    let lat: f64 = caps.get(1)?.as_str().parse().ok()?;
    let lng: f64 = caps.get(2)?.as_str().parse().ok()?;
    Some(Position::new(lng, lat))
}

fn parse_dms(input: &str) -> Option<Position> {
    let mut lat = None;
    let mut lng = None;

    for caps in DMS_RE.captures_iter(input) {
        let degrees: f64 = caps.get(1)?.as_str().parse().ok()?;
        let minutes: f64 = caps.get(2)?.as_str().parse().ok()?;
        let seconds: f64 = caps.get(3)?.as_str().parse().ok()?;
        if minutes >= 60.0 || seconds >= 60.0 {
            return None;
        }

        let value = degrees + minutes / 60.0 + seconds / 3600.0;
        let slot = match caps.get(4)?.as_str().to_ascii_uppercase().as_str() {
            "N" => (&mut lat, value),
            "S" => (&mut lat, -value),
            "E" => (&mut lng, value),
            "W" => (&mut lng, -value),
            _ => return None,
        };

        if slot.0.replace(slot.1).is_some() {
            return None;
        }
    }

    Some(Position::new(lng?, lat?))
}

/// Formats a coordinate pair, latitude first.
///
/// `precision` is the number of decimals for [`CoordinateFormat::Decimal`]. DMS output always uses
/// one decimal for seconds and DMM output three decimals for minutes.
pub fn format_coordinates(
    lat: f64,
    lng: f64,
    format: CoordinateFormat,
    precision: usize,
) -> String {
    match format {
        CoordinateFormat::Decimal => format!("{lat:.precision$}, {lng:.precision$}"),
        CoordinateFormat::Dms => format!("{}, {}", to_dms(lat, true), to_dms(lng, false)),
        CoordinateFormat::Dmm => format!("{}, {}", to_dmm(lat, true), to_dmm(lng, false)),
    }
}

fn hemisphere(value: f64, is_lat: bool) -> char {
    match (is_lat, value >= 0.0) {
        (true, true) => 'N',
        (true, false) => 'S',
        (false, true) => 'E',
        (false, false) => 'W',
    }
}

fn to_dms(value: f64, is_lat: bool) -> String {
    let abs = value.abs();
    let mut degrees = abs.trunc();
    let minutes_full = (abs - degrees) * 60.0;
    let mut minutes = minutes_full.trunc();
    let mut seconds = ((minutes_full - minutes) * 60.0 * 10.0).round() / 10.0;

    if seconds >= 60.0 {
        seconds -= 60.0;
        minutes += 1.0;
    }
    if minutes >= 60.0 {
        minutes -= 60.0;
        degrees += 1.0;
    }

    format!(
        "{degrees}°{minutes}'{seconds:.1}\"{}",
        hemisphere(value, is_lat)
    )
}

fn to_dmm(value: f64, is_lat: bool) -> String {
    let abs = value.abs();
    let mut degrees = abs.trunc();
    let mut minutes = ((abs - degrees) * 60.0 * 1000.0).round() / 1000.0;

    if minutes >= 60.0 {
        minutes -= 60.0;
        degrees += 1.0;
    }

    format!("{degrees}°{minutes:.3}'{}", hemisphere(value, is_lat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlng;
    use approx::assert_abs_diff_eq;

    #[test]
    fn validation() {
        assert!(is_valid_latitude(90.0));
        assert!(is_valid_latitude(-90.0));
        assert!(!is_valid_latitude(90.0001));
        assert!(!is_valid_latitude(f64::NAN));
        assert!(is_valid_longitude(-180.0));
        assert!(!is_valid_longitude(180.5));
        assert!(is_valid_coordinates(45.0, 170.0));
        assert!(!is_valid_coordinates(170.0, 45.0));
    }

    #[test]
    fn parse_decimal_pair() {
        assert_eq!(
            parse_coordinates("51.5074, -0.1278"),
            Some(latlng!(51.5074, -0.1278))
        );
        assert_eq!(
            parse_coordinates("  -33.86 151.21 "),
            Some(latlng!(-33.86, 151.21))
        );
        assert_eq!(parse_coordinates("10,20"), Some(latlng!(10.0, 20.0)));
    }

    #[test]
    fn parse_rejects_garbage_and_out_of_range() {
        assert_eq!(parse_coordinates(""), None);
        assert_eq!(parse_coordinates("somewhere nice"), None);
        assert_eq!(parse_coordinates("91.0, 0.0"), None);
        assert_eq!(parse_coordinates("0.0, 181.0"), None);
        assert_eq!(parse_coordinates("51.5"), None);
    }

    #[test]
    fn parse_dms_pair() {
        let p = parse_coordinates("40°26'46.3\"N 79°58'56.0\"W").unwrap();
        assert_abs_diff_eq!(p.lat, 40.446194, epsilon = 1e-5);
        assert_abs_diff_eq!(p.lng, -79.982222, epsilon = 1e-5);

        let swapped = parse_coordinates("79°58'56.0\"W, 40°26'46.3\"N").unwrap();
        assert_eq!(swapped, p);

        let south = parse_coordinates("33°52'4\"S 151°12'26\"E").unwrap();
        assert!(south.lat < 0.0);
        assert!(south.lng > 0.0);
    }

    #[test]
    fn parse_dms_requires_both_axes() {
        assert_eq!(parse_coordinates("40°26'46.3\"N"), None);
        assert_eq!(parse_coordinates("40°26'46.3\"N 41°26'46.3\"N"), None);
        assert_eq!(parse_coordinates("40°61'46.3\"N 79°58'56.0\"W"), None);
    }

    #[test]
    fn format_decimal() {
        assert_eq!(
            format_coordinates(51.5074, -0.1278, CoordinateFormat::Decimal, 6),
            "51.507400, -0.127800"
        );
        assert_eq!(
            format_coordinates(51.5074, -0.1278, CoordinateFormat::Decimal, 2),
            "51.51, -0.13"
        );
    }

    #[test]
    fn format_dms_and_dmm() {
        assert_eq!(
            format_coordinates(40.446195, -79.982222, CoordinateFormat::Dms, 6),
            "40°26'46.3\"N, 79°58'56.0\"W"
        );
        assert_eq!(
            format_coordinates(40.446195, -79.982222, CoordinateFormat::Dmm, 6),
            "40°26.772'N, 79°58.933'W"
        );
    }

    #[test]
    fn format_dms_carries_rounded_seconds() {
        assert_eq!(
            format_coordinates(10.999999, 0.0, CoordinateFormat::Dms, 6),
            "11°0'0.0\"N, 0°0'0.0\"E"
        );
    }

    #[test]
    fn decimal_roundtrip() {
        let samples = [
            (0.0, 0.0),
            (51.507351, -0.127758),
            (-33.868820, 151.209296),
            (89.999999, -179.999999),
            (-45.123456, 12.654321),
        ];

        for (lat, lng) in samples {
            let text = format_coordinates(lat, lng, CoordinateFormat::Decimal, 6);
            let parsed = parse_coordinates(&text).unwrap();
            assert_abs_diff_eq!(parsed.lat, lat, epsilon = 1e-6);
            assert_abs_diff_eq!(parsed.lng, lng, epsilon = 1e-6);
        }
    }

    #[test]
    fn dms_roundtrip_agrees_to_display_precision() {
        let text = format_coordinates(48.858370, 2.294481, CoordinateFormat::Dms, 6);
        let parsed = parse_coordinates(&text).unwrap();
        let again = format_coordinates(parsed.lat, parsed.lng, CoordinateFormat::Dms, 6);
        assert_eq!(text, again);
    }

    #[test]
    fn format_table() {
        assert_eq!(COORDINATE_FORMATS.len(), 3);
        assert_eq!(
            serde_json::to_value(CoordinateFormat::Dmm).unwrap(),
            serde_json::json!("dmm")
        );
        for format in [CoordinateFormat::Decimal, CoordinateFormat::Dms] {
            assert!(parse_coordinates(format.example()).is_some());
        }
    }
}
