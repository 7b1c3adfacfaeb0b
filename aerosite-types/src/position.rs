//! Geographic positions and the traits the geometry functions are generic over.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coords::{is_valid_coordinates, parse_coordinates};
use crate::error::AerositeTypesError;

/// Converts degrees to radians.
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Converts radians to degrees.
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// A point on the surface of the Earth given in degrees.
pub trait LatLon {
    /// Latitude in degrees.
    fn lat(&self) -> f64;
    /// Longitude in degrees.
    fn lng(&self) -> f64;

    /// Latitude in radians.
    fn lat_rad(&self) -> f64 {
        deg_to_rad(self.lat())
    }

    /// Longitude in radians.
    fn lng_rad(&self) -> f64 {
        deg_to_rad(self.lng())
    }
}

/// A [`LatLon`] type that can be constructed from coordinates.
pub trait NewLatLon: LatLon + Sized {
    /// Creates a point from latitude and longitude.
    fn latlng(lat: f64, lng: f64) -> Self;

    /// Creates a point from longitude and latitude (GeoJSON order).
    fn lnglat(lng: f64, lat: f64) -> Self {
        Self::latlng(lat, lng)
    }
}

/// GeoJSON position: longitude, latitude and optional altitude in meters.
///
/// Serializes as a `[lng, lat]` or `[lng, lat, alt]` array.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Position {
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Altitude in meters.
    pub alt: Option<f64>,
}

impl Position {
    /// Creates a position without altitude.
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self {
            lng,
            lat,
            alt: None,
        }
    }

    /// Creates a position with altitude.
    pub const fn with_alt(lng: f64, lat: f64, alt: f64) -> Self {
        Self {
            lng,
            lat,
            alt: Some(alt),
        }
    }

    /// Creates a position copying latitude and longitude of any other point.
    pub fn from_point(other: &impl LatLon) -> Self {
        Self::new(other.lng(), other.lat())
    }

    /// Returns true if both coordinates are within the valid WGS84 range.
    pub fn is_valid(&self) -> bool {
        is_valid_coordinates(self.lat, self.lng)
    }

    /// Compares horizontal coordinates only, ignoring altitude.
    pub fn same_location(&self, other: &Self) -> bool {
        self.lng == other.lng && self.lat == other.lat
    }
}

impl LatLon for Position {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lng(&self) -> f64 {
        self.lng
    }
}

impl NewLatLon for Position {
    fn latlng(lat: f64, lng: f64) -> Self {
        Self::new(lng, lat)
    }
}

impl LatLon for (f64, f64) {
    fn lat(&self) -> f64 {
        self.0
    }

    fn lng(&self) -> f64 {
        self.1
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = AerositeTypesError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        match value.as_slice() {
            [lng, lat] => Ok(Self::new(*lng, *lat)),
            [lng, lat, alt] => Ok(Self::with_alt(*lng, *lat, *alt)),
            _ => Err(AerositeTypesError::Conversion(format!(
                "position must contain 2 or 3 values, got {}",
                value.len()
            ))),
        }
    }
}

impl From<Position> for Vec<f64> {
    fn from(value: Position) -> Self {
        match value.alt {
            Some(alt) => vec![value.lng, value.lat, alt],
            None => vec![value.lng, value.lat],
        }
    }
}

impl FromStr for Position {
    type Err = AerositeTypesError;

    /// Parses either `"lat, lng"` decimal degrees or a DMS pair.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_coordinates(s)
            .ok_or_else(|| AerositeTypesError::InvalidCoordinates(s.to_string()))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Creates a new [`Position`] from latitude and longitude values (in degrees).
///
/// ```
/// use aerosite_types::{latlng, LatLon};
///
/// let point = latlng!(38.0, 52.0);
/// assert_eq!(point.lat(), 38.0);
/// assert_eq!(point.lng(), 52.0);
/// ```
#[macro_export]
macro_rules! latlng {
    ($lat:expr, $lng:expr) => {
        <$crate::position::Position as $crate::position::NewLatLon>::latlng($lat, $lng)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn serializes_as_array() {
        let p = Position::new(-0.1278, 51.5074);
        assert_eq!(
            serde_json::to_value(p).unwrap(),
            serde_json::json!([-0.1278, 51.5074])
        );

        let p = Position::with_alt(1.0, 2.0, 120.0);
        assert_eq!(
            serde_json::to_value(p).unwrap(),
            serde_json::json!([1.0, 2.0, 120.0])
        );
    }

    #[test]
    fn deserializes_from_array() {
        let p: Position = serde_json::from_str("[10.5, 20.25]").unwrap();
        assert_eq!(p, Position::new(10.5, 20.25));

        let p: Position = serde_json::from_str("[10.5, 20.25, 3.0]").unwrap();
        assert_eq!(p.alt, Some(3.0));

        assert!(serde_json::from_str::<Position>("[10.5]").is_err());
        let too_long = serde_json::from_str::<Position>("[1.0, 2.0, 3.0, 4.0]");
        assert!(too_long.is_err());
    }

    #[test]
    fn latlng_macro_uses_lat_first() {
        let p = latlng!(10.0, 20.0);
        assert_eq!(p.lng, 20.0);
        assert_eq!(p.lat, 10.0);
        assert_eq!(Position::lnglat(20.0, 10.0), p);
    }

    #[test]
    fn from_str() {
        let p: Position = "51.5, -0.12".parse().unwrap();
        assert_eq!(p, latlng!(51.5, -0.12));

        assert_matches!(
            "north pole".parse::<Position>(),
            Err(AerositeTypesError::InvalidCoordinates(_))
        );
    }

    #[test]
    fn radians() {
        assert_abs_diff_eq!(deg_to_rad(180.0), std::f64::consts::PI, epsilon = 1e-12);
        assert_abs_diff_eq!(rad_to_deg(std::f64::consts::PI), 180.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            latlng!(90.0, 0.0).lat_rad(),
            std::f64::consts::FRAC_PI_2,
            epsilon = 1e-12
        );
    }
}
