//! Great-circle distances, bearings and projections on a spherical Earth.

use serde::{Deserialize, Serialize};

use crate::position::{deg_to_rad, rad_to_deg, LatLon, NewLatLon};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Unit of the distances returned and accepted by the functions of this module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    /// Kilometers.
    #[default]
    Kilometers,
    /// Statute miles.
    Miles,
}

impl DistanceUnit {
    /// Earth radius expressed in this unit.
    pub fn earth_radius(&self) -> f64 {
        match self {
            DistanceUnit::Kilometers => EARTH_RADIUS_KM,
            DistanceUnit::Miles => EARTH_RADIUS_MILES,
        }
    }
}

/// Haversine great-circle distance between two points.
pub fn calculate_distance(a: &impl LatLon, b: &impl LatLon, unit: DistanceUnit) -> f64 {
    let d_lat = deg_to_rad(b.lat() - a.lat());
    let d_lng = deg_to_rad(b.lng() - a.lng());

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat_rad().cos() * b.lat_rad().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    unit.earth_radius() * c
}

/// Initial bearing from `from` to `to` in degrees, normalized to `[0, 360)`.
pub fn calculate_bearing(from: &impl LatLon, to: &impl LatLon) -> f64 {
    let lat1 = from.lat_rad();
    let lat2 = to.lat_rad();
    let d_lng = deg_to_rad(to.lng() - from.lng());

    let y = d_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();

    (rad_to_deg(y.atan2(x)) + 360.0) % 360.0
}

/// Maps a bearing in degrees to one of the 16 compass points (`N`, `NNE`, ... `NNW`).
pub fn bearing_to_direction(bearing: f64) -> &'static str {
    let normalized = bearing.rem_euclid(360.0);
    let index = (normalized / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

/// Projects a point `distance` away from `origin` along the initial `bearing` (degrees).
///
/// Longitude of the result is normalized to `[-180, 180)`.
pub fn calculate_destination<P: NewLatLon>(
    origin: &impl LatLon,
    bearing: f64,
    distance: f64,
    unit: DistanceUnit,
) -> P {
    let angular = distance / unit.earth_radius();
    let bearing = deg_to_rad(bearing);
    let lat1 = origin.lat_rad();
    let lng1 = origin.lng_rad();

    let sin_lat2 = lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos();
    let lat2 = sin_lat2.asin();
    let lng2 = lng1
        + (bearing.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());

    let lng2 = (rad_to_deg(lng2) + 540.0) % 360.0 - 180.0;
    P::latlng(rad_to_deg(lat2), lng2)
}

/// Total length of a path through the given waypoints. Returns 0 for fewer than two waypoints.
pub fn flight_path_length<P: LatLon>(waypoints: &[P], unit: DistanceUnit) -> f64 {
    waypoints
        .windows(2)
        .map(|pair| calculate_distance(&pair[0], &pair[1], unit))
        .sum()
}

/// Returns true if `point` is within `radius` of `center` (boundary included).
pub fn is_point_in_circle(
    point: &impl LatLon,
    center: &impl LatLon,
    radius: f64,
    unit: DistanceUnit,
) -> bool {
    calculate_distance(point, center, unit) <= radius
}
