//! Unit conversions for altitudes and areas.

use serde::{Deserialize, Serialize};

/// Meters in one international foot.
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Default altitude ceiling for open-category operations, in feet AGL.
pub const DEFAULT_ALTITUDE_LIMIT_FT: f64 = 400.0;

const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;
const SQUARE_METERS_PER_ACRE: f64 = 4_046.856_422_4;

/// Converts feet to meters.
pub fn feet_to_meters(feet: f64) -> f64 {
    feet * METERS_PER_FOOT
}

/// Converts meters to feet.
pub fn meters_to_feet(meters: f64) -> f64 {
    meters / METERS_PER_FOOT
}

/// Converts an altitude above ground level into mean sea level, given the terrain elevation (same
/// units).
pub fn agl_to_msl(altitude_agl: f64, terrain_elevation: f64) -> f64 {
    altitude_agl + terrain_elevation
}

/// Converts an altitude above mean sea level into above ground level, given the terrain elevation
/// (same units).
pub fn msl_to_agl(altitude_msl: f64, terrain_elevation: f64) -> f64 {
    altitude_msl - terrain_elevation
}

/// Converts square meters to hectares.
pub fn square_meters_to_hectares(area: f64) -> f64 {
    area / SQUARE_METERS_PER_HECTARE
}

/// Converts square meters to acres.
pub fn square_meters_to_acres(area: f64) -> f64 {
    area / SQUARE_METERS_PER_ACRE
}

/// Result of [`check_altitude_limit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AltitudeCheck {
    /// True if the altitude does not exceed the limit.
    pub within_limit: bool,
    /// Remaining headroom in feet. Negative when the limit is exceeded.
    pub margin_ft: f64,
    /// Limit the altitude was checked against, in feet.
    pub limit_ft: f64,
}

/// Checks an altitude in feet against a ceiling in feet. `None` uses [`DEFAULT_ALTITUDE_LIMIT_FT`].
pub fn check_altitude_limit(altitude_ft: f64, limit_ft: Option<f64>) -> AltitudeCheck {
    let limit_ft = limit_ft.unwrap_or(DEFAULT_ALTITUDE_LIMIT_FT);
    AltitudeCheck {
        within_limit: altitude_ft <= limit_ft,
        margin_ft: limit_ft - altitude_ft,
        limit_ft,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn feet_and_meters() {
        assert_abs_diff_eq!(feet_to_meters(400.0), 121.92, epsilon = 1e-9);
        assert_abs_diff_eq!(meters_to_feet(120.0), 393.7008, epsilon = 1e-4);
        assert_abs_diff_eq!(meters_to_feet(feet_to_meters(123.4)), 123.4, epsilon = 1e-9);
    }

    #[test]
    fn reference_frames() {
        assert_eq!(agl_to_msl(120.0, 35.0), 155.0);
        assert_eq!(msl_to_agl(155.0, 35.0), 120.0);
    }

    #[test]
    fn altitude_limit() {
        let check = check_altitude_limit(350.0, None);
        assert!(check.within_limit);
        assert_eq!(check.margin_ft, 50.0);
        assert_eq!(check.limit_ft, DEFAULT_ALTITUDE_LIMIT_FT);

        assert!(check_altitude_limit(400.0, None).within_limit);

        let check = check_altitude_limit(450.0, Some(400.0));
        assert!(!check.within_limit);
        assert_eq!(check.margin_ft, -50.0);

        assert!(!check_altitude_limit(250.0, Some(200.0)).within_limit);
    }

    #[test]
    fn areas() {
        assert_eq!(square_meters_to_hectares(25_000.0), 2.5);
        let acres = square_meters_to_acres(4_046.856_422_4);
        assert_abs_diff_eq!(acres, 1.0, epsilon = 1e-12);
    }
}
