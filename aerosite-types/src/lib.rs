//! GeoJSON-shaped geometries and the spherical-earth math used to plan drone operation sites.
//!
//! All coordinates are WGS84 degrees. Geometries follow the GeoJSON convention of storing positions
//! in `[longitude, latitude, altitude?]` order, while the helper functions take anything
//! implementing [`LatLon`], so that the order of arguments is never ambiguous.
//!
//! ```
//! use aerosite_types::{calculate_distance, latlng, DistanceUnit};
//!
//! let london = latlng!(51.5074, -0.1278);
//! let paris = latlng!(48.8566, 2.3522);
//! let km = calculate_distance(&london, &paris, DistanceUnit::Kilometers);
//! assert!((km - 343.5).abs() < 1.0);
//! ```
//!
//! # Known limitations
//!
//! Area and bounding box calculations treat longitudes as a plain linear range, so polygons
//! crossing the antimeridian or containing a pole produce incorrect results.

pub mod bounds;
pub mod coords;
pub mod distance;
pub mod error;
pub mod geometry;
pub mod polygon;
pub mod position;
pub mod units;

pub use bounds::BoundingBox;
pub use coords::{
    format_coordinates, is_valid_coordinates, is_valid_latitude, is_valid_longitude,
    parse_coordinates, CoordinateFormat, COORDINATE_FORMATS, DEFAULT_DECIMAL_PRECISION,
};
pub use distance::{
    bearing_to_direction, calculate_bearing, calculate_destination, calculate_distance,
    flight_path_length, is_point_in_circle, DistanceUnit, EARTH_RADIUS_KM, EARTH_RADIUS_MILES,
};
pub use error::AerositeTypesError;
pub use geometry::{
    create_line, create_point, create_polygon, GeoLine, GeoPoint, GeoPolygon, Geometry,
};
pub use polygon::{
    create_circle_polygon, is_point_in_polygon, polygon_area, polygon_center, DEFAULT_CIRCLE_POINTS,
};
pub use position::{deg_to_rad, rad_to_deg, LatLon, NewLatLon, Position};
pub use units::{
    agl_to_msl, check_altitude_limit, feet_to_meters, meters_to_feet, msl_to_agl,
    square_meters_to_acres, square_meters_to_hectares, AltitudeCheck, DEFAULT_ALTITUDE_LIMIT_FT,
};
