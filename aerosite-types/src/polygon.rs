//! Measurements and predicates on polygon rings.
//!
//! Functions accept rings either closed (last position repeats the first) or open.

use crate::distance::{calculate_destination, DistanceUnit, EARTH_RADIUS_KM};
use crate::geometry::{create_polygon, GeoPolygon};
use crate::position::{deg_to_rad, LatLon, Position};

/// Default number of vertices used to approximate a circle.
pub const DEFAULT_CIRCLE_POINTS: usize = 32;

fn open_ring<P: LatLon>(ring: &[P]) -> &[P] {
    match ring {
        [first, .., last] if first.lat() == last.lat() && first.lng() == last.lng() => {
            &ring[..ring.len() - 1]
        }
        _ => ring,
    }
}

/// Approximate area of the polygon on a spherical Earth, in square meters.
///
/// Uses the spherical excess approximation, which is accurate for site-sized and regional polygons.
/// Returns 0 for rings with fewer than 3 vertices.
pub fn polygon_area<P: LatLon>(ring: &[P]) -> f64 {
    let vertices = open_ring(ring);
    if vertices.len() < 3 {
        return 0.0;
    }

    let radius_m = EARTH_RADIUS_KM * 1000.0;
    let mut sum = 0.0;
    for (i, p1) in vertices.iter().enumerate() {
        let p2 = &vertices[(i + 1) % vertices.len()];
        sum += deg_to_rad(p2.lng() - p1.lng()) * (2.0 + p1.lat_rad().sin() + p2.lat_rad().sin());
    }

    (sum * radius_m * radius_m / 2.0).abs()
}

/// Center of the polygon computed as the mean of its vertices. Returns `None` for an empty ring.
pub fn polygon_center<P: LatLon>(ring: &[P]) -> Option<Position> {
    let vertices = open_ring(ring);
    if vertices.is_empty() {
        return None;
    }

    let count = vertices.len() as f64;
    let (lat_sum, lng_sum) = vertices
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat(), lng + p.lng()));

    Some(Position::new(lng_sum / count, lat_sum / count))
}

/// Ray casting test of whether `point` lies inside the ring.
///
/// Points exactly on an edge or vertex may be reported either way.
pub fn is_point_in_polygon<P: LatLon>(point: &impl LatLon, ring: &[P]) -> bool {
    let vertices = open_ring(ring);
    let x = point.lng();
    let y = point.lat();

    let mut inside = false;
    let mut j = match vertices.len() {
        0 => return false,
        len => len - 1,
    };

    for (i, vi) in vertices.iter().enumerate() {
        let vj = &vertices[j];
        let (xi, yi) = (vi.lng(), vi.lat());
        let (xj, yj) = (vj.lng(), vj.lat());

        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }

        j = i;
    }

    inside
}

/// Approximates a circle of `radius_km` around `center` with a closed polygon of `num_points`
/// vertices.
pub fn create_circle_polygon(
    center: &impl LatLon,
    radius_km: f64,
    num_points: usize,
) -> GeoPolygon {
    let ring = (0..num_points)
        .map(|i| {
            let bearing = 360.0 * i as f64 / num_points as f64;
            calculate_destination::<Position>(center, bearing, radius_km, DistanceUnit::Kilometers)
        })
        .collect();

    create_polygon(ring, true)
}

impl GeoPolygon {
    /// Area of the outer ring in square meters. See [`polygon_area`].
    pub fn area(&self) -> f64 {
        polygon_area(self.ring())
    }

    /// Mean of the vertices. See [`polygon_center`].
    pub fn center(&self) -> Option<Position> {
        polygon_center(self.ring())
    }

    /// Returns true if the point is inside the outer ring. See [`is_point_in_polygon`].
    pub fn contains(&self, point: &impl LatLon) -> bool {
        is_point_in_polygon(point, self.ring())
    }
}
