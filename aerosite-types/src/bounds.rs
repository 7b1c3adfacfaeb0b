//! Geographic bounding boxes of point sets.

use serde::{Deserialize, Serialize};

use crate::position::{deg_to_rad, LatLon, Position};

/// Kilometers per degree of latitude, used to convert margins into degrees.
pub const KM_PER_DEGREE: f64 = 111.32;

/// Geographic bounding box in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Northern (maximum) latitude.
    pub north: f64,
    /// Southern (minimum) latitude.
    pub south: f64,
    /// Eastern (maximum) longitude.
    pub east: f64,
    /// Western (minimum) longitude.
    pub west: f64,
}

impl BoundingBox {
    /// Creates a new bounding box.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Bounding box containing a single point.
    pub fn from_point(p: &impl LatLon) -> Self {
        Self {
            north: p.lat(),
            south: p.lat(),
            east: p.lng(),
            west: p.lng(),
        }
    }

    /// Smallest box containing all the points. Returns `None` if the iterator is empty.
    pub fn from_points<'a, P: LatLon + 'a>(
        mut points: impl Iterator<Item = &'a P>,
    ) -> Option<Self> {
        let first = points.next()?;
        let mut bbox = Self::from_point(first);

        for p in points {
            if bbox.south > p.lat() {
                bbox.south = p.lat();
            }
            if bbox.north < p.lat() {
                bbox.north = p.lat();
            }
            if bbox.west > p.lng() {
                bbox.west = p.lng();
            }
            if bbox.east < p.lng() {
                bbox.east = p.lng();
            }
        }

        Some(bbox)
    }

    /// Center of the box.
    pub fn center(&self) -> Position {
        let lng = (self.east + self.west) / 2.0;
        let lat = (self.north + self.south) / 2.0;
        Position::new(lng, lat)
    }

    /// Smallest box containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            north: self.north.max(other.north),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            west: self.west.min(other.west),
        }
    }

    /// Smallest box containing all the given boxes. Returns `None` if there are none.
    pub fn merge_all(boxes: impl IntoIterator<Item = Self>) -> Option<Self> {
        boxes.into_iter().reduce(|acc, bbox| acc.merge(bbox))
    }

    /// Grows the box by `margin_km` on every side.
    ///
    /// The longitude margin is divided by the cosine of the center latitude to account for
    /// meridians converging towards the poles. Latitudes are clamped to `[-90, 90]`.
    pub fn expand(&self, margin_km: f64) -> Self {
        let lat_margin = margin_km / KM_PER_DEGREE;
        let center_lat = deg_to_rad(self.center().lat);
        let lng_margin = margin_km / (KM_PER_DEGREE * center_lat.cos());

        Self {
            north: (self.north + lat_margin).min(90.0),
            south: (self.south - lat_margin).max(-90.0),
            east: self.east + lng_margin,
            west: self.west - lng_margin,
        }
    }

    /// Returns true if the point is inside the box or on its border.
    pub fn contains(&self, point: &impl LatLon) -> bool {
        self.south <= point.lat()
            && self.north >= point.lat()
            && self.west <= point.lng()
            && self.east >= point.lng()
    }

    /// Height of the box in degrees.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Width of the box in degrees.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlng;
    use approx::assert_abs_diff_eq;

    #[test]
    fn from_points() {
        let points = [latlng!(1.0, 2.0), latlng!(-3.0, 5.0), latlng!(0.5, -1.0)];
        let bbox = BoundingBox::from_points(points.iter()).unwrap();
        assert_eq!(bbox, BoundingBox::new(1.0, -3.0, 5.0, -1.0));
        assert_eq!(bbox.center(), latlng!(-1.0, 2.0));

        let empty: [Position; 0] = [];
        assert_eq!(BoundingBox::from_points(empty.iter()), None);
    }

    #[test]
    fn contains_own_vertices() {
        // Convex polygon around a center, sampled at irregular angles.
        let center = latlng!(47.3, 8.5);
        let vertices: Vec<Position> = [0.0_f64, 40.0, 95.0, 170.0, 220.0, 300.0]
            .iter()
            .enumerate()
            .map(|(i, angle)| {
                let r = 0.01 + 0.003 * i as f64;
                let a = angle.to_radians();
                latlng!(center.lat + r * a.sin(), center.lng + r * a.cos())
            })
            .collect();

        let bbox = BoundingBox::from_points(vertices.iter()).unwrap();
        for v in &vertices {
            assert!(bbox.contains(v));
        }
        assert!(bbox.contains(&center));
        assert!(!bbox.contains(&latlng!(48.0, 8.5)));
    }

    #[test]
    fn expand_uses_latitude_correction() {
        let equator = BoundingBox::new(0.5, -0.5, 0.5, -0.5);
        let equator = equator.expand(KM_PER_DEGREE);
        assert_abs_diff_eq!(equator.north, 1.5, epsilon = 1e-9);
        assert_abs_diff_eq!(equator.east, 1.5, epsilon = 1e-9);

        let north = BoundingBox::new(60.5, 59.5, 0.5, -0.5);
        let north = north.expand(KM_PER_DEGREE);
        assert_abs_diff_eq!(north.north, 61.5, epsilon = 1e-9);
        assert_abs_diff_eq!(north.east, 2.5, epsilon = 1e-6);
    }

    #[test]
    fn expand_clamps_latitude() {
        let bbox = BoundingBox::new(89.9, 89.0, 1.0, 0.0).expand(50.0);
        assert_eq!(bbox.north, 90.0);
    }

    #[test]
    fn merge_all() {
        let merged = BoundingBox::merge_all([
            BoundingBox::new(1.0, 0.0, 1.0, 0.0),
            BoundingBox::new(3.0, 2.0, -1.0, -2.0),
        ]);
        assert_eq!(merged, Some(BoundingBox::new(3.0, 0.0, 1.0, -2.0)));
        assert_eq!(BoundingBox::merge_all([]), None);
    }
}
