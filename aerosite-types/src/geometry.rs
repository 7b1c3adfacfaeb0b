//! GeoJSON-shaped geometries: [`GeoPoint`], [`GeoPolygon`] (single ring, no holes) and [`GeoLine`].
//!
//! The constructors in this module never fail and do not check coordinate ranges. Use the
//! validators in [`crate::coords`] before constructing, or [`GeoPolygon::validate`] after.

use serde::{Deserialize, Serialize};

use crate::error::AerositeTypesError;
use crate::position::Position;

/// Minimum number of positions in a closed polygon ring (a triangle plus the closing position).
pub const MIN_RING_POSITIONS: usize = 4;

/// GeoJSON `Point` geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Point")]
pub struct GeoPoint {
    /// Position of the point.
    pub coordinates: Position,
}

/// GeoJSON `Polygon` geometry with a single outer ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Polygon")]
pub struct GeoPolygon {
    /// Rings of the polygon. Only the first (outer) ring is used.
    pub coordinates: Vec<Vec<Position>>,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "LineString")]
pub struct GeoLine {
    /// Vertices of the line.
    pub coordinates: Vec<Position>,
}

/// Any of the supported geometries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Geometry {
    /// Point geometry.
    Point(GeoPoint),
    /// Polygon geometry.
    Polygon(GeoPolygon),
    /// Line geometry.
    Line(GeoLine),
}

/// Creates a point geometry.
pub fn create_point(lng: f64, lat: f64, alt: Option<f64>) -> GeoPoint {
    GeoPoint {
        coordinates: Position { lng, lat, alt },
    }
}

/// Creates a polygon geometry from a ring of positions.
///
/// If `close` is set and the ring does not end with its first position, the first position is
/// appended.
pub fn create_polygon(ring: Vec<Position>, close: bool) -> GeoPolygon {
    let mut ring = ring;
    if close {
        if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
            if !first.same_location(last) {
                ring.push(*first);
            }
        }
    }

    GeoPolygon {
        coordinates: vec![ring],
    }
}

/// Creates a line geometry.
pub fn create_line(positions: Vec<Position>) -> GeoLine {
    GeoLine {
        coordinates: positions,
    }
}

impl GeoPoint {
    /// Position of the point.
    pub fn position(&self) -> &Position {
        &self.coordinates
    }
}

impl GeoPolygon {
    /// Outer ring of the polygon. Empty if the polygon has no rings.
    pub fn ring(&self) -> &[Position] {
        self.coordinates.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Vertices of the outer ring without the closing position.
    pub fn vertices(&self) -> &[Position] {
        let ring = self.ring();
        match ring {
            [first, .., last] if first.same_location(last) => &ring[..ring.len() - 1],
            _ => ring,
        }
    }

    /// Returns true if the outer ring ends with its first position.
    pub fn is_closed(&self) -> bool {
        match self.ring() {
            [first, .., last] => first.same_location(last),
            _ => false,
        }
    }

    /// Checks that the ring is closed, long enough and contains only valid coordinates.
    pub fn validate(&self) -> Result<(), AerositeTypesError> {
        let ring = self.ring();
        if ring.len() < MIN_RING_POSITIONS {
            return Err(AerositeTypesError::TooFewPositions {
                expected: MIN_RING_POSITIONS,
                actual: ring.len(),
            });
        }

        if !self.is_closed() {
            return Err(AerositeTypesError::OpenRing);
        }

        if let Some(invalid) = ring.iter().find(|p| !p.is_valid()) {
            return Err(AerositeTypesError::InvalidCoordinates(invalid.to_string()));
        }

        Ok(())
    }
}

impl GeoLine {
    /// Vertices of the line.
    pub fn positions(&self) -> &[Position] {
        &self.coordinates
    }
}

impl Geometry {
    /// Iterates over every position of the geometry, including the closing position of polygon
    /// rings.
    pub fn positions(&self) -> Box<dyn Iterator<Item = &Position> + '_> {
        match self {
            Geometry::Point(p) => Box::new(std::iter::once(&p.coordinates)),
            Geometry::Polygon(p) => Box::new(p.coordinates.iter().flatten()),
            Geometry::Line(l) => Box::new(l.coordinates.iter()),
        }
    }
}

impl From<GeoPoint> for Geometry {
    fn from(value: GeoPoint) -> Self {
        Self::Point(value)
    }
}

impl From<GeoPolygon> for Geometry {
    fn from(value: GeoPolygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<GeoLine> for Geometry {
    fn from(value: GeoLine) -> Self {
        Self::Line(value)
    }
}

#[cfg(feature = "geojson")]
mod geojson_impls {
    use geojson::Value;

    use super::*;

    fn to_geojson_position(p: &Position) -> geojson::Position {
        Vec::from(*p)
    }

    fn from_geojson_positions(
        positions: &[geojson::Position],
    ) -> Result<Vec<Position>, AerositeTypesError> {
        positions
            .iter()
            .map(|p| Position::try_from(p.clone()))
            .collect()
    }

    impl From<&Geometry> for geojson::Geometry {
        fn from(value: &Geometry) -> Self {
            let value = match value {
                Geometry::Point(p) => Value::Point(to_geojson_position(&p.coordinates)),
                Geometry::Polygon(p) => Value::Polygon(
                    p.coordinates
                        .iter()
                        .map(|ring| ring.iter().map(to_geojson_position).collect())
                        .collect(),
                ),
                Geometry::Line(l) => {
                    Value::LineString(l.coordinates.iter().map(to_geojson_position).collect())
                }
            };

            geojson::Geometry::new(value)
        }
    }

    impl TryFrom<&geojson::Geometry> for Geometry {
        type Error = AerositeTypesError;

        fn try_from(value: &geojson::Geometry) -> Result<Self, Self::Error> {
            match &value.value {
                Value::Point(p) => Ok(Geometry::Point(GeoPoint {
                    coordinates: Position::try_from(p.clone())?,
                })),
                Value::LineString(points) => Ok(Geometry::Line(GeoLine {
                    coordinates: from_geojson_positions(points)?,
                })),
                Value::Polygon(rings) => {
                    if rings.len() > 1 {
                        return Err(AerositeTypesError::Conversion(
                            "polygons with holes are not supported".to_string(),
                        ));
                    }

                    Ok(Geometry::Polygon(GeoPolygon {
                        coordinates: rings
                            .iter()
                            .map(|r| from_geojson_positions(r))
                            .collect::<Result<_, _>>()?,
                    }))
                }
                _ => Err(AerositeTypesError::Conversion(
                    "multi-part geometries are not supported".to_string(),
                )),
            }
        }
    }
}

#[cfg(feature = "geo-types")]
mod geo_types_impls {
    use super::*;

    impl From<&Position> for geo_types::Coord<f64> {
        fn from(value: &Position) -> Self {
            geo_types::coord! { x: value.lng, y: value.lat }
        }
    }

    impl From<&GeoPoint> for geo_types::Point<f64> {
        fn from(value: &GeoPoint) -> Self {
            geo_types::Point::from(geo_types::Coord::from(&value.coordinates))
        }
    }

    impl From<&GeoLine> for geo_types::LineString<f64> {
        fn from(value: &GeoLine) -> Self {
            value
                .coordinates
                .iter()
                .map(geo_types::Coord::from)
                .collect()
        }
    }

    impl From<&GeoPolygon> for geo_types::Polygon<f64> {
        fn from(value: &GeoPolygon) -> Self {
            let exterior: geo_types::LineString<f64> =
                value.ring().iter().map(geo_types::Coord::from).collect();
            geo_types::Polygon::new(exterior, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn square() -> Vec<Position> {
        vec![
            Position::new(0.0, 0.0),
            Position::new(0.0, 1.0),
            Position::new(1.0, 1.0),
            Position::new(1.0, 0.0),
        ]
    }

    #[test]
    fn point_json_shape() {
        let point = create_point(-1.5, 52.0, Some(30.0));
        assert_eq!(
            serde_json::to_value(point).unwrap(),
            json!({"type": "Point", "coordinates": [-1.5, 52.0, 30.0]})
        );

        let value = json!({"type": "Point", "coordinates": [-1.5, 52.0]});
        let parsed: GeoPoint = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, create_point(-1.5, 52.0, None));
    }

    #[test]
    fn polygon_closes_ring() {
        let polygon = create_polygon(square(), true);
        assert_eq!(polygon.ring().len(), 5);
        assert!(polygon.is_closed());
        assert_eq!(polygon.vertices().len(), 4);

        let already_closed = create_polygon(polygon.ring().to_vec(), true);
        assert_eq!(already_closed.ring().len(), 5);
    }

    #[test]
    fn polygon_left_open() {
        let polygon = create_polygon(square(), false);
        assert!(!polygon.is_closed());
        assert_matches!(polygon.validate(), Err(AerositeTypesError::OpenRing));
    }

    #[test]
    fn empty_polygon_is_passed_through() {
        let polygon = create_polygon(vec![], true);
        assert!(polygon.ring().is_empty());
        assert_matches!(
            polygon.validate(),
            Err(AerositeTypesError::TooFewPositions {
                expected: 4,
                actual: 0
            })
        );
    }

    #[test]
    fn polygon_with_invalid_coordinates() {
        let polygon = create_polygon(
            vec![
                Position::new(0.0, 0.0),
                Position::new(0.0, 95.0),
                Position::new(1.0, 1.0),
            ],
            true,
        );
        assert_matches!(
            polygon.validate(),
            Err(AerositeTypesError::InvalidCoordinates(_))
        );
        assert!(create_polygon(square(), true).validate().is_ok());
    }

    #[test]
    fn geometry_untagged_roundtrip() {
        let value = json!({"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]});
        let geometry: Geometry = serde_json::from_value(value.clone()).unwrap();
        assert_matches!(geometry, Geometry::Line(_));
        assert_eq!(geometry.positions().count(), 2);
        assert_eq!(serde_json::to_value(&geometry).unwrap(), value);
    }

    #[cfg(feature = "geojson")]
    #[test]
    fn geojson_conversion() {
        let geometry = Geometry::from(create_polygon(square(), true));
        let gj = geojson::Geometry::from(&geometry);
        assert_eq!(Geometry::try_from(&gj).unwrap(), geometry);

        let multi = geojson::Geometry::new(geojson::Value::MultiPoint(vec![vec![0.0, 0.0]]));
        assert_matches!(
            Geometry::try_from(&multi),
            Err(AerositeTypesError::Conversion(_))
        );
    }
}
