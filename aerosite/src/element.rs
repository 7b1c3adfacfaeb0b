//! Map elements: geometries with an identity, a role on the site map and presentation properties.
//!
//! Elements are created with the `create_map_*` factories. The factories never fail: geometry is
//! taken as is, missing options are filled from the default style of the element role.

use aerosite_types::{
    create_line, create_point, create_polygon, GeoLine, GeoPoint, GeoPolygon, Geometry, Position,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::Color;
use crate::id::{now, ElementId};
use crate::layer::{ElementKind, ElementType};

/// Geometry that can be stored in a [`MapElement`].
pub trait ElementGeometry {
    /// Kind of elements with this geometry.
    const KIND: ElementKind;
    /// Converts into the generic geometry enum.
    fn to_geometry(&self) -> Geometry;
}

macro_rules! impl_element_geometry {
    ($geom:ident, $kind:ident) => {
        impl ElementGeometry for $geom {
            const KIND: ElementKind = ElementKind::$kind;
            fn to_geometry(&self) -> Geometry {
                Geometry::from(self.clone())
            }
        }
    };
}

impl_element_geometry!(GeoPoint, Marker);
impl_element_geometry!(GeoPolygon, Polygon);
impl_element_geometry!(GeoLine, Line);

/// Presentation properties of a map element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementProperties {
    /// Label shown on the map.
    #[serde(default)]
    pub label: String,
    /// Free text description.
    #[serde(default)]
    pub description: String,
    /// Marker icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Marker or stroke color.
    pub color: Color,
    /// Fill color of polygons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    /// Fill opacity of polygons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    /// Stroke width of polygons and lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Dash pattern of polygon outlines and lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
    /// Any other properties set by the user.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ElementProperties {
    /// Default properties of elements with the given role.
    pub fn styled(element_type: ElementType) -> Self {
        let style = element_type.style();
        Self {
            label: element_type.label().to_string(),
            description: String::new(),
            icon: style.icon.map(String::from),
            color: style.color,
            fill_color: style.fill_color,
            fill_opacity: style.fill_opacity,
            stroke_width: style.stroke_width,
            dash_array: style.dash_array.map(String::from),
            extra: Map::new(),
        }
    }
}

/// Geometry placed on the site map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapElement<G> {
    /// Identifier, unique within a site.
    pub id: ElementId,
    #[serde(rename = "type")]
    kind: ElementKind,
    /// Role of the element on the site map.
    pub element_type: ElementType,
    /// Geometry of the element.
    pub geometry: G,
    /// Presentation properties.
    pub properties: ElementProperties,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last modification or re-keying.
    pub updated_at: DateTime<Utc>,
}

/// Point element.
pub type Marker = MapElement<GeoPoint>;
/// Area element.
pub type MapPolygon = MapElement<GeoPolygon>;
/// Polyline element.
pub type MapLine = MapElement<GeoLine>;

impl<G: ElementGeometry> MapElement<G> {
    /// Creates an element from its parts. Both timestamps are set to the current time.
    pub fn new(
        id: ElementId,
        element_type: ElementType,
        geometry: G,
        properties: ElementProperties,
    ) -> Self {
        let now = now();
        Self {
            id,
            kind: G::KIND,
            element_type,
            geometry,
            properties,
            created_at: now,
            updated_at: now,
        }
    }

    /// Geometry kind of the element.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Label of the element.
    pub fn label(&self) -> &str {
        &self.properties.label
    }

    /// Geometry as the generic enum.
    pub fn to_geometry(&self) -> Geometry {
        self.geometry.to_geometry()
    }

    /// Replaces the id with a freshly generated one keeping the id prefix, and sets the update
    /// time.
    pub fn regenerate_id(&mut self, now: DateTime<Utc>) {
        self.id = self.id.regenerate();
        self.updated_at = now;
    }

    /// Returns a copy of the element with a new label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.properties.label = label.into();
        self.updated_at = now();
        self
    }

    /// Returns a copy of the element with a new geometry.
    pub fn with_geometry(mut self, geometry: G) -> Self {
        self.geometry = geometry;
        self.updated_at = now();
        self
    }

    /// Returns a copy of the element with a custom property set.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.extra.insert(key.into(), value.into());
        self.updated_at = now();
        self
    }
}

impl Marker {
    /// Position of the marker.
    pub fn position(&self) -> &Position {
        self.geometry.position()
    }
}

/// Adds the builder methods and property resolution shared by all element option structs.
macro_rules! impl_element_options {
    ($options:ident) => {
        impl $options {
            /// Sets an explicit id. The id is used verbatim.
            pub fn with_id(mut self, id: impl Into<$crate::id::ElementId>) -> Self {
                self.id = Some(id.into());
                self
            }

            /// Sets the label.
            pub fn with_label(mut self, label: impl Into<String>) -> Self {
                self.label = Some(label.into());
                self
            }

            /// Sets the description.
            pub fn with_description(mut self, description: impl Into<String>) -> Self {
                self.description = Some(description.into());
                self
            }

            /// Sets the marker icon.
            pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
                self.icon = Some(icon.into());
                self
            }

            /// Sets the color.
            pub fn with_color(mut self, color: $crate::color::Color) -> Self {
                self.color = Some(color);
                self
            }

            /// Adds a custom property.
            pub fn with_property(
                mut self,
                key: impl Into<String>,
                value: impl Into<serde_json::Value>,
            ) -> Self {
                self.properties.insert(key.into(), value.into());
                self
            }

            fn take_id(&mut self, prefix: &str) -> $crate::id::ElementId {
                self.id
                    .take()
                    .unwrap_or_else(|| $crate::id::ElementId::generate(prefix))
            }

            fn take_properties(
                &mut self,
                element_type: $crate::layer::ElementType,
            ) -> $crate::element::ElementProperties {
                let mut properties = $crate::element::ElementProperties::styled(element_type);
                if let Some(label) = self.label.take() {
                    properties.label = label;
                }
                if let Some(description) = self.description.take() {
                    properties.description = description;
                }
                if let Some(icon) = self.icon.take() {
                    properties.icon = Some(icon);
                }
                if let Some(color) = self.color {
                    properties.color = color;
                }
                properties.extra = std::mem::take(&mut self.properties);

                properties
            }
        }
    };
}

pub(crate) use impl_element_options;

/// Options of [`create_map_marker`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkerOptions {
    /// Explicit id. Generated if not set.
    pub id: Option<ElementId>,
    /// Role of the marker.
    pub element_type: ElementType,
    /// Label. Defaults to the role label.
    pub label: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Icon. Defaults to the role icon.
    pub icon: Option<String>,
    /// Color. Defaults to the role color.
    pub color: Option<Color>,
    /// Altitude of the point in meters.
    pub altitude: Option<f64>,
    /// Custom properties.
    pub properties: Map<String, Value>,
}

impl_element_options!(MarkerOptions);

impl MarkerOptions {
    /// Options for a marker with the given role.
    pub fn new(element_type: ElementType) -> Self {
        Self {
            element_type,
            ..Default::default()
        }
    }

    /// Sets the altitude of the point.
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }
}

/// Options of [`create_map_polygon`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolygonOptions {
    /// Explicit id. Generated if not set.
    pub id: Option<ElementId>,
    /// Role of the polygon.
    pub element_type: ElementType,
    /// Label. Defaults to the role label.
    pub label: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Icon.
    pub icon: Option<String>,
    /// Stroke color. Defaults to the role color.
    pub color: Option<Color>,
    /// Fill color. Defaults to the role fill color.
    pub fill_color: Option<Color>,
    /// Fill opacity. Defaults to the role fill opacity.
    pub fill_opacity: Option<f64>,
    /// Stroke width. Defaults to the role stroke width.
    pub stroke_width: Option<f64>,
    /// Custom properties.
    pub properties: Map<String, Value>,
}

impl_element_options!(PolygonOptions);

impl PolygonOptions {
    /// Options for a polygon with the given role.
    pub fn new(element_type: ElementType) -> Self {
        Self {
            element_type,
            ..Default::default()
        }
    }

    /// Sets the fill color and opacity.
    pub fn with_fill(mut self, color: Color, opacity: f64) -> Self {
        self.fill_color = Some(color);
        self.fill_opacity = Some(opacity);
        self
    }

    /// Sets the stroke width.
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }
}

/// Options of [`create_map_line`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineOptions {
    /// Explicit id. Generated if not set.
    pub id: Option<ElementId>,
    /// Role of the line.
    pub element_type: ElementType,
    /// Label. Defaults to the role label.
    pub label: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Icon.
    pub icon: Option<String>,
    /// Stroke color. Defaults to the role color.
    pub color: Option<Color>,
    /// Stroke width. Defaults to the role stroke width.
    pub stroke_width: Option<f64>,
    /// Dash pattern. Defaults to the role dash pattern.
    pub dash_array: Option<String>,
    /// Custom properties.
    pub properties: Map<String, Value>,
}

impl_element_options!(LineOptions);

impl LineOptions {
    /// Options for a line with the given role.
    pub fn new(element_type: ElementType) -> Self {
        Self {
            element_type,
            ..Default::default()
        }
    }

    /// Sets the stroke width.
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    /// Sets the dash pattern, e.g. `"8,4"`.
    pub fn with_dash_array(mut self, dash_array: impl Into<String>) -> Self {
        self.dash_array = Some(dash_array.into());
        self
    }
}

/// Creates a point element.
pub fn create_map_marker(lng: f64, lat: f64, mut options: MarkerOptions) -> Marker {
    let element_type = options.element_type;
    let id = options.take_id(ElementKind::Marker.id_prefix());
    let properties = options.take_properties(element_type);

    let geometry = create_point(lng, lat, options.altitude);
    MapElement::new(id, element_type, geometry, properties)
}

/// Creates an area element. An open ring is closed by repeating its first position.
pub fn create_map_polygon(coordinates: Vec<Position>, mut options: PolygonOptions) -> MapPolygon {
    let element_type = options.element_type;
    let id = options.take_id(ElementKind::Polygon.id_prefix());
    let mut properties = options.take_properties(element_type);
    properties.fill_color = options.fill_color.or(properties.fill_color);
    properties.fill_opacity = options.fill_opacity.or(properties.fill_opacity);
    properties.stroke_width = options.stroke_width.or(properties.stroke_width);

    let geometry = create_polygon(coordinates, true);
    MapElement::new(id, element_type, geometry, properties)
}

/// Creates a polyline element.
pub fn create_map_line(coordinates: Vec<Position>, mut options: LineOptions) -> MapLine {
    let element_type = options.element_type;
    let id = options.take_id(ElementKind::Line.id_prefix());
    let mut properties = options.take_properties(element_type);
    properties.stroke_width = options.stroke_width.or(properties.stroke_width);
    properties.dash_array = options.dash_array.take().or(properties.dash_array);

    MapElement::new(id, element_type, create_line(coordinates), properties)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn square() -> Vec<Position> {
        vec![
            Position::new(0.0, 0.0),
            Position::new(0.0, 1.0),
            Position::new(1.0, 1.0),
            Position::new(1.0, 0.0),
        ]
    }

    #[test]
    fn marker_defaults_from_style() {
        let marker = create_map_marker(-0.1, 51.5, MarkerOptions::new(ElementType::LaunchPoint));
        assert_eq!(marker.kind(), ElementKind::Marker);
        assert_eq!(marker.label(), "Launch Point");
        assert_eq!(marker.properties.color, Color::GREEN);
        assert_eq!(marker.properties.icon.as_deref(), Some("plane-takeoff"));
        assert_eq!(marker.id.prefix(), "marker");
        assert_eq!(marker.created_at, marker.updated_at);
        assert_eq!(marker.position(), &Position::new(-0.1, 51.5));
    }

    #[test]
    fn explicit_options_win() {
        let marker = create_map_marker(
            1.0,
            2.0,
            MarkerOptions::new(ElementType::SiteLocation)
                .with_id("home")
                .with_label("Home field")
                .with_color(Color::RED)
                .with_altitude(35.0)
                .with_property("ownerId", "u1"),
        );
        assert_eq!(marker.id.as_str(), "home");
        assert_eq!(marker.label(), "Home field");
        assert_eq!(marker.properties.color, Color::RED);
        assert_eq!(marker.position().alt, Some(35.0));
        assert_eq!(marker.properties.extra.get("ownerId"), Some(&json!("u1")));
    }

    #[test]
    fn polygon_ring_is_closed() {
        let options = PolygonOptions::new(ElementType::OperationsBoundary);
        let polygon = create_map_polygon(square(), options);
        assert!(polygon.geometry.is_closed());
        assert_eq!(polygon.geometry.ring().len(), 5);
        assert_eq!(polygon.properties.fill_color, Some(Color::PURPLE));
        assert!(polygon.geometry.validate().is_ok());
    }

    #[test]
    fn empty_geometry_is_passed_through() {
        let polygon = create_map_polygon(vec![], PolygonOptions::default());
        assert!(polygon.geometry.ring().is_empty());

        let line = create_map_line(vec![], LineOptions::default());
        assert!(line.geometry.positions().is_empty());
        assert_eq!(line.element_type, ElementType::Custom);
    }

    #[test]
    fn line_style() {
        let line = create_map_line(
            vec![Position::new(0.0, 0.0), Position::new(0.1, 0.1)],
            LineOptions::new(ElementType::EvacuationRoutes)
                .with_stroke_width(5.0),
        );
        assert_eq!(line.properties.stroke_width, Some(5.0));
        assert_eq!(line.properties.dash_array.as_deref(), Some("8,4"));
        assert_eq!(line.id.prefix(), "line");
    }

    #[test]
    fn regenerate_id() {
        let mut marker = create_map_marker(0.0, 0.0, MarkerOptions::default());
        let old_id = marker.id.clone();
        let later = marker.updated_at + chrono::Duration::seconds(5);
        marker.regenerate_id(later);

        assert_ne!(marker.id, old_id);
        assert_eq!(marker.id.prefix(), old_id.prefix());
        assert_eq!(marker.updated_at, later);
        assert!(marker.created_at < marker.updated_at);
    }

    #[test]
    fn json_shape() {
        let marker = create_map_marker(
            10.0,
            20.0,
            MarkerOptions::new(ElementType::RecoveryPoint)
                .with_id("m1")
                .with_property("note", "grass"),
        );
        let value = serde_json::to_value(&marker).unwrap();

        assert_eq!(value["id"], json!("m1"));
        assert_eq!(value["type"], json!("marker"));
        assert_eq!(value["elementType"], json!("recoveryPoint"));
        assert_eq!(
            value["geometry"],
            json!({"type": "Point", "coordinates": [10.0, 20.0]})
        );
        assert_eq!(value["properties"]["color"], json!("#06b6d4"));
        assert_eq!(value["properties"]["note"], json!("grass"));
        assert!(value["createdAt"].is_string());

        let restored: Marker = serde_json::from_value(value).unwrap();
        assert_eq!(restored, marker);
    }

    #[test]
    fn options_from_json() {
        let options: PolygonOptions = serde_json::from_value(json!({
            "elementType": "flightGeography",
            "label": "Survey area",
            "fillOpacity": 0.3
        }))
        .unwrap();
        let polygon = create_map_polygon(square(), options);
        assert_eq!(polygon.element_type, ElementType::FlightGeography);
        assert_eq!(polygon.label(), "Survey area");
        assert_eq!(polygon.properties.fill_opacity, Some(0.3));
        assert_eq!(polygon.properties.fill_color, Some(Color::GREEN));
    }
}
