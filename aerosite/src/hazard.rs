//! Obstacles and emergency elements: markers and lines with extra operational fields.

use aerosite_types::{
    create_circle_polygon, create_line, create_point, flight_path_length, DistanceUnit, GeoPolygon,
    Position, DEFAULT_CIRCLE_POINTS,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::Color;
use crate::element::{impl_element_options, MapElement, MapLine, Marker};
use crate::id::ElementId;
use crate::layer::ElementType;

/// Kind of an obstacle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleType {
    /// Tower or mast.
    Tower,
    /// Power line or cable.
    Wire,
    /// Building.
    Building,
    /// Tree.
    Tree,
    /// Terrain feature.
    Terrain,
    /// Anything else.
    #[default]
    Other,
}

/// Obstacle marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obstacle {
    /// Marker of the obstacle.
    #[serde(flatten)]
    pub element: Marker,
    /// Kind of the obstacle.
    pub obstacle_type: ObstacleType,
    /// Height above ground in meters.
    pub height: Option<f64>,
    /// Safety buffer around the obstacle in meters.
    pub radius: Option<f64>,
    /// Whether the obstacle has obstruction lights.
    #[serde(default)]
    pub lighted: bool,
    /// Free text notes.
    #[serde(default)]
    pub notes: String,
}

impl Obstacle {
    /// Circle of the safety buffer around the obstacle. `None` if the obstacle has no buffer
    /// radius.
    pub fn buffer_polygon(&self) -> Option<GeoPolygon> {
        let radius = self.radius.filter(|r| *r > 0.0)?;
        Some(create_circle_polygon(
            self.element.position(),
            radius / 1000.0,
            DEFAULT_CIRCLE_POINTS,
        ))
    }
}

/// Emergency assembly point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusterPoint {
    /// Marker of the muster point.
    #[serde(flatten)]
    pub element: Marker,
    /// Whether this is the main assembly point of the site.
    #[serde(default)]
    pub is_primary: bool,
    /// Number of people the point can hold.
    pub capacity: Option<u32>,
    /// Access description.
    #[serde(default)]
    pub accessibility: String,
    /// Free text notes.
    #[serde(default)]
    pub notes: String,
}

/// Emergency evacuation route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvacuationRoute {
    /// Line of the route.
    #[serde(flatten)]
    pub element: MapLine,
    /// Whether this is the main route of the site.
    #[serde(default)]
    pub is_primary: bool,
    /// Surface of the route, e.g. `"paved"`.
    #[serde(default)]
    pub surface_type: String,
    /// Time to walk the route in minutes.
    pub estimated_time: Option<f64>,
    /// Free text notes.
    #[serde(default)]
    pub notes: String,
}

impl EvacuationRoute {
    /// Length of the route in kilometers.
    pub fn length_km(&self) -> f64 {
        flight_path_length(self.element.geometry.positions(), DistanceUnit::Kilometers)
    }
}

/// Options of [`create_obstacle`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObstacleOptions {
    /// Explicit id. Generated if not set.
    pub id: Option<ElementId>,
    /// Label. Defaults to the obstacle type.
    pub label: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Icon.
    pub icon: Option<String>,
    /// Color.
    pub color: Option<Color>,
    /// Kind of the obstacle.
    pub obstacle_type: ObstacleType,
    /// Height above ground in meters.
    pub height: Option<f64>,
    /// Safety buffer in meters.
    pub radius: Option<f64>,
    /// Whether the obstacle has obstruction lights.
    pub lighted: bool,
    /// Notes.
    pub notes: String,
    /// Custom properties.
    pub properties: Map<String, Value>,
}

impl_element_options!(ObstacleOptions);

impl ObstacleOptions {
    /// Options for an obstacle of the given kind.
    pub fn new(obstacle_type: ObstacleType) -> Self {
        Self {
            obstacle_type,
            ..Default::default()
        }
    }

    /// Sets the height above ground in meters.
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Sets the safety buffer in meters.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Marks the obstacle as lighted.
    pub fn lighted(mut self) -> Self {
        self.lighted = true;
        self
    }

    /// Sets the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Options of [`create_muster_point`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MusterPointOptions {
    /// Explicit id. Generated if not set.
    pub id: Option<ElementId>,
    /// Label.
    pub label: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Icon.
    pub icon: Option<String>,
    /// Color.
    pub color: Option<Color>,
    /// Whether this is the main assembly point.
    pub is_primary: bool,
    /// Number of people the point can hold.
    pub capacity: Option<u32>,
    /// Access description.
    pub accessibility: String,
    /// Notes.
    pub notes: String,
    /// Custom properties.
    pub properties: Map<String, Value>,
}

impl_element_options!(MusterPointOptions);

impl MusterPointOptions {
    /// Marks the point as primary.
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets the access description.
    pub fn with_accessibility(mut self, accessibility: impl Into<String>) -> Self {
        self.accessibility = accessibility.into();
        self
    }
}

/// Options of [`create_evacuation_route`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvacuationRouteOptions {
    /// Explicit id. Generated if not set.
    pub id: Option<ElementId>,
    /// Label.
    pub label: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Icon.
    pub icon: Option<String>,
    /// Color.
    pub color: Option<Color>,
    /// Whether this is the main route.
    pub is_primary: bool,
    /// Surface of the route.
    pub surface_type: String,
    /// Time to walk the route in minutes.
    pub estimated_time: Option<f64>,
    /// Notes.
    pub notes: String,
    /// Custom properties.
    pub properties: Map<String, Value>,
}

impl_element_options!(EvacuationRouteOptions);

impl EvacuationRouteOptions {
    /// Marks the route as primary.
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// Sets the surface type.
    pub fn with_surface_type(mut self, surface_type: impl Into<String>) -> Self {
        self.surface_type = surface_type.into();
        self
    }

    /// Sets the estimated walking time in minutes.
    pub fn with_estimated_time(mut self, minutes: f64) -> Self {
        self.estimated_time = Some(minutes);
        self
    }
}

/// Creates an obstacle marker.
pub fn create_obstacle(lng: f64, lat: f64, mut options: ObstacleOptions) -> Obstacle {
    let element_type = ElementType::Obstacles;
    let id = options.take_id("obstacle");
    let has_label = options.label.is_some();
    let mut properties = options.take_properties(element_type);
    if !has_label {
        properties.label = obstacle_label(options.obstacle_type).to_string();
    }

    Obstacle {
        element: MapElement::new(id, element_type, create_point(lng, lat, None), properties),
        obstacle_type: options.obstacle_type,
        height: options.height,
        radius: options.radius,
        lighted: options.lighted,
        notes: options.notes,
    }
}

/// Creates a muster point marker.
pub fn create_muster_point(lng: f64, lat: f64, mut options: MusterPointOptions) -> MusterPoint {
    let element_type = ElementType::MusterPoints;
    let id = options.take_id("muster");
    let properties = options.take_properties(element_type);

    MusterPoint {
        element: MapElement::new(id, element_type, create_point(lng, lat, None), properties),
        is_primary: options.is_primary,
        capacity: options.capacity,
        accessibility: options.accessibility,
        notes: options.notes,
    }
}

/// Creates an evacuation route line.
pub fn create_evacuation_route(
    coordinates: Vec<Position>,
    mut options: EvacuationRouteOptions,
) -> EvacuationRoute {
    let element_type = ElementType::EvacuationRoutes;
    let id = options.take_id("route");
    let properties = options.take_properties(element_type);

    EvacuationRoute {
        element: MapElement::new(id, element_type, create_line(coordinates), properties),
        is_primary: options.is_primary,
        surface_type: options.surface_type,
        estimated_time: options.estimated_time,
        notes: options.notes,
    }
}

fn obstacle_label(obstacle_type: ObstacleType) -> &'static str {
    match obstacle_type {
        ObstacleType::Tower => "Tower",
        ObstacleType::Wire => "Wire",
        ObstacleType::Building => "Building",
        ObstacleType::Tree => "Tree",
        ObstacleType::Terrain => "Terrain",
        ObstacleType::Other => "Obstacle",
    }
}
