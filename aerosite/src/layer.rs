//! Map layers, element roles and their default styles.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Geometry kind of a map element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Single point.
    Marker,
    /// Closed area.
    Polygon,
    /// Polyline.
    Line,
}

impl ElementKind {
    /// Prefix of generated ids for generic elements of this kind.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ElementKind::Marker => "marker",
            ElementKind::Polygon => "polygon",
            ElementKind::Line => "line",
        }
    }
}

/// Semantic role of a map element. Every role except [`ElementType::Custom`] corresponds to a slot
/// of the site map data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    /// Main location marker of the site.
    SiteLocation,
    /// Area the operation is allowed to use.
    OperationsBoundary,
    /// Obstacles in or near the operation area.
    Obstacles,
    /// Take-off point.
    LaunchPoint,
    /// Landing point.
    RecoveryPoint,
    /// Remote pilot position.
    PilotPosition,
    /// Planned flight area.
    FlightGeography,
    /// Contingency volume around the flight geography.
    ContingencyVolume,
    /// Ground risk buffer around the contingency volume.
    GroundRiskBuffer,
    /// Emergency assembly points.
    MusterPoints,
    /// Emergency evacuation routes.
    EvacuationRoutes,
    /// Element that does not belong to any slot.
    #[default]
    Custom,
}

impl ElementType {
    /// Geometry kind used by elements of this role.
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementType::SiteLocation
            | ElementType::Obstacles
            | ElementType::LaunchPoint
            | ElementType::RecoveryPoint
            | ElementType::PilotPosition
            | ElementType::MusterPoints
            | ElementType::Custom => ElementKind::Marker,
            ElementType::OperationsBoundary
            | ElementType::FlightGeography
            | ElementType::ContingencyVolume
            | ElementType::GroundRiskBuffer => ElementKind::Polygon,
            ElementType::EvacuationRoutes => ElementKind::Line,
        }
    }

    /// Returns true if the site map data stores a list of elements of this role.
    pub fn is_multiple(&self) -> bool {
        matches!(
            self,
            ElementType::Obstacles | ElementType::MusterPoints | ElementType::EvacuationRoutes
        )
    }

    /// Layer the role belongs to.
    pub fn layer(&self) -> Option<MapLayer> {
        MAP_LAYERS
            .iter()
            .find(|layer| layer.element_types().contains(self))
            .copied()
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            ElementType::SiteLocation => "Site Location",
            ElementType::OperationsBoundary => "Operations Boundary",
            ElementType::Obstacles => "Obstacle",
            ElementType::LaunchPoint => "Launch Point",
            ElementType::RecoveryPoint => "Recovery Point",
            ElementType::PilotPosition => "Pilot Position",
            ElementType::FlightGeography => "Flight Geography",
            ElementType::ContingencyVolume => "Contingency Volume",
            ElementType::GroundRiskBuffer => "Ground Risk Buffer",
            ElementType::MusterPoints => "Muster Point",
            ElementType::EvacuationRoutes => "Evacuation Route",
            ElementType::Custom => "Custom",
        }
    }

    /// Default style of elements with this role.
    pub fn style(&self) -> &'static ElementStyle {
        MAP_ELEMENT_STYLES
            .iter()
            .find(|(element_type, _)| element_type == self)
            .map(|(_, style)| style)
            .unwrap_or(&CUSTOM_STYLE)
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Default presentation of a map element role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    /// Marker or stroke color.
    pub color: Color,
    /// Fill color of polygons.
    pub fill_color: Option<Color>,
    /// Fill opacity of polygons, `0..=1`.
    pub fill_opacity: Option<f64>,
    /// Stroke width of polygons and lines in pixels.
    pub stroke_width: Option<f64>,
    /// Dash pattern of lines.
    pub dash_array: Option<&'static str>,
    /// Marker icon name.
    pub icon: Option<&'static str>,
}

impl ElementStyle {
    const fn marker(color: Color, icon: &'static str) -> Self {
        Self {
            color,
            fill_color: None,
            fill_opacity: None,
            stroke_width: None,
            dash_array: None,
            icon: Some(icon),
        }
    }

    const fn area(color: Color, fill_opacity: f64, dash_array: Option<&'static str>) -> Self {
        Self {
            color,
            fill_color: Some(color),
            fill_opacity: Some(fill_opacity),
            stroke_width: Some(2.0),
            dash_array,
            icon: None,
        }
    }
}

const CUSTOM_STYLE: ElementStyle = ElementStyle::marker(Color::GRAY, "map-pin");

/// Default styles of the map data roles.
pub const MAP_ELEMENT_STYLES: [(ElementType, ElementStyle); 11] = [
    (
        ElementType::SiteLocation,
        ElementStyle::marker(Color::BLUE, "map-pin"),
    ),
    (
        ElementType::OperationsBoundary,
        ElementStyle::area(Color::PURPLE, 0.1, None),
    ),
    (
        ElementType::Obstacles,
        ElementStyle::marker(Color::RED, "alert-triangle"),
    ),
    (
        ElementType::LaunchPoint,
        ElementStyle::marker(Color::GREEN, "plane-takeoff"),
    ),
    (
        ElementType::RecoveryPoint,
        ElementStyle::marker(Color::CYAN, "plane-landing"),
    ),
    (
        ElementType::PilotPosition,
        ElementStyle::marker(Color::AMBER, "user"),
    ),
    (
        ElementType::FlightGeography,
        ElementStyle::area(Color::GREEN, 0.15, None),
    ),
    (
        ElementType::ContingencyVolume,
        ElementStyle::area(Color::AMBER, 0.1, Some("5,5")),
    ),
    (
        ElementType::GroundRiskBuffer,
        ElementStyle::area(Color::RED, 0.1, Some("10,5")),
    ),
    (
        ElementType::MusterPoints,
        ElementStyle::marker(Color::EMERALD, "users"),
    ),
    (
        ElementType::EvacuationRoutes,
        ElementStyle {
            color: Color::ORANGE,
            fill_color: None,
            fill_opacity: None,
            stroke_width: Some(3.0),
            dash_array: Some("8,4"),
            icon: None,
        },
    ),
];

/// Group of map element roles edited together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MapLayer {
    /// Location, boundary and obstacles.
    SiteSurvey,
    /// Launch and recovery, pilot position and the flight volumes.
    FlightPlan,
    /// Muster points and evacuation routes.
    Emergency,
}

/// All map layers.
pub const MAP_LAYERS: [MapLayer; 3] = [
    MapLayer::SiteSurvey,
    MapLayer::FlightPlan,
    MapLayer::Emergency,
];

impl MapLayer {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            MapLayer::SiteSurvey => "Site Survey",
            MapLayer::FlightPlan => "Flight Plan",
            MapLayer::Emergency => "Emergency",
        }
    }

    /// Accent color of the layer.
    pub fn color(&self) -> Color {
        match self {
            MapLayer::SiteSurvey => Color::BLUE,
            MapLayer::FlightPlan => Color::GREEN,
            MapLayer::Emergency => Color::RED,
        }
    }

    /// Element roles that belong to the layer.
    pub fn element_types(&self) -> &'static [ElementType] {
        match self {
            MapLayer::SiteSurvey => &[
                ElementType::SiteLocation,
                ElementType::OperationsBoundary,
                ElementType::Obstacles,
            ],
            MapLayer::FlightPlan => &[
                ElementType::LaunchPoint,
                ElementType::RecoveryPoint,
                ElementType::PilotPosition,
                ElementType::FlightGeography,
                ElementType::ContingencyVolume,
                ElementType::GroundRiskBuffer,
            ],
            MapLayer::Emergency => &[ElementType::MusterPoints, ElementType::EvacuationRoutes],
        }
    }
}
