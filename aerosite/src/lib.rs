//! Data model of multi-site drone operation planning.
//!
//! A [`Project`] holds up to [`MAX_SITES_PER_PROJECT`] [`Site`]s. Every site carries its map data
//! (markers, polygons and lines grouped in the slots of the three [`MapLayer`]s), free-form survey,
//! flight plan, emergency and risk assessment records, and a lifecycle [`SiteStatus`].
//!
//! Sites are plain values that serialize into the camelCase JSON shape stored by the persistence
//! layer. Modifying methods consume the site and return the new value.
//!
//! ```
//! use aerosite::{
//!     create_default_site, create_map_marker, create_muster_point, validate_site_completeness,
//!     ElementType, MarkerOptions, MusterPointOptions, SiteOptions,
//! };
//!
//! let location = create_map_marker(-1.25, 52.1, MarkerOptions::new(ElementType::SiteLocation));
//! let muster = create_muster_point(-1.251, 52.1, MusterPointOptions::default().primary());
//! let site = create_default_site(SiteOptions::default().with_name("North field"))
//!     .place_marker(location)?
//!     .with_muster_point(muster)?;
//!
//! let report = validate_site_completeness(&site);
//! assert!(!report.is_complete);
//! assert!(report.sections.emergency);
//! # Ok::<(), aerosite::AerositeError>(())
//! ```

pub mod basemap;
pub mod color;
pub mod completeness;
pub mod element;
pub mod error;
pub mod hazard;
pub mod id;
pub mod layer;
pub mod population;
pub mod project;
pub mod site;
pub mod status;

pub use aerosite_types;
pub use basemap::{Attribution, Basemap, MAP_BASEMAPS};
pub use color::Color;
pub use completeness::{
    get_site_stats, validate_site_completeness, CompletenessIssue, CompletenessReport,
    SectionCompleteness, SiteStats,
};
pub use element::{
    create_map_line, create_map_marker, create_map_polygon, ElementGeometry, ElementProperties,
    LineOptions, MapElement, MapLine, MapPolygon, Marker, MarkerOptions, PolygonOptions,
};
pub use error::AerositeError;
pub use hazard::{
    create_evacuation_route, create_muster_point, create_obstacle, EvacuationRoute,
    EvacuationRouteOptions, MusterPoint, MusterPointOptions, Obstacle, ObstacleOptions,
    ObstacleType,
};
pub use id::{ElementId, SiteId};
pub use layer::{ElementKind, ElementStyle, ElementType, MapLayer, MAP_ELEMENT_STYLES, MAP_LAYERS};
pub use population::{PopulationCategory, POPULATION_CATEGORIES};
pub use project::{project_bounds, Project, MAX_SITES_PER_PROJECT};
pub use site::{
    create_default_site, duplicate_site, site_bounds, DuplicateOptions, EmergencyPlan, FlightPlan,
    MapData, OperationType, Site, SiteOptions, SiteSurvey, SoraAssessment,
    DEFAULT_CONTINGENCY_BUFFER_S, DEFAULT_MAX_ALTITUDE_AGL_M,
};
pub use status::{SiteStatus, SITE_STATUS};
