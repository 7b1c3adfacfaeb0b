//! Site aggregate: the map data of one operation site together with its survey, flight plan,
//! emergency plan and risk assessment records.
//!
//! A [`Site`] is a value. All modifying methods consume the site and return the modified copy, so a
//! site handed to another owner can never be changed behind its back.

use std::collections::HashSet;

use aerosite_types::{BoundingBox, Position};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::element::{ElementGeometry, MapElement, MapLine, MapPolygon, Marker};
use crate::error::AerositeError;
use crate::hazard::{EvacuationRoute, MusterPoint, Obstacle};
use crate::id::{now, ElementId, SiteId};
use crate::layer::ElementType;
use crate::population::PopulationCategory;
use crate::status::SiteStatus;

/// Default maximum flight altitude above ground in meters.
pub const DEFAULT_MAX_ALTITUDE_AGL_M: f64 = 120.0;
/// Default contingency buffer in seconds of flight.
pub const DEFAULT_CONTINGENCY_BUFFER_S: u32 = 15;

/// Map elements of a site, one slot per element role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapData {
    /// Main location marker.
    pub site_location: Option<Marker>,
    /// Operations boundary.
    pub operations_boundary: Option<MapPolygon>,
    /// Take-off point.
    pub launch_point: Option<Marker>,
    /// Landing point.
    pub recovery_point: Option<Marker>,
    /// Remote pilot position.
    pub pilot_position: Option<Marker>,
    /// Flight geography.
    pub flight_geography: Option<MapPolygon>,
    /// Contingency volume.
    pub contingency_volume: Option<MapPolygon>,
    /// Ground risk buffer.
    pub ground_risk_buffer: Option<MapPolygon>,
    /// Obstacles.
    pub obstacles: Vec<Obstacle>,
    /// Muster points.
    pub muster_points: Vec<MusterPoint>,
    /// Evacuation routes.
    pub evacuation_routes: Vec<EvacuationRoute>,
}

impl MapData {
    fn markers(&self) -> impl Iterator<Item = &Marker> {
        [&self.site_location, &self.launch_point, &self.recovery_point, &self.pilot_position]
            .into_iter()
            .flatten()
            .chain(self.obstacles.iter().map(|o| &o.element))
            .chain(self.muster_points.iter().map(|m| &m.element))
    }

    fn polygons(&self) -> impl Iterator<Item = &MapPolygon> {
        [
            &self.operations_boundary,
            &self.flight_geography,
            &self.contingency_volume,
            &self.ground_risk_buffer,
        ]
        .into_iter()
        .flatten()
    }

    fn lines(&self) -> impl Iterator<Item = &MapLine> {
        self.evacuation_routes.iter().map(|r| &r.element)
    }

    /// Ids of all elements.
    pub fn element_ids(&self) -> Vec<&ElementId> {
        self.markers()
            .map(|e| &e.id)
            .chain(self.polygons().map(|e| &e.id))
            .chain(self.lines().map(|e| &e.id))
            .collect()
    }

    /// Number of elements in all slots.
    pub fn element_count(&self) -> usize {
        self.markers().count() + self.polygons().count() + self.lines().count()
    }

    /// Returns true if no slot holds an element.
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    /// Every position of every element.
    pub fn positions(&self) -> Vec<Position> {
        let polygons = self.polygons().flat_map(|p| p.geometry.ring());
        let lines = self.lines().flat_map(|l| l.geometry.positions());
        self.markers()
            .map(|m| m.position())
            .chain(polygons)
            .chain(lines)
            .copied()
            .collect()
    }

    /// Bounding box of all elements. `None` if there are no elements.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.positions().iter())
    }

    /// Gives every element a fresh id with the same prefix. Returns the number of re-keyed
    /// elements.
    pub fn rekey(&mut self, now: DateTime<Utc>) -> usize {
        let mut count = 0;
        for marker in [
            &mut self.site_location,
            &mut self.launch_point,
            &mut self.recovery_point,
            &mut self.pilot_position,
        ]
        .into_iter()
        .flatten()
        {
            marker.regenerate_id(now);
            count += 1;
        }

        for polygon in [
            &mut self.operations_boundary,
            &mut self.flight_geography,
            &mut self.contingency_volume,
            &mut self.ground_risk_buffer,
        ]
        .into_iter()
        .flatten()
        {
            polygon.regenerate_id(now);
            count += 1;
        }

        for obstacle in &mut self.obstacles {
            obstacle.element.regenerate_id(now);
        }
        for muster in &mut self.muster_points {
            muster.element.regenerate_id(now);
        }
        for route in &mut self.evacuation_routes {
            route.element.regenerate_id(now);
        }

        count + self.obstacles.len() + self.muster_points.len() + self.evacuation_routes.len()
    }

    fn marker_slot(&mut self, element_type: ElementType) -> Option<&mut Option<Marker>> {
        match element_type {
            ElementType::SiteLocation => Some(&mut self.site_location),
            ElementType::LaunchPoint => Some(&mut self.launch_point),
            ElementType::RecoveryPoint => Some(&mut self.recovery_point),
            ElementType::PilotPosition => Some(&mut self.pilot_position),
            _ => None,
        }
    }

    fn polygon_slot(&mut self, element_type: ElementType) -> Option<&mut Option<MapPolygon>> {
        match element_type {
            ElementType::OperationsBoundary => Some(&mut self.operations_boundary),
            ElementType::FlightGeography => Some(&mut self.flight_geography),
            ElementType::ContingencyVolume => Some(&mut self.contingency_volume),
            ElementType::GroundRiskBuffer => Some(&mut self.ground_risk_buffer),
            _ => None,
        }
    }

    fn remove(&mut self, id: &ElementId) -> bool {
        for slot in [
            &mut self.site_location,
            &mut self.launch_point,
            &mut self.recovery_point,
            &mut self.pilot_position,
        ] {
            if slot.as_ref().is_some_and(|m| &m.id == id) {
                *slot = None;
                return true;
            }
        }

        for slot in [
            &mut self.operations_boundary,
            &mut self.flight_geography,
            &mut self.contingency_volume,
            &mut self.ground_risk_buffer,
        ] {
            if slot.as_ref().is_some_and(|p| &p.id == id) {
                *slot = None;
                return true;
            }
        }

        let count = self.element_count();
        self.obstacles.retain(|o| &o.element.id != id);
        self.muster_points.retain(|m| &m.element.id != id);
        self.evacuation_routes.retain(|r| &r.element.id != id);

        count != self.element_count()
    }

    fn ensure_unique(&self, id: &ElementId) -> Result<(), AerositeError> {
        if self.element_ids().into_iter().filter(|e| *e == id).count() > 1 {
            return Err(AerositeError::DuplicateElementId(id.clone()));
        }

        Ok(())
    }

    fn check_slots(&self) -> Result<(), AerositeError> {
        let markers = [
            (ElementType::SiteLocation, &self.site_location),
            (ElementType::LaunchPoint, &self.launch_point),
            (ElementType::RecoveryPoint, &self.recovery_point),
            (ElementType::PilotPosition, &self.pilot_position),
        ];
        for (slot, marker) in markers {
            if let Some(marker) = marker {
                check_slot(slot, marker)?;
            }
        }

        let polygons = [
            (ElementType::OperationsBoundary, &self.operations_boundary),
            (ElementType::FlightGeography, &self.flight_geography),
            (ElementType::ContingencyVolume, &self.contingency_volume),
            (ElementType::GroundRiskBuffer, &self.ground_risk_buffer),
        ];
        for (slot, polygon) in polygons {
            if let Some(polygon) = polygon {
                check_slot(slot, polygon)?;
            }
        }

        for obstacle in &self.obstacles {
            check_slot(ElementType::Obstacles, &obstacle.element)?;
        }
        for muster in &self.muster_points {
            check_slot(ElementType::MusterPoints, &muster.element)?;
        }
        for route in &self.evacuation_routes {
            check_slot(ElementType::EvacuationRoutes, &route.element)?;
        }

        Ok(())
    }
}

fn check_slot<G: ElementGeometry>(
    slot: ElementType,
    element: &MapElement<G>,
) -> Result<(), AerositeError> {
    if element.element_type != slot {
        return Err(AerositeError::MisplacedElement {
            id: element.id.clone(),
            slot,
            element_type: element.element_type,
        });
    }

    if element.kind() != G::KIND {
        return Err(AerositeError::KindMismatch {
            id: element.id.clone(),
            expected: G::KIND,
            found: element.kind(),
        });
    }

    Ok(())
}

/// Site survey record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSurvey {
    /// Population density band of the overflown area.
    pub population_category: Option<PopulationCategory>,
    /// Ground elevation at the site in meters above mean sea level.
    pub ground_elevation: Option<f64>,
    /// Airspace class, e.g. `"G"`.
    pub airspace_class: Option<String>,
    /// Date of the survey.
    pub survey_date: Option<NaiveDate>,
    /// Site access description.
    pub access_notes: String,
    /// Hazards observed on site.
    pub hazard_notes: String,
    /// Any other survey fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Visual range regime of an operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationType {
    /// Visual line of sight.
    #[default]
    Vlos,
    /// Extended visual line of sight.
    Evlos,
    /// Beyond visual line of sight.
    Bvlos,
}

/// Flight plan record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlightPlan {
    /// Visual range regime.
    pub operation_type: OperationType,
    /// Maximum altitude above ground in meters.
    #[serde(rename = "maxAltitudeAGL")]
    pub max_altitude_agl: f64,
    /// Contingency buffer in seconds of flight.
    pub contingency_buffer: u32,
    /// Planned date of the flight.
    pub planned_date: Option<NaiveDate>,
    /// Aircraft used for the flight.
    pub aircraft: Option<String>,
    /// Free text notes.
    pub notes: String,
    /// Any other flight plan fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for FlightPlan {
    fn default() -> Self {
        Self {
            operation_type: OperationType::default(),
            max_altitude_agl: DEFAULT_MAX_ALTITUDE_AGL_M,
            contingency_buffer: DEFAULT_CONTINGENCY_BUFFER_S,
            planned_date: None,
            aircraft: None,
            notes: String::new(),
            extra: Map::new(),
        }
    }
}

/// Emergency plan record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmergencyPlan {
    /// Nearest hospital.
    pub nearest_hospital: Option<String>,
    /// Emergency contact phone number.
    pub emergency_contact: Option<String>,
    /// Emergency procedures.
    pub procedures: String,
    /// Any other emergency fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Operational risk assessment record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SoraAssessment {
    /// Intrinsic ground risk class.
    pub ground_risk_class: Option<u8>,
    /// Air risk class.
    pub air_risk_class: Option<String>,
    /// Specific assurance and integrity level.
    pub sail: Option<String>,
    /// Free text notes.
    pub notes: String,
    /// Any other assessment fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Operation site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Site id.
    pub id: SiteId,
    /// Site name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    status: SiteStatus,
    /// Position of the site in its project.
    #[serde(default)]
    pub order: u32,
    /// Map elements.
    #[serde(default)]
    pub map_data: MapData,
    /// Survey record.
    #[serde(default)]
    pub site_survey: SiteSurvey,
    /// Flight plan record.
    #[serde(default)]
    pub flight_plan: FlightPlan,
    /// Emergency plan record.
    #[serde(default)]
    pub emergency: EmergencyPlan,
    /// Risk assessment record.
    #[serde(default)]
    pub sora_assessment: SoraAssessment,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last modification.
    pub updated_at: DateTime<Utc>,
    /// User that created the site.
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Options of [`create_default_site`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteOptions {
    /// Name. Defaults to `Site {order + 1}`.
    pub name: Option<String>,
    /// Description.
    pub description: String,
    /// Position of the site in its project.
    pub order: u32,
    /// User creating the site.
    pub created_by: Option<String>,
}

impl SiteOptions {
    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the position in the project.
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Sets the creating user.
    pub fn with_created_by(mut self, user: impl Into<String>) -> Self {
        self.created_by = Some(user.into());
        self
    }
}

/// Options of [`duplicate_site`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DuplicateOptions {
    /// Name of the copy. Defaults to `{name} (Copy)`.
    pub name: Option<String>,
    /// Position of the copy. Defaults to the position of the source.
    pub order: Option<u32>,
    /// User creating the copy. Defaults to the creator of the source.
    pub created_by: Option<String>,
}

impl DuplicateOptions {
    /// Sets the name of the copy.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the position of the copy.
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets the creating user.
    pub fn with_created_by(mut self, user: impl Into<String>) -> Self {
        self.created_by = Some(user.into());
        self
    }
}

/// Creates an empty draft site with default flight parameters.
pub fn create_default_site(options: SiteOptions) -> Site {
    let now = now();
    Site {
        id: SiteId::generate(),
        name: options
            .name
            .unwrap_or_else(|| format!("Site {}", options.order + 1)),
        description: options.description,
        status: SiteStatus::Draft,
        order: options.order,
        map_data: MapData::default(),
        site_survey: SiteSurvey::default(),
        flight_plan: FlightPlan::default(),
        emergency: EmergencyPlan::default(),
        sora_assessment: SoraAssessment::default(),
        created_at: now,
        updated_at: now,
        created_by: options.created_by,
    }
}

/// Deep copy of a site as a new draft. The copy and every map element in it get new ids, so no
/// identifier is shared with the source.
pub fn duplicate_site(site: &Site, options: DuplicateOptions) -> Site {
    let now = now();
    let mut copy = site.clone();
    copy.id = SiteId::generate();
    copy.name = options
        .name
        .unwrap_or_else(|| format!("{} (Copy)", site.name));
    copy.status = SiteStatus::Draft;
    copy.order = options.order.unwrap_or(site.order);
    copy.created_by = options.created_by.or_else(|| site.created_by.clone());
    copy.created_at = now;
    copy.updated_at = now;

    let rekeyed = copy.map_data.rekey(now);
    debug!(
        "Duplicated site {} as {}, {rekeyed} elements re-keyed",
        site.id, copy.id
    );

    copy
}

impl Site {
    /// Lifecycle status.
    pub fn status(&self) -> SiteStatus {
        self.status
    }

    fn touched(mut self) -> Self {
        self.updated_at = now();
        self
    }

    /// Moves the site to another lifecycle stage.
    pub fn transition_to(mut self, status: SiteStatus) -> Result<Self, AerositeError> {
        if !self.status.can_transition_to(status) {
            warn!(
                "Rejected status change of site {} from {} to {status}",
                self.id, self.status
            );
            return Err(AerositeError::InvalidTransition {
                from: self.status,
                to: status,
            });
        }

        if self.status == status {
            return Ok(self);
        }

        self.status = status;
        Ok(self.touched())
    }

    /// Returns a copy with a new name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.touched()
    }

    /// Returns a copy with a new description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self.touched()
    }

    /// Returns a copy with the map data replaced.
    pub fn with_map_data(mut self, map_data: MapData) -> Self {
        self.map_data = map_data;
        self.touched()
    }

    /// Returns a copy with the survey record replaced.
    pub fn with_site_survey(mut self, site_survey: SiteSurvey) -> Self {
        self.site_survey = site_survey;
        self.touched()
    }

    /// Returns a copy with the flight plan replaced.
    pub fn with_flight_plan(mut self, flight_plan: FlightPlan) -> Self {
        self.flight_plan = flight_plan;
        self.touched()
    }

    /// Returns a copy with the emergency plan replaced.
    pub fn with_emergency(mut self, emergency: EmergencyPlan) -> Self {
        self.emergency = emergency;
        self.touched()
    }

    /// Returns a copy with the risk assessment replaced.
    pub fn with_sora_assessment(mut self, sora_assessment: SoraAssessment) -> Self {
        self.sora_assessment = sora_assessment;
        self.touched()
    }

    /// Puts the marker into the single-valued slot of its element type, replacing the previous
    /// marker.
    ///
    /// The marker id must not be used by any other element of the site.
    pub fn place_marker(mut self, marker: Marker) -> Result<Self, AerositeError> {
        let element_type = marker.element_type;
        let id = marker.id.clone();
        let slot = self
            .map_data
            .marker_slot(element_type)
            .ok_or(AerositeError::InvalidSlot(element_type))?;
        *slot = Some(marker);

        self.added(&id)
    }

    /// Puts the polygon into the single-valued slot of its element type, replacing the previous
    /// polygon.
    ///
    /// The polygon id must not be used by any other element of the site.
    pub fn place_polygon(mut self, polygon: MapPolygon) -> Result<Self, AerositeError> {
        let element_type = polygon.element_type;
        let id = polygon.id.clone();
        let slot = self
            .map_data
            .polygon_slot(element_type)
            .ok_or(AerositeError::InvalidSlot(element_type))?;
        *slot = Some(polygon);

        self.added(&id)
    }

    /// Returns a copy with the obstacle added.
    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Result<Self, AerositeError> {
        let id = obstacle.element.id.clone();
        self.map_data.obstacles.push(obstacle);
        self.added(&id)
    }

    /// Returns a copy with the muster point added. A primary point demotes the previous primary
    /// one.
    pub fn with_muster_point(mut self, muster_point: MusterPoint) -> Result<Self, AerositeError> {
        let id = muster_point.element.id.clone();
        if muster_point.is_primary {
            for m in &mut self.map_data.muster_points {
                m.is_primary = false;
            }
        }

        self.map_data.muster_points.push(muster_point);
        self.added(&id)
    }

    /// Returns a copy with the evacuation route added. A primary route demotes the previous
    /// primary one.
    pub fn with_evacuation_route(mut self, route: EvacuationRoute) -> Result<Self, AerositeError> {
        let id = route.element.id.clone();
        if route.is_primary {
            for r in &mut self.map_data.evacuation_routes {
                r.is_primary = false;
            }
        }

        self.map_data.evacuation_routes.push(route);
        self.added(&id)
    }

    fn added(self, id: &ElementId) -> Result<Self, AerositeError> {
        if let Err(err) = self.map_data.ensure_unique(id) {
            warn!("Element {id} is already used in site {}", self.id);
            return Err(err);
        }

        Ok(self.touched())
    }

    /// Returns a copy without the element with the given id.
    pub fn without_element(mut self, id: &ElementId) -> Result<Self, AerositeError> {
        if !self.map_data.remove(id) {
            return Err(AerositeError::ElementNotFound(id.clone()));
        }

        Ok(self.touched())
    }

    /// Makes the muster point with the given id the only primary one.
    pub fn with_primary_muster_point(mut self, id: &ElementId) -> Result<Self, AerositeError> {
        let muster_points = &self.map_data.muster_points;
        if !muster_points.iter().any(|m| &m.element.id == id) {
            return Err(AerositeError::ElementNotFound(id.clone()));
        }

        for m in &mut self.map_data.muster_points {
            m.is_primary = &m.element.id == id;
        }

        Ok(self.touched())
    }

    /// Makes the evacuation route with the given id the only primary one.
    pub fn with_primary_evacuation_route(mut self, id: &ElementId) -> Result<Self, AerositeError> {
        let routes = &self.map_data.evacuation_routes;
        if !routes.iter().any(|r| &r.element.id == id) {
            return Err(AerositeError::ElementNotFound(id.clone()));
        }

        for r in &mut self.map_data.evacuation_routes {
            r.is_primary = &r.element.id == id;
        }

        Ok(self.touched())
    }

    /// Primary muster point, if any.
    pub fn primary_muster_point(&self) -> Option<&MusterPoint> {
        self.map_data.muster_points.iter().find(|m| m.is_primary)
    }

    /// Primary evacuation route, if any.
    pub fn primary_evacuation_route(&self) -> Option<&EvacuationRoute> {
        let routes = &self.map_data.evacuation_routes;
        routes.iter().find(|r| r.is_primary)
    }

    /// Checks the invariants of the site that cannot be guaranteed by construction, e.g. for sites
    /// loaded from JSON.
    ///
    /// Element ids must be unique, every element must sit in the slot of its role with a kind
    /// matching its geometry, polygon rings must be closed and valid, and at most one muster point
    /// and one evacuation route may be primary.
    pub fn validate(&self) -> Result<(), AerositeError> {
        let result = self.check_invariants();
        if let Err(err) = &result {
            warn!("Site {} is invalid: {err}", self.id);
        }

        result
    }

    fn check_invariants(&self) -> Result<(), AerositeError> {
        let mut ids = HashSet::new();
        for id in self.map_data.element_ids() {
            if !ids.insert(id) {
                return Err(AerositeError::DuplicateElementId(id.clone()));
            }
        }

        self.map_data.check_slots()?;

        for polygon in self.map_data.polygons() {
            polygon.geometry.validate()?;
        }

        let MapData {
            muster_points,
            evacuation_routes,
            ..
        } = &self.map_data;
        if muster_points.iter().filter(|m| m.is_primary).count() > 1 {
            let slot = ElementType::MusterPoints;
            return Err(AerositeError::MultiplePrimary(slot));
        }

        if evacuation_routes.iter().filter(|r| r.is_primary).count() > 1 {
            let slot = ElementType::EvacuationRoutes;
            return Err(AerositeError::MultiplePrimary(slot));
        }

        Ok(())
    }

    /// Bounding box of all map elements of the site.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.map_data.bounds()
    }
}

/// Bounding box of all map elements of the site. `None` if the site has no elements.
pub fn site_bounds(site: &Site) -> Option<BoundingBox> {
    site.bounds()
}
