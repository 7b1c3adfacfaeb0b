//! Read-only summaries of a site: what is still missing before it can be flown, and element counts
//! for badges.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::layer::MapLayer;
use crate::site::Site;

/// Piece of information a site still lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletenessIssue {
    /// No site location marker.
    SiteLocation,
    /// Survey has no population category.
    PopulationCategory,
    /// No launch point.
    LaunchPoint,
    /// No recovery point.
    RecoveryPoint,
    /// No muster points.
    MusterPoints,
}

impl CompletenessIssue {
    /// Section of the site the issue belongs to.
    pub fn section(&self) -> MapLayer {
        match self {
            CompletenessIssue::SiteLocation | CompletenessIssue::PopulationCategory => {
                MapLayer::SiteSurvey
            }
            CompletenessIssue::LaunchPoint | CompletenessIssue::RecoveryPoint => {
                MapLayer::FlightPlan
            }
            CompletenessIssue::MusterPoints => MapLayer::Emergency,
        }
    }

    /// Human readable description of the issue.
    pub fn message(&self) -> &'static str {
        match self {
            CompletenessIssue::SiteLocation => "Site location not set",
            CompletenessIssue::PopulationCategory => "Population category not set",
            CompletenessIssue::LaunchPoint => "Launch point not set",
            CompletenessIssue::RecoveryPoint => "Recovery point not set",
            CompletenessIssue::MusterPoints => "No muster points defined",
        }
    }
}

impl Display for CompletenessIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Completeness of each site section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCompleteness {
    /// Site survey section.
    pub site_survey: bool,
    /// Flight plan section.
    pub flight_plan: bool,
    /// Emergency section.
    pub emergency: bool,
}

impl SectionCompleteness {
    /// Completeness of the given section.
    pub fn get(&self, section: MapLayer) -> bool {
        match section {
            MapLayer::SiteSurvey => self.site_survey,
            MapLayer::FlightPlan => self.flight_plan,
            MapLayer::Emergency => self.emergency,
        }
    }
}

/// Result of [`validate_site_completeness`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessReport {
    /// True if there are no issues.
    pub is_complete: bool,
    /// Missing information.
    pub issues: Vec<CompletenessIssue>,
    /// Completeness of each section.
    pub sections: SectionCompleteness,
}

/// Checks that the site has everything needed to plan the flight.
pub fn validate_site_completeness(site: &Site) -> CompletenessReport {
    let map_data = &site.map_data;
    let checks = [
        (
            CompletenessIssue::SiteLocation,
            map_data.site_location.is_some(),
        ),
        (
            CompletenessIssue::PopulationCategory,
            site.site_survey.population_category.is_some(),
        ),
        (
            CompletenessIssue::LaunchPoint,
            map_data.launch_point.is_some(),
        ),
        (
            CompletenessIssue::RecoveryPoint,
            map_data.recovery_point.is_some(),
        ),
        (
            CompletenessIssue::MusterPoints,
            !map_data.muster_points.is_empty(),
        ),
    ];

    let issues: Vec<_> = checks
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(issue, _)| issue)
        .collect();

    let section_complete = |section: MapLayer| !issues.iter().any(|i| i.section() == section);
    let sections = SectionCompleteness {
        site_survey: section_complete(MapLayer::SiteSurvey),
        flight_plan: section_complete(MapLayer::FlightPlan),
        emergency: section_complete(MapLayer::Emergency),
    };

    CompletenessReport {
        is_complete: issues.is_empty(),
        issues,
        sections,
    }
}

/// Element counts and presence flags of a site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    /// Number of obstacles.
    pub obstacle_count: usize,
    /// Number of muster points.
    pub muster_point_count: usize,
    /// Number of evacuation routes.
    pub evacuation_route_count: usize,
    /// Site location is set.
    pub has_site_location: bool,
    /// Operations boundary is set.
    pub has_boundary: bool,
    /// Launch point is set.
    pub has_launch_point: bool,
    /// Recovery point is set.
    pub has_recovery_point: bool,
    /// Pilot position is set.
    pub has_pilot_position: bool,
    /// Flight geography is set.
    pub has_flight_geography: bool,
    /// Contingency volume is set.
    pub has_contingency_volume: bool,
    /// Ground risk buffer is set.
    pub has_ground_risk_buffer: bool,
    /// Area of the operations boundary in m². Zero if there is no boundary.
    pub boundary_area: f64,
}

/// Counts the elements of a site.
pub fn get_site_stats(site: &Site) -> SiteStats {
    let map_data = &site.map_data;
    SiteStats {
        obstacle_count: map_data.obstacles.len(),
        muster_point_count: map_data.muster_points.len(),
        evacuation_route_count: map_data.evacuation_routes.len(),
        has_site_location: map_data.site_location.is_some(),
        has_boundary: map_data.operations_boundary.is_some(),
        has_launch_point: map_data.launch_point.is_some(),
        has_recovery_point: map_data.recovery_point.is_some(),
        has_pilot_position: map_data.pilot_position.is_some(),
        has_flight_geography: map_data.flight_geography.is_some(),
        has_contingency_volume: map_data.contingency_volume.is_some(),
        has_ground_risk_buffer: map_data.ground_risk_buffer.is_some(),
        boundary_area: map_data
            .operations_boundary
            .as_ref()
            .map(|b| b.geometry.area())
            .unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use aerosite_types::Position;
    use approx::assert_relative_eq;

    use super::*;
    use crate::element::{create_map_marker, create_map_polygon, MarkerOptions, PolygonOptions};
    use crate::hazard::{create_muster_point, MusterPointOptions};
    use crate::layer::ElementType;
    use crate::population::PopulationCategory;
    use crate::site::{create_default_site, SiteOptions};

    #[test]
    fn empty_site_is_incomplete() {
        let report = validate_site_completeness(&create_default_site(SiteOptions::default()));
        assert!(!report.is_complete);
        assert_eq!(report.issues.len(), 5);
        assert_eq!(report.sections, SectionCompleteness::default());
        assert!(!report.sections.get(MapLayer::Emergency));
    }

    #[test]
    fn sections_complete_independently() {
        let muster = create_muster_point(0.0, 0.0, MusterPointOptions::default());
        let site = create_default_site(SiteOptions::default())
            .with_muster_point(muster)
            .unwrap();
        let report = validate_site_completeness(&site);
        assert!(report.sections.emergency);
        assert!(!report.sections.site_survey);
        assert!(!report.issues.contains(&CompletenessIssue::MusterPoints));

        let mut survey = site.site_survey.clone();
        survey.population_category = Some(PopulationCategory::Remote);
        let location = create_map_marker(0.0, 0.0, MarkerOptions::new(ElementType::SiteLocation));
        let site = site
            .with_site_survey(survey)
            .place_marker(location)
            .unwrap();
        let report = validate_site_completeness(&site);
        assert!(report.sections.site_survey);
        assert_eq!(
            report.issues,
            [CompletenessIssue::LaunchPoint, CompletenessIssue::RecoveryPoint]
        );
    }

    #[test]
    fn map_items_alone_leave_population_category() {
        let mut site = create_default_site(SiteOptions::default());
        for (element_type, lng) in [
            (ElementType::SiteLocation, 0.0),
            (ElementType::LaunchPoint, 0.001),
            (ElementType::RecoveryPoint, 0.002),
        ] {
            let marker = create_map_marker(lng, 0.0, MarkerOptions::new(element_type));
            site = site.place_marker(marker).unwrap();
        }
        let muster = create_muster_point(0.0, 0.001, MusterPointOptions::default());
        let site = site.with_muster_point(muster).unwrap();

        let report = validate_site_completeness(&site);
        assert!(!report.is_complete);
        assert_eq!(report.issues, [CompletenessIssue::PopulationCategory]);
        assert!(!report.sections.site_survey);
        assert!(report.sections.flight_plan && report.sections.emergency);
    }

    #[test]
    fn issue_serialization() {
        assert_eq!(
            serde_json::to_value(CompletenessIssue::PopulationCategory).unwrap(),
            serde_json::json!("populationCategory")
        );
        assert_eq!(
            CompletenessIssue::LaunchPoint.to_string(),
            "Launch point not set"
        );
    }

    #[test]
    fn stats() {
        let empty = get_site_stats(&create_default_site(SiteOptions::default()));
        assert_eq!(empty, SiteStats::default());

        let muster = create_muster_point(0.5, 0.5, MusterPointOptions::default());
        let site = create_default_site(SiteOptions::default())
            .place_polygon(create_map_polygon(
                vec![
                    Position::new(0.0, 0.0),
                    Position::new(0.0, 1.0),
                    Position::new(1.0, 1.0),
                    Position::new(1.0, 0.0),
                ],
                PolygonOptions::new(ElementType::OperationsBoundary),
            ))
            .and_then(|s| s.with_muster_point(muster))
            .unwrap();
        let stats = get_site_stats(&site);

        assert!(stats.has_boundary);
        assert!(!stats.has_launch_point);
        assert_eq!(stats.muster_point_count, 1);
        assert_relative_eq!(stats.boundary_area, 12_364e6, max_relative = 0.01);
    }
}
