//! Builds a small project with two sites and prints their completeness, stats and JSON.

use aerosite::aerosite_types::{
    bearing_to_direction, calculate_bearing, calculate_distance, format_coordinates,
    square_meters_to_hectares, CoordinateFormat, DistanceUnit, Position,
};
use aerosite::{
    create_evacuation_route, create_map_marker, create_map_polygon, create_muster_point,
    create_obstacle, get_site_stats, validate_site_completeness, DuplicateOptions, ElementType,
    EvacuationRouteOptions, Marker, MarkerOptions, MusterPointOptions, ObstacleOptions,
    ObstacleType, PolygonOptions, PopulationCategory, Project, SiteOptions, SiteStatus,
};

fn marker(element_type: ElementType, lng: f64, lat: f64) -> Marker {
    create_map_marker(lng, lat, MarkerOptions::new(element_type))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let options = SiteOptions::default().with_name("Ridge quarry");
    let project = Project::new().create_site(options)?;
    let site = project.sites()[0].clone();

    let mut survey = site.site_survey.clone();
    survey.population_category = Some(PopulationCategory::SparselyPopulated);

    let site = site
        .with_site_survey(survey)
        .place_marker(marker(ElementType::SiteLocation, -1.8634, 53.7326))?
        .place_marker(marker(ElementType::LaunchPoint, -1.8650, 53.7320))?
        .place_marker(marker(ElementType::RecoveryPoint, -1.8648, 53.7321))?
        .place_polygon(create_map_polygon(
            vec![
                Position::new(-1.8700, 53.7300),
                Position::new(-1.8700, 53.7350),
                Position::new(-1.8580, 53.7350),
                Position::new(-1.8580, 53.7300),
            ],
            PolygonOptions::new(ElementType::OperationsBoundary)
                .with_label("Quarry boundary"),
        ))?
        .with_obstacle(create_obstacle(
            -1.8610,
            53.7331,
            ObstacleOptions::new(ObstacleType::Wire)
                .with_height(18.0)
                .with_radius(30.0),
        ))?
        .with_muster_point(create_muster_point(
            -1.8660,
            53.7310,
            MusterPointOptions::default()
                .primary()
                .with_label("Gate car park")
                .with_capacity(20),
        ))?
        .with_evacuation_route(create_evacuation_route(
            vec![
                Position::new(-1.8660, 53.7310),
                Position::new(-1.8690, 53.7290),
            ],
            EvacuationRouteOptions::default()
                .primary()
                .with_surface_type("gravel"),
        ))?
        .transition_to(SiteStatus::Surveyed)?;
    site.validate()?;

    let project = project.replace_site(site.clone())?;
    let options = DuplicateOptions::default();
    let project = project.duplicate_site(&site.id, options)?;

    for site in project.sites() {
        let report = validate_site_completeness(site);
        let stats = get_site_stats(site);
        println!(
            "{} [{}] complete: {}",
            site.name,
            site.status(),
            report.is_complete
        );
        for issue in &report.issues {
            println!("  missing: {issue}");
        }
        println!(
            "  {} obstacles, {} muster points, boundary {:.2} ha",
            stats.obstacle_count,
            stats.muster_point_count,
            square_meters_to_hectares(stats.boundary_area)
        );
    }

    let launch = site.map_data.launch_point.as_ref();
    if let (Some(launch), Some(muster)) = (launch, site.primary_muster_point()) {
        let from = launch.position();
        let to = muster.element.position();
        println!(
            "Launch point {} -> muster point: {:.0} m {}",
            format_coordinates(from.lat, from.lng, CoordinateFormat::Dms, 1),
            calculate_distance(from, to, DistanceUnit::Kilometers) * 1000.0,
            bearing_to_direction(calculate_bearing(from, to)),
        );
    }

    if let Some(bounds) = project.bounds() {
        println!("Project bounds: {bounds:?}");
    }

    println!("{}", serde_json::to_string_pretty(&site)?);
    Ok(())
}
