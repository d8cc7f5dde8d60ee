use clap::Args;
use comfy_table::Table;
use hermes_directions::{
    directions_config::DirectionsConfig,
    driving_route::{DrivingRequest, MAX_WAYPOINTS},
    geopoint::GeoPoint,
    naver_api::NaverDirectionsClient,
    route_option::RouteOption,
};
use tracing::{info, warn};

use crate::parsers;

#[derive(Args)]
pub struct DirectionsArgs {
    /// Start point as lat,lng
    #[arg(short, long, value_parser = parsers::parse_point)]
    start: GeoPoint,

    /// Goal point as lat,lng
    #[arg(short, long, value_parser = parsers::parse_point)]
    goal: GeoPoint,

    /// Intermediate points as lat,lng, repeatable
    #[arg(short, long, value_parser = parsers::parse_point)]
    waypoint: Vec<GeoPoint>,

    /// trafast, tracomfort, traoptimal, traavoidtoll or traavoidcaronly
    #[arg(short, long)]
    option: Option<RouteOption>,

    /// Print the canonical route as JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub async fn run(args: DirectionsArgs) -> anyhow::Result<()> {
    let config = DirectionsConfig::from_env()?;
    let client = NaverDirectionsClient::new((&config).into())?;

    if args.waypoint.len() > MAX_WAYPOINTS {
        warn!(
            "Only the first {MAX_WAYPOINTS} of {} waypoints are used",
            args.waypoint.len()
        );
    }

    let mut request = DrivingRequest::new(
        args.start,
        args.goal,
        args.option.unwrap_or(config.default_option),
    );
    request.waypoints = args.waypoint;

    let route = client.route(&request).await?;

    info!(
        "Route {}: {} m, {} min",
        route.option,
        route.summary.distance,
        route.summary.duration / 60_000
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&route)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Road", "Distance (m)", "Duration (s)", "Congestion"]);
    for (index, section) in route.sections.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            section.name.clone().unwrap_or_default(),
            format!("{:.0}", section.distance),
            (section.duration / 1000).to_string(),
            section
                .congestion
                .map(|congestion| congestion.to_string())
                .unwrap_or_default(),
        ]);
    }
    println!("{table}");

    Ok(())
}
