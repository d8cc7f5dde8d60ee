use std::{fs::File, io::BufReader, path::PathBuf, time::Duration};

use clap::Args;
use comfy_table::Table;
use hermes_course::{
    course::Course,
    course_aggregator::CourseAggregator,
    course_config::CourseConfig,
    route_section::{AggregateResult, ResolvedLeg},
    transport_mode::TransportMode,
};
use hermes_directions::{
    directions_config::DirectionsConfig, naver_api::NaverDirectionsClient,
    route_option::RouteOption, transit_api::TransitDirectionsClient,
};
use indicatif::ProgressBar;
use jiff::{SignedDuration, Unit};
use tracing::info;

#[derive(Args)]
pub struct CourseSummaryArgs {
    /// A JSON array of waypoints
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// driving or transit, defaults to HERMES_DEFAULT_TRANSPORT_MODE
    #[arg(short, long)]
    mode: Option<TransportMode>,

    /// Route option for driving legs
    #[arg(short, long)]
    option: Option<RouteOption>,

    /// Print the summary as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn read_course(input: &PathBuf) -> anyhow::Result<Course> {
    let f = File::open(input)?;
    Ok(serde_json::from_reader(BufReader::new(f))?)
}

fn format_duration(duration: SignedDuration) -> String {
    duration
        .round(Unit::Second)
        .map(|duration| format!("{duration:#}"))
        .unwrap_or_else(|_| duration.to_string())
}

fn summary_table(result: &AggregateResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "From", "To", "Distance (m)", "Duration", "Transfers"]);

    for (index, section) in result.sections.iter().enumerate() {
        let (distance, duration, transfers) = match &section.resolved {
            Some(leg) => (
                format!("{:.0}", leg.distance_meters()),
                format_duration(leg.duration()),
                match leg {
                    ResolvedLeg::Transit(route) => route.transfer_count.to_string(),
                    ResolvedLeg::Driving(_) => String::new(),
                },
            ),
            None => (String::from("-"), String::from("unavailable"), String::new()),
        };

        table.add_row(vec![
            (index + 1).to_string(),
            section.from.name.clone(),
            section.to.name.clone(),
            distance,
            duration,
            transfers,
        ]);
    }

    table.add_row(vec![
        String::new(),
        String::from("Total"),
        String::new(),
        format!("{:.0}", result.total_distance_meters),
        format_duration(result.total_duration),
        result
            .total_transfers()
            .map(|transfers| transfers.to_string())
            .unwrap_or_default(),
    ]);

    table
}

pub async fn run(args: CourseSummaryArgs) -> anyhow::Result<()> {
    let course = read_course(&args.input)?;
    let directions_config = DirectionsConfig::from_env()?;
    let course_config = CourseConfig::from_env()?;

    let aggregator = CourseAggregator::new(
        NaverDirectionsClient::new((&directions_config).into())?,
        TransitDirectionsClient::new((&directions_config).into())?,
    )
    .with_route_option(args.option.unwrap_or(directions_config.default_option))
    .with_concurrency(course_config.concurrency);

    let mode = course_config.mode_or_default(args.mode);
    info!(
        "Summarizing {} waypoints from {:?} by {mode}",
        course.len(),
        args.input
    );

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Resolving {} legs", course.len().saturating_sub(1)));

    let result = aggregator.aggregate(&course, mode).await;
    spinner.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", summary_table(&result));
    }

    if result.failed_legs > 0 {
        info!(
            "{} of {} legs could not be resolved and are left out of the totals",
            result.failed_legs,
            result.sections.len()
        );
    }

    Ok(())
}
