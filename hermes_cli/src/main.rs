use clap::{Parser, Subcommand};

use mimalloc::MiMalloc;

use crate::{course_summary::CourseSummaryArgs, directions::DirectionsArgs};

mod course_summary;
mod directions;
mod parsers;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(visible_alias = "c")]
    Course {
        #[command(subcommand)]
        commands: CourseSubcommands,
    },
    /// Driving directions between two points
    #[command(visible_alias = "d")]
    Directions {
        #[command(flatten)]
        args: DirectionsArgs,
    },
}

#[derive(Subcommand)]
enum CourseSubcommands {
    /// Per-leg sections and travel totals for a course file
    Summary {
        #[command(flatten)]
        args: CourseSummaryArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Course {
            commands: CourseSubcommands::Summary { args },
        }) => course_summary::run(args).await?,
        Some(Commands::Directions { args }) => directions::run(args).await?,
        None => {}
    }

    Ok(())
}
