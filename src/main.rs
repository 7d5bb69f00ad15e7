mod commands;
mod context;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use contentcal_core::CalendarMonth;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::config::ConfigKey;
use crate::context::Context;

#[derive(Parser)]
#[command(name = "contentcal")]
#[command(about = "Browse a client's social media content calendar")]
struct Cli {
    /// Client whose calendar to show (defaults to `default_client` in config)
    #[arg(short, long, global = true)]
    client: Option<String>,

    /// Directory or http(s) base URL holding <client>/<month>.json documents
    #[arg(long, global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month as a calendar grid
    Calendar {
        /// Month to show (YYYY-MM, defaults to this month)
        #[arg(short, long)]
        month: Option<CalendarMonth>,

        /// Only show posts for this platform
        #[arg(short, long)]
        platform: Option<String>,
    },
    /// Show every post as a card
    Grid {
        /// Only show posts for this platform
        #[arg(short, long)]
        platform: Option<String>,
    },
    /// Show the posts scheduled on one day
    Day {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Which post to show when there are several (starting at 1)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Only show posts for this platform
        #[arg(short, long)]
        platform: Option<String>,
    },
    /// Show one post
    Post {
        id: String,
    },
    /// Post counts per platform
    Platforms {
        /// Month to count (YYYY-MM, defaults to this month)
        #[arg(short, long)]
        month: Option<CalendarMonth>,

        /// Count as if this platform filter were selected
        #[arg(short, long)]
        platform: Option<String>,
    },
    /// Print where a post was published on a platform
    Link {
        id: String,
        platform: String,

        /// Open the link in the browser
        #[arg(long)]
        open: bool,
    },
    /// Build a pre-filled feedback message for a post
    Feedback {
        id: String,

        /// Open the messaging link in the browser
        #[arg(long)]
        open: bool,
    },
    /// Browse the calendar interactively
    Browse,
    /// Show or change configuration
    Config {
        /// Setting to change
        #[arg(requires = "value")]
        key: Option<ConfigKey>,

        /// New value
        value: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        // Config must work even when the current config can't build a source.
        Commands::Config { key, value } => commands::config::run(key, value),
        command => {
            let ctx = Context::load(cli.source, cli.client)?;
            dispatch(&ctx, command).await
        }
    }
}

async fn dispatch(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Calendar { month, platform } => {
            commands::calendar::run(ctx, month.unwrap_or_else(CalendarMonth::current), platform)
                .await
        }
        Commands::Grid { platform } => commands::grid::run(ctx, platform).await,
        Commands::Day { date, page, platform } => {
            commands::day::run(ctx, &date, page, platform).await
        }
        Commands::Post { id } => commands::post::run(ctx, &id).await,
        Commands::Platforms { month, platform } => {
            commands::platforms::run(ctx, month.unwrap_or_else(CalendarMonth::current), platform)
                .await
        }
        Commands::Link { id, platform, open } => {
            commands::link::run(ctx, &id, &platform, open).await
        }
        Commands::Feedback { id, open } => commands::feedback::run(ctx, &id, open).await,
        Commands::Browse => commands::browse::run(ctx).await,
        Commands::Config { key, value } => commands::config::run(key, value),
    }
}

/// Log to stderr. `CONTENTCAL_LOG` (or `RUST_LOG`) sets the filter; warnings by default.
fn init_logging() {
    let filter = EnvFilter::try_from_env("CONTENTCAL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}
