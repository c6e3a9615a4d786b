mod commands;
mod render;
mod time;

use anyhow::Result;
use calboard_core::config::CalboardConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "calboard")]
#[command(about = "List and edit the events shared by the calboard calendar views")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stored events
    List {
        /// Only events starting on this day (YYYY-MM-DD, local time)
        #[arg(long, conflicts_with_all = ["recent", "from", "to"])]
        date: Option<String>,

        /// Only the N most recent events, newest first
        #[arg(long, conflicts_with_all = ["from", "to"])]
        recent: Option<usize>,

        /// Events starting from this date/time
        #[arg(long)]
        from: Option<String>,

        /// Events starting until this date/time
        #[arg(long)]
        to: Option<String>,
    },
    /// Create an event
    Add {
        title: String,

        /// Start (RFC 3339, "YYYY-MM-DDTHH:MM" or "YYYY-MM-DD")
        #[arg(short, long)]
        start: String,

        /// End, defaults to one hour after start
        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Hex display color, e.g. "#10b981"
        #[arg(short, long)]
        color: Option<String>,

        #[arg(long)]
        all_day: bool,
    },
    /// Change fields of an existing event
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        /// New description (empty string clears it)
        #[arg(long)]
        description: Option<String>,

        /// New color (empty string clears it)
        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        all_day: Option<bool>,
    },
    /// Delete an event by id
    Delete { id: String },
    /// Remove every event
    Clear,
    /// Replace all events with the sample data
    Reset,
}

fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let config = CalboardConfig::load()?;
    let store = config.open_store();

    match cli.command {
        Commands::List {
            date,
            recent,
            from,
            to,
        } => commands::list::run(&store, date, recent, from, to),
        Commands::Add {
            title,
            start,
            end,
            description,
            color,
            all_day,
        } => commands::add::run(&store, title, start, end, description, color, all_day),
        Commands::Update {
            id,
            title,
            start,
            end,
            description,
            color,
            all_day,
        } => {
            let fields = commands::update::Fields {
                title,
                start,
                end,
                description,
                color,
                all_day,
            };
            commands::update::run(&store, &id, fields)
        }
        Commands::Delete { id } => commands::delete::run(&store, &id),
        Commands::Clear => commands::clear::run(&store),
        Commands::Reset => commands::reset::run(&store),
    }
}

/// Log to stderr, quiet unless RUST_LOG asks for more.
fn init_logging() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {}", e))?;

    Ok(())
}
