#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::{
    CommandStrategy, ExtractInput, ExtractStrategy, InfoStrategy, InitStrategy, ReportInput,
    ReportPeriod, ReportStrategy, TelegramInput, TelegramStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "runlog")]
#[command(about = "Group running log fed by workout screenshots", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Init,
    /// Show version
    Version,
    /// Show configuration and store status
    Info,
    /// Run the Telegram bot
    Telegram {
        /// Bot token (overrides config)
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Recognize a local screenshot and print the extracted workout
    Extract {
        image: PathBuf,
    },
    /// Print per-user distance totals for a group
    Report {
        /// Group (chat) id
        #[arg(short, long, allow_hyphen_values = true)]
        group: i64,

        /// Month as YYYY-MM
        #[arg(short, long, conflicts_with_all = ["from", "to"], required_unless_present_all = ["from", "to"])]
        month: Option<String>,

        /// First day, YYYY-MM-DD
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// Last day, YYYY-MM-DD
        #[arg(long, requires = "from")]
        to: Option<String>,
    },
}

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    match cli.command {
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Telegram { token } => TelegramStrategy.execute(TelegramInput { token }).await,
        Commands::Extract { image } => ExtractStrategy.execute(ExtractInput { image }).await,
        Commands::Report {
            group,
            month,
            from,
            to,
        } => {
            let period = match (month, from, to) {
                (Some(month), _, _) => ReportPeriod::Month(month),
                (None, Some(from), Some(to)) => ReportPeriod::Range { from, to },
                _ => anyhow::bail!("Pass either --month or both --from and --to"),
            };
            ReportStrategy
                .execute(ReportInput { group, period })
                .await
        }
    }
}
