//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input, dispatched
//! statically from `main`.

use runlog_config::Config;
use runlog_store::WorkoutStore;
use tracing::info;

mod extract;
mod info;
mod init;
mod report;
mod telegram;
mod version;

pub use extract::{ExtractInput, ExtractStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use report::{ReportInput, ReportPeriod, ReportStrategy};
pub use telegram::{TelegramInput, TelegramStrategy};
pub use version::VersionStrategy;

/// Open the workout store named by the config.
fn open_workout_store(config: &Config) -> anyhow::Result<WorkoutStore> {
    let path = config.storage.workouts_path()?;
    info!("Workout store: {}", path.display());
    Ok(WorkoutStore::open(path)?)
}

/// Contract for all command strategies.
///
/// Each strategy defines its own input type, so parameters are passed
/// without runtime casting or boxing.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
