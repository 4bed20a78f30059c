use runlog_config::Config;
use runlog_store::UserDirectory;
use tracing::info;

/// Strategy for displaying configuration information.
///
/// Outputs the effective configuration (token masked) and the state of the
/// two store files.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== runlog Configuration ===\n");

        println!("Telegram:");
        println!("  Token: {}", mask_token(&config.telegram.token));
        if config.telegram.password.is_empty() {
            println!("  Password: (not set - registration disabled)");
        } else {
            println!("  Password: ***");
        }
        println!();

        println!("Storage:");
        println!("  Data Dir: {}", config.storage.data_dir()?.display());

        info!("Opening stores");
        match super::open_workout_store(&config) {
            Ok(store) => println!("  Workouts: {} entries", store.len()),
            Err(e) => println!("  Workouts: failed to open ({e})"),
        }
        match UserDirectory::open(config.storage.users_path()?) {
            Ok(users) => println!("  Users: {} registered", users.len()),
            Err(e) => println!("  Users: failed to open ({e})"),
        }
        println!();

        println!("OCR:");
        println!("  Command: {}", config.ocr.command);
        println!("  Language: {}", config.ocr.language);
        println!("  Timeout: {}s", config.ocr.timeout_secs);
        println!();

        println!("Extraction Profiles (in priority order):");
        for profile in &config.extraction.profiles {
            println!("  {}: {}", profile.variant, profile.keywords.join(", "));
        }

        Ok(())
    }
}

fn mask_token(token: &str) -> String {
    if token.is_empty() {
        return "(not set)".to_string();
    }
    match token.char_indices().nth(8) {
        Some((cutoff, _)) => format!("{}...***", &token[..cutoff]),
        None => "***".to_string(),
    }
}
