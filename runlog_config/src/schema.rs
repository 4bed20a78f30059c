use runlog_extract::ExtractionConfig;
use runlog_providers::OcrConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_DIR_NAME: &str = "runlog";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,
    /// Shared secret asked by `/start`. Empty disables registration.
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    /// Defaults to `~/runlog/data`. A leading `~/` is expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    #[serde(default = "StorageConfig::default_workouts_file")]
    pub workouts_file: String,
    #[serde(default = "StorageConfig::default_users_file")]
    pub users_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            workouts_file: Self::default_workouts_file(),
            users_file: Self::default_users_file(),
        }
    }
}

impl StorageConfig {
    fn default_workouts_file() -> String {
        "workouts.json".to_string()
    }

    fn default_users_file() -> String {
        "users.json".to_string()
    }

    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        match self.data_dir.as_deref() {
            Some(dir) => expand_home(dir),
            None => Ok(Config::config_dir()?.join("data")),
        }
    }

    pub fn workouts_path(&self) -> anyhow::Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.workouts_file))
    }

    pub fn users_path(&self) -> anyhow::Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.users_file))
    }

    /// Scratch directory for downloaded photos.
    pub fn images_dir(&self) -> anyhow::Result<PathBuf> {
        Ok(self.data_dir()?.join("images"))
    }
}

fn home_dir() -> anyhow::Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))
}

fn expand_home(dir: &str) -> anyhow::Result<PathBuf> {
    if dir == "~" {
        return home_dir();
    }
    match dir.strip_prefix("~/") {
        Some(rest) => Ok(home_dir()?.join(rest)),
        None => Ok(PathBuf::from(dir)),
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "telegram": {
    "token": "your-telegram-bot-token-here",
    "password": "choose-a-shared-password"
  },
  "storage": {
    "data_dir": "~/runlog/data",
    "workouts_file": "workouts.json",
    "users_file": "users.json"
  },
  "ocr": {
    "command": "tesseract",
    "language": "eng",
    "timeout_secs": 60
  },
  "extraction": {
    "profiles": [
      {
        "variant": "apple_workout",
        "keywords": ["Workout", "Time", "Distance", "Active Kilocalories", "Total Kilocalories"]
      },
      {
        "variant": "run_keeper",
        "keywords": ["km", "time", "min/km", "Calories"]
      }
    ]
  }
}"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(home_dir()?.join(CONFIG_DIR_NAME))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'runlog init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    /// Write the template to `path`, refusing to overwrite.
    pub fn write_template(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }
        std::fs::write(path, CONFIG_TEMPLATE)?;
        Ok(())
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_path = Self::ensure_config_dir()?.join(CONFIG_FILE_NAME);
        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your Telegram bot token");
        println!("   2. Set a password and share it with your running group");
        println!("   3. Install tesseract and make sure it is on PATH");
        println!("   4. Run 'runlog telegram' to start the bot");
        println!();
        println!("🔧 Configuration options:");
        println!("   - storage.data_dir: where workouts.json and users.json live");
        println!("   - ocr.language: tesseract language pack to use");
        println!("   - extraction.profiles: keywords that identify each app's screenshot");
        println!();
        Ok(())
    }
}
