use runlog_store::{DirectoryError, StoreError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Download error: {0}")]
    Download(#[from] teloxide::DownloadError),

    #[error("Workout store error: {0}")]
    Store(#[from] StoreError),

    #[error("User directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
