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

//! Telegram front-end: commands, conversations, and replies.

mod bot;
mod command;
mod conversation;
mod error;
mod handler;
pub mod report;
mod tracker;

pub use bot::TelegramBot;
pub use command::Command;
pub use conversation::{ConversationKey, ConversationState, Conversations, Period};
pub use error::{Error, Result};
pub use tracker::{PasswordCheck, Tracker};
