pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::BotConfig};

pub use adapters::clock::SystemClock;
pub use app::console::{ConsoleSession, SessionSettings};
pub use core::booking::{Actor, BookingEngine};
pub use core::tv_rating::{compute_tv_rating, Grade, ScoreResult};
pub use utils::error::{BookingError, Result};
