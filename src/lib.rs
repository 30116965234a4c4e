pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use config::toml_config::TomlConfig;
pub use core::{engine::LeaderboardEngine, pipeline::RosterPipeline};
pub use utils::error::{ConsultError, Result};
