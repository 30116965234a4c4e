#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use chrono::NaiveDate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "consult-core")]
#[command(about = "Expert leaderboard and consultation numbering for the booking platform")]
pub struct CliConfig {
    #[arg(long, default_value = "./roster.json")]
    pub roster_path: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Leaderboard rows to publish; 0 keeps every expert
    #[arg(long, default_value = "0")]
    pub top: usize,

    /// Allocation day for unnumbered consultations (YYYY-MM-DD, default today)
    #[arg(long)]
    pub assign_date: Option<NaiveDate>,

    /// Read settings from a TOML file instead of the flags above
    #[arg(long)]
    pub config: Option<String>,

    /// Decode and validate one consultation number, then exit
    #[arg(long)]
    pub inspect: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn roster_path(&self) -> &str {
        &self.roster_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn top(&self) -> usize {
        self.top
    }

    fn assign_date(&self) -> Option<NaiveDate> {
        self.assign_date
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("roster_path", &self.roster_path)?;
        validation::validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}
