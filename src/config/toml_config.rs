use crate::core::ConfigProvider;
use crate::utils::error::{ConsultError, Result};
use crate::utils::validation::{self, Validate};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub roster: RosterConfig,
    pub output: OutputConfig,
    pub leaderboard: Option<LeaderboardConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Rows to publish; absent or 0 keeps every expert.
    pub top: Option<usize>,
    /// Allocation day for unnumbered consultations, as a quoted
    /// `"YYYY-MM-DD"` string. Absent means today.
    pub assign_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConsultError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ConsultError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` references with the environment value; unknown
    /// variables are left as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("roster.path", &self.roster.path)?;
        validation::validate_path("output.path", &self.output.path)?;

        if let Some(leaderboard) = &self.leaderboard {
            if let Some(date) = leaderboard.assign_date {
                // Consultation numbers only encode years 2000-2099
                validation::validate_range(
                    "leaderboard.assign_date",
                    date.year(),
                    2000,
                    2099,
                )?;
            }
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn roster_path(&self) -> &str {
        &self.roster.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn top(&self) -> usize {
        self.leaderboard.as_ref().and_then(|l| l.top).unwrap_or(0)
    }

    fn assign_date(&self) -> Option<NaiveDate> {
        self.leaderboard.as_ref().and_then(|l| l.assign_date)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[roster]
path = "./roster.json"

[output]
path = "./out"

[leaderboard]
top = 10
assign_date = "2024-12-19"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.roster_path(), "./roster.json");
        assert_eq!(config.output_path(), "./out");
        assert_eq!(config.top(), 10);
        assert_eq!(
            config.assign_date(),
            NaiveDate::from_ymd_opt(2024, 12, 19)
        );
    }

    #[test]
    fn test_optional_sections_default() {
        let toml_content = r#"
[roster]
path = "./roster.json"

[output]
path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.top(), 0);
        assert_eq!(config.assign_date(), None);
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_ROSTER_PATH", "/data/roster.json");

        let toml_content = r#"
[roster]
path = "${TEST_ROSTER_PATH}"

[output]
path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.roster_path(), "/data/roster.json");

        std::env::remove_var("TEST_ROSTER_PATH");
    }

    #[test]
    fn test_unknown_env_var_is_kept_verbatim() {
        let toml_content = r#"
[roster]
path = "${CONSULT_CORE_UNSET_VAR}"

[output]
path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.roster_path(), "${CONSULT_CORE_UNSET_VAR}");
    }

    #[test]
    fn test_config_validation_rejects_empty_path() {
        let toml_content = r#"
[roster]
path = ""

[output]
path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_out_of_window_assign_date() {
        let toml_content = r#"
[roster]
path = "./roster.json"

[output]
path = "./out"

[leaderboard]
assign_date = "1999-12-31"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[roster]
path = "./roster.json"

[output]
path = "./out"

[monitoring]
enabled = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.roster_path(), "./roster.json");
        assert!(config.monitoring_enabled());
    }
}
