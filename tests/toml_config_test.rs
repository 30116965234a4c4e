use anyhow::Result;
use consult_core::utils::validation::Validate;
use consult_core::{LeaderboardEngine, LocalStorage, RosterPipeline, TomlConfig};
use tempfile::TempDir;

#[tokio::test]
async fn test_end_to_end_run_with_toml_config() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let roster = serde_json::json!([
        {"id": "exp-a", "name": "Kim", "stats": {"total_sessions": 30, "avg_rating": 4.2},
         "consultations": [{"date": "2024-12-19"}]}
    ]);
    std::fs::write(temp_dir.path().join("roster.json"), roster.to_string())?;

    let toml_content = r#"
[roster]
path = "roster.json"

[output]
path = "reports"

[leaderboard]
top = 5
assign_date = "2024-12-19"
"#;
    let config_path = temp_dir.path().join("consult.toml");
    std::fs::write(&config_path, toml_content)?;

    let config = TomlConfig::from_file(&config_path).unwrap();
    config.validate().unwrap();

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = RosterPipeline::new(storage, config);
    let engine = LeaderboardEngine::new(pipeline);

    let output_path = engine.run().await.unwrap();
    assert_eq!(output_path, "reports/leaderboard.csv");

    let report: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(
        temp_dir.path().join("reports/report.json"),
    )?)?;
    assert_eq!(report["assigned_numbers"], 1);
    assert_eq!(
        report["experts"][0]["consultations"][0]["consultation_number"],
        "CS241219001"
    );

    Ok(())
}

#[tokio::test]
async fn test_toml_config_missing_file_is_an_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = TomlConfig::from_file(temp_dir.path().join("absent.toml"));
    assert!(result.is_err());
}

#[tokio::test]
async fn test_toml_config_missing_section_is_a_parse_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("consult.toml");
    // No [output] section
    std::fs::write(&config_path, "[roster]\npath = \"roster.json\"\n")?;

    let err = TomlConfig::from_file(&config_path).unwrap_err();
    assert!(err.to_string().contains("toml_parsing"));

    Ok(())
}
