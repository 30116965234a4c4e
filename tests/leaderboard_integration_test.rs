use anyhow::Result;
use chrono::NaiveDate;
use consult_core::{CliConfig, LeaderboardEngine, LocalStorage, RosterPipeline};
use tempfile::TempDir;

fn cli_config(assign_date: &str) -> CliConfig {
    CliConfig {
        roster_path: "roster.json".to_string(),
        output_path: "out".to_string(),
        top: 0,
        assign_date: assign_date.parse::<NaiveDate>().ok(),
        config: None,
        inspect: None,
        verbose: false,
        monitor: false,
    }
}

fn write_roster(dir: &TempDir, roster: &serde_json::Value) -> Result<()> {
    std::fs::write(dir.path().join("roster.json"), roster.to_string())?;
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_leaderboard_run() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let roster = serde_json::json!([
        {
            "id": "exp-b",
            "name": "Lee",
            "stats": {"total_sessions": 50, "avg_rating": 4.0, "review_count": 10,
                      "repeat_clients": 10, "like_count": 20},
            "consultations": [
                {"consultation_number": "CS241219001"},
                {"date": "2024-12-19", "topic": "tax planning"}
            ]
        },
        {
            "id": "exp-a",
            "name": "Kim",
            "stats": {"total_sessions": 100, "avg_rating": 5.0, "review_count": 50,
                      "repeat_clients": 100, "like_count": 100},
            "consultations": []
        },
        {"id": "exp-c", "name": "Park"}
    ]);
    write_roster(&temp_dir, &roster)?;

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = RosterPipeline::new(storage, cli_config("2024-12-19"));
    let engine = LeaderboardEngine::new(pipeline);

    let output_path = engine.run().await.unwrap();
    assert_eq!(output_path, "out/leaderboard.csv");

    // CSV is ordered by score descending
    let csv = std::fs::read_to_string(temp_dir.path().join("out/leaderboard.csv"))?;
    let lines: Vec<&str> = csv.lines().collect();
    assert!(lines[0].starts_with("rank,expert_id,name,score"));
    assert!(lines[1].starts_with("1,exp-a,Kim,1000.00"));
    assert!(lines[2].starts_with("2,exp-b,Lee,500.00"));
    assert!(lines[3].starts_with("3,exp-c,Park,0.00"));

    // Report carries the allocation outcome and the full breakdowns
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join("out/report.json"))?)?;
    assert_eq!(report["assign_date"], "2024-12-19");
    assert_eq!(report["assigned_numbers"], 1);
    assert_eq!(report["invalid_numbers"], 0);
    assert_eq!(report["experts"][0]["expert_id"], "exp-a");
    assert_eq!(report["experts"][0]["breakdown"]["total_score"], 1000.0);

    // The unnumbered consultation got the next daily sequence, and the
    // expert's consultations come back most recent (highest sequence) first
    let consultations = &report["experts"][1]["consultations"];
    assert_eq!(consultations[0]["consultation_number"], "CS241219002");
    assert_eq!(consultations[1]["consultation_number"], "CS241219001");

    Ok(())
}

#[tokio::test]
async fn test_top_limits_published_rows() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let roster = serde_json::json!([
        {"id": "exp-a", "name": "Kim", "stats": {"total_sessions": 80, "avg_rating": 4.8}},
        {"id": "exp-b", "name": "Lee", "stats": {"total_sessions": 20, "avg_rating": 3.0}},
        {"id": "exp-c", "name": "Park"}
    ]);
    write_roster(&temp_dir, &roster)?;

    let mut config = cli_config("2024-12-19");
    config.top = 2;

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = RosterPipeline::new(storage, config);
    let engine = LeaderboardEngine::new(pipeline);
    engine.run().await.unwrap();

    let csv = std::fs::read_to_string(temp_dir.path().join("out/leaderboard.csv"))?;
    // Header plus two rows; exp-c is cut
    assert_eq!(csv.lines().count(), 3);
    assert!(!csv.contains("exp-c"));

    Ok(())
}

#[tokio::test]
async fn test_invalid_stored_numbers_are_reported() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let roster = serde_json::json!([
        {
            "id": "exp-a",
            "name": "Kim",
            "stats": {"total_sessions": 5, "avg_rating": 4.0},
            "consultations": [
                {"consultation_number": "CS991231001"},
                {"consultation_number": "CS241219001"}
            ]
        }
    ]);
    write_roster(&temp_dir, &roster)?;

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = RosterPipeline::new(storage, cli_config("2024-12-19"));
    let engine = LeaderboardEngine::new(pipeline);
    engine.run().await.unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join("out/report.json"))?)?;
    // CS991231001 decodes to 2099-12-31: future-dated, so invalid
    assert_eq!(report["invalid_numbers"], 1);
    assert_eq!(report["assigned_numbers"], 0);

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_monitoring() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let roster = serde_json::json!([
        {"id": "exp-a", "name": "Kim", "stats": {"total_sessions": 10, "avg_rating": 4.5}}
    ]);
    write_roster(&temp_dir, &roster)?;

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = RosterPipeline::new(storage, cli_config("2024-12-19"));
    let engine = LeaderboardEngine::new_with_monitoring(pipeline, true);

    let result = engine.run().await;
    assert!(result.is_ok());
    assert!(temp_dir.path().join("out/leaderboard.csv").exists());

    Ok(())
}
