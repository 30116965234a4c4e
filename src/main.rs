use clap::Parser;
use consult_core::core::consultation;
use consult_core::domain::ports::Pipeline;
use consult_core::utils::error::ErrorSeverity;
use consult_core::utils::{logger, validation::Validate};
use consult_core::{CliConfig, LeaderboardEngine, LocalStorage, RosterPipeline, TomlConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting consult-core CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // Decode-and-exit mode; no roster involved
    if let Some(code) = &config.inspect {
        inspect_code(code);
        return Ok(());
    }

    let storage = LocalStorage::new(".".to_string());

    if let Some(config_path) = &config.config {
        let toml_config = match TomlConfig::from_file(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("❌ Failed to load config file: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(2);
            }
        };

        if let Err(e) = toml_config.validate() {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(2);
        }

        let monitor_enabled = config.monitor || toml_config.monitoring_enabled();
        if monitor_enabled {
            tracing::info!("🔍 System monitoring enabled");
        }

        let pipeline = RosterPipeline::new(storage, toml_config);
        run(LeaderboardEngine::new_with_monitoring(
            pipeline,
            monitor_enabled,
        ))
        .await;
    } else {
        if let Err(e) = config.validate() {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(2);
        }

        let monitor_enabled = config.monitor;
        if monitor_enabled {
            tracing::info!("🔍 System monitoring enabled");
        }

        let pipeline = RosterPipeline::new(storage, config);
        run(LeaderboardEngine::new_with_monitoring(
            pipeline,
            monitor_enabled,
        ))
        .await;
    }

    Ok(())
}

async fn run<P: Pipeline>(engine: LeaderboardEngine<P>) {
    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Leaderboard run completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ Leaderboard run completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Leaderboard run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

fn inspect_code(code: &str) {
    match consultation::parse(code) {
        Some(number) => {
            println!("📋 {}", consultation::format_display(code));
            println!("   date:     {}", number.date);
            println!("   sequence: {}", number.sequence);
            println!("   valid:    {}", consultation::is_valid(code));
        }
        None => {
            eprintln!("❌ '{}' is not a consultation number (expected CSyymmddNNN)", code);
            std::process::exit(2);
        }
    }
}
