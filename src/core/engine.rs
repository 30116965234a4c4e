use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::PhaseMonitor;

/// Drives the three leaderboard phases: fetch, rank, publish.
pub struct LeaderboardEngine<P: Pipeline> {
    pipeline: P,
    monitor: PhaseMonitor,
}

impl<P: Pipeline> LeaderboardEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: PhaseMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting leaderboard run...");

        tracing::info!("Fetching roster...");
        let roster = self.pipeline.fetch().await?;
        tracing::info!("Fetched {} experts", roster.len());
        self.monitor.log_phase("Fetch", roster.len());

        tracing::info!("Ranking experts...");
        let result = self.pipeline.rank(roster).await?;
        tracing::info!(
            "Ranked {} experts ({} numbers assigned, {} stored numbers invalid)",
            result.entries.len(),
            result.assigned_numbers,
            result.invalid_numbers
        );
        self.monitor.log_phase("Rank", result.entries.len());

        tracing::info!("Publishing leaderboard...");
        let output_path = self.pipeline.publish(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_summary();

        Ok(output_path)
    }
}
