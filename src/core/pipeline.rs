//! Leaderboard pipeline: fetch the expert roster, rank it, publish the result.
//!
//! This is the collaborator that feeds stats into the pure scoring and
//! numbering functions and persists what comes out. Sequence allocation is
//! single-threaded and deterministic within one run (roster order); races
//! between concurrent runs are the persistence layer's problem.

use crate::core::consultation;
use crate::core::ranking;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{ExpertRecord, LeaderboardEntry, LeaderboardResult};
use crate::utils::error::{ConsultError, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;

pub struct RosterPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> RosterPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

/// Shape of `report.json`.
#[derive(Serialize)]
struct Report<'a> {
    assign_date: NaiveDate,
    assigned_numbers: usize,
    invalid_numbers: usize,
    experts: &'a [LeaderboardEntry],
}

fn validate_record(expert: &ExpertRecord) -> Result<()> {
    if expert.id.trim().is_empty() {
        return Err(ConsultError::RosterError {
            message: "expert record with empty id".to_string(),
        });
    }
    if !(0.0..=5.0).contains(&expert.stats.avg_rating) {
        return Err(ConsultError::RosterError {
            message: format!(
                "expert {}: avg_rating {} outside [0, 5]",
                expert.id, expert.stats.avg_rating
            ),
        });
    }
    if expert.stats.repeat_clients > expert.stats.total_sessions {
        return Err(ConsultError::RosterError {
            message: format!(
                "expert {}: repeat_clients {} exceeds total_sessions {}",
                expert.id, expert.stats.repeat_clients, expert.stats.total_sessions
            ),
        });
    }
    Ok(())
}

fn render_csv(entries: &[LeaderboardEntry]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "rank",
        "expert_id",
        "name",
        "score",
        "sessions",
        "rating",
        "reviews",
        "repeat_rate",
        "likes",
    ])?;

    for entry in entries {
        writer.write_record([
            entry.rank.to_string(),
            entry.expert_id.clone(),
            entry.name.clone(),
            format!("{:.2}", entry.score),
            format!("{:.2}", entry.breakdown.sessions.score),
            format!("{:.2}", entry.breakdown.rating.score),
            format!("{:.2}", entry.breakdown.reviews.score),
            format!("{:.2}", entry.breakdown.repeat_rate.score),
            format!("{:.2}", entry.breakdown.likes.score),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ConsultError::ProcessingError {
            message: format!("CSV buffer flush failed: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| ConsultError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RosterPipeline<S, C> {
    async fn fetch(&self) -> Result<Vec<ExpertRecord>> {
        tracing::debug!("Reading roster from: {}", self.config.roster_path());
        let data = self.storage.read_file(self.config.roster_path()).await?;
        let roster: Vec<ExpertRecord> = serde_json::from_slice(&data)?;

        // Boundary validation: the scoring functions take inputs as-is, so
        // out-of-contract records must be rejected here.
        for expert in &roster {
            validate_record(expert)?;
        }

        tracing::debug!("Roster holds {} experts", roster.len());
        Ok(roster)
    }

    async fn rank(&self, roster: Vec<ExpertRecord>) -> Result<LeaderboardResult> {
        let assign_date = self
            .config
            .assign_date()
            .unwrap_or_else(|| Local::now().date_naive());

        // Allocation is platform-wide: every code already in the roster
        // competes for the daily sequence, not just the owning expert's.
        let mut allocated: Vec<String> = roster
            .iter()
            .flat_map(|expert| expert.consultations.iter())
            .filter_map(|c| c.consultation_number.clone())
            .collect();

        let mut assigned_numbers = 0;
        let mut invalid_numbers = 0;
        let mut entries = Vec::with_capacity(roster.len());

        for mut expert in roster {
            for record in &mut expert.consultations {
                match &record.consultation_number {
                    Some(code) => {
                        if !consultation::is_valid_at(code, assign_date) {
                            invalid_numbers += 1;
                            tracing::warn!(
                                "Expert {}: stored consultation number '{}' fails validation",
                                expert.id,
                                code
                            );
                        }
                    }
                    None => {
                        let day = record.date.unwrap_or(assign_date);
                        let sequence = consultation::next_sequence(day, &allocated);
                        if sequence > 999 {
                            tracing::warn!(
                                "Day {} exceeded 999 consultations; sequence {} widens the number field",
                                day,
                                sequence
                            );
                        }
                        let code = consultation::generate(day, sequence);
                        allocated.push(code.clone());
                        record.consultation_number = Some(code);
                        assigned_numbers += 1;
                    }
                }
            }

            expert.consultations.sort_by(|a, b| {
                consultation::compare_recent_first(
                    a.consultation_number.as_deref(),
                    b.consultation_number.as_deref(),
                )
            });

            let score = ranking::calculate_ranking_score(&expert.stats);
            let breakdown = ranking::score_breakdown(&expert.stats);
            entries.push(LeaderboardEntry {
                rank: 0,
                expert_id: expert.id,
                name: expert.name,
                score,
                breakdown,
                consultations: expert.consultations,
            });
        }

        // Score descending, ties by id so output order is reproducible
        entries.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.expert_id.cmp(&b.expert_id))
        });

        let top = self.config.top();
        if top > 0 && entries.len() > top {
            entries.truncate(top);
        }

        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        let csv_output = render_csv(&entries)?;

        Ok(LeaderboardResult {
            entries,
            assigned_numbers,
            invalid_numbers,
            csv_output,
        })
    }

    async fn publish(&self, result: LeaderboardResult) -> Result<String> {
        let assign_date = self
            .config
            .assign_date()
            .unwrap_or_else(|| Local::now().date_naive());

        let report = Report {
            assign_date,
            assigned_numbers: result.assigned_numbers,
            invalid_numbers: result.invalid_numbers,
            experts: &result.entries,
        };
        let report_json = serde_json::to_string_pretty(&report)?;

        let csv_path = format!("{}/leaderboard.csv", self.config.output_path());
        let report_path = format!("{}/report.json", self.config.output_path());

        tracing::debug!("Writing leaderboard CSV to: {}", csv_path);
        self.storage
            .write_file(&csv_path, result.csv_output.as_bytes())
            .await?;

        tracing::debug!("Writing report JSON to: {}", report_path);
        self.storage
            .write_file(&report_path, report_json.as_bytes())
            .await?;

        Ok(csv_path)
    }
}
