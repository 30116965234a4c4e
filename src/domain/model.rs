use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Activity counters for one expert, assembled by the caller from persisted
/// records. Absent fields deserialize to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpertStats {
    #[serde(default)]
    pub total_sessions: u32,
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub repeat_clients: u32,
    #[serde(default)]
    pub like_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub stats: ExpertStats,
    #[serde(default)]
    pub consultations: Vec<ConsultationRecord>,
}

/// One consultation as stored by the booking layer. `consultation_number` is
/// absent until a number has been allocated; `date` carries the booked day for
/// entries that are still unnumbered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationRecord {
    #[serde(default)]
    pub consultation_number: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub score: f64,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub sessions: ScoreComponent,
    pub rating: ScoreComponent,
    pub reviews: ScoreComponent,
    pub repeat_rate: ScoreComponent,
    pub likes: ScoreComponent,
    pub total_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub expert_id: String,
    pub name: String,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub consultations: Vec<ConsultationRecord>,
}

#[derive(Debug, Clone)]
pub struct LeaderboardResult {
    pub entries: Vec<LeaderboardEntry>,
    pub assigned_numbers: usize,
    pub invalid_numbers: usize,
    pub csv_output: String,
}
