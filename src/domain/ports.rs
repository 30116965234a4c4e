use crate::domain::model::{ExpertRecord, LeaderboardResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn roster_path(&self) -> &str;
    fn output_path(&self) -> &str;
    /// Number of leaderboard rows to publish; 0 keeps every expert.
    fn top(&self) -> usize;
    /// Allocation day for unnumbered consultations without a booked date.
    /// `None` means today.
    fn assign_date(&self) -> Option<NaiveDate>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn fetch(&self) -> Result<Vec<ExpertRecord>>;
    async fn rank(&self, roster: Vec<ExpertRecord>) -> Result<LeaderboardResult>;
    async fn publish(&self, result: LeaderboardResult) -> Result<String>;
}
