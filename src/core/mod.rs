pub mod consultation;
pub mod engine;
pub mod pipeline;
pub mod ranking;
pub mod verification;

pub use crate::domain::model::{ExpertRecord, ExpertStats, LeaderboardResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
