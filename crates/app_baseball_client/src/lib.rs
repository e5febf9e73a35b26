//! Skill-level rubric, training-menu recommendation, and the
//! `AppBaseballClient` trait for the app_baseball REST backend.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub mod config;
pub mod evaluation;
pub mod http_client;
pub mod level;
pub mod practice;
pub mod recommend;
pub mod rubric;
pub mod skills;
pub mod training_menu;
pub mod utils;

pub use evaluation::{Comment, EvaluationCreate, EvaluationReceipt, EvaluationSnapshot};
pub use level::{Level, clamp_level};
pub use practice::{
    CoachSummary, DailyReport, DailyReportCreate, Player, PracticeLog, PracticeLogCreate,
    PracticeType, WeekendJournal,
};
pub use recommend::{FocusResolution, Recommender, SkillLevels, select_focus};
pub use rubric::{LevelDescription, LevelDescriptor, Rubric, RubricError};
pub use skills::{SkillCategory, UnknownCategory};
pub use training_menu::{TrainingMenu, TrainingMenuEntry};

#[derive(Debug, Error)]
pub enum AppBaseballError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("backend returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("invalid rubric: {0}")]
    InvalidRubric(#[from] RubricError),
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, JsonSchema)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

pub(crate) fn deserialize_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string().into()),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Explicit `null` reads the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    deserialize_opt_string(deserializer)?.ok_or_else(|| D::Error::custom("id must not be null"))
}

#[async_trait]
pub trait AppBaseballClient: Send + Sync + 'static {
    /// `GET /health`
    async fn health(&self) -> Result<HealthStatus, AppBaseballError>;

    /// `GET /db/ping`; true when the backend reports its database reachable.
    async fn ping_database(&self) -> Result<bool, AppBaseballError>;

    /// Fetch and validate the backend's rubric document.
    ///
    /// `Ok(None)` when the backend has no rubric configured. A document that
    /// does not cover every category and level is an error, never partially
    /// used.
    async fn get_rubric(&self) -> Result<Option<Rubric>, AppBaseballError>;

    async fn list_players(&self) -> Result<Vec<Player>, AppBaseballError>;

    async fn get_player(&self, player_id: &str) -> Result<Player, AppBaseballError>;

    /// Latest evaluation for a player, `None` when the player has none yet.
    async fn get_latest_evaluation(
        &self,
        player_id: &str,
    ) -> Result<Option<EvaluationSnapshot>, AppBaseballError>;

    async fn create_evaluation(
        &self,
        evaluation: &EvaluationCreate,
    ) -> Result<EvaluationReceipt, AppBaseballError>;

    /// Most recent practice logs first. `limit` is clamped to 1..=200,
    /// default 50.
    async fn list_practice_logs(
        &self,
        child_id: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Vec<PracticeLog>, AppBaseballError>;

    async fn create_practice_log(
        &self,
        log: &PracticeLogCreate,
    ) -> Result<PracticeLog, AppBaseballError>;

    /// Newest practice log for a child, optionally of one practice type.
    /// `None` when there is none.
    async fn get_latest_practice_log(
        &self,
        child_id: u32,
        practice_type: Option<PracticeType>,
    ) -> Result<Option<PracticeLog>, AppBaseballError>;

    async fn get_latest_daily_report(
        &self,
        player_id: &str,
    ) -> Result<Option<DailyReport>, AppBaseballError>;

    async fn create_daily_report(
        &self,
        player_id: &str,
        report: &DailyReportCreate,
    ) -> Result<DailyReport, AppBaseballError>;

    async fn get_coach_summary(&self) -> Result<CoachSummary, AppBaseballError>;
}
