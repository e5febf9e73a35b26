use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use app_baseball_client::{
    Comment, DailyReport, LevelDescriptor, Player, PracticeLog, PracticeType, SkillCategory,
    SkillLevels, TrainingMenuEntry,
};

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ClampLevelParams {
    /// Raw level: a number, a numeric string, or anything else (read as 10)
    pub value: serde_json::Value,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ClampLevelResult {
    pub level: u8,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CategoryLevelParams {
    /// One of batting, throwing, catching, running, iq (hitting/defense accepted)
    pub category: String,
    /// Level 1-10; out-of-range or fractional values are clamped
    pub level: serde_json::Value,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct PickMenuResult {
    pub category: SkillCategory,
    pub level: u8,
    /// Absent when no menu is defined for this level
    pub menu: Option<TrainingMenuEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct DescribeLevelResult {
    pub category: SkillCategory,
    pub label: String,
    pub current: LevelDescriptor,
    /// The next level toward mastery; absent at level 1
    pub next: Option<LevelDescriptor>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SelectFocusParams {
    /// Level per category; missing categories count as 10
    #[serde(default)]
    pub levels: SkillLevels,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct FocusResult {
    pub category: SkillCategory,
    pub label: String,
    pub level: u8,
    pub menu: Option<TrainingMenuEntry>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct PlayerIdParam {
    pub player_id: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct RecommendationResult {
    pub player_id: String,
    /// False when the player has no evaluation yet and every level reads as 10
    pub has_evaluation: bool,
    pub evaluated_at: Option<String>,
    pub levels: SkillLevels,
    pub focus: FocusResult,
    pub current: Option<LevelDescriptor>,
    pub next: Option<LevelDescriptor>,
    pub comment: Option<Comment>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct OptionalCategoryParam {
    /// Restrict to one category
    pub category: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct RubricCategoryView {
    pub category: SkillCategory,
    pub label: String,
    /// Level 10 first
    pub levels: Vec<LevelDescriptor>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct RubricResult {
    pub categories: Vec<RubricCategoryView>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct MenuCoverageView {
    pub category: SkillCategory,
    pub entries: Vec<TrainingMenuEntry>,
    /// Levels no entry covers
    pub gaps: Vec<u8>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct MenuCoverageResult {
    pub categories: Vec<MenuCoverageView>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct PlayersResult {
    pub players: Vec<Player>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateEvaluationParams {
    pub player_id: String,
    pub levels: SkillLevels,
    pub memo: Option<String>,
    /// What went well
    pub good: Option<String>,
    /// What to work on next
    pub next: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ListPracticeLogsParams {
    pub player_id: Option<String>,
    /// 1-200, default 50
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct PracticeLogsResult {
    pub logs: Vec<PracticeLog>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreatePracticeLogParams {
    pub player_id: String,
    /// individual/team (weekday/weekend accepted)
    pub practice_type: PracticeType,
    /// YYYY-MM-DD, defaults to today
    pub practice_date: Option<String>,
    /// 1-5
    pub mood: u8,
    /// 1-5
    pub fatigue: u8,
    #[serde(default)]
    pub today_practice: String,
    #[serde(default)]
    pub coach_said: String,
    #[serde(default)]
    pub next_goal: String,
    pub free_note: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct WeekendJournalParams {
    pub player_id: String,
    /// YYYY-MM-DD, defaults to today
    pub practice_date: Option<String>,
    #[serde(default)]
    pub did_today: String,
    #[serde(default)]
    pub coach_said: String,
    #[serde(default)]
    pub goal_next: String,
    #[serde(default)]
    pub free_note: String,
    pub mood: u8,
    pub fatigue: u8,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct LatestPracticeLogParams {
    pub player_id: String,
    /// individual/team (weekday/weekend accepted); any type when absent
    pub practice_type: Option<PracticeType>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct LatestPracticeLogResult {
    pub log: Option<PracticeLog>,
    /// Stored content, or the log's sections composed into one text
    pub text: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct DailyReportResult {
    pub report: Option<DailyReport>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SubmitDailyReportParams {
    pub player_id: String,
    pub body: String,
    /// 1-5
    pub mood: u8,
    /// 1-5
    pub fatigue: u8,
    /// Categories practiced today
    #[serde(default)]
    pub practiced: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BackendHealthResult {
    pub status: String,
    /// Absent when the database check itself failed
    pub database_ok: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct PlayerGrowthReviewParams {
    pub player_id: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct WeeklyPracticePlanParams {
    pub player_id: String,
    /// Practice days available this week, default 3
    pub days_per_week: Option<u32>,
    /// Skill to center the week on; defaults to the recommended focus
    pub focus: Option<String>,
}
