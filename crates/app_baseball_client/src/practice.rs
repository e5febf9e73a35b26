//! Players, practice logs, daily reports and the coach summary.

use crate::AppBaseballError;
use crate::skills::SkillCategory;
use crate::utils::non_blank;
use chrono::{NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    #[serde(deserialize_with = "crate::deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::deserialize_opt_string")]
    pub grade: Option<String>,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub tags: Vec<String>,
}

/// Numeric child id for a player id. The backend keys practice logs and
/// evaluations by positive integers only.
///
/// Ids carrying a prefix such as `p1` fall back to their digits.
pub fn to_child_id(player_id: &str) -> Result<u32, AppBaseballError> {
    let positive = |s: &str| s.parse::<u32>().ok().filter(|n| *n > 0);
    let trimmed = player_id.trim();
    positive(trimmed)
        .or_else(|| {
            let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
            positive(&digits)
        })
        .ok_or_else(|| {
            AppBaseballError::InvalidInput(format!(
                "player id {player_id:?} is not a positive number"
            ))
        })
}

/// `weekday`/`weekend` are accepted on input and stored as
/// `individual`/`team`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PracticeType {
    #[serde(alias = "weekday")]
    Individual,
    #[serde(alias = "weekend")]
    Team,
}

impl PracticeType {
    pub fn as_str(self) -> &'static str {
        match self {
            PracticeType::Individual => "individual",
            PracticeType::Team => "team",
        }
    }
}

fn check_score(name: &str, value: u8) -> Result<(), AppBaseballError> {
    if (MIN_SCORE..=MAX_SCORE).contains(&value) {
        Ok(())
    } else {
        Err(AppBaseballError::InvalidInput(format!(
            "{name} must be between {MIN_SCORE} and {MAX_SCORE}, got {value}"
        )))
    }
}

/// Body of `POST /practice-logs`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PracticeLogCreate {
    pub child_id: u32,
    pub practice_type: PracticeType,
    pub practice_date: NaiveDate,
    pub mood: u8,
    pub fatigue: u8,
    pub today_practice: String,
    pub coach_said: String,
    pub next_goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_note: Option<String>,
    /// All sections in one block, for readers that show a single text field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PracticeLogCreate {
    /// Same bounds the backend enforces, checked before any request is sent.
    pub fn validate(&self) -> Result<(), AppBaseballError> {
        if self.child_id == 0 {
            return Err(AppBaseballError::InvalidInput(
                "child_id must be at least 1".into(),
            ));
        }
        check_score("mood", self.mood)?;
        check_score("fatigue", self.fatigue)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PracticeLog {
    pub id: i64,
    pub child_id: i64,
    pub practice_type: PracticeType,
    pub practice_date: NaiveDate,
    pub mood: u8,
    pub fatigue: u8,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub today_practice: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub coach_said: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub next_goal: String,
    #[serde(default)]
    pub free_note: Option<String>,
    /// Pre-composed text, when the backend stores one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub created_at: NaiveDateTime,
}

impl PracticeLog {
    /// Stored `content` when present, otherwise the same sections a weekend
    /// journal composes.
    pub fn display_text(&self) -> String {
        match non_blank(self.content.as_deref()) {
            Some(content) => content,
            None => compose_sections(
                &self.today_practice,
                &self.coach_said,
                &self.next_goal,
                self.free_note.as_deref().unwrap_or_default(),
            ),
        }
    }
}

/// Free-form weekend journal from a parent or player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WeekendJournal {
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

const EMPTY_SECTION: &str = "なし";

fn compose_sections(
    did_today: &str,
    coach_said: &str,
    goal_next: &str,
    free_note: &str,
) -> String {
    let section = |heading: &str, body: &str| {
        let body = body.trim();
        let body = if body.is_empty() { EMPTY_SECTION } else { body };
        format!("【{heading}】\n{body}")
    };
    [
        section("今日やった練習", did_today),
        section("コーチに言われたこと", coach_said),
        section("次の目標", goal_next),
        section("自由メモ", free_note),
    ]
    .join("\n\n")
}

impl WeekendJournal {
    pub fn is_empty(&self) -> bool {
        [&self.did_today, &self.coach_said, &self.goal_next, &self.free_note]
            .iter()
            .all(|s| s.trim().is_empty())
    }

    pub fn combined_content(&self) -> String {
        compose_sections(
            &self.did_today,
            &self.coach_said,
            &self.goal_next,
            &self.free_note,
        )
    }

    /// A team practice log for `practice_date`. Fails when every text field
    /// is blank or a score is out of range.
    pub fn into_practice_log(
        self,
        child_id: u32,
        practice_date: NaiveDate,
    ) -> Result<PracticeLogCreate, AppBaseballError> {
        if self.is_empty() {
            return Err(AppBaseballError::InvalidInput(
                "weekend journal has no content".into(),
            ));
        }
        let content = self.combined_content();
        let log = PracticeLogCreate {
            child_id,
            practice_type: PracticeType::Team,
            practice_date,
            mood: self.mood,
            fatigue: self.fatigue,
            today_practice: self.did_today.trim().to_string(),
            coach_said: self.coach_said.trim().to_string(),
            next_goal: self.goal_next.trim().to_string(),
            free_note: non_blank(Some(&self.free_note)),
            content: Some(content),
        };
        log.validate()?;
        Ok(log)
    }
}

/// Body of `POST /players/{id}/daily-reports`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DailyReportCreate {
    pub player_id: String,
    pub body: String,
    pub mood: u8,
    pub fatigue: u8,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DailyReportCreate {
    /// Tags are stored as the display labels of the practiced categories.
    pub fn new(
        player_id: impl Into<String>,
        body: impl Into<String>,
        mood: u8,
        fatigue: u8,
        practiced: &[SkillCategory],
    ) -> Self {
        Self {
            player_id: player_id.into(),
            body: body.into(),
            mood,
            fatigue,
            tags: practiced.iter().map(|c| c.label().to_string()).collect(),
        }
    }

    pub fn validate(&self) -> Result<(), AppBaseballError> {
        if self.body.trim().is_empty() {
            return Err(AppBaseballError::InvalidInput(
                "daily report body must not be empty".into(),
            ));
        }
        check_score("mood", self.mood)?;
        check_score("fatigue", self.fatigue)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DailyReport {
    #[serde(default, deserialize_with = "crate::deserialize_opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "crate::deserialize_opt_string")]
    pub player_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub body: String,
    #[serde(default)]
    pub mood: Option<u8>,
    #[serde(default)]
    pub fatigue: Option<u8>,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CoachSummary {
    #[serde(default)]
    pub total_reports: u64,
    #[serde(default)]
    pub latest_date: Option<NaiveDate>,
}
