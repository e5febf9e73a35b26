//! Coach evaluations: the stored snapshot and the create payload.

use crate::AppBaseballError;
use crate::recommend::SkillLevels;
use crate::utils::{non_blank, parse_timestamp};
use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Coach feedback. Older records store a single string; newer ones split it
/// into what went well and what to work on next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Comment {
    PlainText(String),
    Structured {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        good: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next: Option<String>,
    },
}

impl Comment {
    /// What went well. A plain comment is treated as entirely positive.
    pub fn good(&self) -> Option<&str> {
        match self {
            Comment::PlainText(s) => Some(s.as_str()),
            Comment::Structured { good, .. } => good.as_deref(),
        }
    }

    pub fn next(&self) -> Option<&str> {
        match self {
            Comment::PlainText(_) => None,
            Comment::Structured { next, .. } => next.as_deref(),
        }
    }

    /// Read loosely typed JSON; blank or unrecognized shapes yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Comment> {
        match value {
            serde_json::Value::String(s) => non_blank(Some(s)).map(Comment::PlainText),
            serde_json::Value::Object(map) => {
                let field = |k: &str| non_blank(map.get(k).and_then(|v| v.as_str()));
                let (good, next) = (field("good"), field("next"));
                (good.is_some() || next.is_some()).then_some(Comment::Structured { good, next })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEvaluation {
    #[serde(deserialize_with = "crate::deserialize_opt_string")]
    id: Option<String>,
    #[serde(deserialize_with = "crate::deserialize_opt_string")]
    child_id: Option<String>,
    values: SkillLevels,
    comment: serde_json::Value,
    memo: Option<String>,
    evaluated_at: Option<String>,
    created_at: Option<String>,
}

/// The most recent levels recorded for a player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEvaluation")]
pub struct EvaluationSnapshot {
    pub id: Option<String>,
    pub child_id: Option<String>,
    pub values: SkillLevels,
    pub comment: Option<Comment>,
    pub evaluated_at: Option<NaiveDateTime>,
}

impl From<RawEvaluation> for EvaluationSnapshot {
    fn from(raw: RawEvaluation) -> Self {
        let comment = Comment::from_json(&raw.comment)
            .or_else(|| non_blank(raw.memo.as_deref()).map(Comment::PlainText));
        let evaluated_at = raw
            .evaluated_at
            .as_deref()
            .or(raw.created_at.as_deref())
            .and_then(parse_timestamp);
        Self {
            id: raw.id,
            child_id: raw.child_id,
            values: raw.values,
            comment,
            evaluated_at,
        }
    }
}

/// Body of `POST /evaluations`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationCreate {
    pub child_id: u32,
    pub values: SkillLevels,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluated_at: Option<NaiveDateTime>,
}

impl EvaluationCreate {
    pub fn new(child_id: u32, values: SkillLevels) -> Self {
        Self {
            child_id,
            values,
            memo: None,
            comment: None,
            evaluated_at: None,
        }
    }

    pub fn with_memo(mut self, memo: &str) -> Self {
        self.memo = non_blank(Some(memo));
        self
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn validate(&self) -> Result<(), AppBaseballError> {
        if self.child_id == 0 {
            return Err(AppBaseballError::InvalidInput(
                "child_id must be a positive number".into(),
            ));
        }
        Ok(())
    }
}

/// Backend acknowledgement. `skipped` means the backend accepted the request
/// but had nowhere to store it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationReceipt {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl EvaluationReceipt {
    pub fn is_saved(&self) -> bool {
        self.status == "ok"
    }
}
