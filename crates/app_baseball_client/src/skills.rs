//! The closed set of skill categories a player is rated on.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    #[serde(alias = "hitting")]
    Batting,
    Throwing,
    #[serde(alias = "defense")]
    Catching,
    Running,
    Iq,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown skill category: {0:?} (expected one of batting, throwing, catching, running, iq)")]
pub struct UnknownCategory(pub String);

impl SkillCategory {
    /// Canonical order. Also the tie-break order for focus selection.
    pub const ALL: [SkillCategory; 5] = [
        SkillCategory::Batting,
        SkillCategory::Throwing,
        SkillCategory::Catching,
        SkillCategory::Running,
        SkillCategory::Iq,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SkillCategory::Batting => "batting",
            SkillCategory::Throwing => "throwing",
            SkillCategory::Catching => "catching",
            SkillCategory::Running => "running",
            SkillCategory::Iq => "iq",
        }
    }

    /// Display label shown to players and parents.
    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::Batting => "打つ（バッティング）",
            SkillCategory::Throwing => "投げる（スローイング）",
            SkillCategory::Catching => "捕る（キャッチング）",
            SkillCategory::Running => "走る（走塁・スピード）",
            SkillCategory::Iq => "ルール・マナー（野球IQ）",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Resolve a raw key, returning whether it was a legacy alias.
    ///
    /// Older evaluation records use `hitting` for batting and `defense` for
    /// catching. Matching is case-insensitive and ignores surrounding
    /// whitespace.
    pub fn resolve_key(raw: &str) -> Option<(SkillCategory, bool)> {
        let key = raw.trim().to_ascii_lowercase();
        let resolved = match key.as_str() {
            "batting" => (SkillCategory::Batting, false),
            "throwing" => (SkillCategory::Throwing, false),
            "catching" => (SkillCategory::Catching, false),
            "running" => (SkillCategory::Running, false),
            "iq" => (SkillCategory::Iq, false),
            "hitting" => (SkillCategory::Batting, true),
            "defense" => (SkillCategory::Catching, true),
            _ => return None,
        };
        Some(resolved)
    }
}

impl FromStr for SkillCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillCategory::resolve_key(s)
            .map(|(category, _)| category)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
