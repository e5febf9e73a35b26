//! Focus-skill selection and menu recommendation.
//!
//! Focus policy: the category with the numerically highest level (the most
//! introductory one) is the one that needs attention. Ties go to the first
//! category in canonical order.

use crate::level::{Level, clamp_level, raw_level_from_json};
use crate::rubric::{LevelDescription, Rubric};
use crate::skills::SkillCategory;
use crate::training_menu::{TrainingMenu, TrainingMenuEntry};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One level per category. Categories that were never rated sit at 10.
///
/// Every key is optional on input; `hitting` and `defense` are read as
/// `batting` and `catching`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(default)]
pub struct SkillLevels {
    pub batting: Level,
    pub throwing: Level,
    pub catching: Level,
    pub running: Level,
    pub iq: Level,
}

impl SkillLevels {
    pub fn get(&self, category: SkillCategory) -> Level {
        match category {
            SkillCategory::Batting => self.batting,
            SkillCategory::Throwing => self.throwing,
            SkillCategory::Catching => self.catching,
            SkillCategory::Running => self.running,
            SkillCategory::Iq => self.iq,
        }
    }

    pub fn set(&mut self, category: SkillCategory, level: Level) {
        match category {
            SkillCategory::Batting => self.batting = level,
            SkillCategory::Throwing => self.throwing = level,
            SkillCategory::Catching => self.catching = level,
            SkillCategory::Running => self.running = level,
            SkillCategory::Iq => self.iq = level,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillCategory, Level)> + '_ {
        SkillCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Build from loosely typed `key → value` pairs, as stored in evaluation
    /// records.
    ///
    /// Values are clamped. Unknown keys are ignored. Legacy alias keys
    /// (`hitting`, `defense`) fill in their category only when the canonical
    /// key is absent.
    pub fn from_json_map(values: &serde_json::Map<String, serde_json::Value>) -> SkillLevels {
        let mut levels = SkillLevels::default();
        let mut from_canonical = [false; 5];
        for (key, value) in values {
            let Some((category, is_alias)) = SkillCategory::resolve_key(key) else {
                tracing::debug!(key = %key, "ignoring unknown skill key");
                continue;
            };
            if is_alias && from_canonical[category.index()] {
                continue;
            }
            levels.set(category, clamp_level(raw_level_from_json(value)));
            if !is_alias {
                from_canonical[category.index()] = true;
            }
        }
        levels
    }
}

impl FromIterator<(SkillCategory, Level)> for SkillLevels {
    fn from_iter<I: IntoIterator<Item = (SkillCategory, Level)>>(iter: I) -> Self {
        let mut levels = SkillLevels::default();
        for (category, level) in iter {
            levels.set(category, level);
        }
        levels
    }
}

impl<'de> Deserialize<'de> for SkillLevels {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<serde_json::Map<String, serde_json::Value>>::deserialize(deserializer)?;
        Ok(raw
            .map(|values| SkillLevels::from_json_map(&values))
            .unwrap_or_default())
    }
}

/// The category with the highest level number; ties go to canonical order.
pub fn select_focus(levels: &SkillLevels) -> SkillCategory {
    let mut focus = SkillCategory::ALL[0];
    let mut focus_level = levels.get(focus);
    for (category, level) in levels.iter() {
        if level > focus_level {
            focus = category;
            focus_level = level;
        }
    }
    focus
}

/// The category needing most attention plus its applicable menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusResolution<'a> {
    pub category: SkillCategory,
    pub level: Level,
    pub menu: Option<&'a TrainingMenuEntry>,
}

/// A rubric and a menu table used together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recommender {
    rubric: Rubric,
    menu: TrainingMenu,
}

impl Default for Recommender {
    fn default() -> Self {
        Recommender::new(Rubric::builtin().clone(), TrainingMenu::builtin().clone())
    }
}

impl Recommender {
    pub fn new(rubric: Rubric, menu: TrainingMenu) -> Self {
        Self { rubric, menu }
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    pub fn menu(&self) -> &TrainingMenu {
        &self.menu
    }

    pub fn pick_menu(&self, category: SkillCategory, level: Level) -> Option<&TrainingMenuEntry> {
        self.menu.pick(category, level)
    }

    pub fn describe_level(
        &self,
        category: SkillCategory,
        level: Level,
    ) -> Option<LevelDescription<'_>> {
        self.rubric.describe_level(category, level)
    }

    pub fn resolve_focus(&self, levels: &SkillLevels) -> FocusResolution<'_> {
        let category = select_focus(levels);
        let level = levels.get(category);
        FocusResolution {
            category,
            level,
            menu: self.pick_menu(category, level),
        }
    }

    /// Levels for every category with the menu that applies to each.
    pub fn menus_for(
        &self,
        levels: &SkillLevels,
    ) -> BTreeMap<SkillCategory, Option<&TrainingMenuEntry>> {
        levels
            .iter()
            .map(|(category, level)| (category, self.pick_menu(category, level)))
            .collect()
    }
}

/// [`TrainingMenu::pick`] over the built-in table, clamping `raw_level` first.
pub fn pick_menu(category: SkillCategory, raw_level: f64) -> Option<&'static TrainingMenuEntry> {
    TrainingMenu::builtin().pick(category, clamp_level(raw_level))
}

/// [`Rubric::describe_level`] over the built-in rubric.
pub fn describe_level(category: SkillCategory, level: Level) -> Option<LevelDescription<'static>> {
    Rubric::builtin().describe_level(category, level)
}
