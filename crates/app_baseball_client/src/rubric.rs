//! Per-category level descriptions (the rubric) and "current / next level"
//! lookup.
//!
//! A [`Rubric`] can only be built from data that passes validation: all five
//! categories present, each with exactly one description for every level
//! 1–10. Documents fetched from the backend or read from disk go through the
//! same check, so a malformed rubric is rejected as a whole instead of being
//! partially applied.

use crate::level::Level;
use crate::skills::SkillCategory;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LevelDescriptor {
    pub level: Level,
    pub description: String,
}

/// Result of [`Rubric::describe_level`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelDescription<'a> {
    pub current: &'a LevelDescriptor,
    /// The level one step closer to mastery; absent at level 1.
    pub next: Option<&'a LevelDescriptor>,
}

#[derive(Debug, Error)]
pub enum RubricError {
    #[error("rubric is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read rubric file: {0}")]
    Io(#[from] std::io::Error),
    #[error("rubric names an unknown category: {0:?}")]
    UnknownCategory(String),
    #[error("rubric lists category {0} more than once")]
    DuplicateCategory(SkillCategory),
    #[error("rubric is missing category {0}")]
    MissingCategory(SkillCategory),
    #[error("rubric level {level} for {category} is outside 1..=10")]
    LevelOutOfRange { category: SkillCategory, level: i64 },
    #[error("rubric lists level {level} for {category} more than once")]
    DuplicateLevel { category: SkillCategory, level: u8 },
    #[error("rubric is missing level {level} for {category}")]
    MissingLevel { category: SkillCategory, level: u8 },
    #[error("rubric description for {category} level {level} is empty")]
    EmptyDescription { category: SkillCategory, level: u8 },
}

/// Level entry as it appears in an unvalidated document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RawLevelDescriptor {
    pub level: i64,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RubricCategoryEntry {
    pub category: String,
    pub levels: Vec<RawLevelDescriptor>,
}

/// Wire shape of a rubric document.
///
/// Both a list of `{category, levels}` entries and an object keyed by
/// category are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RubricDocument {
    Categories(Vec<RubricCategoryEntry>),
    Keyed(BTreeMap<String, Vec<RawLevelDescriptor>>),
}

impl RubricDocument {
    pub fn is_empty(&self) -> bool {
        match self {
            RubricDocument::Categories(entries) => entries.is_empty(),
            RubricDocument::Keyed(map) => map.is_empty(),
        }
    }

    fn into_entries(self) -> Vec<(String, Vec<RawLevelDescriptor>)> {
        match self {
            RubricDocument::Categories(entries) => entries
                .into_iter()
                .map(|e| (e.category, e.levels))
                .collect(),
            RubricDocument::Keyed(map) => map.into_iter().collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rubric {
    // Indexed by `SkillCategory::index`, each sorted from level 10 down to 1.
    tables: [Vec<LevelDescriptor>; 5],
}

static BUILTIN: LazyLock<Rubric> = LazyLock::new(|| {
    let tables = SkillCategory::ALL.map(|category| {
        builtin_rows(category)
            .iter()
            .map(|&(level, description)| LevelDescriptor {
                level: Level::new(level).unwrap_or_default(),
                description: description.to_string(),
            })
            .collect::<Vec<_>>()
    });
    Rubric { tables }
});

impl Rubric {
    /// The rubric shipped with the crate.
    pub fn builtin() -> &'static Rubric {
        &BUILTIN
    }

    pub fn from_document(document: RubricDocument) -> Result<Rubric, RubricError> {
        let mut tables: [Option<Vec<LevelDescriptor>>; 5] = Default::default();

        for (key, raw_levels) in document.into_entries() {
            let (category, _) = SkillCategory::resolve_key(&key)
                .ok_or_else(|| RubricError::UnknownCategory(key.clone()))?;
            let slot = &mut tables[category.index()];
            if slot.is_some() {
                return Err(RubricError::DuplicateCategory(category));
            }
            *slot = Some(validate_levels(category, raw_levels)?);
        }

        let mut validated: [Vec<LevelDescriptor>; 5] = Default::default();
        for category in SkillCategory::ALL {
            validated[category.index()] = tables[category.index()]
                .take()
                .ok_or(RubricError::MissingCategory(category))?;
        }
        Ok(Rubric { tables: validated })
    }

    pub fn from_json_str(json: &str) -> Result<Rubric, RubricError> {
        let document: RubricDocument = serde_json::from_str(json)?;
        Rubric::from_document(document)
    }

    /// Read and validate a rubric JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Rubric, RubricError> {
        let text = std::fs::read_to_string(path)?;
        Rubric::from_json_str(&text)
    }

    /// Descriptors for `category`, from level 10 down to level 1.
    pub fn descriptors(&self, category: SkillCategory) -> &[LevelDescriptor] {
        &self.tables[category.index()]
    }

    pub fn descriptor(&self, category: SkillCategory, level: Level) -> Option<&LevelDescriptor> {
        self.descriptors(category)
            .iter()
            .find(|d| d.level == level)
    }

    /// Description of `level` plus the one for the next level toward mastery.
    ///
    /// Returns `None` when the exact level has no descriptor.
    pub fn describe_level(
        &self,
        category: SkillCategory,
        level: Level,
    ) -> Option<LevelDescription<'_>> {
        let current = self.descriptor(category, level)?;
        let next = level
            .next()
            .and_then(|next| self.descriptor(category, next));
        Some(LevelDescription { current, next })
    }

    pub fn to_document(&self) -> RubricDocument {
        RubricDocument::Categories(
            SkillCategory::ALL
                .iter()
                .map(|&category| RubricCategoryEntry {
                    category: category.key().to_string(),
                    levels: self
                        .descriptors(category)
                        .iter()
                        .map(|d| RawLevelDescriptor {
                            level: i64::from(d.level.get()),
                            description: d.description.clone(),
                        })
                        .collect(),
                })
                .collect(),
        )
    }
}

fn validate_levels(
    category: SkillCategory,
    raw_levels: Vec<RawLevelDescriptor>,
) -> Result<Vec<LevelDescriptor>, RubricError> {
    let mut by_level: BTreeMap<u8, String> = BTreeMap::new();
    for raw in raw_levels {
        let level = u8::try_from(raw.level)
            .ok()
            .and_then(Level::new)
            .ok_or(RubricError::LevelOutOfRange {
                category,
                level: raw.level,
            })?;
        if raw.description.trim().is_empty() {
            return Err(RubricError::EmptyDescription {
                category,
                level: level.get(),
            });
        }
        if by_level.insert(level.get(), raw.description).is_some() {
            return Err(RubricError::DuplicateLevel {
                category,
                level: level.get(),
            });
        }
    }

    Level::all()
        .map(|level| {
            by_level
                .remove(&level.get())
                .map(|description| LevelDescriptor { level, description })
                .ok_or(RubricError::MissingLevel {
                    category,
                    level: level.get(),
                })
        })
        .collect()
}

fn builtin_rows(category: SkillCategory) -> &'static [(u8, &'static str); 10] {
    match category {
        SkillCategory::Batting => &BATTING,
        SkillCategory::Throwing => &THROWING,
        SkillCategory::Catching => &CATCHING,
        SkillCategory::Running => &RUNNING,
        SkillCategory::Iq => &IQ,
    }
}

const BATTING: [(u8, &str); 10] = [
    (10, "正しいグリップで握り、振る前に後ろを見て安全を確認できる。"),
    (9, "置きティーを、空振りせずに10球中8球以上打てる。"),
    (8, "斜め前からのソフトティーを、バットに当てて前に飛ばせる。"),
    (7, "前からの指導者の手投げに対し、三振を怖がらずフルスイングできる。"),
    (6, "ロングティーで、打球を内野定位置より遠くへ飛ばせる。"),
    (5, "置きティーで、指定された方向に当てられる。"),
    (4, "バントで指定方向に5球中3球殺して転がせる。"),
    (3, "ロングティーで外野の頭を越える打球を打てる。"),
    (2, "速球に振り遅れずセンターへ打ち返せる。"),
    (1, "10球中8球以上、芯で捉えた快音の打球を打てる。"),
];

const THROWING: [(u8, &str); 10] = [
    (10, "縫い目に指をかけた正しい握りができる。"),
    (9, "3m先に肘を下げずに投げられる。"),
    (8, "足を踏み出して投げられる。"),
    (7, "10mで胸に5回連続で投げられる。"),
    (6, "投げ終わりにバランスよく立てる。"),
    (5, "15mを直線的に投げられる。"),
    (4, "捕球から1秒以内に投げられる。"),
    (3, "25〜30mを低く強く投げられる。"),
    (2, "16mで半分以上ストライクに入る。"),
    (1, "30m以上をワンバウンドで胸に投げられる。"),
];

const CATCHING: [(u8, &str); 10] = [
    (10, "正しい構えで目を離さず捕球できる。"),
    (9, "手転がしゴロを両手で捕れる。"),
    (8, "手投げフライを捕れる。"),
    (7, "緩いゴロに正面で入れる。"),
    (6, "フライの落下点に先回りできる。"),
    (5, "横のゴロを片手で止められる。"),
    (4, "速いゴロを体で止められる。"),
    (3, "頭上フライを背走で捕れる。"),
    (2, "ゲッツー動作ができる。"),
    (1, "指示に即反応し捕って投げられる。"),
];

const RUNNING: [(u8, &str); 10] = [
    (10, "打ったら全力で一塁へ走る。"),
    (9, "一塁を駆け抜けて戻れる。"),
    (8, "ベース角を踏んで回れる。"),
    (7, "正しいスライディングができる。"),
    (6, "ベース間を目標タイムで走れる。"),
    (5, "ゴロGO／フライBACKを判断できる。"),
    (4, "コーチ指示に即反応できる。"),
    (3, "リードから素早く帰塁できる。"),
    (2, "タッグアップができる。"),
    (1, "進塁判断を自分でできる。"),
];

const IQ: [(u8, &str); 10] = [
    (10, "挨拶・整理整頓ができる。"),
    (9, "自分の道具を管理できる。"),
    (8, "BSOと3アウト交代を理解している。"),
    (7, "攻守交代で全力移動できる。"),
    (6, "守備位置とアウトの取り方を説明できる。"),
    (5, "フォースとタッチの違いを説明できる。"),
    (4, "審判・道具に礼儀正しく振る舞える。"),
    (3, "自発的にベンチワークができる。"),
    (2, "難しいルールを理解している。"),
    (1, "下級生に教えられる。"),
];
