//! Training menus keyed by category and level range.

use crate::level::Level;
use crate::skills::SkillCategory;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrainingMenuEntry {
    pub min_level: Level,
    pub max_level: Level,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("menu {title:?} has min_level {min} above max_level {max}")]
    InvertedRange { title: String, min: u8, max: u8 },
    #[error("menu {0:?} has no items")]
    NoItems(String),
}

impl TrainingMenuEntry {
    pub fn new(
        min_level: Level,
        max_level: Level,
        title: impl Into<String>,
        items: Vec<String>,
    ) -> Result<Self, MenuError> {
        let title = title.into();
        if min_level > max_level {
            return Err(MenuError::InvertedRange {
                title,
                min: min_level.get(),
                max: max_level.get(),
            });
        }
        if items.is_empty() {
            return Err(MenuError::NoItems(title));
        }
        Ok(Self {
            min_level,
            max_level,
            title,
            description: None,
            items,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Inclusive on both ends.
    pub fn covers(&self, level: Level) -> bool {
        self.min_level <= level && level <= self.max_level
    }
}

/// Menu entries for every category, each list kept in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TrainingMenu {
    entries: [Vec<TrainingMenuEntry>; 5],
}

static BUILTIN: LazyLock<TrainingMenu> = LazyLock::new(|| {
    let mut menu = TrainingMenu::default();
    for (category, rows) in BUILTIN_ROWS {
        let entries = rows
            .iter()
            .map(|&(min, max, title, items)| TrainingMenuEntry {
                min_level: Level::new(min).unwrap_or_default(),
                max_level: Level::new(max).unwrap_or_default(),
                title: title.to_string(),
                description: None,
                items: items.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        menu.set_entries(*category, entries);
    }
    menu
});

impl TrainingMenu {
    pub fn builtin() -> &'static TrainingMenu {
        &BUILTIN
    }

    pub fn set_entries(&mut self, category: SkillCategory, entries: Vec<TrainingMenuEntry>) {
        self.entries[category.index()] = entries;
    }

    pub fn entries(&self, category: SkillCategory) -> &[TrainingMenuEntry] {
        &self.entries[category.index()]
    }

    /// First entry, in declaration order, whose range contains `level`.
    ///
    /// `None` means no menu is defined for that level, which callers show as
    /// an empty state rather than an error.
    pub fn pick(&self, category: SkillCategory, level: Level) -> Option<&TrainingMenuEntry> {
        self.entries(category).iter().find(|m| m.covers(level))
    }

    /// Levels of `category` that no entry covers.
    pub fn coverage_gaps(&self, category: SkillCategory) -> Vec<Level> {
        Level::all()
            .rev()
            .filter(|&level| self.pick(category, level).is_none())
            .collect()
    }
}

type MenuRow = (u8, u8, &'static str, &'static [&'static str]);

const BUILTIN_ROWS: &[(SkillCategory, &[MenuRow])] = &[
    (
        SkillCategory::Batting,
        &[
            (
                8,
                10,
                "スイングの土台作り",
                &[
                    "鏡の前でポーズ（グリップと構えをチェック、1分×3回）",
                    "新聞紙ボール打ち（芯に当てる感覚づくり）",
                ],
            ),
            (
                4,
                7,
                "フルスイング・ミート",
                &[
                    "ターゲット素振り（目印に向かって正確に10回）",
                    "スローモーション素振り（5秒かけてバット軌道を確認）",
                ],
            ),
            (
                1,
                3,
                "長打・スピード対応",
                &["1分間高速素振り（限界スピードで振り続ける）"],
            ),
        ],
    ),
    (
        SkillCategory::Throwing,
        &[
            (
                8,
                10,
                "コントロールと握り",
                &[
                    "『くるくるポン』（縫い目の向きに握り替え、50回）",
                    "壁立ちステップ（正しい踏み出しフォーム確認）",
                ],
            ),
            (
                4,
                7,
                "正確さ・腕の振り",
                &[
                    "タオルスロー（肘が下がらないフォーム作り）",
                    "ターゲットネット（10球狙って投げる）",
                ],
            ),
            (
                1,
                3,
                "強肩・投手基礎",
                &["指先はじき（回転をかける練習、100回）"],
            ),
        ],
    ),
    (
        SkillCategory::Catching,
        &[
            (
                8,
                10,
                "反応と基本捕球",
                &[
                    "自分フライ（真上に投げて両手捕球）",
                    "おべんとう捕球（両手で押さえる）",
                ],
            ),
            (
                4,
                7,
                "フットワーク",
                &["壁当て（正面捕球・左右移動）", "お手玉（手のひら感覚強化）"],
            ),
            (
                1,
                3,
                "連携・逆シングル",
                &["テニスボール捕球（持ち替え反復）"],
            ),
        ],
    ),
    (
        SkillCategory::Running,
        &[
            (
                7,
                10,
                "全力とフォーム",
                &["腕振りダッシュ（10秒×3）", "スキップトレーニング"],
            ),
            (
                1,
                6,
                "スタートと判断",
                &["リアクションスタート（3m猛ダッシュ）", "シャトルラン（5m往復）"],
            ),
        ],
    ),
    (
        SkillCategory::Iq,
        &[(
            1,
            10,
            "野球IQ・マナー",
            &[
                "プロ野球観戦ミッション（ルール解説）",
                "道具みがき（5分）",
                "ルールクイズ（3問）",
            ],
        )],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: u8) -> Level {
        Level::new(n).unwrap()
    }

    fn entry(min: u8, max: u8, title: &str) -> TrainingMenuEntry {
        TrainingMenuEntry::new(level(min), level(max), title, vec!["drill".into()]).unwrap()
    }

    #[test]
    fn builtin_entries_are_well_formed() {
        let menu = TrainingMenu::builtin();
        for category in SkillCategory::ALL {
            assert!(!menu.entries(category).is_empty(), "{category}");
            for e in menu.entries(category) {
                assert!(e.min_level <= e.max_level, "{category} {}", e.title);
                assert!(!e.items.is_empty(), "{category} {}", e.title);
            }
        }
    }

    #[test]
    fn builtin_tables_cover_every_level() {
        for category in SkillCategory::ALL {
            assert!(
                TrainingMenu::builtin().coverage_gaps(category).is_empty(),
                "{category}"
            );
        }
    }

    #[test]
    fn picked_entry_always_contains_the_level() {
        for category in SkillCategory::ALL {
            for lv in Level::all() {
                if let Some(e) = TrainingMenu::builtin().pick(category, lv) {
                    assert!(e.min_level <= lv && lv <= e.max_level);
                }
            }
        }
    }

    #[test]
    fn batting_ranges_resolve_to_expected_titles() {
        let menu = TrainingMenu::builtin();
        let title = |n| menu.pick(SkillCategory::Batting, level(n)).unwrap().title.as_str();
        assert_eq!(title(10), "スイングの土台作り");
        assert_eq!(title(8), "スイングの土台作り");
        assert_eq!(title(7), "フルスイング・ミート");
        assert_eq!(title(4), "フルスイング・ミート");
        assert_eq!(title(3), "長打・スピード対応");
        assert_eq!(title(1), "長打・スピード対応");
    }

    #[test]
    fn running_uses_its_two_range_split() {
        let menu = TrainingMenu::builtin();
        assert_eq!(menu.pick(SkillCategory::Running, level(7)).unwrap().title, "全力とフォーム");
        assert_eq!(menu.pick(SkillCategory::Running, level(6)).unwrap().title, "スタートと判断");
    }

    #[test]
    fn overlapping_ranges_resolve_to_the_first_declared() {
        let mut menu = TrainingMenu::default();
        menu.set_entries(
            SkillCategory::Throwing,
            vec![entry(3, 8, "A"), entry(5, 10, "B")],
        );
        for n in 5..=8 {
            assert_eq!(menu.pick(SkillCategory::Throwing, level(n)).unwrap().title, "A");
        }
        assert_eq!(menu.pick(SkillCategory::Throwing, level(9)).unwrap().title, "B");
    }

    #[test]
    fn gaps_yield_no_menu_and_are_reported() {
        let mut menu = TrainingMenu::default();
        menu.set_entries(SkillCategory::Iq, vec![entry(1, 3, "low"), entry(7, 10, "high")]);
        assert!(menu.pick(SkillCategory::Iq, level(5)).is_none());
        let gaps: Vec<u8> = menu.coverage_gaps(SkillCategory::Iq).into_iter().map(Level::get).collect();
        assert_eq!(gaps, vec![4, 5, 6]);
        assert_eq!(menu.coverage_gaps(SkillCategory::Batting).len(), 10);
    }

    #[test]
    fn entry_constructor_enforces_range_and_items() {
        assert_eq!(
            TrainingMenuEntry::new(level(8), level(3), "bad", vec!["x".into()]),
            Err(MenuError::InvertedRange {
                title: "bad".into(),
                min: 8,
                max: 3
            })
        );
        assert_eq!(
            TrainingMenuEntry::new(level(1), level(3), "empty", vec![]),
            Err(MenuError::NoItems("empty".into()))
        );
    }

    #[test]
    fn serialized_entry_uses_snake_case_levels() {
        let e = entry(4, 7, "x").with_description("memo");
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["min_level"], 4);
        assert_eq!(v["max_level"], 7);
        assert_eq!(v["description"], "memo");
    }
}
