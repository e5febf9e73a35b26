//! The 1–10 skill level scale.
//!
//! The scale is inverted: 10 is the introductory level and 1 is mastery.
//! Raw input from coaches or stored records is never rejected; it is clamped
//! into range, and anything that is not a finite number reads as 10 so that
//! missing data is never mistaken for elite skill.

use schemars::JsonSchema;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MASTERY_LEVEL: u8 = 1;
pub const INTRODUCTORY_LEVEL: u8 = 10;

/// A level guaranteed to lie in `1..=10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    pub const MASTERY: Level = Level(MASTERY_LEVEL);
    pub const INTRODUCTORY: Level = Level(INTRODUCTORY_LEVEL);

    /// Exact constructor; `None` when `value` is outside `1..=10`.
    pub fn new(value: u8) -> Option<Level> {
        (MASTERY_LEVEL..=INTRODUCTORY_LEVEL)
            .contains(&value)
            .then_some(Level(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The level one step closer to mastery, or `None` at level 1.
    pub fn next(self) -> Option<Level> {
        Level::new(self.0 - 1)
    }

    pub fn is_mastery(self) -> bool {
        self.0 == MASTERY_LEVEL
    }

    /// All levels from introductory down to mastery.
    pub fn all() -> impl DoubleEndedIterator<Item = Level> {
        (MASTERY_LEVEL..=INTRODUCTORY_LEVEL).rev().map(Level)
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INTRODUCTORY
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<f64> for Level {
    fn from(raw: f64) -> Self {
        clamp_level(raw)
    }
}

/// Clamp any numeric input into a level.
///
/// Non-finite input (NaN, ±infinity) yields 10. Finite input is floored,
/// so partial progress is not credited early (7.9 → 7), then clamped to
/// `1..=10`.
pub fn clamp_level(raw: f64) -> Level {
    if !raw.is_finite() {
        return Level::INTRODUCTORY;
    }
    let floored = raw
        .floor()
        .clamp(f64::from(MASTERY_LEVEL), f64::from(INTRODUCTORY_LEVEL));
    Level(floored as u8)
}

/// Read a raw level out of loosely typed JSON.
///
/// Numbers pass through, numeric strings are parsed, and everything else
/// (null, booleans, objects, blank strings) becomes NaN, which
/// [`clamp_level`] turns into the introductory level.
pub fn raw_level_from_json(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

struct LevelVisitor;

impl<'de> Visitor<'de> for LevelVisitor {
    type Value = Level;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a skill level number")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Level, E> {
        Ok(clamp_level(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Level, E> {
        Ok(clamp_level(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Level, E> {
        Ok(clamp_level(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Level, E> {
        Ok(clamp_level(v.trim().parse::<f64>().unwrap_or(f64::NAN)))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Level, E> {
        Ok(Level::INTRODUCTORY)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Level, E> {
        Ok(Level::INTRODUCTORY)
    }

    fn visit_none<E: de::Error>(self) -> Result<Level, E> {
        Ok(Level::INTRODUCTORY)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Level, D::Error> {
        deserializer.deserialize_any(LevelVisitor)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LevelVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn in_range_integers_are_unchanged() {
        for n in 1..=10u8 {
            assert_eq!(clamp_level(f64::from(n)).get(), n);
        }
    }

    #[test]
    fn non_finite_input_reads_as_introductory() {
        assert_eq!(clamp_level(f64::NAN), Level::INTRODUCTORY);
        assert_eq!(clamp_level(f64::INFINITY), Level::INTRODUCTORY);
        assert_eq!(clamp_level(f64::NEG_INFINITY), Level::INTRODUCTORY);
    }

    #[test]
    fn finite_input_is_floored_then_clamped() {
        assert_eq!(clamp_level(7.9).get(), 7);
        assert_eq!(clamp_level(1.2).get(), 1);
        assert_eq!(clamp_level(0.99).get(), 1);
        assert_eq!(clamp_level(-3.0).get(), 1);
        assert_eq!(clamp_level(10.5).get(), 10);
        assert_eq!(clamp_level(1e300).get(), 10);
        assert_eq!(clamp_level(-1e300).get(), 1);
    }

    #[test]
    fn clamp_is_total_over_awkward_inputs() {
        let samples = [
            f64::MIN,
            f64::MAX,
            f64::EPSILON,
            -0.0,
            0.5,
            9.999,
            10.0001,
            f64::MIN_POSITIVE,
        ];
        for raw in samples {
            let level = clamp_level(raw).get();
            assert!((1..=10).contains(&level), "{raw} -> {level}");
        }
    }

    #[test]
    fn next_moves_toward_mastery_and_stops_at_one() {
        assert_eq!(Level::new(7).and_then(Level::next), Level::new(6));
        assert_eq!(Level::MASTERY.next(), None);
        assert!(Level::MASTERY.is_mastery());
    }

    #[test]
    fn new_rejects_out_of_range_values() {
        assert!(Level::new(0).is_none());
        assert!(Level::new(11).is_none());
        assert_eq!(Level::new(10), Some(Level::INTRODUCTORY));
    }

    #[test]
    fn all_walks_from_introductory_to_mastery() {
        let levels: Vec<u8> = Level::all().map(Level::get).collect();
        assert_eq!(levels, vec![10, 9, 8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn deserialize_clamps_instead_of_failing() {
        let parse = |v: serde_json::Value| serde_json::from_value::<Level>(v).unwrap().get();
        assert_eq!(parse(json!(3)), 3);
        assert_eq!(parse(json!(7.9)), 7);
        assert_eq!(parse(json!(42)), 10);
        assert_eq!(parse(json!(-2)), 1);
        assert_eq!(parse(json!("4")), 4);
        assert_eq!(parse(json!("abc")), 10);
        assert_eq!(parse(json!(null)), 10);
    }

    #[test]
    fn raw_level_from_json_handles_loose_shapes() {
        assert_eq!(raw_level_from_json(&json!(5)), 5.0);
        assert_eq!(raw_level_from_json(&json!(" 2.5 ")), 2.5);
        assert!(raw_level_from_json(&json!("")).is_nan());
        assert!(raw_level_from_json(&json!({"x": 1})).is_nan());
        assert_eq!(clamp_level(raw_level_from_json(&json!(null))), Level::INTRODUCTORY);
    }

    #[test]
    fn serializes_as_plain_integer() {
        assert_eq!(serde_json::to_value(Level::new(4).unwrap()).unwrap(), json!(4));
    }
}
