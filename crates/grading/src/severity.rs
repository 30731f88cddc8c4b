//! Severity levels and ordering

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Severity of a graded check.
///
/// `Neutral` marks the absence of a grade and is never produced by
/// [`crate::grade_deviation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Neutral,
    Good,
    Warning,
    Bad,
}

impl Severity {
    /// Total order rank: bad(2) > warning(1) > good(0) > neutral(-1)
    pub fn rank(self) -> i8 {
        match self {
            Severity::Bad => 2,
            Severity::Warning => 1,
            Severity::Good => 0,
            Severity::Neutral => -1,
        }
    }

    /// Lowercase label
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Neutral => "neutral",
            Severity::Good => "good",
            Severity::Warning => "warning",
            Severity::Bad => "bad",
        }
    }

    /// Credit used by confidence ratios (good 1, warning 0.5)
    pub fn credit(self) -> f64 {
        match self {
            Severity::Good => 1.0,
            Severity::Warning => 0.5,
            Severity::Bad | Severity::Neutral => 0.0,
        }
    }
}

/// Return the more severe of two levels; ties go to `a`
pub fn pick_worse_severity(a: Severity, b: Severity) -> Severity {
    if a.rank() >= b.rank() {
        a
    } else {
        b
    }
}

/// Per-key severity accumulator where each key keeps its worst level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityMap<K: Ord> {
    levels: BTreeMap<K, Severity>,
}

impl<K: Ord + Copy> SeverityMap<K> {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Merge `level` into every key in `keys`
    pub fn apply(&mut self, keys: &[K], level: Severity) {
        for key in keys {
            self.levels
                .entry(*key)
                .and_modify(|current| *current = pick_worse_severity(*current, level))
                .or_insert(level);
        }
    }

    /// Current level for a key
    pub fn get(&self, key: &K) -> Option<Severity> {
        self.levels.get(key).copied()
    }

    pub fn into_inner(self) -> BTreeMap<K, Severity> {
        self.levels
    }
}

impl<K: Ord + Copy> Default for SeverityMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_severity() -> impl Strategy<Value = Severity> {
        prop_oneof![
            Just(Severity::Neutral),
            Just(Severity::Good),
            Just(Severity::Warning),
            Just(Severity::Bad),
        ]
    }

    #[test]
    fn test_rank_order() {
        assert!(Severity::Bad.rank() > Severity::Warning.rank());
        assert!(Severity::Warning.rank() > Severity::Good.rank());
        assert!(Severity::Good.rank() > Severity::Neutral.rank());
    }

    #[test]
    fn test_pick_worse() {
        assert_eq!(pick_worse_severity(Severity::Good, Severity::Bad), Severity::Bad);
        assert_eq!(pick_worse_severity(Severity::Warning, Severity::Good), Severity::Warning);
        assert_eq!(pick_worse_severity(Severity::Neutral, Severity::Good), Severity::Good);
    }

    #[test]
    fn test_severity_map_keeps_worst() {
        let mut map = SeverityMap::new();
        map.apply(&[13, 14], Severity::Warning);
        map.apply(&[13, 15], Severity::Good);
        map.apply(&[15], Severity::Bad);

        assert_eq!(map.get(&13), Some(Severity::Warning));
        assert_eq!(map.get(&14), Some(Severity::Warning));
        assert_eq!(map.get(&15), Some(Severity::Bad));
        assert_eq!(map.get(&16), None);
    }

    #[test]
    fn test_serialized_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
    }

    proptest! {
        #[test]
        fn prop_pick_worse_idempotent(x in any_severity()) {
            prop_assert_eq!(pick_worse_severity(x, x), x);
        }

        #[test]
        fn prop_pick_worse_commutative_in_level(a in any_severity(), b in any_severity()) {
            prop_assert_eq!(
                pick_worse_severity(a, b).rank(),
                pick_worse_severity(b, a).rank()
            );
        }
    }
}
