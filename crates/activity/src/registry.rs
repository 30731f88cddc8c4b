//! Read-only activity registry

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bowling::BowlingEvaluator;
use crate::cover_drive::CoverDriveEvaluator;
use crate::evaluator::ActivityEvaluator;
use crate::pushup::PushupEvaluator;
use crate::squat::{SquatEvaluator, SquatThresholds};

/// Activities with a distinct biomechanical model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    Squat,
    Pushup,
    CoverDrive,
    Bowling,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 4] = [
        ActivityKind::Squat,
        ActivityKind::Pushup,
        ActivityKind::CoverDrive,
        ActivityKind::Bowling,
    ];

    /// Primary registry key
    pub fn key(self) -> &'static str {
        match self {
            ActivityKind::Squat => "squat",
            ActivityKind::Pushup => "pushup",
            ActivityKind::CoverDrive => "coverDrive",
            ActivityKind::Bowling => "bowling",
        }
    }

    /// Kind for a primary key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

/// Batting shots without their own model yet; graded as a cover drive
static ALIASES: [(&str, ActivityKind); 4] = [
    ("cricketDrive", ActivityKind::CoverDrive),
    ("cricketLegGlanceFlick", ActivityKind::CoverDrive),
    ("cricketPullshot", ActivityKind::CoverDrive),
    ("cricketSweep", ActivityKind::CoverDrive),
];

/// Fixed table from activity key to evaluator, built once at startup
#[derive(Debug, Clone, Default)]
pub struct ActivityRegistry {
    squat: SquatEvaluator,
}

impl ActivityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose squat evaluator uses custom thresholds
    pub fn with_squat_thresholds(thresholds: SquatThresholds) -> Self {
        Self {
            squat: SquatEvaluator::new(thresholds),
        }
    }

    /// Evaluator for a kind
    pub fn evaluator(&self, kind: ActivityKind) -> &dyn ActivityEvaluator {
        match kind {
            ActivityKind::Squat => &self.squat,
            ActivityKind::Pushup => &PushupEvaluator,
            ActivityKind::CoverDrive => &CoverDriveEvaluator,
            ActivityKind::Bowling => &BowlingEvaluator,
        }
    }

    /// Evaluator for a primary key only
    pub fn get(&self, key: &str) -> Option<&dyn ActivityEvaluator> {
        ActivityKind::from_key(key).map(|kind| self.evaluator(kind))
    }

    /// Kind for a primary key or alias
    pub fn kind_of(&self, key: &str) -> Option<ActivityKind> {
        if let Some(kind) = ActivityKind::from_key(key) {
            return Some(kind);
        }
        let kind = ALIASES.iter().find(|(alias, _)| *alias == key).map(|(_, kind)| *kind)?;
        debug!("Activity '{}' has no dedicated model, using '{}'", key, kind.key());
        Some(kind)
    }

    /// Evaluator for a primary key or alias
    pub fn resolve(&self, key: &str) -> Option<&dyn ActivityEvaluator> {
        self.kind_of(key).map(|kind| self.evaluator(kind))
    }

    /// Evaluator for a key, falling back to squat for unknown keys
    pub fn resolve_or_default(&self, key: &str) -> &dyn ActivityEvaluator {
        self.resolve(key).unwrap_or_else(|| {
            warn!("Unknown activity '{}', falling back to squat", key);
            &self.squat
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.kind_of(key).is_some()
    }

    /// Primary keys
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        ActivityKind::ALL.into_iter().map(ActivityKind::key)
    }

    /// Alias keys and the primary key each resolves to
    pub fn aliases(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        ALIASES.iter().map(|(alias, kind)| (*alias, kind.key()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Phase;

    #[test]
    fn test_primary_keys() {
        let registry = ActivityRegistry::new();
        let keys: Vec<_> = registry.keys().collect();
        assert_eq!(keys, vec!["squat", "pushup", "coverDrive", "bowling"]);
        for key in keys {
            assert_eq!(registry.get(key).map(|e| e.name()), Some(key));
        }
    }

    #[test]
    fn test_aliases_resolve_to_cover_drive() {
        let registry = ActivityRegistry::new();
        for (alias, target) in registry.aliases() {
            assert_eq!(target, "coverDrive");
            assert!(registry.get(alias).is_none());
            let evaluator = registry.resolve(alias).map(|e| e.name());
            assert_eq!(evaluator, Some("coverDrive"));
        }
        assert_eq!(registry.aliases().count(), 4);
    }

    #[test]
    fn test_unknown_falls_back_to_squat() {
        let registry = ActivityRegistry::new();
        assert!(registry.resolve("yoga").is_none());
        assert!(!registry.contains("yoga"));
        let evaluator = registry.resolve_or_default("yoga");
        assert_eq!(evaluator.name(), "squat");
        assert_eq!(evaluator.default_phase(), Phase::Descent);
    }

    #[test]
    fn test_default_phases() {
        let registry = ActivityRegistry::new();
        let phases: Vec<_> = ActivityKind::ALL
            .iter()
            .map(|k| registry.evaluator(*k).default_phase())
            .collect();
        assert_eq!(phases, vec![Phase::Descent, Phase::Work, Phase::Swing, Phase::Delivery]);
    }

    #[test]
    fn test_custom_thresholds() {
        let registry = ActivityRegistry::with_squat_thresholds(SquatThresholds::strict());
        assert_eq!(registry.squat.thresholds().knee_tolerance.warning, 6.0);
    }
}
