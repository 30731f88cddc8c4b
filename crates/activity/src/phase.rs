//! Movement phases

use serde::{Deserialize, Serialize};

/// Movement phase label attached to each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Descent,
    Bottom,
    Ascent,
    /// Whole-sequence label for push-ups
    Work,
    /// Whole-sequence label for batting shots
    Swing,
    /// Whole-sequence label for bowling
    Delivery,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Descent => "descent",
            Phase::Bottom => "bottom",
            Phase::Ascent => "ascent",
            Phase::Work => "work",
            Phase::Swing => "swing",
            Phase::Delivery => "delivery",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a whole-sequence phase pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDetection {
    /// Index of the deepest frame (0 for single-phase activities)
    pub bottom_idx: usize,
    /// One label per input frame
    pub phases: Vec<Phase>,
}

impl PhaseDetection {
    /// Same phase for every frame
    pub fn constant(len: usize, phase: Phase) -> Self {
        Self {
            bottom_idx: 0,
            phases: vec![phase; len],
        }
    }

    /// Phase at `index`, if detection covered it
    pub fn phase_at(&self, index: usize) -> Option<Phase> {
        self.phases.get(index).copied()
    }
}
