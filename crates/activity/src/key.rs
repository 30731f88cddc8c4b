//! Client-facing activity keys

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::registry::ActivityKind;
use crate::ActivityError;

/// Backend activity label for cover drives
pub const REMOTE_COVER_DRIVE: &str = "cricket_cover_drive";

/// Activity selected by the client; `Auto` defers to remote classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKey {
    #[default]
    Auto,
    Squat,
    Pushup,
    CoverDrive,
    Bowling,
}

impl ActivityKey {
    pub fn parse(key: &str) -> Result<Self, ActivityError> {
        match key {
            "auto" => Ok(ActivityKey::Auto),
            "squat" => Ok(ActivityKey::Squat),
            "pushup" => Ok(ActivityKey::Pushup),
            "coverDrive" => Ok(ActivityKey::CoverDrive),
            "bowling" => Ok(ActivityKey::Bowling),
            other => Err(ActivityError::UnknownKey(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKey::Auto => "auto",
            ActivityKey::Squat => "squat",
            ActivityKey::Pushup => "pushup",
            ActivityKey::CoverDrive => "coverDrive",
            ActivityKey::Bowling => "bowling",
        }
    }

    /// Hint sent to the remote analyzer, which only knows squats and cover drives
    pub fn backend_hint(self) -> &'static str {
        match self {
            ActivityKey::Squat => "squat",
            ActivityKey::CoverDrive => REMOTE_COVER_DRIVE,
            ActivityKey::Auto | ActivityKey::Pushup | ActivityKey::Bowling => "auto",
        }
    }

    /// Local activity after the remote analyzer has classified the clip
    pub fn resolve_local(self, remote_activity: &str) -> ActivityKind {
        match self {
            ActivityKey::Auto if remote_activity == REMOTE_COVER_DRIVE => ActivityKind::CoverDrive,
            ActivityKey::Auto | ActivityKey::Squat => ActivityKind::Squat,
            ActivityKey::Pushup => ActivityKind::Pushup,
            ActivityKey::CoverDrive => ActivityKind::CoverDrive,
            ActivityKey::Bowling => ActivityKind::Bowling,
        }
    }
}

impl FromStr for ActivityKey {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
