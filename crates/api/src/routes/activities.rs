//! Activity Catalogue Route

use std::collections::BTreeMap;

use activity::Phase;
use axum::{extract::State, Json};
use pose_frame::KeypointIndex;
use serde::Serialize;

use crate::SharedState;

/// One registered activity
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub key_joints: Vec<KeypointIndex>,
    pub default_phase: Phase,
}

/// Response for the activities endpoint
#[derive(Debug, Serialize)]
pub struct ActivitiesResponse {
    pub data: Vec<ActivityInfo>,
    /// Alias to primary key
    pub aliases: BTreeMap<&'static str, &'static str>,
}

/// List registered activities
pub async fn get_activities(State(state): State<SharedState>) -> Json<ActivitiesResponse> {
    let state = state.read().await;
    let registry = &state.registry;

    let data = registry
        .keys()
        .filter_map(|key| registry.get(key).map(|eval| (key, eval)))
        .map(|(key, eval)| ActivityInfo {
            key,
            name: eval.name(),
            key_joints: eval.key_joints().to_vec(),
            default_phase: eval.default_phase(),
        })
        .collect();

    Json(ActivitiesResponse {
        data,
        aliases: registry.aliases().collect(),
    })
}
