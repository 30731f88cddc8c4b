//! Streaming Session Routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use pose_frame::{Frame, Pose};
use realtime::{CoachingCue, RealtimeSample, RealtimeSession, TrendHistory};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::SharedState;

/// Response for session creation
#[derive(Debug, Serialize)]
pub struct CreatedSession {
    pub id: Uuid,
}

/// One streamed sample; `frame` is null when no pose was detected
#[derive(Debug, Deserialize)]
pub struct FramePush {
    #[serde(default = "default_activity")]
    pub activity: String,
    pub frame: Option<Frame>,
}

fn default_activity() -> String {
    "auto".to_string()
}

/// Capture snapshot for a session
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub samples: u64,
    pub missing: u64,
    pub reps: u32,
    pub confidence: f64,
    pub capture_capacity: usize,
    pub capture_full: bool,
    /// Frames captured since the session opened, evicted ones included
    pub captured_total: usize,
    pub latest_timestamp: Option<f64>,
    pub frames: Vec<Frame>,
    pub trend: TrendHistory,
    pub coaching_log: Vec<CoachingCue>,
    pub reference_pose: Option<Pose>,
}

impl SessionSnapshot {
    fn new(id: Uuid, session: &RealtimeSession) -> Self {
        Self {
            id,
            samples: session.samples(),
            missing: session.missing(),
            reps: session.reps(),
            confidence: session.confidence(),
            capture_capacity: session.capture().capacity(),
            capture_full: session.capture().is_full(),
            captured_total: session.capture().total_pushed(),
            latest_timestamp: session.capture().latest().map(|f| f.timestamp),
            frames: session.capture().frames(),
            trend: session.trend().clone(),
            coaching_log: session.coaching_log().cloned().collect(),
            reference_pose: session.reference_pose().copied(),
        }
    }
}

async fn find_session(state: &SharedState, id: Uuid) -> Result<Arc<Mutex<RealtimeSession>>, ApiError> {
    let state = state.read().await;
    state.sessions.get(&id).cloned().ok_or(ApiError::SessionNotFound(id))
}

/// Open a streaming session
pub async fn create_session(State(state): State<SharedState>) -> Result<(StatusCode, Json<CreatedSession>), ApiError> {
    let mut state = state.write().await;
    if state.sessions.len() >= state.config.max_sessions {
        return Err(ApiError::TooManySessions(state.config.max_sessions));
    }

    let id = Uuid::new_v4();
    let session = state.realtime.new_session();
    state.sessions.insert(id, Arc::new(Mutex::new(session)));
    metrics::gauge!("poselab_active_sessions").set(state.sessions.len() as f64);
    info!("Opened session {} ({} active)", id, state.sessions.len());
    Ok((StatusCode::CREATED, Json(CreatedSession { id })))
}

/// Evaluate the next sample of a session
pub async fn push_frame(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(push): Json<FramePush>,
) -> Result<Json<RealtimeSample>, ApiError> {
    let session = find_session(&state, id).await?;
    let evaluator = state.read().await.realtime.clone();

    let mut session = session.lock().await;
    let sample = match push.frame {
        Some(frame) => evaluator.evaluate(&mut session, &push.activity, frame)?,
        None => evaluator.evaluate_missing(&mut session),
    };
    if sample.pose_detected {
        metrics::counter!("poselab_frames_evaluated_total").increment(1);
    }
    debug!("Session {} sample {} (reps={})", id, session.samples(), sample.reps);
    Ok(Json(sample))
}

/// Capture snapshot of a session
pub async fn get_session(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = find_session(&state, id).await?;
    let session = session.lock().await;
    Ok(Json(SessionSnapshot::new(id, &session)))
}

/// Drop a session's carry and capture but keep it open
pub async fn reset_session(State(state): State<SharedState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    let session = find_session(&state, id).await?;
    session.lock().await.reset();
    info!("Reset session {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Close a session and drop its carry
pub async fn delete_session(State(state): State<SharedState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    let mut state = state.write().await;
    if state.sessions.remove(&id).is_none() {
        return Err(ApiError::SessionNotFound(id));
    }
    metrics::gauge!("poselab_active_sessions").set(state.sessions.len() as f64);
    info!("Closed session {} ({} active)", id, state.sessions.len());
    Ok(StatusCode::NO_CONTENT)
}
