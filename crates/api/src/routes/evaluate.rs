//! Batch Evaluation Routes

use std::sync::Arc;
use std::time::Instant;

use activity::{ActivityError, ActivityKey, ActivityKind, ActivityRegistry};
use axum::{extract::State, Json};
use pose_frame::Frame;
use sequence::{AnalysisRequest, AnalysisResponse, BatchReport, RawFrame, SequencePreprocessor, SessionSummary};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::SharedState;

/// Clip to grade locally
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Registry key, alias or `auto`
    #[serde(default = "default_activity")]
    pub activity: String,
    pub frames: Vec<Frame>,
}

/// Clip plus the remote analysis it was submitted for
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    /// Client key: `auto`, `squat`, `pushup`, `coverDrive` or `bowling`
    #[serde(default = "default_activity")]
    pub activity: String,
    pub frames: Vec<Frame>,
    pub remote: AnalysisResponse,
}

/// Pixel-space detections to package for remote analysis
#[derive(Debug, Deserialize)]
pub struct PrepareRequest {
    /// Client key: `auto`, `squat`, `pushup`, `coverDrive` or `bowling`
    #[serde(default = "default_activity")]
    pub activity: String,
    pub fps: f64,
    /// Source frame size in pixels
    pub width: f64,
    pub height: f64,
    pub frames: Vec<RawFrame>,
}

/// Response for the summary endpoint
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: SessionSummary,
    pub report: BatchReport,
}

fn default_activity() -> String {
    "auto".to_string()
}

/// Kind for a batch key; `auto` grades as squat, unknown keys are rejected
fn local_kind(registry: &ActivityRegistry, key: &str) -> Result<ActivityKind, ApiError> {
    if key == ActivityKey::Auto.as_str() {
        return Ok(ActivityKind::Squat);
    }
    registry
        .kind_of(key)
        .ok_or_else(|| ActivityError::UnknownKey(key.to_string()).into())
}

fn check_batch_size(count: usize, limit: usize) -> Result<(), ApiError> {
    if count > limit {
        return Err(ApiError::BatchTooLarge { count, limit });
    }
    Ok(())
}

/// Size-check a batch and take the preprocessor out of shared state.
///
/// The read guard is released before returning so grading never holds it.
async fn batch_preprocessor(
    state: &SharedState,
    count: usize,
) -> Result<(Arc<SequencePreprocessor>, Arc<ActivityRegistry>), ApiError> {
    let state = state.read().await;
    check_batch_size(count, state.config.max_batch_frames)?;
    Ok((state.preprocessor.clone(), state.registry.clone()))
}

/// Grade a clip without remote analysis
pub async fn post_evaluate(
    State(state): State<SharedState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<BatchReport>, ApiError> {
    let started = Instant::now();
    let (preprocessor, registry) = batch_preprocessor(&state, request.frames.len()).await?;

    let kind = local_kind(&registry, &request.activity)?;
    let enriched = preprocessor.preprocess_kind(&request.frames, kind)?;
    let report = BatchReport::new(kind, &request.frames, enriched, None);

    metrics::counter!("poselab_batch_requests_total").increment(1);
    metrics::counter!("poselab_frames_evaluated_total").increment(request.frames.len() as u64);
    metrics::histogram!("poselab_batch_duration_seconds").record(started.elapsed().as_secs_f64());
    info!(
        "Evaluated {} frames as '{}' (worst frame {})",
        request.frames.len(),
        kind.key(),
        report.worst_index
    );
    Ok(Json(report))
}

/// Grade a clip against a remote analysis and summarise the session
pub async fn post_summary(
    State(state): State<SharedState>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let (preprocessor, _) = batch_preprocessor(&state, request.frames.len()).await?;

    let key = ActivityKey::parse(&request.activity)?;
    let kind = key.resolve_local(&request.remote.activity);
    let enriched = preprocessor.preprocess_kind(&request.frames, kind)?;
    let report = BatchReport::new(kind, &request.frames, enriched, Some(&request.remote));
    let summary = SessionSummary::from_remote(&request.remote);

    metrics::counter!("poselab_batch_requests_total").increment(1);
    metrics::counter!("poselab_frames_evaluated_total").increment(request.frames.len() as u64);
    info!(
        "Summarised '{}' session (remote '{}', score {})",
        kind.key(),
        request.remote.activity,
        summary.overall_score
    );
    Ok(Json(SummaryResponse { summary, report }))
}

/// Normalize raw detections into the request body for remote analysis
pub async fn post_analysis_request(
    State(state): State<SharedState>,
    Json(request): Json<PrepareRequest>,
) -> Result<Json<AnalysisRequest>, ApiError> {
    let (preprocessor, _) = batch_preprocessor(&state, request.frames.len()).await?;

    let key = ActivityKey::parse(&request.activity)?;
    let prepared = preprocessor.prepare_request(key, request.fps, (request.width, request.height), &request.frames)?;
    info!(
        "Prepared {} frames for remote analysis (hint '{}')",
        prepared.frames.len(),
        prepared.activity_hint
    );
    Ok(Json(prepared))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApiConfig, AppState};
    use std::time::Duration;

    #[test]
    fn test_local_kind() {
        let registry = ActivityRegistry::new();
        assert_eq!(local_kind(&registry, "auto").unwrap(), ActivityKind::Squat);
        assert_eq!(local_kind(&registry, "bowling").unwrap(), ActivityKind::Bowling);
        assert_eq!(local_kind(&registry, "cricketSweep").unwrap(), ActivityKind::CoverDrive);
        assert!(matches!(local_kind(&registry, "yoga"), Err(ApiError::UnknownActivity(_))));
    }

    #[test]
    fn test_batch_size_limit() {
        assert!(check_batch_size(10, 10).is_ok());
        assert!(matches!(
            check_batch_size(11, 10),
            Err(ApiError::BatchTooLarge { count: 11, limit: 10 })
        ));
    }

    #[tokio::test]
    async fn test_batch_preprocessor_releases_state() {
        let state = AppState::new(ApiConfig::default()).shared();
        let (preprocessor, _) = batch_preprocessor(&state, 3).await.unwrap();

        let writer = tokio::time::timeout(Duration::from_millis(100), state.write()).await;
        assert!(writer.is_ok());
        drop(writer);
        assert!(preprocessor.preprocess_kind(&[], ActivityKind::Squat).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batch_preprocessor_checks_size() {
        let config = ApiConfig {
            max_batch_frames: 2,
            ..Default::default()
        };
        let state = AppState::new(config).shared();
        assert!(matches!(
            batch_preprocessor(&state, 3).await,
            Err(ApiError::BatchTooLarge { count: 3, limit: 2 })
        ));
    }
}
