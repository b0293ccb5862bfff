//! Judge handler implementations

use axum::{extract::State, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{error::AppResult, state::AppState};

use super::{request::JudgeSubmissionRequest, response::JudgeResponse};

/// Judge a submission synchronously and return its verdict
pub async fn judge_submission(
    State(state): State<AppState>,
    Json(payload): Json<JudgeSubmissionRequest>,
) -> AppResult<Json<JudgeResponse>> {
    payload.validate()?;

    let id = Uuid::new_v4();
    let judge = state.judge();
    let request = judge.build_request(
        &payload.code,
        &payload.language,
        payload.test_cases,
        payload.time_limit_ms,
        payload.memory_limit_mb,
    );

    let verdict = judge.judge_request(id, &request).await?;

    Ok(Json(JudgeResponse::from_verdict(
        id,
        verdict,
        &request.test_cases,
        payload.points.unwrap_or(0),
    )))
}
