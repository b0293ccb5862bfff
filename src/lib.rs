//! CodeArena - Judging core of the CodeArena coding-contest platform
//!
//! This library compiles, runs and grades contest submissions against
//! input/expected-output test cases, either on the local host or through a
//! remote Judge0 service, and exposes the result over a small HTTP API.
//!
//! # Features
//!
//! - Multi-language support (JavaScript, Python, Java, C++, C)
//! - Per test case wall-clock limits with guaranteed process cleanup
//! - Pluggable judging backends (local toolchains or Judge0)
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: The judging facade
//! - **Judge**: Process runner, language adapters and the two backends
//! - **Models**: Domain models and DTOs

pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod judge;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::constants::{API_BASE_PATH, MAX_REQUEST_BODY_SIZE};
use crate::middleware::logging_middleware;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult, JudgeError, JudgeResult};
pub use services::JudgeService;
pub use state::AppState;

/// Build the HTTP application
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest(API_BASE_PATH, handlers::routes())
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_SIZE))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::judge::{JudgeMode, MockJudgeBackend};
    use crate::models::{ExecutionLimits, TestCaseResult, Verdict};

    fn app(mock: MockJudgeBackend) -> Router {
        let judge = JudgeService::with_backend(Box::new(mock), ExecutionLimits::default());
        create_router(AppState::new(judge))
    }

    fn local_mock() -> MockJudgeBackend {
        let mut mock = MockJudgeBackend::new();
        mock.expect_mode().return_const(JudgeMode::Local);
        mock
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post_judge(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/judge")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_judge_mode() {
        let request = Request::get("/api/v1/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(local_mock()), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["judgeMode"], "local");
    }

    #[tokio::test]
    async fn test_languages_are_listed() {
        let request = Request::get("/api/v1/languages").body(Body::empty()).unwrap();
        let (status, body) = send(app(local_mock()), request).await;

        assert_eq!(status, StatusCode::OK);
        let languages = body["languages"].as_array().unwrap();
        assert_eq!(languages.len(), 5);
        assert!(languages
            .iter()
            .any(|l| l["id"] == "java" && l["executionModel"] == "compiled_bytecode"));
    }

    #[tokio::test]
    async fn test_judge_returns_verdict() {
        let mut mock = local_mock();
        mock.expect_execute()
            .withf(|req| req.limits.time_limit_ms == 1000 && req.limits.memory_limit_mb == 128)
            .times(1)
            .returning(|req| {
                let results = req
                    .test_cases
                    .iter()
                    .map(|case| TestCaseResult::new(case, case.expected_output.clone(), true, 12.5, 0))
                    .collect();
                Ok(Verdict::from_results(results, req.test_cases.len()))
            });

        let (status, body) = send(
            app(mock),
            post_judge(json!({
                "code": "print(input())",
                "language": "python",
                "testCases": [
                    { "input": "1", "expectedOutput": "1" },
                    { "input": "2", "expectedOutput": "2", "isHidden": true }
                ],
                "timeLimitMs": 1000,
                "points": 50
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "accepted");
        assert_eq!(body["passedTestCases"], 2);
        assert_eq!(body["totalTestCases"], 2);
        assert_eq!(body["passRate"], 100.0);
        assert_eq!(body["points"], 50);
        assert_eq!(body["testResults"][0]["actualOutput"], "1");
        assert!(body["testResults"][1]["actualOutput"].is_null());
        assert!(body["id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_judge_rejects_invalid_payload() {
        let mut mock = local_mock();
        mock.expect_execute().never();

        let (status, body) = send(
            app(mock),
            post_judge(json!({ "code": "", "language": "python", "testCases": [] })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_remote_failure_maps_to_bad_gateway() {
        let mut mock = MockJudgeBackend::new();
        mock.expect_mode().return_const(JudgeMode::Remote);
        mock.expect_execute()
            .returning(|_| Err(JudgeError::Remote("connection refused".to_string())));

        let (status, body) = send(
            app(mock),
            post_judge(json!({
                "code": "print(1)",
                "language": "python",
                "testCases": [{ "input": "", "expectedOutput": "1" }]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "REMOTE_JUDGE_ERROR");
    }
}
