//! Remote judge backed by the Judge0 HTTP API
//!
//! Each test case becomes one Judge0 submission. The client submits it,
//! polls the returned token until Judge0 reports a final status, and maps the
//! result back onto a [`TestCaseResult`]. Unlike the local judge, every test
//! case is attempted even after a failure.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use super::{JudgeBackend, JudgeMode};
use crate::config::RemoteJudgeConfig;
use crate::constants::judge0::{status, REQUEST_TIMEOUT_SECS};
use crate::error::{JudgeError, JudgeResult};
use crate::models::{
    ExecutionLimits, JudgeRequest, SupportedLanguage, TestCase, TestCaseResult, Verdict,
};

const API_KEY_HEADER: &str = "X-RapidAPI-Key";
const API_HOST_HEADER: &str = "X-RapidAPI-Host";

/// Body of `POST /submissions`
#[derive(Debug, Serialize)]
struct CreateSubmission {
    language_id: u32,
    source_code: String,
    stdin: String,
    expected_output: String,
    /// Seconds
    cpu_time_limit: f64,
    /// Kilobytes
    memory_limit: u64,
}

#[derive(Debug, Deserialize)]
struct SubmissionToken {
    token: String,
}

#[derive(Debug, Deserialize)]
struct SubmissionStatus {
    id: u32,
    #[serde(default)]
    description: String,
}

/// Judge0 reports numbers either as JSON numbers or as strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn value(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }
}

/// Body of `GET /submissions/{token}`
#[derive(Debug, Deserialize)]
struct SubmissionDetails {
    status: SubmissionStatus,
    #[serde(default)]
    stdout: Option<String>,
    /// Seconds
    #[serde(default)]
    time: Option<Numeric>,
    /// Kilobytes
    #[serde(default)]
    memory: Option<Numeric>,
}

impl SubmissionDetails {
    fn is_pending(&self) -> bool {
        self.status.id <= status::PROCESSING
    }
}

/// Judge0 client
#[derive(Debug, Clone)]
pub struct RemoteJudgeClient {
    http: reqwest::Client,
    config: RemoteJudgeConfig,
}

impl RemoteJudgeClient {
    pub fn new(config: RemoteJudgeConfig) -> JudgeResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { http, config })
    }

    async fn judge(&self, request: &JudgeRequest) -> JudgeResult<Verdict> {
        let language = match request.language.parse::<SupportedLanguage>() {
            Ok(language) => language,
            Err(e) => {
                tracing::warn!(language = %request.language, "Rejected submission in unsupported language");
                return Ok(Verdict::runtime_error(e.to_string()));
            }
        };

        let mut results = Vec::with_capacity(request.test_cases.len());
        for (index, test_case) in request.test_cases.iter().enumerate() {
            let result = self
                .run_test_case(language, &request.code, test_case, &request.limits)
                .await?;
            tracing::debug!(
                test_case = index + 1,
                passed = result.passed,
                elapsed_ms = result.execution_time_ms,
                "Remote test case finished"
            );
            results.push(result);
        }

        Ok(Verdict::from_results(results, request.test_cases.len()))
    }

    async fn run_test_case(
        &self,
        language: SupportedLanguage,
        code: &str,
        test_case: &TestCase,
        limits: &ExecutionLimits,
    ) -> JudgeResult<TestCaseResult> {
        let submission = CreateSubmission {
            language_id: language.judge0_id(),
            source_code: STANDARD.encode(code),
            stdin: STANDARD.encode(&test_case.input),
            expected_output: STANDARD.encode(&test_case.expected_output),
            cpu_time_limit: limits
                .time_limit_seconds()
                .min(self.config.max_cpu_time_limit_secs),
            memory_limit: limits.memory_limit_kb().min(self.config.max_memory_limit_kb),
        };

        let token = self.submit(&submission).await?;

        let Some(details) = self.poll(&token).await? else {
            tracing::warn!(
                token = %token,
                attempts = self.config.max_poll_attempts,
                "Submission still pending after the poll budget, marking it failed"
            );
            return Ok(TestCaseResult::failed(test_case, 0.0));
        };

        let actual_output = match details.stdout.as_deref() {
            Some(encoded) => decode(encoded)?,
            None => String::new(),
        };
        let execution_time_ms = details.time.as_ref().map_or(0.0, |t| t.value() * 1000.0);
        let memory_used_kb = details.memory.as_ref().map_or(0, |m| m.value().max(0.0) as u64);

        if details.status.id != status::ACCEPTED {
            tracing::debug!(
                token = %token,
                status_id = details.status.id,
                status = %details.status.description,
                "Remote test case not accepted"
            );
        }

        Ok(TestCaseResult::new(
            test_case,
            actual_output,
            details.status.id == status::ACCEPTED,
            execution_time_ms,
            memory_used_kb,
        ))
    }

    async fn submit(&self, submission: &CreateSubmission) -> JudgeResult<String> {
        let response = self
            .http
            .post(format!("{}/submissions", self.config.api_url))
            .query(&[("base64_encoded", "true"), ("wait", "false")])
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(API_HOST_HEADER, &self.config.api_host)
            .json(submission)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| JudgeError::Remote(format!("submission rejected: {}", e)))?;

        let body: SubmissionToken = response.json().await?;
        Ok(body.token)
    }

    /// Poll until Judge0 reports a final status. `None` means the budget ran
    /// out first.
    async fn poll(&self, token: &str) -> JudgeResult<Option<SubmissionDetails>> {
        let interval = Duration::from_millis(self.config.poll_interval_ms);

        for _ in 0..self.config.max_poll_attempts {
            tokio::time::sleep(interval).await;

            let details: SubmissionDetails = self
                .http
                .get(format!("{}/submissions/{}", self.config.api_url, token))
                .query(&[("base64_encoded", "true")])
                .header(API_KEY_HEADER, &self.config.api_key)
                .header(API_HOST_HEADER, &self.config.api_host)
                .send()
                .await?
                .error_for_status()
                .map_err(|e| JudgeError::Remote(format!("status request failed: {}", e)))?
                .json()
                .await?;

            if !details.is_pending() {
                return Ok(Some(details));
            }
        }

        Ok(None)
    }
}

#[async_trait]
impl JudgeBackend for RemoteJudgeClient {
    fn mode(&self) -> JudgeMode {
        JudgeMode::Remote
    }

    async fn execute(&self, request: &JudgeRequest) -> JudgeResult<Verdict> {
        self.judge(request).await
    }
}

/// Decode a base64 field; Judge0 wraps long payloads across lines
fn decode(encoded: &str) -> JudgeResult<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
