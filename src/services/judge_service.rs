//! Judging service
//!
//! Single entry point for judging a submission. The backend is picked once
//! from configuration: Judge0 when an API key is configured, the local judge
//! otherwise. There is no fallback from one to the other.

use tracing::Instrument;
use uuid::Uuid;

use crate::{
    config::JudgeConfig,
    error::JudgeResult,
    judge::{JudgeBackend, JudgeMode, LocalJudge, RemoteJudgeClient},
    models::{ExecutionLimits, JudgeRequest, TestCase, Verdict},
};

/// Judging facade shared by all request handlers
pub struct JudgeService {
    backend: Box<dyn JudgeBackend>,
    default_limits: ExecutionLimits,
}

impl JudgeService {
    /// Build the service with the backend selected by `config`
    pub fn from_config(config: &JudgeConfig) -> JudgeResult<Self> {
        let backend: Box<dyn JudgeBackend> = match &config.remote {
            Some(remote) => Box::new(RemoteJudgeClient::new(remote.clone())?),
            None => Box::new(LocalJudge::from_config(config)),
        };

        let default_limits = ExecutionLimits {
            time_limit_ms: config.default_time_limit_ms,
            memory_limit_mb: config.default_memory_limit_mb,
        };

        tracing::info!(mode = %backend.mode(), "Judge backend selected");
        Ok(Self::with_backend(backend, default_limits))
    }

    pub fn with_backend(backend: Box<dyn JudgeBackend>, default_limits: ExecutionLimits) -> Self {
        Self {
            backend,
            default_limits,
        }
    }

    pub fn mode(&self) -> JudgeMode {
        self.backend.mode()
    }

    pub fn default_limits(&self) -> ExecutionLimits {
        self.default_limits
    }

    /// Judge `code` against `test_cases`.
    ///
    /// Missing or zero limits fall back to the configured defaults. Judging
    /// outcomes are reported in the verdict; `Err` means the judge itself
    /// failed.
    pub async fn judge(
        &self,
        code: &str,
        language: &str,
        test_cases: Vec<TestCase>,
        time_limit_ms: Option<u64>,
        memory_limit_mb: Option<u64>,
    ) -> JudgeResult<Verdict> {
        let request = self.build_request(code, language, test_cases, time_limit_ms, memory_limit_mb);
        self.judge_request(Uuid::new_v4(), &request).await
    }

    /// Assemble a request, applying the default limits
    pub fn build_request(
        &self,
        code: &str,
        language: &str,
        test_cases: Vec<TestCase>,
        time_limit_ms: Option<u64>,
        memory_limit_mb: Option<u64>,
    ) -> JudgeRequest {
        let limits = ExecutionLimits {
            time_limit_ms: time_limit_ms
                .filter(|&ms| ms > 0)
                .unwrap_or(self.default_limits.time_limit_ms),
            memory_limit_mb: memory_limit_mb
                .filter(|&mb| mb > 0)
                .unwrap_or(self.default_limits.memory_limit_mb),
        };
        JudgeRequest::new(code, language, test_cases, limits)
    }

    /// Run one judging attempt identified by `attempt_id`
    pub async fn judge_request(&self, attempt_id: Uuid, request: &JudgeRequest) -> JudgeResult<Verdict> {
        let span = tracing::info_span!(
            "judge",
            attempt_id = %attempt_id,
            language = %request.language,
            mode = %self.backend.mode()
        );

        async {
            tracing::info!(test_cases = request.test_cases.len(), "Judging submission");

            match self.backend.execute(request).await {
                Ok(verdict) => {
                    tracing::info!(
                        status = %verdict.status,
                        passed = verdict.passed_count,
                        total = request.test_cases.len(),
                        elapsed_ms = verdict.execution_time_ms,
                        "Judging finished"
                    );
                    Ok(verdict)
                }
                Err(e) => {
                    tracing::error!(error = %e, "Judging failed");
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::config::{RemoteJudgeConfig, ToolchainConfig};
    use crate::error::JudgeError;
    use crate::judge::MockJudgeBackend;
    use crate::models::VerdictStatus;

    fn judge_config(remote: Option<RemoteJudgeConfig>) -> JudgeConfig {
        JudgeConfig {
            workspace_dir: PathBuf::from("/tmp/codearena-test"),
            compile_timeout_ms: 10_000,
            default_time_limit_ms: 1500,
            default_memory_limit_mb: 64,
            toolchain: ToolchainConfig::default(),
            remote,
        }
    }

    fn service(mock: MockJudgeBackend) -> JudgeService {
        JudgeService::with_backend(Box::new(mock), ExecutionLimits::default())
    }

    #[test]
    fn test_local_mode_without_api_key() {
        let service = JudgeService::from_config(&judge_config(None)).unwrap();
        assert_eq!(service.mode(), JudgeMode::Local);
        assert_eq!(service.default_limits().time_limit_ms, 1500);
    }

    #[test]
    fn test_remote_mode_with_api_key() {
        let remote = RemoteJudgeConfig {
            api_key: "key".to_string(),
            api_url: "http://127.0.0.1:9".to_string(),
            api_host: "localhost".to_string(),
            poll_interval_ms: 1000,
            max_poll_attempts: 30,
            max_cpu_time_limit_secs: 15.0,
            max_memory_limit_kb: 512_000,
        };
        let service = JudgeService::from_config(&judge_config(Some(remote))).unwrap();
        assert_eq!(service.mode(), JudgeMode::Remote);
    }

    #[tokio::test]
    async fn test_judge_applies_default_limits() {
        let mut mock = MockJudgeBackend::new();
        mock.expect_mode().return_const(JudgeMode::Local);
        mock.expect_execute()
            .withf(|req| {
                req.language == "python"
                    && req.limits == ExecutionLimits::default()
                    && req.test_cases.len() == 1
            })
            .times(1)
            .returning(|req| Ok(Verdict::from_results(Vec::new(), req.test_cases.len())));

        let verdict = service(mock)
            .judge("print(1)", "python", vec![TestCase::new("", "1")], None, Some(0))
            .await;
        let verdict = assert_ok!(verdict);
        assert_eq!(verdict.status, VerdictStatus::WrongAnswer);
    }

    #[tokio::test]
    async fn test_judge_passes_explicit_limits() {
        let mut mock = MockJudgeBackend::new();
        mock.expect_mode().return_const(JudgeMode::Remote);
        mock.expect_execute()
            .withf(|req| req.limits.time_limit_ms == 500 && req.limits.memory_limit_mb == 256)
            .times(1)
            .returning(|_| Ok(Verdict::compilation_error("error: expected ';'")));

        let verdict = service(mock)
            .judge("int main() {}", "cpp", vec![TestCase::new("", "")], Some(500), Some(256))
            .await
            .unwrap();
        assert_eq!(verdict.status, VerdictStatus::CompilationError);
    }

    #[tokio::test]
    async fn test_infrastructure_errors_propagate() {
        let mut mock = MockJudgeBackend::new();
        mock.expect_mode().return_const(JudgeMode::Remote);
        mock.expect_execute()
            .returning(|_| Err(JudgeError::Remote("503 Service Unavailable".to_string())));

        let result = service(mock)
            .judge("print(1)", "python", vec![TestCase::new("", "1")], None, None)
            .await;
        let err = assert_err!(result);
        assert!(err.is_infrastructure());
    }
}
