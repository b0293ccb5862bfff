//! Local judge: compile and run submissions on this host

use std::path::PathBuf;
use std::time::Instant;

use async_trait::async_trait;

use super::command::{run_command, CommandSpec};
use super::languages::{LanguageAdapter, SourceArtifact};
use super::{JudgeBackend, JudgeMode};
use crate::config::{JudgeConfig, ToolchainConfig};
use crate::error::{JudgeError, JudgeResult};
use crate::models::{JudgeRequest, TestCaseResult, Verdict, VerdictStatus};

/// Executes submissions with the host's compilers and interpreters.
///
/// Test cases run one after another in input order. The first timeout or
/// crash ends the attempt. Memory is not measured and reported as 0.
#[derive(Debug, Clone)]
pub struct LocalJudge {
    workspace_dir: PathBuf,
    compile_timeout_ms: u64,
    toolchain: ToolchainConfig,
}

impl LocalJudge {
    pub fn new(workspace_dir: PathBuf, compile_timeout_ms: u64, toolchain: ToolchainConfig) -> Self {
        Self {
            workspace_dir,
            compile_timeout_ms,
            toolchain,
        }
    }

    pub fn from_config(config: &JudgeConfig) -> Self {
        Self::new(
            config.workspace_dir.clone(),
            config.compile_timeout_ms,
            config.toolchain.clone(),
        )
    }

    async fn judge(&self, request: &JudgeRequest) -> JudgeResult<Verdict> {
        let adapter = match LanguageAdapter::for_language(&request.language, &self.toolchain) {
            Ok(adapter) => adapter,
            Err(e @ JudgeError::UnsupportedLanguage(_)) => {
                tracing::warn!(language = %request.language, "Rejected submission in unsupported language");
                return Ok(Verdict::runtime_error(e.to_string()));
            }
            Err(e) => return Err(e),
        };

        let artifact = match adapter
            .prepare(&request.code, &self.workspace_dir, self.compile_timeout_ms)
            .await
        {
            Ok(artifact) => artifact,
            Err(JudgeError::Compilation(message)) => {
                tracing::info!(language = %adapter.language(), "Compilation failed");
                return Ok(Verdict::compilation_error(message));
            }
            Err(e) => return Err(e),
        };

        let verdict = self.run_test_cases(&adapter, &artifact, request).await;

        if let Err(e) = artifact.close() {
            tracing::warn!("Failed to cleanup judge artifacts: {}", e);
        }

        verdict
    }

    /// Run every test case against a prepared artifact
    async fn run_test_cases(
        &self,
        adapter: &LanguageAdapter<'_>,
        artifact: &SourceArtifact,
        request: &JudgeRequest,
    ) -> JudgeResult<Verdict> {
        let (program, args) = adapter.run_command(artifact)?;
        let time_limit_ms = request.limits.time_limit_ms;
        let mut results = Vec::with_capacity(request.test_cases.len());

        for (index, test_case) in request.test_cases.iter().enumerate() {
            let number = index + 1;
            tracing::debug!(
                test_case = number,
                input = %test_case.input_preview(64),
                "Running test case"
            );

            let spec = CommandSpec::new(program.clone(), args.clone(), time_limit_ms)
                .with_stdin(test_case.input.clone())
                .current_dir(artifact.dir());
            let start = Instant::now();

            match run_command(&spec).await {
                Ok(output) => {
                    let actual = output.stdout.trim();
                    let passed = outputs_match(actual, &test_case.expected_output);
                    tracing::debug!(
                        test_case = number,
                        passed,
                        elapsed_ms = output.elapsed_ms(),
                        "Test case finished"
                    );
                    results.push(TestCaseResult::new(
                        test_case,
                        actual.to_string(),
                        passed,
                        output.elapsed_ms(),
                        0,
                    ));
                }
                Err(JudgeError::Timeout { limit_ms }) => {
                    tracing::info!(test_case = number, limit_ms, "Time limit exceeded");
                    results.push(TestCaseResult::failed(test_case, elapsed_ms(start)));
                    return Ok(Verdict::halted(
                        results,
                        VerdictStatus::TimeLimitExceeded,
                        Some(format!(
                            "Time limit of {}ms exceeded on test case {}",
                            limit_ms, number
                        )),
                    ));
                }
                Err(JudgeError::Process { exit_code, message }) => {
                    tracing::info!(test_case = number, exit_code, "Runtime error");
                    results.push(TestCaseResult::failed(test_case, elapsed_ms(start)));
                    return Ok(Verdict::halted(
                        results,
                        VerdictStatus::RuntimeError,
                        Some(message),
                    ));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Verdict::from_results(results, request.test_cases.len()))
    }
}

#[async_trait]
impl JudgeBackend for LocalJudge {
    fn mode(&self) -> JudgeMode {
        JudgeMode::Local
    }

    async fn execute(&self, request: &JudgeRequest) -> JudgeResult<Verdict> {
        self.judge(request).await
    }
}

/// Compare trimmed outputs, ignoring Windows line endings
fn outputs_match(actual: &str, expected: &str) -> bool {
    let actual = actual.trim().replace("\r\n", "\n");
    let expected = expected.trim().replace("\r\n", "\n");
    actual == expected
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
