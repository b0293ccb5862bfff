//! Verdict types and aggregation logic

use serde::{Deserialize, Serialize};

use super::TestCase;

/// Status of a judging attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    /// Waiting to be judged
    Pending,
    /// Passed every test case
    Accepted,
    /// Output does not match expected
    WrongAnswer,
    /// Exceeded time limit
    TimeLimitExceeded,
    /// Exceeded memory limit
    MemoryLimitExceeded,
    /// Program crashed, exited non-zero, or could not be judged
    RuntimeError,
    /// Compiler rejected the source
    CompilationError,
}

impl VerdictStatus {
    /// Get status as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::WrongAnswer => "wrong_answer",
            Self::TimeLimitExceeded => "time_limit_exceeded",
            Self::MemoryLimitExceeded => "memory_limit_exceeded",
            Self::RuntimeError => "runtime_error",
            Self::CompilationError => "compilation_error",
        }
    }

    /// Check if this is a final status (judging complete)
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Check if this status means the solution was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl std::fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of running one test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResult {
    pub input: String,
    pub expected_output: String,
    pub actual_output: String,
    pub passed: bool,
    pub execution_time_ms: f64,
    pub memory_used_kb: u64,
}

impl TestCaseResult {
    pub fn new(
        test_case: &TestCase,
        actual_output: String,
        passed: bool,
        execution_time_ms: f64,
        memory_used_kb: u64,
    ) -> Self {
        Self {
            input: test_case.input.clone(),
            expected_output: test_case.expected_output.clone(),
            actual_output,
            passed,
            execution_time_ms,
            memory_used_kb,
        }
    }

    /// A failed run that produced no usable output
    pub fn failed(test_case: &TestCase, execution_time_ms: f64) -> Self {
        Self::new(test_case, String::new(), false, execution_time_ms, 0)
    }
}

/// Aggregated result of one judging attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// Results in test case order; may stop short after a fatal error
    pub test_results: Vec<TestCaseResult>,
    pub passed_count: usize,
    pub status: VerdictStatus,
    /// Maximum over all test cases
    pub execution_time_ms: f64,
    /// Maximum over all test cases
    pub memory_used_kb: u64,
    pub error_message: Option<String>,
}

impl Verdict {
    /// Aggregate the results of a run where every test case was attempted.
    ///
    /// `accepted` requires at least one test case and every case passing.
    pub fn from_results(test_results: Vec<TestCaseResult>, total_cases: usize) -> Self {
        let passed_count = count_passed(&test_results);
        let status = if total_cases > 0 && passed_count == total_cases {
            VerdictStatus::Accepted
        } else {
            VerdictStatus::WrongAnswer
        };
        Self::build(test_results, status, None)
    }

    /// A run cut short by a fatal error on its last recorded test case
    pub fn halted(
        test_results: Vec<TestCaseResult>,
        status: VerdictStatus,
        error_message: Option<String>,
    ) -> Self {
        debug_assert!(
            matches!(
                status,
                VerdictStatus::TimeLimitExceeded
                    | VerdictStatus::MemoryLimitExceeded
                    | VerdictStatus::RuntimeError
            ),
            "halted verdicts must carry a failure status"
        );
        Self::build(test_results, status, error_message)
    }

    /// The compiler rejected the source; no test case was run
    pub fn compilation_error(message: impl Into<String>) -> Self {
        Self::build(Vec::new(), VerdictStatus::CompilationError, Some(message.into()))
    }

    /// The submission could not be run at all (e.g. unsupported language)
    pub fn runtime_error(message: impl Into<String>) -> Self {
        Self::build(Vec::new(), VerdictStatus::RuntimeError, Some(message.into()))
    }

    fn build(
        test_results: Vec<TestCaseResult>,
        status: VerdictStatus,
        error_message: Option<String>,
    ) -> Self {
        let passed_count = count_passed(&test_results);
        let execution_time_ms = test_results
            .iter()
            .map(|r| r.execution_time_ms)
            .fold(0.0, f64::max);
        let memory_used_kb = test_results
            .iter()
            .map(|r| r.memory_used_kb)
            .max()
            .unwrap_or(0);

        Self {
            test_results,
            passed_count,
            status,
            execution_time_ms,
            memory_used_kb,
            error_message,
        }
    }

    /// Points earned for a problem worth `points`: all or nothing
    pub fn points_awarded(&self, points: u32) -> u32 {
        if self.status.is_accepted() { points } else { 0 }
    }
}

fn count_passed(results: &[TestCaseResult]) -> usize {
    results.iter().filter(|r| r.passed).count()
}

/// Percentage of passed test cases, 0 when there are none
pub fn pass_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (passed as f64 / total as f64) * 100.0
}
