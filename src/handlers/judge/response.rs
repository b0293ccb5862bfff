//! Judge response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::models::{pass_rate, TestCase, TestCaseResult, Verdict, VerdictStatus};

/// Outcome of one judging attempt
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeResponse {
    pub id: Uuid,
    pub status: VerdictStatus,
    pub passed_test_cases: usize,
    pub total_test_cases: usize,
    /// Percentage in `0..=100`
    pub pass_rate: f64,
    pub execution_time_ms: f64,
    pub memory_used_kb: u64,
    pub points: u32,
    pub error_message: Option<String>,
    pub test_results: Vec<TestResultResponse>,
}

/// Result for a single test case
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultResponse {
    pub is_hidden: bool,
    /// Withheld for hidden test cases
    pub input: Option<String>,
    pub expected_output: Option<String>,
    pub actual_output: Option<String>,
    pub passed: bool,
    pub execution_time_ms: f64,
    pub memory_used_kb: u64,
}

impl TestResultResponse {
    fn new(result: TestCaseResult, is_hidden: bool) -> Self {
        let reveal = |text: String| (!is_hidden).then_some(text);
        Self {
            is_hidden,
            input: reveal(result.input),
            expected_output: reveal(result.expected_output),
            actual_output: reveal(result.actual_output),
            passed: result.passed,
            execution_time_ms: result.execution_time_ms,
            memory_used_kb: result.memory_used_kb,
        }
    }
}

impl JudgeResponse {
    /// Build the response; results line up with `test_cases` by position
    pub fn from_verdict(id: Uuid, verdict: Verdict, test_cases: &[TestCase], points: u32) -> Self {
        let total_test_cases = test_cases.len();
        let points = verdict.points_awarded(points);

        let test_results = verdict
            .test_results
            .into_iter()
            .zip(test_cases)
            .map(|(result, case)| TestResultResponse::new(result, case.is_hidden))
            .collect();

        Self {
            id,
            status: verdict.status,
            passed_test_cases: verdict.passed_count,
            total_test_cases,
            pass_rate: pass_rate(verdict.passed_count, total_test_cases),
            execution_time_ms: verdict.execution_time_ms,
            memory_used_kb: verdict.memory_used_kb,
            points,
            error_message: verdict.error_message,
            test_results,
        }
    }
}
