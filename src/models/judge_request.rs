//! Judge request model

use super::{ExecutionLimits, TestCase};

/// Everything needed for one judging attempt
#[derive(Debug, Clone)]
pub struct JudgeRequest {
    pub code: String,
    /// Raw language identifier; resolved by the judge so unsupported
    /// languages become a verdict instead of a parse failure upstream
    pub language: String,
    pub test_cases: Vec<TestCase>,
    pub limits: ExecutionLimits,
}

impl JudgeRequest {
    pub fn new(
        code: impl Into<String>,
        language: impl Into<String>,
        test_cases: Vec<TestCase>,
        limits: ExecutionLimits,
    ) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            test_cases,
            limits,
        }
    }
}
