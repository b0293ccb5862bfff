//! Judge request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_MEMORY_LIMIT_MB, MAX_SOURCE_CODE_SIZE, MAX_TEST_CASES, MAX_TIME_LIMIT_MS};
use crate::models::TestCase;

/// Judge a piece of code against a set of test cases
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JudgeSubmissionRequest {
    /// Source code
    #[validate(length(min = 1, max = MAX_SOURCE_CODE_SIZE))]
    pub code: String,

    /// Programming language identifier
    #[validate(length(min = 1, max = 20))]
    pub language: String,

    #[validate(length(min = 1, max = MAX_TEST_CASES))]
    pub test_cases: Vec<TestCase>,

    /// Per test case time limit; the configured default when absent
    #[validate(range(min = 1, max = MAX_TIME_LIMIT_MS))]
    pub time_limit_ms: Option<u64>,

    /// Memory limit; the configured default when absent
    #[validate(range(min = 1, max = MAX_MEMORY_LIMIT_MB))]
    pub memory_limit_mb: Option<u64>,

    /// Points the problem is worth, awarded only on acceptance
    pub points: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> JudgeSubmissionRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let request = parse(serde_json::json!({
            "code": "print(1)",
            "language": "python",
            "testCases": [{ "input": "", "expectedOutput": "1" }],
            "timeLimitMs": 1000
        }));
        assert!(request.validate().is_ok());
        assert_eq!(request.time_limit_ms, Some(1000));
        assert!(request.memory_limit_mb.is_none());
    }

    #[test]
    fn test_rejects_empty_code_and_cases() {
        let request = parse(serde_json::json!({
            "code": "",
            "language": "python",
            "testCases": []
        }));
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("code"));
        assert!(fields.contains_key("test_cases"));
    }

    #[test]
    fn test_rejects_limits_out_of_range() {
        let request = parse(serde_json::json!({
            "code": "x",
            "language": "c",
            "testCases": [{ "input": "", "expectedOutput": "" }],
            "timeLimitMs": 60000,
            "memoryLimitMb": 0
        }));
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("time_limit_ms"));
        assert!(fields.contains_key("memory_limit_mb"));
    }
}
