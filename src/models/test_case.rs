//! Test case and execution limit models

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MEMORY_LIMIT_MB, DEFAULT_TIME_LIMIT_MS};

/// One (input, expected output) pair attached to a problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
    /// Hidden cases are not shown to non-privileged viewers
    #[serde(default)]
    pub is_hidden: bool,
}

impl TestCase {
    /// Create a visible test case
    pub fn new(input: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected_output: expected_output.into(),
            is_hidden: false,
        }
    }

    /// Create a hidden test case
    pub fn hidden(input: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            is_hidden: true,
            ..Self::new(input, expected_output)
        }
    }

    /// Get a preview of the input (truncated)
    pub fn input_preview(&self, max_len: usize) -> String {
        preview(&self.input, max_len)
    }
}

/// Truncate on a char boundary so multi-byte input never panics.
fn preview(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Resource limits for one judging attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLimits {
    pub time_limit_ms: u64,
    pub memory_limit_mb: u64,
}

impl ExecutionLimits {
    /// Create limits, rejecting zero values
    pub fn new(time_limit_ms: u64, memory_limit_mb: u64) -> Result<Self, &'static str> {
        if time_limit_ms == 0 {
            return Err("Time limit must be positive");
        }
        if memory_limit_mb == 0 {
            return Err("Memory limit must be positive");
        }
        Ok(Self {
            time_limit_ms,
            memory_limit_mb,
        })
    }

    /// Memory limit in kilobytes
    pub fn memory_limit_kb(&self) -> u64 {
        self.memory_limit_mb * 1024
    }

    /// Time limit in (fractional) seconds
    pub fn time_limit_seconds(&self) -> f64 {
        self.time_limit_ms as f64 / 1000.0
    }
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            memory_limit_mb: DEFAULT_MEMORY_LIMIT_MB,
        }
    }
}
