//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "codearena=info,tower_http=info";

// =============================================================================
// JUDGE DEFAULTS
// =============================================================================

/// Default time limit per test case in milliseconds
pub const DEFAULT_TIME_LIMIT_MS: u64 = 2000;

/// Default memory limit in megabytes
pub const DEFAULT_MEMORY_LIMIT_MB: u64 = 128;

/// Maximum time limit in milliseconds (to prevent abuse)
pub const MAX_TIME_LIMIT_MS: u64 = 30_000;

/// Maximum memory limit in megabytes
pub const MAX_MEMORY_LIMIT_MB: u64 = 1024;

/// Wall-clock budget for a compiler invocation
pub const DEFAULT_COMPILE_TIMEOUT_MS: u64 = 10_000;

/// Name of the judge workspace directory created under the system temp dir
pub const DEFAULT_WORKSPACE_DIR_NAME: &str = "codearena-judge";

/// Maximum source code size in bytes (1 MB)
pub const MAX_SOURCE_CODE_SIZE: u64 = 1024 * 1024;

/// Maximum HTTP request body size in bytes (16 MB)
pub const MAX_REQUEST_BODY_SIZE: usize = 16 * 1024 * 1024;

/// Maximum number of test cases accepted in one judge request
pub const MAX_TEST_CASES: u64 = 500;

/// Bytes captured from each of stdout/stderr before reading stops (64 MB)
pub const MAX_CAPTURED_OUTPUT_BYTES: u64 = 64 * 1024 * 1024;

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language identifiers
pub mod languages {
    pub const JAVASCRIPT: &str = "javascript";
    pub const PYTHON: &str = "python";
    pub const JAVA: &str = "java";
    pub const CPP: &str = "cpp";
    pub const C: &str = "c";
}

/// File extensions for each language
pub mod file_extensions {
    pub const JAVASCRIPT: &str = "js";
    pub const PYTHON: &str = "py";
    pub const JAVA: &str = "java";
    pub const CPP: &str = "cpp";
    pub const C: &str = "c";
}

/// Default toolchain binaries, resolved through `PATH`
pub mod toolchain {
    pub const NODE: &str = "node";
    pub const PYTHON: &str = "python3";
    pub const JAVAC: &str = "javac";
    pub const JAVA: &str = "java";
    pub const GCC: &str = "gcc";
    pub const GXX: &str = "g++";
}

// =============================================================================
// REMOTE JUDGE (JUDGE0)
// =============================================================================

pub mod judge0 {
    /// Default Judge0 endpoint (RapidAPI hosted CE edition)
    pub const DEFAULT_API_URL: &str = "https://judge0-ce.p.rapidapi.com";

    /// Default value for the `X-RapidAPI-Host` header
    pub const DEFAULT_API_HOST: &str = "judge0-ce.p.rapidapi.com";

    /// Delay between two status polls
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

    /// Poll budget per test case (about 30 seconds with the default interval)
    pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 30;

    /// Judge0's default `max_cpu_time_limit`, in seconds
    pub const DEFAULT_MAX_CPU_TIME_LIMIT_SECS: f64 = 15.0;

    /// Judge0's default `max_memory_limit`, in kilobytes
    pub const DEFAULT_MAX_MEMORY_LIMIT_KB: u64 = 512_000;

    /// Timeout of a single HTTP request to Judge0
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Language ids understood by Judge0
    pub mod language_ids {
        pub const JAVASCRIPT: u32 = 63;
        pub const PYTHON: u32 = 71;
        pub const JAVA: u32 = 62;
        pub const CPP: u32 = 54;
        pub const C: u32 = 50;
    }

    /// Judge0 status ids; anything up to `PROCESSING` is still pending
    pub mod status {
        pub const PROCESSING: u32 = 2;
        pub const ACCEPTED: u32 = 3;
    }
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";
