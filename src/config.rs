//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! Configuration is loaded once by the hosting process and handed to the components
//! that need it.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{
    judge0, toolchain, DEFAULT_COMPILE_TIMEOUT_MS, DEFAULT_LOG_FILTER, DEFAULT_MEMORY_LIMIT_MB,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_TIME_LIMIT_MS, DEFAULT_WORKSPACE_DIR_NAME,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub judge: JudgeConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Judging configuration
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// Directory under which every judging attempt creates its own scratch dir
    pub workspace_dir: PathBuf,
    /// Wall-clock budget for compiler invocations
    pub compile_timeout_ms: u64,
    /// Time limit applied when the caller does not provide one
    pub default_time_limit_ms: u64,
    /// Memory limit applied when the caller does not provide one
    pub default_memory_limit_mb: u64,
    pub toolchain: ToolchainConfig,
    /// Present only when a Judge0 API key is configured
    pub remote: Option<RemoteJudgeConfig>,
}

/// Compiler and interpreter binaries used by local execution
#[derive(Debug, Clone)]
pub struct ToolchainConfig {
    pub node: String,
    pub python: String,
    pub javac: String,
    pub java: String,
    pub gcc: String,
    pub gxx: String,
}

/// Judge0 connection settings
#[derive(Debug, Clone)]
pub struct RemoteJudgeConfig {
    pub api_key: String,
    pub api_url: String,
    pub api_host: String,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
    /// Upper bound for the forwarded `cpu_time_limit`, in seconds
    pub max_cpu_time_limit_secs: f64,
    /// Upper bound for the forwarded `memory_limit`, in kilobytes
    pub max_memory_limit_kb: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            judge: JudgeConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_or("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

impl JudgeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let workspace_dir = env::var("JUDGE_WORKSPACE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir().join(DEFAULT_WORKSPACE_DIR_NAME));

        Ok(Self {
            workspace_dir,
            compile_timeout_ms: positive_or("JUDGE_COMPILE_TIMEOUT_MS", DEFAULT_COMPILE_TIMEOUT_MS)?,
            default_time_limit_ms: positive_or("DEFAULT_TIME_LIMIT_MS", DEFAULT_TIME_LIMIT_MS)?,
            default_memory_limit_mb: positive_or("DEFAULT_MEMORY_LIMIT_MB", DEFAULT_MEMORY_LIMIT_MB)?,
            toolchain: ToolchainConfig::from_env(),
            remote: RemoteJudgeConfig::from_env()?,
        })
    }
}

impl ToolchainConfig {
    fn from_env() -> Self {
        Self {
            node: env::var("JUDGE_NODE_BIN").unwrap_or_else(|_| toolchain::NODE.to_string()),
            python: env::var("JUDGE_PYTHON_BIN").unwrap_or_else(|_| toolchain::PYTHON.to_string()),
            javac: env::var("JUDGE_JAVAC_BIN").unwrap_or_else(|_| toolchain::JAVAC.to_string()),
            java: env::var("JUDGE_JAVA_BIN").unwrap_or_else(|_| toolchain::JAVA.to_string()),
            gcc: env::var("JUDGE_GCC_BIN").unwrap_or_else(|_| toolchain::GCC.to_string()),
            gxx: env::var("JUDGE_GXX_BIN").unwrap_or_else(|_| toolchain::GXX.to_string()),
        }
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            node: toolchain::NODE.to_string(),
            python: toolchain::PYTHON.to_string(),
            javac: toolchain::JAVAC.to_string(),
            java: toolchain::JAVA.to_string(),
            gcc: toolchain::GCC.to_string(),
            gxx: toolchain::GXX.to_string(),
        }
    }
}

impl RemoteJudgeConfig {
    /// Returns `None` unless `JUDGE0_API_KEY` is set to a non-empty value.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(api_key) = env::var("JUDGE0_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
        else {
            return Ok(None);
        };

        Ok(Some(Self {
            api_key,
            api_url: env::var("JUDGE0_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| judge0::DEFAULT_API_URL.to_string()),
            api_host: env::var("JUDGE0_API_HOST")
                .unwrap_or_else(|_| judge0::DEFAULT_API_HOST.to_string()),
            poll_interval_ms: parse_or("JUDGE0_POLL_INTERVAL_MS", judge0::DEFAULT_POLL_INTERVAL_MS)?,
            max_poll_attempts: positive_or("JUDGE0_MAX_POLL_ATTEMPTS", judge0::DEFAULT_MAX_POLL_ATTEMPTS)?,
            max_cpu_time_limit_secs: positive_or(
                "JUDGE0_MAX_CPU_TIME_LIMIT_SECS",
                judge0::DEFAULT_MAX_CPU_TIME_LIMIT_SECS,
            )?,
            max_memory_limit_kb: positive_or("JUDGE0_MAX_MEMORY_LIMIT_KB", judge0::DEFAULT_MAX_MEMORY_LIMIT_KB)?,
        }))
    }
}

/// Read `key` and parse it, falling back to `default` when unset.
fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        Err(_) => Ok(default),
    }
}

/// Like [`parse_or`], rejecting zero.
fn positive_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    let value = parse_or(key, default)?;
    if value == T::default() {
        return Err(ConfigError::InvalidValue(key.to_string()));
    }
    Ok(value)
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }

    #[test]
    fn test_parse_or_falls_back_when_unset() {
        let value: u64 = parse_or("CODEARENA_TEST_SURELY_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_judge0_maximums_default_to_service_limits() {
        let cpu: f64 = positive_or(
            "CODEARENA_TEST_SURELY_UNSET_CPU_LIMIT",
            judge0::DEFAULT_MAX_CPU_TIME_LIMIT_SECS,
        )
        .unwrap();
        let memory: u64 = positive_or(
            "CODEARENA_TEST_SURELY_UNSET_MEMORY_LIMIT",
            judge0::DEFAULT_MAX_MEMORY_LIMIT_KB,
        )
        .unwrap();
        assert_eq!(cpu, 15.0);
        assert_eq!(memory, 512_000);
    }

    #[test]
    fn test_default_toolchain() {
        let toolchain = ToolchainConfig::default();
        assert_eq!(toolchain.python, "python3");
        assert_eq!(toolchain.gxx, "g++");
        assert_eq!(toolchain.java, "java");
    }
}
