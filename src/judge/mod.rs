//! Judging engine
//!
//! Two interchangeable backends turn a [`JudgeRequest`] into a [`Verdict`]:
//!
//! 1. **Local judge** (`local.rs`): compiles and runs the code on this host
//!    through the language adapters and the process runner.
//!
//! 2. **Remote judge** (`remote.rs`): hands every test case to a Judge0
//!    instance over HTTP and polls for the outcome.
//!
//! Judging outcomes (wrong answer, time limit, compiler errors, ...) always
//! come back as a verdict. `Err` is reserved for infrastructure failures.

pub mod command;
pub mod languages;
pub mod local;
pub mod remote;

use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::JudgeResult;
use crate::models::{JudgeRequest, Verdict};

pub use command::{run_command, CommandOutput, CommandSpec};
pub use languages::{LanguageAdapter, SourceArtifact};
pub use local::LocalJudge;
pub use remote::RemoteJudgeClient;

/// Which backend executes submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JudgeMode {
    Local,
    Remote,
}

impl std::fmt::Display for JudgeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// A strategy that can judge one submission
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JudgeBackend: Send + Sync {
    fn mode(&self) -> JudgeMode;

    /// Judge `request` against all of its test cases
    async fn execute(&self, request: &JudgeRequest) -> JudgeResult<Verdict>;
}

/// Create the judge workspace directory if it does not exist yet.
///
/// Called once by the hosting process before any submission is judged.
pub async fn init_workspace(path: &Path) -> std::io::Result<()> {
    tokio::fs::create_dir_all(path).await?;
    tracing::info!(path = %path.display(), "Judge workspace ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_workspace_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let workspace = root.path().join("nested").join("judge");
        init_workspace(&workspace).await.unwrap();
        init_workspace(&workspace).await.unwrap();
        assert!(workspace.is_dir());
    }

    #[test]
    fn test_mode_serialization() {
        assert_eq!(serde_json::to_string(&JudgeMode::Remote).unwrap(), "\"remote\"");
        assert_eq!(JudgeMode::Local.to_string(), "local");
    }
}
