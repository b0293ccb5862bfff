//! Supported submission languages

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{judge0::language_ids, languages};
use crate::error::JudgeError;

/// Languages a submission may be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    Javascript,
    Python,
    Java,
    Cpp,
    C,
}

/// How a language gets from source code to a running process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionModel {
    /// Source is handed straight to an interpreter
    Interpreted,
    /// Source is compiled to a native binary
    CompiledNative,
    /// Source is compiled to bytecode run by a VM
    CompiledBytecode,
}

impl SupportedLanguage {
    /// All supported languages
    pub const ALL: [SupportedLanguage; 5] = [
        Self::Javascript,
        Self::Python,
        Self::Java,
        Self::Cpp,
        Self::C,
    ];

    /// Get language identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Javascript => languages::JAVASCRIPT,
            Self::Python => languages::PYTHON,
            Self::Java => languages::JAVA,
            Self::Cpp => languages::CPP,
            Self::C => languages::C,
        }
    }

    pub fn execution_model(&self) -> ExecutionModel {
        match self {
            Self::Javascript | Self::Python => ExecutionModel::Interpreted,
            Self::Cpp | Self::C => ExecutionModel::CompiledNative,
            Self::Java => ExecutionModel::CompiledBytecode,
        }
    }

    /// Language id used by the Judge0 API
    pub fn judge0_id(&self) -> u32 {
        match self {
            Self::Javascript => language_ids::JAVASCRIPT,
            Self::Python => language_ids::PYTHON,
            Self::Java => language_ids::JAVA,
            Self::Cpp => language_ids::CPP,
            Self::C => language_ids::C,
        }
    }
}

impl FromStr for SupportedLanguage {
    type Err = JudgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            languages::JAVASCRIPT => Ok(Self::Javascript),
            languages::PYTHON => Ok(Self::Python),
            languages::JAVA => Ok(Self::Java),
            languages::CPP => Ok(Self::Cpp),
            languages::C => Ok(Self::C),
            other => Err(JudgeError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl std::fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
