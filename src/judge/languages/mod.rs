//! Language-specific handlers for compilation and execution
//!
//! Each language module knows its file extension, how to compile (if at all)
//! and how to run the prepared artifact. [`LanguageAdapter`] dispatches to
//! them with an exhaustive match, so adding a [`SupportedLanguage`] variant
//! fails to build until every step is covered.

pub mod c;
pub mod cpp;
pub mod java;
pub mod javascript;
pub mod python;

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::fs;

use crate::config::ToolchainConfig;
use crate::error::{JudgeError, JudgeResult};
use crate::judge::command::{run_command, CommandSpec};
use crate::models::SupportedLanguage;

/// A program invocation: executable plus arguments
pub type Invocation = (String, Vec<String>);

/// Source code materialized on disk, plus whatever compilation produced.
///
/// Owns a scratch directory that is removed when the artifact is closed or
/// dropped, whichever comes first.
#[derive(Debug)]
pub struct SourceArtifact {
    dir: TempDir,
    source_path: PathBuf,
    /// Compiled native binary, for C and C++
    executable_path: Option<PathBuf>,
    /// Class holding `main`, for Java
    entry_class: Option<String>,
}

impl SourceArtifact {
    /// Scratch directory holding every file of this artifact
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn executable_path(&self) -> Option<&Path> {
        self.executable_path.as_deref()
    }

    pub fn entry_class(&self) -> Option<&str> {
        self.entry_class.as_deref()
    }

    /// Remove the scratch directory and everything in it
    pub fn close(self) -> io::Result<()> {
        self.dir.close()
    }
}

/// Per-language strategy for preparing and running submitted code
#[derive(Debug, Clone)]
pub struct LanguageAdapter<'a> {
    language: SupportedLanguage,
    toolchain: &'a ToolchainConfig,
}

impl<'a> LanguageAdapter<'a> {
    /// Get the adapter for a language identifier.
    ///
    /// Fails with [`JudgeError::UnsupportedLanguage`] before touching the
    /// filesystem.
    pub fn for_language(language: &str, toolchain: &'a ToolchainConfig) -> JudgeResult<Self> {
        Ok(Self::new(language.parse()?, toolchain))
    }

    pub fn new(language: SupportedLanguage, toolchain: &'a ToolchainConfig) -> Self {
        Self { language, toolchain }
    }

    pub fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Name of the source file written for `code`
    pub fn source_file_name(&self, code: &str) -> String {
        match self.language {
            SupportedLanguage::Javascript => format!("solution.{}", javascript::EXTENSION),
            SupportedLanguage::Python => format!("solution.{}", python::EXTENSION),
            SupportedLanguage::Java => format!("{}.{}", java::entry_class(code), java::EXTENSION),
            SupportedLanguage::Cpp => format!("solution.{}", cpp::EXTENSION),
            SupportedLanguage::C => format!("solution.{}", c::EXTENSION),
        }
    }

    /// Write `code` into a fresh scratch directory under `workspace` and
    /// compile it when the language needs it.
    ///
    /// A compiler that rejects the source, or runs past `compile_timeout_ms`,
    /// yields [`JudgeError::Compilation`]. The scratch directory is released
    /// on every failure path.
    pub async fn prepare(
        &self,
        code: &str,
        workspace: &Path,
        compile_timeout_ms: u64,
    ) -> JudgeResult<SourceArtifact> {
        let dir = tempfile::Builder::new()
            .prefix(&format!(
                "{}_{}_",
                self.language,
                chrono::Utc::now().timestamp_millis()
            ))
            .tempdir_in(workspace)?;

        let source_path = dir.path().join(self.source_file_name(code));
        fs::write(&source_path, code).await?;

        let mut artifact = SourceArtifact {
            dir,
            source_path,
            executable_path: None,
            entry_class: None,
        };

        let compile = match self.language {
            SupportedLanguage::Javascript | SupportedLanguage::Python => None,
            SupportedLanguage::Java => {
                artifact.entry_class = Some(java::entry_class(code));
                Some(java::compile(self.toolchain, &artifact))
            }
            SupportedLanguage::Cpp => {
                artifact.executable_path = Some(artifact.dir().join(cpp::BINARY_NAME));
                Some(cpp::compile(self.toolchain, &artifact))
            }
            SupportedLanguage::C => {
                artifact.executable_path = Some(artifact.dir().join(c::BINARY_NAME));
                Some(c::compile(self.toolchain, &artifact))
            }
        };

        if let Some((program, args)) = compile {
            tracing::debug!(language = %self.language, program = %program, "Compiling submission");
            let spec = CommandSpec::new(program, args, compile_timeout_ms).current_dir(artifact.dir());
            match run_command(&spec).await {
                Ok(_) => {}
                Err(JudgeError::Process { message, .. }) => {
                    return Err(JudgeError::Compilation(message));
                }
                Err(JudgeError::Timeout { limit_ms }) => {
                    return Err(JudgeError::Compilation(format!(
                        "Compilation timed out after {}ms",
                        limit_ms
                    )));
                }
                Err(other) => return Err(other),
            }
        }

        Ok(artifact)
    }

    /// How to execute a prepared artifact
    pub fn run_command(&self, artifact: &SourceArtifact) -> JudgeResult<Invocation> {
        match self.language {
            SupportedLanguage::Javascript => Ok(javascript::run(self.toolchain, artifact)),
            SupportedLanguage::Python => Ok(python::run(self.toolchain, artifact)),
            SupportedLanguage::Java => java::run(self.toolchain, artifact),
            SupportedLanguage::Cpp | SupportedLanguage::C => native_run(artifact),
        }
    }
}

/// Native binaries are executed directly
fn native_run(artifact: &SourceArtifact) -> JudgeResult<Invocation> {
    let binary = artifact.executable_path().ok_or_else(|| {
        JudgeError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            "artifact has no compiled binary",
        ))
    })?;
    Ok((binary.to_string_lossy().into_owned(), Vec::new()))
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::process::{Command, Stdio};

    /// Whether a toolchain binary can be started at all
    pub fn toolchain_available(program: &str) -> bool {
        Command::new(program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}
