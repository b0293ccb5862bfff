//! Python language handler

use super::{path_arg, Invocation, SourceArtifact};
use crate::config::ToolchainConfig;
use crate::constants::file_extensions;

pub const EXTENSION: &str = file_extensions::PYTHON;

/// `python3 solution.py`
pub fn run(toolchain: &ToolchainConfig, artifact: &SourceArtifact) -> Invocation {
    (toolchain.python.clone(), vec![path_arg(artifact.source_path())])
}
