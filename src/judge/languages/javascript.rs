//! JavaScript (Node.js) language handler

use super::{path_arg, Invocation, SourceArtifact};
use crate::config::ToolchainConfig;
use crate::constants::file_extensions;

pub const EXTENSION: &str = file_extensions::JAVASCRIPT;

/// `node solution.js`
pub fn run(toolchain: &ToolchainConfig, artifact: &SourceArtifact) -> Invocation {
    (toolchain.node.clone(), vec![path_arg(artifact.source_path())])
}
