//! C language handler

use super::{path_arg, Invocation, SourceArtifact};
use crate::config::ToolchainConfig;
use crate::constants::file_extensions;

pub const EXTENSION: &str = file_extensions::C;

pub const BINARY_NAME: &str = "solution";

/// `gcc -O2 -o solution solution.c -lm`
pub fn compile(toolchain: &ToolchainConfig, artifact: &SourceArtifact) -> Invocation {
    let binary = artifact.dir().join(BINARY_NAME);
    (
        toolchain.gcc.clone(),
        vec![
            "-O2".to_string(),
            "-o".to_string(),
            path_arg(&binary),
            path_arg(artifact.source_path()),
            // libm is linked last so math calls resolve
            "-lm".to_string(),
        ],
    )
}
