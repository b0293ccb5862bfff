//! C++ language handler

use super::{path_arg, Invocation, SourceArtifact};
use crate::config::ToolchainConfig;
use crate::constants::file_extensions;

pub const EXTENSION: &str = file_extensions::CPP;

pub const BINARY_NAME: &str = "solution";

/// `g++ -O2 -std=c++17 -o solution solution.cpp`
pub fn compile(toolchain: &ToolchainConfig, artifact: &SourceArtifact) -> Invocation {
    let binary = artifact.dir().join(BINARY_NAME);
    (
        toolchain.gxx.clone(),
        vec![
            "-O2".to_string(),
            "-std=c++17".to_string(),
            "-o".to_string(),
            path_arg(&binary),
            path_arg(artifact.source_path()),
        ],
    )
}
