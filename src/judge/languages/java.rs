//! Java language handler
//!
//! The class to run is detected from the code before anything is written:
//! the public top-level type if there is one (javac requires the file to be
//! named after it), otherwise the class declaring `main`, otherwise `Main`.
//! The source file is named after that class.

use std::sync::LazyLock;

use regex::Regex;

use super::{path_arg, Invocation, SourceArtifact};
use crate::config::ToolchainConfig;
use crate::constants::file_extensions;
use crate::error::{JudgeError, JudgeResult};

pub const EXTENSION: &str = file_extensions::JAVA;

const DEFAULT_ENTRY_CLASS: &str = "Main";

/// Comments, string and char literals
static NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)/\*.*?\*/|//[^\n]*|"(?:\\.|[^"\\\n])*"|'(?:\\.|[^'\\\n])*'"#)
        .expect("noise pattern is valid")
});

static PUBLIC_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\bpublic\s+(?:(?:final|abstract|strictfp|sealed|non-sealed)\s+)*(?:class|interface|enum|record)\s+([A-Za-z_$][A-Za-z0-9_$]*)",
    )
    .expect("public type pattern is valid")
});

static CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bclass\s+([A-Za-z_$][A-Za-z0-9_$]*)").expect("class pattern is valid")
});

static MAIN_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:public\s+static|static\s+public)\s+(?:final\s+)?void\s+main\s*\(")
        .expect("main method pattern is valid")
});

/// Name of the class that holds `main`
pub fn entry_class(code: &str) -> String {
    let code = NOISE.replace_all(code, " ");

    if let Some(caps) = PUBLIC_TYPE.captures(&code) {
        return caps[1].to_string();
    }

    MAIN_METHOD
        .find(&code)
        .and_then(|main| {
            CLASS
                .captures_iter(&code[..main.start()])
                .last()
                .map(|caps| caps[1].to_string())
        })
        .unwrap_or_else(|| DEFAULT_ENTRY_CLASS.to_string())
}

/// `javac -encoding UTF-8 -d <dir> Main.java`
pub fn compile(toolchain: &ToolchainConfig, artifact: &SourceArtifact) -> Invocation {
    (
        toolchain.javac.clone(),
        vec![
            "-encoding".to_string(),
            "UTF-8".to_string(),
            "-d".to_string(),
            path_arg(artifact.dir()),
            path_arg(artifact.source_path()),
        ],
    )
}

/// `java -cp <dir> Main`
pub fn run(toolchain: &ToolchainConfig, artifact: &SourceArtifact) -> JudgeResult<Invocation> {
    let class = artifact
        .entry_class()
        .ok_or_else(|| JudgeError::Compilation("no compiled Java class to run".to_string()))?;

    Ok((
        toolchain.java.clone(),
        vec![
            "-cp".to_string(),
            path_arg(artifact.dir()),
            class.to_string(),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::languages::test_support::toolchain_available;
    use crate::judge::languages::LanguageAdapter;
    use crate::models::SupportedLanguage;

    #[test]
    fn test_entry_class_detection() {
        assert_eq!(entry_class("public class Solution {\n}"), "Solution");
        assert_eq!(entry_class("import java.util.*;\n\npublic final class Fast {}"), "Fast");
        assert_eq!(entry_class("class Helper {}\npublic class Main2 {}"), "Main2");
        assert_eq!(entry_class("class OnlyPackagePrivate {}"), "Main");
        // mentions inside literals and comments do not count
        assert_eq!(entry_class("class A { String s = \"public class X\"; }"), "Main");
        assert_eq!(entry_class("// public class Old\n/* public class Older */ class B {}"), "Main");
    }

    #[test]
    fn test_public_class_on_one_line() {
        let code = "import java.util.*; public class Sol { public static void main(String[] a) {} }";
        assert_eq!(entry_class(code), "Sol");
    }

    #[test]
    fn test_package_private_class_with_main() {
        let code = "import java.util.Scanner;\n\nclass Solution {\n    public static void main(String[] args) {}\n}\n";
        assert_eq!(entry_class(code), "Solution");

        let code = "class Helper { int x; }\nclass Runner {\n    static public void main(String... args) {}\n}\n";
        assert_eq!(entry_class(code), "Runner");
    }

    #[tokio::test]
    async fn test_compile_and_run_command() {
        let toolchain = ToolchainConfig::default();
        if !toolchain_available(&toolchain.javac) {
            eprintln!("skipping: {} not available", toolchain.javac);
            return;
        }
        let workspace = tempfile::tempdir().unwrap();
        let adapter = LanguageAdapter::new(SupportedLanguage::Java, &toolchain);
        let code = "public class Echo { public static void main(String[] a) { System.out.println(1); } }";

        let artifact = adapter.prepare(code, workspace.path(), 60_000).await.unwrap();
        assert!(artifact.dir().join("Echo.class").exists());

        let (program, args) = adapter.run_command(&artifact).unwrap();
        assert_eq!(program, "java");
        assert_eq!(args.last().map(String::as_str), Some("Echo"));
    }
}
