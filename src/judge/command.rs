//! Process runner with a wall-clock limit
//!
//! Every local compile and run goes through [`run_command`]: one process per
//! call, stdin fed and closed, stdout/stderr captured, and a hard timeout after
//! which the process is killed and reaped before the call returns.
//!
//! On unix the process leads its own process group. Whatever it spawned is
//! killed with it, both on timeout and once the process itself has exited.

use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio::time::timeout;

use crate::constants::MAX_CAPTURED_OUTPUT_BYTES;
use crate::error::{JudgeError, JudgeResult};

/// A process invocation
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Written to the process's stdin, which is closed afterwards
    pub stdin: Option<String>,
    pub timeout_ms: u64,
    pub working_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout_ms: u64) -> Self {
        Self {
            program: program.into(),
            args,
            stdin: None,
            timeout_ms,
            working_dir: None,
        }
    }

    pub fn with_stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

/// Captured result of a process that exited with status 0
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub elapsed: Duration,
}

impl CommandOutput {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Run a process to completion.
///
/// Fails with [`JudgeError::Timeout`] when the process outlives
/// `spec.timeout_ms`, with [`JudgeError::Process`] on a non-zero exit and with
/// [`JudgeError::Spawn`] when the program cannot be started at all.
pub async fn run_command(spec: &CommandSpec) -> JudgeResult<CommandOutput> {
    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    #[cfg(unix)]
    command.process_group(0);
    if let Some(dir) = &spec.working_dir {
        command.current_dir(dir);
    }

    let start = Instant::now();
    let mut child = command.spawn().map_err(|source| JudgeError::Spawn {
        program: spec.program.clone(),
        source,
    })?;

    let group = child.id();
    let payload = spec.stdin.as_deref().unwrap_or_default().as_bytes();
    let limit = Duration::from_millis(spec.timeout_ms);
    let outcome = timeout(limit, drive(&mut child, group, payload)).await;

    let (status, stdout, stderr) = match outcome {
        Ok(result) => result?,
        Err(_) => {
            kill_process_group(group);
            // kill() also waits, so no zombie is left behind
            if let Err(e) = child.kill().await {
                tracing::warn!(program = %spec.program, error = %e, "Failed to kill timed out process");
            }
            tracing::debug!(
                program = %spec.program,
                timeout_ms = spec.timeout_ms,
                "Process killed after exceeding its time limit"
            );
            return Err(JudgeError::Timeout {
                limit_ms: spec.timeout_ms,
            });
        }
    };
    let elapsed = start.elapsed();

    let exit_code = exit_code(status);
    let stdout = String::from_utf8_lossy(&stdout).into_owned();
    let stderr = String::from_utf8_lossy(&stderr).into_owned();

    if !status.success() {
        let message = if stderr.trim().is_empty() {
            format!("Process exited with code {}", exit_code)
        } else {
            stderr.trim_end().to_string()
        };
        return Err(JudgeError::Process { exit_code, message });
    }

    Ok(CommandOutput {
        stdout,
        stderr,
        exit_code,
        elapsed,
    })
}

/// Feed stdin, drain both output pipes and wait for exit, all concurrently so
/// that neither side can block on a full pipe.
///
/// Once the process exits its group is killed, so a leftover descendant
/// holding the pipes open cannot stall the reads.
async fn drive(
    child: &mut Child,
    group: Option<u32>,
    payload: &[u8],
) -> io::Result<(ExitStatus, Vec<u8>, Vec<u8>)> {
    let stdin = child.stdin.take();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let feed = async move {
        if let Some(mut pipe) = stdin {
            if let Err(e) = pipe.write_all(payload).await {
                // the program is free to exit without reading its input
                if e.kind() != io::ErrorKind::BrokenPipe {
                    return Err(e);
                }
            }
            // dropping the handle closes the pipe and signals EOF
        }
        Ok(())
    };

    let collect_stdout = async move {
        let mut buf = Vec::new();
        if let Some(pipe) = stdout {
            pipe.take(MAX_CAPTURED_OUTPUT_BYTES).read_to_end(&mut buf).await?;
        }
        Ok::<_, io::Error>(buf)
    };

    let collect_stderr = async move {
        let mut buf = Vec::new();
        if let Some(pipe) = stderr {
            pipe.take(MAX_CAPTURED_OUTPUT_BYTES).read_to_end(&mut buf).await?;
        }
        Ok::<_, io::Error>(buf)
    };

    let exited = async {
        let status = child.wait().await;
        kill_process_group(group);
        status
    };

    let (fed, stdout, stderr, status) = tokio::join!(feed, collect_stdout, collect_stderr, exited);
    fed?;

    Ok((status?, stdout?, stderr?))
}

/// SIGKILL every process in the group led by `group`
#[cfg(unix)]
fn kill_process_group(group: Option<u32>) {
    use nix::errno::Errno;
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Some(pgid) = group.and_then(|id| i32::try_from(id).ok()) else {
        return;
    };
    match killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
        // ESRCH: the group is already gone
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(e) => tracing::warn!(pgid, error = %e, "Failed to kill process group"),
    }
}

#[cfg(not(unix))]
fn kill_process_group(_group: Option<u32>) {}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| -signal))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
