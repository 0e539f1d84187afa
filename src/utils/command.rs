//! Command execution utilities

use crate::error::CommandError;
use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default per-command timeout. `system_profiler` can take several seconds on
/// a cold cache, so this is generous.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs a diagnostic command and returns its standard output.
///
/// Collectors depend only on this trait, so tests can hand them canned output.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError>;
}

/// Spawns real processes, one at a time, each bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    timeout: Duration,
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl SystemCommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        debug!(program, ?args, "running command");

        // The C locale keeps decimal points and thousands separators stable
        let mut child = Command::new(program)
            .args(args)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| spawn_error(program, err))?;

        // Drain both pipes while waiting; system_profiler output easily
        // exceeds the pipe buffer and would otherwise block the child.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let start = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if start.elapsed() >= self.timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(CommandError::Timeout {
                            program: program.to_string(),
                            timeout: self.timeout,
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(CommandError::Io {
                        program: program.to_string(),
                        source,
                    });
                }
            }
        };

        let stdout = stdout.join().unwrap_or_default();
        let stderr = String::from_utf8_lossy(&stderr.join().unwrap_or_default()).into_owned();

        if status.success() {
            Ok(String::from_utf8_lossy(&stdout).into_owned())
        } else {
            Err(classify_failure(program, status.code(), stderr))
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        buffer
    })
}

fn spawn_error(program: &str, err: io::Error) -> CommandError {
    match err.kind() {
        io::ErrorKind::NotFound => CommandError::NotFound(program.to_string()),
        io::ErrorKind::PermissionDenied => CommandError::PermissionDenied(program.to_string()),
        _ => CommandError::Io {
            program: program.to_string(),
            source: err,
        },
    }
}

/// Map a non-zero exit to the failure taxonomy.
pub(crate) fn classify_failure(program: &str, code: Option<i32>, stderr: String) -> CommandError {
    let lowered = stderr.to_lowercase();
    if code == Some(126)
        || lowered.contains("permission denied")
        || lowered.contains("operation not permitted")
        || lowered.contains("must be run as root")
    {
        CommandError::PermissionDenied(program.to_string())
    } else if code == Some(127) {
        CommandError::NotFound(program.to_string())
    } else {
        CommandError::NonZeroExit {
            program: program.to_string(),
            code,
            stderr,
        }
    }
}

/// Whether the current process runs with root privileges.
pub fn is_elevated() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

/// Whether standard output is attached to a terminal.
pub fn stdout_is_tty() -> bool {
    // SAFETY: isatty only inspects the descriptor.
    unsafe { libc::isatty(libc::STDOUT_FILENO) == 1 }
}
