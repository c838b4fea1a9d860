//! External command execution with a wall-clock timeout.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Exit status and captured, trimmed output of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> CommandOutput;
}

/// Runs real processes; a command still running after `timeout` is killed.
#[derive(Debug, Clone, Copy)]
pub struct SystemRunner {
    pub timeout: Duration,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

fn failure(stderr: impl Into<String>) -> CommandOutput {
    CommandOutput {
        success: false,
        stdout: String::new(),
        stderr: stderr.into(),
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> CommandOutput {
        tracing::debug!(program, ?args, "running command");
        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(c) => c,
            Err(e) => return failure(format!("failed to run {}: {}", program, e)),
        };

        // Both pipes are read while the child runs.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return failure("Command timed out");
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => return failure(e.to_string()),
            }
        };

        CommandOutput {
            success: status.success(),
            stdout: collect(stdout),
            stderr: collect(stderr),
        }
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn collect(reader: Option<JoinHandle<String>>) -> String {
    reader
        .and_then(|h| h.join().ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout() {
        let out = SystemRunner::default().run("sh", &["-c", "echo ' hello '"]);
        assert!(out.success);
        assert_eq!(out.stdout, "hello");
    }

    #[test]
    fn nonzero_exit_is_failure() {
        let out = SystemRunner::default().run("sh", &["-c", "echo oops >&2; exit 3"]);
        assert!(!out.success);
        assert_eq!(out.stderr, "oops");
    }

    #[test]
    fn missing_program_is_failure() {
        let out = SystemRunner::default().run("qsutil-definitely-not-a-program", &[]);
        assert!(!out.success);
        assert!(out.stderr.contains("failed to run"));
    }

    #[test]
    fn output_larger_than_pipe_buffer_is_captured() {
        let runner = SystemRunner {
            timeout: Duration::from_secs(5),
        };
        let out = runner.run("sh", &["-c", "head -c 200000 /dev/zero | tr '\\0' a"]);
        assert!(out.success, "{}", out.stderr);
        assert_eq!(out.stdout.len(), 200_000);
        assert!(out.stdout.bytes().all(|b| b == b'a'));
    }

    #[test]
    fn timeout_kills_command() {
        let runner = SystemRunner {
            timeout: Duration::from_millis(100),
        };
        let out = runner.run("sleep", &["5"]);
        assert!(!out.success);
        assert_eq!(out.stderr, "Command timed out");
    }
}
