use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{CommandError, CommandResult};

/// Default timeout applied to every external invocation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// An external command with a working directory and an enforced timeout.
///
/// The child runs with piped stdout/stderr drained on reader threads, so a
/// chatty command cannot deadlock on a full pipe. When the deadline passes
/// the child is killed and the call returns [`CommandError::Timeout`] right
/// away, leaving the reader threads to run out on their own.
#[derive(Debug, Clone)]
pub struct GitCommand {
    program: String,
    args: Vec<String>,
    dir: Option<PathBuf>,
    timeout: Duration,
}

impl GitCommand {
    /// Create a command for the given program
    pub fn new(program: impl Into<String>) -> Self {
        GitCommand {
            program: program.into(),
            args: Vec::new(),
            dir: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Override the default timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the command and return its trimmed stdout
    pub fn run(&self) -> CommandResult<String> {
        let rendered = self.to_string();
        debug!(command = %rendered, "running external command");

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|source| CommandError::Spawn {
            command: rendered.clone(),
            source,
        })?;

        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        // descendants of the killed child can keep the pipe
                        // write ends open, so the readers are dropped, not
                        // joined
                        return Err(CommandError::Timeout {
                            command: rendered,
                            timeout: self.timeout,
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(CommandError::Spawn {
                        command: rendered,
                        source,
                    });
                }
            }
        };

        let stdout = join_output(stdout);
        let stderr = join_output(stderr);

        if !status.success() {
            return Err(CommandError::Failed {
                command: rendered,
                code: status.code(),
                stderr: stderr.trim().to_string(),
            });
        }
        Ok(stdout.trim().to_string())
    }
}

impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

fn drain(stream: impl Read + Send + 'static) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut stream = stream;
        let mut buffer = String::new();
        let _ = stream.read_to_string(&mut buffer);
        buffer
    })
}

fn join_output(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .map(|h| h.join().unwrap_or_default())
        .unwrap_or_default()
}
