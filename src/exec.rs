// ABOUTME: External command execution for the deckhand application
// ABOUTME: Builder-style subprocess runner with a hard timeout

use crate::errors::{DeckError, Result};
use log::debug;
use std::ffi::{OsStr, OsString};
use std::io::{self, Read};
use std::process::{Command, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Command builder for external process execution.
///
/// ```ignore
/// let output = Cmd::new("rsvg-convert")
///     .arg("--version")
///     .timeout(Duration::from_secs(5))
///     .run()?;
/// ```
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    timeout: Duration,
    capture: bool,
}

impl Cmd {
    /// Create a new command builder. Output is captured and the timeout is
    /// 30 seconds unless changed.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            args: Vec::new(),
            timeout: Duration::from_secs(30),
            capture: true,
        }
    }

    /// Add a single argument.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_owned()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Let the child write straight to this process's stdout and stderr,
    /// e.g. for package manager progress.
    pub fn inherit_output(mut self) -> Self {
        self.capture = false;
        self
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// Run to completion. The child is killed once the timeout elapses.
    ///
    /// Errors: `ToolNotFound` if the program cannot be found, `TimeoutError`
    /// on expiry, `CommandFailed` on a non-zero exit status.
    pub fn run(self) -> Result<Output> {
        let name = self.program_name();
        debug!("Running `{}` with args {:?}", name, self.args);

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).stdin(Stdio::null());
        if self.capture {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        }

        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DeckError::ToolNotFound(name.clone()),
            _ => DeckError::FileReadError(e),
        })?;

        // Drain the pipes while the child runs so a chatty child cannot block
        // on a full pipe buffer.
        let stdout_reader = child.stdout.take().map(drain);
        let stderr_reader = child.stderr.take().map(drain);

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                // The child may exit on its own between the check and the kill.
                let _ = child.kill();
                let _ = child.wait();
                return Err(DeckError::TimeoutError(format!(
                    "`{}` did not finish within {}s",
                    name,
                    self.timeout.as_secs()
                )));
            }
            thread::sleep(POLL_INTERVAL);
        };

        let output = Output {
            status,
            stdout: collect(stdout_reader)?,
            stderr: collect(stderr_reader)?,
        };
        if !output.status.success() {
            return Err(DeckError::CommandFailed {
                program: name,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }

    /// Run and return trimmed stdout.
    pub fn read_stdout(self) -> Result<String> {
        let output = self.run()?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn collect(reader: Option<JoinHandle<io::Result<Vec<u8>>>>) -> Result<Vec<u8>> {
    match reader {
        Some(handle) => handle
            .join()
            .map_err(|_| {
                DeckError::FileReadError(io::Error::new(
                    io::ErrorKind::Other,
                    "output reader panicked",
                ))
            })?
            .map_err(DeckError::from),
        None => Ok(Vec::new()),
    }
}
