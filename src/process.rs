//! Line-oriented pipes to a child process.
//!
//! A [`ProcessChannel`] owns exactly one child together with its stdin and
//! stdout pipes. The child's stderr is inherited so engine diagnostics reach
//! the operator's terminal untouched. Platform differences in pipe creation
//! and process start are left to `std::process`.
//!
//! The channel is always torn down: either explicitly through
//! [`ProcessChannel::terminate_and_wait`] or implicitly when it is dropped,
//! so an early return or panic while talking to an engine never leaks a
//! process or a pipe.

use std::io::{self, BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use log::{debug, trace};

use crate::error::ChannelError;

/// A running child process with buffered line I/O.
#[derive(Debug)]
pub struct ProcessChannel {
    command: String,
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: Option<BufReader<ChildStdout>>,
    reaped: bool,
}

impl ProcessChannel {
    /// Start `program` with `args`, stdin and stdout redirected to pipes.
    pub fn spawn(program: &str, args: &[String]) -> Result<Self, ChannelError> {
        let command = describe(program, args);
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ChannelError::Spawn {
                command: command.clone(),
                source,
            })?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take().map(BufReader::new);
        if stdin.is_none() || stdout.is_none() {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ChannelError::Spawn {
                command,
                source: io::Error::new(io::ErrorKind::BrokenPipe, "child pipes unavailable"),
            });
        }

        debug!("spawned `{command}` (pid {})", child.id());
        Ok(ProcessChannel {
            command,
            child,
            stdin,
            stdout,
            reaped: false,
        })
    }

    /// The command line this channel was started with.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// True while the child has not been reaped and its input is still open.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.reaped && self.stdin.is_some()
    }

    /// Write `text` followed by a newline and flush.
    pub fn write_line(&mut self, text: &str) -> Result<(), ChannelError> {
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(ChannelError::Write {
                command: self.command.clone(),
            });
        };

        let result = stdin
            .write_all(text.as_bytes())
            .and_then(|()| stdin.write_all(b"\n"))
            .and_then(|()| stdin.flush());

        match result {
            Ok(()) => {
                trace!("> {text}");
                Ok(())
            }
            Err(e) => {
                debug!("write to `{}` failed: {e}", self.command);
                self.stdin = None;
                Err(ChannelError::Write {
                    command: self.command.clone(),
                })
            }
        }
    }

    /// Close the child's stdin so it sees end-of-input.
    pub fn close_input(&mut self) {
        self.stdin = None;
    }

    /// Block until a full line is available.
    ///
    /// Returns `None` at end-of-stream. The trailing `\n` (and a `\r` before
    /// it) is stripped; a final unterminated line is still returned. Read
    /// errors count as end-of-stream.
    pub fn read_line(&mut self) -> Option<String> {
        let reader = self.stdout.as_mut()?;
        let mut buf = Vec::new();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                let line = String::from_utf8_lossy(&buf).into_owned();
                trace!("< {line}");
                Some(line)
            }
            Err(e) => {
                debug!("read from `{}` failed, treating as EOF: {e}", self.command);
                self.stdout = None;
                None
            }
        }
    }

    /// Kill the child if it is still running, reap it and close both pipes.
    ///
    /// Safe to call any number of times.
    pub fn terminate_and_wait(&mut self) {
        if self.reaped {
            return;
        }
        self.stdin = None;

        match self.child.try_wait() {
            Ok(Some(status)) => debug!("`{}` already exited with {status}", self.command),
            _ => {
                if let Err(e) = self.child.kill() {
                    debug!("kill `{}`: {e}", self.command);
                }
            }
        }
        match self.child.wait() {
            Ok(status) => debug!("reaped `{}` ({status})", self.command),
            Err(e) => debug!("wait for `{}` failed: {e}", self.command),
        }

        self.stdout = None;
        self.reaped = true;
    }
}

impl Drop for ProcessChannel {
    fn drop(&mut self) {
        self.terminate_and_wait();
    }
}

fn describe(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
