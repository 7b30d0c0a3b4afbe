//! Subprocess seam for the platform drivers.
//!
//! Drivers never talk to `std::process` directly; they go through
//! [`CommandRunner`] so tests can script every invocation outcome.

use std::io;
use std::process::Command;

/// Outcome of one external command: exit success plus combined output.
#[derive(Clone, Debug)]
pub struct CmdOutput {
    pub success: bool,
    pub text: String,
}

impl CmdOutput {
    pub fn ok() -> Self {
        Self {
            success: true,
            text: String::new(),
        }
    }

    pub fn failed(text: impl Into<String>) -> Self {
        Self {
            success: false,
            text: text.into(),
        }
    }
}

/// Runs one external command to completion and captures its output.
///
/// `Err` means the command could not be spawned at all; a command that ran
/// and exited non-zero is `Ok` with `success == false`.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CmdOutput>;
}

/// The real runner backed by `std::process::Command`.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CmdOutput> {
        log::debug!("running: {} {}", program, args.join(" "));
        let output = Command::new(program).args(args).output()?;

        // stdout and stderr interleaving is lost, but package managers put
        // the interesting part in stderr and the noise in stdout.
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&stderr);
        }

        Ok(CmdOutput {
            success: output.status.success(),
            text,
        })
    }
}
