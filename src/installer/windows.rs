//! Chocolatey-backed driver for Windows.
//!
//! Missing Chocolatey is bootstrapped on install via the official PowerShell
//! install script; uninstalling without it present is fatal.

use super::command::{CommandRunner, SystemRunner};
use super::{InstallerError, PackageDriver, ProgressSink};
use crate::catalog::PackageSpec;
use crate::types::ProgressEvent;

const CHOCO_BOOTSTRAP: &str = "Set-ExecutionPolicy Bypass -Scope Process -Force; \
     [System.Net.ServicePointManager]::SecurityProtocol = \
     [System.Net.ServicePointManager]::SecurityProtocol -bor 3072; \
     iex ((New-Object System.Net.WebClient).DownloadString('https://chocolatey.org/install.ps1'))";

pub struct ChocoDriver<R = SystemRunner> {
    runner: R,
}

impl ChocoDriver {
    pub fn new() -> Self {
        Self {
            runner: SystemRunner,
        }
    }
}

impl Default for ChocoDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> ChocoDriver<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    fn choco_available(&self) -> bool {
        matches!(self.runner.run("choco", &["--version"]), Ok(o) if o.success)
    }

    fn bootstrap(&self, report: ProgressSink) -> Result<(), InstallerError> {
        report(ProgressEvent::normal(
            0.0,
            "Chocolatey not found. Installing Chocolatey...",
        ));
        let outcome = self
            .runner
            .run("powershell", &["-Command", CHOCO_BOOTSTRAP]);
        match outcome {
            Ok(o) if o.success => {
                report(ProgressEvent::success(
                    0.0,
                    "Chocolatey installed successfully.",
                ));
                Ok(())
            }
            Ok(o) => Err(InstallerError::BootstrapFailed {
                manager: "Chocolatey",
                detail: o.text,
            }),
            Err(e) => Err(InstallerError::BootstrapFailed {
                manager: "Chocolatey",
                detail: e.to_string(),
            }),
        }
    }

    fn run_batch(
        &self,
        packages: &[PackageSpec],
        verb: &str,
        gerund: &str,
        report: ProgressSink,
    ) -> Result<(), InstallerError> {
        let total = packages.len().max(1) as f32;
        for (i, pkg) in packages.iter().enumerate() {
            report(ProgressEvent::normal(
                i as f32 / total,
                format!("{gerund} {}...", pkg.name),
            ));

            let done = (i + 1) as f32 / total;
            match self.runner.run("choco", &[verb, &pkg.name, "-y"]) {
                Ok(o) if o.success => report(ProgressEvent::success(
                    done,
                    format!("Finished {} {}", gerund.to_lowercase(), pkg.name),
                )),
                Ok(o) => {
                    log::warn!("choco {verb} {} failed", pkg.name);
                    report(ProgressEvent::error(
                        done,
                        format!("Failed to {verb} {}: {}", pkg.name, o.text.trim_end()),
                    ));
                }
                Err(e) => report(ProgressEvent::error(
                    done,
                    format!("Failed to run choco for {}: {e}", pkg.name),
                )),
            }
        }
        Ok(())
    }
}

impl<R: CommandRunner> PackageDriver for ChocoDriver<R> {
    fn install(&self, packages: &[PackageSpec], report: ProgressSink) -> Result<(), InstallerError> {
        if !self.choco_available() {
            self.bootstrap(report)?;
        }
        self.run_batch(packages, "install", "Installing", report)
    }

    fn uninstall(
        &self,
        packages: &[PackageSpec],
        report: ProgressSink,
    ) -> Result<(), InstallerError> {
        if !self.choco_available() {
            return Err(InstallerError::ManagerMissing {
                manager: "Chocolatey",
            });
        }
        self.run_batch(packages, "uninstall", "Uninstalling", report)
    }
}
