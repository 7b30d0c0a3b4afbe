//! Homebrew-backed driver for macOS.
//!
//! Missing Homebrew is bootstrapped on install via the official install
//! script. Uninstalling without Homebrew present is fatal instead; there is
//! nothing to uninstall with. GUI apps are casks and need the `--cask`
//! command form, which is resolved from the catalog-provided packaging kind.

use super::command::{CommandRunner, SystemRunner};
use super::{InstallerError, PackageDriver, ProgressSink};
use crate::catalog::{PackageKind, PackageSpec};
use crate::types::ProgressEvent;

const BREW_BOOTSTRAP: &str =
    r#""$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)""#;

pub struct BrewDriver<R = SystemRunner> {
    runner: R,
}

impl BrewDriver {
    pub fn new() -> Self {
        Self {
            runner: SystemRunner,
        }
    }
}

impl Default for BrewDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> BrewDriver<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    fn brew_available(&self) -> bool {
        matches!(self.runner.run("brew", &["--version"]), Ok(o) if o.success)
    }

    fn bootstrap(&self, report: ProgressSink) -> Result<(), InstallerError> {
        report(ProgressEvent::normal(
            0.0,
            "Homebrew not found. Installing Homebrew...",
        ));
        let outcome = self.runner.run("/bin/bash", &["-c", BREW_BOOTSTRAP]);
        match outcome {
            Ok(o) if o.success => {
                report(ProgressEvent::success(0.0, "Homebrew installed successfully."));
                Ok(())
            }
            Ok(o) => Err(InstallerError::BootstrapFailed {
                manager: "Homebrew",
                detail: o.text,
            }),
            Err(e) => Err(InstallerError::BootstrapFailed {
                manager: "Homebrew",
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

            let mut args = vec![verb];
            if pkg.kind == PackageKind::Cask {
                args.push("--cask");
            }
            args.push(&pkg.name);

            let done = (i + 1) as f32 / total;
            match self.runner.run("brew", &args) {
                Ok(o) if o.success => report(ProgressEvent::success(
                    done,
                    format!("Finished {} {}", gerund.to_lowercase(), pkg.name),
                )),
                Ok(o) => {
                    log::warn!("brew {verb} {} failed", pkg.name);
                    report(ProgressEvent::error(
                        done,
                        format!("Failed to {verb} {}: {}", pkg.name, o.text.trim_end()),
                    ));
                }
                Err(e) => report(ProgressEvent::error(
                    done,
                    format!("Failed to run brew for {}: {e}", pkg.name),
                )),
            }
        }
        Ok(())
    }
}

impl<R: CommandRunner> PackageDriver for BrewDriver<R> {
    fn install(&self, packages: &[PackageSpec], report: ProgressSink) -> Result<(), InstallerError> {
        if !self.brew_available() {
            self.bootstrap(report)?;
        }
        self.run_batch(packages, "install", "Installing", report)
    }

    fn uninstall(
        &self,
        packages: &[PackageSpec],
        report: ProgressSink,
    ) -> Result<(), InstallerError> {
        if !self.brew_available() {
            return Err(InstallerError::ManagerMissing { manager: "Homebrew" });
        }
        self.run_batch(packages, "uninstall", "Uninstalling", report)
    }
}
