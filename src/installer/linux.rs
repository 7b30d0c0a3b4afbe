//! apt-backed driver for Linux.
//!
//! apt is assumed to ship with the distribution; there is no bootstrap path.
//! Install refreshes the package index once up front, uninstall does not.

use super::command::{CommandRunner, SystemRunner};
use super::{InstallerError, PackageDriver, ProgressSink};
use crate::catalog::PackageSpec;
use crate::types::ProgressEvent;

pub struct AptDriver<R = SystemRunner> {
    runner: R,
}

impl AptDriver {
    pub fn new() -> Self {
        Self {
            runner: SystemRunner,
        }
    }
}

impl Default for AptDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> AptDriver<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    fn apt_available(&self) -> bool {
        matches!(self.runner.run("apt-get", &["--version"]), Ok(o) if o.success)
    }

    fn refresh_index(&self, report: ProgressSink) -> Result<(), InstallerError> {
        report(ProgressEvent::normal(0.0, "Updating package lists..."));
        match self.runner.run("sudo", &["apt-get", "update"]) {
            Ok(o) if o.success => Ok(()),
            Ok(o) => Err(InstallerError::IndexRefreshFailed(o.text)),
            Err(e) => Err(InstallerError::IndexRefreshFailed(e.to_string())),
        }
    }

    // apt_verb is the apt-get subcommand; verb and gerund are the
    // user-facing words ("uninstall"/"Uninstalling" for apt_verb "remove").
    fn run_batch(
        &self,
        packages: &[PackageSpec],
        apt_verb: &str,
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
            match self
                .runner
                .run("sudo", &["apt-get", apt_verb, "-y", &pkg.name])
            {
                Ok(o) if o.success => report(ProgressEvent::success(
                    done,
                    format!("Finished {} {}", gerund.to_lowercase(), pkg.name),
                )),
                Ok(o) => {
                    log::warn!("apt-get {apt_verb} {} failed", pkg.name);
                    report(ProgressEvent::error(
                        done,
                        format!("Failed to {verb} {}: {}", pkg.name, o.text.trim_end()),
                    ));
                }
                Err(e) => report(ProgressEvent::error(
                    done,
                    format!("Failed to run apt-get for {}: {e}", pkg.name),
                )),
            }
        }
        Ok(())
    }
}

impl<R: CommandRunner> PackageDriver for AptDriver<R> {
    fn install(&self, packages: &[PackageSpec], report: ProgressSink) -> Result<(), InstallerError> {
        if !self.apt_available() {
            return Err(InstallerError::ManagerMissing { manager: "apt" });
        }
        self.refresh_index(report)?;
        self.run_batch(packages, "install", "install", "Installing", report)
    }

    fn uninstall(
        &self,
        packages: &[PackageSpec],
        report: ProgressSink,
    ) -> Result<(), InstallerError> {
        if !self.apt_available() {
            return Err(InstallerError::ManagerMissing { manager: "apt" });
        }
        self.run_batch(packages, "remove", "uninstall", "Uninstalling", report)
    }
}

#[cfg(test)]
mod tests {
    use super::super::command::testing::ScriptRunner;
    use super::super::command::CmdOutput;
    use super::*;
    use crate::types::EventStatus;
    use std::io;

    fn batch(names: &[&str]) -> Vec<PackageSpec> {
        names.iter().map(|n| PackageSpec::formula(*n)).collect()
    }

    fn collect(
        run: impl FnOnce(&mut dyn FnMut(ProgressEvent)) -> Result<(), InstallerError>,
    ) -> (Vec<ProgressEvent>, Result<(), InstallerError>) {
        let mut events = Vec::new();
        let result = run(&mut |e| events.push(e));
        (events, result)
    }

    #[test]
    fn install_runs_probe_update_then_each_package() {
        let runner = ScriptRunner::new(vec![
            Ok(CmdOutput::ok()), // apt-get --version
            Ok(CmdOutput::ok()), // sudo apt-get update
            Ok(CmdOutput::ok()), // git
            Ok(CmdOutput::ok()), // htop
        ]);
        let driver = AptDriver::with_runner(runner);

        let (events, result) = collect(|r| driver.install(&batch(&["git", "htop"]), r));
        assert!(result.is_ok());
        assert_eq!(
            driver.runner.calls(),
            vec![
                "apt-get --version",
                "sudo apt-get update",
                "sudo apt-get install -y git",
                "sudo apt-get install -y htop",
            ]
        );

        // Updating + (Normal, Success) per package
        assert_eq!(events.len(), 5);
        assert_eq!(events[0], ProgressEvent::normal(0.0, "Updating package lists..."));
        assert_eq!(events[1], ProgressEvent::normal(0.0, "Installing git..."));
        assert_eq!(events[2], ProgressEvent::success(0.5, "Finished installing git"));
        assert_eq!(events[3], ProgressEvent::normal(0.5, "Installing htop..."));
        assert_eq!(events[4], ProgressEvent::success(1.0, "Finished installing htop"));
    }

    #[test]
    fn missing_apt_aborts_with_no_events() {
        let runner = ScriptRunner::new(vec![Ok(CmdOutput::failed("not found"))]);
        let driver = AptDriver::with_runner(runner);

        let (events, result) = collect(|r| driver.install(&batch(&["git"]), r));
        assert!(events.is_empty());
        assert!(matches!(
            result,
            Err(InstallerError::ManagerMissing { manager: "apt" })
        ));
        // probe only, the package was never attempted
        assert_eq!(driver.runner.calls(), vec!["apt-get --version"]);
    }

    #[test]
    fn missing_apt_aborts_uninstall_too() {
        let runner = ScriptRunner::new(vec![Err(io::Error::from(io::ErrorKind::NotFound))]);
        let driver = AptDriver::with_runner(runner);

        let (events, result) = collect(|r| driver.uninstall(&batch(&["git"]), r));
        assert!(events.is_empty());
        assert!(matches!(
            result,
            Err(InstallerError::ManagerMissing { manager: "apt" })
        ));
    }

    #[test]
    fn failed_index_refresh_aborts_the_batch() {
        let runner = ScriptRunner::new(vec![
            Ok(CmdOutput::ok()),
            Ok(CmdOutput::failed("mirror unreachable")),
        ]);
        let driver = AptDriver::with_runner(runner);

        let (events, result) = collect(|r| driver.install(&batch(&["git", "htop"]), r));
        assert_eq!(events.len(), 1, "only the refresh announcement");
        match result {
            Err(InstallerError::IndexRefreshFailed(detail)) => {
                assert_eq!(detail, "mirror unreachable")
            }
            other => panic!("expected IndexRefreshFailed, got {other:?}"),
        }
        assert_eq!(driver.runner.calls().len(), 2);
    }

    #[test]
    fn one_failure_does_not_stop_the_batch() {
        let runner = ScriptRunner::new(vec![
            Ok(CmdOutput::ok()),
            Ok(CmdOutput::ok()),
            Ok(CmdOutput::ok()),                        // a
            Ok(CmdOutput::failed("E: unable to locate")), // b
            Ok(CmdOutput::ok()),                        // c
        ]);
        let driver = AptDriver::with_runner(runner);

        let (events, result) = collect(|r| driver.install(&batch(&["a", "b", "c"]), r));
        assert!(result.is_ok(), "per-package failure is not a top-level error");

        let errors: Vec<_> = events
            .iter()
            .filter(|e| e.status == EventStatus::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].fraction, 2.0 / 3.0);
        assert!(errors[0].message.contains("Failed to install b"));
        assert!(errors[0].message.contains("unable to locate"));

        let successes: Vec<_> = events
            .iter()
            .filter(|e| e.status == EventStatus::Success)
            .collect();
        assert_eq!(successes.len(), 2);
        assert_eq!(events.last().unwrap().fraction, 1.0);
    }

    #[test]
    fn uninstall_skips_index_refresh_and_uses_remove() {
        let runner = ScriptRunner::new(vec![Ok(CmdOutput::ok()), Ok(CmdOutput::ok())]);
        let driver = AptDriver::with_runner(runner);

        let (events, result) = collect(|r| driver.uninstall(&batch(&["vlc"]), r));
        assert!(result.is_ok());
        assert_eq!(
            driver.runner.calls(),
            vec!["apt-get --version", "sudo apt-get remove -y vlc"]
        );
        assert_eq!(events[0], ProgressEvent::normal(0.0, "Uninstalling vlc..."));
        assert_eq!(
            events[1],
            ProgressEvent::success(1.0, "Finished uninstalling vlc")
        );
    }

    #[test]
    fn failed_removal_reports_the_uninstall_verb() {
        let runner = ScriptRunner::new(vec![
            Ok(CmdOutput::ok()),
            Ok(CmdOutput::failed("E: vlc is not installed")),
        ]);
        let driver = AptDriver::with_runner(runner);

        let (events, result) = collect(|r| driver.uninstall(&batch(&["vlc"]), r));
        assert!(result.is_ok());

        let error = events
            .iter()
            .find(|e| e.status == EventStatus::Error)
            .expect("removal failure must be reported");
        assert!(error.message.contains("Failed to uninstall vlc"));
        assert!(error.message.contains("is not installed"));
    }

    #[test]
    fn fractions_are_monotonic() {
        let runner = ScriptRunner::new(vec![
            Ok(CmdOutput::ok()),
            Ok(CmdOutput::ok()),
            Ok(CmdOutput::ok()),
            Ok(CmdOutput::failed("boom")),
            Ok(CmdOutput::ok()),
            Ok(CmdOutput::ok()),
        ]);
        let driver = AptDriver::with_runner(runner);

        let (events, _) = collect(|r| driver.install(&batch(&["a", "b", "c", "d"]), r));
        for pair in events.windows(2) {
            assert!(pair[0].fraction <= pair[1].fraction);
        }
    }
}
