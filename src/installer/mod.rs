//! Installation orchestration: maps an app selection to package-manager
//! invocations on the host OS and streams progress back through a callback.
//!
//! The orchestrator picks exactly one platform driver and hands it the whole
//! batch; the driver owns the per-package loop and normalizes fractions to
//! the batch size. Events pass through to the caller unmodified, on the same
//! call stack, in input order.

use thiserror::Error;

use crate::catalog::PackageSpec;
use crate::types::ProgressEvent;

pub mod command;
mod linux;
mod macos;
mod windows;

pub use linux::AptDriver;
pub use macos::BrewDriver;
pub use windows::ChocoDriver;

/// Batch-aborting failures. Per-package failures are never surfaced here;
/// they arrive only as `Error`-status progress events.
#[derive(Debug, Error)]
pub enum InstallerError {
    #[error("unsupported operating system: {0}")]
    UnsupportedOs(String),

    #[error("{manager} package manager not found")]
    ManagerMissing { manager: &'static str },

    #[error("failed to install {manager}: {detail}")]
    BootstrapFailed {
        manager: &'static str,
        detail: String,
    },

    #[error("failed to update package lists: {0}")]
    IndexRefreshFailed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Progress sink for one batch. Fired synchronously after every sub-step.
pub type ProgressSink<'a> = &'a mut dyn FnMut(ProgressEvent);

/// Executes package-manager operations for a batch on one concrete OS.
///
/// A single package failing is reported through the sink and the batch
/// continues; only missing/unbootstrappable tooling aborts the whole call.
pub trait PackageDriver {
    fn install(&self, packages: &[PackageSpec], report: ProgressSink) -> Result<(), InstallerError>;
    fn uninstall(
        &self,
        packages: &[PackageSpec],
        report: ProgressSink,
    ) -> Result<(), InstallerError>;
}

/// OS-dispatching entry point over the three platform drivers.
pub struct Installer {
    driver: Box<dyn PackageDriver>,
}

impl std::fmt::Debug for Installer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer").finish_non_exhaustive()
    }
}

impl Installer {
    /// Build an installer for an explicit OS identifier
    /// (`std::env::consts::OS` values). Unknown identifiers fail here,
    /// before any events are emitted.
    pub fn new(os: &str) -> Result<Self, InstallerError> {
        let driver: Box<dyn PackageDriver> = match os {
            "linux" => Box::new(AptDriver::new()),
            "macos" => Box::new(BrewDriver::new()),
            "windows" => Box::new(ChocoDriver::new()),
            other => return Err(InstallerError::UnsupportedOs(other.to_string())),
        };
        Ok(Self { driver })
    }

    /// Installer for the OS this process is running on.
    pub fn for_host() -> Result<Self, InstallerError> {
        Self::new(std::env::consts::OS)
    }

    /// Injection seam for tests and embedding.
    pub fn with_driver(driver: Box<dyn PackageDriver>) -> Self {
        Self { driver }
    }

    pub fn install(
        &self,
        packages: &[PackageSpec],
        report: ProgressSink,
    ) -> Result<(), InstallerError> {
        self.driver.install(packages, report)
    }

    pub fn uninstall(
        &self,
        packages: &[PackageSpec],
        report: ProgressSink,
    ) -> Result<(), InstallerError> {
        self.driver.uninstall(packages, report)
    }
}
