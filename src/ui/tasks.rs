//! Background workers running install/uninstall batches without blocking the
//! UI thread. One thread per user-initiated operation; the busy flags keep a
//! second operation from running against the package manager concurrently.

use std::sync::{Arc, Mutex};
use std::thread;

use crate::catalog;
use crate::installer::Installer;
use crate::types::{EventStatus, Operation, ProgressEvent, TaskUpdate};

use super::GuiState;

/// Check-and-set the busy flag, build the batch from the current selection,
/// and spawn the worker. Does nothing if an operation is already running.
pub fn spawn_operation(state_arc: Arc<Mutex<GuiState>>, op: Operation) {
    let os = std::env::consts::OS;

    let (tx, batch) = {
        let mut s = state_arc.lock().unwrap();
        if s.installing || s.uninstalling {
            return;
        }

        let selected: Vec<String> = s
            .apps
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.name.clone())
            .collect();
        if selected.is_empty() {
            s.log
                .push((EventStatus::Warning, "No apps selected.".to_string()));
            return;
        }

        s.log.clear();
        s.progress = 0.0;

        let mut batch = Vec::with_capacity(selected.len());
        for name in &selected {
            match catalog::lookup(os, name) {
                Some(spec) => batch.push(spec),
                // stale selection guard: the checklist only offers mapped
                // apps, but the mapping is per OS
                None => s.log.push((
                    EventStatus::Warning,
                    format!("Warning: no package mapping found for {name} on {os}"),
                )),
            }
        }
        if batch.is_empty() {
            s.log.push((
                EventStatus::Warning,
                "None of the selected apps are available on this system.".to_string(),
            ));
            return;
        }

        match op {
            Operation::Install => s.installing = true,
            Operation::Uninstall => s.uninstalling = true,
        }
        (s.progress_tx.clone(), batch)
    };

    thread::spawn(move || {
        let noun = match op {
            Operation::Install => "Installation",
            Operation::Uninstall => "Uninstallation",
        };
        log::info!("{noun} of {} package(s) starting", batch.len());

        let installer = match Installer::for_host() {
            Ok(installer) => installer,
            Err(e) => {
                let _ = tx.send(TaskUpdate {
                    op,
                    event: ProgressEvent::error(0.0, format!("{noun} failed: {e}")),
                    finished: true,
                });
                return;
            }
        };

        let mut failures = 0usize;
        let result = {
            let mut forward = |event: ProgressEvent| {
                if event.status == EventStatus::Error {
                    failures += 1;
                }
                let _ = tx.send(TaskUpdate {
                    op,
                    event,
                    finished: false,
                });
            };
            match op {
                Operation::Install => installer.install(&batch, &mut forward),
                Operation::Uninstall => installer.uninstall(&batch, &mut forward),
            }
        };

        let summary = match result {
            Err(e) => ProgressEvent::error(1.0, format!("{noun} failed: {e}")),
            Ok(()) if failures > 0 => {
                ProgressEvent::warning(1.0, format!("{noun} completed with {failures} failures."))
            }
            Ok(()) => match op {
                Operation::Install => ProgressEvent::success(
                    1.0,
                    "All selected apps have been installed successfully.",
                ),
                Operation::Uninstall => ProgressEvent::success(
                    1.0,
                    "All selected apps have been uninstalled successfully.",
                ),
            },
        };
        log::info!("{noun} finished, {failures} failure(s)");
        let _ = tx.send(TaskUpdate {
            op,
            event: summary,
            finished: true,
        });
    });
}
