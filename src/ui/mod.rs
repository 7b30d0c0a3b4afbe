//! Egui-based UI for Installify.
//!
//! This module defines the application state, the eframe App implementation,
//! and wires the Install/Uninstall buttons to background workers defined in
//! ui::tasks.

use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

use eframe::{App, egui};

use crate::catalog;
use crate::probe::{self, HostInfo};
use crate::style::set_app_style;
use crate::types::{EventStatus, Operation, TaskUpdate};

pub mod tasks;

/// One checklist row: app name plus its checkbox state.
pub struct AppRow {
    pub name: String,
    pub selected: bool,
}

/// Shared UI state synchronized across the UI thread and worker threads.
pub struct GuiState {
    pub apps: Vec<AppRow>,
    pub host: HostInfo,

    // progress channel
    pub progress_tx: mpsc::Sender<TaskUpdate>,
    pub progress_rx: mpsc::Receiver<TaskUpdate>,
    pub progress: f32,
    pub installing: bool,
    pub uninstalling: bool,

    // status log, one colored line per progress event
    pub log: Vec<(EventStatus, String)>,
}

impl GuiState {
    pub fn new(os: &str) -> Self {
        let (tx, rx) = mpsc::channel();
        let apps = catalog::catalog_for(os)
            .iter()
            .map(|e| AppRow {
                name: e.app.to_string(),
                selected: false,
            })
            .collect();
        Self {
            apps,
            host: probe::host_info(),
            progress_tx: tx,
            progress_rx: rx,
            progress: 0.0,
            installing: false,
            uninstalling: false,
            log: Vec::new(),
        }
    }
}

/// Main eframe application that renders and controls the UI.
pub struct InstallifyApp {
    pub state: Arc<Mutex<GuiState>>,
}

impl Default for InstallifyApp {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(GuiState::new(std::env::consts::OS))),
        }
    }
}

fn log_color(status: EventStatus) -> Option<egui::Color32> {
    match status {
        EventStatus::Normal => None,
        EventStatus::Success => Some(egui::Color32::from_rgb(60, 200, 90)),
        EventStatus::Warning => Some(egui::Color32::from_rgb(230, 190, 60)),
        EventStatus::Error => Some(egui::Color32::from_rgb(230, 80, 80)),
    }
}

impl App for InstallifyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        set_app_style(ctx);

        // pull updates from the progress channel (non-blocking)
        {
            let mut s = self.state.lock().unwrap();
            while let Ok(update) = s.progress_rx.try_recv() {
                s.progress = update.event.fraction;
                s.log.push((update.event.status, update.event.message));
                if update.finished {
                    match update.op {
                        Operation::Install => s.installing = false,
                        Operation::Uninstall => s.uninstalling = false,
                    }
                }
            }
        }

        let scale = ctx.pixels_per_point();

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.add_space(8.0 * scale);
            ui.horizontal(|ui| {
                ui.heading(format!("📦 Installify v{}", env!("CARGO_PKG_VERSION")));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let s = self.state.lock().unwrap();
                    ui.label(format!(
                        "OS: {} | RAM: {} | CPU: {}",
                        s.host.os, s.host.ram, s.host.cpu
                    ));
                });
            });
            ui.add_space(6.0 * scale);
        });

        let mut start: Option<Operation> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut s = self.state.lock().unwrap();
            let busy = s.installing || s.uninstalling;

            ui.add_space(4.0 * scale);
            ui.label(egui::RichText::new("Select apps:").strong());
            ui.add_space(2.0 * scale);

            if s.apps.is_empty() {
                ui.label("No applications are available for this operating system.");
            } else {
                // three columns, filled top to bottom like the checklist
                let per_column = s.apps.len().div_ceil(3);
                ui.columns(3, |cols| {
                    for (i, row) in s.apps.iter_mut().enumerate() {
                        let col = (i / per_column).min(2);
                        cols[col].checkbox(&mut row.selected, row.name.clone());
                    }
                });
            }

            ui.add_space(6.0 * scale);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!busy, egui::Button::new("Install selected"))
                    .clicked()
                {
                    start = Some(Operation::Install);
                }
                if ui
                    .add_enabled(!busy, egui::Button::new("Uninstall selected"))
                    .clicked()
                {
                    start = Some(Operation::Uninstall);
                }
            });

            ui.add_space(6.0 * scale);
            ui.add(egui::ProgressBar::new(s.progress).show_percentage());
            ui.add_space(4.0 * scale);
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for (status, line) in &s.log {
                        match log_color(*status) {
                            Some(color) => {
                                ui.colored_label(color, line.as_str());
                            }
                            None => {
                                ui.label(line.as_str());
                            }
                        }
                    }
                });
        });

        if let Some(op) = start {
            tasks::spawn_operation(self.state.clone(), op);
        }

        // keep progress and log fresh while workers run
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
