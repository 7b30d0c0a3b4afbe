//! One-shot host facts for the header line. No refresh, no failure path
//! beyond "Unknown" fallback text.

use sysinfo::System;

#[derive(Clone, Debug)]
pub struct HostInfo {
    pub os: String,
    pub ram: String,
    pub cpu: String,
}

pub fn host_info() -> HostInfo {
    let mut sys = System::new_all();
    sys.refresh_all();

    let os = System::name().unwrap_or_else(|| std::env::consts::OS.to_string());
    let ram = format!(
        "{:.2} GB",
        sys.total_memory() as f64 / 1024.0 / 1024.0 / 1024.0
    );
    let cpu = sys
        .cpus()
        .first()
        .map(|c| c.brand().trim().to_string())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    HostInfo { os, ram, cpu }
}
