use crate::snapshot::CpuInfo;
use std::fs;
use std::path::Path;
use sysinfo::{System, SystemExt};
use tracing::debug;

const UNKNOWN_MODEL: &str = "Unknown";

pub fn collect_cpu(system: &System, cpuinfo: &Path) -> CpuInfo {
    let model = fs::read_to_string(cpuinfo)
        .ok()
        .and_then(|text| parse_cpu_model(&text))
        .unwrap_or_else(|| {
            debug!(path = %cpuinfo.display(), "cpu model not found");
            UNKNOWN_MODEL.to_string()
        });

    let load = system.load_average();
    CpuInfo {
        model,
        cores: system.cpus().len() as u32,
        load_avg: [load.one, load.five, load.fifteen],
    }
}

/// Value of the first `model name` line.
pub fn parse_cpu_model(text: &str) -> Option<String> {
    text.lines()
        .find(|line| line.starts_with("model name"))
        .and_then(|line| line.split(':').nth(1))
        .map(|value| value.trim().to_string())
}
