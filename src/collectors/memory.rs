use crate::classify::round_to;
use crate::snapshot::{MemoryInfo, MemorySection};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Raw kB counters picked from a meminfo table. Absent keys stay 0.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemCounters {
    pub mem_total_kb: u64,
    pub mem_available_kb: u64,
    pub swap_total_kb: u64,
    pub swap_free_kb: u64,
}

pub fn collect_memory(meminfo: &Path) -> MemorySection {
    match fs::read_to_string(meminfo) {
        Ok(text) => MemorySection::Stats(memory_info(&parse_meminfo(&text))),
        Err(err) => {
            warn!(path = %meminfo.display(), error = %err, "memory table unavailable");
            MemorySection::Unavailable {
                error: format!("Cannot read {}", meminfo.display()),
            }
        }
    }
}

pub fn parse_meminfo(text: &str) -> MemCounters {
    let mut counters = MemCounters::default();
    for line in text.lines() {
        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() != 2 {
            continue;
        }
        let Some(value) = parts[1]
            .split_whitespace()
            .next()
            .and_then(|v| v.parse::<u64>().ok())
        else {
            continue;
        };
        match parts[0].trim() {
            "MemTotal" => counters.mem_total_kb = value,
            "MemAvailable" => counters.mem_available_kb = value,
            "SwapTotal" => counters.swap_total_kb = value,
            "SwapFree" => counters.swap_free_kb = value,
            _ => {}
        }
    }
    counters
}

pub fn memory_info(c: &MemCounters) -> MemoryInfo {
    let used_percent = if c.mem_total_kb == 0 {
        0.0
    } else {
        (1.0 - c.mem_available_kb as f64 / c.mem_total_kb as f64) * 100.0
    };
    MemoryInfo {
        total_mb: kb_to_mb(c.mem_total_kb),
        available_mb: kb_to_mb(c.mem_available_kb),
        used_percent: round_to(used_percent, 1),
        swap_total_mb: kb_to_mb(c.swap_total_kb),
        swap_free_mb: kb_to_mb(c.swap_free_kb),
    }
}

fn kb_to_mb(kb: u64) -> f64 {
    round_to(kb as f64 / 1024.0, 1)
}
