use crate::classify::Status;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskReport {
    pub filesystems: Vec<FilesystemSample>,
}

/// One mount point. Either measured, or unreadable with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilesystemSample {
    Measured(FilesystemUsage),
    Unreadable(FilesystemError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesystemUsage {
    pub mount: String,
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
    pub percent_used: f64,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesystemError {
    pub mount: String,
    pub error: String,
    pub status: Status,
}

impl FilesystemSample {
    pub fn mount(&self) -> &str {
        match self {
            Self::Measured(u) => &u.mount,
            Self::Unreadable(e) => &e.mount,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Self::Measured(u) => u.status,
            Self::Unreadable(e) => e.status,
        }
    }

    pub fn percent_used(&self) -> Option<f64> {
        match self {
            Self::Measured(u) => Some(u.percent_used),
            Self::Unreadable(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    pub hostname: String,
    pub fqdn: String,
    pub os: OsInfo,
    pub cpu: CpuInfo,
    pub memory: MemorySection,
    pub uptime: String,
    pub network: Vec<NetworkInterface>,
    pub kernel: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsInfo {
    pub system: String,
    pub release: String,
    pub version: String,
    pub arch: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub model: String,
    pub cores: u32,
    pub load_avg: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemorySection {
    Stats(MemoryInfo),
    Unavailable { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub total_mb: f64,
    pub available_mb: f64,
    pub used_percent: f64,
    pub swap_total_mb: f64,
    pub swap_free_mb: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub name: String,
    pub address: String,
}
