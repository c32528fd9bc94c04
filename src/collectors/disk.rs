use crate::classify::{classify, percent_of, round_to, Status, Thresholds};
use crate::collectors::mounts::enumerate_mounts;
use crate::config::SourcesConfig;
use crate::snapshot::{DiskReport, FilesystemError, FilesystemSample, FilesystemUsage};
use nix::errno::Errno;
use nix::sys::statvfs::statvfs;
use thiserror::Error;
use tracing::warn;

const BYTES_PER_GB: f64 = 1_073_741_824.0;

/// Raw byte counts for one filesystem as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
}

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Permission denied")]
    PermissionDenied,
    #[error("{0}")]
    Os(String),
}

pub trait FilesystemStats {
    fn usage(&self, mount: &str) -> Result<DiskUsage, UsageError>;
}

/// `statvfs(3)` backed capacity query.
///
/// Follows df: free space is what unprivileged users may still allocate.
#[derive(Debug, Default, Clone, Copy)]
pub struct Statvfs;

impl FilesystemStats for Statvfs {
    fn usage(&self, mount: &str) -> Result<DiskUsage, UsageError> {
        let stat = statvfs(mount).map_err(|errno| match errno {
            Errno::EACCES | Errno::EPERM => UsageError::PermissionDenied,
            other => UsageError::Os(other.desc().to_string()),
        })?;

        let frsize = stat.fragment_size() as u64;
        let blocks = stat.blocks() as u64;
        let blocks_free = stat.blocks_free() as u64;
        let blocks_available = stat.blocks_available() as u64;

        Ok(DiskUsage {
            total_bytes: blocks.saturating_mul(frsize),
            used_bytes: blocks.saturating_sub(blocks_free).saturating_mul(frsize),
            free_bytes: blocks_available.saturating_mul(frsize),
        })
    }
}

pub fn sample_mount(
    stats: &impl FilesystemStats,
    mount: &str,
    thresholds: &Thresholds,
) -> FilesystemSample {
    match stats.usage(mount) {
        Ok(usage) => FilesystemSample::Measured(build_usage(mount, usage, thresholds)),
        Err(err) => {
            warn!(mount, error = %err, "filesystem usage unavailable");
            FilesystemSample::Unreadable(FilesystemError {
                mount: mount.to_string(),
                error: err.to_string(),
                status: Status::Unknown,
            })
        }
    }
}

pub fn build_usage(mount: &str, usage: DiskUsage, thresholds: &Thresholds) -> FilesystemUsage {
    let percent = percent_of(usage.used_bytes, usage.total_bytes);
    FilesystemUsage {
        mount: mount.to_string(),
        total_gb: to_gb(usage.total_bytes),
        used_gb: to_gb(usage.used_bytes),
        free_gb: to_gb(usage.free_bytes),
        percent_used: round_to(percent, 1),
        status: classify(percent, thresholds),
    }
}

fn to_gb(bytes: u64) -> f64 {
    round_to(bytes as f64 / BYTES_PER_GB, 2)
}

pub fn collect_disks(
    stats: &impl FilesystemStats,
    sources: &SourcesConfig,
    thresholds: &Thresholds,
) -> DiskReport {
    let filesystems = enumerate_mounts(&sources.mount_table, &sources.device_prefixes)
        .iter()
        .map(|mount| sample_mount(stats, mount, thresholds))
        .collect();
    DiskReport { filesystems }
}
