use crate::snapshot::OsInfo;
use nix::sys::utsname::uname;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Kernel identity as reported by `uname(2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub system: String,
    pub release: String,
    pub version: String,
    pub machine: String,
}

impl Platform {
    pub fn current() -> Self {
        match uname() {
            Ok(uts) => Self {
                system: uts.sysname().to_string_lossy().into_owned(),
                release: uts.release().to_string_lossy().into_owned(),
                version: uts.version().to_string_lossy().into_owned(),
                machine: uts.machine().to_string_lossy().into_owned(),
            },
            Err(err) => {
                warn!(error = %err, "uname failed");
                Self {
                    system: std::env::consts::OS.to_string(),
                    release: String::new(),
                    version: String::new(),
                    machine: std::env::consts::ARCH.to_string(),
                }
            }
        }
    }
}

pub fn resolve_os(platform: &Platform, os_release: &Path) -> OsInfo {
    let version = fs::read_to_string(os_release)
        .ok()
        .and_then(|text| parse_pretty_name(&text))
        .unwrap_or_else(|| platform.version.clone());

    OsInfo {
        system: platform.system.clone(),
        release: platform.release.clone(),
        version,
        arch: platform.machine.clone(),
    }
}

/// Non-empty `PRETTY_NAME` from an os-release file, unquoted.
pub fn parse_pretty_name(text: &str) -> Option<String> {
    text.lines()
        .find_map(|line| line.trim().strip_prefix("PRETTY_NAME="))
        .map(|value| value.trim().trim_matches(['"', '\'']).to_string())
        .filter(|value| !value.is_empty())
}
