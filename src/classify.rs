use serde::{Deserialize, Serialize};
use std::fmt;

/// Usage status of a filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    pub const fn is_alert(self) -> bool {
        matches!(self, Self::Warning | Self::Critical)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Warning/critical pair in percent. Each band includes its lower edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub warning: f64,
    pub critical: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning: 80.0,
            critical: 95.0,
        }
    }
}

pub fn classify(percent: f64, thresholds: &Thresholds) -> Status {
    if percent >= thresholds.critical {
        Status::Critical
    } else if percent >= thresholds.warning {
        Status::Warning
    } else {
        Status::Ok
    }
}

/// `part / total * 100`, or 0 when `total` is 0.
pub fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64) * 100.0
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges_are_inclusive() {
        let t = Thresholds::default();
        assert_eq!(classify(79.9, &t), Status::Ok);
        assert_eq!(classify(79.999, &t), Status::Ok);
        assert_eq!(classify(80.0, &t), Status::Warning);
        assert_eq!(classify(94.99, &t), Status::Warning);
        assert_eq!(classify(95.0, &t), Status::Critical);
        assert_eq!(classify(100.0, &t), Status::Critical);
    }

    #[test]
    fn sweep_matches_bands() {
        let t = Thresholds::default();
        for tenth in 0..=1000_u32 {
            let p = f64::from(tenth) / 10.0;
            let expected = if p >= 95.0 {
                Status::Critical
            } else if p >= 80.0 {
                Status::Warning
            } else {
                Status::Ok
            };
            assert_eq!(classify(p, &t), expected, "percent {p}");
        }
    }

    #[test]
    fn custom_thresholds_override_defaults() {
        let t = Thresholds {
            warning: 50.0,
            critical: 60.0,
        };
        assert_eq!(classify(55.0, &t), Status::Warning);
        assert_eq!(classify(60.0, &t), Status::Critical);
        assert_eq!(classify(49.0, &t), Status::Ok);
    }

    #[test]
    fn percent_guards_zero_total() {
        assert_eq!(percent_of(0, 0), 0.0);
        assert_eq!(percent_of(10, 0), 0.0);
        assert_eq!(percent_of(80, 100), 80.0);
        assert_eq!(percent_of(100, 100), 100.0);
    }

    #[test]
    fn percent_stays_in_range_when_used_le_total() {
        for total in [1_u64, 7, 1000, u64::from(u32::MAX)] {
            for used in [0, total / 3, total / 2, total] {
                let p = percent_of(used, total);
                assert!((0.0..=100.0).contains(&p), "{used}/{total} -> {p}");
            }
        }
    }

    #[test]
    fn only_warning_and_critical_alert() {
        assert!(Status::Warning.is_alert());
        assert!(Status::Critical.is_alert());
        assert!(!Status::Ok.is_alert());
        assert!(!Status::Unknown.is_alert());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&Status::Critical).expect("serialize");
        assert_eq!(json, "\"critical\"");
        assert_eq!(Status::Unknown.to_string(), "unknown");
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(80.04, 1), 80.0);
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(97.66, 1), 97.7);
    }
}
