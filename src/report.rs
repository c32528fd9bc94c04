use crate::classify::Status;
use crate::snapshot::DiskReport;

pub const ALERTS_HEADER: &str = "--- ALERTS ---";

pub fn render_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// One line per warning/critical filesystem, in report order.
pub fn alert_lines(report: &DiskReport) -> Vec<String> {
    report
        .filesystems
        .iter()
        .filter_map(|fs| {
            let percent = fs.percent_used()?;
            match fs.status() {
                Status::Critical => Some(format!(
                    "CRITICAL: {} is {:.1}% full!",
                    fs.mount(),
                    percent
                )),
                Status::Warning => Some(format!("WARNING: {} is {:.1}% full", fs.mount(), percent)),
                Status::Ok | Status::Unknown => None,
            }
        })
        .collect()
}

/// Full stdout text: the JSON document, then the alert block when anything is flagged.
pub fn render_disk_report(report: &DiskReport) -> Result<String, serde_json::Error> {
    let mut out = render_json(report)?;
    out.push('\n');

    let alerts = alert_lines(report);
    if !alerts.is_empty() {
        out.push('\n');
        out.push_str(ALERTS_HEADER);
        out.push('\n');
        for line in alerts {
            out.push_str(&line);
            out.push('\n');
        }
    }
    Ok(out)
}
