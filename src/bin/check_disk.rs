use clap::Parser;
use hostsnap::collectors::disk::{collect_disks, Statvfs};
use hostsnap::config::Config;
use hostsnap::init_tracing;
use hostsnap::report::render_disk_report;
use std::path::PathBuf;
use tracing::{error, info};

/// Reports usage of every device-backed filesystem as JSON, followed by alerts.
#[derive(Parser, Debug)]
#[command(name = "check-disk")]
#[command(version)]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    print_default_config: bool,
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    if cli.print_default_config {
        println!("{}", Config::example_yaml());
        return;
    }

    let cfg = match Config::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(error = %err, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let report = collect_disks(&Statvfs, &cfg.sources, &cfg.thresholds());
    let flagged = report
        .filesystems
        .iter()
        .filter(|fs| fs.status().is_alert())
        .count();
    info!(
        filesystems = report.filesystems.len(),
        flagged, "disk usage collected"
    );

    match render_disk_report(&report) {
        Ok(text) => print!("{text}"),
        Err(err) => error!(error = %err, "failed to serialize disk report"),
    }
}
