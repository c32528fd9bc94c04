use clap::Parser;
use hostsnap::collectors::host::collect_host;
use hostsnap::command::CommandRunner;
use hostsnap::config::Config;
use hostsnap::init_tracing;
use hostsnap::report::render_json;
use std::path::PathBuf;
use sysinfo::{System, SystemExt};
use tracing::error;

/// Prints a JSON inventory of this host: OS, CPU, memory, uptime and addresses.
#[derive(Parser, Debug)]
#[command(name = "host-info")]
#[command(version)]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    print_default_config: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
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

    let mut system = System::new();
    system.refresh_cpu();
    let runner = CommandRunner::new(cfg.command_timeout());

    let snapshot = collect_host(&system, &runner, &cfg.sources).await;

    match render_json(&snapshot) {
        Ok(text) => println!("{text}"),
        Err(err) => error!(error = %err, "failed to serialize host snapshot"),
    }
}
