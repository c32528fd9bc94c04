use crate::collectors::cpu::collect_cpu;
use crate::collectors::memory::collect_memory;
use crate::collectors::network::collect_network;
use crate::collectors::os::{resolve_os, Platform};
use crate::command::CommandRunner;
use crate::config::SourcesConfig;
use crate::snapshot::HostSnapshot;
use sysinfo::{System, SystemExt};
use tracing::warn;

pub async fn collect_host(
    system: &System,
    runner: &CommandRunner,
    sources: &SourcesConfig,
) -> HostSnapshot {
    let platform = Platform::current();
    let hostname = system.host_name().unwrap_or_default();
    let fqdn = resolve_fqdn(runner, &hostname).await;
    let os = resolve_os(&platform, &sources.os_release);
    let cpu = collect_cpu(system, &sources.cpuinfo);
    let memory = collect_memory(&sources.meminfo);
    let uptime = runner.run_or_unavailable("uptime", &["-p"]).await;
    let network = collect_network(runner).await;

    HostSnapshot {
        hostname,
        fqdn,
        kernel: os.release.clone(),
        os,
        cpu,
        memory,
        uptime,
        network,
    }
}

async fn resolve_fqdn(runner: &CommandRunner, hostname: &str) -> String {
    match runner.run("hostname", &["-f"]).await {
        Ok(fqdn) => fqdn,
        Err(err) => {
            warn!(error = %err, "fqdn unavailable, using hostname");
            hostname.to_string()
        }
    }
}
