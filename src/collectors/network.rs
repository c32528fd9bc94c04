use crate::command::{CommandError, CommandRunner};
use crate::snapshot::NetworkInterface;
use tracing::{debug, warn};

pub async fn collect_network(runner: &CommandRunner) -> Vec<NetworkInterface> {
    interfaces_from_output(runner.run("ip", &["-4", "-o", "addr", "show"]).await)
}

pub fn interfaces_from_output(output: Result<String, CommandError>) -> Vec<NetworkInterface> {
    match output {
        Ok(raw) => {
            let interfaces = parse_interfaces(&ip_addr_columns(&raw));
            debug!(count = interfaces.len(), "network interfaces parsed");
            interfaces
        }
        Err(err) => {
            warn!(error = %err, "network interfaces unavailable");
            Vec::new()
        }
    }
}

/// Projects `ip -o addr` output onto "<iface> <cidr>" lines (columns 2 and 4).
pub fn ip_addr_columns(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            [cols.get(1), cols.get(3)]
                .into_iter()
                .flatten()
                .copied()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses two-column lines; anything else is dropped.
pub fn parse_interfaces(text: &str) -> Vec<NetworkInterface> {
    text.lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.as_slice() {
                [name, address] => Some(NetworkInterface {
                    name: (*name).to_string(),
                    address: (*address).to_string(),
                }),
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const IP_OUTPUT: &str = "\
1: lo    inet 127.0.0.1/8 scope host lo\\       valid_lft forever preferred_lft forever
2: eth0    inet 10.0.0.5/24 brd 10.0.0.255 scope global dynamic eth0\\       valid_lft 86120sec preferred_lft 86120sec
2: eth0    inet 10.0.0.6/24 brd 10.0.0.255 scope global secondary eth0\\       valid_lft forever preferred_lft forever
3: docker0
";

    #[test]
    fn single_token_line_is_skipped() {
        assert!(parse_interfaces("eth0").is_empty());
    }

    #[test]
    fn two_tokens_make_an_interface() {
        assert_eq!(
            parse_interfaces("eth0 10.0.0.5/24"),
            vec![NetworkInterface {
                name: "eth0".to_string(),
                address: "10.0.0.5/24".to_string(),
            }]
        );
    }

    #[test]
    fn extra_tokens_and_blank_lines_are_skipped() {
        let parsed = parse_interfaces("\neth0 10.0.0.5/24 extra\n\nwlan0 192.168.1.7/24\n");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "wlan0");
    }

    #[test]
    fn ip_output_keeps_order_and_duplicates() {
        let parsed = parse_interfaces(&ip_addr_columns(IP_OUTPUT));
        let pairs: Vec<(&str, &str)> = parsed
            .iter()
            .map(|i| (i.name.as_str(), i.address.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("lo", "127.0.0.1/8"),
                ("eth0", "10.0.0.5/24"),
                ("eth0", "10.0.0.6/24"),
            ]
        );
    }

    #[test]
    fn failed_command_yields_no_interfaces() {
        let timed_out = Err(CommandError::TimedOut {
            program: "ip".to_string(),
            timeout: Duration::from_secs(10),
        });
        assert!(interfaces_from_output(timed_out).is_empty());

        let exited = Err(CommandError::NonZeroExit {
            program: "ip".to_string(),
            status: "exit status: 1".to_string(),
        });
        assert!(interfaces_from_output(exited).is_empty());
    }
}
