use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Mount points of device-backed filesystems, in mount table order.
///
/// Falls back to `["/"]` when the table cannot be read.
pub fn enumerate_mounts(mount_table: &Path, device_prefixes: &[String]) -> Vec<String> {
    match fs::read_to_string(mount_table) {
        Ok(text) => {
            let mounts = parse_mount_table(&text, device_prefixes);
            debug!(
                count = mounts.len(),
                table = %mount_table.display(),
                "mount points parsed"
            );
            mounts
        }
        Err(err) => {
            warn!(
                table = %mount_table.display(),
                error = %err,
                "mount table unavailable, checking / only"
            );
            vec!["/".to_string()]
        }
    }
}

pub fn parse_mount_table(text: &str, device_prefixes: &[String]) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let mount = fields.next()?;
            device_prefixes
                .iter()
                .any(|p| device.starts_with(p.as_str()))
                .then(|| unescape_mount_field(mount))
        })
        .collect()
}

/// Decodes the `\NNN` octal escapes the kernel uses for space, tab, newline and backslash.
pub fn unescape_mount_field(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            if let Some(byte) = bytes.get(i + 1..i + 4).and_then(octal_byte) {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn octal_byte(digits: &[u8]) -> Option<u8> {
    if !digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
        return None;
    }
    let value = digits.iter().fold(0_u32, |acc, d| acc * 8 + u32::from(d - b'0'));
    u8::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOUNTS: &str = "\
sysfs /sys sysfs rw,nosuid,nodev,noexec,relatime 0 0
proc /proc proc rw,nosuid,nodev,noexec,relatime 0 0
/dev/nvme0n1p2 / ext4 rw,relatime 0 0
tmpfs /run tmpfs rw,nosuid,nodev,size=3256180k,mode=755 0 0
/dev/nvme0n1p1 /boot/efi vfat rw,relatime 0 0
broken-line
/dev/mapper/vg-home /home xfs rw,relatime 0 0
/dev/nvme0n1p2 /var/lib/docker ext4 rw,relatime 0 0
";

    fn dev() -> Vec<String> {
        vec!["/dev/".to_string()]
    }

    #[test]
    fn keeps_device_backed_mounts_in_order() {
        let mounts = parse_mount_table(MOUNTS, &dev());
        assert_eq!(mounts, vec!["/", "/boot/efi", "/home", "/var/lib/docker"]);
    }

    #[test]
    fn custom_prefixes_are_honored() {
        let prefixes = vec!["/dev/mapper/".to_string(), "tmpfs".to_string()];
        let mounts = parse_mount_table(MOUNTS, &prefixes);
        assert_eq!(mounts, vec!["/run", "/home"]);
    }

    #[test]
    fn octal_escapes_in_mount_points_are_decoded() {
        let table = "/dev/sdb1 /mnt/my\\040disk ext4 rw 0 0\n\
/dev/sdc1 /mnt/tab\\011and\\134slash ext4 rw 0 0\n\
/dev/sdd1 /mnt/line\\012break ext4 rw 0 0\n";
        let mounts = parse_mount_table(table, &dev());
        assert_eq!(mounts, vec!["/mnt/my disk", "/mnt/tab\tand\\slash", "/mnt/line\nbreak"]);
    }

    #[test]
    fn malformed_escapes_are_kept_verbatim() {
        assert_eq!(unescape_mount_field("/mnt/a\\09x"), "/mnt/a\\09x");
        assert_eq!(unescape_mount_field("/mnt/trailing\\"), "/mnt/trailing\\");
        assert_eq!(unescape_mount_field("/mnt/caf\u{e9}"), "/mnt/caf\u{e9}");
    }

    #[test]
    fn empty_table_yields_nothing() {
        assert!(parse_mount_table("", &dev()).is_empty());
    }

    #[test]
    fn missing_table_falls_back_to_root() {
        let mounts = enumerate_mounts(Path::new("/nonexistent/hostsnap/mounts"), &dev());
        assert_eq!(mounts, vec!["/".to_string()]);
    }
}
