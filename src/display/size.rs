/// Format a byte count with binary (1024-based) units.
///
/// Values are truncated, not rounded, to two decimals. Kilobytes drop
/// trailing zeros (`1.5 KB`); larger units always show two (`1.00 GB`).
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut scale: u128 = 1;
    let mut unit_idx = 0;

    while unit_idx < UNITS.len() - 1 && u128::from(bytes) >= scale * 1024 {
        scale *= 1024;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        return format!("{} B", bytes);
    }

    let hundredths = u128::from(bytes) * 100 / scale;
    let whole = hundredths / 100;
    let frac = hundredths % 100;

    if unit_idx == 1 {
        if frac == 0 {
            format!("{} {}", whole, UNITS[unit_idx])
        } else if frac % 10 == 0 {
            format!("{}.{} {}", whole, frac / 10, UNITS[unit_idx])
        } else {
            format!("{}.{:02} {}", whole, frac, UNITS[unit_idx])
        }
    } else {
        format!("{}.{:02} {}", whole, frac, UNITS[unit_idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_zero() {
        assert_eq!(format_bytes(0), "0 B");
    }

    #[test]
    fn test_format_bytes_bytes() {
        assert_eq!(format_bytes(1), "1 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1023), "1023 B");
    }

    #[test]
    fn test_format_bytes_kilobytes() {
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1024 + 10), "1 KB");
        assert_eq!(format_bytes(1024 * 15), "15 KB");
        assert_eq!(format_bytes(1300), "1.26 KB");
    }

    #[test]
    fn test_format_bytes_truncates() {
        // 1.999... MB must not round up to 2.00
        assert_eq!(format_bytes(2 * 1048576 - 1), "1.99 MB");
    }

    #[test]
    fn test_format_bytes_large_units() {
        assert_eq!(format_bytes(1048576), "1.00 MB");
        assert_eq!(format_bytes(1048576 * 5 / 2), "2.50 MB");
        assert_eq!(format_bytes(1073741824), "1.00 GB");
        assert_eq!(format_bytes(1099511627776), "1.00 TB");
    }

    #[test]
    fn test_format_bytes_caps_at_terabytes() {
        assert_eq!(format_bytes(1099511627776 * 2048), "2048.00 TB");
    }
}
