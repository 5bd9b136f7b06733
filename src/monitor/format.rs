//! Human-readable byte formatting.

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;

/// Formats a cumulative byte count, e.g. `2048` → `"2.0 KB"`.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    format_signed(bytes as f64)
}

/// Formats a rate in bytes/sec, e.g. `1536.0` → `"1.5 KB/s"`.
///
/// Negative rates (counter resets) keep their sign: `-2048.0` → `"-2.0 KB/s"`.
#[must_use]
pub fn format_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", format_signed(bytes_per_sec))
}

/// Picks the unit from the magnitude and prefixes `-` for negative values.
fn format_signed(value: f64) -> String {
    let magnitude = value.abs();

    let body = if magnitude >= GB {
        format!("{:.1} GB", magnitude / GB)
    } else if magnitude >= MB {
        format!("{:.1} MB", magnitude / MB)
    } else if magnitude >= KB {
        format!("{:.1} KB", magnitude / KB)
    } else {
        format!("{:.0} B", magnitude)
    };

    if value < 0.0 && body != "0 B" {
        format!("-{body}")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_units() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_format_bytes_boundaries() {
        assert_eq!(format_bytes(1024 * 1024 - 1), "1024.0 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.0 MB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.0 GB");
        assert_eq!(format_bytes(2048 * 1024 * 1024 * 1024), "2048.0 GB");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(500.0), "500 B/s");
        assert_eq!(format_rate(1536.0), "1.5 KB/s");
        assert_eq!(format_rate(15.0 * 1024.0 * 1024.0), "15.0 MB/s");
    }

    #[test]
    fn test_format_rate_fractional_bytes() {
        assert_eq!(format_rate(12.4), "12 B/s");
        assert_eq!(format_rate(0.2), "0 B/s");
    }

    #[test]
    fn test_format_negative_rate_keeps_sign() {
        assert_eq!(format_rate(-512.0), "-512 B/s");
        assert_eq!(format_rate(-2048.0), "-2.0 KB/s");
        assert_eq!(format_rate(-5.0 * 1024.0 * 1024.0), "-5.0 MB/s");
        assert_eq!(format_rate(-3.0 * 1024.0 * 1024.0 * 1024.0), "-3.0 GB/s");
    }

    #[test]
    fn test_format_negative_rate_rounding_to_zero_has_no_sign() {
        assert_eq!(format_rate(-0.3), "0 B/s");
    }
}
