//! Display formatting for counts and durations

/// Format an engagement count for display.
///
/// Counts of ten thousand and above are scaled to `万` with one decimal,
/// counts of one thousand and above to `K`. Halves round up (`1250` reads
/// `"1.3K"`). Missing counts read as zero.
pub fn format_count(count: Option<u64>) -> String {
    match count.unwrap_or(0) {
        0 => "0".to_string(),
        n if n >= 10_000 => scaled(n, 10_000, "万"),
        n if n >= 1_000 => scaled(n, 1_000, "K"),
        n => n.to_string(),
    }
}

fn scaled(n: u64, unit: u64, suffix: &str) -> String {
    let step = unit / 10;
    let tenths = (n + step / 2) / step;
    format!("{}.{}{}", tenths / 10, tenths % 10, suffix)
}

/// Format a duration in seconds as `"{s}s"` or `"{m}m {s}s"`
pub fn format_duration(seconds: Option<u64>) -> String {
    let total_seconds = seconds.unwrap_or(0);

    if total_seconds < 60 {
        format!("{}s", total_seconds)
    } else {
        format!("{}m {}s", total_seconds / 60, total_seconds % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(None), "0");
        assert_eq!(format_count(Some(0)), "0");
        assert_eq!(format_count(Some(7)), "7");
        assert_eq!(format_count(Some(999)), "999");
        assert_eq!(format_count(Some(1500)), "1.5K");
        assert_eq!(format_count(Some(12000)), "1.2万");
        assert_eq!(format_count(Some(15000)), "1.5万");
    }

    #[test]
    fn test_format_count_boundaries() {
        assert_eq!(format_count(Some(1000)), "1.0K");
        assert_eq!(format_count(Some(9999)), "10.0K");
        assert_eq!(format_count(Some(10000)), "1.0万");
        assert_eq!(format_count(Some(1_234_567)), "123.5万");
    }

    #[test]
    fn test_format_count_halves_round_up() {
        assert_eq!(format_count(Some(1250)), "1.3K");
        assert_eq!(format_count(Some(1750)), "1.8K");
        assert_eq!(format_count(Some(1249)), "1.2K");
        assert_eq!(format_count(Some(12500)), "1.3万");
        assert_eq!(format_count(Some(12499)), "1.2万");
        assert_eq!(format_count(Some(9950)), "10.0K");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(None), "0s");
        assert_eq!(format_duration(Some(0)), "0s");
        assert_eq!(format_duration(Some(59)), "59s");
        assert_eq!(format_duration(Some(60)), "1m 0s");
        assert_eq!(format_duration(Some(65)), "1m 5s");
        assert_eq!(format_duration(Some(3725)), "62m 5s");
    }
}
