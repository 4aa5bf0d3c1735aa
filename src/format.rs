//! Human-readable size formatting

/// Format a byte count using binary (1024) units with one decimal place
///
/// Stops at the largest unit where the scaled value is at least 1, or at
/// `GB` when the value exceeds the unit list.
///
/// # Examples
///
/// ```
/// use chatsweep::format::format_size;
///
/// assert_eq!(format_size(0), "0.0 B");
/// assert_eq!(format_size(1536), "1.5 KB");
/// assert_eq!(format_size(1073741824), "1.0 GB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while unit < UNITS.len() - 1 && value >= 1024.0 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", value, UNITS[unit])
}
