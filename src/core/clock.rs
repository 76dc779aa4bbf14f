// src/core/clock.rs

/// Seconds remaining in the period → "MM:SS". Negative clocks read as "00:00".
pub fn format_clock(seconds: i64) -> String {
    if seconds < 0 {
        return s!("00:00");
    }
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// "M:SS" as printed in the text report (no zero-padded minutes).
pub fn short_clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
