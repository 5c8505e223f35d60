//! Small formatting helpers for progress and summary output.

use std::time::Duration;

const UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

/// `0 B`, `1023 B`, `1.0 KB`, `1.5 MB`, …
pub fn human_size(bytes: u64) -> String {
	if bytes < 1024 {
		return format!("{bytes} B");
	}
	let mut value = bytes as f64 / 1024.0;
	let mut unit = 0;
	while value >= 1024.0 && unit < UNITS.len() - 1 {
		value /= 1024.0;
		unit += 1;
	}
	format!("{value:.1} {}", UNITS[unit])
}

/// `0s`, `1m5s`, `1h1m1s`, `1d1h1m1s`. Sub-second remainders are dropped.
pub fn human_duration(d: Duration) -> String {
	let total = d.as_secs();
	if total == 0 {
		return "0s".to_string();
	}

	let days = total / 86_400;
	let hours = (total % 86_400) / 3600;
	let minutes = (total % 3600) / 60;
	let seconds = total % 60;

	let mut out = String::new();
	if days > 0 {
		out.push_str(&format!("{days}d"));
	}
	if hours > 0 || !out.is_empty() {
		out.push_str(&format!("{hours}h"));
	}
	if minutes > 0 || !out.is_empty() {
		out.push_str(&format!("{minutes}m"));
	}
	out.push_str(&format!("{seconds}s"));
	out
}
