use serde::Serialize;

/// Memory usage derived from `/proc/meminfo`, in whole megabytes.
/// Constructed fresh on every call; memory needs no delta state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemorySample {
    pub total_mb: u64,
    pub used_mb: u64,
    pub free_mb: u64,
    pub used_percent: f64,
}

impl MemorySample {
    /// Build a sample from raw kibibyte counters.
    ///
    /// KiB convert to MB by integer division, so sub-MB remainders
    /// truncate. A zero total reports 0.0% instead of dividing by zero.
    pub fn from_kib(total_kib: u64, free_kib: u64) -> Self {
        let total_mb = total_kib / 1024;
        let free_mb = free_kib / 1024;
        let used_mb = total_mb.saturating_sub(free_mb);
        let used_percent = if total_mb > 0 {
            used_mb as f64 / total_mb as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total_mb,
            used_mb,
            free_mb,
            used_percent,
        }
    }

    /// One-line summary for the session log.
    pub fn summary(&self) -> String {
        format!(
            "Memory - total: {} MB, used: {} MB, free: {} MB ({:.1}%)",
            self.total_mb, self.used_mb, self.free_mb, self.used_percent
        )
    }
}

/// Extract `MemTotal` and `MemFree` from `/proc/meminfo` contents.
///
/// Field order does not matter and unrecognized lines are skipped. A
/// missing field degrades to zero rather than failing the sample, so the
/// tool keeps reporting with whatever the kernel exposed.
pub fn parse_meminfo(contents: &str) -> MemorySample {
    let mut total_kib = 0;
    let mut free_kib = 0;
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("MemTotal:") {
            total_kib = leading_int(rest);
        } else if let Some(rest) = line.strip_prefix("MemFree:") {
            free_kib = leading_int(rest);
        }
    }
    MemorySample::from_kib(total_kib, free_kib)
}

fn leading_int(rest: &str) -> u64 {
    rest.split_whitespace()
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
