//! Plain-text report sections shared by the menu and one-shot modes, plus
//! the `--json` payloads.

use serde::Serialize;

use crate::format::{format_percent, truncate_unicode};
use crate::system::cpu::CpuReading;
use crate::system::memory::MemorySample;
use crate::system::process::RankedProcess;

pub fn cpu_section(reading: CpuReading) -> String {
    match reading {
        CpuReading::Warmup => "\
=== CPU Usage ===
Initializing CPU monitoring...
Run again to see CPU usage.
"
        .to_string(),
        CpuReading::Usage(pct) => {
            format!("=== CPU Usage ===\nCPU Usage: {}\n", format_percent(pct))
        }
    }
}

pub fn memory_section(sample: &MemorySample) -> String {
    format!(
        "=== Memory Usage ===\n\
         Total Memory:  {} MB\n\
         Used Memory:   {} MB\n\
         Free Memory:   {} MB\n\
         Usage:         {:.1}%\n",
        sample.total_mb, sample.used_mb, sample.free_mb, sample.used_percent
    )
}

pub fn process_section(ranked: &[RankedProcess]) -> String {
    let mut out = String::from("=== Top Processes ===\n");
    if ranked.is_empty() {
        out.push_str("No processes found.\n");
        return out;
    }
    out.push_str(&format!(
        "{:<8} {:<30} {:>12} {:>11}\n",
        "PID", "Name", "CPU Time", "Relative %"
    ));
    for row in ranked {
        out.push_str(&format!(
            "{:<8} {:<30} {:>12} {:>10.1}%\n",
            row.pid,
            truncate_unicode(&row.name, 30),
            row.total_time,
            row.relative_percent
        ));
    }
    out
}

/// `--json` shape for the CPU one-shot; the percentage is absent while the
/// sampler is still warming up.
#[derive(Debug, Serialize)]
pub struct CpuPayload {
    pub usage_percent: Option<f64>,
}

impl From<CpuReading> for CpuPayload {
    fn from(reading: CpuReading) -> Self {
        Self {
            usage_percent: reading.percent(),
        }
    }
}
