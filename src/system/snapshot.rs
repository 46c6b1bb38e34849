use chrono::{DateTime, Local};

use super::cpu::CpuReading;
use super::memory::MemorySample;
use super::process::RankedProcess;

/// One combined point-in-time sample, as the dashboard consumes it.
#[derive(Debug, Clone)]
pub struct SystemSnapshot {
    pub taken_at: DateTime<Local>,
    pub cpu: CpuReading,
    pub memory: MemorySample,
    pub top_processes: Vec<RankedProcess>,
}

impl Default for SystemSnapshot {
    fn default() -> Self {
        Self {
            taken_at: Local::now(),
            cpu: CpuReading::Warmup,
            memory: MemorySample::from_kib(0, 0),
            top_processes: Vec::new(),
        }
    }
}
