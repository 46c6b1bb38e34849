use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;

use chrono::Local;
use tracing::debug;

use super::cpu::{CpuReading, CpuTracker, parse_proc_stat};
use super::error::{Result, SampleError};
use super::memory::{MemorySample, parse_meminfo};
use super::process::{
    ProcessCpu, RankedProcess, UNKNOWN_NAME, clean_comm, parse_stat_cpu_times, rank_top_processes,
};
use super::snapshot::SystemSnapshot;

/// Samples the kernel counters under one procfs root.
///
/// All file I/O lives here; the parsers in the sibling modules are pure.
/// The root is configurable so integration tests can run the full sampling
/// path against a fixture tree.
pub struct Collector {
    root: PathBuf,
    cpu: CpuTracker,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cpu: CpuTracker::new(),
        }
    }

    /// Take a CPU snapshot and fold it into the tracker.
    ///
    /// The first successful call after startup reports
    /// [`CpuReading::Warmup`]; a rate needs two snapshots.
    pub fn sample_cpu(&mut self) -> Result<CpuReading> {
        let contents = self.read("stat")?;
        let snapshot = parse_proc_stat(&contents)?;
        Ok(self.cpu.update(snapshot))
    }

    pub fn sample_memory(&self) -> Result<MemorySample> {
        let contents = self.read("meminfo")?;
        Ok(parse_meminfo(&contents))
    }

    /// One full census pass: enumerate, read, rank, keep the top `limit`.
    ///
    /// The process table mutates underneath the scan. A process that
    /// vanishes (or denies access) between enumeration and read is dropped
    /// from the result; only a failure to list the root itself is an error
    /// for the census as a whole.
    pub fn sample_processes(&self, limit: usize) -> Result<Vec<RankedProcess>> {
        let entries =
            fs::read_dir(&self.root).map_err(|e| SampleError::unavailable(&self.root, e))?;

        let mut records = Vec::new();
        for entry in entries.flatten() {
            let Some(pid) = numeric_pid(&entry.file_name()) else {
                continue;
            };
            match self.read_process(pid) {
                Ok(record) => records.push(record),
                Err(err) => debug!(pid, %err, "skipping process"),
            }
        }
        Ok(rank_top_processes(records, limit))
    }

    /// Everything at once, for the dashboard.
    pub fn refresh(&mut self, top: usize) -> Result<SystemSnapshot> {
        let cpu = self.sample_cpu()?;
        let memory = self.sample_memory()?;
        let top_processes = self.sample_processes(top)?;
        Ok(SystemSnapshot {
            taken_at: Local::now(),
            cpu,
            memory,
            top_processes,
        })
    }

    fn read_process(&self, pid: u32) -> Result<ProcessCpu> {
        let stat_path = self.root.join(pid.to_string()).join("stat");
        let stat =
            fs::read_to_string(&stat_path).map_err(|e| SampleError::unavailable(&stat_path, e))?;
        let (utime, stime) = parse_stat_cpu_times(stat.trim_end())?;

        // comm is a second, non-atomic read; the process can exit in
        // between, in which case only the name degrades.
        let comm_path = self.root.join(pid.to_string()).join("comm");
        let name = match fs::read_to_string(&comm_path) {
            Ok(raw) => clean_comm(&raw),
            Err(_) => UNKNOWN_NAME.to_string(),
        };

        Ok(ProcessCpu {
            pid,
            name,
            utime,
            stime,
        })
    }

    fn read(&self, file: &str) -> Result<String> {
        let path = self.root.join(file);
        fs::read_to_string(&path).map_err(|e| SampleError::unavailable(&path, e))
    }
}

/// A directory entry qualifies as a pid only if its name is all decimal
/// digits; `self`, `thread-self` and the metadata files never match.
fn numeric_pid(name: &OsStr) -> Option<u32> {
    let name = name.to_str()?;
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_pid_accepts_only_digit_names() {
        assert_eq!(numeric_pid(OsStr::new("1234")), Some(1234));
        assert_eq!(numeric_pid(OsStr::new("1")), Some(1));
        assert_eq!(numeric_pid(OsStr::new("self")), None);
        assert_eq!(numeric_pid(OsStr::new("thread-self")), None);
        assert_eq!(numeric_pid(OsStr::new("12a4")), None);
        assert_eq!(numeric_pid(OsStr::new("+123")), None);
        assert_eq!(numeric_pid(OsStr::new("")), None);
    }
}
