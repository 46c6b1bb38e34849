use super::error::{Result, SampleError};

/// Cumulative CPU time counters from the aggregate `cpu` line of
/// `/proc/stat`, in jiffies since boot. Monotonically non-decreasing for
/// the lifetime of the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuSnapshot {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
}

/// Parse the aggregate CPU line out of `/proc/stat` contents.
///
/// Only the `cpu ` line counts; per-core `cpuN` lines are skipped. Exactly
/// seven counters are required, and the guest/guest_nice columns newer
/// kernels append after them are ignored.
pub fn parse_proc_stat(contents: &str) -> Result<CpuSnapshot> {
    let line = contents
        .lines()
        .find(|line| line.starts_with("cpu ") || line.starts_with("cpu\t"))
        .ok_or_else(|| SampleError::malformed("stat", "no aggregate cpu line"))?;

    let mut fields = line.split_whitespace().skip(1);
    let mut next = || -> Result<u64> {
        let raw = fields.next().ok_or_else(|| {
            SampleError::malformed("stat", "aggregate cpu line has fewer than 7 counters")
        })?;
        raw.parse()
            .map_err(|_| SampleError::malformed("stat", format!("bad counter `{raw}`")))
    };

    Ok(CpuSnapshot {
        user: next()?,
        nice: next()?,
        system: next()?,
        idle: next()?,
        iowait: next()?,
        irq: next()?,
        softirq: next()?,
    })
}

/// Outcome of one usage derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CpuReading {
    /// Only one snapshot observed so far; no rate can be derived yet.
    Warmup,
    /// Utilization over the interval between the last two snapshots,
    /// in [0.0, 100.0].
    Usage(f64),
}

impl CpuReading {
    pub fn percent(&self) -> Option<f64> {
        match self {
            CpuReading::Warmup => None,
            CpuReading::Usage(pct) => Some(*pct),
        }
    }

    /// One-line summary for the session log.
    pub fn summary(&self) -> String {
        match self {
            CpuReading::Warmup => "CPU usage: warming up".to_string(),
            CpuReading::Usage(pct) => format!("CPU usage: {pct:.1}%"),
        }
    }
}

/// Derives utilization percentages from successive [`CpuSnapshot`]s.
///
/// The tracker owns the one piece of cross-call state in the whole
/// sampler: the previously observed snapshot. It is caller-owned rather
/// than process-global so independent trackers can run side by side, and
/// the `&mut self` signature is the single-threading contract.
#[derive(Debug, Default)]
pub struct CpuTracker {
    prev: Option<CpuSnapshot>,
}

impl CpuTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in the next snapshot and derive a reading.
    ///
    /// The first call only seeds the tracker and reports [`CpuReading::Warmup`].
    /// The stored reference point always advances to `curr`, so a rate is
    /// never derived across more than one sampling interval.
    pub fn update(&mut self, curr: CpuSnapshot) -> CpuReading {
        let reading = match self.prev {
            None => CpuReading::Warmup,
            Some(prev) => {
                let idle_delta = curr.idle.saturating_sub(prev.idle);
                let total_delta = curr.user.saturating_sub(prev.user)
                    + curr.nice.saturating_sub(prev.nice)
                    + curr.system.saturating_sub(prev.system)
                    + idle_delta
                    + curr.iowait.saturating_sub(prev.iowait)
                    + curr.irq.saturating_sub(prev.irq)
                    + curr.softirq.saturating_sub(prev.softirq);
                if total_delta == 0 {
                    // Back-to-back samples with no elapsed scheduler tick.
                    CpuReading::Usage(0.0)
                } else {
                    CpuReading::Usage(100.0 * (1.0 - idle_delta as f64 / total_delta as f64))
                }
            }
        };
        self.prev = Some(curr);
        reading
    }
}
