use serde::Serialize;

use super::error::{Result, SampleError};

/// Display-name substitute for processes whose comm could not be read
/// before they exited.
pub const UNKNOWN_NAME: &str = "[unknown]";

/// CPU time consumed by one process, captured during a single census pass.
///
/// Tick totals are only comparable to other records from the same pass;
/// they are never carried across passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCpu {
    pub pid: u32,
    pub name: String,
    pub utime: u64,
    pub stime: u64,
}

impl ProcessCpu {
    pub fn total_time(&self) -> u64 {
        self.utime + self.stime
    }
}

/// One row of the ranked top-N table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProcess {
    pub pid: u32,
    pub name: String,
    pub total_time: u64,
    /// Share of the top-ranked record's CPU time, not of total CPU
    /// capacity. The leader is always exactly 100.0.
    pub relative_percent: f64,
}

/// Pull utime and stime (fields 14 and 15) out of a `/proc/[pid]/stat` line.
///
/// The comm field is wrapped in parentheses and may itself contain spaces
/// and literal parentheses, so naive space-splitting miscounts. The parse
/// anchors on the *last* `)` in the line and only then resumes positional
/// counting. Fields after the comm: state(0) ppid(1) pgrp(2) session(3)
/// tty_nr(4) tpgid(5) flags(6) minflt(7) cminflt(8) majflt(9) cmajflt(10)
/// utime(11) stime(12).
pub fn parse_stat_cpu_times(line: &str) -> Result<(u64, u64)> {
    let after_comm = line
        .rfind(')')
        .ok_or_else(|| SampleError::malformed("process stat", "no closing paren"))?
        + 1;
    let fields: Vec<&str> = line[after_comm..].split_whitespace().collect();
    Ok((stat_field(&fields, 11)?, stat_field(&fields, 12)?))
}

fn stat_field(fields: &[&str], index: usize) -> Result<u64> {
    let raw = fields.get(index).ok_or_else(|| {
        SampleError::malformed("process stat", format!("line ends before field {index}"))
    })?;
    raw.parse()
        .map_err(|_| SampleError::malformed("process stat", format!("bad counter `{raw}`")))
}

/// Normalize a `/proc/[pid]/comm` read: strip one trailing newline.
pub fn clean_comm(raw: &str) -> String {
    raw.strip_suffix('\n').unwrap_or(raw).to_string()
}

/// Rank census records by CPU time and keep the top `limit`.
///
/// Ties break on pid ascending so repeated passes over the same table give
/// the same order. Percentages are relative to the top record; an all-zero
/// or empty census never divides by zero.
pub fn rank_top_processes(mut records: Vec<ProcessCpu>, limit: usize) -> Vec<RankedProcess> {
    records.sort_by(|a, b| b.total_time().cmp(&a.total_time()).then(a.pid.cmp(&b.pid)));
    let top_time = records.first().map(ProcessCpu::total_time).unwrap_or(0);
    records
        .into_iter()
        .take(limit)
        .map(|record| {
            let total_time = record.total_time();
            let relative_percent = if top_time > 0 {
                100.0 * total_time as f64 / top_time as f64
            } else {
                0.0
            };
            RankedProcess {
                pid: record.pid,
                name: record.name,
                total_time,
                relative_percent,
            }
        })
        .collect()
}

/// One-line census summary for the session log.
pub fn census_summary(ranked: &[RankedProcess]) -> String {
    match ranked.first() {
        Some(top) => format!(
            "Top {} processes: leader pid {} ({}) with {} ticks",
            ranked.len(),
            top.pid,
            top.name,
            top.total_time
        ),
        None => "Top processes: none visible".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pid: u32, utime: u64, stime: u64) -> ProcessCpu {
        ProcessCpu {
            pid,
            name: format!("proc_{pid}"),
            utime,
            stime,
        }
    }

    #[test]
    fn plain_stat_line() {
        let line = "1234 (bash) S 1 1234 1234 34816 1234 4194304 1200 0 0 0 75 25 0 0 20 0 1 0 8000 10485760 500 18446744073709551615 1 1 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0";
        assert_eq!(parse_stat_cpu_times(line).unwrap(), (75, 25));
    }

    #[test]
    fn name_with_spaces_and_parens_anchors_on_last_paren() {
        let line = "42 (my (weird) proc) R 1 42 42 0 -1 4194304 10 0 0 0 300 150 0 0 20 0 1 0 100 0 0";
        assert_eq!(parse_stat_cpu_times(line).unwrap(), (300, 150));
    }

    #[test]
    fn name_ending_in_paren() {
        let line = "7 (watcher)) S 1 7 7 0 -1 0 0 0 0 0 11 22 0 0 20 0 1 0 5 0 0";
        assert_eq!(parse_stat_cpu_times(line).unwrap(), (11, 22));
    }

    #[test]
    fn empty_name() {
        let line = "9 () S 1 9 9 0 -1 0 0 0 0 0 1 2 0 0 20 0 1 0 5 0 0";
        assert_eq!(parse_stat_cpu_times(line).unwrap(), (1, 2));
    }

    #[test]
    fn missing_closing_paren_is_malformed() {
        let err = parse_stat_cpu_times("55 (truncated S 1 55").unwrap_err();
        assert!(matches!(err, SampleError::Malformed { .. }));
    }

    #[test]
    fn line_shorter_than_stime_is_malformed() {
        let err = parse_stat_cpu_times("55 (short) S 1 55 55 0 -1 0 0 0 0 0 300").unwrap_err();
        assert!(matches!(err, SampleError::Malformed { .. }));
    }

    #[test]
    fn comm_newline_is_stripped_once() {
        assert_eq!(clean_comm("nginx\n"), "nginx");
        assert_eq!(clean_comm("nginx"), "nginx");
        assert_eq!(clean_comm("odd\n\n"), "odd\n");
    }

    #[test]
    fn ranking_is_relative_to_the_leader() {
        let records = vec![
            record(1, 25, 25),
            record(2, 50, 0),
            record(3, 30, 0),
            record(4, 5, 5),
            record(5, 0, 0),
        ];
        let ranked = rank_top_processes(records, 5);
        let percents: Vec<f64> = ranked.iter().map(|r| r.relative_percent).collect();
        assert_eq!(percents, vec![100.0, 100.0, 60.0, 20.0, 0.0]);
    }

    #[test]
    fn ties_break_on_pid_ascending() {
        let ranked = rank_top_processes(vec![record(9, 50, 0), record(3, 25, 25)], 5);
        assert_eq!(ranked[0].pid, 3);
        assert_eq!(ranked[1].pid, 9);
    }

    #[test]
    fn limit_truncates_after_sorting() {
        let records = (1..=10).map(|pid| record(pid, pid as u64 * 10, 0)).collect();
        let ranked = rank_top_processes(records, 3);
        let pids: Vec<u32> = ranked.iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![10, 9, 8]);
    }

    #[test]
    fn empty_census_ranks_to_empty() {
        assert!(rank_top_processes(Vec::new(), 5).is_empty());
    }

    #[test]
    fn all_zero_census_does_not_divide_by_zero() {
        let ranked = rank_top_processes(vec![record(1, 0, 0), record(2, 0, 0)], 5);
        assert!(ranked.iter().all(|r| r.relative_percent == 0.0));
    }

    #[test]
    fn census_summary_names_the_leader() {
        let ranked = rank_top_processes(vec![record(2, 50, 0), record(3, 10, 0)], 5);
        assert_eq!(
            census_summary(&ranked),
            "Top 2 processes: leader pid 2 (proc_2) with 50 ticks"
        );
        assert_eq!(census_summary(&[]), "Top processes: none visible");
    }
}
