use std::collections::VecDeque;
use std::time::Instant;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::system::cpu::CpuReading;
use crate::system::memory::MemorySample;
use crate::system::process::RankedProcess;
use crate::system::snapshot::SystemSnapshot;
use crate::ui::theme::Theme;
use crate::ui::{header, process_table, statusbar};

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    let buf = terminal.backend().buffer();
    buffer_to_string(buf)
}

fn ranked(pid: u32, name: &str, total_time: u64, relative_percent: f64) -> RankedProcess {
    RankedProcess {
        pid,
        name: name.to_string(),
        total_time,
        relative_percent,
    }
}

fn make_snapshot() -> SystemSnapshot {
    SystemSnapshot {
        cpu: CpuReading::Usage(37.5),
        memory: MemorySample::from_kib(16777216, 8388608),
        top_processes: vec![
            ranked(101, "builder", 5000, 100.0),
            ranked(7, "indexer", 2500, 50.0),
        ],
        ..SystemSnapshot::default()
    }
}

#[test]
fn header_shows_branding_memory_and_cpu() {
    let snapshot = make_snapshot();
    let mut cpu_history = VecDeque::new();
    cpu_history.extend([1200u64, 3300, 3750]);

    let output = render_to_string(100, 4, |frame| {
        header::render(
            frame,
            Rect::new(0, 0, 100, 4),
            &snapshot,
            &cpu_history,
            &Theme::dark(),
        );
    });

    assert!(output.contains("sysmon"));
    assert!(output.contains("8192/16384 MB (50.0%)"));
    assert!(output.contains("CPU 37.5%"));
}

#[test]
fn header_shows_warmup_before_the_second_sample() {
    let snapshot = SystemSnapshot {
        cpu: CpuReading::Warmup,
        ..make_snapshot()
    };

    let output = render_to_string(100, 4, |frame| {
        header::render(
            frame,
            Rect::new(0, 0, 100, 4),
            &snapshot,
            &VecDeque::new(),
            &Theme::dark(),
        );
    });

    assert!(output.contains("CPU warming up"));
}

#[test]
fn process_table_lists_ranked_rows() {
    let snapshot = make_snapshot();

    let output = render_to_string(80, 8, |frame| {
        process_table::render(
            frame,
            Rect::new(0, 0, 80, 8),
            &snapshot.top_processes,
            &Theme::dark(),
        );
    });

    assert!(output.contains("PID"));
    assert!(output.contains("builder"));
    assert!(output.contains("indexer"));
    assert!(output.contains("100.0%"));
    assert!(output.contains("50.0%"));
}

#[test]
fn process_table_empty_census_message() {
    let output = render_to_string(80, 6, |frame| {
        process_table::render(frame, Rect::new(0, 0, 80, 6), &[], &Theme::dark());
    });

    assert!(output.contains("No processes visible."));
    assert!(!output.contains("PID"));
}

#[test]
fn statusbar_hints_and_pause_state() {
    let output = render_to_string(80, 1, |frame| {
        statusbar::render(frame, Rect::new(0, 0, 80, 1), false, None, &Theme::dark());
    });
    assert!(output.contains("Quit"));
    assert!(output.contains("Pause"));

    let paused = render_to_string(80, 1, |frame| {
        statusbar::render(frame, Rect::new(0, 0, 80, 1), true, None, &Theme::dark());
    });
    assert!(paused.contains("Resume"));
    assert!(paused.contains("PAUSED"));
}

#[test]
fn statusbar_failure_message_wins_over_hints() {
    let msg = ("sample failed: cannot read /proc/stat".to_string(), Instant::now());
    let output = render_to_string(80, 1, |frame| {
        statusbar::render(frame, Rect::new(0, 0, 80, 1), false, Some(&msg), &Theme::dark());
    });
    assert!(output.contains("sample failed"));
    assert!(!output.contains("Quit"));
}
