use std::collections::VecDeque;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph, Sparkline};

use crate::system::cpu::CpuReading;
use crate::system::snapshot::SystemSnapshot;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SystemSnapshot,
    cpu_history: &VecDeque<u64>,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    render_branding(frame, chunks[0], snapshot, theme);
    render_memory_gauge(frame, chunks[1], snapshot, theme);
    render_cpu_sparkline(frame, chunks[2], snapshot, theme, cpu_history);
}

fn render_branding(frame: &mut Frame, area: Rect, snapshot: &SystemSnapshot, theme: &Theme) {
    let block = bordered_block(theme, None);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = Line::from(vec![
        Span::styled(
            " sysmon ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            snapshot.taken_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            Style::default().fg(theme.text_secondary),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Top {}", snapshot.top_processes.len()),
            Style::default().fg(theme.text_secondary),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_memory_gauge(frame: &mut Frame, area: Rect, snapshot: &SystemSnapshot, theme: &Theme) {
    let memory = &snapshot.memory;
    let ratio = (memory.used_percent / 100.0).clamp(0.0, 1.0);
    let fill = if memory.used_percent >= 90.0 {
        theme.gauge_critical
    } else {
        theme.gauge_filled
    };

    let gauge = Gauge::default()
        .block(bordered_block(theme, Some(" Memory ")))
        .gauge_style(Style::default().fg(fill).bg(theme.gauge_unfilled))
        .ratio(ratio)
        .label(format!(
            "{}/{} MB ({:.1}%)",
            memory.used_mb, memory.total_mb, memory.used_percent
        ));

    frame.render_widget(gauge, area);
}

fn render_cpu_sparkline(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SystemSnapshot,
    theme: &Theme,
    cpu_history: &VecDeque<u64>,
) {
    let title = match snapshot.cpu {
        CpuReading::Warmup => " CPU warming up ".to_string(),
        CpuReading::Usage(pct) => format!(" CPU {pct:.1}% "),
    };

    let block = bordered_block(theme, None).title(Span::styled(
        title,
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::BOLD),
    ));

    let cpu_data: Vec<u64> = cpu_history.iter().copied().collect();
    let sparkline = Sparkline::default()
        .block(block)
        .data(&cpu_data)
        .max(10000)
        .style(Style::default().fg(theme.sparkline));

    frame.render_widget(sparkline, area);
}

fn bordered_block<'a>(theme: &Theme, title: Option<&'a str>) -> Block<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    match title {
        Some(title) => block.title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        )),
        None => block,
    }
}
