use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};

use crate::format::truncate_unicode;
use crate::system::process::RankedProcess;
use crate::ui::theme::Theme;

const NAME_WIDTH: usize = 30;

pub fn render(frame: &mut Frame, area: Rect, ranked: &[RankedProcess], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            " Top Processes ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    if ranked.is_empty() {
        let empty = Paragraph::new("No processes visible.")
            .style(Style::default().fg(theme.text_secondary))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(["PID", "Name", "CPU Time", "Relative %"]).style(
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let rows = ranked.iter().map(|process| {
        Row::new([
            Cell::from(process.pid.to_string()),
            Cell::from(truncate_unicode(&process.name, NAME_WIDTH)),
            Cell::from(process.total_time.to_string()),
            Cell::from(format!("{:.1}%", process.relative_percent)),
        ])
        .style(Style::default().fg(theme.text))
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}
