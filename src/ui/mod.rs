pub mod header;
pub mod process_table;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(
        frame,
        chunks[0],
        &app.snapshot,
        &app.cpu_history,
        &app.theme,
    );
    process_table::render(frame, chunks[1], &app.snapshot.top_processes, &app.theme);
    statusbar::render(
        frame,
        chunks[2],
        app.paused,
        app.status_message.as_ref(),
        &app.theme,
    );
}

#[cfg(test)]
mod tests;
