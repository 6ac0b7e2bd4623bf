pub mod gauges;
pub mod header;
pub mod statusbar;
pub mod summary;
pub mod theme;

use ratatui::backend::{Backend, TestBackend};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::{Frame, Terminal};

use crate::system::snapshot::Snapshot;
use crate::ui::statusbar::StatusInfo;
use crate::ui::theme::Theme;

/// Draws one full dashboard frame. Every cell is rewritten, so whatever the
/// previous tick left on screen is gone.
pub fn draw(frame: &mut Frame, snapshot: &Snapshot, theme: &Theme, status: &StatusInfo) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(gauges::HEIGHT),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(frame, chunks[0], snapshot, theme);
    gauges::render(frame, chunks[1], snapshot, theme);
    summary::render(frame, chunks[2], snapshot, theme);
    statusbar::render(frame, chunks[3], status, theme);
}

/// Renders one frame off-screen and returns it as plain text, one line per
/// row with trailing blanks trimmed.
pub fn render_to_text(
    snapshot: &Snapshot,
    theme: &Theme,
    status: &StatusInfo,
    width: u16,
    height: u16,
) -> Result<String, <TestBackend as Backend>::Error> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|frame| draw(frame, snapshot, theme, status))?;
    Ok(buffer_lines(terminal.backend().buffer()).join("\n"))
}

fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (0..area.height)
        .map(|y| {
            let row: String = (0..area.width)
                .filter_map(|x| buf.cell((x, y)).map(|cell| cell.symbol().to_string()))
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}
