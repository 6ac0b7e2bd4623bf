use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Gauge};

use crate::system::snapshot::Snapshot;
use crate::ui::theme::Theme;

pub const HEIGHT: u16 = 9;

/// Percent to gauge ratio, clamped into `[0, 1]`. NaN reads as empty.
pub fn gauge_ratio(pct: f32) -> f64 {
    if pct.is_nan() {
        return 0.0;
    }
    (f64::from(pct) / 100.0).clamp(0.0, 1.0)
}

pub fn render(frame: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    render_bar(frame, rows[0], " CPU ", snapshot.cpu_usage_pct, theme.cpu, theme);
    render_bar(
        frame,
        rows[1],
        " Memory ",
        snapshot.memory.usage_pct,
        theme.memory,
        theme,
    );
    render_bar(
        frame,
        rows[2],
        " Disk ",
        snapshot.disk.usage_pct,
        theme.disk,
        theme,
    );
}

fn render_bar(frame: &mut Frame, area: Rect, title: &str, pct: f32, color: Color, theme: &Theme) {
    let ratio = gauge_ratio(pct);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(color).bg(theme.gauge_unfilled))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));

    frame.render_widget(gauge, area);
}
