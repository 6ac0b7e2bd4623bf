use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::format::format_interval;
use crate::ui::theme::Theme;

pub struct StatusInfo<'a> {
    pub quit_key: &'a str,
    pub refresh_interval: Duration,
    pub skipped_ticks: u64,
    pub last_error: Option<&'a str>,
}

pub fn render(frame: &mut Frame, area: Rect, status: &StatusInfo, theme: &Theme) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    let mut spans = Vec::new();
    spans.extend(pill_spans(status.quit_key, "Quit", theme));
    spans.push(Span::styled(
        format!("  every {}", format_interval(status.refresh_interval)),
        Style::default().fg(theme.pill_desc_fg),
    ));

    if status.skipped_ticks > 0 {
        let message = match status.last_error {
            Some(err) => format!("  {} skipped, last: {err}", status.skipped_ticks),
            None => format!("  {} skipped", status.skipped_ticks),
        };
        spans.push(Span::styled(
            message,
            Style::default()
                .fg(theme.status_err)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {desc}"), Style::default().fg(theme.pill_desc_fg)),
    ]
}
