use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::format::format_uptime;
use crate::system::snapshot::Snapshot;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            " hostwatch ",
            Style::default()
                .fg(theme.title_fg)
                .bg(theme.title_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Procs: {}", snapshot.process_count),
            Style::default().fg(theme.text_primary),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Up: {}", format_uptime(snapshot.uptime)),
            Style::default().fg(theme.text_primary),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
