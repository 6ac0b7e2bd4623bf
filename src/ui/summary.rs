use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

use crate::format::{format_mb, format_uptime, truncate_unicode};
use crate::system::snapshot::Snapshot;
use crate::ui::theme::Theme;

const PROCESS_NAME_WIDTH: usize = 32;

/// Label/value pairs shown in the summary table, in display order.
pub fn summary_rows(snapshot: &Snapshot) -> Vec<(&'static str, String)> {
    vec![
        ("CPU Usage", format!("{}%", snapshot.cpu_usage_pct)),
        (
            "Memory Used",
            format!(
                "{} / {}",
                format_mb(snapshot.memory.used_mb),
                format_mb(snapshot.memory.total_mb)
            ),
        ),
        (
            "Disk Used",
            format!(
                "{} / {}",
                format_mb(snapshot.disk.used_mb),
                format_mb(snapshot.disk.total_mb)
            ),
        ),
        ("Network Sent", format_mb(snapshot.network.sent_mb)),
        ("Network Received", format_mb(snapshot.network.recv_mb)),
        ("Uptime", format_uptime(snapshot.uptime)),
        (
            "Top Process",
            snapshot.top_process.display_with(|p| {
                format!(
                    "{} ({:.2}%)",
                    truncate_unicode(&p.name, PROCESS_NAME_WIDTH),
                    p.cpu_pct
                )
            }),
        ),
        (
            "Battery",
            snapshot.battery.display_with(|b| {
                let source = if b.plugged_in {
                    "Plugged in"
                } else {
                    "On battery"
                };
                format!("{:.0}% ({source})", b.percent)
            }),
        ),
    ]
}

pub fn render(frame: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let label_style = Style::default()
        .fg(theme.table_label)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(theme.table_value);

    let rows: Vec<Row> = summary_rows(snapshot)
        .into_iter()
        .map(|(label, value)| {
            Row::new(vec![
                Cell::from(Span::styled(label, label_style)),
                Cell::from(Line::from(Span::styled(value, value_style)).right_aligned()),
            ])
        })
        .collect();

    let header = Row::new(vec![
        Cell::from("Description"),
        Cell::from(Line::from("Value").right_aligned()),
    ])
    .style(
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::BOLD),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            " System ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let table = Table::new(rows, [Constraint::Length(18), Constraint::Min(10)])
        .header(header)
        .block(block)
        .column_spacing(1);

    frame.render_widget(table, area);
}
