use ratatui::{
    backend::Backend,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::models::{HostRecord, Source};

pub fn draw_hosts_table<B: Backend>(f: &mut Frame, app: &mut App, area: Rect) {
    let is_active = app.can_pick();
    let title = format!(
        " {} 👤 Hosts ({}/{}) ",
        if is_active { ">" } else { " " },
        app.filtered_len(),
        app.catalog.len()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_active {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        })
        .title(title);

    if app.filtered_len() == 0 {
        let message = if app.catalog.is_empty() {
            "No hosts found in any source".to_string()
        } else {
            "No hosts match the current filter".to_string()
        };
        let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(Color::Gray)))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(["Alias", "User", "Hostname", "Port", "Source"].map(|title| {
        Cell::from(title).style(Style::default().add_modifier(Modifier::UNDERLINED))
    }))
    .style(Style::default().add_modifier(Modifier::BOLD));

    let query = if app.focus().filters() {
        app.field(app.focus()).value().to_lowercase()
    } else {
        String::new()
    };

    let rows: Vec<Row> = app
        .filtered_hosts()
        .map(|host| {
            Row::new(vec![
                Cell::from(Line::from(alias_spans(&host.alias, &query))),
                Cell::from(host.user.clone().unwrap_or_default()),
                Cell::from(host.hostname().to_string()),
                Cell::from(host.port.clone().unwrap_or_default()),
                Cell::from(Span::styled(
                    host.source().label(),
                    Style::default().fg(source_color(host)),
                )),
            ])
        })
        .collect();

    let widths = app.layout.columns.map(Constraint::Length);
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

/// Marks the filter match inside the alias.
fn alias_spans(alias: &str, query: &str) -> Vec<Span<'static>> {
    if query.is_empty() || !alias.is_ascii() {
        return vec![Span::raw(alias.to_string())];
    }
    match alias.to_ascii_lowercase().find(query) {
        Some(start) => {
            let end = start + query.len();
            vec![
                Span::raw(alias[..start].to_string()),
                Span::styled(
                    alias[start..end].to_string(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw(alias[end..].to_string()),
            ]
        }
        None => vec![Span::raw(alias.to_string())],
    }
}

fn source_color(host: &HostRecord) -> Color {
    match host.source() {
        Source::ConfigFile => Color::LightYellow,
        Source::HostsFile => Color::Cyan,
        Source::KnownHosts => Color::Gray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_highlight_splits_around_match() {
        let spans = alias_spans("Prod-DB", "db");
        let text: Vec<_> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, vec!["Prod-", "DB", ""]);
        assert_eq!(alias_spans("web", "").len(), 1);
        assert_eq!(alias_spans("web", "x").len(), 1);
    }
}
