use ratatui::{
    backend::Backend,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation},
    Frame,
};

use crate::app::App;

pub fn render_help_popup<B: Backend>(f: &mut Frame, app: &mut App) {
    let block = Block::default()
        .title("Keyboard Shortcuts")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::White));

    let area = centered_rect(80, 80, f.size());
    f.render_widget(Clear, area); // this clears the background
    f.render_widget(block, area);

    let text = get_help_text();
    let line_count = text.lines.len();

    let inner_area = area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });

    // Don't scroll past the last line
    let max_scroll = line_count.saturating_sub(inner_area.height as usize) as u16;
    app.help_scroll = app.help_scroll.min(max_scroll);

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .scroll((app.help_scroll, 0));
    f.render_widget(paragraph, inner_area);

    // Make scrollbar only appear if there is overflow
    if line_count > inner_area.height as usize {
        let mut scrollbar_state = ratatui::widgets::ScrollbarState::new(line_count)
            .position(app.help_scroll as usize);

        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓")),
            inner_area,
            &mut scrollbar_state,
        );
    }
}

fn key_line<'a>(keys: &'a str, description: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", keys), Style::default().fg(Color::Green)),
        Span::raw(format!("- {}", description)),
    ])
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan),
    ))
}

fn get_help_text<'a>() -> Text<'a> {
    Text::from(vec![
        section("Fields"),
        key_line("Tab", "Next field"),
        key_line("Shift+Tab", "Previous field"),
        key_line("←/→", "Move cursor"),
        key_line("Home, Ctrl+A", "Start of line"),
        key_line("End, Ctrl+E", "End of line"),
        key_line("Ctrl+U", "Clear field"),
        key_line("Ctrl+W", "Delete previous word"),
        Line::from(""),
        section("Hosts"),
        key_line("↑, Ctrl+P", "Move up"),
        key_line("↓, Ctrl+N", "Move down"),
        key_line("PgUp/PgDn", "Move one page"),
        key_line("Ctrl+Home", "First host"),
        key_line("Ctrl+End", "Last host"),
        key_line("Enter", "Pick host into Target / Jump host"),
        Line::from("    A second pick of an ssh_config alias expands it to user@host:port"),
        Line::from("    and fills the jump host from its ProxyJump."),
        Line::from(""),
        section("Session"),
        key_line("Enter", "Connect (on option fields or with no matches)"),
        key_line("Ctrl+S", "Connect from any field"),
        key_line("Esc, Ctrl+C", "Quit without connecting"),
        Line::from(""),
        section("Help Popup"),
        key_line("F1, Esc, q", "Close help"),
        key_line("↑/k, ↓/j", "Scroll"),
    ])
}

/// helper function to create a centered rect using up certain percentage of the available rect `r`
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}
