use crate::app::{App, FieldId};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

pub fn draw_footer<B: Backend>(f: &mut Frame, app: &App, area: Rect) {
    let footer = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let (nav_text, action_text) = match app.focus() {
        FieldId::Target | FieldId::JumpHost if app.can_pick() => (
            "↑/↓: Move  [Tab] Next field  [Enter] Pick (twice to expand)",
            "[Ctrl+S] Connect  [Esc] Quit  [F1] Help",
        ),
        FieldId::Target | FieldId::JumpHost => (
            "Type to filter  [Tab] Next field",
            "[Enter] Connect  [Esc] Quit  [F1] Help",
        ),
        FieldId::Options | FieldId::Command => (
            "Space separated arguments  [Tab] Next field",
            "[Enter] Connect  [Esc] Quit  [F1] Help",
        ),
    };

    let nav_help = Paragraph::new(nav_text).style(Style::default().fg(Color::Gray));
    let action_help = Paragraph::new(action_text)
        .style(Style::default().fg(Color::Gray))
        .alignment(ratatui::layout::Alignment::Right);

    f.render_widget(nav_help, footer[0]);
    f.render_widget(action_help, footer[1]);
}
