use ratatui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use crate::app::App;

pub fn draw_status_bar<B: Backend>(f: &mut Frame, app: &App, area: Rect) {
    if let Some(message) = &app.status_message {
        let paragraph = Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Yellow))
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    // Preview what a pick would resolve to
    if let Some(host) = app.highlighted_host().filter(|_| app.can_pick()) {
        let mut spans = vec![
            Span::styled(host.alias.as_str(), Style::default().fg(Color::White)),
            Span::styled(" → ", Style::default().fg(Color::Gray)),
            Span::styled(host.connection_string(), Style::default().fg(Color::Green)),
        ];
        if let Some(jump) = &host.proxy_jump {
            spans.push(Span::styled(
                format!("  via {}", jump),
                Style::default().fg(Color::Cyan),
            ));
        }
        let paragraph =
            Paragraph::new(Line::from(spans)).alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, area);
    }
}
