use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, FieldId};

pub fn draw_fields<B: Backend>(f: &mut Frame, app: &App, top: Rect, bottom: Rect) {
    let halves = |area: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
            .split(area)
    };
    let top = halves(top);
    let bottom = halves(bottom);
    let areas = [top[0], top[1], bottom[0], bottom[1]];

    for (id, area) in FieldId::ALL.into_iter().zip(areas) {
        draw_field(f, app, id, area);
    }
}

fn draw_field(f: &mut Frame, app: &App, id: FieldId, area: Rect) {
    let field = app.field(id);
    let is_active = app.focus() == id;

    let border_style = if is_active {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let title_style = if is_active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let title = format!(" {} {} ", if is_active { ">" } else { " " }, id.title());

    // keep the cursor inside the box
    let inner_width = usize::from(app.layout.field_width.min(area.width.saturating_sub(2)).max(1));
    let scroll = field.visual_cursor().saturating_sub(inner_width - 1);

    let paragraph = Paragraph::new(field.value())
        .style(Style::default().fg(Color::White))
        .scroll((0, scroll as u16))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title)
                .title_style(title_style),
        );
    f.render_widget(paragraph, area);

    if is_active && !app.show_help {
        f.set_cursor(
            area.x + 1 + (field.visual_cursor() - scroll) as u16,
            area.y + 1,
        );
    }
}
