mod fields;
mod footer;
mod help_popup;
mod hosts_table;
mod status_bar;

use crate::app::App;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame,
};

use fields::draw_fields;
use footer::draw_footer;
use help_popup::render_help_popup;
use hosts_table::draw_hosts_table;
use status_bar::draw_status_bar;

pub fn draw<B: Backend>(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Target / jump host
                Constraint::Length(3), // Options / command
                Constraint::Min(3),    // Hosts table
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Footer
            ]
            .as_ref(),
        )
        .split(f.size());

    draw_fields::<B>(f, app, chunks[0], chunks[1]);
    draw_hosts_table::<B>(f, app, chunks[2]);
    draw_status_bar::<B>(f, app, chunks[3]);
    draw_footer::<B>(f, app, chunks[4]);

    if app.show_help {
        render_help_popup::<B>(f, app);
    }
}
