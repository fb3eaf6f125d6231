pub mod detail_view;
pub mod form_view;
pub mod helpers;
pub mod list_view;
pub mod menu_view;
pub mod status_row;
pub mod title_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Screen};

/// Main render function, dispatches to the renderer of the active screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    title_bar::render_title_bar(frame, app, chunks[0]);

    match &app.screen {
        Screen::Menu { cursor } => menu_view::render_menu(frame, app, *cursor, chunks[1]),
        Screen::ProjectList(list) => list_view::render_list(frame, app, list, chunks[1]),
        Screen::CreateProject(form) => form_view::render_create(frame, app, form, chunks[1]),
        Screen::ViewProject(view) => detail_view::render_view(frame, app, view, chunks[1]),
        Screen::ProjectSubmenu(sub) => menu_view::render_submenu(frame, app, sub, chunks[1]),
        Screen::Settings { cursor } => {
            menu_view::render_settings(frame, app, *cursor, chunks[1])
        }
        Screen::Tools { cursor } => menu_view::render_tools(frame, app, *cursor, chunks[1]),
        Screen::GenerateTags(form) => form_view::render_tags(frame, app, form, chunks[1]),
    }

    status_row::render_status_row(frame, app, chunks[2]);
}
