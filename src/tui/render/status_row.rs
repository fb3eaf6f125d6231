use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Screen, StatusKind};
use crate::util::unicode;

/// Key hints for the active screen
fn hints(screen: &Screen) -> &'static str {
    match screen {
        Screen::Menu { .. } => "\u{2191}\u{2193}/jk move  Enter select  q quit",
        Screen::ProjectList(list) if list.searching => "type to filter  Enter keep  Esc clear",
        Screen::ProjectList(_) => "\u{2191}\u{2193}/jk move  Enter open  / search  Esc back",
        Screen::CreateProject(form) if form.created.is_some() => "Enter menu",
        Screen::CreateProject(_) => "Tab/Enter next  Shift-Tab prev  Esc cancel",
        Screen::ViewProject(view) if view.project.is_some() => "Esc back",
        Screen::ViewProject(_) => "Enter look up  Esc cancel",
        Screen::ProjectSubmenu(_) | Screen::Settings { .. } | Screen::Tools { .. } => {
            "\u{2191}\u{2193}/jk move  Enter select  Esc back"
        }
        Screen::GenerateTags(_) => "Tab next  Enter generate  Esc back",
    }
}

/// Bottom row: the pending status message, or key hints when there is none
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let (text, style) = match &app.status {
        Some(msg) => {
            let color = match msg.kind {
                StatusKind::Error => app.theme.red,
                StatusKind::Info => app.theme.text_bright,
            };
            (msg.text.as_str(), Style::default().fg(color))
        }
        None => (hints(&app.screen), Style::default().fg(app.theme.dim)),
    };
    let text = unicode::truncate_to_width(&format!(" {}", text), width);
    let line = Line::from(Span::styled(text, style.bg(app.theme.background)));
    frame.render_widget(Paragraph::new(line), area);
}
