use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

/// App name on the left, base directory on the right, separator below
pub fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let name = " projman";
    let base = app.config.base_dir.display().to_string();
    let room = width.saturating_sub(unicode::display_width(name) + 2);
    let base = unicode::truncate_to_width(&base, room);
    let gap = width.saturating_sub(unicode::display_width(name) + unicode::display_width(&base) + 1);

    let title = Line::from(vec![
        Span::styled(
            name,
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ".repeat(gap), Style::default().bg(bg)),
        Span::styled(base, Style::default().fg(app.theme.dim).bg(bg)),
    ]);
    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    frame.render_widget(Paragraph::new(vec![title, separator]), area);
}
