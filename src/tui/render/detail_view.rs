use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, ViewState};
use crate::util::unicode;

use super::helpers::{MARGIN, field_line, field_value_col, heading, record_lines};

const ID_LABEL: &str = "Project ID";

/// ID prompt until a lookup succeeds, then the full record
pub fn render_view(frame: &mut Frame, app: &App, view: &ViewState, area: Rect) {
    let mut lines = vec![Line::from(""), heading(app, "View Project Status"), Line::from("")];

    if let Some(project) = &view.project {
        lines.extend(record_lines(app, project));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{}Esc to go back", MARGIN),
            Style::default().fg(app.theme.dim),
        )));
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    let label_w = unicode::display_width(ID_LABEL);
    lines.push(field_line(app, ID_LABEL, label_w, &view.input, true));
    frame.render_widget(Paragraph::new(lines), area);

    let x = area.x as usize + field_value_col(label_w) + view.input.cursor_col();
    let y = area.y + 3;
    if x < (area.x + area.width) as usize && y < area.y + area.height {
        frame.set_cursor_position((x as u16, y));
    }
}
