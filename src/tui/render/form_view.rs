use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, CREATE_FIELDS, CreateState, TAG_FIELDS, TagsState};
use crate::tui::text_field::TextField;
use crate::util::unicode;

use super::helpers::{MARGIN, field_line, field_value_col, heading, record_lines};

/// Rows above the first field: blank, heading, blank
const FIELDS_TOP: u16 = 3;

fn label_width(labels: &[&str]) -> usize {
    labels
        .iter()
        .map(|l| unicode::display_width(l))
        .max()
        .unwrap_or(0)
}

/// Place the terminal cursor inside the focused field
fn place_cursor(frame: &mut Frame, area: Rect, row: usize, label_w: usize, field: &TextField) {
    let x = area.x as usize + field_value_col(label_w) + field.cursor_col();
    let y = area.y as usize + FIELDS_TOP as usize + row;
    if x < (area.x + area.width) as usize && y < (area.y + area.height) as usize {
        frame.set_cursor_position((x as u16, y as u16));
    }
}

pub fn render_create(frame: &mut Frame, app: &App, form: &CreateState, area: Rect) {
    let label_w = label_width(&CREATE_FIELDS);
    let mut lines = vec![Line::from(""), heading(app, "Create New Project"), Line::from("")];

    if let Some(project) = &form.created {
        lines.extend(record_lines(app, project));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{}Project created. Press Enter to return to the menu.", MARGIN),
            Style::default()
                .fg(app.theme.green)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    for (i, label) in CREATE_FIELDS.iter().enumerate() {
        lines.push(field_line(app, label, label_w, &form.fields[i], i == form.focus));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("{}Tags are comma separated. IDs keep only A-Z, 0-9 and -.", MARGIN),
        Style::default().fg(app.theme.dim),
    )));
    frame.render_widget(Paragraph::new(lines), area);

    place_cursor(frame, area, form.focus, label_w, &form.fields[form.focus]);
}

pub fn render_tags(frame: &mut Frame, app: &App, form: &TagsState, area: Rect) {
    let label_w = label_width(&TAG_FIELDS);
    let fields = [&form.input, &form.output];

    let mut lines = vec![Line::from(""), heading(app, "Generate Tags"), Line::from("")];
    for (i, label) in TAG_FIELDS.iter().enumerate() {
        lines.push(field_line(app, label, label_w, fields[i], i == form.focus));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "{}format {}  start {}",
            MARGIN, app.config.tagging.format, app.config.tagging.start
        ),
        Style::default().fg(app.theme.dim),
    )));

    if let Some(summary) = &form.summary {
        lines.push(Line::from(""));
        for ((category, subcat), count) in summary {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}{}/{}", MARGIN, category, subcat),
                    Style::default().fg(app.theme.cyan),
                ),
                Span::styled(
                    format!("  {}", count),
                    Style::default().fg(app.theme.text_bright),
                ),
            ]));
        }
    }
    frame.render_widget(Paragraph::new(lines), area);

    place_cursor(frame, area, form.focus, label_w, fields[form.focus]);
}
