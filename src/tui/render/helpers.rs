use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::model::project::Project;
use crate::tui::app::App;
use crate::tui::text_field::TextField;
use crate::util::unicode;

/// Left margin of every content line
pub(super) const MARGIN: &str = " ";

/// Bold screen heading
pub(super) fn heading(app: &App, text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("{}{}", MARGIN, text),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD),
    ))
}

/// One line per choice; the cursor row gets a marker and selection colors.
pub(super) fn choice_lines(app: &App, labels: &[String], cursor: usize) -> Vec<Line<'static>> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if i == cursor {
                Line::from(vec![
                    Span::styled(
                        format!("{}\u{25B8} ", MARGIN),
                        Style::default()
                            .fg(app.theme.highlight)
                            .bg(app.theme.selection_bg),
                    ),
                    Span::styled(
                        label.clone(),
                        Style::default()
                            .fg(app.theme.text_bright)
                            .bg(app.theme.selection_bg)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{}  {}", MARGIN, label),
                    Style::default().fg(app.theme.text).bg(app.theme.background),
                ))
            }
        })
        .collect()
}

/// Column where field values start for labels up to `label_width` cells
pub(super) fn field_value_col(label_width: usize) -> usize {
    MARGIN.len() + label_width + 2
}

/// `Label: value` line for a form field
pub(super) fn field_line(
    app: &App,
    label: &str,
    label_width: usize,
    field: &TextField,
    focused: bool,
) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim)
    };
    let value_style = if focused {
        Style::default().fg(app.theme.text_bright)
    } else {
        Style::default().fg(app.theme.text)
    };
    Line::from(vec![
        Span::styled(
            format!("{}{}: ", MARGIN, unicode::fit_to_width(label, label_width)),
            label_style,
        ),
        Span::styled(field.value().to_string(), value_style),
    ])
}

/// Key/value block describing every field of a project record
pub(super) fn record_lines(app: &App, project: &Project) -> Vec<Line<'static>> {
    let key_style = Style::default().fg(app.theme.dim);
    let value_style = Style::default().fg(app.theme.text_bright);
    let row = |key: &str, value: String, style: Style| {
        Line::from(vec![
            Span::styled(format!("{}{}", MARGIN, unicode::fit_to_width(key, 13)), key_style),
            Span::styled(value, style),
        ])
    };

    vec![
        row("ID", project.id.clone(), value_style.add_modifier(Modifier::BOLD)),
        row("Name", project.name.clone(), value_style),
        row(
            "Status",
            project.status.clone(),
            Style::default().fg(app.theme.status_color(&project.status)),
        ),
        row("Tags", project.tags.join(", "), Style::default().fg(app.theme.cyan)),
        row("Created", project.created_at.clone(), value_style),
        row("Description", project.description.clone(), value_style),
        row("Path", project.path.display().to_string(), value_style),
    ]
}
