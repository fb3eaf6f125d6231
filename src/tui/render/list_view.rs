use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::project::Project;
use crate::tui::app::{App, ListState};
use crate::util::unicode;

use super::helpers::{MARGIN, heading};

const ID_W: usize = 14;
const STATUS_W: usize = 10;
const CREATED_W: usize = 10;

/// Lines above the table rows: blank, heading, filter, column header
const CHROME_ROWS: usize = 4;

/// Render the project table with the live filter line
pub fn render_list(frame: &mut Frame, app: &App, list: &ListState, area: Rect) {
    let width = area.width as usize;
    let name_w = width.saturating_sub(MARGIN.len() + ID_W + STATUS_W + CREATED_W + 3 + 2);

    let mut lines = vec![
        Line::from(""),
        heading(app, &format!("Projects ({})", list.projects.len())),
        filter_line(app, list),
        Line::from(Span::styled(
            format!(
                "{}  {} {} {} {}",
                MARGIN,
                unicode::fit_to_width("ID", ID_W),
                unicode::fit_to_width("Name", name_w),
                unicode::fit_to_width("Status", STATUS_W),
                "Created"
            ),
            Style::default()
                .fg(app.theme.dim)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    if list.projects.is_empty() {
        lines.push(empty_line(app, "No valid projects found."));
    } else if list.filtered.is_empty() {
        lines.push(empty_line(
            app,
            &format!("No projects match \"{}\"", list.query.value()),
        ));
    }

    // Keep the cursor row on screen
    let visible = (area.height as usize).saturating_sub(CHROME_ROWS).max(1);
    let scroll = list.cursor.saturating_sub(visible - 1);

    for (row, &idx) in list.filtered.iter().enumerate().skip(scroll).take(visible) {
        let project = &list.projects[idx];
        lines.push(project_line(app, project, name_w, row == list.cursor));
    }

    frame.render_widget(Paragraph::new(lines), area);

    if list.searching {
        let x = area.x as usize + MARGIN.len() + 1 + list.query.cursor_col();
        frame.set_cursor_position((x.min(u16::MAX as usize) as u16, area.y + 2));
    }
}

fn filter_line(app: &App, list: &ListState) -> Line<'static> {
    if list.searching {
        Line::from(vec![
            Span::styled(
                format!("{}/", MARGIN),
                Style::default().fg(app.theme.highlight),
            ),
            Span::styled(
                list.query.value().to_string(),
                Style::default().fg(app.theme.text_bright),
            ),
        ])
    } else if !list.query.value().is_empty() {
        Line::from(Span::styled(
            format!("{}filter: {}", MARGIN, list.query.value()),
            Style::default().fg(app.theme.dim),
        ))
    } else {
        Line::from("")
    }
}

fn empty_line(app: &App, text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("{}  {}", MARGIN, text),
        Style::default().fg(app.theme.dim),
    ))
}

fn project_line(app: &App, project: &Project, name_w: usize, selected: bool) -> Line<'static> {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let marker = if selected { "\u{25B8} " } else { "  " };
    let created: String = project.created_at.chars().take(CREATED_W).collect();

    Line::from(vec![
        Span::styled(
            format!("{}{}", MARGIN, marker),
            Style::default().fg(app.theme.highlight).bg(bg),
        ),
        Span::styled(
            format!("{} ", unicode::fit_to_width(&project.id, ID_W)),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", unicode::fit_to_width(&project.name, name_w)),
            Style::default().fg(app.theme.text).bg(bg),
        ),
        Span::styled(
            format!("{} ", unicode::fit_to_width(&project.status, STATUS_W)),
            Style::default()
                .fg(app.theme.status_color(&project.status))
                .bg(bg),
        ),
        Span::styled(created, Style::default().fg(app.theme.dim).bg(bg)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Screen;
    use crate::tui::render::test_helpers::*;
    use crate::tui::text_field::TextField;
    use tempfile::TempDir;

    fn list_app(tmp: &TempDir, ids: &[&str]) -> App {
        let (mut app, _) = test_app(tmp.path());
        seed(&app, ids);
        app.open_project_list();
        app
    }

    #[test]
    fn rows_show_columns() {
        let tmp = TempDir::new().unwrap();
        let app = list_app(&tmp, &["CP-1201", "LINE-4"]);
        let output = render_app(&app);
        assert!(output.contains("Projects (2)"));
        assert!(output.contains("ID"));
        assert!(output.contains("Created"));
        assert!(output.contains("\u{25B8} CP-1201"));
        assert!(output.contains("LINE-4 project"));
        assert!(output.contains("active"));
    }

    #[test]
    fn empty_store_message() {
        let tmp = TempDir::new().unwrap();
        let app = list_app(&tmp, &[]);
        assert!(render_app(&app).contains("No valid projects found."));
    }

    #[test]
    fn filter_line_and_no_match_message() {
        let tmp = TempDir::new().unwrap();
        let mut app = list_app(&tmp, &["A-1"]);
        if let Screen::ProjectList(list) = &mut app.screen {
            list.searching = true;
            list.query = TextField::with_value("zz");
            list.refilter();
        }
        let output = render_app(&app);
        assert!(output.contains(" /zz"));
        assert!(output.contains("No projects match \"zz\""));
        assert!(!output.contains("A-1 project"));
    }

    #[test]
    fn cursor_row_stays_visible() {
        let tmp = TempDir::new().unwrap();
        let ids: Vec<String> = (0..30).map(|i| format!("P-{:02}", i)).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let mut app = list_app(&tmp, &refs);
        if let Screen::ProjectList(list) = &mut app.screen {
            list.cursor = 29;
        }
        let output = render_app(&app);
        assert!(output.contains("\u{25B8} P-29"));
        assert!(!output.contains("P-00 "));
    }
}
