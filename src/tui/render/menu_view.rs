use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, MenuItem, SettingsItem, SubmenuItem, SubmenuState, ToolsItem};

use super::helpers::{MARGIN, choice_lines, heading};

fn render_choices(frame: &mut Frame, app: &App, title: &str, labels: &[String], cursor: usize, area: Rect) {
    let mut lines = vec![Line::from(""), heading(app, title), Line::from("")];
    lines.extend(choice_lines(app, labels, cursor));
    frame.render_widget(Paragraph::new(lines), area);
}

pub fn render_menu(frame: &mut Frame, app: &App, cursor: usize, area: Rect) {
    let labels: Vec<String> = MenuItem::ALL.iter().map(|i| i.label().to_string()).collect();
    render_choices(frame, app, "Main Menu", &labels, cursor, area);
}

pub fn render_submenu(frame: &mut Frame, app: &App, sub: &SubmenuState, area: Rect) {
    let labels: Vec<String> = SubmenuItem::ALL
        .iter()
        .map(|i| i.label().to_string())
        .collect();
    let mut lines = vec![
        Line::from(""),
        heading(app, &format!("{}  {}", sub.project.id, sub.project.name)),
        Line::from(Span::styled(
            format!("{}{}", MARGIN, sub.project.status),
            Style::default().fg(app.theme.status_color(&sub.project.status)),
        )),
        Line::from(""),
    ];
    lines.extend(choice_lines(app, &labels, sub.cursor));
    frame.render_widget(Paragraph::new(lines), area);
}

pub fn render_settings(frame: &mut Frame, app: &App, cursor: usize, area: Rect) {
    let labels: Vec<String> = SettingsItem::ALL
        .iter()
        .map(|item| match item {
            SettingsItem::Sound => format!(
                "Sound: {}",
                if app.config.sound.enabled { "On" } else { "Off" }
            ),
            SettingsItem::Back => "Back".to_string(),
        })
        .collect();
    render_choices(frame, app, "Settings", &labels, cursor, area);
}

pub fn render_tools(frame: &mut Frame, app: &App, cursor: usize, area: Rect) {
    let labels: Vec<String> = ToolsItem::ALL.iter().map(|i| i.label().to_string()).collect();
    render_choices(frame, app, "Tools", &labels, cursor, area);
}
