use crossterm::event::KeyEvent;

use crate::io::archive;
use crate::model::project::Project;
use crate::tui::app::{App, Screen, SubmenuItem, ViewState};
use crate::tui::external::SoundCue;
use crate::tui::text_field::TextField;

use super::*;

pub(super) fn handle_submenu(app: &mut App, key: KeyEvent) {
    let Screen::ProjectSubmenu(sub) = &mut app.screen else {
        return;
    };

    if let Some(cue) = move_cursor(&mut sub.cursor, SubmenuItem::ALL.len(), key) {
        app.cue(cue);
        return;
    }
    if is_back(key) {
        app.goto(Screen::menu());
        return;
    }
    if !is_select(key) {
        return;
    }

    let item = SubmenuItem::ALL[sub.cursor];
    let project = sub.project.clone();
    app.cue(SoundCue::Select);
    match item {
        SubmenuItem::ViewStatus => show_status(app, &project.id),
        SubmenuItem::Archive => archive_project(app, project),
        SubmenuItem::OpenFolder => {
            app.open_folder(&project.path);
            app.goto(Screen::menu());
            app.info(format!("Opened {}", project.path.display()));
        }
        SubmenuItem::Back => app.goto(Screen::menu()),
    }
}

/// Enter the status view for `id`, re-reading the record so the view never
/// shows a stale copy.
pub(super) fn show_status(app: &mut App, id: &str) {
    let input = TextField::with_value(id);
    match app.store.read(id) {
        Ok(project) => app.goto(Screen::ViewProject(ViewState {
            input,
            project: Some(project),
        })),
        Err(e) => {
            app.goto(Screen::ViewProject(ViewState {
                input,
                project: None,
            }));
            app.error(e.to_string());
        }
    }
}

fn archive_project(app: &mut App, mut project: Project) {
    match archive::archive(&app.store, &mut project) {
        Ok(outcome) => {
            app.goto(Screen::menu());
            app.info(format!(
                "Archived {} to {} ({:.2} KB)",
                project.id,
                outcome.artifact.display(),
                outcome.size_kb()
            ));
            app.cue(SoundCue::Confirm);
        }
        Err(e) => app.error(format!("Archive failed: {}", e)),
    }
}
