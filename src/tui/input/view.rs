use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::id;
use crate::tui::app::{App, Screen};
use crate::tui::external::SoundCue;

use super::*;

pub(super) fn handle_view(app: &mut App, key: KeyEvent) {
    let Screen::ViewProject(view) = &mut app.screen else {
        return;
    };

    // A displayed record stays until cancel
    if view.project.is_some() {
        if is_back(key) {
            app.goto(Screen::menu());
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.goto(Screen::menu()),
        KeyCode::Enter => {
            let id = id::normalize(view.input.value());
            if id.is_empty() {
                app.error("Invalid ID");
                return;
            }
            match app.store.read(&id) {
                Ok(project) => {
                    if let Screen::ViewProject(view) = &mut app.screen {
                        view.project = Some(project);
                    }
                    app.status = None;
                    app.cue(SoundCue::Confirm);
                }
                Err(e) => app.error(e.to_string()),
            }
        }
        _ => {
            view.input.handle_key(key);
        }
    }
}
