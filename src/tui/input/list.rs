use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Screen, SubmenuState};
use crate::tui::external::SoundCue;

use super::*;

pub(super) fn handle_list(app: &mut App, key: KeyEvent) {
    let Screen::ProjectList(list) = &mut app.screen else {
        return;
    };

    if list.searching {
        match key.code {
            KeyCode::Esc => {
                list.searching = false;
                list.query.clear();
                list.refilter();
            }
            KeyCode::Enter => list.searching = false,
            KeyCode::Up | KeyCode::Down => {
                if let Some(cue) = move_cursor(&mut list.cursor, list.filtered.len(), key) {
                    app.cue(cue);
                }
            }
            _ => {
                if list.query.handle_key(key) {
                    list.refilter();
                }
            }
        }
        return;
    }

    if let Some(cue) = move_cursor(&mut list.cursor, list.filtered.len(), key) {
        app.cue(cue);
        return;
    }
    if is_ctrl(key, 'f') || (is_plain(key) && key.code == KeyCode::Char('/')) {
        list.searching = true;
        return;
    }
    if is_select(key) {
        if let Some(project) = list.selected().cloned() {
            app.cue(SoundCue::Select);
            app.goto(Screen::ProjectSubmenu(SubmenuState { project, cursor: 0 }));
        }
        return;
    }
    if is_back(key) {
        app.goto(Screen::menu());
    }
}
