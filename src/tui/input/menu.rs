use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, CreateState, MenuItem, Screen, ViewState};
use crate::tui::external::SoundCue;

use super::*;

pub(super) fn handle_menu(app: &mut App, key: KeyEvent) {
    let Screen::Menu { cursor } = &mut app.screen else {
        return;
    };

    if let Some(cue) = move_cursor(cursor, MenuItem::ALL.len(), key) {
        app.cue(cue);
        return;
    }
    if is_select(key) {
        let item = MenuItem::ALL[*cursor];
        app.cue(SoundCue::Select);
        select_menu_item(app, item);
        return;
    }
    if is_plain(key) && key.code == KeyCode::Char('q') {
        app.should_quit = true;
    }
}

fn select_menu_item(app: &mut App, item: MenuItem) {
    match item {
        MenuItem::Projects => app.open_project_list(),
        MenuItem::CreateProject => app.goto(Screen::CreateProject(CreateState::default())),
        MenuItem::ViewProject => app.goto(Screen::ViewProject(ViewState::default())),
        MenuItem::Tools => app.goto(Screen::Tools { cursor: 0 }),
        MenuItem::Settings => app.goto(Screen::Settings { cursor: 0 }),
        MenuItem::Quit => app.should_quit = true,
    }
}
