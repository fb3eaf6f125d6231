mod create;
mod list;
mod menu;
mod settings;
mod submenu;
mod tags;
mod tools;
mod view;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Screen};
use super::external::SoundCue;

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use create::*;
#[allow(unused_imports)]
use list::*;
#[allow(unused_imports)]
use menu::*;
#[allow(unused_imports)]
use settings::*;
#[allow(unused_imports)]
use submenu::*;
#[allow(unused_imports)]
use tags::*;
#[allow(unused_imports)]
use tools::*;
#[allow(unused_imports)]
use view::*;

/// Handle a key event on the current screen
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if is_ctrl(key, 'c') {
        app.should_quit = true;
        return;
    }

    match &app.screen {
        Screen::Menu { .. } => handle_menu(app, key),
        Screen::ProjectList(_) => handle_list(app, key),
        Screen::CreateProject(_) => handle_create(app, key),
        Screen::ViewProject(_) => handle_view(app, key),
        Screen::ProjectSubmenu(_) => handle_submenu(app, key),
        Screen::Settings { .. } => handle_settings(app, key),
        Screen::Tools { .. } => handle_tools(app, key),
        Screen::GenerateTags(_) => handle_tags(app, key),
    }
}

fn is_ctrl(key: KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

fn is_plain(key: KeyEvent) -> bool {
    !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn is_up(key: KeyEvent) -> bool {
    key.code == KeyCode::Up || (is_plain(key) && key.code == KeyCode::Char('k'))
}

fn is_down(key: KeyEvent) -> bool {
    key.code == KeyCode::Down || (is_plain(key) && key.code == KeyCode::Char('j'))
}

fn is_select(key: KeyEvent) -> bool {
    key.code == KeyCode::Enter || (is_plain(key) && key.code == KeyCode::Char(' '))
}

/// Esc, or `q`/`b` on screens without text input
fn is_back(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (is_plain(key) && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('b')))
}

/// Move a list cursor within `[0, len - 1]` for Up/Down keys. Returns the
/// cue to play when the cursor actually moved, `None` when the key was not a
/// movement key or the cursor was already at the edge.
fn move_cursor(cursor: &mut usize, len: usize, key: KeyEvent) -> Option<SoundCue> {
    if is_up(key) {
        if *cursor > 0 {
            *cursor -= 1;
            return Some(SoundCue::NavUp);
        }
    } else if is_down(key) && *cursor + 1 < len {
        *cursor += 1;
        return Some(SoundCue::NavDown);
    }
    None
}
