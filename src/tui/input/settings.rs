use crossterm::event::KeyEvent;
use tracing::warn;

use crate::io::config_io;
use crate::tui::app::{App, Screen, SettingsItem};
use crate::tui::external::SoundCue;

use super::*;

pub(super) fn handle_settings(app: &mut App, key: KeyEvent) {
    let Screen::Settings { cursor } = &mut app.screen else {
        return;
    };

    if let Some(cue) = move_cursor(cursor, SettingsItem::ALL.len(), key) {
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

    match SettingsItem::ALL[*cursor] {
        SettingsItem::Sound => toggle_sound(app),
        SettingsItem::Back => app.goto(Screen::menu()),
    }
}

/// Flip the sound flag and persist it. The in-memory value changes even when
/// saving fails.
fn toggle_sound(app: &mut App) {
    app.config.sound.enabled = !app.config.sound.enabled;
    let state = if app.config.sound.enabled {
        "enabled"
    } else {
        "disabled"
    };

    match config_io::save_sound_enabled(&app.config) {
        Ok(()) => {
            app.info(format!("Sound {}", state));
            app.cue(SoundCue::Confirm);
        }
        Err(e) => {
            warn!(error = %e, "could not save sound setting");
            app.error(format!("Sound {} (not saved: {})", state, e));
        }
    }
}
