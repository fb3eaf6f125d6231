use crossterm::event::KeyEvent;

use crate::tui::app::{App, Screen, TagsState, ToolsItem};
use crate::tui::external::SoundCue;

use super::*;

pub(super) fn handle_tools(app: &mut App, key: KeyEvent) {
    let Screen::Tools { cursor } = &mut app.screen else {
        return;
    };

    if let Some(cue) = move_cursor(cursor, ToolsItem::ALL.len(), key) {
        app.cue(cue);
        return;
    }
    if is_back(key) {
        app.goto(Screen::menu());
        return;
    }
    if is_select(key) {
        let item = ToolsItem::ALL[*cursor];
        app.cue(SoundCue::Select);
        match item {
            ToolsItem::GenerateTags => app.goto(Screen::GenerateTags(TagsState::default())),
            ToolsItem::Back => app.goto(Screen::menu()),
        }
    }
}
