use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::tagging;
use crate::tui::app::{App, Screen, TAG_FIELDS};
use crate::tui::external::SoundCue;

pub(super) fn handle_tags(app: &mut App, key: KeyEvent) {
    let Screen::GenerateTags(form) = &mut app.screen else {
        return;
    };

    match key.code {
        // Cancel goes back to the tools listing, not the main menu
        KeyCode::Esc => app.goto(Screen::Tools { cursor: 0 }),
        KeyCode::Enter if form.focus == 0 => form.focus = 1,
        KeyCode::Enter => submit(app),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            form.focus = (form.focus + 1) % TAG_FIELDS.len();
        }
        _ => {
            form.focused_mut().handle_key(key);
        }
    }
}

fn submit(app: &mut App) {
    let Screen::GenerateTags(form) = &mut app.screen else {
        return;
    };
    if form.input.is_blank() || form.output.is_blank() {
        app.error("Input and output paths are required");
        return;
    }
    let input = PathBuf::from(form.input.value().trim());
    let output = PathBuf::from(form.output.value().trim());

    match tagging::generate_file(&input, &output, &app.config.tagging) {
        Ok(assignments) => {
            if let Screen::GenerateTags(form) = &mut app.screen {
                form.summary = Some(tagging::group_counts(&assignments));
            }
            app.info(format!(
                "Generated {} tags to {}",
                assignments.len(),
                output.display()
            ));
            app.cue(SoundCue::Confirm);
        }
        Err(e) => app.error(format!("Tag generation failed: {}", e)),
    }
}
