use crossterm::event::{KeyCode, KeyEvent};

use crate::model::project::NewProject;
use crate::ops::id;
use crate::tui::app::{App, CREATE_FIELDS, Screen};
use crate::tui::external::SoundCue;

use super::*;

const ID: usize = 0;
const NAME: usize = 1;
const DESCRIPTION: usize = 2;
const TAGS: usize = 3;

pub(super) fn handle_create(app: &mut App, key: KeyEvent) {
    let Screen::CreateProject(form) = &mut app.screen else {
        return;
    };

    // After a successful create only "back to menu" is accepted
    if form.created.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            app.goto(Screen::menu());
        }
        return;
    }

    let last = CREATE_FIELDS.len() - 1;
    match key.code {
        KeyCode::Esc => app.goto(Screen::menu()),
        KeyCode::Enter if form.focus < last => form.focus += 1,
        KeyCode::Enter => submit(app),
        KeyCode::Tab | KeyCode::Down => form.focus = (form.focus + 1) % CREATE_FIELDS.len(),
        KeyCode::BackTab | KeyCode::Up => {
            form.focus = (form.focus + last) % CREATE_FIELDS.len();
        }
        _ => {
            form.fields[form.focus].handle_key(key);
        }
    }
}

fn submit(app: &mut App) {
    let Screen::CreateProject(form) = &mut app.screen else {
        return;
    };

    let new = NewProject {
        id: id::normalize(form.fields[ID].value()),
        name: form.fields[NAME].value().trim().to_string(),
        description: form.fields[DESCRIPTION].value().trim().to_string(),
        status: String::new(),
        tags: id::clean_tags(form.fields[TAGS].value()),
    };
    if new.id.is_empty() {
        form.focus = ID;
        app.error("Invalid ID: use letters, digits and hyphens");
        return;
    }
    if new.name.is_empty() {
        form.focus = NAME;
        app.error("Name is required");
        return;
    }

    match app.store.create(new) {
        Ok(project) => {
            let msg = format!("Created {} at {}", project.id, project.path.display());
            if let Screen::CreateProject(form) = &mut app.screen {
                form.created = Some(project);
            }
            app.info(msg);
            app.cue(SoundCue::Confirm);
        }
        Err(e) => app.error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::RECORD_FILE;
    use crate::tui::app::{CreateState, StatusKind};
    use crate::tui::render::test_helpers::*;
    use tempfile::TempDir;

    fn create_app(tmp: &TempDir) -> (App, Recorder) {
        let (mut app, rec) = test_app(tmp.path());
        app.goto(Screen::CreateProject(CreateState::default()));
        (app, rec)
    }

    fn fill(app: &mut App, values: [&str; 4]) {
        for (i, value) in values.iter().enumerate() {
            type_text(app, value);
            if i < 3 {
                press(app, &[KeyCode::Enter]);
            }
        }
    }

    fn form(app: &App) -> &CreateState {
        match &app.screen {
            Screen::CreateProject(form) => form,
            other => panic!("not on create screen: {}", other.name()),
        }
    }

    #[test]
    fn enter_on_last_field_creates_project() {
        let tmp = TempDir::new().unwrap();
        let (mut app, _) = create_app(&tmp);
        fill(&mut app, ["cp 12!01", "Conveyor", " Line 4 ", "plc, hmi,,"]);
        press(&mut app, &[KeyCode::Enter]);

        let created = form(&app).created.clone().expect("project created");
        assert_eq!(created.id, "CP1201");
        assert_eq!(created.name, "Conveyor");
        assert_eq!(created.description, "Line 4");
        assert_eq!(created.tags, vec!["plc", "hmi"]);
        assert_eq!(created.status, "active");
        assert!(tmp.path().join("CP1201").join(RECORD_FILE).is_file());
        assert!(tmp.path().join("CP1201/PLC/HMI").is_dir());
        assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Info);
    }

    #[test]
    fn done_state_only_returns_to_menu() {
        let tmp = TempDir::new().unwrap();
        let (mut app, _) = create_app(&tmp);
        fill(&mut app, ["A-1", "Alpha", "", ""]);
        press(&mut app, &[KeyCode::Enter]);
        assert!(form(&app).created.is_some());

        type_text(&mut app, "xyz");
        press(&mut app, &[KeyCode::Tab, KeyCode::Backspace]);
        assert_eq!(app.screen.name(), "create");
        assert_eq!(form(&app).fields[3].value(), "");

        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.screen.name(), "menu");
    }

    #[test]
    fn empty_id_is_rejected_locally() {
        let tmp = TempDir::new().unwrap();
        let (mut app, _) = create_app(&tmp);
        fill(&mut app, ["!!!", "Alpha", "", ""]);
        press(&mut app, &[KeyCode::Enter]);

        let state = form(&app);
        assert!(state.created.is_none());
        assert_eq!(state.focus, 0);
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.starts_with("Invalid ID"));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn empty_name_is_rejected_locally() {
        let tmp = TempDir::new().unwrap();
        let (mut app, _) = create_app(&tmp);
        fill(&mut app, ["A-1", "   ", "", ""]);
        press(&mut app, &[KeyCode::Enter]);

        assert!(form(&app).created.is_none());
        assert_eq!(form(&app).focus, 1);
        assert_eq!(app.status.as_ref().unwrap().text, "Name is required");
        assert!(!tmp.path().join("A-1").exists());
    }

    #[test]
    fn duplicate_id_shows_store_error() {
        let tmp = TempDir::new().unwrap();
        let (mut app, _) = create_app(&tmp);
        seed(&app, &["A-1"]);
        fill(&mut app, ["a-1", "Again", "", ""]);
        press(&mut app, &[KeyCode::Enter]);

        assert_eq!(app.screen.name(), "create");
        assert!(form(&app).created.is_none());
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "project A-1 already exists"
        );
        assert_eq!(app.store.read("A-1").unwrap().name, "A-1 project");
    }

    #[test]
    fn focus_moves_with_tab_and_arrows() {
        let tmp = TempDir::new().unwrap();
        let (mut app, _) = create_app(&tmp);
        press(&mut app, &[KeyCode::Tab, KeyCode::Down]);
        assert_eq!(form(&app).focus, 2);
        press(&mut app, &[KeyCode::Up]);
        assert_eq!(form(&app).focus, 1);
        press(&mut app, &[KeyCode::BackTab, KeyCode::BackTab]);
        assert_eq!(form(&app).focus, 3);
    }

    #[test]
    fn letters_are_text_not_commands() {
        let tmp = TempDir::new().unwrap();
        let (mut app, _) = create_app(&tmp);
        type_text(&mut app, "qbjk");
        assert_eq!(app.screen.name(), "create");
        assert_eq!(form(&app).fields[0].value(), "qbjk");
        assert!(!app.should_quit);
    }

    #[test]
    fn esc_cancels() {
        let tmp = TempDir::new().unwrap();
        let (mut app, _) = create_app(&tmp);
        type_text(&mut app, "A-1");
        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.screen.name(), "menu");
        assert!(!tmp.path().join("A-1").exists());
    }
}
