use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::config::AppConfig;
use crate::model::project::{NewProject, Project};
use crate::tui::app::App;
use crate::tui::external::{FolderOpener, SoundPlayer};
use crate::tui::input::handle_key;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Full-screen render of the app at the default test size
pub fn render_app(app: &App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// Records every sound cue and folder-open request
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    played: Rc<RefCell<Vec<PathBuf>>>,
    opened: Rc<RefCell<Vec<PathBuf>>>,
}

impl Recorder {
    pub fn played(&self) -> Vec<PathBuf> {
        self.played.borrow().clone()
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.borrow().clone()
    }
}

impl SoundPlayer for Recorder {
    fn play(&self, path: &Path) {
        self.played.borrow_mut().push(path.to_path_buf());
    }
}

impl FolderOpener for Recorder {
    fn open(&self, path: &Path) {
        self.opened.borrow_mut().push(path.to_path_buf());
    }
}

/// App over `base` with a two-folder scaffold and recording collaborators
pub fn test_app(base: &Path) -> (App, Recorder) {
    let mut config = AppConfig::with_base_dir(base);
    config.project.scaffold = vec!["Docs".into(), "PLC/HMI".into()];
    let recorder = Recorder::default();
    let app = App::with_collaborators(
        config,
        Box::new(recorder.clone()),
        Box::new(recorder.clone()),
    );
    (app, recorder)
}

/// Create projects directly through the app's store
pub fn seed(app: &App, ids: &[&str]) -> Vec<Project> {
    ids.iter()
        .map(|id| {
            app.store
                .create(NewProject {
                    id: id.to_string(),
                    name: format!("{} project", id),
                    ..Default::default()
                })
                .unwrap()
        })
        .collect()
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn press(app: &mut App, codes: &[KeyCode]) {
    for code in codes {
        handle_key(app, key(*code));
    }
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        handle_key(app, key(KeyCode::Char(c)));
    }
}
