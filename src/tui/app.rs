use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use indexmap::IndexMap;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

use crate::io::project_io::ProjectStore;
use crate::model::config::AppConfig;
use crate::model::project::Project;
use crate::ops::search::filter_projects;

use super::external::{CommandSoundPlayer, FolderOpener, SoundCue, SoundPlayer, SystemOpener};
use super::input;
use super::render;
use super::text_field::TextField;
use super::theme::Theme;

/// Entries of the main menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Projects,
    CreateProject,
    ViewProject,
    Tools,
    Settings,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 6] = [
        MenuItem::Projects,
        MenuItem::CreateProject,
        MenuItem::ViewProject,
        MenuItem::Tools,
        MenuItem::Settings,
        MenuItem::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Projects => "Projects",
            MenuItem::CreateProject => "Create New Project",
            MenuItem::ViewProject => "View Project Status",
            MenuItem::Tools => "Tools",
            MenuItem::Settings => "Settings",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Actions offered for a project picked from the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmenuItem {
    ViewStatus,
    Archive,
    OpenFolder,
    Back,
}

impl SubmenuItem {
    pub const ALL: [SubmenuItem; 4] = [
        SubmenuItem::ViewStatus,
        SubmenuItem::Archive,
        SubmenuItem::OpenFolder,
        SubmenuItem::Back,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SubmenuItem::ViewStatus => "View Status",
            SubmenuItem::Archive => "Archive Project",
            SubmenuItem::OpenFolder => "Open Folder",
            SubmenuItem::Back => "Back",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Sound,
    Back,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 2] = [SettingsItem::Sound, SettingsItem::Back];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolsItem {
    GenerateTags,
    Back,
}

impl ToolsItem {
    pub const ALL: [ToolsItem; 2] = [ToolsItem::GenerateTags, ToolsItem::Back];

    pub fn label(self) -> &'static str {
        match self {
            ToolsItem::GenerateTags => "Generate Tags",
            ToolsItem::Back => "Back",
        }
    }
}

/// Labels of the create form fields, in edit order
pub const CREATE_FIELDS: [&str; 4] = ["ID", "Name", "Description", "Tags"];

/// Labels of the tag generator fields
pub const TAG_FIELDS: [&str; 2] = ["Input CSV", "Output YAML"];

/// Project list with a live id filter
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Snapshot taken from the store when the screen was entered
    pub projects: Vec<Project>,
    /// Indices into `projects` currently visible
    pub filtered: Vec<usize>,
    /// Index into `filtered`
    pub cursor: usize,
    /// Keystrokes go to the query while set
    pub searching: bool,
    pub query: TextField,
}

impl ListState {
    pub fn new(projects: Vec<Project>) -> Self {
        let filtered = (0..projects.len()).collect();
        ListState {
            projects,
            filtered,
            ..Default::default()
        }
    }

    /// Re-derive the visible subset from the query. The cursor resets to the
    /// top when it would point past the end.
    pub fn refilter(&mut self) {
        self.filtered = filter_projects(&self.projects, self.query.value());
        if self.cursor >= self.filtered.len() {
            self.cursor = 0;
        }
    }

    pub fn selected(&self) -> Option<&Project> {
        self.filtered
            .get(self.cursor)
            .and_then(|&i| self.projects.get(i))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateState {
    pub fields: [TextField; 4],
    /// Index into `fields`
    pub focus: usize,
    /// Set once the project was created; the form is then read-only
    pub created: Option<Project>,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub input: TextField,
    /// The record being displayed, once a lookup succeeded
    pub project: Option<Project>,
}

#[derive(Debug, Clone)]
pub struct SubmenuState {
    pub project: Project,
    pub cursor: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TagsState {
    pub input: TextField,
    pub output: TextField,
    /// 0 = input, 1 = output
    pub focus: usize,
    /// Assignments per (category, subcat) from the last successful run
    pub summary: Option<IndexMap<(String, String), usize>>,
}

impl TagsState {
    pub fn focused_mut(&mut self) -> &mut TextField {
        if self.focus == 0 {
            &mut self.input
        } else {
            &mut self.output
        }
    }
}

/// The active screen together with its screen-local state. Leaving a screen
/// drops its state.
#[derive(Debug, Clone)]
pub enum Screen {
    Menu { cursor: usize },
    ProjectList(ListState),
    CreateProject(CreateState),
    ViewProject(ViewState),
    ProjectSubmenu(SubmenuState),
    Settings { cursor: usize },
    Tools { cursor: usize },
    GenerateTags(TagsState),
}

impl Screen {
    pub fn menu() -> Self {
        Screen::Menu { cursor: 0 }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::Menu { .. } => "menu",
            Screen::ProjectList(_) => "list",
            Screen::CreateProject(_) => "create",
            Screen::ViewProject(_) => "view",
            Screen::ProjectSubmenu(_) => "submenu",
            Screen::Settings { .. } => "settings",
            Screen::Tools { .. } => "tools",
            Screen::GenerateTags(_) => "generate-tags",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line message shown in the status row until the next screen change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Main application state
pub struct App {
    pub screen: Screen,
    pub config: AppConfig,
    pub store: ProjectStore,
    pub theme: Theme,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
    sound: Box<dyn SoundPlayer>,
    opener: Box<dyn FolderOpener>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self::with_collaborators(
            config,
            Box::new(CommandSoundPlayer),
            Box::new(SystemOpener),
        )
    }

    pub fn with_collaborators(
        config: AppConfig,
        sound: Box<dyn SoundPlayer>,
        opener: Box<dyn FolderOpener>,
    ) -> Self {
        App {
            screen: Screen::menu(),
            store: ProjectStore::from_config(&config),
            theme: Theme::from_config(&config.ui),
            config,
            status: None,
            should_quit: false,
            sound,
            opener,
        }
    }

    /// Switch screens. The status message belongs to the old screen and is
    /// cleared.
    pub fn goto(&mut self, screen: Screen) {
        debug!(from = self.screen.name(), to = screen.name(), "screen change");
        self.screen = screen;
        self.status = None;
    }

    /// Enter the project list with a fresh read of the store.
    pub fn open_project_list(&mut self) {
        match self.store.list() {
            Ok(projects) => self.goto(Screen::ProjectList(ListState::new(projects))),
            Err(e) => self.error(format!("Could not list projects: {}", e)),
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Info,
        });
    }

    /// Show an error on the current screen and play the error cue
    pub fn error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Error,
        });
        self.cue(SoundCue::Error);
    }

    pub fn cue(&self, cue: SoundCue) {
        if self.config.sound.enabled {
            self.sound.play(Path::new(cue.path(&self.config.sound)));
        }
    }

    pub fn open_folder(&self, path: &Path) {
        self.opener.open(path);
    }
}

/// Run the TUI application
pub fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// One event at a time, each handled to completion before the next read.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
