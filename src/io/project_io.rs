use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use chrono::{Local, SecondsFormat};
use tracing::{info, warn};

use crate::io::atomic::atomic_write;
use crate::model::config::{AppConfig, DEFAULT_SCAFFOLD};
use crate::model::project::{
    NewProject, Project, ProjectPatch, RECORD_FILE, STATUS_ACTIVE, STATUS_ARCHIVED,
};
use crate::ops::id;

/// Name of the base-dir entry that `list` never treats as a project
pub const ARCHIVE_DIR: &str = "Archive";

/// Error type for project store and archive operations
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("project {id} already exists")]
    AlreadyExists { id: String },
    #[error("project {id} not found")]
    NotFound { id: String },
    #[error("could not parse {path}: {source}")]
    CorruptRecord {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("project id is empty after normalization")]
    EmptyId,
    #[error("status \"{status}\" is set only by archiving")]
    ReservedStatus { status: String },
    #[error("invalid scaffold entry \"{entry}\": must be a relative path without ..")]
    InvalidScaffold { entry: String },
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize project record: {0}")]
    Serialize(#[from] serde_yaml::Error),
    #[error("could not write archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl ProjectError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> ProjectError + '_ {
        move |source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Current time in the record's wire format (RFC 3339, local offset)
pub fn timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Filesystem-backed project store: one directory per project under
/// `base_dir`, each holding a `project.yaml` record and the scaffold.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    base_dir: PathBuf,
    scaffold: Vec<String>,
    default_status: String,
}

impl ProjectStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        ProjectStore {
            base_dir: base_dir.into(),
            scaffold: DEFAULT_SCAFFOLD.iter().map(|s| s.to_string()).collect(),
            default_status: STATUS_ACTIVE.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        ProjectStore {
            base_dir: config.base_dir.clone(),
            scaffold: config.project.scaffold.clone(),
            default_status: config.project.default_status.clone(),
        }
    }

    /// Replace the scaffold list (e.g. with a preset's folders)
    pub fn with_scaffold(mut self, scaffold: Vec<String>) -> Self {
        self.scaffold = scaffold;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn scaffold(&self) -> &[String] {
        &self.scaffold
    }

    pub fn project_dir(&self, id: &str) -> PathBuf {
        self.base_dir.join(id)
    }

    /// Create a new project: directory, full scaffold, then the record.
    ///
    /// The scaffold is created before the record is written. If any
    /// subdirectory fails the record is never written, which can leave a
    /// partially scaffolded directory behind; a rerun then reports
    /// `AlreadyExists`.
    pub fn create(&self, new: NewProject) -> Result<Project, ProjectError> {
        let id = id::normalize(&new.id);
        if id.is_empty() {
            return Err(ProjectError::EmptyId);
        }
        let status = if new.status.trim().is_empty() {
            self.default_status.clone()
        } else {
            new.status
        };
        check_status(&status)?;
        validate_scaffold(&self.scaffold)?;

        let dir = self.project_dir(&id);
        if dir.exists() {
            return Err(ProjectError::AlreadyExists { id });
        }

        fs::create_dir_all(&self.base_dir).map_err(ProjectError::io(&self.base_dir))?;
        fs::create_dir(&dir).map_err(|source| {
            if source.kind() == ErrorKind::AlreadyExists {
                ProjectError::AlreadyExists { id: id.clone() }
            } else {
                ProjectError::Io {
                    path: dir.clone(),
                    source,
                }
            }
        })?;

        for entry in &self.scaffold {
            let sub = dir.join(entry);
            fs::create_dir_all(&sub).map_err(ProjectError::io(&sub))?;
        }

        let path = std::path::absolute(&dir).map_err(ProjectError::io(&dir))?;

        let project = Project {
            id,
            name: new.name,
            status,
            tags: sanitize_tags(new.tags),
            created_at: timestamp(),
            description: new.description,
            path,
        };
        self.write(&project)?;

        info!(id = %project.id, path = %project.path.display(), "created project");
        Ok(project)
    }

    /// Load the record for `id` (normalized first).
    pub fn read(&self, id: &str) -> Result<Project, ProjectError> {
        let id = id::normalize(id);
        if id.is_empty() {
            return Err(ProjectError::EmptyId);
        }
        let path = self.project_dir(&id).join(RECORD_FILE);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ProjectError::NotFound { id });
            }
            Err(source) => return Err(ProjectError::Io { path, source }),
        };
        serde_yaml::from_str(&text).map_err(|source| ProjectError::CorruptRecord { path, source })
    }

    /// Serialize and replace the record at `project.path`.
    pub fn write(&self, project: &Project) -> Result<(), ProjectError> {
        let content = serde_yaml::to_string(project)?;
        let path = project.record_path();
        atomic_write(&path, content.as_bytes()).map_err(ProjectError::io(&path))
    }

    /// Apply the non-empty fields of `patch` to an existing project.
    pub fn update(&self, id: &str, mut patch: ProjectPatch) -> Result<Project, ProjectError> {
        if let Some(status) = &patch.status {
            check_status(status)?;
        }
        let mut project = self.read(id)?;
        patch.tags = patch.tags.map(sanitize_tags);
        patch.apply_to(&mut project);
        self.write(&project)?;
        info!(id = %project.id, "updated project");
        Ok(project)
    }

    /// Every readable project under the base directory, sorted by directory
    /// name. Entries whose record is missing or corrupt are skipped with a
    /// warning. A base directory that does not exist yet yields no projects.
    pub fn list(&self) -> Result<Vec<Project>, ProjectError> {
        let entries = match fs::read_dir(&self.base_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ProjectError::Io {
                    path: self.base_dir.clone(),
                    source,
                });
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(ProjectError::io(&self.base_dir))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == ARCHIVE_DIR || name.starts_with('.') {
                continue;
            }
            if !entry.path().is_dir() {
                continue;
            }
            names.push(name);
        }
        names.sort();

        let mut projects = Vec::with_capacity(names.len());
        for name in names {
            match self.read(&name) {
                Ok(project) => projects.push(project),
                Err(e) => warn!(entry = %name, error = %e, "skipping project"),
            }
        }
        Ok(projects)
    }
}

/// `archived` is written by the archive operation only
fn check_status(status: &str) -> Result<(), ProjectError> {
    if status.trim().eq_ignore_ascii_case(STATUS_ARCHIVED) {
        return Err(ProjectError::ReservedStatus {
            status: status.to_string(),
        });
    }
    Ok(())
}

/// Trim tags and drop the empty ones, keeping order and duplicates
fn sanitize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Every scaffold entry must be a non-empty relative path that stays inside
/// the project root.
pub fn validate_scaffold(scaffold: &[String]) -> Result<(), ProjectError> {
    for entry in scaffold {
        let path = Path::new(entry);
        let ok = !entry.trim().is_empty()
            && path
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !ok {
            return Err(ProjectError::InvalidScaffold {
                entry: entry.clone(),
            });
        }
    }
    Ok(())
}
