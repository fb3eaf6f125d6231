use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Name of the metadata record inside every project directory
pub const RECORD_FILE: &str = "project.yaml";

/// Status written by the archive operation
pub const STATUS_ARCHIVED: &str = "archived";

/// Status used when none is given at creation
pub const STATUS_ACTIVE: &str = "active";

/// A managed project, as persisted in `<base>/<id>/project.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Normalized identifier, also the directory name
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// RFC 3339 timestamp with offset, captured once at creation
    pub created_at: String,
    #[serde(default)]
    pub description: String,
    /// Absolute path of the project root. Persisted even though derivable.
    pub path: PathBuf,
}

impl Project {
    pub fn record_path(&self) -> PathBuf {
        self.path.join(RECORD_FILE)
    }

    /// Location of the archive artifact for this project (`<path>.zip`)
    pub fn archive_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".zip");
        PathBuf::from(name)
    }

    pub fn is_archived(&self) -> bool {
        self.status == STATUS_ARCHIVED
    }
}

/// Input for creating a project. `id` is normalized by the store.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Empty means "active"
    pub status: String,
    pub tags: Vec<String>,
}

/// Partial update. `None` and empty values leave the field untouched;
/// a non-empty `tags` replaces the whole list.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        fn blank(s: &Option<String>) -> bool {
            s.as_deref().is_none_or(str::is_empty)
        }
        blank(&self.name)
            && blank(&self.description)
            && blank(&self.status)
            && self.tags.as_ref().is_none_or(Vec::is_empty)
    }

    /// Apply the non-empty fields of this patch to `project`.
    pub fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.name.filter(|s| !s.is_empty()) {
            project.name = name;
        }
        if let Some(description) = self.description.filter(|s| !s.is_empty()) {
            project.description = description;
        }
        if let Some(status) = self.status.filter(|s| !s.is_empty()) {
            project.status = status;
        }
        if let Some(tags) = self.tags.filter(|t| !t.is_empty()) {
            project.tags = tags;
        }
    }
}
