use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A named scaffold, stored as `<presets>/<name>.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub folders: Vec<String>,
}

/// Error type for preset lookups
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("invalid preset name \"{name}\": use a plain file name")]
    InvalidName { name: String },
    #[error("preset \"{name}\" not found in {dir}")]
    NotFound { name: String, dir: PathBuf },
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Names of the presets in `dir` (stems of `*.yaml` files), sorted.
/// A missing directory has no presets.
pub fn list_presets(dir: &Path) -> Result<Vec<String>, PresetError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(PresetError::Io {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PresetError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Load `<dir>/<name>.yaml`
pub fn load_preset(dir: &Path, name: &str) -> Result<Preset, PresetError> {
    if !is_plain_name(name) {
        return Err(PresetError::InvalidName {
            name: name.to_string(),
        });
    }
    let path = dir.join(format!("{}.yaml", name));
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(PresetError::NotFound {
                name: name.to_string(),
                dir: dir.to_path_buf(),
            });
        }
        Err(source) => return Err(PresetError::Io { path, source }),
    };
    serde_yaml::from_str(&text).map_err(|source| PresetError::Parse { path, source })
}

/// A single file-name component: no separators, not `.` or `..`
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}
