use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::io::atomic::atomic_write;
use crate::model::config::AppConfig;

/// Error type for configuration loading and saving
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not edit {path}: not a valid TOML document")]
    Edit { path: PathBuf },
}

/// Base directory used when neither `-C` nor `PROJMAN_BASE_DIR` is given
pub fn default_base_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Projects")
}

/// Load `<base>/.projman/config.toml` (defaults if absent), then apply
/// `PROJMAN_*` environment overrides.
pub fn load_config(base_dir: &Path) -> Result<AppConfig, ConfigError> {
    let mut config = read_config_file(base_dir)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Load the config document only, without environment overrides.
pub fn read_config_file(base_dir: &Path) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::with_base_dir(base_dir);
    let path = config.config_path();
    match fs::read_to_string(&path) {
        Ok(text) => {
            config = toml::from_str(&text)?;
            config.base_dir = base_dir.to_path_buf();
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(source) => return Err(ConfigError::Io { path, source }),
    }
    Ok(config)
}

/// Apply `PROJMAN_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("PROJMAN_SOUND_ENABLED") {
        config.sound.enabled = v.trim().eq_ignore_ascii_case("true");
    }

    let cues: [(&str, &mut String); 5] = [
        ("PROJMAN_SOUND_NAV_UP", &mut config.sound.nav_up),
        ("PROJMAN_SOUND_NAV_DOWN", &mut config.sound.nav_down),
        ("PROJMAN_SOUND_SELECT", &mut config.sound.select),
        ("PROJMAN_SOUND_CONFIRM", &mut config.sound.confirm),
        ("PROJMAN_SOUND_ERROR", &mut config.sound.error),
    ];
    for (key, slot) in cues {
        if let Some(v) = lookup(key).filter(|v| !v.is_empty()) {
            *slot = v;
        }
    }

    if let Some(v) = lookup("PROJMAN_TAGGING_FORMAT").filter(|v| !v.is_empty()) {
        config.tagging.format = v;
    }
    if let Some(v) = lookup("PROJMAN_TAGGING_START").filter(|v| !v.is_empty()) {
        match v.trim().parse() {
            Ok(start) => config.tagging.start = start,
            Err(_) => warn!(value = %v, "ignoring non-numeric PROJMAN_TAGGING_START"),
        }
    }
}

/// Read the config file as an editable document (empty if absent).
pub fn read_config_doc(path: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    text.parse().map_err(|_: toml_edit::TomlError| ConfigError::Edit {
        path: path.to_path_buf(),
    })
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config_doc(path: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    atomic_write(path, doc.to_string().as_bytes()).map_err(io_err)
}

/// Set `[sound] enabled` in the document
pub fn set_sound_enabled(doc: &mut toml_edit::DocumentMut, enabled: bool) {
    if !doc.contains_key("sound") {
        doc["sound"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["sound"]["enabled"] = toml_edit::value(enabled);
}

/// Persist the current sound toggle, leaving the rest of the file untouched.
pub fn save_sound_enabled(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config.config_path();
    let mut doc = read_config_doc(&path)?;
    set_sound_enabled(&mut doc, config.sound.enabled);
    write_config_doc(&path, &doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn sample_config() -> &'static str {
        r#"# Projman settings
[sound]
# turn cues on for the shop floor
enabled = false
select = "/opt/sounds/click.wav"

[tagging]
format = "{category}.{subcat}.{id}"
start = 10
"#
    }

    fn write_sample(base: &Path) -> PathBuf {
        let path = AppConfig::with_base_dir(base).config_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, sample_config()).unwrap();
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = read_config_file(tmp.path()).unwrap();
        assert_eq!(config.base_dir, tmp.path());
        assert!(!config.sound.enabled);
        assert_eq!(config.tagging.start, 1);
    }

    #[test]
    fn file_values_are_read() {
        let tmp = TempDir::new().unwrap();
        write_sample(tmp.path());
        let config = read_config_file(tmp.path()).unwrap();
        assert_eq!(config.base_dir, tmp.path());
        assert_eq!(config.sound.select, "/opt/sounds/click.wav");
        assert_eq!(config.sound.nav_up, "sounds/nav_up.wav");
        assert_eq!(config.tagging.format, "{category}.{subcat}.{id}");
        assert_eq!(config.tagging.start, 10);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = AppConfig::with_base_dir(tmp.path()).config_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[sound\nenabled = ").unwrap();
        assert!(matches!(
            read_config_file(tmp.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("PROJMAN_SOUND_ENABLED", "TRUE"),
            ("PROJMAN_SOUND_ERROR", "/tmp/err.wav"),
            ("PROJMAN_SOUND_NAV_UP", ""),
            ("PROJMAN_TAGGING_FORMAT", "{id}-{category}"),
            ("PROJMAN_TAGGING_START", "5"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::with_base_dir("/p");
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert!(config.sound.enabled);
        assert_eq!(config.sound.error, "/tmp/err.wav");
        assert_eq!(config.sound.nav_up, "sounds/nav_up.wav");
        assert_eq!(config.tagging.format, "{id}-{category}");
        assert_eq!(config.tagging.start, 5);
    }

    #[test]
    fn bad_start_override_is_ignored() {
        let mut config = AppConfig::with_base_dir("/p");
        apply_env_overrides(&mut config, |k| {
            (k == "PROJMAN_TAGGING_START").then(|| "ten".to_string())
        });
        assert_eq!(config.tagging.start, 1);
    }

    #[test]
    fn save_sound_toggle_preserves_comments() {
        let tmp = TempDir::new().unwrap();
        let path = write_sample(tmp.path());

        let mut config = read_config_file(tmp.path()).unwrap();
        config.sound.enabled = true;
        save_sound_enabled(&config).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("# turn cues on for the shop floor"));
        assert!(written.contains("enabled = true"));
        assert!(written.contains("start = 10"));
        assert!(read_config_file(tmp.path()).unwrap().sound.enabled);
    }

    #[test]
    fn save_sound_toggle_creates_file() {
        let tmp = TempDir::new().unwrap();
        let mut config = AppConfig::with_base_dir(tmp.path());
        config.sound.enabled = true;
        save_sound_enabled(&config).unwrap();

        let reloaded = read_config_file(tmp.path()).unwrap();
        assert!(reloaded.sound.enabled);
        assert_eq!(reloaded.sound.confirm, "sounds/confirm.wav");
    }
}
