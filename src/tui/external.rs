use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::model::config::SoundConfig;

/// Audio cue played on navigation and outcome events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    NavUp,
    NavDown,
    Select,
    Confirm,
    Error,
}

impl SoundCue {
    /// Configured file for this cue
    pub fn path(self, sound: &SoundConfig) -> &str {
        match self {
            SoundCue::NavUp => &sound.nav_up,
            SoundCue::NavDown => &sound.nav_down,
            SoundCue::Select => &sound.select,
            SoundCue::Confirm => &sound.confirm,
            SoundCue::Error => &sound.error,
        }
    }
}

/// Fire-and-forget audio playback. Implementations must not block and must
/// swallow their own failures.
pub trait SoundPlayer {
    fn play(&self, path: &Path);
}

/// Opens a directory in the platform file browser. Nothing is reported back.
pub trait FolderOpener {
    fn open(&self, path: &Path);
}

/// Plays cues through the platform's command-line player
/// (`aplay`, `afplay` or PowerShell).
#[derive(Debug, Default)]
pub struct CommandSoundPlayer;

impl CommandSoundPlayer {
    fn command(path: &Path) -> Option<Command> {
        let mut cmd = if cfg!(target_os = "linux") {
            let mut cmd = Command::new("aplay");
            cmd.arg("-q").arg(path);
            cmd
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("afplay");
            cmd.arg(path);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("powershell");
            cmd.arg("-c").arg(powershell_script(path));
            cmd
        } else {
            return None;
        };
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        Some(cmd)
    }
}

/// Single-quoted PowerShell literal: an embedded `'` is written as `''`
fn powershell_script(path: &Path) -> String {
    let quoted = path.display().to_string().replace('\'', "''");
    format!("(New-Object Media.SoundPlayer '{}').PlaySync();", quoted)
}

impl SoundPlayer for CommandSoundPlayer {
    fn play(&self, path: &Path) {
        let Some(mut cmd) = Self::command(path) else {
            return;
        };
        match cmd.spawn() {
            // Reap in the background
            Ok(mut child) => {
                std::thread::spawn(move || child.wait());
            }
            Err(e) => debug!(path = %path.display(), error = %e, "sound cue failed"),
        }
    }
}

/// Uses the `open` crate to hand the path to the OS file browser
#[derive(Debug, Default)]
pub struct SystemOpener;

impl FolderOpener for SystemOpener {
    fn open(&self, path: &Path) {
        if let Err(e) = open::that_detached(path) {
            warn!(path = %path.display(), error = %e, "could not open folder");
        }
    }
}
