use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::io::project_io::{ProjectError, ProjectStore};
use crate::model::project::{Project, STATUS_ARCHIVED};

/// Result of a successful archive run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOutcome {
    pub artifact: PathBuf,
    /// Number of regular files written into the artifact
    pub files: usize,
    /// Artifact size in bytes
    pub size: u64,
}

impl ArchiveOutcome {
    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }
}

/// Package every regular file under the project root into `<path>.zip`,
/// then mark the project archived.
///
/// The zip is assembled in a temp file next to the target and renamed into
/// place only after the whole tree was written, so a failure leaves neither
/// a partial artifact nor an `archived` status. The project directory itself
/// is left in place.
pub fn archive(store: &ProjectStore, project: &mut Project) -> Result<ArchiveOutcome, ProjectError> {
    let artifact = project.archive_path();
    let parent = artifact.parent().unwrap_or(Path::new("."));

    let mut tmp = NamedTempFile::new_in(parent).map_err(ProjectError::io(parent))?;
    let files = write_zip(&project.path, tmp.as_file_mut())?;
    tmp.persist(&artifact)
        .map_err(|e| ProjectError::io(&artifact)(e.error))?;

    let size = fs::metadata(&artifact)
        .map_err(ProjectError::io(&artifact))?
        .len();

    project.status = STATUS_ARCHIVED.to_string();
    store.write(project)?;

    info!(id = %project.id, artifact = %artifact.display(), files, "archived project");
    Ok(ArchiveOutcome {
        artifact,
        files,
        size,
    })
}

/// Walk `root` and write each regular file under its root-relative path.
/// Directory entries are implied by the file paths and not written.
fn write_zip(root: &Path, out: &mut File) -> Result<usize, ProjectError> {
    let mut zip = ZipWriter::new(out);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut count = 0;
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ProjectError::Io {
            path: e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf),
            source: io::Error::from(e),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = zip_entry_name(root, entry.path());
        let mut file = File::open(entry.path()).map_err(ProjectError::io(entry.path()))?;
        zip.start_file(name, options)?;
        io::copy(&mut file, &mut zip).map_err(ProjectError::io(entry.path()))?;
        count += 1;
    }

    zip.finish()?;
    Ok(count)
}

/// Root-relative path with `/` separators, as zip entries expect
fn zip_entry_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
