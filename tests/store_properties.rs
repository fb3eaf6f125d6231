//! Store, archive and tag-generation properties checked through the
//! public library API.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::Path;

use pretty_assertions::assert_eq;
use projman::io::archive;
use projman::io::project_io::{ProjectError, ProjectStore};
use projman::model::project::{NewProject, ProjectPatch};
use projman::ops::{id, tagging};
use tempfile::TempDir;

fn store(tmp: &TempDir) -> ProjectStore {
    ProjectStore::new(tmp.path()).with_scaffold(vec!["Docs".into(), "PLC/HMI".into()])
}

fn new_project(id: &str, name: &str) -> NewProject {
    NewProject {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

#[test]
fn create_then_read_returns_same_record() {
    let tmp = TempDir::new().unwrap();
    let store = store(&tmp);
    let created = store
        .create(NewProject {
            tags: vec!["plc".into(), "hmi".into()],
            description: "Press line".into(),
            ..new_project("cp-7", "Seven")
        })
        .unwrap();

    assert_eq!(created.id, "CP-7");
    assert_eq!(created.status, "active");
    assert!(!created.created_at.is_empty());

    let read = store.read("CP-7").unwrap();
    assert_eq!(read, created);
    assert_eq!(store.read("cp-7").unwrap(), read);
}

#[test]
fn duplicate_create_leaves_existing_record_alone() {
    let tmp = TempDir::new().unwrap();
    let store = store(&tmp);
    let first = store.create(new_project("CP-1", "First")).unwrap();
    let before = fs::read(first.record_path()).unwrap();

    let err = store.create(new_project("cp-1", "Second")).unwrap_err();
    assert!(matches!(err, ProjectError::AlreadyExists { ref id } if id == "CP-1"));
    assert_eq!(fs::read(first.record_path()).unwrap(), before);
}

#[test]
fn normalize_examples() {
    assert_eq!(id::normalize("cp 12!01"), "CP1201");
    assert_eq!(id::normalize(""), "");
}

#[test]
fn update_tags_empty_keeps_nonempty_replaces() {
    let tmp = TempDir::new().unwrap();
    let store = store(&tmp);
    store
        .create(NewProject {
            tags: vec!["a".into(), "b".into()],
            ..new_project("CP-1", "One")
        })
        .unwrap();

    let kept = store
        .update(
            "CP-1",
            ProjectPatch {
                tags: Some(Vec::new()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(kept.tags, vec!["a", "b"]);

    let replaced = store
        .update(
            "CP-1",
            ProjectPatch {
                tags: Some(vec!["x".into()]),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(replaced.tags, vec!["x"]);
    assert_eq!(store.read("CP-1").unwrap().tags, vec!["x"]);
}

#[test]
fn list_returns_only_valid_projects() {
    let tmp = TempDir::new().unwrap();
    let store = store(&tmp);
    store.create(new_project("GOOD-1", "Good")).unwrap();
    fs::create_dir_all(tmp.path().join("BAD-1")).unwrap();
    fs::create_dir_all(tmp.path().join("BAD-2")).unwrap();
    fs::write(tmp.path().join("BAD-2/project.yaml"), "id: [unclosed").unwrap();

    let projects = store.list().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, "GOOD-1");
}

#[test]
fn tag_generation_numbers_per_group() {
    let rows = vec![
        vec!["category", "subcat", "name"],
        vec!["A", "1", "x"],
        vec!["A", "1", "y"],
        vec!["B", "1", "z"],
    ];
    let ids: Vec<String> = tagging::generate(&rows, "{category}-{subcat}-{id}", 1)
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec!["A-1-01", "A-1-02", "B-1-01"]);
}

fn zip_names(path: &Path) -> BTreeSet<String> {
    let mut zip = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect()
}

#[test]
fn archive_contains_every_file_then_flips_status() {
    let tmp = TempDir::new().unwrap();
    let store = store(&tmp);
    let mut project = store.create(new_project("CP-1", "One")).unwrap();
    fs::write(project.path.join("Docs/spec.txt"), "spec").unwrap();
    fs::write(project.path.join("PLC/HMI/screen.bin"), [0u8, 1, 2]).unwrap();

    let outcome = archive::archive(&store, &mut project).unwrap();
    assert_eq!(outcome.files, 3);

    let expected: BTreeSet<String> = ["Docs/spec.txt", "PLC/HMI/screen.bin", "project.yaml"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(zip_names(&outcome.artifact), expected);
    assert_eq!(store.read("CP-1").unwrap().status, "archived");
}

#[test]
fn read_twice_is_identical() {
    let tmp = TempDir::new().unwrap();
    let store = store(&tmp);
    store.create(new_project("CP-1", "One")).unwrap();
    assert_eq!(store.read("CP-1").unwrap(), store.read("CP-1").unwrap());
}
