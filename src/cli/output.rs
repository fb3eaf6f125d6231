use std::path::PathBuf;

use serde::Serialize;

use crate::io::archive::ArchiveOutcome;
use crate::model::project::Project;
use crate::model::tag::TagAssignment;
use crate::ops::tagging;
use crate::util::unicode;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ArchiveJson {
    pub id: String,
    pub artifact: PathBuf,
    pub files: usize,
    pub size_bytes: u64,
}

#[derive(Serialize)]
pub struct TagGroupJson {
    pub category: String,
    pub subcat: String,
    pub count: usize,
}

#[derive(Serialize)]
pub struct TagsJson {
    pub output: PathBuf,
    pub count: usize,
    pub groups: Vec<TagGroupJson>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn archive_to_json(id: &str, outcome: &ArchiveOutcome) -> ArchiveJson {
    ArchiveJson {
        id: id.to_string(),
        artifact: outcome.artifact.clone(),
        files: outcome.files,
        size_bytes: outcome.size,
    }
}

pub fn tags_to_json(output: PathBuf, assignments: &[TagAssignment]) -> TagsJson {
    TagsJson {
        output,
        count: assignments.len(),
        groups: tagging::group_counts(assignments)
            .into_iter()
            .map(|((category, subcat), count)| TagGroupJson {
                category,
                subcat,
                count,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

const ID_W: usize = 14;
const NAME_W: usize = 30;
const STATUS_W: usize = 10;

/// Project table with a header row. Created shows the date part only.
pub fn format_project_table(projects: &[Project]) -> Vec<String> {
    let row = |id: &str, name: &str, status: &str, created: &str| {
        format!(
            "{}  {}  {}  {}",
            unicode::fit_to_width(id, ID_W),
            unicode::fit_to_width(name, NAME_W),
            unicode::fit_to_width(status, STATUS_W),
            created
        )
        .trim_end()
        .to_string()
    };

    let mut lines = vec![row("ID", "Name", "Status", "Created")];
    for p in projects {
        let created: String = p.created_at.chars().take(10).collect();
        lines.push(row(&p.id, &p.name, &p.status, &created));
    }
    lines
}

/// Full record, one `key: value` line per field
pub fn format_project_detail(project: &Project) -> Vec<String> {
    let mut lines = vec![
        format!("id:          {}", project.id),
        format!("name:        {}", project.name),
        format!("status:      {}", project.status),
    ];
    if !project.tags.is_empty() {
        lines.push(format!("tags:        {}", project.tags.join(", ")));
    }
    lines.push(format!("created:     {}", project.created_at));
    if !project.description.is_empty() {
        lines.push(format!("description: {}", project.description));
    }
    lines.push(format!("path:        {}", project.path.display()));
    lines
}

pub fn format_archive_line(outcome: &ArchiveOutcome) -> String {
    format!(
        "Archived to {} ({:.2} KB)",
        outcome.artifact.display(),
        outcome.size_kb()
    )
}

/// One line per `(category, subcat)` group, in first-seen order
pub fn format_tag_summary(assignments: &[TagAssignment]) -> Vec<String> {
    tagging::group_counts(assignments)
        .into_iter()
        .map(|((category, subcat), count)| format!("  {}/{}  {}", category, subcat, count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn project(id: &str, tags: &[&str], description: &str) -> Project {
        Project {
            id: id.to_string(),
            name: format!("{} name", id),
            status: "active".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: "2025-03-04T10:11:12+01:00".to_string(),
            description: description.to_string(),
            path: PathBuf::from("/p").join(id),
        }
    }

    #[test]
    fn table_has_header_and_dates() {
        let lines = format_project_table(&[project("CP-1", &[], "")]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID "));
        assert!(lines[0].ends_with("Created"));
        assert!(lines[1].starts_with("CP-1 "));
        assert!(lines[1].ends_with("active      2025-03-04"));
    }

    #[test]
    fn detail_skips_empty_optional_fields() {
        let lines = format_project_detail(&project("CP-1", &[], ""));
        assert!(!lines.iter().any(|l| l.starts_with("tags:")));
        assert!(!lines.iter().any(|l| l.starts_with("description:")));

        let lines = format_project_detail(&project("CP-1", &["plc", "hmi"], "Press"));
        assert!(lines.contains(&"tags:        plc, hmi".to_string()));
        assert!(lines.contains(&"description: Press".to_string()));
    }

    #[test]
    fn archive_line_reports_kb() {
        let outcome = ArchiveOutcome {
            artifact: PathBuf::from("/p/CP-1.zip"),
            files: 3,
            size: 1536,
        };
        assert_eq!(format_archive_line(&outcome), "Archived to /p/CP-1.zip (1.50 KB)");
    }

    #[test]
    fn tag_summary_groups() {
        let tag = |category: &str, subcat: &str| TagAssignment {
            id: String::new(),
            category: category.to_string(),
            subcat: subcat.to_string(),
            name: String::new(),
        };
        let assignments = [tag("FT", "100"), tag("PT", "200"), tag("FT", "100")];
        assert_eq!(
            format_tag_summary(&assignments),
            vec!["  FT/100  2".to_string(), "  PT/200  1".to_string()]
        );
    }
}
