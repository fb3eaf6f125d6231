use crate::model::project::Project;

/// Indices into `projects` whose id contains `query` as typed, compared
/// case-insensitively. An empty query matches everything.
pub fn filter_projects(projects: &[Project], query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    projects
        .iter()
        .enumerate()
        .filter(|(_, p)| needle.is_empty() || p.id.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}
