use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::info;

use crate::io::atomic::atomic_write;
use crate::model::tag::{TagAssignment, TagRow, TagSpec};

/// Error type for tag generation
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error("missing tag format")]
    MissingFormat,
    #[error("tag numbers starting at {start} do not fit in a 64-bit integer")]
    StartOutOfRange { start: i64 },
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse tag spec {path}: {source}")]
    SpecParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("could not serialize tag assignments: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Turn a raw table row into a `TagRow`. Rows with fewer than three columns
/// yield `None`; extra columns are ignored.
pub fn parse_row<S: AsRef<str>>(row: &[S]) -> Option<TagRow> {
    if row.len() < 3 {
        return None;
    }
    Some(TagRow {
        category: row[0].as_ref().trim().to_string(),
        subcat: row[1].as_ref().trim().to_string(),
        name: row[2].as_ref().trim().to_string(),
    })
}

/// Expand `format` for one row. `{id}` is zero-padded to two digits.
pub fn format_tag(format: &str, row: &TagRow, number: i64) -> String {
    format
        .replace("{category}", &row.category)
        .replace("{subcat}", &row.subcat)
        .replace("{id}", &format!("{:02}", number))
}

/// Assign tags to every data row of `rows` in input order.
///
/// The first row is a header and always skipped. Each `(category, subcat)`
/// pair gets its own counter, so the first row of a pair is numbered
/// `start`, the next `start + 1`, and so on.
pub fn generate<S: AsRef<str>>(
    rows: &[Vec<S>],
    format: &str,
    start: i64,
) -> Result<Vec<TagAssignment>, TagError> {
    if format.is_empty() {
        return Err(TagError::MissingFormat);
    }

    let mut counters: HashMap<(String, String), i64> = HashMap::new();
    let mut assignments = Vec::new();

    for row in rows.iter().skip(1) {
        let Some(row) = parse_row(row) else {
            continue;
        };
        let counter = counters
            .entry((row.category.clone(), row.subcat.clone()))
            .or_insert(0);
        *counter += 1;
        let number = start
            .checked_add(*counter - 1)
            .ok_or(TagError::StartOutOfRange { start })?;

        assignments.push(TagAssignment {
            id: format_tag(format, &row, number),
            category: row.category,
            subcat: row.subcat,
            name: row.name,
        });
    }

    Ok(assignments)
}

/// Number of assignments per `(category, subcat)` group, in first-seen order
pub fn group_counts(assignments: &[TagAssignment]) -> IndexMap<(String, String), usize> {
    let mut groups = IndexMap::new();
    for a in assignments {
        *groups
            .entry((a.category.clone(), a.subcat.clone()))
            .or_insert(0) += 1;
    }
    groups
}

/// Read every record of a CSV file as raw string rows. Row lengths may vary.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>, TagError> {
    let io_err = |source| TagError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| io_err(e.into()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| io_err(e.into()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Write assignments as a YAML sequence
pub fn write_assignments(path: &Path, assignments: &[TagAssignment]) -> Result<(), TagError> {
    let content = serde_yaml::to_string(assignments)?;
    atomic_write(path, content.as_bytes()).map_err(|source| TagError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a tag spec document (`format`, `start`)
pub fn load_spec(path: &Path) -> Result<TagSpec, TagError> {
    let text = fs::read_to_string(path).map_err(|source| TagError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| TagError::SpecParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read `input`, generate with `spec`, write the result to `output`.
pub fn generate_file(
    input: &Path,
    output: &Path,
    spec: &TagSpec,
) -> Result<Vec<TagAssignment>, TagError> {
    if spec.format.is_empty() {
        return Err(TagError::MissingFormat);
    }
    let rows = read_rows(input)?;
    let assignments = generate(&rows, &spec.format, spec.start)?;
    write_assignments(output, &assignments)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        count = assignments.len(),
        "generated tags"
    );
    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn ids(assignments: &[TagAssignment]) -> Vec<&str> {
        assignments.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn counters_are_per_category_and_subcat() {
        let rows = table(&[
            &["category", "subcat", "name"],
            &["A", "1", "x"],
            &["A", "1", "y"],
            &["B", "1", "z"],
        ]);
        let out = generate(&rows, "{category}-{subcat}-{id}", 1).unwrap();
        assert_debug_snapshot!(ids(&out), @r#"
        [
            "A-1-01",
            "A-1-02",
            "B-1-01",
        ]
        "#);
    }

    #[test]
    fn interleaved_groups_keep_input_order() {
        let rows = table(&[
            &["category", "subcat", "name"],
            &["PMP", "P", "Feed pump"],
            &["VLV", "V", "Inlet valve"],
            &["PMP", "P", "Return pump"],
            &["PMP", "Q", "Booster"],
        ]);
        let out = generate(&rows, "{category}{subcat}-{id}", 7).unwrap();
        assert_eq!(ids(&out), vec!["PMPP-07", "VLVV-07", "PMPP-08", "PMPQ-07"]);
        assert_eq!(out[2].name, "Return pump");
    }

    #[test]
    fn short_rows_are_skipped_and_fields_trimmed() {
        let rows = table(&[
            &["category", "subcat", "name"],
            &["A", "1"],
            &[" A ", " 1 ", "  spaced name  ", "extra"],
            &[],
        ]);
        let out = generate(&rows, "{category}-{subcat}-{id}", 1).unwrap();
        assert_eq!(
            out,
            vec![TagAssignment {
                id: "A-1-01".into(),
                category: "A".into(),
                subcat: "1".into(),
                name: "spaced name".into(),
            }]
        );
    }

    #[test]
    fn start_near_max_fails_instead_of_overflowing() {
        let rows = table(&[
            &["category", "subcat", "name"],
            &["A", "1", "x"],
            &["A", "1", "y"],
        ]);
        let err = generate(&rows, "{id}", i64::MAX).unwrap_err();
        assert!(matches!(err, TagError::StartOutOfRange { start: i64::MAX }));

        let ids: Vec<String> = generate(&rows[..2], "{id}", i64::MAX)
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![i64::MAX.to_string()]);
    }

    #[test]
    fn header_only_or_empty_input() {
        let header = table(&[&["category", "subcat", "name"]]);
        assert!(generate(&header, "{id}", 1).unwrap().is_empty());
        let empty: Vec<Vec<String>> = Vec::new();
        assert!(generate(&empty, "{id}", 1).unwrap().is_empty());
    }

    #[test]
    fn empty_format_is_missing_format() {
        let rows = table(&[&["c", "s", "n"], &["A", "1", "x"]]);
        assert!(matches!(
            generate(&rows, "", 1),
            Err(TagError::MissingFormat)
        ));
    }

    #[test]
    fn id_padding_widens_past_two_digits() {
        let row = TagRow {
            category: "A".into(),
            subcat: "1".into(),
            name: "x".into(),
        };
        assert_eq!(format_tag("{id}", &row, 3), "03");
        assert_eq!(format_tag("{id}", &row, 123), "123");
        assert_eq!(format_tag("no placeholders", &row, 1), "no placeholders");
        assert_eq!(format_tag("{id}/{id}", &row, 4), "04/04");
    }

    #[test]
    fn group_counts_in_first_seen_order() {
        let rows = table(&[
            &["c", "s", "n"],
            &["B", "1", "x"],
            &["A", "1", "y"],
            &["B", "1", "z"],
        ]);
        let out = generate(&rows, "{id}", 1).unwrap();
        let groups: Vec<_> = group_counts(&out).into_iter().collect();
        assert_eq!(
            groups,
            vec![(("B".into(), "1".into()), 2), (("A".into(), "1".into()), 1)]
        );
    }

    #[test]
    fn generate_file_round_trip() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("instruments.csv");
        let output = tmp.path().join("tags.yaml");
        fs::write(
            &input,
            "category,subcat,name\nFT,100,\"Flow, inlet\"\nFT,100,Flow outlet\nshort,row\n",
        )
        .unwrap();

        let spec = TagSpec {
            format: "{category}-{subcat}-{id}".into(),
            start: 1,
        };
        let out = generate_file(&input, &output, &spec).unwrap();
        assert_eq!(ids(&out), vec!["FT-100-01", "FT-100-02"]);
        assert_eq!(out[0].name, "Flow, inlet");

        let written: Vec<TagAssignment> =
            serde_yaml::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written, out);
    }

    #[test]
    fn generate_file_missing_input_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = generate_file(
            &tmp.path().join("missing.csv"),
            &tmp.path().join("out.yaml"),
            &TagSpec::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TagError::Io { .. }));
        assert!(!tmp.path().join("out.yaml").exists());
    }

    #[test]
    fn generate_file_checks_format_before_io() {
        let tmp = TempDir::new().unwrap();
        let spec = TagSpec {
            format: String::new(),
            start: 1,
        };
        let err = generate_file(
            &tmp.path().join("missing.csv"),
            &tmp.path().join("out.yaml"),
            &spec,
        )
        .unwrap_err();
        assert!(matches!(err, TagError::MissingFormat));
    }

    #[test]
    fn load_spec_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("spec.yaml");
        fs::write(&path, "format: \"{category}_{id}\"\nstart: 100\n").unwrap();
        let spec = load_spec(&path).unwrap();
        assert_eq!(spec.format, "{category}_{id}");
        assert_eq!(spec.start, 100);

        fs::write(&path, "start: [").unwrap();
        assert!(matches!(load_spec(&path), Err(TagError::SpecParse { .. })));
    }
}
