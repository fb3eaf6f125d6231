use serde::{Deserialize, Serialize};

/// One input row of the tag table, fields already trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRow {
    pub category: String,
    pub subcat: String,
    pub name: String,
}

/// Template and counter floor for tag generation.
///
/// `format` may contain the placeholders `{category}`, `{subcat}` and `{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSpec {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_start")]
    pub start: i64,
}

impl Default for TagSpec {
    fn default() -> Self {
        TagSpec {
            format: default_format(),
            start: default_start(),
        }
    }
}

fn default_format() -> String {
    "{category}-{subcat}-{id}".into()
}

fn default_start() -> i64 {
    1
}

/// A generated tag. Written once to the output document, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAssignment {
    pub id: String,
    pub category: String,
    pub subcat: String,
    pub name: String,
}
