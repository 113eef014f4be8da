//! Load and save the TOML annotation table.
//!
//! The table is the user-edited half of the workflow: one `[[item]]` block
//! per text label, holding the balloon (tooltip) text and an optional
//! hyperlink target. A missing file simply means "no annotations yet"; a
//! file that exists but cannot be parsed is an error, because overwriting
//! it would destroy the user's edits.

use std::fs;

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// Top-level key of the annotation table: records live in `[[item]]` blocks.
pub const TABLE_KEY: &str = "item";

/// One annotation record, keyed by the label text it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// The label string as extracted from the document, trimmed.
    pub element: String,
    /// Tooltip text shown on hover. Empty means "not annotated".
    #[serde(default)]
    pub balloon: String,
    /// Hyperlink target opened on click. Empty means "no link".
    #[serde(default)]
    pub link: String,
}

impl AnnotationRecord {
    /// A fresh record for a label that has no annotations yet.
    pub fn new_label(element: impl Into<String>) -> Self {
        AnnotationRecord {
            element: element.into(),
            balloon: String::new(),
            link: String::new(),
        }
    }

    /// True when the record carries neither a balloon nor a link.
    pub fn is_blank(&self) -> bool {
        self.balloon.is_empty() && self.link.is_empty()
    }
}

#[derive(Serialize)]
struct Table<'a> {
    item: &'a [AnnotationRecord],
}

/// Read the annotation table at `path`.
///
/// A missing file yields an empty table. A file whose top-level `item` key
/// is absent or not an array also yields an empty table, with a warning. A
/// file that is not valid TOML, or whose records are malformed, is an error.
pub fn load_table(path: &Utf8Path) -> Result<Vec<AnnotationRecord>> {
    if !path.exists() {
        tracing::info!("no annotation table at {}, starting empty", path);
        return Ok(Vec::new());
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("cannot read annotation table {path}"))?;
    let value: toml::Value = contents
        .parse()
        .with_context(|| format!("annotation table {path} is not valid TOML"))?;

    let Some(items) = value.get(TABLE_KEY).and_then(|v| v.as_array()) else {
        tracing::warn!(
            "annotation table {} has no top-level `{}` array, treating it as empty",
            path,
            TABLE_KEY
        );
        return Ok(Vec::new());
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let record: AnnotationRecord = item
            .clone()
            .try_into()
            .with_context(|| format!("malformed record in annotation table {path}"))?;
        records.push(record);
    }
    tracing::info!("loaded {} annotation record(s) from {}", records.len(), path);
    Ok(records)
}

/// Overwrite the annotation table at `path` with `records`.
///
/// An empty record list writes nothing at all, leaving any existing file
/// untouched.
pub fn save_table(path: &Utf8Path, records: &[AnnotationRecord]) -> Result<()> {
    if records.is_empty() {
        tracing::info!("no annotation records, leaving {} unwritten", path);
        return Ok(());
    }
    let table = Table { item: records };
    let contents = toml::to_string_pretty(&table).context("cannot serialize annotation table")?;
    fs::write(path, contents).with_context(|| format!("cannot write annotation table {path}"))?;
    tracing::info!("wrote {} annotation record(s) to {}", records.len(), path);
    Ok(())
}

/// Copy the annotation table to `backup` before it gets overwritten.
///
/// Returns `false` when there was no table to back up.
pub fn backup_table(path: &Utf8Path, backup: &Utf8Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::copy(path, backup)
        .with_context(|| format!("cannot back up annotation table {path} to {backup}"))?;
    Ok(true)
}
