//! Reconcile the persisted annotation table with the labels found in the
//! document.
//!
//! The merge keeps the user's work across document edits: records whose
//! label still exists survive untouched (in their stored order), records
//! whose label disappeared are dropped, and labels the table has never seen
//! are appended as blank records ready to be filled in. Running the merge
//! twice over the same document is a no-op.

use std::collections::HashSet;

use crate::store::AnnotationRecord;

/// Merge `existing` records against the `labels` currently in the document.
///
/// Surviving records come first, in their stored order; blank records for
/// new labels follow in document order. Annotations are keyed by the label
/// string alone, so a label that occurs several times in the document is
/// flagged: every occurrence will receive the same annotation.
pub fn merge_records(existing: Vec<AnnotationRecord>, labels: &[String]) -> Vec<AnnotationRecord> {
    warn_duplicate_labels(labels);

    let current: HashSet<&str> = labels.iter().map(String::as_str).collect();

    let mut merged = Vec::with_capacity(existing.len());
    let mut kept: HashSet<String> = HashSet::new();
    for record in existing {
        if current.contains(record.element.as_str()) {
            kept.insert(record.element.clone());
            merged.push(record);
        } else {
            tracing::warn!(
                "dropping stale annotation record {:?} (label no longer in the document)",
                record.element
            );
        }
    }

    for label in labels {
        if !kept.contains(label.as_str()) {
            merged.push(AnnotationRecord::new_label(label.clone()));
        }
    }
    merged
}

fn warn_duplicate_labels(labels: &[String]) {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut warned: HashSet<&str> = HashSet::new();
    for label in labels {
        if !seen.insert(label.as_str()) && warned.insert(label.as_str()) {
            tracing::warn!(
                "label {label:?} occurs more than once in the document; annotations are keyed \
                 by label text, so every occurrence gets the same balloon and link"
            );
        }
    }
}
