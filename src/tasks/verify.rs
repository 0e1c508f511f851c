use std::collections::HashMap;

use thiserror::Error;

use crate::{
    domain::Entry,
    infrastructure::notifier::Diagnostics,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("row count mismatch! original: {original}, new: {labeled}")]
    RowCountMismatch { original: usize, labeled: usize },
    /// Only field names are carried: exports hold passwords.
    #[error("data mismatch in row {row}! differing fields: {}", fields.join(", "))]
    FieldMismatch { row: usize, fields: Vec<String> },
}

/// True when both sets have the same length and every row matches its original
/// once `folder` is ignored. Failures are reported before returning false.
pub fn verify<D: Diagnostics>(original: &[Entry], labeled: &[Entry], diagnostics: &D) -> bool {
    match check_integrity(original, labeled) {
        Ok(()) => {
            tracing::debug!(target: "verify", rows = original.len(), "integrity check passed");
            true
        }
        Err(err) => {
            diagnostics.report(&format!("Error: {err}"));
            false
        }
    }
}

pub fn check_integrity(original: &[Entry], labeled: &[Entry]) -> Result<(), IntegrityError> {
    if original.len() != labeled.len() {
        return Err(IntegrityError::RowCountMismatch {
            original: original.len(),
            labeled: labeled.len(),
        });
    }

    for (index, (before, after)) in original.iter().zip(labeled).enumerate() {
        let before_fields = before.without_folder();
        let after_fields = after.without_folder();
        if before_fields != after_fields {
            return Err(IntegrityError::FieldMismatch {
                row: index + 1,
                fields: differing_fields(&before_fields, &after_fields),
            });
        }
    }
    Ok(())
}

fn differing_fields(before: &HashMap<&str, &str>, after: &HashMap<&str, &str>) -> Vec<String> {
    let mut fields: Vec<String> = before
        .keys()
        .chain(after.keys())
        .filter(|key| before.get(*key) != after.get(*key))
        .map(|key| key.to_string())
        .collect();
    fields.sort();
    fields.dedup();
    fields
}
