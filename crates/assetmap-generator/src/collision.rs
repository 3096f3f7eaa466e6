//! Identifier collision detection.

use std::collections::HashSet;

use assetmap_core::AssetRecord;

/// Find every identifier that occurs more than once.
///
/// Scans once, remembering the identifiers seen so far. When one shows up
/// again, both the earlier and the new occurrence are reported, and every
/// further occurrence adds one more entry. On sorted input the report is
/// sorted and grouped by identifier.
#[must_use]
pub fn find_duplicate_identifiers(records: &[AssetRecord]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for record in records {
        let id = record.identifier.as_str();
        if seen.insert(id) {
            continue;
        }
        if reported.insert(id) {
            duplicates.push(id.to_string());
        }
        duplicates.push(id.to_string());
    }

    duplicates
}

/// Comma-separated list of the distinct identifiers in a duplicate report.
#[must_use]
pub fn describe_duplicates(duplicates: &[String]) -> String {
    let mut unique: Vec<&str> = Vec::with_capacity(duplicates.len());
    for id in duplicates {
        if !unique.contains(&id.as_str()) {
            unique.push(id);
        }
    }
    unique.join(", ")
}
