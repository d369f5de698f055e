//! Ordered concatenation of independently deduplicated record sets.

use crate::schema::Record;

/// Concatenates per-source record sets without re-running dedup across them.
/// Regional partitioning is assumed disjoint, so a key present in two sources
/// appears twice in the final output.
pub fn merge(sets: Vec<Vec<Record>>) -> Vec<Record> {
    sets.into_iter().flatten().collect()
}
