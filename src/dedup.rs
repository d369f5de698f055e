//! First-occurrence dedup keyed on the schema's key field.

use std::collections::HashSet;

use crate::schema::{Record, RecordSchema};

/// Produces one record per distinct key, in first-seen key order.
///
/// Distinct keys are computed over the raw list (minus the first record when
/// the schema says so); the winning record for each key is the FIRST match in
/// the full original sequence. The key field of each output record is set to
/// the canonical distinct-key value. If no match exists for a key, all other
/// fields default to empty strings rather than failing.
pub fn dedup(schema: &RecordSchema, records: &[Record]) -> Vec<Record> {
    let scan: &[Record] = if schema.skip_first_raw && !records.is_empty() {
        &records[1..]
    } else {
        records
    };

    let mut seen = HashSet::new();
    let mut distinct_keys = Vec::new();
    for record in scan {
        let key = record.key(schema);
        if seen.insert(key.to_string()) {
            distinct_keys.push(key.to_string());
        }
    }

    let mut output = Vec::with_capacity(distinct_keys.len());
    for key in distinct_keys {
        let mut record = match records.iter().find(|r| r.key(schema) == key) {
            Some(first_match) => first_match.clone(),
            None => Record {
                values: vec![String::new(); schema.fields.len()],
            },
        };
        record.values[schema.key] = key;
        output.push(record);
    }

    output
}
