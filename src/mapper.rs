//! Maps an ordered list of field values into a named record, by fixed
//! position, according to a [`RecordSchema`].

use crate::constants::is_sentinel;
use crate::schema::{ColumnSource, Normalize, Record, RecordSchema};

/// Outcome of mapping one input row. Rejection is not an error: the row is
/// simply excluded from output while still counting toward rows read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapOutcome {
    Mapped(Record),
    Rejected(RejectReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    TooFewFields { got: usize, want: usize },
    EmptyOrSentinel { column: usize },
}

pub fn map_row(schema: &RecordSchema, cells: &[String]) -> MapOutcome {
    if cells.len() < schema.min_fields {
        return MapOutcome::Rejected(RejectReason::TooFewFields {
            got: cells.len(),
            want: schema.min_fields,
        });
    }

    for &column in schema.required {
        let value = cells.get(column).map(String::as_str).unwrap_or("");
        if is_sentinel(value) {
            return MapOutcome::Rejected(RejectReason::EmptyOrSentinel { column });
        }
    }

    let mut values = Vec::with_capacity(schema.fields.len());
    for field in schema.fields {
        values.push(match field.source {
            ColumnSource::Column(i) => cells.get(i).cloned().unwrap_or_default(),
            ColumnSource::Const(s) => s.to_string(),
        });
    }

    if let Some(rules) = schema.normalize {
        apply_normalize(&rules, &mut values);
    }

    MapOutcome::Mapped(Record { values })
}

fn apply_normalize(rules: &Normalize, values: &mut [String]) {
    let value = &mut values[rules.field];

    if let Some(prefix) = rules.strip_prefix {
        if let Some(rest) = value.strip_prefix(prefix) {
            *value = rest.to_string();
        }
    }

    // Remove domain suffix
    if rules.strip_domain {
        if let Some(i) = value.find('.') {
            value.truncate(i);
        }
    }

    // Remove login-name suffix
    if rules.strip_login {
        if let Some(i) = value.find('@') {
            value.truncate(i);
        }
    }
}
