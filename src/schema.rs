//! Positional schemas: record kinds are data, not code.
//!
//! Each source system exports columns in a fixed order, so a schema is an
//! ordered list of named fields, each drawn from an input column (or a
//! constant), plus the key field used for dedup.

/// Where a field's value comes from when mapping an input row.
#[derive(Debug, Clone, Copy)]
pub enum ColumnSource {
    /// Zero-based input column index.
    Column(usize),
    /// Fixed value independent of the row.
    Const(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Column title in the output header row.
    pub title: &'static str,
    pub source: ColumnSource,
}

/// Name cleanup applied once per record, after construction and before dedup.
/// Rules run in order: literal prefix strip, truncate before the first `.`,
/// truncate before the first `@`.
#[derive(Debug, Clone, Copy)]
pub struct Normalize {
    /// Index into [`RecordSchema::fields`].
    pub field: usize,
    pub strip_prefix: Option<&'static str>,
    pub strip_domain: bool,
    pub strip_login: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct RecordSchema {
    pub kind: &'static str,
    pub fields: &'static [FieldSpec],
    /// Index into `fields` of the dedup key. The key may be empty but is
    /// never absent.
    pub key: usize,
    /// Rows with fewer input columns are rejected (CSV sources only).
    pub min_fields: usize,
    /// Input columns that must be non-empty and not a sentinel value.
    pub required: &'static [usize],
    pub normalize: Option<Normalize>,
    /// Dedup skips the conceptual first record of the raw list before
    /// computing distinct keys (Server and EndUserDevice pipelines).
    pub skip_first_raw: bool,
}

impl RecordSchema {
    pub fn titles(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.title).collect()
    }

    pub fn key_name(&self) -> &'static str {
        self.fields[self.key].name
    }
}

/// One mapped row. Immutable after construction apart from the normalization
/// pass the mapper applies; values are positional against the schema's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub values: Vec<String>,
}

impl Record {
    pub fn key<'a>(&'a self, schema: &RecordSchema) -> &'a str {
        &self.values[schema.key]
    }
}
