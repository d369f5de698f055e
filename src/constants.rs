//! Shared literals used across the source-type definitions.

/// Organizational prefix stripped from computer names before dedup.
pub const ORG_PREFIX: &str = "Z-VRA-";

/// Placeholder values that disqualify a required cell. Only exact matches
/// count; "N/A-1" is a real value and is retained.
pub const SENTINELS: [&str; 2] = ["N/A", "NA"];

/// Worksheet the NA printer inventory must carry.
pub const PRINTER_NA_SHEET: &str = "MASTER LIST";

/// Input subdirectories holding the regional printer exports start with this
/// name (case-insensitive).
pub const ASIA_PRINTER_DIR_PREFIX: &str = "Asia Printers";

/// True when a required cell is empty or an exact sentinel match.
pub fn is_sentinel(value: &str) -> bool {
    value.is_empty() || SENTINELS.contains(&value)
}
