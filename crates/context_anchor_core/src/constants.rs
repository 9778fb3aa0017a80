//! Name rules shared by the walker and the scanner.
//!
//! Matching is done on plain file names, case-sensitively:
//!
//! - a file is scanned when its name ends with one of [`SCANNED_SUFFIXES`]
//! - a directory below the walk root is pruned when its name starts with
//!   [`HIDDEN_PREFIX`] or equals one of [`PRUNED_DIR_NAMES`]

/// File name suffixes whose files are scanned for import lines
pub const SCANNED_SUFFIXES: &[&str] = &[
    ".js",  // JavaScript
    ".jsx", // JavaScript with JSX
    ".ts",  // TypeScript
];

/// Dependency-manager caches that are never descended into
pub const PRUNED_DIR_NAMES: &[&str] = &["node_modules"];

/// Leading character of hidden directory names
pub const HIDDEN_PREFIX: char = '.';

/// Prefix a trimmed line must start with to count as an import line
pub const IMPORT_PREFIX: &str = "import ";

pub fn is_scanned_file(name: &str) -> bool {
    SCANNED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

pub fn is_pruned_dir(name: &str) -> bool {
    name.starts_with(HIDDEN_PREFIX) || PRUNED_DIR_NAMES.contains(&name)
}
