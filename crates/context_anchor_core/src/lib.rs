//! Directory-to-imports mapping for JavaScript/TypeScript source trees.
//!
//! This crate walks a directory tree and builds a [`ContextAnchor`]: a flat map
//! from every visited directory (relative to the walk root) to the files it holds
//! and the `import ` lines declared by its `.js`, `.jsx` and `.ts` files.
//!
//! - Hidden directories and `node_modules` are pruned before descent
//! - Import lines are found with a line scan, not a parser
//! - Unreadable files count as having no imports
//!
//! # Examples
//!
//! ```no_run
//! use context_anchor_core::{WalkConfig, build_context_anchor};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let anchor = build_context_anchor(&WalkConfig::new("."))?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! anchor.write_json(&mut stdout)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod constants;
mod scanner;
mod types;
mod walker;

// Re-export public API
pub use config::WalkConfig;
pub use constants::{
    HIDDEN_PREFIX, IMPORT_PREFIX, PRUNED_DIR_NAMES, SCANNED_SUFFIXES, is_pruned_dir,
    is_scanned_file,
};
pub use scanner::{imports_or_empty, scan_imports};
pub use types::{ContextAnchor, DirectoryRecord};
pub use walker::build_context_anchor;
