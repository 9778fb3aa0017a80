use anyhow::{Context, Result, bail};
use ignore::{DirEntry, WalkBuilder};
use log::{debug, info, trace};
use std::{fs, path::Path};

use crate::{
    config::WalkConfig,
    constants::{is_pruned_dir, is_scanned_file},
    scanner::imports_or_empty,
    types::ContextAnchor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Directory,
    /// Symlink to a directory: neither listed as a file nor descended into
    LinkedDirectory,
    File,
}

fn classify(dent: &DirEntry) -> EntryKind {
    match dent.file_type() {
        Some(ft) if ft.is_dir() => EntryKind::Directory,
        Some(ft) if ft.is_symlink() => match fs::metadata(dent.path()) {
            Ok(meta) if meta.is_dir() => EntryKind::LinkedDirectory,
            _ => EntryKind::File,
        },
        _ => EntryKind::File,
    }
}

fn is_pruned(dent: &DirEntry) -> bool {
    if dent.depth() == 0 || !dent.file_type().is_some_and(|ft| ft.is_dir()) {
        return false;
    }
    let pruned = is_pruned_dir(&dent.file_name().to_string_lossy());
    if pruned {
        trace!("Pruning directory: {}", dent.path().display());
    }
    pruned
}

/// Key of `dir` in the anchor: its path relative to `root`, with `root` itself as `.`.
fn relative_key(root: &Path, dir: &Path) -> String {
    let rel = dir.strip_prefix(root).unwrap_or(dir);
    if rel.as_os_str().is_empty() { ".".to_string() } else { rel.to_string_lossy().to_string() }
}

/// Walks `cfg.root` depth-first and records every non-pruned directory.
///
/// Hidden directories and `node_modules` below the root are skipped together with
/// everything inside them. Directory symlinks are never followed. Files that cannot
/// be read are recorded with no imports, but a directory that cannot be listed
/// aborts the whole walk.
pub fn build_context_anchor(cfg: &WalkConfig) -> Result<ContextAnchor> {
    let root = cfg.root.as_path();
    info!("Building context anchor from root: {}", root.display());

    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false).follow_links(false).filter_entry(|dent| !is_pruned(dent));
    if cfg.sorted {
        debug!("Sorting directory entries by file name");
        builder.sort_by_file_name(|a, b| a.cmp(b));
    }

    let mut anchor = ContextAnchor::default();

    for res in builder.build() {
        let dent = res.with_context(|| format!("Failed to walk {}", root.display()))?;
        let path = dent.path();

        match (dent.depth(), classify(&dent)) {
            (0, EntryKind::File) => bail!("{} is not a directory", root.display()),
            (0, _) | (_, EntryKind::Directory) => {
                let key = relative_key(root, path);
                trace!("Visiting directory: {}", key);
                anchor.visit(key);
            }
            (_, EntryKind::LinkedDirectory) => {
                trace!("Not following directory symlink: {}", path.display());
            }
            (_, EntryKind::File) => {
                let Some(parent) = path.parent() else {
                    continue;
                };
                let name = dent.file_name().to_string_lossy().to_string();
                let record = anchor.record_mut(relative_key(root, parent));
                if is_scanned_file(&name) {
                    record.dependencies.insert(name.clone(), imports_or_empty(path));
                }
                record.files.push(name);
            }
        }
    }

    info!(
        "Visited {} directories, {} files ({} scanned for imports)",
        anchor.len(),
        anchor.files_seen(),
        anchor.files_scanned()
    );
    Ok(anchor)
}
