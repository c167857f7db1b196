use super::CmdResult;
use crate::error::{EditorError, Result};
use crate::store::{DirEntry, DocumentStore};
use crate::workspace::normalize_path;
use std::path::Path;

// Symlinks are never descended into; this only caps very deep real trees.
const MAX_DEPTH: usize = 64;

/// Renders `dir` as a tree: directories first, then case-insensitive name order.
/// Symlinked directories are listed but not expanded.
pub fn run<S: DocumentStore>(store: &S, dir: &Path) -> Result<CmdResult> {
    let root = normalize_path(dir)?;
    if !store.is_dir(&root) {
        return Err(EditorError::InvalidState(format!(
            "not a directory: {}",
            root.display()
        )));
    }

    let mut lines = vec![root.display().to_string()];
    render(store, &root, "", 0, &mut lines)?;
    Ok(CmdResult::default().with_text_lines(lines))
}

fn sorted_entries<S: DocumentStore>(store: &S, dir: &Path) -> Result<Vec<DirEntry>> {
    let mut entries = store.list_dir(dir)?;
    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(entries)
}

fn render<S: DocumentStore>(
    store: &S,
    dir: &Path,
    prefix: &str,
    depth: usize,
    lines: &mut Vec<String>,
) -> Result<()> {
    if depth >= MAX_DEPTH {
        return Ok(());
    }
    let entries = sorted_entries(store, dir)?;
    let count = entries.len();
    for (i, entry) in entries.into_iter().enumerate() {
        let last = i + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        let suffix = if entry.is_dir { "/" } else { "" };
        lines.push(format!("{}{}{}{}", prefix, connector, entry.name, suffix));

        if entry.is_dir && !entry.is_symlink {
            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            render(store, &dir.join(&entry.name), &child_prefix, depth + 1, lines)?;
        }
    }
    Ok(())
}
