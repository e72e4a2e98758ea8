use crate::model::{DirEntry, EntryKind};
use std::fs;
use std::path::Path;

/// Lists the immediate children of `root`, each tagged file or folder. The
/// order is whatever the filesystem reports and carries no meaning. An
/// unreadable root yields an empty list; the caller decides whether that is
/// worth telling the user about.
pub fn list_entries(root: &Path) -> Vec<DirEntry> {
    let Ok(read_dir) = fs::read_dir(root) else {
        return Vec::new();
    };

    read_dir
        .filter_map(Result::ok)
        .map(|entry| {
            let kind = if entry.file_type().map(|kind| kind.is_dir()).unwrap_or(false) {
                EntryKind::Folder
            } else {
                EntryKind::File
            };
            DirEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.path(),
                kind,
            }
        })
        .collect()
}
