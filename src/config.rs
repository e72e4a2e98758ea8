use crate::model::Category;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "medley";

pub fn config_root() -> Result<PathBuf> {
    if let Ok(override_dir) = env::var("MEDLEY_CONFIG_DIR") {
        return Ok(PathBuf::from(override_dir));
    }

    Ok(home_dir()?.join(".config").join(APP_DIR))
}

fn home_dir() -> Result<PathBuf> {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .context("neither HOME nor USERPROFILE is set")
}

pub fn slot_path(category: Category) -> Result<PathBuf> {
    Ok(config_root()?.join(format!("{}.txt", category.slot_name())))
}

pub fn ensure_config_dir() -> Result<PathBuf> {
    let root = config_root()?;
    fs::create_dir_all(&root).with_context(|| format!("failed to create {}", root.display()))?;
    Ok(root)
}

/// Reads the persisted root for `category`. A missing or unreadable slot
/// file falls back to `<home>/<slot>`, and the fallback is persisted so the
/// next resolve reads it straight from the file.
pub fn resolve_root(category: Category) -> Result<PathBuf> {
    let path = slot_path(category)?;
    if let Some(root) = read_slot(&path) {
        return Ok(root);
    }

    let default = home_dir()?.join(category.slot_name());
    set_root(category, &default)?;
    Ok(default)
}

fn read_slot(path: &Path) -> Option<PathBuf> {
    let raw = fs::read_to_string(path).ok()?;
    let line = raw.lines().next()?.trim();
    (!line.is_empty()).then(|| PathBuf::from(line))
}

/// Overwrites the slot file for `category` with `root`; the first line is
/// the only content the file ever holds.
pub fn set_root(category: Category, root: &Path) -> Result<()> {
    ensure_config_dir()?;
    let path = slot_path(category)?;
    fs::write(&path, format!("{}\n", root.display()))
        .with_context(|| format!("failed to write {}", path.display()))
}
