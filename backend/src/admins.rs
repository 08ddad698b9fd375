//! The admin user list.
//!
//! Admin rights are a plain list of usernames, one per line in
//! `data/admins.txt`. Enforcement (who gets the admin pages) belongs to the
//! presentation layer; the backend only keeps the list. A missing or blank
//! file falls back to the brigade secretary.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use log::info;

use crate::error::Result;

/// Seeded into a fresh admin list.
pub const DEFAULT_ADMIN: &str = "alexscott";

/// Read the admin usernames, creating and seeding the file if absent.
/// Entries are lowercased and deduplicated; an effectively empty file also
/// falls back to the default admin.
pub fn load_admins(path: &Path) -> Result<BTreeSet<String>> {
    if !path.exists() {
        return save_admins(path, &[DEFAULT_ADMIN.to_string()]);
    }

    let admins: BTreeSet<String> = fs::read_to_string(path)?
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect();

    if admins.is_empty() {
        return Ok(BTreeSet::from([DEFAULT_ADMIN.to_string()]));
    }
    Ok(admins)
}

/// Replace the admin list. Usernames are normalized the same way
/// `load_admins` reads them, written sorted, one per line.
pub fn save_admins(path: &Path, usernames: &[String]) -> Result<BTreeSet<String>> {
    let admins: BTreeSet<String> = usernames
        .iter()
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut contents = admins.iter().cloned().collect::<Vec<_>>().join("\n");
    contents.push('\n');
    fs::write(path, contents)?;

    info!("admin list saved: {} users", admins.len());
    Ok(admins)
}
