//! Module to locate per-account Spotify metadata files on disk
//!
//! Each Spotify account on the machine gets a directory named
//! `<account>-user` under `<app data>/Spotify/Users`, holding a `metadata`
//! index file. Locating only resolves paths; it never inspects contents.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::metadata::error::LookupError;

const METADATA_FILE_NAME: &str = "metadata";
const USER_DIR_SUFFIX: &str = "-user";

/// Resolves the Spotify settings directory inside the per-user
/// application-data root. Fails if either does not exist; nothing works
/// without it, so callers treat this as fatal at initialization.
pub fn spotify_data_dir() -> Result<PathBuf, LookupError> {
    let app_data = dirs::config_dir().ok_or_else(|| {
        LookupError::DirectoryNotFound("no application data directory for this user".into())
    })?;

    let spotify = app_data.join("Spotify");

    if !spotify.is_dir() {
        return Err(LookupError::DirectoryNotFound(
            spotify.to_string_lossy().into_owned(),
        ));
    }

    Ok(spotify)
}

/// Directory containing the per-account user directories.
pub fn spotify_users_dir() -> Result<PathBuf, LookupError> {
    Ok(spotify_data_dir()?.join("Users"))
}

/// Enumerates metadata files for all accounts under `users_dir`, one
/// `<account>-user/metadata` path per account. `filter` narrows the result
/// to a single account name; `None` keeps every account.
pub fn locate_metadata_files(
    users_dir: &Path,
    filter: Option<&str>,
) -> Result<Vec<PathBuf>, LookupError> {
    if !users_dir.is_dir() {
        return Err(LookupError::DirectoryNotFound(
            users_dir.to_string_lossy().into_owned(),
        ));
    }

    let mut files = Vec::new();

    let walker = WalkDir::new(users_dir).min_depth(1).max_depth(1);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("skipping unreadable entry under {users_dir:?}: {err}");
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let Some(account) = name.strip_suffix(USER_DIR_SUFFIX) else {
            continue;
        };

        if filter.is_some_and(|wanted| wanted != account) {
            continue;
        }

        files.push(entry.path().join(METADATA_FILE_NAME));
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::locate_metadata_files;
    use crate::metadata::error::LookupError;

    fn add_user(users: &std::path::Path, account: &str) -> std::path::PathBuf {
        let dir = users.join(format!("{account}-user"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("metadata"), b"21\n").unwrap();
        dir.join("metadata")
    }

    #[test]
    fn locate_finds_all_account_metadata_files() {
        let tmp = TempDir::new().unwrap();
        let alice = add_user(tmp.path(), "alice");
        let bob = add_user(tmp.path(), "bob");

        // Not an account directory
        fs::create_dir_all(tmp.path().join("Shared")).unwrap();

        let files = locate_metadata_files(tmp.path(), None).unwrap();

        assert_eq!(files, vec![alice, bob]);
    }

    #[test]
    fn locate_applies_account_filter() {
        let tmp = TempDir::new().unwrap();
        add_user(tmp.path(), "alice");
        let bob = add_user(tmp.path(), "bob");

        let files = locate_metadata_files(tmp.path(), Some("bob")).unwrap();

        assert_eq!(files, vec![bob]);
    }

    #[test]
    fn locate_does_not_check_file_existence() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("carol-user");
        fs::create_dir_all(&dir).unwrap();
        // No metadata file inside; the locator should still report the path

        let files = locate_metadata_files(tmp.path(), None).unwrap();

        assert_eq!(files, vec![dir.join("metadata")]);
    }

    #[test]
    fn locate_fails_on_missing_users_dir() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");

        let err = locate_metadata_files(&missing, None).unwrap_err();

        assert!(matches!(err, LookupError::DirectoryNotFound(_)));
    }
}
