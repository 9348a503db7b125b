//! Moving staged contents into the permanent version directory.

use std::path::{Path, PathBuf};

use log::debug;
use nvmg_model::PlacementError;

#[cfg(unix)]
const VERSION_DIR_MODE: u32 = 0o755;

/// Move every top-level entry of `staged_root` into `dest`, creating `dest`
/// if needed.
///
/// An entry that already exists in `dest` under the same name is removed and
/// replaced; entries the archive does not supply are left alone. Moves are
/// plain renames, so staging and destination must share a filesystem. A
/// failure partway through leaves the entries moved so far in place.
///
/// # Errors
/// Returns an error naming the action and path that failed.
pub fn place(staged_root: &Path, dest: &Path) -> Result<Vec<PathBuf>, PlacementError> {
    create_version_dir(dest)?;

    let entries = std::fs::read_dir(staged_root)
        .map_err(|error| PlacementError::io("read staging directory", staged_root, &error))?;

    let mut placed = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|error| PlacementError::io("read staging entry", staged_root, &error))?;
        let source = entry.path();
        let target = dest.join(entry.file_name());

        remove_existing(&target)?;
        std::fs::rename(&source, &target)
            .map_err(|error| PlacementError::io("move staged entry to", &target, &error))?;
        debug!("Placed {}", target.display());
        placed.push(target);
    }

    Ok(placed)
}

fn create_version_dir(dest: &Path) -> Result<(), PlacementError> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(VERSION_DIR_MODE);
    }
    builder
        .create(dest)
        .map_err(|error| PlacementError::io("create directory", dest, &error))
}

fn remove_existing(target: &Path) -> Result<(), PlacementError> {
    let Ok(metadata) = std::fs::symlink_metadata(target) else {
        return Ok(());
    };

    debug!("Replacing existing {}", target.display());
    let removed = if metadata.is_dir() {
        std::fs::remove_dir_all(target)
    } else {
        std::fs::remove_file(target)
    };
    removed.map_err(|error| PlacementError::io("remove existing entry", target, &error))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::place;

    fn populate(dir: &Path, files: &[(&str, &str)]) {
        for (path, contents) in files {
            let full = dir.join(path);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).expect("parent should be created");
            }
            std::fs::write(full, contents).expect("file should be written");
        }
    }

    #[test]
    fn moves_top_level_entries_into_new_directory() {
        let staging = tempfile::tempdir().expect("tempdir should be created");
        let root = tempfile::tempdir().expect("tempdir should be created");
        populate(staging.path(), &[("bin/node", "node"), ("README.md", "readme")]);
        let dest = root.path().join("v10.0.0");

        let mut placed = place(staging.path(), &dest).expect("placement should succeed");
        placed.sort();

        assert_eq!(placed, [dest.join("README.md"), dest.join("bin")]);
        assert_eq!(
            std::fs::read_to_string(dest.join("bin/node")).expect("file should be moved"),
            "node"
        );
        assert_eq!(
            std::fs::read_dir(staging.path())
                .expect("staging should be readable")
                .count(),
            0
        );
    }

    #[cfg(unix)]
    #[test]
    fn version_directory_is_created_with_0755() {
        use std::os::unix::fs::PermissionsExt;

        let staging = tempfile::tempdir().expect("tempdir should be created");
        let root = tempfile::tempdir().expect("tempdir should be created");
        let dest = root.path().join("v1.2.3");

        place(staging.path(), &dest).expect("placement should succeed");

        let mode = std::fs::metadata(&dest)
            .expect("dest should exist")
            .permissions()
            .mode();
        // umask can only clear bits.
        assert_eq!(mode & 0o700, 0o700);
        assert_eq!(mode & 0o022, 0);
    }

    #[test]
    fn existing_entries_are_replaced_and_others_kept() {
        let staging = tempfile::tempdir().expect("tempdir should be created");
        let root = tempfile::tempdir().expect("tempdir should be created");
        let dest = root.path().join("v10.0.0");
        populate(
            &dest,
            &[("bin/old-tool", "stale"), ("README.md", "old"), ("notes.txt", "mine")],
        );
        populate(staging.path(), &[("bin/node", "new"), ("README.md", "new")]);

        place(staging.path(), &dest).expect("placement should succeed");

        assert!(!dest.join("bin/old-tool").exists());
        assert_eq!(
            std::fs::read_to_string(dest.join("bin/node")).expect("new file"),
            "new"
        );
        assert_eq!(
            std::fs::read_to_string(dest.join("README.md")).expect("replaced file"),
            "new"
        );
        assert_eq!(
            std::fs::read_to_string(dest.join("notes.txt")).expect("kept file"),
            "mine"
        );
    }

    #[test]
    fn destination_blocked_by_file_fails_to_create_directory() {
        let staging = tempfile::tempdir().expect("tempdir should be created");
        let root = tempfile::tempdir().expect("tempdir should be created");
        populate(staging.path(), &[("bin/node", "node")]);
        let dest = root.path().join("v10.0.0");
        std::fs::write(&dest, "not a directory").expect("blocking file should be written");

        let error = place(staging.path(), &dest).expect_err("placement should fail");

        assert_eq!(error.action, "create directory");
        assert_eq!(error.path, dest);
        assert!(staging.path().join("bin/node").exists(), "staging is untouched");
    }

    #[test]
    fn missing_staging_root_fails_after_creating_destination() {
        let root = tempfile::tempdir().expect("tempdir should be created");
        let dest = root.path().join("v10.0.0");
        let staging = root.path().join("gone");

        let error = place(&staging, &dest).expect_err("placement should fail");

        assert_eq!(error.action, "read staging directory");
        // No rollback: the version directory stays behind, empty.
        assert!(dest.is_dir());
    }
}
