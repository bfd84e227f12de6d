//! Filesystem-backed avatar store built on `cap_std`.
//!
//! Images land at the location resolved by the domain namer. Each write is
//! staged beside its target and then renamed over it, so readers never see a
//! half-written PNG and the last completed writer wins.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;
use uuid::Uuid;

use crate::domain::AvatarLocation;
use crate::domain::ports::{AvatarStore, AvatarStoreError, StoredInitials, StoredInventory};

const PNG_SUFFIX: &str = ".png";

/// Stores avatars beneath directories opened with ambient authority.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsAvatarStore;

impl FsAvatarStore {
    /// Create the store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn open_directory(path: &Path) -> Result<Dir, AvatarStoreError> {
    Dir::create_ambient_dir_all(path, ambient_authority())
        .map_err(|error| AvatarStoreError::directory(path, error.to_string()))?;
    Dir::open_ambient_dir(path, ambient_authority())
        .map_err(|error| AvatarStoreError::directory(path, error.to_string()))
}

// `rename` replaces an existing target in one step, so readers see either
// the previous image or the new one.
fn replace_file(directory: &Dir, from: &str, to: &str, target: &Path) -> Result<(), AvatarStoreError> {
    directory
        .rename(from, directory, to)
        .map_err(|error| AvatarStoreError::write(target, error.to_string()))
}

fn count_pngs(directory: &Dir, path: &Path) -> Result<usize, AvatarStoreError> {
    let entries = directory
        .entries()
        .map_err(|error| AvatarStoreError::read(path, error.to_string()))?;
    let mut count = 0;
    for entry in entries {
        let entry = entry.map_err(|error| AvatarStoreError::read(path, error.to_string()))?;
        let is_file = entry
            .file_type()
            .map_err(|error| AvatarStoreError::read(path, error.to_string()))?
            .is_file();
        if is_file && entry.file_name().to_string_lossy().ends_with(PNG_SUFFIX) {
            count += 1;
        }
    }
    Ok(count)
}

impl AvatarStore for FsAvatarStore {
    fn write(&self, location: &AvatarLocation, png: &[u8]) -> Result<(), AvatarStoreError> {
        let directory = open_directory(location.directory())?;
        let staged = format!(".{}.{}.tmp", location.filename(), Uuid::new_v4().simple());

        directory
            .write(&staged, png)
            .map_err(|error| AvatarStoreError::write(location.filepath(), error.to_string()))?;
        let result = replace_file(&directory, &staged, location.filename(), location.filepath());
        if result.is_err() {
            let _cleanup_result = directory.remove_file(&staged);
        }
        result?;

        debug!(path = %location.filepath().display(), bytes = png.len(), "avatar written");
        Ok(())
    }

    fn read(&self, location: &AvatarLocation) -> Result<Vec<u8>, AvatarStoreError> {
        let missing = || AvatarStoreError::missing(location.filepath());
        let directory = match Dir::open_ambient_dir(location.directory(), ambient_authority()) {
            Ok(directory) => directory,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Err(missing()),
            Err(error) => {
                return Err(AvatarStoreError::read(location.directory(), error.to_string()));
            }
        };
        match directory.read(location.filename()) {
            Ok(bytes) => Ok(bytes),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Err(missing()),
            Err(error) => Err(AvatarStoreError::read(location.filepath(), error.to_string())),
        }
    }

    fn inventory(&self, root: &Path) -> Result<StoredInventory, AvatarStoreError> {
        let root_dir = match Dir::open_ambient_dir(root, ambient_authority()) {
            Ok(directory) => directory,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(StoredInventory::default());
            }
            Err(error) => return Err(AvatarStoreError::read(root, error.to_string())),
        };
        let entries = root_dir
            .entries()
            .map_err(|error| AvatarStoreError::read(root, error.to_string()))?;

        let mut counts = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(|error| AvatarStoreError::read(root, error.to_string()))?;
            let is_dir = entry
                .file_type()
                .map_err(|error| AvatarStoreError::read(root, error.to_string()))?
                .is_dir();
            if !is_dir {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = root.join(&name);
            let directory = entry
                .open_dir()
                .map_err(|error| AvatarStoreError::read(&path, error.to_string()))?;
            counts.insert(name, count_pngs(&directory, &path)?);
        }

        Ok(StoredInventory {
            entries: counts
                .into_iter()
                .map(|(initials, variants)| StoredInitials { initials, variants })
                .collect(),
        })
    }
}
