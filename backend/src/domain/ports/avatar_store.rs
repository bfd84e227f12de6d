//! Driven port persisting rendered avatars.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::define_port_error;
use crate::domain::AvatarLocation;

define_port_error! {
    /// Storage failures. All of them are reported to callers, never swallowed.
    pub enum AvatarStoreError {
        /// The per-initials directory could not be created or opened.
        Directory { path: PathBuf, message: String } => "cannot prepare directory {path:?}: {message}",
        /// Writing or replacing the image file failed.
        Write { path: PathBuf, message: String } => "cannot write {path:?}: {message}",
        /// Reading an image or listing the tree failed.
        Read { path: PathBuf, message: String } => "cannot read {path:?}: {message}",
        /// No image is stored at the location.
        Missing { path: PathBuf } => "no stored image at {path:?}",
    }
}

/// Number of stored variants for one initials directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredInitials {
    /// Directory name, i.e. the initials code.
    pub initials: String,
    /// PNG files present in the directory.
    pub variants: usize,
}

/// Snapshot of what is on disk beneath the output root, sorted by initials.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoredInventory {
    /// One entry per initials directory.
    pub entries: Vec<StoredInitials>,
}

impl StoredInventory {
    /// Count of initials directories.
    #[must_use]
    pub fn total_initials(&self) -> usize {
        self.entries.len()
    }

    /// Count of stored PNG files across all directories.
    #[must_use]
    pub fn total_variants(&self) -> usize {
        self.entries.iter().map(|entry| entry.variants).sum()
    }
}

/// Persists and retrieves encoded avatars.
///
/// `write` replaces any existing file at the location; concurrent writers to
/// the same location race with last-writer-wins semantics.
#[cfg_attr(test, mockall::automock)]
pub trait AvatarStore: Send + Sync {
    /// Store `png` at `location`, creating the directory on demand.
    fn write(&self, location: &AvatarLocation, png: &[u8]) -> Result<(), AvatarStoreError>;

    /// Load the bytes stored at `location`.
    fn read(&self, location: &AvatarLocation) -> Result<Vec<u8>, AvatarStoreError>;

    /// List initials directories beneath `root` with their PNG counts.
    fn inventory(&self, root: &Path) -> Result<StoredInventory, AvatarStoreError>;
}

/// Process-local store keyed by file path.
///
/// Useful for tests and dry runs; nothing touches the filesystem.
#[derive(Debug, Default)]
pub struct InMemoryAvatarStore {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl InMemoryAvatarStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn files(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Vec<u8>>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Paths currently stored, in sorted order.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files().keys().cloned().collect()
    }
}

impl AvatarStore for InMemoryAvatarStore {
    fn write(&self, location: &AvatarLocation, png: &[u8]) -> Result<(), AvatarStoreError> {
        self.files()
            .insert(location.filepath().to_path_buf(), png.to_vec());
        Ok(())
    }

    fn read(&self, location: &AvatarLocation) -> Result<Vec<u8>, AvatarStoreError> {
        self.files()
            .get(location.filepath())
            .cloned()
            .ok_or_else(|| AvatarStoreError::missing(location.filepath()))
    }

    fn inventory(&self, root: &Path) -> Result<StoredInventory, AvatarStoreError> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for path in self.files().keys() {
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let mut parts = relative.components();
            if let (Some(dir), Some(_file), None) = (parts.next(), parts.next(), parts.next()) {
                *counts
                    .entry(dir.as_os_str().to_string_lossy().into_owned())
                    .or_default() += 1;
            }
        }
        Ok(StoredInventory {
            entries: counts
                .into_iter()
                .map(|(initials, variants)| StoredInitials { initials, variants })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StorageNamer, normalize};
    use rstest::rstest;

    #[rstest]
    fn in_memory_store_replaces_and_inventories() {
        let store = InMemoryAvatarStore::new();
        let namer = StorageNamer::new("root");
        let as_code = normalize("Arjun", "Sharma").expect("valid");
        let pp_code = normalize("Priya", "Patel").expect("valid");

        let first = namer.resolve_path(&as_code, 1);
        store.write(&first, b"old").expect("write");
        store.write(&first, b"new").expect("overwrite");
        store
            .write(&namer.resolve_path(&as_code, 2), b"two")
            .expect("write");
        store
            .write(&namer.resolve_path(&pp_code, 5), b"five")
            .expect("write");

        assert_eq!(store.read(&first).expect("read"), b"new");
        let inventory = store.inventory(namer.root()).expect("inventory");
        assert_eq!(inventory.total_initials(), 2);
        assert_eq!(inventory.total_variants(), 3);
        assert_eq!(
            inventory.entries.first(),
            Some(&StoredInitials {
                initials: "AS".to_owned(),
                variants: 2,
            })
        );
    }

    #[rstest]
    fn reading_absent_location_reports_missing() {
        let store = InMemoryAvatarStore::new();
        let initials = normalize("Vikram", "Singh").expect("valid");
        let location = StorageNamer::new("root").resolve_path(&initials, 4);
        assert_eq!(
            store.read(&location),
            Err(AvatarStoreError::missing(location.filepath()))
        );
    }
}
