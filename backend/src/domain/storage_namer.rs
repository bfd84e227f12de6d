//! Output tree layout: `{root}/{INITIALS}/{INITIALS}_variant{N}.png`.
//!
//! Paths are pure functions of initials and variant index, so regenerating
//! the same pair always lands on (and replaces) the same file.

use std::path::{Path, PathBuf};

use super::Initials;

const VARIANT_MARKER: &str = "_variant";
const EXTENSION: &str = ".png";

/// Where one rendered variant lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarLocation {
    directory: PathBuf,
    filename: String,
    filepath: PathBuf,
}

impl AvatarLocation {
    /// Per-initials directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Bare file name, e.g. `AS_variant3.png`.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Directory joined with the file name.
    #[must_use]
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }
}

/// Resolves avatar locations beneath a configured output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageNamer {
    root: PathBuf,
}

impl StorageNamer {
    /// Lay out files under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location for one initials/variant pair.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    ///
    /// use avatar_backend::domain::{StorageNamer, normalize};
    ///
    /// let namer = StorageNamer::new("generated_images");
    /// let initials = normalize("Arjun", "Sharma").expect("valid names");
    /// let location = namer.resolve_path(&initials, 7);
    /// assert_eq!(location.filename(), "AS_variant7.png");
    /// assert_eq!(location.filepath(), Path::new("generated_images/AS/AS_variant7.png"));
    /// ```
    #[must_use]
    pub fn resolve_path(&self, initials: &Initials, variant_index: u8) -> AvatarLocation {
        let directory = self.root.join(initials.as_str());
        let filename = format!("{initials}{VARIANT_MARKER}{variant_index}{EXTENSION}");
        let filepath = directory.join(&filename);
        AvatarLocation {
            directory,
            filename,
            filepath,
        }
    }

    /// Map a requested file name back to its location, if it follows the
    /// layout for `initials`.
    ///
    /// Anything else (other initials, traversal attempts, stray files) yields
    /// `None`.
    #[must_use]
    pub fn locate(&self, initials: &Initials, filename: &str) -> Option<AvatarLocation> {
        let index = parse_variant_filename(initials, filename)?;
        Some(self.resolve_path(initials, index))
    }
}

/// Extract the variant index from `{initials}_variant{N}.png`.
#[must_use]
pub fn parse_variant_filename(initials: &Initials, filename: &str) -> Option<u8> {
    let digits = filename
        .strip_prefix(initials.as_str())?
        .strip_prefix(VARIANT_MARKER)?
        .strip_suffix(EXTENSION)?;
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::normalize;
    use rstest::{fixture, rstest};

    #[fixture]
    fn initials() -> Initials {
        normalize("Arjun", "Sharma").expect("valid names")
    }

    #[rstest]
    fn resolves_per_initials_directory(initials: Initials) {
        let namer = StorageNamer::new("/srv/avatars");
        let location = namer.resolve_path(&initials, 12);
        assert_eq!(location.directory(), Path::new("/srv/avatars/AS"));
        assert_eq!(location.filename(), "AS_variant12.png");
        assert_eq!(
            location.filepath(),
            Path::new("/srv/avatars/AS/AS_variant12.png")
        );
    }

    #[rstest]
    fn same_pair_resolves_to_same_location(initials: Initials) {
        let namer = StorageNamer::new("out");
        assert_eq!(
            namer.resolve_path(&initials, 3),
            namer.resolve_path(&initials, 3)
        );
    }

    #[rstest]
    #[case("AS_variant1.png", Some(1))]
    #[case("AS_variant12.png", Some(12))]
    #[case("AS_variant0.png", None)]
    #[case("AS_variant01.png", None)]
    #[case("AS_variant.png", None)]
    #[case("AS_variant300.png", None)]
    #[case("PP_variant1.png", None)]
    #[case("AS_variant1.jpg", None)]
    #[case("../AS_variant1.png", None)]
    fn parses_only_layout_file_names(
        initials: Initials,
        #[case] filename: &str,
        #[case] expected: Option<u8>,
    ) {
        assert_eq!(parse_variant_filename(&initials, filename), expected);
    }

    #[rstest]
    fn locate_round_trips_resolved_names(initials: Initials) {
        let namer = StorageNamer::new("out");
        let location = namer.resolve_path(&initials, 9);
        assert_eq!(namer.locate(&initials, location.filename()), Some(location));
    }
}
