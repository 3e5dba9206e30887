//! File selection over a resolved version's file list.
//!
//! [`FileSelector`] is the preferred interface. [`LegacyFileSelector`] adds
//! the older single-primary-file lookup on top of it; it is kept for
//! compatibility and deprecated in favor of
//! [`FileSelector::select_files`] with [`FileSelection::PRIMARY`].

use crate::error::{ModrinthError, Result};
use crate::models::{HashAlgorithm, Version, VersionFile};

bitflags::bitflags! {
    /// Which files a selection admits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FileSelection: u8 {
        /// Files flagged primary
        const PRIMARY = 1 << 0;
        /// Every other file
        const OPTIONAL = 1 << 1;
    }
}

impl Default for FileSelection {
    fn default() -> Self {
        FileSelection::all()
    }
}

impl FileSelection {
    /// Build a selection from the two include flags
    pub fn from_flags(include_primary: bool, include_optional: bool) -> Self {
        let mut selection = FileSelection::empty();
        selection.set(FileSelection::PRIMARY, include_primary);
        selection.set(FileSelection::OPTIONAL, include_optional);
        selection
    }

    /// Whether `file` passes this selection
    pub fn admits(&self, file: &VersionFile) -> bool {
        if file.primary {
            self.contains(FileSelection::PRIMARY)
        } else {
            self.contains(FileSelection::OPTIONAL)
        }
    }
}

/// Selection and lookup over a list of distribution files
pub trait FileSelector {
    /// The files to select from, in API order
    fn files(&self) -> &[VersionFile];

    /// Files admitted by `selection`, in order
    fn selected(&self, selection: FileSelection) -> Vec<&VersionFile> {
        self.files()
            .iter()
            .filter(|file| selection.admits(file))
            .collect()
    }

    /// Hashes under `algorithm` of the files admitted by `selection`, in order
    fn select_files(&self, selection: FileSelection, algorithm: HashAlgorithm) -> Vec<&str> {
        self.selected(selection)
            .into_iter()
            .map(|file| file.hashes.get(algorithm))
            .collect()
    }

    /// First file admitted by `selection` whose hash under `algorithm` is `hash`
    fn find_selected(
        &self,
        selection: FileSelection,
        hash: &str,
        algorithm: HashAlgorithm,
    ) -> Result<&VersionFile> {
        self.selected(selection)
            .into_iter()
            .find(|file| file.hashes.get(algorithm) == hash)
            .ok_or_else(|| no_file_with_hash(hash, algorithm))
    }

    /// URL of the first file, primary or not, whose hash under `algorithm` is `hash`
    fn resolve_download_url(&self, hash: &str, algorithm: HashAlgorithm) -> Result<&str> {
        self.find_selected(FileSelection::all(), hash, algorithm)
            .map(|file| file.url.as_str())
    }
}

/// [`FileSelector`] plus the single-primary-file lookup older callers use
pub trait LegacyFileSelector: FileSelector {
    /// Hash under `algorithm` of the first file flagged primary.
    ///
    /// If several files are flagged primary the first one wins.
    #[deprecated(note = "use FileSelector::select_files with FileSelection::PRIMARY")]
    fn select_primary_file(&self, algorithm: HashAlgorithm) -> Result<&str> {
        tracing::warn!("select_primary_file is deprecated, use select_files instead");
        self.files()
            .iter()
            .find(|file| file.primary)
            .map(|file| file.hashes.get(algorithm))
            .ok_or_else(|| ModrinthError::NotFound("no primary file found".to_string()))
    }
}

impl FileSelector for Version {
    fn files(&self) -> &[VersionFile] {
        &self.files
    }
}

impl LegacyFileSelector for Version {}

fn no_file_with_hash(hash: &str, algorithm: HashAlgorithm) -> ModrinthError {
    ModrinthError::NotFound(format!("no file with {} hash {}", algorithm, hash))
}
