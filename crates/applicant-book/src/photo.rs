//! Profile photo storage: copies user-picked images into the book's photo folder.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("'{}' is not a png or jpeg image", .path.display())]
    UnsupportedType { path: PathBuf },
    #[error("photo '{}' does not exist", .path.display())]
    Missing { path: PathBuf },
    #[error("failed to store photo '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ProfilePhotoStore {
    dir: PathBuf,
}

impl ProfilePhotoStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copies `source` into the photo folder and returns the stored path.
    ///
    /// An existing file with the same name is never overwritten; the copy is
    /// renamed `stem_1.ext`, `stem_2.ext` and so on.
    pub fn import(&self, source: &Path) -> Result<PathBuf, PhotoError> {
        if !is_supported_image(source) {
            return Err(PhotoError::UnsupportedType {
                path: source.to_path_buf(),
            });
        }
        if !source.is_file() {
            return Err(PhotoError::Missing {
                path: source.to_path_buf(),
            });
        }

        fs::create_dir_all(&self.dir).map_err(|source| PhotoError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let target = self.free_target(source);
        fs::copy(source, &target).map_err(|err| PhotoError::Io {
            path: target.clone(),
            source: err,
        })?;
        debug!(from = %source.display(), to = %target.display(), "profile photo stored");
        Ok(target)
    }

    fn free_target(&self, source: &Path) -> PathBuf {
        let file_name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        let first = self.dir.join(&file_name);
        if !first.exists() {
            return first;
        }

        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        let extension = source
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        (1..)
            .map(|copy| self.dir.join(format!("{stem}_{copy}{extension}")))
            .find(|candidate| !candidate.exists())
            .unwrap_or(first)
    }
}

fn is_supported_image(path: &Path) -> bool {
    mime_guess::from_path(path)
        .iter()
        .any(|guess| guess == mime::IMAGE_PNG || guess == mime::IMAGE_JPEG)
}

/// Deletes a stored photo. A file that is already gone is only logged.
pub fn discard(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "profile photo discarded"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "profile photo already gone");
        }
        Err(err) => warn!(path = %path.display(), error = %err, "failed to discard profile photo"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn picture(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"\x89PNG fake").expect("write picture");
        path
    }

    #[test]
    fn import_copies_under_original_name() {
        let source_dir = TempDir::new().unwrap();
        let photos = TempDir::new().unwrap();
        let store = ProfilePhotoStore::new(photos.path().join("profile_photos"));

        let stored = store
            .import(&picture(source_dir.path(), "alex.png"))
            .expect("import");

        assert_eq!(stored, store.dir().join("alex.png"));
        assert!(stored.is_file());
    }

    #[test]
    fn name_collisions_get_numbered_suffixes() {
        let source_dir = TempDir::new().unwrap();
        let photos = TempDir::new().unwrap();
        let store = ProfilePhotoStore::new(photos.path());
        let source = picture(source_dir.path(), "alex.jpg");

        let first = store.import(&source).unwrap();
        let second = store.import(&source).unwrap();
        let third = store.import(&source).unwrap();

        assert_eq!(first.file_name().unwrap(), "alex.jpg");
        assert_eq!(second.file_name().unwrap(), "alex_1.jpg");
        assert_eq!(third.file_name().unwrap(), "alex_2.jpg");
    }

    #[test]
    fn rejects_non_images_and_missing_files() {
        let source_dir = TempDir::new().unwrap();
        let store = ProfilePhotoStore::new(source_dir.path().join("photos"));
        let text = source_dir.path().join("notes.txt");
        fs::write(&text, "hello").unwrap();

        assert!(matches!(
            store.import(&text),
            Err(PhotoError::UnsupportedType { .. })
        ));
        assert!(matches!(
            store.import(&source_dir.path().join("ghost.jpeg")),
            Err(PhotoError::Missing { .. })
        ));
    }

    #[test]
    fn discard_removes_file_and_tolerates_missing() {
        let dir = TempDir::new().unwrap();
        let path = picture(dir.path(), "gone.png");
        discard(&path);
        assert!(!path.exists());
        discard(&path);
    }
}
