//! Input discovery: the image files of one directory

use crate::error::{BenfordError, BenfordResult};

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Accepted file-name suffixes (case-sensitive)
pub const SUPPORTED_SUFFIXES: &[&str] = &[".jpg", ".jpeg"];

/// Gitignore-style file listing names to leave out of a batch
pub const IGNORE_FILE_NAME: &str = ".benstatsignore";

/// List the images directly inside `dir`, sorted by file name.
///
/// Not recursive. Hidden files and names matched by `.benstatsignore` are
/// skipped. A missing directory is an error.
pub fn list_images(dir: &Path) -> BenfordResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(BenfordError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input directory not found: {}", dir.display()),
        )));
    }

    let mut builder = WalkBuilder::new(dir);
    builder
        .max_depth(Some(1))
        .hidden(true)
        .parents(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .require_git(false)
        .add_custom_ignore_filename(IGNORE_FILE_NAME)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_image = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|name| SUPPORTED_SUFFIXES.iter().any(|s| name.ends_with(s)))
            .unwrap_or(false);
        if is_image {
            files.push(path.to_path_buf());
        }
    }

    debug!("Found {} images in {}", files.len(), dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_lists_jpegs_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.jpeg", "a.jpg", "c.png", "d.JPG", "notes.txt", "e.jpg.bak"] {
            touch(dir.path(), name);
        }
        let files = list_images(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["a.jpg", "b.jpeg"]);
    }

    #[test]
    fn test_not_recursive_and_skips_hidden() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "top.jpg");
        touch(dir.path(), ".hidden.jpg");
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "deep.jpg");
        std::fs::create_dir(dir.path().join("folder.jpg")).unwrap();

        let files = list_images(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["top.jpg"]);
    }

    #[test]
    fn test_ignore_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "keep.jpg");
        touch(dir.path(), "thumb_1.jpg");
        std::fs::write(dir.path().join(IGNORE_FILE_NAME), "thumb_*\n").unwrap();

        let files = list_images(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["keep.jpg"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_images(&dir.path().join("absent")).unwrap_err();
        assert!(err.to_string().contains("input directory not found"));
    }
}
