use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SinteseError};

/// Confirm `dir_name` is an entry of `base`'s listing and is a directory.
///
/// Both checks must pass. Returns the joined path on success.
pub fn check_synthesis_dir(base: &Path, dir_name: &str) -> Result<PathBuf> {
    let listed = fs::read_dir(base)?
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_name().to_str() == Some(dir_name));

    let path = base.join(dir_name);
    if listed && path.is_dir() {
        tracing::info!("Synthesis directory (./{dir_name}) found");
        Ok(path)
    } else {
        Err(SinteseError::DirectoryNotFound(dir_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_listed_directory() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("sintese")).unwrap();
        let path = check_synthesis_dir(tmp.path(), "sintese").unwrap();
        assert_eq!(path, tmp.path().join("sintese"));
    }

    #[test]
    fn rejects_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let err = check_synthesis_dir(tmp.path(), "sintese").unwrap_err();
        assert!(matches!(err, SinteseError::DirectoryNotFound(ref d) if d == "sintese"));
    }

    #[test]
    fn rejects_plain_file_with_directory_name() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("sintese"), b"not a dir").unwrap();
        assert!(matches!(
            check_synthesis_dir(tmp.path(), "sintese"),
            Err(SinteseError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn nested_path_fails_listing_check() {
        // `a/b` is a directory but not an entry of the base listing.
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("a").join("b")).unwrap();
        assert!(tmp.path().join("a/b").is_dir());
        assert!(matches!(
            check_synthesis_dir(tmp.path(), "a/b"),
            Err(SinteseError::DirectoryNotFound(_))
        ));
    }
}
