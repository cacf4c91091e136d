//! Zip archiving of downloaded directories.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};

/// Path of the archive produced for `directory`: a sibling `<directory>.zip`.
pub fn archive_path(directory: &Path) -> PathBuf {
    // Collecting the components drops any trailing separator
    let directory: PathBuf = directory.components().collect();
    let mut name = directory.into_os_string();
    name.push(".zip");
    PathBuf::from(name)
}

/// Compress every file under `directory` into `<directory>.zip`.
///
/// Entry names are relative to `directory` and use `/` separators; empty
/// directories get no entry. With `delete_source`, each file is removed as soon
/// as it is in the archive and the emptied directories are removed bottom-up
/// afterwards. Any failure aborts this call only and is reported as
/// [`Error::Archive`].
pub fn archive_directory(directory: &Path, delete_source: bool) -> Result<PathBuf> {
    let directory: PathBuf = directory.components().collect();
    let zip_path = archive_path(&directory);

    let wrap = |e: Error| Error::Archive {
        path: directory.clone(),
        message: e.to_string(),
    };

    if !directory.is_dir() {
        return Err(Error::Archive {
            path: directory.clone(),
            message: "not a directory".to_string(),
        });
    }

    let entries = write_archive(&directory, &zip_path, delete_source).map_err(wrap)?;
    tracing::debug!("Wrote {} entries to {}", entries, zip_path.display());

    if delete_source {
        remove_empty_tree(&directory).map_err(wrap)?;
    }

    Ok(zip_path)
}

fn write_archive(directory: &Path, zip_path: &Path, delete_source: bool) -> Result<usize> {
    let mut writer = ZipWriter::new(BufWriter::new(File::create(zip_path)?));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut entries = 0;

    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let name = entry_name(directory, path)?;

        writer.start_file(name, options)?;
        let mut source = BufReader::new(File::open(path)?);
        std::io::copy(&mut source, &mut writer)?;
        entries += 1;

        if delete_source {
            std::fs::remove_file(path)?;
        }
    }

    writer.finish()?.flush()?;
    Ok(entries)
}

/// Archive-internal name of `path`, relative to `root`.
fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| Error::Archive {
        path: path.to_path_buf(),
        message: format!("not inside {}", root.display()),
    })?;

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

/// Remove `directory` and its subdirectories, deepest first.
///
/// Uses `remove_dir`, so a file that appeared after archiving makes this fail
/// instead of being deleted unarchived.
fn remove_empty_tree(directory: &Path) -> Result<()> {
    for entry in WalkDir::new(directory).contents_first(true) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_dir() {
            std::fs::remove_dir(entry.path())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn populate(dir: &Path) {
        std::fs::create_dir_all(dir.join("sub")).unwrap();
        std::fs::write(dir.join("a.txt"), b"alpha").unwrap();
        std::fs::write(dir.join("sub").join("b.txt"), b"beta").unwrap();
    }

    fn entry_names(zip_path: &Path) -> Vec<String> {
        let archive = zip::ZipArchive::new(File::open(zip_path).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        names
    }

    #[test]
    fn test_archive_and_delete() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("images");
        populate(&dir);

        let zip_path = archive_directory(&dir, true).unwrap();

        assert_eq!(zip_path, tmp.path().join("images.zip"));
        assert_eq!(entry_names(&zip_path), vec!["a.txt", "sub/b.txt"]);
        assert!(!dir.exists());

        let mut archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        let mut content = String::new();
        archive
            .by_name("sub/b.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "beta");
    }

    #[test]
    fn test_archive_keeps_source() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("album");
        populate(&dir);
        std::fs::create_dir_all(dir.join("empty")).unwrap();

        let zip_path = archive_directory(&dir, false).unwrap();

        assert_eq!(entry_names(&zip_path), vec!["a.txt", "sub/b.txt"]);
        assert!(dir.join("a.txt").exists());
        assert!(dir.join("sub").join("b.txt").exists());
    }

    #[test]
    fn test_trailing_separator_stripped() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("walls");
        populate(&dir);

        let with_slash = PathBuf::from(format!("{}/", dir.display()));
        assert_eq!(archive_path(&with_slash), tmp.path().join("walls.zip"));

        let zip_path = archive_directory(&with_slash, true).unwrap();
        assert_eq!(zip_path, tmp.path().join("walls.zip"));
        assert!(zip_path.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_empty_directory_on_removal_is_archive_error() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("images");
        populate(&dir);
        // Links are not archived, so they stay behind and block the removal
        std::os::unix::fs::symlink(dir.join("a.txt"), dir.join("sub").join("link")).unwrap();

        let err = archive_directory(&dir, true).unwrap_err();

        match err {
            Error::Archive { path, .. } => assert_eq!(path, dir),
            other => panic!("unexpected error: {}", other),
        }
        assert!(dir.join("sub").join("link").symlink_metadata().is_ok());
        assert!(!dir.join("sub").join("b.txt").exists());
        assert_eq!(
            entry_names(&tmp.path().join("images.zip")),
            vec!["a.txt", "sub/b.txt"]
        );
    }

    #[test]
    fn test_missing_directory_is_archive_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = archive_directory(&tmp.path().join("nope"), true).unwrap_err();
        assert!(matches!(err, Error::Archive { .. }));
    }
}
