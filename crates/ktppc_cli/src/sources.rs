//! Finding the source files to parse

use eyre::{eyre, WrapErr};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Expands `paths` into the source files to parse, in sorted order.
///
/// Files are always kept. Directories are walked recursively, keeping only the files with the
/// given extension.
pub fn collect_sources<P: AsRef<Path>>(paths: &[P], extension: &str) -> eyre::Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_file() {
            files.insert(path.to_path_buf());
        } else if path.is_dir() {
            walk(path, extension, &mut files)?;
        } else {
            return Err(eyre!("no such file or directory: {}", path.display()));
        }
    }
    Ok(files.into_iter().collect())
}

fn walk(dir: &Path, extension: &str, files: &mut BTreeSet<PathBuf>) -> eyre::Result<()> {
    let mut stack = vec![dir.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let read_dir = std::fs::read_dir(&dir)
            .wrap_err_with(|| format!("could not read directory {}", dir.display()))?;
        for entry in read_dir {
            let path = entry?.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().is_some_and(|ext| ext == extension) {
                trace!("found source {}", path.display());
                files.insert(path);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use test_log::test;

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
        for file in [
            "main.ktpp",
            "notes.txt",
            "nested/b.ktpp",
            "nested/a.ktpp",
            "nested/deeper/c.ktpp",
        ] {
            fs::write(dir.path().join(file), "var x = 1").unwrap();
        }
        dir
    }

    #[test]
    fn walks_directories_in_order() {
        let dir = tree();
        let files = collect_sources(&[dir.path()], "ktpp").unwrap();
        let relative = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect::<Vec<_>>();
        assert_eq!(
            relative,
            [
                Path::new("main.ktpp"),
                Path::new("nested/a.ktpp"),
                Path::new("nested/b.ktpp"),
                Path::new("nested/deeper/c.ktpp"),
            ]
        );
    }

    #[test]
    fn explicit_files_ignore_extension() {
        let dir = tree();
        let notes = dir.path().join("notes.txt");
        let files = collect_sources(&[&notes, &notes], "ktpp").unwrap();
        assert_eq!(files, [notes]);
    }

    #[test]
    fn other_extension() {
        let dir = tree();
        let files = collect_sources(&[dir.path()], "txt").unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = tree();
        let missing = dir.path().join("missing.ktpp");
        assert!(collect_sources(&[missing], "ktpp").is_err());
    }
}
