//! Filesystem abstraction consumed by the loader.
//!
//! Replaces the source's process-wide filesystem singleton with an injected
//! collaborator (§9 design note: "Global mutable filesystem"). The loader is
//! constructed with a `Box<dyn FileSystem>`; tests supply [`InMemoryFileSystem`]
//! instead of touching disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;

pub trait FileSystem: Send + Sync {
    /// Reads an entire file as UTF-8 text.
    fn open_to_string(&self, path: &Utf8Path) -> std::io::Result<String>;
    /// True if `path` names a regular file.
    fn is_file(&self, path: &Utf8Path) -> bool;
    /// Recursively lists every regular file under `root`, order unspecified.
    fn walk(&self, root: &Utf8Path) -> std::io::Result<Vec<Utf8PathBuf>>;
    /// The process (or simulated) current working directory.
    fn current_dir(&self) -> std::io::Result<Utf8PathBuf>;
}

/// Backs onto `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn open_to_string(&self, path: &Utf8Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Utf8Path) -> bool {
        path.is_file()
    }

    fn walk(&self, root: &Utf8Path) -> std::io::Result<Vec<Utf8PathBuf>> {
        let mut out = Vec::new();
        walk_dir(root.as_std_path(), &mut out)?;
        Ok(out)
    }

    fn current_dir(&self) -> std::io::Result<Utf8PathBuf> {
        let cwd = std::env::current_dir()?;
        Utf8PathBuf::from_path_buf(cwd)
            .map_err(|p| std::io::Error::other(format!("non-utf8 cwd: {}", p.display())))
    }
}

fn walk_dir(dir: &std::path::Path, out: &mut Vec<Utf8PathBuf>) -> std::io::Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk_dir(&path, out)?;
        } else if let Ok(p) = Utf8PathBuf::from_path_buf(path) {
            out.push(p);
        }
    }
    Ok(())
}

/// An in-memory filesystem for deterministic, disk-free tests. Paths are
/// stored verbatim as supplied; `walk` returns every stored path that starts
/// with `root`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryFileSystem {
    files: BTreeMap<Utf8PathBuf, String>,
    cwd: Utf8PathBuf,
}

impl InMemoryFileSystem {
    #[must_use]
    pub fn new() -> Self {
        InMemoryFileSystem {
            files: BTreeMap::new(),
            cwd: Utf8PathBuf::from("/"),
        }
    }

    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<Utf8PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn add_file(&mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl FileSystem for InMemoryFileSystem {
    fn open_to_string(&self, path: &Utf8Path) -> std::io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))
    }

    fn is_file(&self, path: &Utf8Path) -> bool {
        self.files.contains_key(path)
    }

    fn walk(&self, root: &Utf8Path) -> std::io::Result<Vec<Utf8PathBuf>> {
        Ok(self
            .files
            .keys()
            .filter(|p| p.as_str().starts_with(root.as_str()))
            .cloned()
            .collect())
    }

    fn current_dir(&self) -> std::io::Result<Utf8PathBuf> {
        Ok(self.cwd.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_walk_matches_by_prefix() {
        let mut fs = InMemoryFileSystem::new();
        fs.add_file("/suites/a.yaml", "testcases: []");
        fs.add_file("/suites/nested/b.yaml", "testcases: []");
        fs.add_file("/other/c.yaml", "testcases: []");

        let mut found = fs.walk(Utf8Path::new("/suites")).unwrap();
        found.sort();
        assert_eq!(
            found,
            vec![
                Utf8PathBuf::from("/suites/a.yaml"),
                Utf8PathBuf::from("/suites/nested/b.yaml"),
            ]
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let fs = InMemoryFileSystem::new();
        let err = fs.open_to_string(Utf8Path::new("/nope.yaml")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn real_filesystem_walks_a_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("case.yaml");
        std::fs::write(&file_path, "testcases: []").unwrap();

        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let found = RealFileSystem.walk(&root).unwrap();
        assert_eq!(found.len(), 1);
        assert!(RealFileSystem.is_file(&found[0]));
    }
}
