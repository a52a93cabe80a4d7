use camino::Utf8PathBuf;

/// Where a suite document was found, captured once during the directory walk.
///
/// Immutable after construction; downstream stages never recompute these paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub absolute_path: Utf8PathBuf,
    pub relative_to_cwd: Utf8PathBuf,
    pub root: Utf8PathBuf,
    pub suffix: Utf8PathBuf,
}

impl Locator {
    #[must_use]
    pub fn new(absolute_path: Utf8PathBuf, root: Utf8PathBuf, cwd: &Utf8PathBuf) -> Self {
        let suffix = absolute_path
            .strip_prefix(&root)
            .map(Utf8PathBuf::from)
            .unwrap_or_else(|_| absolute_path.clone());
        let relative_to_cwd = absolute_path
            .strip_prefix(cwd)
            .map(Utf8PathBuf::from)
            .unwrap_or_else(|_| absolute_path.clone());
        Locator {
            absolute_path,
            relative_to_cwd,
            root,
            suffix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_is_relative_to_root() {
        let root = Utf8PathBuf::from("/work/suites");
        let cwd = Utf8PathBuf::from("/work");
        let abs = Utf8PathBuf::from("/work/suites/a/b.yaml");
        let loc = Locator::new(abs.clone(), root.clone(), &cwd);
        assert_eq!(loc.suffix, Utf8PathBuf::from("a/b.yaml"));
        assert_eq!(loc.relative_to_cwd, Utf8PathBuf::from("suites/a/b.yaml"));
        assert_eq!(loc.absolute_path, abs);
    }
}
