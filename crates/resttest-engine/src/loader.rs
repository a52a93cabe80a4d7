use camino::Utf8PathBuf;
use resttest_fs::FileSystem;
use resttest_model::{Descriptor, DescriptorOutcome, Locator, TestSuite};

/// Files not matching this suffix (case-insensitive) are skipped by the
/// walk. Grounded on `script/Loader.go`'s regex-suffix matching, generalized
/// to the three document extensions this format accepts.
pub const DEFAULT_FILE_SUFFIX_RE: &str = r"(?i)\.(ya?ml|json)$";

/// Produces `{absolute_path → descriptor}` from a set of root directories
/// (§4.1). A walk error on one file never aborts the walk; it becomes that
/// descriptor's error instead.
pub struct Loader<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> Loader<'a> {
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Loader { fs }
    }

    /// Walks every root in `dirs`, returning one descriptor per matched file,
    /// sorted by absolute path for a deterministic, document-order-respecting
    /// iteration across files.
    pub fn load_dirs(&self, dirs: &[Utf8PathBuf], file_suffix_re: &str) -> Vec<Descriptor> {
        let suffix_re = regex::Regex::new(file_suffix_re)
            .unwrap_or_else(|_| regex::Regex::new(DEFAULT_FILE_SUFFIX_RE).unwrap());
        let cwd = self.fs.current_dir().unwrap_or_else(|_| Utf8PathBuf::from("."));

        let mut descriptors = Vec::new();
        for root in dirs {
            let paths = match self.fs.walk(root) {
                Ok(paths) => paths,
                Err(e) => {
                    descriptors.push(Descriptor {
                        locator: Locator::new(root.clone(), root.clone(), &cwd),
                        outcome: DescriptorOutcome::Failed(format!("failed to walk {root}: {e}")),
                    });
                    continue;
                }
            };
            for path in paths {
                let name = path.file_name().unwrap_or_default();
                if !suffix_re.is_match(name) {
                    continue;
                }
                descriptors.push(self.load_one(path, root.clone(), &cwd));
            }
        }

        descriptors.sort_by(|a, b| a.locator.absolute_path.cmp(&b.locator.absolute_path));
        descriptors
    }

    fn load_one(&self, absolute_path: Utf8PathBuf, root: Utf8PathBuf, cwd: &Utf8PathBuf) -> Descriptor {
        let locator = Locator::new(absolute_path.clone(), root, cwd);

        let raw = match self.fs.open_to_string(&absolute_path) {
            Ok(raw) => raw,
            Err(e) => {
                return Descriptor {
                    locator,
                    outcome: DescriptorOutcome::Failed(format!("io error: {e}")),
                };
            }
        };

        let yaml_value: serde_yaml::Value = match serde_yaml::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                return Descriptor {
                    locator,
                    outcome: DescriptorOutcome::Failed(format!("parse error: {e}")),
                };
            }
        };
        let json_value: serde_json::Value = match serde_json::to_value(&yaml_value) {
            Ok(v) => v,
            Err(e) => {
                return Descriptor {
                    locator,
                    outcome: DescriptorOutcome::Failed(format!("document conversion error: {e}")),
                };
            }
        };

        let violations = resttest_schema::validate(&json_value);
        if !violations.is_empty() {
            return Descriptor {
                locator,
                outcome: DescriptorOutcome::Failed(format!(
                    "schema validation failed: {}",
                    violations.join("; ")
                )),
            };
        }

        match serde_json::from_value::<TestSuite>(json_value) {
            Ok(suite) => Descriptor {
                locator,
                outcome: DescriptorOutcome::Loaded(suite),
            },
            Err(e) => Descriptor {
                locator,
                outcome: DescriptorOutcome::Failed(format!("deserialization error: {e}")),
            },
        }
    }
}
