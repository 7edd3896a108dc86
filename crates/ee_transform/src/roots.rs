//! The set of entry files a compilation was started with.
//!
//! Only these files get their default export rewritten. Files reached through
//! imports keep their `default` property shape, which bundlers and other
//! consumers rely on.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct RootFiles {
    paths: HashSet<String>,
}

impl RootFiles {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let mut set = HashSet::new();
        for path in paths {
            let path = path.as_ref();
            set.insert(path.to_string());
            set.insert(normalize_path(path));
        }
        Self { paths: set }
    }

    /// Whether `file_name`, as given or lexically normalized, is a root.
    pub fn contains(&self, file_name: &str) -> bool {
        self.paths.contains(file_name) || self.paths.contains(&normalize_path(file_name))
    }
}

impl<P: AsRef<str>> FromIterator<P> for RootFiles {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Lexically normalize a path: drop `.` segments, fold `name/..` pairs and
/// repeated separators. Does not touch the filesystem.
pub fn normalize_path(path: &str) -> String {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `/..` is `/`.
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return ".".to_string();
    }

    parts
        .iter()
        .collect::<PathBuf>()
        .to_string_lossy()
        .into_owned()
}
