//! Directory package loader.
//!
//! Walks a directory tree, parses every eligible `.go` file and buckets the
//! files by their declared package name.

use crate::error::Error;
use crate::syntax::{self, ast};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Caller predicate over absolute file paths.
pub type FileFilter = Box<dyn Fn(&Path) -> bool + Send + Sync>;

/// What to load and how to group it.
pub struct LoadOptions {
    /// Merge same-named packages from different directories.
    pub merge_directories: bool,
    /// Ignore `*_test.go` files.
    pub skip_tests: bool,
    /// Root-relative paths matching any of these are skipped.
    pub exclude: Vec<glob::Pattern>,
    pub filter: Option<FileFilter>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            merge_directories: true,
            skip_tests: false,
            exclude: Vec::new(),
            filter: None,
        }
    }
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("merge_directories", &self.merge_directories)
            .field("skip_tests", &self.skip_tests)
            .field("exclude", &self.exclude)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

impl LoadOptions {
    /// Compile `--exclude` style glob patterns.
    pub fn with_excludes<I, S>(mut self, patterns: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let compiled = glob::Pattern::new(pattern).map_err(|source| Error::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;
            self.exclude.push(compiled);
        }
        Ok(self)
    }

    pub fn with_filter(mut self, filter: impl Fn(&Path) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    fn accepts(&self, path: &Path, rel: &str) -> bool {
        if !rel.ends_with(".go") {
            return false;
        }
        if self.skip_tests && rel.ends_with("_test.go") {
            return false;
        }
        if self.exclude.iter().any(|p| p.matches(rel)) {
            return false;
        }
        self.filter.as_ref().is_none_or(|f| f(path))
    }
}

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub syntax: ast::File,
}

/// Files sharing a declared package name.
#[derive(Debug, Clone)]
pub struct SourcePackage {
    pub name: String,
    /// Keyed by root-relative, `/`-separated path.
    pub files: BTreeMap<String, SourceFile>,
}

/// Root-relative path with `/` separators, whatever the platform.
fn relative_name(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Bucket key for a file: the package name, or `<dir>/<name>` when
/// directories are kept apart.
fn package_key(rel: &str, name: &str, merge: bool) -> String {
    if merge {
        return name.to_string();
    }
    match rel.rsplit_once('/') {
        Some((dir, _)) => format!("{}/{}", dir, name),
        None => name.to_string(),
    }
}

/// Load every package under `root`.
///
/// The first unreadable directory, unreadable file or syntax error aborts
/// the walk.
pub fn load(root: &Path, options: &LoadOptions) -> Result<BTreeMap<String, SourcePackage>, Error> {
    let mut packages: BTreeMap<String, SourcePackage> = BTreeMap::new();
    let mut count = 0usize;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|err| Error::Io {
            path: err.path().unwrap_or(root).to_path_buf(),
            source: err.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let rel = relative_name(root, path);
        if !options.accepts(path, &rel) {
            continue;
        }

        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let syntax = syntax::parse_file(&source).map_err(|error| Error::Parse {
            path: path.to_path_buf(),
            error,
        })?;
        debug!(file = %rel, package = %syntax.package.name, "parsed");

        let name = syntax.package.name.clone();
        let key = package_key(&rel, &name, options.merge_directories);
        packages
            .entry(key)
            .or_insert_with(|| SourcePackage {
                name,
                files: BTreeMap::new(),
            })
            .files
            .insert(
                rel,
                SourceFile {
                    path: path.to_path_buf(),
                    syntax,
                },
            );
        count += 1;
    }

    if count == 0 {
        warn!(root = %root.display(), "no Go files found");
    } else {
        info!(files = count, packages = packages.len(), "loaded sources");
    }
    Ok(packages)
}
