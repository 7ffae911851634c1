//! Loader output → [`Documentation`].

use crate::classify::{classify, ExportPolicy};
use crate::error::Error;
use crate::loader::{self, LoadOptions, SourcePackage};
use crate::model::{Documentation, FileDoc, Package};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Classify every file of every loaded package.
pub fn build(
    packages: &BTreeMap<String, SourcePackage>,
    policy: ExportPolicy,
) -> Result<Documentation, Error> {
    let mut doc = Documentation::default();
    for (key, source) in packages {
        let mut files = Vec::with_capacity(source.files.len());
        for (name, file) in &source.files {
            let decls = classify(&file.syntax, policy).map_err(|error| Error::Unsupported {
                path: file.path.clone(),
                error,
            })?;
            files.push(FileDoc {
                name: name.clone(),
                doc: file
                    .syntax
                    .doc
                    .as_ref()
                    .map(|g| g.text())
                    .filter(|t| !t.is_empty()),
                decls,
            });
        }
        debug!(package = %key, files = files.len(), "classified");
        doc.packages.push(Package {
            name: source.name.clone(),
            files,
        });
    }
    Ok(doc)
}

/// Load and classify everything under `root`.
pub fn extract(root: &Path, options: &LoadOptions, policy: ExportPolicy) -> Result<Documentation, Error> {
    let packages = loader::load(root, options)?;
    build(&packages, policy)
}
