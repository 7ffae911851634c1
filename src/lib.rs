//! godox — extract a structured documentation model from Go source trees.
//!
//! The pipeline runs leaves first: [`loader`] walks a directory and parses
//! every `.go` file through the tree-sitter backed [`syntax`] layer, [`classify`] turns
//! each file into declarations, [`typeexpr`] renders their type expressions
//! into [`TypeNode`] trees, and [`render`] serializes the resulting
//! [`Documentation`].
//!
//! ```no_run
//! use godox::{extract, ExportPolicy, LoadOptions};
//!
//! let doc = extract("src/".as_ref(), &LoadOptions::default(), ExportPolicy::Public)?;
//! println!("{}", godox::render::json::to_json(&doc)?);
//! # Ok::<(), godox::Error>(())
//! ```

pub mod classify;
pub mod error;
pub mod extract;
pub mod loader;
pub mod model;
pub mod render;
pub mod serve;
pub mod syntax;
pub mod typeexpr;

pub use classify::{classify, is_exported, ExportPolicy};
pub use error::Error;
pub use extract::{build, extract};
pub use loader::{load, LoadOptions};
pub use model::{Decl, Documentation, FileDoc, FuncDecl, Package, StructField, TypeDecl, TypeNode, VarGroup, VarItem};
pub use typeexpr::{render_type, RenderError};
