//! Declaration classifier: parsed file → ordered [`Decl`] list.
//!
//! Functions, `var` groups and type declarations are kept; imports and
//! constants are dropped. Export filtering is a caller-selected policy.

use crate::model::{Decl, FuncDecl, TypeDecl, VarGroup, VarItem};
use crate::syntax::ast::{self, CommentGroup, GenKind, Spec};
use crate::typeexpr::{render_fields, render_type, RenderError};

/// Which declarations end up in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportPolicy {
    /// Exported identifiers only (leading upper-case letter).
    #[default]
    Public,
    /// Everything, exported or not.
    All,
}

impl ExportPolicy {
    fn keeps(self, name: &str) -> bool {
        self == ExportPolicy::All || is_exported(name)
    }
}

/// Go's export rule: the name starts with an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

fn doc_text(group: Option<&CommentGroup>) -> Option<String> {
    group.map(CommentGroup::text).filter(|t| !t.is_empty())
}

/// Classify every top-level declaration of `file`, in source order.
///
/// Types are rendered before the export filter runs, so an unsupported type
/// fails the file even inside a declaration that would be filtered out.
pub fn classify(file: &ast::File, policy: ExportPolicy) -> Result<Vec<Decl>, RenderError> {
    let mut decls = Vec::new();
    for decl in &file.decls {
        match decl {
            ast::Decl::Func(func) => {
                let rendered = classify_func(func)?;
                if policy.keeps(&rendered.name) {
                    decls.push(Decl::Func(rendered));
                }
            }
            ast::Decl::Gen(gen) => match gen.kind {
                GenKind::Type => {
                    for rendered in classify_types(gen)? {
                        if policy.keeps(&rendered.name) {
                            decls.push(Decl::Type(rendered));
                        }
                    }
                }
                GenKind::Var => decls.push(Decl::VarGroup(classify_vars(gen, policy)?)),
                GenKind::Const => {}
            },
        }
    }
    Ok(decls)
}

fn classify_func(func: &ast::FuncDecl) -> Result<FuncDecl, RenderError> {
    if let Some(ref params) = func.type_params {
        return Err(RenderError::new(params.pos, params.text.clone()));
    }
    let recv = match func.recv.as_ref().and_then(|r| r.list.first()) {
        Some(field) => Some(render_type(&field.ty)?),
        None => None,
    };

    Ok(FuncDecl {
        name: func.name.name.clone(),
        doc: doc_text(func.doc.as_ref()),
        recv,
        params: render_fields(Some(&func.signature.params))?,
        results: render_fields(func.signature.results.as_ref())?,
    })
}

/// One [`TypeDecl`] per spec of the declaration, grouped or not.
fn classify_types(gen: &ast::GenDecl) -> Result<Vec<TypeDecl>, RenderError> {
    // An ungrouped declaration carries the doc comment itself.
    let fallback = if gen.specs.len() == 1 {
        gen.doc.as_ref()
    } else {
        None
    };

    let mut decls = Vec::new();
    for spec in &gen.specs {
        let Spec::Type(spec) = spec else {
            continue;
        };
        if let Some(ref params) = spec.type_params {
            return Err(RenderError::new(params.pos, params.text.clone()));
        }
        decls.push(TypeDecl {
            name: spec.name.name.clone(),
            doc: doc_text(spec.doc.as_ref().or(fallback)),
            ty: render_type(&spec.ty)?,
        });
    }
    Ok(decls)
}

fn classify_vars(gen: &ast::GenDecl, policy: ExportPolicy) -> Result<VarGroup, RenderError> {
    let mut items = Vec::new();
    for spec in &gen.specs {
        let Spec::Value(spec) = spec else {
            continue;
        };
        let ty = match spec.ty {
            Some(ref ty) => Some(render_type(ty)?),
            None => None,
        };
        items.push(VarItem {
            doc: doc_text(spec.doc.as_ref()),
            names: spec
                .names
                .iter()
                .map(|n| n.name.clone())
                .filter(|n| policy.keeps(n))
                .collect(),
            ty,
        });
    }

    Ok(VarGroup {
        doc: doc_text(gen.doc.as_ref()),
        items,
    })
}
