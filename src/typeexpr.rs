//! Type expression renderer: syntax tree → [`TypeNode`].
//!
//! Purely syntactic. Shapes outside the supported set fail loudly with the
//! offending expression instead of being approximated.

use crate::model::{StructField, TypeNode};
use crate::syntax::ast::{Expr, ExprKind, FieldList, Pos};
use thiserror::Error;

/// A type expression the renderer does not support.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{pos}: unsupported type expression `{expr}`")]
pub struct RenderError {
    pub pos: Pos,
    pub expr: String,
}

impl RenderError {
    pub fn new(pos: Pos, expr: impl Into<String>) -> Self {
        Self {
            pos,
            expr: expr.into(),
        }
    }

    fn unsupported(expr: &Expr) -> Self {
        Self::new(expr.pos, expr.to_string())
    }
}

/// Render one type expression.
pub fn render_type(expr: &Expr) -> Result<TypeNode, RenderError> {
    match &expr.kind {
        ExprKind::Ident(name) => Ok(TypeNode::Ident(name.clone())),
        ExprKind::Array { elem, .. } => Ok(TypeNode::Array(Box::new(render_type(elem)?))),
        ExprKind::Star(elem) => Ok(TypeNode::Pointer(Box::new(render_type(elem)?))),
        ExprKind::Selector { x, sel } => Ok(TypeNode::Selector {
            base: Box::new(render_type(x)?),
            member: sel.name.clone(),
        }),
        ExprKind::Func(signature) => Ok(TypeNode::Func {
            params: render_fields(Some(&signature.params))?,
            results: render_fields(signature.results.as_ref())?,
        }),
        ExprKind::Map { key, value } => Ok(TypeNode::Map {
            key: Box::new(render_type(key)?),
            value: Box::new(render_type(value)?),
        }),
        ExprKind::Struct(fields) => {
            let fields = fields
                .list
                .iter()
                .map(|field| {
                    Ok(StructField {
                        names: field.names.iter().map(|n| n.name.clone()).collect(),
                        ty: render_type(&field.ty)?,
                        raw_tag: field.tag.clone(),
                    })
                })
                .collect::<Result<Vec<_>, RenderError>>()?;
            Ok(TypeNode::Struct { fields })
        }
        ExprKind::Opaque(_) => Err(RenderError::unsupported(expr)),
    }
}

/// Render a parameter or result list, one entry per declared name:
/// `(a, b int, s string)` yields `[int, int, string]`. A missing list
/// renders as empty.
pub fn render_fields(list: Option<&FieldList>) -> Result<Vec<TypeNode>, RenderError> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };
    let mut types = Vec::new();
    for field in &list.list {
        let ty = render_type(&field.ty)?;
        let count = field.names.len().max(1);
        types.extend(std::iter::repeat_n(ty, count));
    }
    Ok(types)
}
