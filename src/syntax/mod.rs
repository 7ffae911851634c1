//! Go syntax layer: a `tree-sitter-go` parse lowered into a small typed tree.

pub mod ast;
pub mod parser;

pub use parser::{parse_expr, parse_file};

use ast::Pos;
use thiserror::Error;

/// A source file is not valid Go.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{pos}: {message}")]
pub struct SyntaxError {
    pub pos: Pos,
    pub message: String,
}

impl SyntaxError {
    pub fn new(pos: Pos, message: impl Into<String>) -> Self {
        Self {
            pos,
            message: message.into(),
        }
    }
}
