//! Syntax tree for Go source files.
//!
//! Covers what documentation extraction needs: the package clause, top-level
//! declarations with their doc comments, and the type shapes the renderer
//! understands. Any other type shape is kept as its source text. Function
//! bodies, imports and initializer expressions are not represented.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Compiler directives such as `//go:generate` or `//line` are not doc text.
static RE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(line |extern |export |[a-z0-9]+:[a-z0-9])").unwrap());

/// 1-based line and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// -- Comments -----------------------------------------------------------------

/// A single `//` or `/* */` comment, markers included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub pos: Pos,
}

/// Adjacent comments with no blank line or token between them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

impl CommentGroup {
    /// Comment text with markers removed.
    ///
    /// Strips one leading space from line comments, drops directive lines,
    /// trims trailing whitespace, collapses runs of blank lines and removes
    /// leading/trailing ones. Non-empty results end with a newline.
    pub fn text(&self) -> String {
        let mut lines: Vec<&str> = Vec::new();

        for comment in &self.list {
            let body = if let Some(rest) = comment.text.strip_prefix("//") {
                if let Some(stripped) = rest.strip_prefix(' ') {
                    stripped
                } else if RE_DIRECTIVE.is_match(rest) {
                    continue;
                } else {
                    rest
                }
            } else {
                comment
                    .text
                    .strip_prefix("/*")
                    .and_then(|c| c.strip_suffix("*/"))
                    .unwrap_or(&comment.text)
            };
            lines.extend(body.split('\n').map(|l| l.trim_end()));
        }

        let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
        for line in lines {
            let previous_blank = kept.last().is_none_or(|l| l.is_empty());
            if !line.is_empty() || !previous_blank {
                kept.push(line);
            }
        }
        if kept.last().is_some_and(|l| !l.is_empty()) {
            kept.push("");
        }
        kept.join("\n")
    }
}

// -- Declarations -------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub pos: Pos,
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Comment group directly above the `package` clause.
    pub doc: Option<CommentGroup>,
    pub package: Ident,
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Func(FuncDecl),
    Gen(GenDecl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub doc: Option<CommentGroup>,
    pub recv: Option<FieldList>,
    pub name: Ident,
    pub type_params: Option<TypeParams>,
    pub signature: FuncType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenKind {
    Const,
    Type,
    Var,
}

impl GenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenKind::Const => "const",
            GenKind::Type => "type",
            GenKind::Var => "var",
        }
    }
}

/// `const`, `type` or `var`, grouped or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenDecl {
    pub doc: Option<CommentGroup>,
    pub kind: GenKind,
    pub pos: Pos,
    pub specs: Vec<Spec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spec {
    Value(ValueSpec),
    Type(TypeSpec),
}

/// One line of a `var` or `const` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpec {
    pub doc: Option<CommentGroup>,
    pub names: Vec<Ident>,
    pub ty: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub doc: Option<CommentGroup>,
    pub name: Ident,
    pub type_params: Option<TypeParams>,
    /// `type A = B`
    pub alias: bool,
    pub ty: Expr,
}

/// Generic type parameter list, kept as source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParams {
    pub pos: Pos,
    pub text: String,
}

// -- Type expressions ---------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub names: Vec<Ident>,
    pub ty: Expr,
    /// Raw tag literal, quotes or backticks included.
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList {
    pub pos: Pos,
    pub list: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncType {
    pub params: FieldList,
    pub results: Option<FieldList>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub pos: Pos,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    Ident(String),
    /// `X.Sel`
    Selector { x: Box<Expr>, sel: Ident },
    /// `*X`
    Star(Box<Expr>),
    /// `[]T` when `len` is `None`, `[N]T` otherwise.
    Array { len: Option<String>, elem: Box<Expr> },
    Map { key: Box<Expr>, value: Box<Expr> },
    Func(FuncType),
    Struct(FieldList),
    /// Channels, interfaces, `...T`, generic instantiations, parenthesized
    /// types: source text with whitespace runs collapsed.
    Opaque(String),
}

impl Expr {
    pub fn new(pos: Pos, kind: ExprKind) -> Self {
        Self { pos, kind }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Ident(name) => f.write_str(name),
            ExprKind::Selector { x, sel } => write!(f, "{}.{}", x, sel.name),
            ExprKind::Star(x) => write!(f, "*{}", x),
            ExprKind::Array { len: None, elem } => write!(f, "[]{}", elem),
            ExprKind::Array { len: Some(len), elem } => write!(f, "[{}]{}", len, elem),
            ExprKind::Map { key, value } => write!(f, "map[{}]{}", key, value),
            ExprKind::Func(sig) => write!(f, "func{}", sig),
            ExprKind::Struct(fields) if fields.list.is_empty() => f.write_str("struct{}"),
            ExprKind::Struct(fields) => {
                f.write_str("struct{ ")?;
                for (i, field) in fields.list.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}", field)?;
                    if let Some(ref tag) = field.tag {
                        write!(f, " {}", tag)?;
                    }
                }
                f.write_str(" }")
            }
            ExprKind::Opaque(text) => f.write_str(text),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.names.is_empty() {
            let names: Vec<&str> = self.names.iter().map(|n| n.name.as_str()).collect();
            write!(f, "{} ", names.join(", "))?;
        }
        write!(f, "{}", self.ty)
    }
}

impl fmt::Display for FieldList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.list.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", field)?;
        }
        Ok(())
    }
}

impl fmt::Display for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.params)?;
        match &self.results {
            None => Ok(()),
            Some(results) if results.list.len() == 1 && results.list[0].names.is_empty() => {
                write!(f, " {}", results.list[0].ty)
            }
            Some(results) => write!(f, " ({})", results),
        }
    }
}
