//! Go declarations from a `tree-sitter-go` syntax tree.
//!
//! The grammar does the parsing; this module lowers the concrete tree into
//! [`ast`](super::ast) nodes. Doc comments are the `comment` siblings
//! directly above a declaration, with no blank line in between.

use super::ast::*;
use super::SyntaxError;
use tree_sitter::{Node, Parser, Point, Tree};

type PResult<T> = Result<T, SyntaxError>;

/// Wraps a standalone type expression into a parseable file.
const EXPR_PREFIX: &str = "package p\nvar _ ";

/// Parse a complete Go source file.
pub fn parse_file(src: &str) -> Result<File, SyntaxError> {
    let src = src.strip_prefix('\u{feff}').unwrap_or(src);
    let tree = parse_tree(src)?;
    Lowering::new(src, Point::new(0, 0)).file(tree.root_node())
}

/// Parse a standalone type expression such as `map[string][]*pkg.T`.
///
/// Positions are relative to `src`.
pub fn parse_expr(src: &str) -> Result<Expr, SyntaxError> {
    let wrapped = format!("{EXPR_PREFIX}{src}\n");
    let tree = parse_tree(&wrapped)?;
    let lower = Lowering::new(&wrapped, Point::new(1, "var _ ".len()));

    let root = tree.root_node();
    lower.check(root)?;
    let top = named_children(root);
    let spec = top
        .iter()
        .find(|n| n.kind() == "var_declaration")
        .and_then(|decl| spec_nodes(*decl).into_iter().next());
    let ty = spec
        .filter(|s| s.child_by_field_name("value").is_none())
        .and_then(|s| s.child_by_field_name("type"));
    match ty {
        Some(ty) if top.len() == 2 => lower.expr(ty),
        _ => Err(SyntaxError::new(
            Pos { line: 1, column: 1 },
            "expected a single type expression",
        )),
    }
}

fn parse_tree(src: &str) -> PResult<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::language())
        .map_err(|err| SyntaxError::new(Pos::default(), format!("cannot load the Go grammar: {err}")))?;
    parser
        .parse(src, None)
        .ok_or_else(|| SyntaxError::new(Pos::default(), "parser returned no tree"))
}

// -- Tree helpers -------------------------------------------------------------

/// Named children without comments.
fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Previous sibling, skipping newline terminators.
fn prev_token(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = node.prev_sibling();
    while let Some(n) = current {
        if n.is_named() || !n.kind().trim().is_empty() {
            return Some(n);
        }
        current = n.prev_sibling();
    }
    None
}

/// `var_spec`, `const_spec`, `type_spec` and `type_alias` nodes of a
/// declaration, looking through spec lists.
fn spec_nodes(node: Node<'_>) -> Vec<Node<'_>> {
    let mut specs = Vec::new();
    for child in named_children(node) {
        match child.kind() {
            "var_spec" | "const_spec" | "type_spec" | "type_alias" => specs.push(child),
            kind if kind.ends_with("_list") => specs.extend(spec_nodes(child)),
            _ => {}
        }
    }
    specs
}

/// First error or missing node in document order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    children(node)
        .into_iter()
        .filter(|c| c.has_error() || c.is_missing())
        .find_map(first_error)
}

/// Collapse whitespace runs to single spaces.
fn squash(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// -- Lowering -----------------------------------------------------------------

struct Lowering<'s> {
    src: &'s str,
    /// Where line 1, column 1 of the caller's text sits in `src`.
    origin: Point,
}

impl<'s> Lowering<'s> {
    fn new(src: &'s str, origin: Point) -> Self {
        Self { src, origin }
    }

    fn pos(&self, point: Point) -> Pos {
        if point.row == self.origin.row {
            Pos {
                line: 1,
                column: point.column.saturating_sub(self.origin.column) + 1,
            }
        } else {
            Pos {
                line: point.row.saturating_sub(self.origin.row) + 1,
                column: point.column + 1,
            }
        }
    }

    fn start(&self, node: Node<'_>) -> Pos {
        self.pos(node.start_position())
    }

    fn text(&self, node: Node<'_>) -> &'s str {
        node.utf8_text(self.src.as_bytes()).unwrap_or_default()
    }

    fn ident(&self, node: Node<'_>) -> Ident {
        Ident {
            name: self.text(node).to_string(),
            pos: self.start(node),
        }
    }

    fn idents(&self, node: Node<'_>, field: &str) -> Vec<Ident> {
        let mut cursor = node.walk();
        node.children_by_field_name(field, &mut cursor)
            .map(|n| self.ident(n))
            .collect()
    }

    fn field<'t>(&self, node: Node<'t>, name: &str) -> PResult<Node<'t>> {
        node.child_by_field_name(name).ok_or_else(|| {
            SyntaxError::new(self.start(node), format!("missing {} in {}", name, node.kind()))
        })
    }

    /// Report the first error node of a tree that failed to parse cleanly.
    fn check(&self, root: Node<'_>) -> PResult<()> {
        if !root.has_error() {
            return Ok(());
        }
        let node = first_error(root).unwrap_or(root);
        let message = if node.is_missing() {
            format!("syntax error: missing `{}`", node.kind())
        } else {
            match self.text(node).lines().map(str::trim).find(|l| !l.is_empty()) {
                Some(line) => format!("syntax error near `{}`", line),
                None => "syntax error".to_string(),
            }
        };
        Err(SyntaxError::new(self.start(node), message))
    }

    fn file(&self, root: Node<'_>) -> PResult<File> {
        self.check(root)?;
        let top = named_children(root);
        let clause = top
            .iter()
            .copied()
            .find(|n| n.kind() == "package_clause")
            .ok_or_else(|| SyntaxError::new(Pos { line: 1, column: 1 }, "expected package clause"))?;
        let name = named_children(clause)
            .into_iter()
            .next()
            .ok_or_else(|| SyntaxError::new(self.start(clause), "expected package name"))?;

        let mut decls = Vec::new();
        for node in top {
            let decl = match node.kind() {
                "function_declaration" | "method_declaration" => Decl::Func(self.func_decl(node)?),
                "const_declaration" => Decl::Gen(self.gen_decl(node, GenKind::Const)?),
                "var_declaration" => Decl::Gen(self.gen_decl(node, GenKind::Var)?),
                "type_declaration" => Decl::Gen(self.gen_decl(node, GenKind::Type)?),
                _ => continue,
            };
            decls.push(decl);
        }

        Ok(File {
            doc: self.lead_comment(clause),
            package: self.ident(name),
            decls,
        })
    }

    /// Comments ending on the line above `node`, back to the first blank
    /// line. A comment sharing its line with earlier code ends the group.
    fn lead_comment(&self, node: Node<'_>) -> Option<CommentGroup> {
        let mut list = Vec::new();
        let mut next_row = node.start_position().row;
        let mut current = prev_token(node);

        while let Some(comment) = current {
            if comment.kind() != "comment" {
                break;
            }
            let end = comment.end_position().row;
            let adjacent = if list.is_empty() {
                end + 1 == next_row
            } else {
                end + 1 >= next_row
            };
            if !adjacent {
                break;
            }
            let start = comment.start_position().row;
            let before = prev_token(comment);
            if before.is_some_and(|b| b.kind() != "comment" && b.end_position().row == start) {
                break;
            }
            list.push(Comment {
                text: self.text(comment).trim_end().to_string(),
                pos: self.start(comment),
            });
            next_row = start;
            current = before;
        }

        if list.is_empty() {
            return None;
        }
        list.reverse();
        Some(CommentGroup { list })
    }

    fn func_decl(&self, node: Node<'_>) -> PResult<FuncDecl> {
        let recv = node
            .child_by_field_name("receiver")
            .map(|r| self.field_list(r))
            .transpose()?;
        Ok(FuncDecl {
            doc: self.lead_comment(node),
            recv,
            name: self.ident(self.field(node, "name")?),
            type_params: node
                .child_by_field_name("type_parameters")
                .map(|n| self.type_params(n)),
            signature: self.signature(node)?,
        })
    }

    /// `parameters` and `result` of a function, method or function type.
    fn signature(&self, node: Node<'_>) -> PResult<FuncType> {
        let params = self.field_list(self.field(node, "parameters")?)?;
        let results = match node.child_by_field_name("result") {
            None => None,
            Some(result) if result.kind() == "parameter_list" => Some(self.field_list(result)?),
            Some(result) => Some(FieldList {
                pos: self.start(result),
                list: vec![Field {
                    names: Vec::new(),
                    ty: self.expr(result)?,
                    tag: None,
                }],
            }),
        };
        Ok(FuncType { params, results })
    }

    fn field_list(&self, list: Node<'_>) -> PResult<FieldList> {
        let mut fields = Vec::new();
        for param in named_children(list) {
            let ty = match param.kind() {
                "parameter_declaration" => self.expr(self.field(param, "type")?)?,
                "variadic_parameter_declaration" => {
                    let elem = self.field(param, "type")?;
                    let dots = children(param)
                        .into_iter()
                        .find(|c| c.kind() == "...")
                        .unwrap_or(param);
                    let text = format!("...{}", squash(self.text(elem)));
                    Expr::new(self.start(dots), ExprKind::Opaque(text))
                }
                _ => continue,
            };
            fields.push(Field {
                names: self.idents(param, "name"),
                ty,
                tag: None,
            });
        }
        Ok(FieldList {
            pos: self.start(list),
            list: fields,
        })
    }

    fn type_params(&self, node: Node<'_>) -> TypeParams {
        TypeParams {
            pos: self.start(node),
            text: squash(self.text(node)),
        }
    }

    fn gen_decl(&self, node: Node<'_>, kind: GenKind) -> PResult<GenDecl> {
        let specs = spec_nodes(node)
            .into_iter()
            .map(|spec| self.spec(spec))
            .collect::<PResult<Vec<_>>>()?;
        Ok(GenDecl {
            doc: self.lead_comment(node),
            kind,
            pos: self.start(node),
            specs,
        })
    }

    fn spec(&self, node: Node<'_>) -> PResult<Spec> {
        if matches!(node.kind(), "type_spec" | "type_alias") {
            return self.type_spec(node).map(Spec::Type);
        }
        Ok(Spec::Value(ValueSpec {
            doc: self.lead_comment(node),
            names: self.idents(node, "name"),
            ty: node
                .child_by_field_name("type")
                .map(|t| self.expr(t))
                .transpose()?,
        }))
    }

    fn type_spec(&self, node: Node<'_>) -> PResult<TypeSpec> {
        let ty_node = self.field(node, "type")?;
        let params = node.child_by_field_name("type_parameters");

        let (type_params, ty) = match params.and_then(|p| self.array_length(p).map(|len| (p, len))) {
            Some((params, len)) => {
                let array = ExprKind::Array {
                    len: Some(len),
                    elem: Box::new(self.expr(ty_node)?),
                };
                (None, Expr::new(self.start(params), array))
            }
            None => (params.map(|p| self.type_params(p)), self.expr(ty_node)?),
        };

        Ok(TypeSpec {
            doc: self.lead_comment(node),
            name: self.ident(self.field(node, "name")?),
            type_params,
            alias: node.kind() == "type_alias",
            ty,
        })
    }

    /// `type A [N *M]int` reads as a one-parameter generic with a pointer
    /// constraint, but Go resolves it as an array of length `N * M`.
    fn array_length(&self, params: Node<'_>) -> Option<String> {
        let list = named_children(params);
        let [param] = list.as_slice() else {
            return None;
        };
        if self.idents(*param, "name").len() != 1 {
            return None;
        }
        let mut constraint = param.child_by_field_name("type")?;
        if constraint.kind() == "type_constraint" {
            let inner = named_children(constraint);
            let [only] = inner.as_slice() else {
                return None;
            };
            constraint = *only;
        }
        if constraint.kind() != "pointer_type" {
            return None;
        }
        let text = self.text(params);
        let inner = text.strip_prefix('[')?.strip_suffix(']')?;
        Some(squash(inner))
    }

    fn expr(&self, node: Node<'_>) -> PResult<Expr> {
        let kind = match node.kind() {
            "type_identifier" | "identifier" => ExprKind::Ident(self.text(node).to_string()),
            "qualified_type" => {
                let package = self.field(node, "package")?;
                ExprKind::Selector {
                    x: Box::new(Expr::new(
                        self.start(package),
                        ExprKind::Ident(self.text(package).to_string()),
                    )),
                    sel: self.ident(self.field(node, "name")?),
                }
            }
            "pointer_type" => {
                let base = named_children(node)
                    .into_iter()
                    .next()
                    .ok_or_else(|| SyntaxError::new(self.start(node), "missing pointer base type"))?;
                ExprKind::Star(Box::new(self.expr(base)?))
            }
            "slice_type" => ExprKind::Array {
                len: None,
                elem: Box::new(self.expr(self.field(node, "element")?)?),
            },
            "array_type" => ExprKind::Array {
                len: Some(squash(self.text(self.field(node, "length")?))),
                elem: Box::new(self.expr(self.field(node, "element")?)?),
            },
            "map_type" => ExprKind::Map {
                key: Box::new(self.expr(self.field(node, "key")?)?),
                value: Box::new(self.expr(self.field(node, "value")?)?),
            },
            "function_type" => ExprKind::Func(self.signature(node)?),
            "struct_type" => ExprKind::Struct(self.struct_fields(node)?),
            _ => ExprKind::Opaque(squash(self.text(node))),
        };
        Ok(Expr::new(self.start(node), kind))
    }

    fn struct_fields(&self, node: Node<'_>) -> PResult<FieldList> {
        let Some(list) = named_children(node)
            .into_iter()
            .find(|n| n.kind() == "field_declaration_list")
        else {
            return Ok(FieldList {
                pos: self.start(node),
                list: Vec::new(),
            });
        };

        let mut fields = Vec::new();
        for decl in named_children(list) {
            if decl.kind() != "field_declaration" {
                continue;
            }
            let names = self.idents(decl, "name");
            let mut ty = self.expr(self.field(decl, "type")?)?;
            if names.is_empty() {
                // embedded `*T`
                if let Some(star) = children(decl).into_iter().find(|c| c.kind() == "*") {
                    ty = Expr::new(self.start(star), ExprKind::Star(Box::new(ty)));
                }
            }
            fields.push(Field {
                names,
                ty,
                tag: decl
                    .child_by_field_name("tag")
                    .map(|t| self.text(t).to_string()),
            });
        }
        Ok(FieldList {
            pos: self.start(list),
            list: fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn func(file: &File, index: usize) -> &FuncDecl {
        match &file.decls[index] {
            Decl::Func(f) => f,
            other => panic!("expected func decl, got {:?}", other),
        }
    }

    fn gen(file: &File, index: usize) -> &GenDecl {
        match &file.decls[index] {
            Decl::Gen(g) => g,
            other => panic!("expected gen decl, got {:?}", other),
        }
    }

    fn type_spec(file: &File, index: usize) -> &TypeSpec {
        match &gen(file, index).specs[0] {
            Spec::Type(spec) => spec,
            other => panic!("expected type spec, got {:?}", other),
        }
    }

    fn type_text(src: &str) -> String {
        parse_expr(src).unwrap().to_string()
    }

    #[test]
    fn package_clause_and_file_doc() {
        let file = parse_file("// Package demo does things.\npackage demo\n").unwrap();
        assert_eq!(file.package.name, "demo");
        assert_eq!(file.package.pos, Pos { line: 2, column: 9 });
        assert_eq!(
            file.doc.as_ref().map(|d| d.text()).as_deref(),
            Some("Package demo does things.\n")
        );
        assert!(file.decls.is_empty());
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let file = parse_file("\u{feff}package demo\n").unwrap();
        assert_eq!(file.package.name, "demo");
    }

    #[test]
    fn detached_comment_is_not_file_doc() {
        let file = parse_file("// Copyright notice.\n\npackage demo\n").unwrap();
        assert!(file.doc.is_none());
    }

    #[test]
    fn function_with_doc_and_body() {
        let src = "package demo\n\n// Add sums two ints.\nfunc Add(a, b int) int { return a+b }\n";
        let file = parse_file(src).unwrap();
        let f = func(&file, 0);
        assert_eq!(f.name.name, "Add");
        assert_eq!(f.doc.as_ref().unwrap().text(), "Add sums two ints.\n");
        assert_eq!(f.signature.params.list.len(), 1);
        let names: Vec<&str> = f.signature.params.list[0]
            .names
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(f.signature.to_string(), "(a, b int) int");
    }

    #[test]
    fn multi_line_doc_group() {
        let src = "package demo\n\n// Sum adds.\n//\n// It never fails.\nfunc Sum() {}\n";
        let file = parse_file(src).unwrap();
        let doc = func(&file, 0).doc.as_ref().unwrap();
        assert_eq!(doc.list.len(), 3);
        assert_eq!(doc.list[0].pos, Pos { line: 3, column: 1 });
        assert_eq!(doc.text(), "Sum adds.\n\nIt never fails.\n");
    }

    #[test]
    fn method_receiver() {
        let src = "package demo\nfunc (p *Point) Move(dx, dy int) (x, y int, err error) {\n\treturn\n}\n";
        let file = parse_file(src).unwrap();
        let f = func(&file, 0);
        let recv = f.recv.as_ref().unwrap();
        assert_eq!(recv.list[0].ty.to_string(), "*Point");
        assert_eq!(
            f.signature.results.as_ref().unwrap().to_string(),
            "x, y int, err error"
        );
    }

    #[test]
    fn unnamed_parameters() {
        let file = parse_file("package demo\nfunc F(int, *pkg.T, []string) error\n").unwrap();
        let f = func(&file, 0);
        let types: Vec<String> = f
            .signature
            .params
            .list
            .iter()
            .map(|p| p.ty.to_string())
            .collect();
        assert_eq!(types, vec!["int", "*pkg.T", "[]string"]);
        assert_eq!(f.signature.results.as_ref().unwrap().to_string(), "error");
    }

    #[test]
    fn named_array_parameter() {
        let file = parse_file("package demo\nfunc F(buf [4]byte, rest []int) {}\n").unwrap();
        let f = func(&file, 0);
        assert_eq!(f.signature.params.to_string(), "buf [4]byte, rest []int");
    }

    #[test]
    fn variadic_parameter() {
        let file = parse_file("package demo\nfunc Printf(format string, args ...any) {}\n").unwrap();
        let args = &func(&file, 0).signature.params.list[1];
        assert_eq!(args.names[0].name, "args");
        assert_eq!(args.ty.to_string(), "...any");
        assert_eq!(args.ty.pos, Pos { line: 2, column: 33 });
    }

    #[test]
    fn grouped_var_with_spec_docs() {
        let src = "package demo

// Settings for the demo.
var (
\t// Exported is visible.
\tExported, unexported = 1, 2
\tLimit int
)
";
        let file = parse_file(src).unwrap();
        let g = gen(&file, 0);
        assert_eq!(g.kind, GenKind::Var);
        assert_eq!(g.doc.as_ref().unwrap().text(), "Settings for the demo.\n");
        assert_eq!(g.specs.len(), 2);
        let Spec::Value(first) = &g.specs[0] else {
            panic!("expected value spec");
        };
        assert_eq!(first.doc.as_ref().unwrap().text(), "Exported is visible.\n");
        assert_eq!(first.names.len(), 2);
        assert!(first.ty.is_none());
        let Spec::Value(second) = &g.specs[1] else {
            panic!("expected value spec");
        };
        assert!(second.doc.is_none());
        assert_eq!(second.ty.as_ref().unwrap().to_string(), "int");
    }

    #[test]
    fn ungrouped_spec_has_no_doc_of_its_own() {
        let file = parse_file("package demo\n// Limit caps things.\nvar Limit int\n").unwrap();
        let g = gen(&file, 0);
        assert!(g.doc.is_some());
        let Spec::Value(spec) = &g.specs[0] else {
            panic!("expected value spec");
        };
        assert!(spec.doc.is_none());
    }

    #[test]
    fn initializers_and_imports_are_skipped() {
        let src = "package demo
import (
\t\"fmt\"
\tstr \"strings\"
)
var handler = func(x int) int {
\tif x > 0 {
\t\treturn x
\t}
\treturn -x
}
const (
\tA = iota
\tB
)
func After() {}
";
        let file = parse_file(src).unwrap();
        assert_eq!(file.decls.len(), 3);
        assert_eq!(gen(&file, 1).kind, GenKind::Const);
        assert_eq!(gen(&file, 1).specs.len(), 2);
        assert_eq!(func(&file, 2).name.name, "After");
    }

    #[test]
    fn struct_fields_and_tags() {
        let src = "package demo
type Point struct {
\tX, Y int `json:\"x\"`
\tio.Reader
\t*Base
\tName string \"plain\"
}
";
        let file = parse_file(src).unwrap();
        let ExprKind::Struct(fields) = &type_spec(&file, 0).ty.kind else {
            panic!("expected struct");
        };
        assert_eq!(fields.list.len(), 4);
        assert_eq!(fields.list[0].names.len(), 2);
        assert_eq!(fields.list[0].tag.as_deref(), Some("`json:\"x\"`"));
        assert!(fields.list[1].names.is_empty());
        assert_eq!(fields.list[1].ty.to_string(), "io.Reader");
        assert_eq!(fields.list[2].ty.to_string(), "*Base");
        assert_eq!(fields.list[3].tag.as_deref(), Some("\"plain\""));
    }

    #[test]
    fn grouped_type_declaration() {
        let src = "package demo
type (
\t// A is first.
\tA int
\tB = string
)
";
        let file = parse_file(src).unwrap();
        let g = gen(&file, 0);
        assert_eq!(g.specs.len(), 2);
        let Spec::Type(a) = &g.specs[0] else {
            panic!("expected type spec");
        };
        assert_eq!(a.doc.as_ref().unwrap().text(), "A is first.\n");
        let Spec::Type(b) = &g.specs[1] else {
            panic!("expected type spec");
        };
        assert!(b.alias);
        assert!(b.doc.is_none());
    }

    #[test]
    fn generic_declarations() {
        let src = "package demo
type Stack[T any] struct { items []T }
type Grid [4][4]int
func Map[T, U any](xs []T, f func(T) U) []U { return nil }
";
        let file = parse_file(src).unwrap();
        assert_eq!(type_spec(&file, 0).type_params.as_ref().unwrap().text, "[T any]");
        let grid = type_spec(&file, 1);
        assert!(grid.type_params.is_none());
        assert_eq!(grid.ty.to_string(), "[4][4]int");
        assert_eq!(func(&file, 2).type_params.as_ref().unwrap().text, "[T, U any]");
    }

    #[test]
    fn array_length_product_is_not_a_type_parameter() {
        let file = parse_file("package p\nconst N, M = 2, 3\ntype A [N * M]int\n").unwrap();
        let spec = type_spec(&file, 1);
        assert!(spec.type_params.is_none());
        assert!(matches!(&spec.ty.kind, ExprKind::Array { len: Some(_), .. }));
        assert_eq!(spec.ty.to_string(), "[N * M]int");
    }

    #[test]
    fn type_expression_shapes() {
        assert_eq!(type_text("*pkg.T"), "*pkg.T");
        assert_eq!(type_text("[]*int"), "[]*int");
        assert_eq!(type_text("map[string][]int"), "map[string][]int");
        assert_eq!(type_text("func(int, string) (bool, error)"), "func(int, string) (bool, error)");
        assert_eq!(type_text("<-chan int"), "<-chan int");
        assert_eq!(type_text("chan<- int"), "chan<- int");
        assert_eq!(type_text("interface {\n\tRead() error\n}"), "interface { Read() error }");
        assert_eq!(type_text("struct{}"), "struct{}");
    }

    #[test]
    fn expression_positions_are_relative() {
        let expr = parse_expr("map[string]int").unwrap();
        assert_eq!(expr.pos, Pos { line: 1, column: 1 });
        let ExprKind::Map { value, .. } = &expr.kind else {
            panic!("expected map");
        };
        assert_eq!(value.pos, Pos { line: 1, column: 12 });
    }

    #[test]
    fn trailing_comment_is_not_a_doc() {
        let src = "package demo
var x = 1 // trailing
func F() {}
";
        let file = parse_file(src).unwrap();
        assert!(func(&file, 1).doc.is_none());
    }

    #[test]
    fn comment_below_trailing_comment_is_a_doc() {
        let src = "package demo
var x = 1 // trailing
// F does nothing.
func F() {}
";
        let file = parse_file(src).unwrap();
        assert_eq!(func(&file, 1).doc.as_ref().unwrap().text(), "F does nothing.\n");
    }

    #[test]
    fn blank_line_detaches_doc() {
        let src = "package demo
// Not attached.

func F() {}
";
        let file = parse_file(src).unwrap();
        assert!(func(&file, 0).doc.is_none());
    }

    #[test]
    fn syntax_errors_carry_positions() {
        let err = parse_file("package demo\nfunc F() {\n").unwrap_err();
        assert!(err.message.starts_with("syntax error"), "{err}");
        assert!(err.pos.line >= 2, "{err}");

        let err = parse_file("package demo\nfunc (\n").unwrap_err();
        assert!(err.message.starts_with("syntax error"), "{err}");
    }

    #[test]
    fn package_clause_is_required() {
        let err = parse_file("func F() {}\n").unwrap_err();
        assert_eq!(err.message, "expected package clause");
    }

    #[test]
    fn expression_with_trailing_input_is_rejected() {
        assert!(parse_expr("int = 3").is_err());
        assert!(parse_expr("int\nfunc F() {}").is_err());
    }
}
