//! Data model for extracted documentation — format-agnostic.
//!
//! Built once from parsed sources and read-only afterwards. The union types
//! are enums, so a `Decl` or `TypeNode` always holds exactly one case.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Every package found under a root, ordered by package key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
    pub packages: Vec<Package>,
}

impl Documentation {
    /// Type name → name of the file that defines it. The first definition
    /// wins when the same name appears in several packages.
    pub fn type_index(&self) -> BTreeMap<String, String> {
        let mut index = BTreeMap::new();
        for package in &self.packages {
            for file in &package.files {
                for decl in &file.decls {
                    if let Decl::Type(t) = decl {
                        index
                            .entry(t.name.clone())
                            .or_insert_with(|| file.name.clone());
                    }
                }
            }
        }
        index
    }

    /// First package declaring `name`, in package-key order.
    ///
    /// Without directory merging several packages can share a name; use
    /// [`packages_named`](Self::packages_named) to see all of them.
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages_named(name).next()
    }

    pub fn packages_named<'a: 'b, 'b>(&'a self, name: &'b str) -> impl Iterator<Item = &'a Package> + 'b {
        self.packages.iter().filter(move |p| p.name == name)
    }
}

/// A Go package: every file that declares the same package name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    /// Sorted by path relative to the load root.
    pub files: Vec<FileDoc>,
}

impl Package {
    /// All declarations, file by file, in source order.
    pub fn decls(&self) -> impl Iterator<Item = &Decl> {
        self.files.iter().flat_map(|f| f.decls.iter())
    }

    pub fn functions(&self) -> Vec<&FuncDecl> {
        self.decls()
            .filter_map(|d| match d {
                Decl::Func(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    pub fn type_decls(&self) -> Vec<&TypeDecl> {
        self.decls()
            .filter_map(|d| match d {
                Decl::Type(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn var_groups(&self) -> Vec<&VarGroup> {
        self.decls()
            .filter_map(|d| match d {
                Decl::VarGroup(v) => Some(v),
                _ => None,
            })
            .collect()
    }
}

/// One source file of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDoc {
    /// Path relative to the load root, `/`-separated.
    pub name: String,
    /// Comment above the `package` clause.
    pub doc: Option<String>,
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decl {
    Func(FuncDecl),
    VarGroup(VarGroup),
    Type(TypeDecl),
}

impl Decl {
    /// Short label used in indexes: `func Add`, `type Point`, `var A, B`.
    pub fn title(&self) -> String {
        match self {
            Decl::Func(f) => match f.recv {
                Some(ref recv) => format!("func ({}) {}", recv, f.name),
                None => format!("func {}", f.name),
            },
            Decl::Type(t) => format!("type {}", t.name),
            Decl::VarGroup(v) => format!("var {}", v.names().join(", ")),
        }
    }

    pub fn doc(&self) -> Option<&str> {
        match self {
            Decl::Func(f) => f.doc.as_deref(),
            Decl::Type(t) => t.doc.as_deref(),
            Decl::VarGroup(v) => v.doc.as_deref(),
        }
    }

    /// Go-like declaration text built from the rendered types.
    pub fn signature(&self) -> String {
        match self {
            Decl::Func(f) => f.signature(),
            Decl::Type(t) => format!("type {} {}", t.name, t.ty),
            Decl::VarGroup(v) => v.signature(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuncDecl {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv: Option<TypeNode>,
    pub params: Vec<TypeNode>,
    pub results: Vec<TypeNode>,
}

impl FuncDecl {
    pub fn is_method(&self) -> bool {
        self.recv.is_some()
    }

    pub fn signature(&self) -> String {
        let mut out = String::from("func ");
        if let Some(ref recv) = self.recv {
            out.push_str(&format!("({}) ", recv));
        }
        out.push_str(&self.name);
        out.push_str(&format_signature(&self.params, &self.results));
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    pub items: Vec<VarItem>,
}

impl VarGroup {
    /// Every declared name of the group, in order.
    pub fn names(&self) -> Vec<&str> {
        self.items
            .iter()
            .flat_map(|i| i.names.iter().map(String::as_str))
            .collect()
    }

    pub fn signature(&self) -> String {
        let lines: Vec<String> = self
            .items
            .iter()
            .filter(|i| !i.names.is_empty())
            .map(|i| match i.ty {
                Some(ref ty) => format!("{} {}", i.names.join(", "), ty),
                None => i.names.join(", "),
            })
            .collect();
        match lines.as_slice() {
            [single] => format!("var {}", single),
            _ => {
                let mut out = String::from("var (\n");
                for line in &lines {
                    out.push('\t');
                    out.push_str(line);
                    out.push('\n');
                }
                out.push(')');
                out
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    pub names: Vec<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDecl {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeNode,
}

// -- Type nodes ---------------------------------------------------------------

/// A type expression as written, normalized into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeNode {
    Ident(String),
    Array(Box<TypeNode>),
    Pointer(Box<TypeNode>),
    Selector {
        base: Box<TypeNode>,
        member: String,
    },
    Func {
        params: Vec<TypeNode>,
        results: Vec<TypeNode>,
    },
    Map {
        key: Box<TypeNode>,
        value: Box<TypeNode>,
    },
    Struct {
        fields: Vec<StructField>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructField {
    /// Empty for embedded fields.
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    /// Tag literal exactly as written, quotes or backticks included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_tag: Option<String>,
}

fn join_types(types: &[TypeNode]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `(int, string) (bool, error)` — the part of a signature after the name.
fn format_signature(params: &[TypeNode], results: &[TypeNode]) -> String {
    let params = format!("({})", join_types(params));
    match results {
        [] => params,
        [single] => format!("{} {}", params, single),
        many => format!("{} ({})", params, join_types(many)),
    }
}

/// Flattened single-line text: `*pkg.T`, `[]*int`, `map[string][]int`.
impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Ident(name) => f.write_str(name),
            TypeNode::Array(elem) => write!(f, "[]{}", elem),
            TypeNode::Pointer(elem) => write!(f, "*{}", elem),
            TypeNode::Selector { base, member } => write!(f, "{}.{}", base, member),
            TypeNode::Func { params, results } => {
                write!(f, "func{}", format_signature(params, results))
            }
            TypeNode::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeNode::Struct { fields } if fields.is_empty() => f.write_str("struct{}"),
            TypeNode::Struct { fields } => {
                let fields: Vec<String> = fields.iter().map(ToString::to_string).collect();
                write!(f, "struct{{ {} }}", fields.join("; "))
            }
        }
    }
}

impl fmt::Display for StructField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.names.is_empty() {
            write!(f, "{} ", self.names.join(", "))?;
        }
        write!(f, "{}", self.ty)?;
        if let Some(ref tag) = self.raw_tag {
            write!(f, " {}", tag)?;
        }
        Ok(())
    }
}
