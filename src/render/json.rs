//! JSON renderer — structured output for tooling integration.
//!
//! Packages list their declarations flat, in file order, next to the file
//! list, so consumers need not walk files to find a declaration. Each file
//! entry carries its own declarations as well.

use crate::error::Error;
use crate::model::{Decl, Documentation, Package};
use crate::render::Renderer;
use serde::Serialize;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &Documentation) -> Result<String, Error> {
        let mut out = to_json(doc)?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[derive(Serialize)]
struct DocumentationView<'a> {
    packages: Vec<PackageView<'a>>,
}

#[derive(Serialize)]
struct PackageView<'a> {
    name: &'a str,
    decls: Vec<&'a Decl>,
    files: Vec<FileView<'a>>,
}

#[derive(Serialize)]
struct FileView<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    doc: Option<&'a str>,
    decls: &'a [Decl],
}

impl<'a> From<&'a Package> for PackageView<'a> {
    fn from(package: &'a Package) -> Self {
        Self {
            name: &package.name,
            decls: package.decls().collect(),
            files: package
                .files
                .iter()
                .map(|f| FileView {
                    name: &f.name,
                    doc: f.doc.as_deref(),
                    decls: &f.decls,
                })
                .collect(),
        }
    }
}

/// Pretty-printed JSON (two-space indent) of the whole model.
pub fn to_json(doc: &Documentation) -> Result<String, Error> {
    let view = DocumentationView {
        packages: doc.packages.iter().map(PackageView::from).collect(),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileDoc, FuncDecl, StructField, TypeDecl, TypeNode, VarGroup, VarItem};
    use serde_json::{json, Value};

    fn ident(name: &str) -> TypeNode {
        TypeNode::Ident(name.to_string())
    }

    fn demo() -> Documentation {
        Documentation {
            packages: vec![Package {
                name: "demo".to_string(),
                files: vec![FileDoc {
                    name: "demo.go".to_string(),
                    doc: None,
                    decls: vec![
                        Decl::Func(FuncDecl {
                            name: "Add".to_string(),
                            doc: Some("Add sums two ints.\n".to_string()),
                            recv: None,
                            params: vec![ident("int"), ident("int")],
                            results: vec![ident("int")],
                        }),
                        Decl::Type(TypeDecl {
                            name: "Point".to_string(),
                            doc: None,
                            ty: TypeNode::Struct {
                                fields: vec![StructField {
                                    names: vec!["X".to_string(), "Y".to_string()],
                                    ty: ident("int"),
                                    raw_tag: None,
                                }],
                            },
                        }),
                    ],
                }],
            }],
        }
    }

    fn parse(doc: &Documentation) -> Value {
        serde_json::from_str(&JsonRenderer.render(doc).unwrap()).unwrap()
    }

    #[test]
    fn demo_shape() {
        let decls = json!([
            {"func": {
                "name": "Add",
                "doc": "Add sums two ints.\n",
                "params": [{"ident": "int"}, {"ident": "int"}],
                "results": [{"ident": "int"}]
            }},
            {"type": {
                "name": "Point",
                "type": {"struct": {"fields": [
                    {"names": ["X", "Y"], "type": {"ident": "int"}}
                ]}}
            }}
        ]);
        assert_eq!(
            parse(&demo()),
            json!({
                "packages": [{
                    "name": "demo",
                    "decls": decls.clone(),
                    "files": [{"name": "demo.go", "decls": decls}]
                }]
            })
        );
    }

    #[test]
    fn file_entries_keep_their_own_decls() {
        let func = |name: &str| {
            Decl::Func(FuncDecl {
                name: name.to_string(),
                doc: None,
                recv: None,
                params: vec![],
                results: vec![],
            })
        };
        let doc = Documentation {
            packages: vec![Package {
                name: "util".to_string(),
                files: vec![
                    FileDoc {
                        name: "a/util.go".to_string(),
                        doc: None,
                        decls: vec![func("A")],
                    },
                    FileDoc {
                        name: "z/util.go".to_string(),
                        doc: None,
                        decls: vec![func("Z1"), func("Z2")],
                    },
                ],
            }],
        };
        let value = parse(&doc);
        let package = &value["packages"][0];
        assert_eq!(package["decls"].as_array().unwrap().len(), 3);
        assert_eq!(package["files"][0]["decls"], json!([{"func": {"name": "A", "params": [], "results": []}}]));
        let names: Vec<&str> = package["files"][1]["decls"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["func"]["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Z1", "Z2"]);
    }

    #[test]
    fn nested_nodes_and_optional_fields() {
        let doc = Documentation {
            packages: vec![Package {
                name: "p".to_string(),
                files: vec![FileDoc {
                    name: "p.go".to_string(),
                    doc: Some("Package p.\n".to_string()),
                    decls: vec![
                        Decl::Func(FuncDecl {
                            name: "Get".to_string(),
                            doc: None,
                            recv: Some(TypeNode::Pointer(Box::new(ident("Client")))),
                            params: vec![TypeNode::Map {
                                key: Box::new(ident("string")),
                                value: Box::new(TypeNode::Array(Box::new(ident("byte")))),
                            }],
                            results: vec![],
                        }),
                        Decl::VarGroup(VarGroup {
                            doc: None,
                            items: vec![VarItem {
                                doc: None,
                                names: vec!["Default".to_string()],
                                ty: Some(TypeNode::Selector {
                                    base: Box::new(ident("http")),
                                    member: "Client".to_string(),
                                }),
                            }],
                        }),
                    ],
                }],
            }],
        };
        let value = parse(&doc);
        let package = &value["packages"][0];
        assert_eq!(package["files"][0]["doc"], "Package p.\n");
        assert_eq!(package["decls"][0]["func"]["recv"], json!({"pointer": {"ident": "Client"}}));
        assert_eq!(
            package["decls"][0]["func"]["params"][0],
            json!({"map": {"key": {"ident": "string"}, "value": {"array": {"ident": "byte"}}}})
        );
        assert_eq!(
            package["decls"][1]["var_group"]["items"][0],
            json!({"names": ["Default"], "type": {"selector": {"base": {"ident": "http"}, "member": "Client"}}})
        );
        assert!(package["decls"][0]["func"].get("doc").is_none());
    }

    #[test]
    fn empty_model() {
        let out = JsonRenderer.render(&Documentation::default()).unwrap();
        assert_eq!(out, "{\n  \"packages\": []\n}\n");
    }
}
