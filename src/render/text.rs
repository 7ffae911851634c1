//! Plain text renderer in markdown form.
//!
//! One heading per package, then per file an index of declaration titles
//! followed by each declaration's flattened signature and doc text.

use crate::error::Error;
use crate::model::{Decl, Documentation, FileDoc, Package};
use crate::render::{slug, Renderer};

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, doc: &Documentation) -> Result<String, Error> {
        let mut out = String::new();
        for package in &doc.packages {
            render_package(&mut out, package);
        }
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// Var groups whose names were all filtered out have nothing to show.
fn visible(decl: &Decl) -> bool {
    match decl {
        Decl::VarGroup(group) => !group.names().is_empty(),
        _ => true,
    }
}

fn render_package(out: &mut String, package: &Package) {
    out.push_str(&format!("# package {}\n\n", package.name));
    for file in &package.files {
        render_file(out, file);
    }
}

fn render_file(out: &mut String, file: &FileDoc) {
    out.push_str(&format!("## {}\n\n", file.name));
    if let Some(ref doc) = file.doc {
        out.push_str(doc);
        out.push('\n');
    }

    let decls: Vec<&Decl> = file.decls.iter().filter(|d| visible(d)).collect();
    if decls.is_empty() {
        return;
    }

    out.push_str("### Index\n\n");
    for decl in &decls {
        let title = decl.title();
        out.push_str(&format!("* [{}](#{})\n", title, slug(&title)));
    }
    out.push('\n');

    for decl in &decls {
        out.push_str(&format!("### {}\n\n", decl.title()));
        out.push_str("```go\n");
        out.push_str(&decl.signature());
        out.push_str("\n```\n\n");
        if let Some(doc) = decl.doc() {
            out.push_str(doc);
            out.push('\n');
        }
    }
}
