//! HTML renderer — standalone HTML page with semantic markup.
//!
//! Without a template the renderer emits a complete page. A template is any
//! text with `${title}` and `${content}` placeholders; the generated body
//! replaces `${content}`.

use crate::error::Error;
use crate::model::{Decl, Documentation, Package};
use crate::render::{slug, Renderer};

pub struct HtmlRenderer {
    template: Option<String>,
}

impl HtmlRenderer {
    pub fn new(template: Option<String>) -> Self {
        Self { template }
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, doc: &Documentation) -> Result<String, Error> {
        let title = page_title(doc);
        let content = render_content(doc);
        let page = match self.template {
            Some(ref template) => template
                .replace("${title}", &html_escape(&title))
                .replace("${content}", &content),
            None => standalone_page(&title, &content),
        };
        Ok(page)
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn page_title(doc: &Documentation) -> String {
    let names: Vec<&str> = doc.packages.iter().map(|p| p.name.as_str()).collect();
    match names.as_slice() {
        [] => "Documentation".to_string(),
        names => format!("package {}", names.join(", ")),
    }
}

fn standalone_page(title: &str, content: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    out.push_str("<style>\n");
    out.push_str("body { font-family: system-ui, sans-serif; max-width: 48em; margin: 2em auto; padding: 0 1em; }\n");
    out.push_str("code { background: #f4f4f4; padding: 0.15em 0.3em; border-radius: 3px; }\n");
    out.push_str("pre { background: #f4f4f4; padding: 1em; border-radius: 5px; overflow-x: auto; }\n");
    out.push_str(".file { color: #666; font-size: 0.9em; }\n");
    out.push_str("</style>\n");
    out.push_str("</head>\n<body>\n");
    out.push_str(content);
    out.push_str("</body>\n</html>\n");
    out
}

fn render_content(doc: &Documentation) -> String {
    let mut out = String::new();
    for package in &doc.packages {
        out.push_str(&render_package_html(package));
    }
    out
}

fn render_package_html(package: &Package) -> String {
    let mut out = String::new();
    out.push_str(&format!("<h1>package {}</h1>\n", html_escape(&package.name)));

    // Package overview from file comments
    for file in &package.files {
        if let Some(ref doc) = file.doc {
            out.push_str(&paragraphs(doc));
        }
    }

    let decls: Vec<(&str, &Decl)> = package
        .files
        .iter()
        .flat_map(|f| f.decls.iter().map(move |d| (f.name.as_str(), d)))
        .filter(|(_, d)| !matches!(d, Decl::VarGroup(g) if g.names().is_empty()))
        .collect();
    if decls.is_empty() {
        return out;
    }

    // Index
    let prefix = slug(&package.name);
    out.push_str("<h2>Index</h2>\n<ul>\n");
    for (_, decl) in &decls {
        let title = decl.title();
        out.push_str(&format!(
            "  <li><a href=\"#{}-{}\">{}</a></li>\n",
            prefix,
            slug(&title),
            html_escape(&title)
        ));
    }
    out.push_str("</ul>\n");

    for (file, decl) in &decls {
        let title = decl.title();
        out.push_str(&format!(
            "<h3 id=\"{}-{}\">{}</h3>\n",
            prefix,
            slug(&title),
            html_escape(&title)
        ));
        out.push_str(&format!("<p class=\"file\">{}</p>\n", html_escape(file)));
        out.push_str(&format!(
            "<pre><code class=\"language-go\">{}</code></pre>\n",
            html_escape(&decl.signature())
        ));
        if let Some(doc) = decl.doc() {
            out.push_str(&paragraphs(doc));
        }
    }
    out
}

/// Blank-line separated doc text → `<p>` elements.
fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>\n", html_escape(p)))
        .collect()
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
