//! Renderer module — trait-based format dispatch.

pub mod html;
pub mod json;
pub mod text;

use crate::error::Error;
use crate::model::Documentation;

/// Trait for rendering the documentation model into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &Documentation) -> Result<String, Error>;
    fn file_extension(&self) -> &str;
}

/// Format-independent rendering settings.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// HTML page template with `${title}` and `${content}` placeholders.
    pub template: Option<String>,
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, options: &RenderOptions) -> Result<Box<dyn Renderer>, Error> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer)),
        "text" | "markdown" | "md" => Ok(Box::new(text::TextRenderer)),
        "html" => Ok(Box::new(html::HtmlRenderer::new(options.template.clone()))),
        _ => Err(Error::UnknownFormat(format.to_string())),
    }
}

/// Heading anchor slug, GitHub style: lowercase, keep alphanumerics,
/// spaces and hyphens, then spaces become hyphens.
pub(crate) fn slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}
