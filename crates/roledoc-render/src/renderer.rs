//! Document renderer.

use crate::context::DocumentContext;
use crate::template_engine::TemplateEngine;
use roledoc_core::Result;
use roledoc_core::cli::DocFormat;
use roledoc_introspector::{MetadataRecord, RoleInspection, RoleManifest, TaskCatalog};
use std::fmt;
use tracing::debug;

/// A finished role document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    format: DocFormat,
    content: String,
}

impl RenderedDocument {
    /// Format the document was rendered in.
    #[must_use]
    pub const fn format(&self) -> DocFormat {
        self.format
    }

    /// Document text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Consumes the document, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.content
    }
}

impl fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

/// Renders role documents in Markdown or plain text.
///
/// Rendering is a pure function of its inputs: the same role yields a
/// byte-identical document on every run.
///
/// # Examples
///
/// ```no_run
/// use roledoc_core::cli::DocFormat;
/// use roledoc_introspector::inspect_role;
/// use roledoc_render::DocumentRenderer;
///
/// let role = inspect_role("roles/msxml")?;
/// let renderer = DocumentRenderer::new()?;
/// let document = renderer.render(&role.manifest, &role.metadata, &role.tasks, DocFormat::Markdown)?;
/// print!("{document}");
/// # Ok::<(), roledoc_core::Error>(())
/// ```
#[derive(Debug)]
pub struct DocumentRenderer<'a> {
    engine: TemplateEngine<'a>,
}

impl DocumentRenderer<'_> {
    /// Creates a renderer with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
        })
    }

    /// Renders a role document.
    ///
    /// # Errors
    ///
    /// Returns [`roledoc_core::Error::Template`] if rendering fails.
    pub fn render(
        &self,
        manifest: &RoleManifest,
        metadata: &MetadataRecord,
        tasks: &TaskCatalog,
        format: DocFormat,
    ) -> Result<RenderedDocument> {
        let context = DocumentContext::build(manifest, metadata, tasks);
        let content = self.engine.render(format.as_str(), &context)?;

        debug!(
            role = %manifest.name(),
            format = %format,
            bytes = content.len(),
            "rendered document"
        );

        Ok(RenderedDocument { format, content })
    }

    /// Renders a role document from a format name such as `markdown` or `txt`.
    ///
    /// # Errors
    ///
    /// Returns [`roledoc_core::Error::UnsupportedFormat`] if `format` is not a
    /// known format. Nothing is rendered in that case.
    pub fn render_str(
        &self,
        manifest: &RoleManifest,
        metadata: &MetadataRecord,
        tasks: &TaskCatalog,
        format: &str,
    ) -> Result<RenderedDocument> {
        let format: DocFormat = format.parse()?;
        self.render(manifest, metadata, tasks, format)
    }

    /// Renders a document from a complete [`RoleInspection`].
    ///
    /// # Errors
    ///
    /// Returns [`roledoc_core::Error::Template`] if rendering fails.
    pub fn render_inspection(
        &self,
        inspection: &RoleInspection,
        format: DocFormat,
    ) -> Result<RenderedDocument> {
        self.render(
            &inspection.manifest,
            &inspection.metadata,
            &inspection.tasks,
            format,
        )
    }
}
