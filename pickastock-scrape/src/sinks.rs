//! Output sinks: the intermediate HTML file and the fixed-layout PDF export.
//!
//! The two are independent so either can be swapped or tested alone.

use async_trait::async_trait;
use pickastock_common::Result;
use pickastock_drivers::{BrowserSession, PageLayout};
use std::path::{Path, PathBuf};
use tracing::info;

/// Persists the rendered HTML document.
pub trait DocumentSink: Send + Sync {
    fn write_document(&self, html: &str) -> Result<PathBuf>;
}

/// Renders an HTML document to a paginated, print-oriented export.
#[async_trait]
pub trait FixedLayoutSink: Send + Sync {
    async fn export(&self, renderer: &mut dyn BrowserSession, html: &str) -> Result<PathBuf>;
}

/// Writes the document as UTF-8 to a fixed path.
#[derive(Debug, Clone)]
pub struct HtmlFileSink {
    path: PathBuf,
}

impl HtmlFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSink for HtmlFileSink {
    fn write_document(&self, html: &str) -> Result<PathBuf> {
        ensure_parent(&self.path)?;
        std::fs::write(&self.path, html)?;
        info!(target: "scrape.output", path = %self.path.display(), bytes = html.len(), "HTML document written");
        Ok(self.path.clone())
    }
}

/// Loads the document into the browser and prints it to a PDF file.
#[derive(Debug, Clone)]
pub struct PdfFileSink {
    path: PathBuf,
    layout: PageLayout,
}

impl PdfFileSink {
    /// A4 with background graphics.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_layout(path, PageLayout::default())
    }

    pub fn with_layout(path: impl Into<PathBuf>, layout: PageLayout) -> Self {
        Self {
            path: path.into(),
            layout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FixedLayoutSink for PdfFileSink {
    async fn export(&self, renderer: &mut dyn BrowserSession, html: &str) -> Result<PathBuf> {
        renderer.set_content(html).await?;
        let pdf = renderer.print_pdf(&self.layout).await?;

        ensure_parent(&self.path)?;
        tokio::fs::write(&self.path, &pdf).await?;
        info!(target: "scrape.output", path = %self.path.display(), bytes = pdf.len(), "PDF generated");
        Ok(self.path.clone())
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
