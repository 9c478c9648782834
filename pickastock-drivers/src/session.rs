use async_trait::async_trait;
use pickastock_common::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Paper sizes supported by the fixed-layout export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperFormat {
    /// 21 × 29.7 cm, portrait.
    #[default]
    A4,
}

/// Page setup for print-to-PDF.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub format: PaperFormat,
    pub print_background: bool,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            format: PaperFormat::A4,
            print_background: true,
        }
    }
}

/// One browser tab driven strictly sequentially.
///
/// Implementations map engine failures to [`pickastock_common::ScrapeError::Driver`]
/// and bounded-wait expiry to [`pickastock_common::ScrapeError::PageLoadTimeout`].
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigate to `url` and wait for the document to finish loading.
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Block until at least one element matches `selector`, or time out.
    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// Serialized DOM of the current document.
    async fn page_source(&mut self) -> Result<String>;

    /// Whether any element currently matches `selector`.
    async fn exists(&mut self, selector: &str) -> Result<bool>;

    /// Click the anchor enclosing the first element matching `selector`
    /// (or the element itself). Returns `false` when nothing matched.
    ///
    /// The click only starts a navigation; pair it with [`Self::mark`] and
    /// [`Self::wait_for_detach`] to know the old document is gone.
    async fn click(&mut self, selector: &str) -> Result<bool>;

    /// Remember the first element matching `selector`. Returns `false` and
    /// clears any previous mark when nothing matched.
    async fn mark(&mut self, selector: &str) -> Result<bool>;

    /// Block until the marked element is no longer attached to the document,
    /// or time out. Returns immediately when nothing is marked.
    async fn wait_for_detach(&mut self, timeout: Duration) -> Result<()>;

    /// Replace the current document with `html`.
    async fn set_content(&mut self, html: &str) -> Result<()>;

    /// Print the current document to PDF bytes.
    async fn print_pdf(&mut self, layout: &PageLayout) -> Result<Vec<u8>>;

    /// End the session. Safe to call once on every exit path.
    async fn close(&mut self) -> Result<()>;
}
