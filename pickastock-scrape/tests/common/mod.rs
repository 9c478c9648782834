#![allow(dead_code)]

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use pickastock_common::observability::{LogConfig, init_logging};
use pickastock_common::{Result, ScrapeError};
use pickastock_drivers::{BrowserSession, PageLayout};
use pickastock_scrape::extract::CARD_SELECTOR;
use pickastock_scrape::navigator::NEXT_PAGE_SELECTOR;

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "pickastock-tests",
            log_dir: Some(std::env::temp_dir().join("pickastock-tests")),
            default_filter: "debug",
            ..LogConfig::default()
        };
        init_logging(config).unwrap_or_default()
    });
}

pub const FAKE_PDF: &[u8] = b"%PDF-1.7\n% fake\n";

/// One scripted result page.
#[derive(Debug, Clone)]
pub struct FakePage {
    pub html: String,
    pub has_next: bool,
}

/// In-memory browser that walks through scripted pages.
///
/// A click starts a navigation that lands only after `navigation_lag` more
/// DOM observations; until then every query still sees the old page.
#[derive(Debug, Default)]
pub struct FakeSession {
    pages: Vec<FakePage>,
    current: usize,
    pending: Option<usize>,
    remaining: usize,
    marked: Option<usize>,
    /// Page index (0-based) whose card wait expires.
    pub timeout_on_page: Option<usize>,
    /// Observations a click takes to replace the document.
    pub navigation_lag: usize,
    /// Navigation never lands after a click.
    pub stuck: bool,
    pub gotos: usize,
    pub clicks: usize,
    pub sources: usize,
    pub detach_polls: usize,
    pub closes: usize,
    pub content: Option<String>,
    pub printed: Vec<PageLayout>,
}

impl FakeSession {
    pub fn new(pages: Vec<FakePage>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    fn page(&self) -> &FakePage {
        &self.pages[self.current]
    }

    fn observe(&mut self) {
        let Some(next) = self.pending else { return };
        if self.stuck {
            return;
        }
        if self.remaining == 0 {
            self.current = next;
            self.pending = None;
        } else {
            self.remaining -= 1;
        }
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn goto(&mut self, _url: &str) -> Result<()> {
        self.gotos += 1;
        self.current = 0;
        self.pending = None;
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        self.observe();
        if self.timeout_on_page == Some(self.current) {
            return Err(ScrapeError::PageLoadTimeout {
                selector: selector.to_string(),
                timeout_secs: timeout.as_secs(),
            });
        }
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String> {
        self.observe();
        self.sources += 1;
        Ok(self.page().html.clone())
    }

    async fn exists(&mut self, selector: &str) -> Result<bool> {
        assert_eq!(selector, NEXT_PAGE_SELECTOR);
        self.observe();
        Ok(self.page().has_next)
    }

    async fn click(&mut self, _selector: &str) -> Result<bool> {
        if !self.page().has_next || self.current + 1 >= self.pages.len() {
            return Ok(false);
        }
        self.clicks += 1;
        self.pending = Some(self.current + 1);
        self.remaining = self.navigation_lag;
        Ok(true)
    }

    async fn mark(&mut self, selector: &str) -> Result<bool> {
        assert_eq!(selector, CARD_SELECTOR);
        self.observe();
        self.marked = Some(self.current);
        Ok(true)
    }

    async fn wait_for_detach(&mut self, timeout: Duration) -> Result<()> {
        let Some(marked) = self.marked.take() else {
            return Ok(());
        };
        while self.current == marked {
            if self.pending.is_none() || self.stuck {
                return Err(ScrapeError::PageLoadTimeout {
                    selector: CARD_SELECTOR.to_string(),
                    timeout_secs: timeout.as_secs(),
                });
            }
            self.detach_polls += 1;
            self.observe();
        }
        Ok(())
    }

    async fn set_content(&mut self, html: &str) -> Result<()> {
        self.content = Some(html.to_string());
        Ok(())
    }

    async fn print_pdf(&mut self, layout: &PageLayout) -> Result<Vec<u8>> {
        self.printed.push(*layout);
        Ok(FAKE_PDF.to_vec())
    }

    async fn close(&mut self) -> Result<()> {
        self.closes += 1;
        Ok(())
    }
}

/// Markup for one listing card, shaped like the live site.
pub fn card(title: &str, name: &str, total: &str, acquired: Option<&str>, disposed: Option<&str>) -> String {
    let mut html = format!(
        r#"<div class="search-card">
  <div class="gray">25 Sep 2024</div>
  <div class="search-card-title"><a href="/listing">{title}</a></div>
  <div class="row"><small class="gray">Name</small><div><a href="/listing">{name}</a></div></div>
  <div class="row"><small class="gray one-line">Date of Chg.</small><div>20 Sep 2024</div></div>
  <div class="row"><small class="gray one-line">Total after Chg.</small><div>{total}</div></div>
"#
    );
    if let Some(value) = acquired {
        html.push_str(&format!(
            r#"  <div class="row"><small class="gray green">Acquired</small><div>{value}</div></div>
"#
        ));
    }
    if let Some(value) = disposed {
        html.push_str(&format!(
            r#"  <div class="row"><small class="gray red">Disposed</small><div>{value}</div></div>
"#
        ));
    }
    html.push_str("</div>\n");
    html
}

pub fn page(cards: &[String], has_next: bool) -> FakePage {
    FakePage {
        html: format!("<html><body>{}</body></html>", cards.concat()),
        has_next,
    }
}
