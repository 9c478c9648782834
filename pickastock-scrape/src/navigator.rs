//! Pagination loop over the search results.

use crate::extract::{CARD_SELECTOR, extract_page};
use crate::filter::accumulate;
use pickastock_common::{
    DEFAULT_MAX_PAGES, DEFAULT_WAIT_TIMEOUT_SECS, PaginationMode, RawRecord, Result, SEARCH_URL,
    ScrapeError, TARGET_NAME,
};
use pickastock_drivers::BrowserSession;
use std::time::Duration;
use tracing::{debug, info};

/// Enabled "next page" control in the pagination bar.
pub const NEXT_PAGE_SELECTOR: &str = ".pagination li:not(.disabled) a i.fa-angle-right";

#[derive(Debug, Clone)]
pub struct NavigatorOptions {
    pub search_url: String,
    pub target_name: String,
    pub max_pages: u32,
    pub wait_timeout: Duration,
    pub pagination: PaginationMode,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            search_url: SEARCH_URL.to_string(),
            target_name: TARGET_NAME.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            wait_timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
            pagination: PaginationMode::default(),
        }
    }
}

/// What happened after a page was scraped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The next page is loaded and its cards are present.
    NextPage,
    /// No enabled next-page control, or the page budget is spent.
    LastPage,
}

/// Drives one browser session through the result pages.
pub struct Navigator<'s, S: BrowserSession + ?Sized> {
    session: &'s mut S,
    options: NavigatorOptions,
}

impl<'s, S: BrowserSession + ?Sized> Navigator<'s, S> {
    pub fn new(session: &'s mut S, options: NavigatorOptions) -> Self {
        Self { session, options }
    }

    /// Visit up to `max_pages` pages and return the matching records in
    /// discovery order. A missing next-page control ends the loop normally;
    /// a card wait that expires aborts it with [`ScrapeError::PageLoadTimeout`].
    pub async fn run(&mut self) -> Result<Vec<RawRecord>> {
        if self.options.max_pages == 0 {
            return Err(ScrapeError::Config("max_pages must be at least 1".into()));
        }

        let mut matches = Vec::new();
        for page in 1..=self.options.max_pages {
            info!(target: "scrape.navigator", page, "scraping page");

            if page == 1 || self.options.pagination == PaginationMode::Reload {
                self.session.goto(&self.options.search_url).await?;
                self.wait_for_cards().await?;
            }

            self.scrape_current_page(page, &mut matches).await?;

            if self.advance(page).await? == PageOutcome::LastPage {
                break;
            }
        }

        info!(
            target: "scrape.navigator",
            total = matches.len(),
            target_name = %self.options.target_name,
            "pagination finished"
        );
        Ok(matches)
    }

    async fn wait_for_cards(&mut self) -> Result<()> {
        self.session
            .wait_for(CARD_SELECTOR, self.options.wait_timeout)
            .await
    }

    async fn scrape_current_page(&mut self, page: u32, acc: &mut Vec<RawRecord>) -> Result<()> {
        let html = self.session.page_source().await?;
        let records = extract_page(&html)?;
        let found = records.len();
        let matched = accumulate(acc, records, &self.options.target_name);

        if matched > 0 {
            info!(target: "scrape.navigator", page, found, matched, "matching records found");
        } else {
            info!(target: "scrape.navigator", page, found, "no matching records on page");
        }
        Ok(())
    }

    async fn advance(&mut self, page: u32) -> Result<PageOutcome> {
        if !self.session.exists(NEXT_PAGE_SELECTOR).await? {
            info!(target: "scrape.navigator", page, "no more pages");
            return Ok(PageOutcome::LastPage);
        }
        if page >= self.options.max_pages {
            debug!(target: "scrape.navigator", page, "page budget reached");
            return Ok(PageOutcome::LastPage);
        }

        info!(target: "scrape.navigator", page, "moving to the next page");
        // The old cards stay in the DOM until the navigation lands.
        self.session.mark(CARD_SELECTOR).await?;
        if !self.session.click(NEXT_PAGE_SELECTOR).await? {
            return Ok(PageOutcome::LastPage);
        }
        self.session.wait_for_detach(self.options.wait_timeout).await?;
        self.wait_for_cards().await?;
        Ok(PageOutcome::NextPage)
    }
}
