use crate::chrome::options::{build_chrome_arguments, BrowserOptions};
use crate::chrome::scripts::PageScripts;
use crate::session::{BrowserSession, PageLayout, PaperFormat};
use anyhow::anyhow;
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::wd::{PrintConfiguration, PrintSize};
use fantoccini::{Client, ClientBuilder, Locator};
use pickastock_common::{Result, ScrapeError};
use serde_json::json;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use webdriver::capabilities::Capabilities;

const DETACH_POLL: Duration = Duration::from_millis(250);

/// Thin wrapper around a `fantoccini` WebDriver client driving one Chrome tab.
pub struct ChromeDriver {
    client: Client,
    marked: Option<(String, Element)>,
    closed: bool,
}

impl ChromeDriver {
    /// Connect to a running WebDriver service (chromedriver listens on
    /// `http://localhost:9515` by default) and start a Chrome session.
    pub async fn connect(webdriver_url: &str, options: &BrowserOptions) -> Result<Self> {
        let mut caps = Capabilities::new();
        let mut chrome_opts = HashMap::new();
        chrome_opts.insert("args".to_string(), json!(build_chrome_arguments(options)));
        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(webdriver_url)
            .await
            .map_err(|e| anyhow!("failed to start session at {webdriver_url}: {e}"))?;

        info!(
            target: "browser.session",
            %webdriver_url,
            headless = options.headless,
            "browser session started"
        );

        Ok(Self {
            client,
            marked: None,
            closed: false,
        })
    }
}

fn driver_error(e: CmdError) -> ScrapeError {
    ScrapeError::Driver(anyhow::Error::from(e))
}

fn print_size(format: PaperFormat) -> PrintSize {
    match format {
        PaperFormat::A4 => PrintSize::A4,
    }
}

#[async_trait]
impl BrowserSession for ChromeDriver {
    async fn goto(&mut self, url: &str) -> Result<()> {
        debug!(target: "browser.session", %url, "navigating");
        self.client.goto(url).await.map_err(driver_error)
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(_) => Ok(()),
            Err(CmdError::WaitTimeout) => Err(ScrapeError::PageLoadTimeout {
                selector: selector.to_string(),
                timeout_secs: timeout.as_secs(),
            }),
            Err(e) => Err(driver_error(e)),
        }
    }

    async fn page_source(&mut self) -> Result<String> {
        self.client.source().await.map_err(driver_error)
    }

    async fn exists(&mut self, selector: &str) -> Result<bool> {
        let found = self
            .client
            .find_all(Locator::Css(selector))
            .await
            .map_err(driver_error)?;
        Ok(!found.is_empty())
    }

    async fn click(&mut self, selector: &str) -> Result<bool> {
        let clicked = self
            .client
            .execute(PageScripts::click_enclosing_anchor(), vec![json!(selector)])
            .await
            .map_err(driver_error)?;
        Ok(clicked.as_bool().unwrap_or(false))
    }

    async fn mark(&mut self, selector: &str) -> Result<bool> {
        self.marked = match self.client.find(Locator::Css(selector)).await {
            Ok(element) => Some((selector.to_string(), element)),
            Err(e) if e.is_no_such_element() => None,
            Err(e) => return Err(driver_error(e)),
        };
        Ok(self.marked.is_some())
    }

    async fn wait_for_detach(&mut self, timeout: Duration) -> Result<()> {
        let Some((selector, element)) = self.marked.take() else {
            return Ok(());
        };
        let started = Instant::now();
        loop {
            match element.tag_name().await {
                // chromedriver reports references from a replaced document either way.
                Err(e) if e.is_stale_element_reference() || e.is_no_such_element() => {
                    debug!(target: "browser.session", %selector, "previous document detached");
                    return Ok(());
                }
                Err(e) => return Err(driver_error(e)),
                Ok(_) if started.elapsed() >= timeout => {
                    return Err(ScrapeError::PageLoadTimeout {
                        selector,
                        timeout_secs: timeout.as_secs(),
                    });
                }
                Ok(_) => tokio::time::sleep(DETACH_POLL).await,
            }
        }
    }

    async fn set_content(&mut self, html: &str) -> Result<()> {
        self.client
            .execute(PageScripts::replace_document(), vec![json!(html)])
            .await
            .map_err(driver_error)?;
        Ok(())
    }

    async fn print_pdf(&mut self, layout: &PageLayout) -> Result<Vec<u8>> {
        let config = PrintConfiguration::builder()
            .size(print_size(layout.format))
            .background(layout.print_background)
            .build()
            .map_err(|e| anyhow!("invalid print configuration: {e:?}"))?;
        self.client.print(config).await.map_err(driver_error)
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.client.clone().close().await.map_err(driver_error)?;
        info!(target: "browser.session", "browser session closed");
        Ok(())
    }
}
