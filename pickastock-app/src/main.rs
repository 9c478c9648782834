use anyhow::Result;
use clap::Parser;
use cli::Args;
use pickastock_common::observability::{LogConfig, init_logging};
use pickastock_drivers::chrome::driver::ChromeDriver;
use pickastock_drivers::chrome::options::BrowserOptions;
use pickastock_scrape::{HtmlFileSink, NavigatorOptions, PdfFileSink, ReportOutcome, run_report};
use tracing::info;
mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    // 1) Resolve settings: file < env < flags
    let args = Args::parse();
    let cfg = args.load_config()?;

    let log_path = init_logging(LogConfig {
        app_name: "pickastock",
        log_dir: cfg.log.dir.clone(),
        emit_stderr: true,
        format: cfg.log.format,
        ..LogConfig::default()
    })?;
    info!(log = %log_path.display(), url = %cfg.search_url, max_pages = cfg.max_pages, "starting report");

    // 2) One browser session for scraping and printing
    let browser = BrowserOptions {
        headless: cfg.browser.headless,
        ..BrowserOptions::default()
    };
    let mut session = ChromeDriver::connect(&cfg.browser.webdriver_url, &browser).await?;

    let options = NavigatorOptions {
        search_url: cfg.search_url.clone(),
        target_name: cfg.target_name.clone(),
        max_pages: cfg.max_pages,
        wait_timeout: cfg.wait_timeout(),
        pagination: cfg.pagination,
    };
    let html_sink = HtmlFileSink::new(&cfg.output.html_path);
    let pdf_sink = PdfFileSink::new(&cfg.output.pdf_path);

    // 3) Scrape, compute, render, export
    match run_report(&mut session, &options, &html_sink, &pdf_sink).await? {
        ReportOutcome::NoData => println!("No data found."),
        ReportOutcome::Written {
            records, pdf_path, ..
        } => println!("PDF generated: {} ({records} records)", pdf_path.display()),
    }
    Ok(())
}
