//! Driver layer for browser automation.
//!
//! This crate exposes the browser capability the scrape pipeline is written
//! against, and the WebDriver-backed implementation used in production.
//!
//! - [`session::BrowserSession`]: navigation, DOM queries, clicks, print-to-PDF
//! - [`chrome::driver::ChromeDriver`]: `fantoccini` client wrapper
//! - [`chrome::options`]: Chrome command-line arguments
pub mod chrome;
pub mod session;

pub use session::{BrowserSession, PageLayout, PaperFormat};
