//! Common types and utilities shared across pickastock crates.
//!
//! This crate defines the record types that flow through the scrape
//! pipeline, the shared error type, and the observability helpers. It is
//! intentionally lightweight so that every crate in the workspace can depend
//! on it without pulling in the browser stack.
//!
//! # Overview
//!
//! - [`RawRecord`]: text snapshot of one listing card
//! - [`ProcessedRecord`]: a filtered record with derived metrics
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`ScrapeError`] and [`Result`]: shared error handling
//!
//! # Examples
//!
//! ```rust
//! use pickastock_common::{RawRecord, TARGET_NAME};
//!
//! let record = RawRecord {
//!     name: Some(TARGET_NAME.to_string()),
//!     ..RawRecord::default()
//! };
//! assert!(record.is_held_by(TARGET_NAME));
//! assert_eq!(record.total_after_change, "Not Available");
//! ```

use serde::{Deserialize, Serialize};

pub mod observability;
pub mod records;

pub use records::{ProcessedRecord, RawRecord, NOT_APPLICABLE, NOT_AVAILABLE};

/// Search endpoint scraped by default.
pub const SEARCH_URL: &str = "https://www.pickastock.info/search?q=epf";

/// Entity whose shareholding changes are reported.
pub const TARGET_NAME: &str = "EMPLOYEES PROVIDENT FUND BOARD";

/// Default number of result pages visited before stopping.
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// Default bound, in seconds, on every wait for listing cards.
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 60;

/// How the navigator moves from one result page to the next.
///
/// The listing site paginates in-session, so `Session` is the default:
/// the search URL is loaded once and every later page is reached by
/// clicking the next-page control. `Reload` loads the fixed search URL at
/// the top of every iteration before looking for the next-page control; on
/// this site that leaves the loop observing page 1 only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    #[default]
    Session,
    Reload,
}

/// Error types used across the pickastock workspace.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// Listing cards did not appear within the bounded wait.
    #[error("Timed out after {timeout_secs}s waiting for `{selector}`")]
    PageLoadTimeout { selector: String, timeout_secs: u64 },

    /// The browser session (WebDriver, network, etc.) reported an error.
    #[error("Driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// One of the fixed CSS selectors could not be parsed.
    #[error("Selector error: {0}")]
    Selector(String),

    /// Writing an output artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScrapeError {
    /// Whether this error is the bounded-wait expiry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::PageLoadTimeout { .. })
    }
}

/// Convenient alias for results that use [`ScrapeError`].
pub type Result<T> = std::result::Result<T, ScrapeError>;
