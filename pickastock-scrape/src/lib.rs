//! Scrape pipeline for the EPF shareholding report.
//!
//! - [`navigator`]: pagination loop over one browser session
//! - [`extract`]: listing-card extraction behind the [`extract::CardNode`] capability
//! - [`filter`]: target-name filter and page accumulation
//! - [`metrics`]: period-over-period and share-of-total percentages
//! - [`render`]: HTML report
//! - [`sinks`]: HTML file and PDF export
//! - [`pipeline`]: the end-to-end run

pub mod extract;
pub mod filter;
pub mod metrics;
pub mod navigator;
pub mod numeric;
pub mod pipeline;
pub mod render;
pub mod sinks;

pub use navigator::{Navigator, NavigatorOptions, PageOutcome};
pub use pipeline::{ReportOutcome, run_report};
pub use sinks::{DocumentSink, FixedLayoutSink, HtmlFileSink, PdfFileSink};
