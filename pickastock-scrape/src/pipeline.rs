//! End-to-end report run: scrape, compute, render, export.

use crate::metrics::compute;
use crate::navigator::{Navigator, NavigatorOptions};
use crate::render::render;
use crate::sinks::{DocumentSink, FixedLayoutSink};
use pickastock_common::Result;
use pickastock_drivers::BrowserSession;
use std::path::PathBuf;
use tracing::{info, warn};

/// How a report run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// No record matched the target name; nothing was written.
    NoData,
    /// Both artifacts were produced.
    Written {
        records: usize,
        html_path: PathBuf,
        pdf_path: PathBuf,
    },
}

/// Run the whole report against `session`, closing it on every exit path.
pub async fn run_report(
    session: &mut dyn BrowserSession,
    options: &NavigatorOptions,
    document_sink: &dyn DocumentSink,
    export_sink: &dyn FixedLayoutSink,
) -> Result<ReportOutcome> {
    let result = generate(session, options, document_sink, export_sink).await;
    if let Err(e) = session.close().await {
        warn!(target: "scrape.pipeline", error = %e, "failed to close browser session");
    }
    result
}

async fn generate(
    session: &mut dyn BrowserSession,
    options: &NavigatorOptions,
    document_sink: &dyn DocumentSink,
    export_sink: &dyn FixedLayoutSink,
) -> Result<ReportOutcome> {
    let matches = Navigator::new(&mut *session, options.clone()).run().await?;

    if matches.is_empty() {
        info!(target: "scrape.pipeline", "no data found");
        return Ok(ReportOutcome::NoData);
    }

    let processed = compute(&matches);
    let html = render(&processed);

    let html_path = document_sink.write_document(&html)?;
    let pdf_path = export_sink.export(session, &html).await?;

    Ok(ReportOutcome::Written {
        records: processed.len(),
        html_path,
        pdf_path,
    })
}
