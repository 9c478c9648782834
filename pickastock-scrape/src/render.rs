//! HTML report for processed records.

use chrono::{DateTime, Local};
use pickastock_common::{NOT_APPLICABLE, ProcessedRecord};

const STYLESHEET: &str = r#"
      body { font-family: Arial, sans-serif; margin: 20px; }
      .card { border: 1px solid #ddd; border-radius: 8px; padding: 15px; margin-bottom: 15px; }
      .card h2 { margin: 0 0 10px; }
      .card div { margin-bottom: 10px; }
      .card .gray { color: #666; }
      .card .bold { font-weight: bold; }
      .card .row { display: flex; justify-content: space-between; }
      .card .col { flex: 1; }
      .increase { color: green; }
      .decrease { color: red; }
      footer { color: #999; font-size: 10px; }
"#;

/// Render the report document with the current local time in the footer.
pub fn render(records: &[ProcessedRecord]) -> String {
    render_at(records, Local::now())
}

/// Render the report document.
pub fn render_at(records: &[ProcessedRecord], generated_at: DateTime<Local>) -> String {
    let mut body = String::new();
    for record in records {
        render_card(&mut body, record);
    }

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Extracted Data PDF</title>
    <style>{STYLESHEET}    </style>
  </head>
  <body>
{body}    <footer>Generated {generated}</footer>
  </body>
</html>
"#,
        generated = generated_at.format("%Y-%m-%d %H:%M:%S %:z"),
    )
}

fn render_card(out: &mut String, r: &ProcessedRecord) {
    let total = if r.total_after_change.is_empty() {
        NOT_APPLICABLE
    } else {
        r.total_after_change.as_str()
    };

    out.push_str(&format!(
        r#"    <div class="card">
      <div class="gray">{date}</div>
      <h2>{title}</h2>
      <div><span class="bold">Name:</span> {name}</div>
      <div class="row">
        <div class="col"><span class="bold">Date of Chg:</span> {date_of_change}</div>
        <div class="col"><span class="bold">Total after Chg:</span> {total}</div>
"#,
        date = text(&r.date),
        title = text(&r.title),
        name = text(&r.name),
        date_of_change = text(&r.date_of_change),
        total = escape_html(total),
    ));
    if r.disposed_value != "0" {
        out.push_str(&amount_column("Disposed", &r.disposed_value));
    }
    if r.acquired_value != "0" {
        out.push_str(&amount_column("Acquired", &r.acquired_value));
    }
    out.push_str(&format!(
        r#"      </div>
      <div class="row">
        <div class="col"><span class="decrease">D(%):</span> {disposed}</div>
        <div class="col"><span class="increase">A(%):</span> {acquired}</div>
        <div class="col"><span class="bold">Remarks:</span> {remarks}</div>
      </div>
    </div>
"#,
        disposed = escape_html(&r.disposed_percentage_change),
        acquired = escape_html(&r.acquired_percentage_change),
        remarks = escape_html(r.remarks.as_deref().filter(|s| !s.is_empty()).unwrap_or(NOT_APPLICABLE)),
    ));
}

fn amount_column(label: &str, value: &str) -> String {
    format!(
        "        <div class=\"col\"><span class=\"bold\">{label}:</span> {}</div>\n",
        escape_html(value)
    )
}

fn text(value: &Option<String>) -> String {
    value.as_deref().map(escape_html).unwrap_or_default()
}

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
