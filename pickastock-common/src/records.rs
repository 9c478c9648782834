use serde::{Deserialize, Serialize};

/// Placeholder written by the extractor when the total-after-change label is missing.
pub const NOT_AVAILABLE: &str = "Not Available";

/// Marker for a value that could not be computed. Distinct from numeric zero.
pub const NOT_APPLICABLE: &str = "N/A";

/// Plain text snapshot of one listing card, as read from the DOM.
///
/// Absent text fields stay `None`; the numeric fields carry their own
/// sentinels (`"Not Available"` for the total, empty string for the
/// acquired/disposed values) so that callers can tell "missing" from `"0"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub date: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub date_of_change: Option<String>,
    /// Reserved; never populated by the extractor.
    pub others: Option<String>,
    pub total_after_change: String,
    pub disposed_value: String,
    pub acquired_value: String,
    pub remarks: Option<String>,
}

impl Default for RawRecord {
    fn default() -> Self {
        Self {
            date: None,
            title: None,
            name: None,
            date_of_change: None,
            others: None,
            total_after_change: NOT_AVAILABLE.to_string(),
            disposed_value: String::new(),
            acquired_value: String::new(),
            remarks: None,
        }
    }
}

impl RawRecord {
    /// Exact, case-sensitive comparison of the holder name.
    pub fn is_held_by(&self, target: &str) -> bool {
        self.name.as_deref() == Some(target)
    }
}

/// A filtered record with display-ready values and derived percentages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedRecord {
    pub date: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub date_of_change: Option<String>,
    pub others: Option<String>,
    /// Grouped decimal (`1,234,567`) or `"N/A"`.
    pub total_after_change: String,
    /// Grouped decimal or `"0"`.
    pub disposed_value: String,
    /// Grouped decimal or `"0"`.
    pub acquired_value: String,
    pub remarks: Option<String>,
    /// Change of the total against the previous record, e.g. `"-20.00%"`.
    pub percentage_change: String,
    /// Acquired value as a share of this record's own total.
    pub acquired_percentage_change: String,
    /// Disposed value as a share of this record's own total.
    pub disposed_percentage_change: String,
}
