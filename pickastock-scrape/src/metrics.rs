//! Derived percentages over the filtered record sequence.

use crate::numeric::{format_grouped, format_percent, parse_decimal};
use pickastock_common::{NOT_APPLICABLE, ProcessedRecord, RawRecord};

/// Relative change of `current` against `previous`, or `"N/A"` when either
/// value is not a number or `previous` is zero.
pub fn percentage_change(current: f64, previous: f64) -> String {
    if current.is_nan() || previous.is_nan() || previous == 0.0 {
        return NOT_APPLICABLE.to_string();
    }
    format_percent((current - previous) / previous * 100.0)
}

/// `part` as a percentage of `total`, or `"N/A"` when `part` is zero or the
/// ratio is not finite (missing or zero total).
pub fn share_of_total(part: f64, total: f64) -> String {
    if part == 0.0 {
        return NOT_APPLICABLE.to_string();
    }
    let share = part / total * 100.0;
    if !share.is_finite() {
        return NOT_APPLICABLE.to_string();
    }
    format_percent(share)
}

fn amount(text: &str) -> f64 {
    let value = parse_decimal(text);
    if value.is_nan() { 0.0 } else { value }
}

fn display_total(total: f64) -> String {
    if total.is_nan() || total == 0.0 {
        NOT_APPLICABLE.to_string()
    } else {
        format_grouped(total)
    }
}

fn display_amount(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format_grouped(value)
    }
}

/// Compute display values and percentages for each record.
///
/// Output has the same length and order as the input. The change column of
/// each record compares against the record immediately before it; the first
/// record has no predecessor and always gets `"N/A"`.
pub fn compute(records: &[RawRecord]) -> Vec<ProcessedRecord> {
    let mut previous_total: Option<f64> = None;

    records
        .iter()
        .map(|record| {
            let total = parse_decimal(&record.total_after_change);
            let acquired = amount(&record.acquired_value);
            let disposed = amount(&record.disposed_value);

            let change = match previous_total {
                Some(previous) => percentage_change(total, previous),
                None => NOT_APPLICABLE.to_string(),
            };
            previous_total = Some(total);

            ProcessedRecord {
                date: record.date.clone(),
                title: record.title.clone(),
                name: record.name.clone(),
                date_of_change: record.date_of_change.clone(),
                others: record.others.clone(),
                total_after_change: display_total(total),
                disposed_value: display_amount(disposed),
                acquired_value: display_amount(acquired),
                remarks: record.remarks.clone(),
                percentage_change: change,
                acquired_percentage_change: share_of_total(acquired, total),
                disposed_percentage_change: share_of_total(disposed, total),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(total: &str, acquired: &str, disposed: &str) -> RawRecord {
        RawRecord {
            name: Some("EMPLOYEES PROVIDENT FUND BOARD".into()),
            total_after_change: total.into(),
            acquired_value: acquired.into(),
            disposed_value: disposed.into(),
            ..RawRecord::default()
        }
    }

    fn changes(out: &[ProcessedRecord]) -> Vec<&str> {
        out.iter().map(|r| r.percentage_change.as_str()).collect()
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(compute(&[]).is_empty());
    }

    #[test]
    fn single_record_has_no_change() {
        let out = compute(&[record("500", "", "")]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].percentage_change, "N/A");
    }

    #[test]
    fn change_follows_sequence_order() {
        let out = compute(&[record("100", "", ""), record("150", "", ""), record("120", "", "")]);
        assert_eq!(changes(&out), ["N/A", "50.00%", "-20.00%"]);
    }

    #[test]
    fn preserves_length_and_order() {
        let input: Vec<RawRecord> = (1..=5)
            .map(|i| RawRecord {
                title: Some(format!("t{i}")),
                total_after_change: (i * 100).to_string(),
                ..RawRecord::default()
            })
            .collect();
        let out = compute(&input);
        assert_eq!(out.len(), input.len());
        for (raw, processed) in input.iter().zip(&out) {
            assert_eq!(raw.title, processed.title);
        }
    }

    #[test]
    fn ratios_use_own_total() {
        let out = compute(&[record("1000", "", ""), record("200", "50", "")]);
        assert_eq!(out[1].acquired_percentage_change, "25.00%");
        assert_eq!(out[1].disposed_percentage_change, "N/A");
        assert_eq!(out[1].acquired_value, "50");
        assert_eq!(out[1].disposed_value, "0");
    }

    #[test]
    fn zero_total_breaks_the_chain() {
        let out = compute(&[record("0", "10", "5"), record("150", "", "")]);
        assert_eq!(out[0].total_after_change, "N/A");
        assert_eq!(out[0].acquired_percentage_change, "N/A");
        assert_eq!(out[0].disposed_percentage_change, "N/A");
        assert_eq!(out[1].percentage_change, "N/A");
    }

    #[test]
    fn unparsable_total_breaks_the_chain() {
        let out = compute(&[
            record("100", "", ""),
            record("Not Available", "20", ""),
            record("150", "", ""),
        ]);
        assert_eq!(changes(&out), ["N/A", "N/A", "N/A"]);
        assert_eq!(out[1].total_after_change, "N/A");
        assert_eq!(out[1].acquired_percentage_change, "N/A");
        assert_eq!(out[1].acquired_value, "20");
    }

    #[test]
    fn values_are_grouped_for_display() {
        let out = compute(&[record("123456789", "1000000", "2500.5")]);
        assert_eq!(out[0].total_after_change, "123,456,789");
        assert_eq!(out[0].acquired_value, "1,000,000");
        assert_eq!(out[0].disposed_value, "2,500.5");
        assert_eq!(out[0].acquired_percentage_change, "0.81%");
    }

    #[test]
    fn unparsable_amounts_default_to_zero() {
        let out = compute(&[record("100", "n/a", "")]);
        assert_eq!(out[0].acquired_value, "0");
        assert_eq!(out[0].acquired_percentage_change, "N/A");
    }

    #[test]
    fn percentage_change_guards() {
        assert_eq!(percentage_change(10.0, 0.0), "N/A");
        assert_eq!(percentage_change(f64::NAN, 10.0), "N/A");
        assert_eq!(percentage_change(10.0, f64::NAN), "N/A");
        assert_eq!(percentage_change(0.0, 10.0), "-100.00%");
    }

    #[test]
    fn exact_halves_round_up() {
        assert_eq!(percentage_change(897.0, 800.0), "12.13%");
        assert_eq!(percentage_change(703.0, 800.0), "-12.13%");
        assert_eq!(share_of_total(97.0, 800.0), "12.13%");
    }

    #[test]
    fn chained_change_rounds_half_up() {
        let out = compute(&[record("800", "", ""), record("897", "97", "")]);
        assert_eq!(changes(&out), ["N/A", "12.13%"]);
        assert_eq!(out[1].acquired_percentage_change, "10.81%");
    }
}
