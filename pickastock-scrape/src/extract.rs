//! Listing-card extraction.
//!
//! Field lookup goes through [`CardNode`], so the rules that turn card text
//! into a [`RawRecord`] (trimming, separator stripping, sentinels) run the
//! same against a parsed page snapshot or a synthetic node in tests.

use pickastock_common::{NOT_AVAILABLE, RawRecord, Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};

/// Selector matching one listing card.
pub const CARD_SELECTOR: &str = ".search-card";

/// Label text preceding the total-after-change value.
pub const TOTAL_AFTER_CHANGE_LABEL: &str = "Total after Chg.";

/// The fields read from each card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardField {
    Date,
    Title,
    Name,
    DateOfChange,
    TotalAfterChange,
    AcquiredValue,
    DisposedValue,
    Remarks,
}

/// A card-like structural node that can locate each [`CardField`].
///
/// Returns the raw text content of the field's element, or `None` when the
/// element is absent. Implementations should not trim or clean the text.
pub trait CardNode {
    fn field_text(&self, field: CardField) -> Option<String>;
}

/// Turn one card into a record.
pub fn extract_record<N: CardNode + ?Sized>(card: &N) -> RawRecord {
    let text = |field| card.field_text(field).map(|s| s.trim().to_string());
    let numeral = |field| text(field).map(|s| strip_separators(&s));

    RawRecord {
        date: text(CardField::Date),
        title: text(CardField::Title),
        name: text(CardField::Name),
        date_of_change: text(CardField::DateOfChange),
        others: None,
        total_after_change: numeral(CardField::TotalAfterChange)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        disposed_value: numeral(CardField::DisposedValue).unwrap_or_default(),
        acquired_value: numeral(CardField::AcquiredValue).unwrap_or_default(),
        remarks: text(CardField::Remarks),
    }
}

/// Remove thousands separators, leaving everything else as text.
pub fn strip_separators(text: &str) -> String {
    text.replace(',', "")
}

/// Compiled selectors for the listing markup.
pub struct CardSelectors {
    card: Selector,
    date: Selector,
    title: Selector,
    name: Selector,
    date_of_change: Selector,
    label: Selector,
    acquired: Selector,
    disposed: Selector,
    remarks: Selector,
}

impl CardSelectors {
    fn parse_selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector).map_err(|e| ScrapeError::Selector(format!("{selector}: {e}")))
    }

    pub fn new() -> Result<Self> {
        Ok(Self {
            card: Self::parse_selector(CARD_SELECTOR)?,
            date: Self::parse_selector(".gray")?,
            title: Self::parse_selector(".search-card-title a")?,
            name: Self::parse_selector("small.gray ~ div a")?,
            date_of_change: Self::parse_selector(".gray.one-line ~ div")?,
            label: Self::parse_selector("small.gray.one-line")?,
            acquired: Self::parse_selector("small.gray.green + div")?,
            disposed: Self::parse_selector("small.gray.red + div")?,
            remarks: Self::parse_selector(".one-line.w-100.clickable")?,
        })
    }
}

/// A card element inside a parsed page snapshot.
pub struct HtmlCard<'a> {
    element: ElementRef<'a>,
    selectors: &'a CardSelectors,
}

impl<'a> HtmlCard<'a> {
    pub fn new(element: ElementRef<'a>, selectors: &'a CardSelectors) -> Self {
        Self { element, selectors }
    }

    fn first_text(&self, selector: &Selector) -> Option<String> {
        self.element.select(selector).next().map(element_text)
    }

    fn text_after_label(&self, label: &str) -> Option<String> {
        let label_el = self
            .element
            .select(&self.selectors.label)
            .find(|el| element_text(*el).trim() == label)?;
        label_el
            .next_siblings()
            .find_map(ElementRef::wrap)
            .map(element_text)
    }
}

impl CardNode for HtmlCard<'_> {
    fn field_text(&self, field: CardField) -> Option<String> {
        let s = self.selectors;
        match field {
            CardField::Date => self.first_text(&s.date),
            CardField::Title => self.first_text(&s.title),
            CardField::Name => self.first_text(&s.name),
            CardField::DateOfChange => self.first_text(&s.date_of_change),
            CardField::TotalAfterChange => self.text_after_label(TOTAL_AFTER_CHANGE_LABEL),
            CardField::AcquiredValue => self.first_text(&s.acquired),
            CardField::DisposedValue => self.first_text(&s.disposed),
            CardField::Remarks => self.first_text(&s.remarks),
        }
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// Extract every listing card of a page snapshot, in document order.
pub fn extract_page(html: &str) -> Result<Vec<RawRecord>> {
    let selectors = CardSelectors::new()?;
    let document = Html::parse_document(html);
    let records = document
        .select(&selectors.card)
        .map(|el| extract_record(&HtmlCard::new(el, &selectors)))
        .collect();
    Ok(records)
}
