/// JavaScript snippets executed against the live document.
pub struct PageScripts;

impl PageScripts {
    /// `arguments[0]`: CSS selector. Clicks the enclosing anchor of the first
    /// match and returns whether anything was clicked.
    pub fn click_enclosing_anchor() -> &'static str {
        r#"
            const el = document.querySelector(arguments[0]);
            if (!el) return false;
            const target = el.closest('a') || el;
            target.click();
            return true;
        "#
    }

    /// `arguments[0]`: full HTML document that replaces the current one.
    pub fn replace_document() -> &'static str {
        r#"
            document.open();
            document.write(arguments[0]);
            document.close();
        "#
    }
}
