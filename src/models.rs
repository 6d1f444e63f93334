//! Domain model for the quote screen. `Quote` is a light-weight data holder
//! that mirrors one element of the bundled JSON dataset, so the store can
//! deserialize straight into it and the UI can render it without any extra
//! mapping layer.

use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// A single quotation paired with its attribution.
pub struct Quote {
    /// Quotation body. Stored under the `quote` key in the dataset; we rename
    /// it here because `quote.quote` reads poorly at call sites.
    #[serde(rename = "quote")]
    pub text: String,
    /// Attribution line shown beneath the quotation.
    pub author: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }
}

impl fmt::Display for Quote {
    /// Write the same text that gets copied or shared, so `to_string()` and
    /// `format_quote` never drift apart.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"\n- {}", self.text, self.author)
    }
}

/// Render a quote as `"<text>"` followed by a newline and `- <author>`. This is
/// the payload handed to the clipboard and to the share target.
pub fn format_quote(quote: &Quote) -> String {
    quote.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_text_and_author_on_separate_lines() {
        let quote = Quote::new("Stay hungry.", "Anon");
        assert_eq!(format_quote(&quote), "\"Stay hungry.\"\n- Anon");
    }

    #[test]
    fn format_keeps_inner_whitespace_verbatim() {
        let quote = Quote::new("  spaced  ", " Someone ");
        assert_eq!(format_quote(&quote), "\"  spaced  \"\n-  Someone ");
    }

    #[test]
    fn deserializes_from_dataset_field_names() {
        let quote: Quote =
            serde_json::from_str(r#"{"quote": "A", "author": "X"}"#).expect("valid record");
        assert_eq!(quote, Quote::new("A", "X"));
    }
}
