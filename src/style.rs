//! Output styling: a fixed map from emitted tag names to attribute lists.

use std::collections::BTreeMap;

/// Immutable tag -> attribute map consulted whenever a tag is emitted.
///
/// The map is supplied at construction and shared read-only across the whole
/// traversal. Tags without an entry render with no attributes; that fallback
/// is applied consistently rather than treated as an error. Attributes are
/// stored in a [`BTreeMap`] so output is deterministic.
///
/// # Example
///
/// ```
/// use docx2html::StyleSheet;
///
/// let mut styles = StyleSheet::default();
/// styles.set("p", [("class", "doc-paragraph")]);
/// assert_eq!(styles.open_tag("p"), "<p class=\"doc-paragraph\">");
/// assert_eq!(styles.open_tag("a"), "<a>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "cli",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct StyleSheet {
    rules: BTreeMap<String, BTreeMap<String, String>>,
}

impl StyleSheet {
    /// An empty style sheet; every tag renders bare.
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Replace the attribute list for one tag.
    pub fn set<K, V, I>(&mut self, tag: &str, attrs: I)
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let attrs = attrs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.rules.insert(tag.to_string(), attrs);
    }

    /// Attribute suffix for a tag: `` or ` key="value" ...`.
    pub(crate) fn attr_suffix(&self, tag: &str) -> String {
        let Some(attrs) = self.rules.get(tag) else {
            return String::new();
        };
        let mut out = String::new();
        for (key, value) in attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out
    }

    /// Full opening tag including the configured attributes.
    pub fn open_tag(&self, tag: &str) -> String {
        format!("<{}{}>", tag, self.attr_suffix(tag))
    }
}

impl Default for StyleSheet {
    /// The stock styles: fragments drop into a page without extra CSS.
    fn default() -> Self {
        let mut styles = Self::empty();
        styles.set("table", [("border", "1")]);
        styles.set("ul", [("style", "margin-top: 5px; list-style: inside;")]);
        styles.set("p", [("style", "text-align: justify;")]);
        styles.set("img", [("style", "clear: both; margin: 5px; float: left;")]);
        styles.set("h2", [("style", "margin-top: 20px; margin-bottom: 5px; clear: both;")]);
        styles.set("h3", [("style", "margin-top: 20px; margin-bottom: 5px; clear: both;")]);
        styles.set(
            "h4",
            [("style", "margin-top: 20px; margin-bottom: 5px; clear: both; font-size: 15px;")],
        );
        styles
    }
}

impl From<BTreeMap<String, BTreeMap<String, String>>> for StyleSheet {
    fn from(rules: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        Self { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_border() {
        let styles = StyleSheet::default();
        assert_eq!(styles.open_tag("table"), "<table border=\"1\">");
    }

    #[test]
    fn test_unknown_tag_renders_bare() {
        let styles = StyleSheet::default();
        assert_eq!(styles.attr_suffix("a"), "");
        assert_eq!(styles.open_tag("li"), "<li>");
    }

    #[test]
    fn test_set_overrides_defaults() {
        let mut styles = StyleSheet::default();
        styles.set("p", [("class", "body-text")]);
        assert_eq!(styles.open_tag("p"), "<p class=\"body-text\">");
    }

    #[test]
    fn test_attr_order_deterministic() {
        let mut styles = StyleSheet::empty();
        styles.set("td", [("width", "10"), ("align", "left")]);
        // BTreeMap keys sort alphabetically
        assert_eq!(styles.attr_suffix("td"), " align=\"left\" width=\"10\"");
    }
}
