//! Inline content: text runs and hyperlinks.

use roxmltree::Node;

use crate::text::{escape_text, normalize};

use super::{NS_REL, NS_WML, Renderer, wml, wml_toggle};

impl Renderer<'_> {
    /// Render the literal text of a run with its emphasis wrapping.
    ///
    /// Wrapping order is innermost-to-outermost: italic, then bold, then
    /// underline. A run whose text exactly matches an exclusion entry, or
    /// carries no text at all, contributes nothing.
    pub(crate) fn text_run(&self, node: Node) -> String {
        let mut text = String::new();
        for t in node.children().filter(|n| n.has_tag_name((NS_WML, "t"))) {
            text.push_str(t.text().unwrap_or_default());
        }
        if text.is_empty() || self.exclude.contains(text.as_str()) {
            return String::new();
        }

        let properties = wml(node, "rPr");
        let italic = properties.is_some_and(|p| wml_toggle(p, "i"));
        let bold = properties.is_some_and(|p| wml_toggle(p, "b"));
        let underline = properties.is_some_and(underline_on);

        let mut html = escape_text(&normalize(&text));
        if italic {
            html = format!("<i{}>{html}</i>", self.attrs("i"));
        }
        if bold {
            html = format!("<b{}>{html}</b>", self.attrs("b"));
        }
        if underline {
            html = format!("<u{}>{html}</u>", self.attrs("u"));
        }
        html
    }

    /// Render a hyperlink node as an anchor opening in a new browsing context.
    ///
    /// The wiki-export pipeline that produced these documents wrapped link
    /// text in literal brackets; those are stripped. An id with no matching
    /// relationship renders the anchor without `href`.
    pub(crate) fn hyperlink(&self, node: Node) -> String {
        let mut text = String::new();
        for run in node.children().filter(|n| n.has_tag_name((NS_WML, "r"))) {
            for t in run.children().filter(|n| n.has_tag_name((NS_WML, "t"))) {
                text.push_str(t.text().unwrap_or_default());
            }
        }
        let text: String = text
            .trim()
            .chars()
            .filter(|&c| c != '[' && c != ']')
            .collect();
        if text.is_empty() {
            return String::new();
        }
        let text = escape_text(&normalize(&text));

        let href = node.attribute((NS_REL, "id")).and_then(|id| {
            match self.resources.get(id) {
                Ok(entry) => Some(entry.target.as_str()),
                Err(e) => {
                    log::warn!("{e}, rendering link without href");
                    None
                }
            }
        });

        match href {
            Some(href) => format!(
                "<a href='{href}' target='_blank'{}>{text}</a>",
                self.attrs("a")
            ),
            None => format!("<a target='_blank'{}>{text}</a>", self.attrs("a")),
        }
    }
}

/// Underline is not a plain toggle: `w:u` carries a pattern value and
/// `none` means off.
fn underline_on(properties: Node) -> bool {
    wml(properties, "u").is_some_and(|u| {
        u.attribute((NS_WML, "val"))
            .is_none_or(|v| v != "none" && v != "0")
    })
}
