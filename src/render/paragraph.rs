//! Paragraph translation: child dispatch, exclusion, heading/list/emphasis
//! classification and the list-state transition.

use roxmltree::Node;

use crate::error::{Error, Result};
use crate::text::{normalize, strip_tags};

use super::{BR, BodyNode, MAX_DEPTH, NS_WML, Renderer, RenderState, wml, wml_val};

impl Renderer<'_> {
    /// Render one paragraph-level node.
    ///
    /// The ordering here is load-bearing: the list transition runs before the
    /// heading classification, and the `</ul>` prefix is always computed
    /// before the tag body is emitted. That is what keeps `<ul>` balanced
    /// across consecutive siblings.
    ///
    /// `inline` marks content inside a table cell or list item: images lose
    /// their block styling there, and the caller supplies a cell-local
    /// [`RenderState`] so a document-level list never leaks into a row.
    pub(crate) fn paragraph(
        &self,
        node: Node,
        state: &mut RenderState,
        inline: bool,
        depth: usize,
    ) -> Result<String> {
        if depth >= MAX_DEPTH {
            return Err(Error::DocumentTooComplex);
        }

        // A numbering-properties marker anywhere below makes this a list item
        let is_list_item = node
            .descendants()
            .any(|n| n.has_tag_name((NS_WML, "numPr")));

        let mut body = String::new();
        for child in node.children().filter(|n| n.is_element()) {
            match BodyNode::classify(child) {
                BodyNode::Hyperlink => body.push_str(&self.hyperlink(child)),
                BodyNode::Table => body.push_str(&self.table(child, state, depth + 1)?),
                BodyNode::Run => {
                    body.push_str(&self.image(child, inline || is_list_item));
                    body.push_str(&self.text_run(child));
                }
                BodyNode::Drawing => body.push_str(&self.image(child, inline)),
                BodyNode::Text => body.push_str(&self.literal_text(child)),
                BodyNode::Paragraph => {
                    body.push_str(&self.paragraph(child, state, inline, depth + 1)?);
                }
                BodyNode::Bookmark => {}
                BodyNode::Unsupported => {}
            }
        }

        let body = normalize(&body);
        let plain = strip_tags(&body);
        let plain = plain.trim();

        // The run translator already drops matching runs, so a single-run
        // paragraph arrives here with an empty body; the exclusion check
        // looks at the text as it stood before that suppression.
        let raw: String = node
            .descendants()
            .filter(|n| n.has_tag_name((NS_WML, "t")))
            .filter_map(|n| n.text())
            .collect();
        let raw = normalize(&raw);
        let raw = raw.trim();

        // Suppressed content still drives the list bookkeeping below
        if self.exclude.contains(plain) || (!raw.is_empty() && self.exclude.contains(raw)) {
            if state.list_open {
                state.list_open = false;
                return Ok("</ul>".to_string());
            }
            return Ok(String::new());
        }

        // List transition comes before any heading classification
        if is_list_item && !body.is_empty() {
            if state.list_open {
                return Ok(format!("<li{}>{body}</li>", self.attrs("li")));
            }
            state.list_open = true;
            return Ok(format!(
                "<ul{}><li{}>{body}</li>",
                self.attrs("ul"),
                self.attrs("li")
            ));
        }
        let mut prefix = String::new();
        if state.list_open {
            prefix.push_str("</ul>");
            state.list_open = false;
        }

        if body.is_empty() {
            return Ok(format!("{prefix}{BR}"));
        }

        // Classification precedence: named style, explicit emphasis, size
        if let Some(tag) = named_heading(node) {
            return Ok(format!("{prefix}<{tag}{}>{body}</{tag}>", self.attrs(tag)));
        }

        let emphasis = paragraph_emphasis(node);
        if emphasis.any() {
            let mut wrapped = body;
            if emphasis.italic {
                wrapped = format!("<i{}>{wrapped}</i>", self.attrs("i"));
            }
            if emphasis.bold {
                wrapped = format!("<b{}>{wrapped}</b>", self.attrs("b"));
            }
            // The run translator underlines its own runs; only wrap here
            // when no run-level underline made it into the body
            if emphasis.underline && !wrapped.contains("<u>") && !wrapped.contains("<u ") {
                wrapped = format!("<u{}>{wrapped}</u>", self.attrs("u"));
            }
            return Ok(format!("{prefix}{}{wrapped}</p>", self.open_tag("p")));
        }

        // Sizes stay in half-points so 12.5pt is still inside a (12, 18)
        // window; dividing first would truncate it onto the boundary
        if let Some(half_points) = paragraph_font_size(node)
            && half_points > self.profile.size_heading_min * 2
            && half_points < self.profile.size_heading_max * 2
        {
            return Ok(format!("{prefix}{}{body}</h4>", self.open_tag("h4")));
        }

        Ok(format!("{prefix}{}{body}</p>", self.open_tag("p")))
    }
}

/// Named paragraph style -> heading tag.
fn named_heading(node: Node) -> Option<&'static str> {
    let style = wml(node, "pPr").and_then(|ppr| wml_val(ppr, "pStyle"))?;
    match style {
        "Heading2" => Some("h2"),
        "Heading3" => Some("h3"),
        "Heading4" => Some("h4"),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct Emphasis {
    bold: bool,
    italic: bool,
    underline: bool,
}

impl Emphasis {
    fn any(&self) -> bool {
        self.bold || self.italic || self.underline
    }
}

/// Run-level emphasis markers anywhere in the paragraph: the named `Strong`
/// and `Emphasis` character styles, plus an explicit underline property.
fn paragraph_emphasis(node: Node) -> Emphasis {
    let mut emphasis = Emphasis::default();
    for n in node
        .descendants()
        .filter(|n| n.tag_name().namespace() == Some(NS_WML))
    {
        match n.tag_name().name() {
            "rStyle" => match n.attribute((NS_WML, "val")) {
                Some("Strong") => emphasis.bold = true,
                Some("Emphasis") => emphasis.italic = true,
                _ => {}
            },
            "u" => {
                if n.attribute((NS_WML, "val"))
                    .is_none_or(|v| v != "none" && v != "0")
                {
                    emphasis.underline = true;
                }
            }
            _ => {}
        }
    }
    emphasis
}

/// Explicit font size from the paragraph's run properties, in the schema's
/// half-point units.
fn paragraph_font_size(node: Node) -> Option<u32> {
    wml(node, "pPr")
        .and_then(|ppr| wml(ppr, "rPr"))
        .and_then(|rpr| wml(rpr, "sz"))
        .and_then(|sz| sz.attribute((NS_WML, "val")))
        .and_then(|v| v.parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{Fixture, doc_xml};
    use super::*;

    fn paragraph_html(fixture: &Fixture, xml_body: &str, state: &mut RenderState) -> String {
        let xml = doc_xml(xml_body);
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let p = doc
            .descendants()
            .find(|n| n.has_tag_name((NS_WML, "p")))
            .unwrap();
        fixture.renderer().paragraph(p, state, false, 0).unwrap()
    }

    fn render_one(xml_body: &str) -> String {
        let fixture = Fixture::new();
        let mut state = RenderState::default();
        paragraph_html(&fixture, xml_body, &mut state)
    }

    #[test]
    fn test_plain_paragraph() {
        let html = render_one("<w:p><w:r><w:t>hello</w:t></w:r></w:p>");
        assert_eq!(html, "<p style=\"text-align: justify;\">hello</p>");
    }

    #[test]
    fn test_named_heading_beats_font_size() {
        let html = render_one(
            "<w:p><w:pPr><w:pStyle w:val=\"Heading2\"/><w:rPr><w:sz w:val=\"28\"/></w:rPr></w:pPr>\
             <w:r><w:t>Title</w:t></w:r></w:p>",
        );
        assert!(html.starts_with("<h2 "), "got: {html}");
        assert!(html.ends_with(">Title</h2>"), "got: {html}");
    }

    #[test]
    fn test_font_size_between_bounds_is_h4() {
        // 28 half-points = 14pt, inside (12, 18)
        let html = render_one(
            "<w:p><w:pPr><w:rPr><w:sz w:val=\"28\"/></w:rPr></w:pPr>\
             <w:r><w:t>Subhead</w:t></w:r></w:p>",
        );
        assert!(html.starts_with("<h4 "), "got: {html}");
    }

    #[test]
    fn test_odd_half_point_size_is_h4() {
        // 25 half-points = 12.5pt, just inside the lower bound
        let html = render_one(
            "<w:p><w:pPr><w:rPr><w:sz w:val=\"25\"/></w:rPr></w:pPr>\
             <w:r><w:t>x</w:t></w:r></w:p>",
        );
        assert!(html.starts_with("<h4 "), "got: {html}");
    }

    #[test]
    fn test_font_size_bounds_are_exclusive() {
        // 24 half-points = 12pt, not strictly greater than the lower bound
        let html = render_one(
            "<w:p><w:pPr><w:rPr><w:sz w:val=\"24\"/></w:rPr></w:pPr>\
             <w:r><w:t>body</w:t></w:r></w:p>",
        );
        assert!(html.starts_with("<p "), "got: {html}");
    }

    #[test]
    fn test_strong_and_emphasis_styles_combine() {
        let html = render_one(
            "<w:p><w:r><w:rPr><w:rStyle w:val=\"Strong\"/></w:rPr><w:t>both</w:t></w:r>\
             <w:r><w:rPr><w:rStyle w:val=\"Emphasis\"/></w:rPr><w:t></w:t></w:r></w:p>",
        );
        assert!(html.contains("<b><i>"), "got: {html}");
        assert!(html.contains("</i></b>"), "got: {html}");
    }

    #[test]
    fn test_empty_paragraph_is_break() {
        let html = render_one("<w:p><w:r><w:t></w:t></w:r></w:p>");
        assert_eq!(html, BR);
    }

    #[test]
    fn test_consecutive_list_items_share_one_ul() {
        let fixture = Fixture::new();
        let mut state = RenderState::default();
        let item = |text: &str| {
            format!(
                "<w:p><w:pPr><w:numPr><w:ilvl w:val=\"0\"/></w:numPr></w:pPr>\
                 <w:r><w:t>{text}</w:t></w:r></w:p>"
            )
        };
        let first = paragraph_html(&fixture, &item("A"), &mut state);
        let second = paragraph_html(&fixture, &item("B"), &mut state);
        let after = paragraph_html(&fixture, "<w:p><w:r><w:t>done</w:t></w:r></w:p>", &mut state);

        assert!(first.starts_with("<ul "), "got: {first}");
        assert!(first.ends_with("<li>A</li>"), "got: {first}");
        assert_eq!(second, "<li>B</li>");
        assert!(after.starts_with("</ul><p "), "got: {after}");
        assert!(!state.list_open);
    }

    #[test]
    fn test_excluded_paragraph_closes_open_list() {
        let mut fixture = Fixture::new();
        fixture.exclude.insert("Table of Contents".to_string());
        let mut state = RenderState { list_open: true };
        let html = paragraph_html(
            &fixture,
            "<w:p><w:r><w:t>Table of Contents</w:t></w:r></w:p>",
            &mut state,
        );
        assert_eq!(html, "</ul>");
        assert!(!state.list_open);
    }

    #[test]
    fn test_excluded_paragraph_renders_nothing() {
        let mut fixture = Fixture::new();
        fixture.exclude.insert("boilerplate".to_string());
        let mut state = RenderState::default();
        let html = paragraph_html(
            &fixture,
            "<w:p><w:r><w:t>boilerplate</w:t></w:r></w:p>",
            &mut state,
        );
        assert_eq!(html, "");
    }

    #[test]
    fn test_underline_property_wraps_paragraph() {
        let html = render_one(
            "<w:p><w:r><w:rPr><w:u w:val=\"single\"/></w:rPr><w:t>uh</w:t></w:r></w:p>",
        );
        // The run translator underlines the run; the paragraph keeps the
        // emphasis classification but must not wrap a second time
        assert!(html.starts_with("<p "), "got: {html}");
        assert_eq!(html.matches("<u>").count(), 1, "got: {html}");
    }

    #[test]
    fn test_paragraph_mark_underline_wraps_once() {
        // w:u on the paragraph mark only, no run-level underline
        let html = render_one(
            "<w:p><w:pPr><w:rPr><w:u w:val=\"single\"/></w:rPr></w:pPr>\
             <w:r><w:t>uh</w:t></w:r></w:p>",
        );
        assert_eq!(html.matches("<u>").count(), 1, "got: {html}");
        assert!(html.contains("<u>uh</u>"), "got: {html}");
    }
}
