//! The document-tree-to-HTML transformation engine.
//!
//! [`Renderer`] walks the body element tree depth-first, dispatching each
//! node to a translator by kind and accumulating a flat markup string.
//! [`RenderState`] is the single piece of cross-sibling memory (whether a
//! `<ul>` is currently open) and is threaded explicitly through every
//! sibling-processing call, so the walker stays reentrant and each node can
//! be rendered in isolation in tests.

mod filter;
mod image;
mod inline;
mod paragraph;
mod table;

pub(crate) use filter::filter_content;

use std::collections::HashSet;

use roxmltree::Node;

use crate::config::HeuristicProfile;
use crate::error::Result;
use crate::rels::ResourceIndex;
use crate::style::StyleSheet;
use crate::text::{escape_text, normalize};

pub(crate) const NS_WML: &str =
    "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const NS_DML: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const NS_PIC: &str =
    "http://schemas.openxmlformats.org/drawingml/2006/picture";
pub(crate) const NS_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const NS_WPD: &str =
    "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
pub(crate) const NS_VML: &str = "urn:schemas-microsoft-com:vml";

/// Line-break marker used throughout the output grammar.
pub(crate) const BR: &str = "<br/>";

/// Recursion guard: paragraphs inside cells inside nested tables.
/// Exceeding this fails the document with `DocumentTooComplex` instead of
/// exhausting the call stack.
pub(crate) const MAX_DEPTH: usize = 64;

/// Cross-sibling rendering memory, owned by a single traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RenderState {
    /// A `<ul>` has been opened and not yet closed.
    pub(crate) list_open: bool,
}

/// The closed set of body-level node kinds.
///
/// Dispatch matches on this exhaustively, so a newly handled kind is a
/// compile-visible change rather than a silent default branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyNode {
    Paragraph,
    Table,
    Run,
    Drawing,
    Hyperlink,
    Bookmark,
    /// Literal `w:t` appearing directly among the children.
    Text,
    /// Properties, section breaks, proofing marks: no rendered output.
    Unsupported,
}

impl BodyNode {
    pub(crate) fn classify(node: Node) -> Self {
        if node.tag_name().namespace() != Some(NS_WML) {
            return BodyNode::Unsupported;
        }
        match node.tag_name().name() {
            "p" => BodyNode::Paragraph,
            "tbl" => BodyNode::Table,
            "r" => BodyNode::Run,
            "drawing" => BodyNode::Drawing,
            "hyperlink" => BodyNode::Hyperlink,
            "bookmarkStart" | "bookmarkEnd" => BodyNode::Bookmark,
            "t" => BodyNode::Text,
            _ => BodyNode::Unsupported,
        }
    }
}

/// Find a direct child in the word-processing namespace.
pub(crate) fn wml<'a>(node: Node<'a, 'a>, name: &str) -> Option<Node<'a, 'a>> {
    node.children().find(|n| n.has_tag_name((NS_WML, name)))
}

/// `w:val` of a direct child, e.g. `pPr/pStyle@w:val`.
pub(crate) fn wml_val<'a>(node: Node<'a, 'a>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((NS_WML, "val")))
}

/// A word-processing toggle property (`w:b`, `w:i`): present means on unless
/// the value explicitly turns it off.
pub(crate) fn wml_toggle(parent: Node, name: &str) -> bool {
    wml(parent, name).is_some_and(|n| {
        n.attribute((NS_WML, "val"))
            .is_none_or(|v| v != "0" && v != "false")
    })
}

/// Per-document rendering context: read-only configuration plus the
/// relationship index. Mutable traversal state never lives here.
pub(crate) struct Renderer<'a> {
    pub(crate) resources: &'a ResourceIndex,
    pub(crate) styles: &'a StyleSheet,
    pub(crate) exclude: &'a HashSet<String>,
    pub(crate) profile: &'a HeuristicProfile,
    /// Prefix for internal image `src` attributes, with trailing slash.
    pub(crate) image_prefix: &'a str,
}

impl Renderer<'_> {
    /// Attribute suffix for a tag, honoring the profile's `styled` flag.
    pub(crate) fn attrs(&self, tag: &str) -> String {
        if self.profile.styled {
            self.styles.attr_suffix(tag)
        } else {
            String::new()
        }
    }

    pub(crate) fn open_tag(&self, tag: &str) -> String {
        format!("<{}{}>", tag, self.attrs(tag))
    }

    /// A literal `w:t` outside any run.
    pub(crate) fn literal_text(&self, node: Node) -> String {
        escape_text(&normalize(node.text().unwrap_or_default()))
    }

    /// Walk the body's direct children in document order, then run the
    /// cleanup pass over the accumulated output.
    pub(crate) fn render_body(&self, body: Node) -> Result<String> {
        let mut html = String::new();
        let mut state = RenderState::default();

        for child in body.children().filter(|n| n.is_element()) {
            match BodyNode::classify(child) {
                BodyNode::Paragraph => {
                    html.push_str(&self.paragraph(child, &mut state, false, 0)?);
                }
                BodyNode::Table => html.push_str(&self.table(child, &mut state, 0)?),
                BodyNode::Hyperlink => html.push_str(&self.hyperlink(child)),
                BodyNode::Run => {
                    html.push_str(&self.image(child, false));
                    html.push_str(&self.text_run(child));
                }
                BodyNode::Drawing => html.push_str(&self.image(child, false)),
                BodyNode::Text => html.push_str(&self.literal_text(child)),
                // Bookmarks are position markers with no visible output
                BodyNode::Bookmark => {}
                BodyNode::Unsupported => {}
            }
        }

        // End of siblings closes a still-open list
        if state.list_open {
            html.push_str("</ul>");
        }

        Ok(filter_content(&html))
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;

    pub(crate) struct Fixture {
        pub(crate) resources: ResourceIndex,
        pub(crate) styles: StyleSheet,
        pub(crate) exclude: HashSet<String>,
        pub(crate) profile: HeuristicProfile,
    }

    impl Fixture {
        pub(crate) fn new() -> Self {
            Self {
                resources: ResourceIndex::new(),
                styles: StyleSheet::default(),
                exclude: HashSet::new(),
                profile: HeuristicProfile::default(),
            }
        }

        pub(crate) fn renderer(&self) -> Renderer<'_> {
            Renderer {
                resources: &self.resources,
                styles: &self.styles,
                exclude: &self.exclude,
                profile: &self.profile,
                image_prefix: "images/",
            }
        }
    }

    /// Wrap a body fragment in a document element with the schema namespaces.
    pub(crate) fn doc_xml(body: &str) -> String {
        format!(
            concat!(
                "<w:document",
                " xmlns:w=\"{}\"",
                " xmlns:a=\"{}\"",
                " xmlns:pic=\"{}\"",
                " xmlns:r=\"{}\"",
                " xmlns:wp=\"{}\"",
                " xmlns:v=\"{}\">",
                "<w:body>{}</w:body></w:document>"
            ),
            NS_WML, NS_DML, NS_PIC, NS_REL, NS_WPD, NS_VML, body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::testutil::{Fixture, doc_xml};
    use super::*;

    fn render(body: &str) -> String {
        let fixture = Fixture::new();
        let xml = doc_xml(body);
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let body = doc
            .root_element()
            .children()
            .find(|n| n.has_tag_name((NS_WML, "body")))
            .unwrap();
        fixture.renderer().render_body(body).unwrap()
    }

    #[test]
    fn test_classify_body_nodes() {
        let xml = doc_xml("<w:p/><w:tbl/><w:r/><w:drawing/><w:hyperlink/><w:bookmarkStart/><w:sectPr/>");
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let kinds: Vec<_> = doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() != "document")
            .filter(|n| n.tag_name().name() != "body")
            .map(BodyNode::classify)
            .collect();
        assert_eq!(
            kinds,
            vec![
                BodyNode::Paragraph,
                BodyNode::Table,
                BodyNode::Run,
                BodyNode::Drawing,
                BodyNode::Hyperlink,
                BodyNode::Bookmark,
                BodyNode::Unsupported,
            ]
        );
    }

    #[test]
    fn test_list_closed_at_end_of_body() {
        let item = "<w:p><w:pPr><w:numPr><w:ilvl w:val=\"0\"/></w:numPr></w:pPr><w:r><w:t>last</w:t></w:r></w:p>";
        let html = render(item);
        assert!(html.ends_with("</li></ul>"), "got: {html}");
    }

    #[test]
    fn test_bookmarks_render_nothing() {
        let html = render("<w:bookmarkStart w:id=\"0\" w:name=\"_Ref1\"/><w:bookmarkEnd w:id=\"0\"/>");
        assert_eq!(html, "");
    }

    #[test]
    fn test_wml_toggle_off_values() {
        let xml = doc_xml("<w:p><w:r><w:rPr><w:b w:val=\"0\"/><w:i/></w:rPr></w:r></w:p>");
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let rpr = doc
            .descendants()
            .find(|n| n.has_tag_name((NS_WML, "rPr")))
            .unwrap();
        assert!(!wml_toggle(rpr, "b"));
        assert!(wml_toggle(rpr, "i"));
        assert!(!wml_toggle(rpr, "u"));
    }
}
