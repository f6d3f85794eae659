//! Table translation: rows, cell merges, and the empty-row elision rules.

use roxmltree::Node;

use crate::error::{Error, Result};
use crate::text::strip_tags;

use super::{BR, BodyNode, MAX_DEPTH, NS_WML, Renderer, RenderState, wml};

impl Renderer<'_> {
    /// Render a table node.
    ///
    /// An open list is closed before the table opens, so `<ul>` never spans
    /// into a row. Cell content runs against a cell-local [`RenderState`].
    pub(crate) fn table(
        &self,
        node: Node,
        state: &mut RenderState,
        depth: usize,
    ) -> Result<String> {
        if depth >= MAX_DEPTH {
            return Err(Error::DocumentTooComplex);
        }

        let mut out = String::new();
        if state.list_open {
            out.push_str("</ul>");
            state.list_open = false;
        }
        out.push_str(&format!("<table{}>", self.attrs("table")));

        for table_row in node.children().filter(|n| n.has_tag_name((NS_WML, "tr"))) {
            let mut row = format!("<tr{}>", self.attrs("tr"));
            let mut cell_count = 0usize;

            for table_cell in table_row
                .children()
                .filter(|n| n.has_tag_name((NS_WML, "tc")))
            {
                cell_count += 1;
                match grid_span(table_cell) {
                    Some(merge) => {
                        row.push_str(&format!("<td colspan='{merge}'{}>", self.attrs("td")));
                    }
                    None => row.push_str(&format!("<td{}>", self.attrs("td"))),
                }

                let mut cell = String::new();
                let mut cell_state = RenderState::default();
                for element in table_cell.children().filter(|n| n.is_element()) {
                    match BodyNode::classify(element) {
                        BodyNode::Table => {
                            cell.push_str(&self.table(element, &mut cell_state, depth + 1)?);
                        }
                        BodyNode::Run => {
                            cell.push_str(&self.image(element, true));
                            cell.push_str(&self.text_run(element));
                        }
                        BodyNode::Paragraph => {
                            cell.push_str(&self.paragraph(
                                element,
                                &mut cell_state,
                                true,
                                depth + 1,
                            )?);
                        }
                        BodyNode::Hyperlink => cell.push_str(&self.hyperlink(element)),
                        BodyNode::Drawing => cell.push_str(&self.image(element, true)),
                        BodyNode::Text => cell.push_str(&self.literal_text(element)),
                        // tcPr and markers
                        BodyNode::Bookmark => {}
                        BodyNode::Unsupported => {}
                    }
                }
                if cell_state.list_open {
                    cell.push_str("</ul>");
                }

                // A blank first line in a cell is cosmetic noise
                row.push_str(cell.strip_prefix(BR).unwrap_or(&cell));
                row.push_str("</td>");
            }
            row.push_str("</tr>");

            let plain = strip_tags(&row);
            let plain = plain.trim();
            let image_count = row.matches("<img").count();

            if plain.is_empty() && cell_count == 1 && image_count == 1 {
                // Lone image in an otherwise empty row: keep it, centered
                let centered = row
                    .replace(BR, "")
                    .replacen("<p", "<p style='text-align: center;'", 1);
                out.push_str(&centered);
            } else if !plain.is_empty() || image_count > 0 {
                out.push_str(&row);
            }
            // Rows with no text and no image are dropped
        }

        out.push_str("</table>");
        out.push_str(BR);
        Ok(out)
    }
}

/// Horizontal merge count from `w:tcPr/w:gridSpan@w:val`, when present and
/// greater than zero.
fn grid_span(cell: Node) -> Option<u32> {
    wml(cell, "tcPr")
        .and_then(|props| wml(props, "gridSpan"))
        .and_then(|span| span.attribute((NS_WML, "val")))
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|&merge| merge > 0)
}
