//! Structural cleanup over the assembled output.

use super::BR;

const HEADING_OPENS: [&str; 4] = ["<h1", "<h2", "<h3", "<h4"];
const HEADING_CLOSES: [&str; 4] = ["</h1>", "</h2>", "</h3>", "</h4>"];

/// Collapse and prune break markers in the assembled fragment.
///
/// - runs of consecutive `<br/>` collapse to one;
/// - a break at the very start of the document is dropped;
/// - breaks immediately before a table or heading are dropped;
/// - breaks immediately after a heading's closing tag are dropped.
///
/// Headings and tables already carry their own margins, so the breaks around
/// them are noise. The pass is idempotent: running it twice is a no-op.
pub(crate) fn filter_content(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find(BR) {
        out.push_str(&rest[..pos]);
        let mut end = pos + BR.len();
        while rest[end..].starts_with(BR) {
            end += BR.len();
        }
        rest = &rest[end..];

        let keep = !out.is_empty()
            && !HEADING_CLOSES.iter().any(|tag| out.ends_with(tag))
            && !rest.starts_with("<table")
            && !HEADING_OPENS.iter().any(|tag| rest.starts_with(tag));
        if keep {
            out.push_str(BR);
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_collapses_break_runs() {
        assert_eq!(
            filter_content("<p>a</p><br/><br/><br/><p>b</p>"),
            "<p>a</p><br/><p>b</p>"
        );
    }

    #[test]
    fn test_drops_leading_break() {
        assert_eq!(filter_content("<br/><p>a</p>"), "<p>a</p>");
        assert_eq!(filter_content("<br/><br/>"), "");
    }

    #[test]
    fn test_drops_break_before_table() {
        assert_eq!(
            filter_content("<p>a</p><br/><table border=\"1\"></table>"),
            "<p>a</p><table border=\"1\"></table>"
        );
    }

    #[test]
    fn test_drops_breaks_around_headings() {
        assert_eq!(
            filter_content("<p>a</p><br/><h2>t</h2><br/><p>b</p>"),
            "<p>a</p><h2>t</h2><p>b</p>"
        );
        assert_eq!(
            filter_content("<p>a</p><br/><h4 style=\"x\">t</h4>"),
            "<p>a</p><h4 style=\"x\">t</h4>"
        );
    }

    #[test]
    fn test_keeps_breaks_between_paragraphs() {
        let html = "<p>a</p><br/><p>b</p>";
        assert_eq!(filter_content(html), html);
    }

    #[test]
    fn test_idempotent_on_fixed_input() {
        let once = filter_content("<br/><br/><p>a</p><br/><br/><h3>t</h3><br/><br/>");
        assert_eq!(filter_content(&once), once);
    }

    proptest! {
        /// Applying the filter twice is the same as applying it once, for
        /// any sequence drawn from the output grammar.
        #[test]
        fn prop_filter_idempotent(tokens in proptest::collection::vec(
            prop_oneof![
                Just("<br/>"),
                Just("<p>x</p>"),
                Just("<h2>t</h2>"),
                Just("<h4 style=\"s\">t</h4>"),
                Just("<table border=\"1\"><tr><td>c</td></tr></table>"),
                Just("<ul><li>i</li></ul>"),
                Just("text"),
            ],
            0..24,
        )) {
            let html = tokens.concat();
            let once = filter_content(&html);
            let twice = filter_content(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
