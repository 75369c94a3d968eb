//! Canonical ordering of XML doc comment elements
//!
//! A comment body is read as a flat run of top-level elements and XML
//! comments. Elements are stably sorted by the rank of their tag name, and
//! every XML comment stays glued to the element that followed it.

use std::ops::Range;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// Canonical tag order used when none is configured.
pub const DEFAULT_TAG_ORDER: &[&str] = &[
    "summary",
    "typeparam",
    "param",
    "returns",
    "value",
    "exception",
    "remarks",
    "example",
    "seealso",
];

/// Name of the synthetic element wrapped around a body while parsing.
const PARSE_ROOT: &str = "root";

/// Ranked list of tag names.
///
/// Tags earlier in the list sort first. Tags not in the list all share the
/// lowest rank, equal to the list length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOrder {
    tags: Vec<String>,
}

impl Default for TagOrder {
    fn default() -> Self {
        Self::new(DEFAULT_TAG_ORDER.iter().copied())
    }
}

impl TagOrder {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Rank of `tag`; the first occurrence wins for duplicated list entries.
    pub fn rank(&self, tag: &str) -> usize {
        self.tags
            .iter()
            .position(|t| t == tag)
            .unwrap_or(self.tags.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Element { name: String },
    Annotation,
}

/// A top-level node and its byte span in the wrapped body.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    kind: NodeKind,
    span: Range<usize>,
}

/// An element together with the annotations that directly preceded it.
struct Group {
    rank: usize,
    index: usize,
    annotations: Vec<usize>,
    element: usize,
}

/// Reorder the elements of a comment body by `order`.
///
/// Each element and annotation is emitted exactly as written, one per line,
/// and trailing whitespace is trimmed from the result. Annotations after the
/// last element keep their place at the end.
pub fn reorder_tags(order: &TagOrder, body: &str) -> Result<String> {
    let wrapped = format!("<{PARSE_ROOT}>\n{body}\n</{PARSE_ROOT}>");
    let nodes = parse_fragment(&wrapped)?;

    let mut groups = Vec::new();
    let mut pending = Vec::new();
    for (position, node) in nodes.iter().enumerate() {
        match &node.kind {
            NodeKind::Annotation => pending.push(position),
            NodeKind::Element { name } => groups.push(Group {
                rank: order.rank(name),
                index: groups.len(),
                annotations: std::mem::take(&mut pending),
                element: position,
            }),
        }
    }
    let trailing = pending;

    groups.sort_by_key(|g| (g.rank, g.index));

    let emit_order = groups
        .iter()
        .flat_map(|g| g.annotations.iter().copied().chain(std::iter::once(g.element)))
        .chain(trailing);

    let fragments: Vec<&str> = emit_order
        .filter_map(|position| nodes.get(position))
        .map(|node| &wrapped[node.span.clone()])
        .collect();

    Ok(fragments.join("\n").trim_end().to_string())
}

/// Scan the top level of `wrapped` into elements and annotations.
fn parse_fragment(wrapped: &str) -> Result<Vec<Node>> {
    let mut reader = Reader::from_str(wrapped);
    let mut nodes = Vec::new();
    let mut depth = 0usize;
    let mut open: Option<(usize, String)> = None;
    let mut root_closed = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::tag_parse(format!("{e} (near byte {})", reader.error_position()))
        })?;
        let end = offset(&reader)?;

        match event {
            Event::Eof => break,
            Event::Start(tag) => {
                check_attributes(&tag)?;
                if root_closed {
                    return Err(Error::tag_parse("unexpected element after the comment body"));
                }
                if depth == 1 {
                    open = Some((tag_start(end, tag.len() + 2)?, local_name(&tag)));
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::tag_parse("unbalanced closing tag"))?;
                match depth {
                    1 => {
                        let (start, name) = open
                            .take()
                            .ok_or_else(|| Error::tag_parse("closing tag without opening tag"))?;
                        nodes.push(Node {
                            kind: NodeKind::Element { name },
                            span: start..end,
                        });
                    }
                    0 => root_closed = true,
                    _ => {}
                }
            }
            Event::Empty(tag) => {
                check_attributes(&tag)?;
                if depth != 1 {
                    if depth == 0 {
                        return Err(Error::tag_parse("unexpected element after the comment body"));
                    }
                    continue;
                }
                nodes.push(Node {
                    kind: NodeKind::Element {
                        name: local_name(&tag),
                    },
                    span: tag_start(end, tag.len() + 3)?..end,
                });
            }
            Event::Comment(text) => {
                if depth == 1 {
                    nodes.push(Node {
                        kind: NodeKind::Annotation,
                        span: tag_start(end, text.len() + 7)?..end,
                    });
                }
            }
            Event::Text(text) => {
                if depth <= 1 && !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(Error::tag_parse(
                        "text outside of any element cannot be reordered",
                    ));
                }
            }
            _ => {
                if depth <= 1 {
                    return Err(Error::tag_parse(
                        "only elements and comments are allowed at the top level",
                    ));
                }
            }
        }
    }

    if depth != 0 {
        return Err(Error::tag_parse("unclosed element in comment body"));
    }

    Ok(nodes)
}

/// Reader position after the last event.
fn offset(reader: &Reader<&[u8]>) -> Result<usize> {
    usize::try_from(reader.buffer_position())
        .map_err(|_| Error::tag_parse("comment body too large"))
}

/// Start of a markup token of `token_len` bytes ending at `end`.
fn tag_start(end: usize, token_len: usize) -> Result<usize> {
    end.checked_sub(token_len)
        .ok_or_else(|| Error::tag_parse("markup token out of range"))
}

fn local_name(tag: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(tag.name().local_name().as_ref()).into_owned()
}

fn check_attributes(tag: &BytesStart<'_>) -> Result<()> {
    for attribute in tag.attributes() {
        attribute.map_err(|e| Error::tag_parse(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn order(tags: &[&str]) -> TagOrder {
        TagOrder::new(tags.iter().copied())
    }

    #[test]
    fn test_rank_of_unknown_tag_is_list_length() {
        let order = order(&["summary", "param"]);

        assert_eq!(order.rank("summary"), 0);
        assert_eq!(order.rank("param"), 1);
        assert_eq!(order.rank("remarks"), 2);
    }

    #[test]
    fn test_default_order_starts_with_summary() {
        assert_eq!(TagOrder::default().tags()[0], "summary");
        assert_eq!(TagOrder::default().rank("remarks"), 6);
    }

    #[test]
    fn test_reorders_inline_elements() {
        let body = r#"<summary>S</summary><returns>R</returns><param name="x">P</param>"#;

        let reordered = reorder_tags(&order(&["summary", "param", "returns"]), body).unwrap();

        assert_eq!(
            reordered,
            "<summary>S</summary>\n<param name=\"x\">P</param>\n<returns>R</returns>"
        );
    }

    #[test]
    fn test_full_comment_with_annotations() {
        let body = r#"<summary>
Loads the data structures in a referenced assembly.
</summary>
<param name="asm">The Uri of the assembly to load.</param>
<remarks>
Generates diagnostics if <paramref name="asm"/> could not be found.
</remarks>
<exception cref="ArgumentException">Something bad happened.</exception>
<param name="onDiagnostic">Called on all generated diagnostics.</param>
<!-- this next param is cool! -->
<param name="onException">Called with any exceptions thrown.</param>
<returns>Something cool.</returns>
<!-- this is a trailing comment -->
"#;
        let expected = r#"<summary>
Loads the data structures in a referenced assembly.
</summary>
<param name="asm">The Uri of the assembly to load.</param>
<param name="onDiagnostic">Called on all generated diagnostics.</param>
<!-- this next param is cool! -->
<param name="onException">Called with any exceptions thrown.</param>
<returns>Something cool.</returns>
<exception cref="ArgumentException">Something bad happened.</exception>
<remarks>
Generates diagnostics if <paramref name="asm"/> could not be found.
</remarks>
<!-- this is a trailing comment -->"#;

        let reordered = reorder_tags(&TagOrder::default(), body).unwrap();

        assert_eq!(reordered, expected);
    }

    #[test]
    fn test_trailing_comment_after_single_element() {
        let body = "<summary>\nLoads things.\n</summary>\n<!-- TODO: testing -->\n";

        let reordered = reorder_tags(&TagOrder::default(), body).unwrap();

        assert_eq!(reordered, "<summary>\nLoads things.\n</summary>\n<!-- TODO: testing -->");
    }

    #[test]
    fn test_annotation_only_body_is_unchanged() {
        let reordered = reorder_tags(&TagOrder::default(), "<!-- note -->").unwrap();

        assert_eq!(reordered, "<!-- note -->");
    }

    #[test]
    fn test_annotation_moves_with_its_element() {
        let body = "<remarks>R</remarks>\n<!-- about summary -->\n<summary>S</summary>";

        let reordered = reorder_tags(&TagOrder::default(), body).unwrap();

        assert_eq!(
            reordered,
            "<!-- about summary -->\n<summary>S</summary>\n<remarks>R</remarks>"
        );
    }

    #[test]
    fn test_identical_annotations_are_not_conflated() {
        let body = "<!-- same -->\n<remarks>R</remarks>\n<!-- same -->\n<summary>S</summary>\n<!-- same -->";

        let reordered = reorder_tags(&TagOrder::default(), body).unwrap();

        assert_eq!(
            reordered,
            "<!-- same -->\n<summary>S</summary>\n<!-- same -->\n<remarks>R</remarks>\n<!-- same -->"
        );
    }

    #[test]
    fn test_nested_markup_is_kept_verbatim() {
        let body = "<remarks>See <see cref=\"A\" />  and <c>b</c>.</remarks>\n<summary>S <!-- inner --></summary>";

        let reordered = reorder_tags(&TagOrder::default(), body).unwrap();

        assert_eq!(
            reordered,
            "<summary>S <!-- inner --></summary>\n<remarks>See <see cref=\"A\" />  and <c>b</c>.</remarks>"
        );
    }

    #[test]
    fn test_self_closing_elements_are_ranked() {
        let body = "<seealso cref=\"B\"/>\n<inheritdoc />";

        let reordered = reorder_tags(&TagOrder::default(), body).unwrap();

        assert_eq!(reordered, "<seealso cref=\"B\"/>\n<inheritdoc />");
    }

    #[rstest]
    #[case::unclosed("<summary>S")]
    #[case::mismatched("<summary>S</remarks>")]
    #[case::stray_text("loose prose <summary>S</summary>")]
    #[case::stray_non_ascii_text("<summary>S</summary> été")]
    #[case::stray_close("<summary>S</summary></root><extra/>")]
    #[case::cdata("<![CDATA[x]]><summary>S</summary>")]
    #[case::bad_attribute("<param name=x>P</param>")]
    fn test_malformed_bodies_fail(#[case] body: &str) {
        let result = reorder_tags(&TagOrder::default(), body);

        assert!(
            matches!(result, Err(Error::TagParse { .. })),
            "expected TagParse for {body:?}, got {result:?}"
        );
    }

    #[test]
    fn test_whitespace_between_elements_is_dropped() {
        let body = "<returns>R</returns>\t\r\n  <summary>S</summary>\n\n";

        let reordered = reorder_tags(&TagOrder::default(), body).unwrap();

        assert_eq!(reordered, "<summary>S</summary>\n<returns>R</returns>");
    }

    #[test]
    fn test_parse_root_never_leaks() {
        let reordered = reorder_tags(&TagOrder::default(), "<summary>S</summary>").unwrap();

        assert!(!reordered.contains(PARSE_ROOT));
    }

    fn element_body() -> impl Strategy<Value = (Vec<String>, String)> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["summary", "param", "returns", "remarks", "foo", "bar"]),
                prop::bool::weighted(0.3),
            ),
            0..10,
        )
        .prop_map(|items| {
            let mut labels = Vec::new();
            let mut body = String::new();
            for (index, (tag, annotated)) in items.into_iter().enumerate() {
                if annotated {
                    body.push_str(&format!("<!-- note {index} -->\n"));
                }
                let label = format!("{tag}{index}");
                body.push_str(&format!("<{tag}>{label}</{tag}>\n"));
                labels.push(label);
            }
            (labels, body)
        })
    }

    proptest! {
        #[test]
        fn test_reordering_is_idempotent((_, body) in element_body()) {
            let order = order(&["summary", "param", "returns"]);
            let once = reorder_tags(&order, &body).unwrap();
            let twice = reorder_tags(&order, &once).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_equal_ranks_keep_document_order((labels, body) in element_body()) {
            let order = order(&["summary", "param", "returns"]);
            let reordered = reorder_tags(&order, &body).unwrap();

            for tag in ["summary", "param", "returns", "remarks", "foo", "bar"] {
                let input: Vec<&String> = labels.iter().filter(|l| l.starts_with(tag)).collect();
                let positions: Vec<usize> = input
                    .iter()
                    .map(|l| reordered.find(&format!(">{l}<")).unwrap())
                    .collect();
                prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }

            // Unranked tags share one rank, so they keep their relative order too.
            let unranked: Vec<usize> = labels
                .iter()
                .filter(|l| l.starts_with("remarks") || l.starts_with("foo") || l.starts_with("bar"))
                .map(|l| reordered.find(&format!(">{l}<")).unwrap())
                .collect();
            prop_assert!(unranked.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn test_annotations_stay_before_their_element((_, body) in element_body()) {
            let reordered = reorder_tags(&order(&["summary", "param", "returns"]), &body).unwrap();
            let lines: Vec<&str> = reordered.lines().collect();

            for (position, line) in lines.iter().enumerate() {
                if let Some(rest) = line.strip_prefix("<!-- note ") {
                    let index = rest.trim_end_matches(" -->");
                    let label = lines[position + 1]
                        .split('>')
                        .nth(1)
                        .and_then(|s| s.split('<').next())
                        .unwrap();
                    prop_assert_eq!(label.trim_start_matches(char::is_alphabetic), index);
                }
            }
        }
    }
}
