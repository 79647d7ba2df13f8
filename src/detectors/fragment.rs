//! Fragment classification
//!
//! Decides whether selected text is a standalone JSX expression, and whether a
//! selection inside a file sits within markup. Every query here answers
//! `false` on parse errors instead of failing, so callers can use them to
//! decide whether to offer the extraction at all.

use tracing::debug;

use crate::lang::Lang;
use crate::syntax::{text_to_tree, wrap_fragment, NodeId, NodeKind, Position, SyntaxTree};

/// Check whether `text` is a markup expression.
///
/// Text that fails to parse is retried inside an anonymous `<>...</>` wrapper
/// so that sibling elements are accepted. Text that parses but is not markup
/// (a string literal, say) is not retried.
pub fn is_fragment(text: &str) -> bool {
    let tree = match text_to_tree(text, Lang::Tsx) {
        Ok(tree) => tree,
        Err(e) => {
            debug!("not a single expression ({}), retrying as fragment", e);
            match text_to_tree(&wrap_fragment(text), Lang::Tsx) {
                Ok(tree) => tree,
                Err(_) => return false,
            }
        }
    };
    is_markup_expression(&tree)
}

/// Stricter [`is_fragment`] without the wrapper retry, for callers that expect
/// a single root element
pub fn is_fragment_expression(text: &str) -> bool {
    text_to_tree(text, Lang::Tsx)
        .map(|tree| is_markup_expression(&tree))
        .unwrap_or(false)
}

/// Check whether the smallest node strictly containing `[start, end)` in
/// `source` is a markup expression.
///
/// Positions are zero-based lines and UTF-16 character columns, as editors
/// report them.
pub fn is_range_contained_in_fragment(source: &str, start: Position, end: Position) -> bool {
    is_range_contained_in_fragment_with(source, start, end, Lang::Tsx)
}

/// [`is_range_contained_in_fragment`] with an explicit grammar profile
pub fn is_range_contained_in_fragment_with(
    source: &str,
    start: Position,
    end: Position,
    lang: Lang,
) -> bool {
    if !lang.supports_jsx() {
        debug!(lang = lang.name(), "range check skipped: no markup in this profile");
        return false;
    }

    let tree = match text_to_tree(source, lang) {
        Ok(tree) => tree,
        Err(e) => {
            debug!(lang = lang.name(), "range check skipped: {}", e);
            return false;
        }
    };

    let start = tree.byte_position(start);
    let end = tree.byte_position(end);
    match find_container(&tree, start, end) {
        Some(container) => {
            debug!(kind = ?tree.kind(container), "container found");
            tree.kind(container).is_jsx_expression()
        }
        None => false,
    }
}

/// First node, in post-order exit order, whose span strictly contains the
/// range. Children exit before their parents, so the innermost one wins.
fn find_container(tree: &SyntaxTree, start: Position, end: Position) -> Option<NodeId> {
    tree.post_order(tree.root())
        .into_iter()
        .find(|id| tree.node(*id).span.strictly_contains(start, end))
}

fn is_markup_expression(tree: &SyntaxTree) -> bool {
    tree.single_expression()
        .map(|expression| matches!(tree.kind(expression), NodeKind::Jsx(kind) if kind.is_root()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_element_is_fragment() {
        assert!(is_fragment("<div>{foo}</div>"));
        assert!(is_fragment("\n        <div>{foo}</div>\n    "));
        assert!(is_fragment("<Input value={this.state.value} />"));
    }

    #[test]
    fn test_siblings_need_the_wrapper() {
        let siblings = "<h1>Title</h1><p className=\"body\">Body</p>";
        assert!(is_fragment(siblings));
        assert!(!is_fragment_expression(siblings));
        assert!(is_fragment("<Header /><Footer />"));
    }

    #[test]
    fn test_non_markup_is_rejected() {
        assert!(!is_fragment("\"hello\""));
        assert!(!is_fragment("foo + bar"));
        assert!(!is_fragment("const x = <div />;"));
        assert!(!is_fragment(""));
    }

    #[test]
    fn test_parenthesized_markup_is_expression() {
        assert!(is_fragment_expression("(<span>hi</span>)"));
    }

    #[test]
    fn test_range_inside_expression_container() {
        let source = "const x = <div>{y}</div>;";
        assert!(is_range_contained_in_fragment(
            source,
            Position::new(0, 16),
            Position::new(0, 17)
        ));
    }

    #[test]
    fn test_range_after_non_ascii_text() {
        // `y` is character 22 but byte 26
        let source = "const x = <p>{\"éééé\"}{y}</p>;";
        assert!(is_range_contained_in_fragment(
            source,
            Position::new(0, 22),
            Position::new(0, 23)
        ));
    }

    #[test]
    fn test_range_in_plain_typescript() {
        let source = "const x = <div>{y}</div>;";
        assert!(!is_range_contained_in_fragment_with(
            source,
            Position::new(0, 16),
            Position::new(0, 17),
            Lang::TypeScript
        ));
    }

    #[test]
    fn test_range_outside_markup() {
        let source = "const x = <div>{y}</div>;";
        assert!(!is_range_contained_in_fragment(
            source,
            Position::new(0, 6),
            Position::new(0, 7)
        ));
    }

    #[test]
    fn test_range_selecting_child_element() {
        let source = "function App() {\n  return (\n    <main>\n      <Header title={title} />\n    </main>\n  );\n}";
        assert!(is_range_contained_in_fragment(
            source,
            Position::new(3, 6),
            Position::new(3, 30)
        ));
    }

    #[test]
    fn test_range_check_swallows_parse_errors() {
        assert!(!is_range_contained_in_fragment(
            "const x = <div>{y}</div",
            Position::new(0, 16),
            Position::new(0, 17)
        ));
    }
}
