//! tree-sitter parsing and conversion into the arena tree

use tracing::debug;
use tree_sitter::{Node, Parser, TreeCursor};

use super::{FunctionKind, JsxKind, NodeId, NodeKind, Span, SyntaxNode, SyntaxTree};
use crate::error::{ExtractError, Result};
use crate::lang::Lang;

/// Parse a full source file.
///
/// tree-sitter always produces a tree; any error or missing node in it is
/// reported as a [`ExtractError::ParseFailure`].
pub fn text_to_tree(text: &str, lang: Lang) -> Result<SyntaxTree> {
    let mut parser = Parser::new();
    parser
        .set_language(&lang.tree_sitter_language())
        .map_err(|e| ExtractError::ParseFailure {
            message: format!("Failed to set language: {:?}", e),
        })?;

    let tree = parser
        .parse(text, None)
        .ok_or_else(|| ExtractError::ParseFailure {
            message: "Failed to parse source".to_string(),
        })?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(ExtractError::ParseFailure {
            message: describe_first_error(&root),
        });
    }

    let mut cursor = tree.walk();
    let converted = convert(text, &mut cursor);
    Ok(converted)
}

/// Parse a standalone markup fragment under the TSX profile.
///
/// Sibling elements (`<a /><b />`) are not a single expression, so a failed
/// parse is retried inside an anonymous `<>...</>` wrapper. The first error is
/// reported when both attempts fail.
pub fn fragment_text_to_tree(text: &str) -> Result<SyntaxTree> {
    match text_to_tree(text, Lang::Tsx) {
        Ok(tree) => Ok(tree),
        Err(first) => {
            debug!("fragment parse failed ({}), retrying with wrapper", first);
            text_to_tree(&wrap_fragment(text), Lang::Tsx).map_err(|_| first)
        }
    }
}

/// Wrap text in an anonymous markup fragment
pub fn wrap_fragment(text: &str) -> String {
    format!("<>{}</>", text)
}

fn describe_first_error(root: &Node) -> String {
    let mut cursor = root.walk();
    let mut stack = vec![*root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let at = node.start_position();
            return format!(
                "syntax error at line {}, column {} ({})",
                at.row + 1,
                at.column + 1,
                if node.is_missing() { "missing token" } else { "unexpected input" }
            );
        }
        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    "syntax error".to_string()
}

fn convert(source: &str, cursor: &mut TreeCursor) -> SyntaxTree {
    let mut builder = Builder {
        source,
        nodes: Vec::new(),
    };
    let root = builder.build(cursor, None, None);

    SyntaxTree {
        source: source.to_string(),
        nodes: builder.nodes,
        root,
    }
}

struct Builder<'a> {
    source: &'a str,
    nodes: Vec<SyntaxNode>,
}

impl Builder<'_> {
    fn build(
        &mut self,
        cursor: &mut TreeCursor,
        parent: Option<NodeId>,
        parent_kind: Option<&'static str>,
    ) -> NodeId {
        let node = cursor.node();
        let field = cursor.field_name();
        let id = NodeId(self.nodes.len());
        let kind = classify(&node, field, parent_kind, self.source);

        self.nodes.push(SyntaxNode {
            kind,
            span: Span {
                start_byte: node.start_byte(),
                end_byte: node.end_byte(),
                start: node.start_position().into(),
                end: node.end_position().into(),
            },
            field,
            parent,
            children: Vec::new(),
            synthetic: false,
        });

        if self.nodes[id.0].kind.is_leaf() || !cursor.goto_first_child() {
            return id;
        }

        let mut children = Vec::new();
        loop {
            if cursor.node().is_named() {
                children.push(self.build(cursor, Some(id), Some(node.kind())));
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();

        if node.kind() == "member_expression" {
            let by_field = |name: &str| {
                children
                    .iter()
                    .copied()
                    .find(|child| self.nodes[child.0].field == Some(name))
            };
            if let (Some(object), Some(property)) = (by_field("object"), by_field("property")) {
                self.nodes[id.0].kind = NodeKind::Member { object, property };
            }
        }

        self.nodes[id.0].children = children;
        id
    }
}

fn classify(
    node: &Node,
    field: Option<&'static str>,
    parent_kind: Option<&'static str>,
    source: &str,
) -> NodeKind {
    let text = || source[node.start_byte()..node.end_byte()].to_string();

    let is_tag_name = matches!(
        parent_kind,
        Some("jsx_opening_element" | "jsx_closing_element" | "jsx_self_closing_element")
    ) && field == Some("name");
    let is_attribute_name = parent_kind == Some("jsx_attribute")
        && matches!(node.kind(), "property_identifier" | "jsx_namespace_name");
    if is_tag_name || is_attribute_name {
        return NodeKind::Jsx(JsxKind::Name);
    }

    match node.kind() {
        "program" => NodeKind::Program,
        "expression_statement" => NodeKind::ExpressionStatement,
        "lexical_declaration" | "variable_declaration" => NodeKind::VariableDeclaration,
        "variable_declarator" => NodeKind::VariableDeclarator,
        "export_statement" => NodeKind::Export,
        "class_declaration" | "abstract_class_declaration" | "class" => NodeKind::Class,
        "class_heritage" => NodeKind::ClassHeritage,
        "arrow_function" => NodeKind::Function(FunctionKind::Arrow),
        "function_declaration" | "generator_function_declaration" => {
            NodeKind::Function(FunctionKind::Declaration)
        }
        "function_expression" | "function" | "generator_function" => {
            NodeKind::Function(FunctionKind::Expression)
        }
        "method_definition" => NodeKind::Function(FunctionKind::Method),
        "formal_parameters" => NodeKind::Parameters,
        "parenthesized_expression" => NodeKind::Parenthesized,
        "jsx_element" if is_anonymous_fragment(node) => NodeKind::Jsx(JsxKind::Fragment),
        "jsx_element" => NodeKind::Jsx(JsxKind::Element),
        "jsx_fragment" => NodeKind::Jsx(JsxKind::Fragment),
        "jsx_self_closing_element" => NodeKind::Jsx(JsxKind::SelfClosingElement),
        "jsx_opening_element" => NodeKind::Jsx(JsxKind::OpeningElement),
        "jsx_closing_element" => NodeKind::Jsx(JsxKind::ClosingElement),
        "jsx_attribute" => NodeKind::Jsx(JsxKind::Attribute),
        "jsx_expression" => NodeKind::Jsx(JsxKind::ExpressionContainer),
        "jsx_text" => NodeKind::Jsx(JsxKind::Text),
        "subscript_expression" => NodeKind::Index,
        "this" => NodeKind::This,
        "comment" => NodeKind::Comment,
        "identifier" | "shorthand_property_identifier" | "shorthand_property_identifier_pattern" => {
            NodeKind::Identifier(text())
        }
        "property_identifier" | "private_property_identifier" => NodeKind::PropertyName(text()),
        // Resolved to `Member` once the object and property children exist
        other => NodeKind::Other(other),
    }
}

/// `<>...</>` parses as an element whose opening tag has no name
fn is_anonymous_fragment(node: &Node) -> bool {
    node.child(0)
        .map(|opening| {
            opening.kind() == "jsx_opening_element" && opening.child_by_field_name("name").is_none()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tree: &SyntaxTree) -> Vec<NodeKind> {
        tree.post_order(tree.root())
            .into_iter()
            .map(|id| tree.kind(id).clone())
            .collect()
    }

    #[test]
    fn test_syntax_error_is_parse_failure() {
        let result = text_to_tree("const = ;", Lang::Tsx);
        assert!(matches!(result, Err(ExtractError::ParseFailure { .. })));
    }

    #[test]
    fn test_tag_and_attribute_names_are_not_identifiers() {
        let tree = text_to_tree("<Wrapper bar={bar} />", Lang::Tsx).unwrap();
        let identifiers: Vec<String> = kinds(&tree)
            .into_iter()
            .filter_map(|kind| match kind {
                NodeKind::Identifier(name) => Some(name),
                _ => None,
            })
            .collect();
        assert_eq!(identifiers, vec!["bar".to_string()]);
    }

    #[test]
    fn test_member_expression_fields_resolved() {
        let tree = text_to_tree("this.props.foo", Lang::Tsx).unwrap();
        let members = kinds(&tree)
            .into_iter()
            .filter(|kind| matches!(kind, NodeKind::Member { .. }))
            .count();
        assert_eq!(members, 2);
    }

    #[test]
    fn test_anonymous_fragment_detected() {
        let tree = text_to_tree("<><a /><b /></>", Lang::Tsx).unwrap();
        let expression = tree.single_expression().unwrap();
        assert_eq!(*tree.kind(expression), NodeKind::Jsx(JsxKind::Fragment));
    }

    #[test]
    fn test_fragment_retry_wraps_siblings() {
        assert!(text_to_tree("<a /><b />", Lang::Tsx).is_err());
        let tree = fragment_text_to_tree("<a /><b />").unwrap();
        assert_eq!(tree.source(), "<><a /><b /></>");
    }

    #[test]
    fn test_fragment_reports_first_error() {
        let result = fragment_text_to_tree("<div");
        assert!(matches!(result, Err(ExtractError::ParseFailure { .. })));
    }
}
