//! Component shape detection
//!
//! Recognizes whether a block of text already is a function component or a
//! class component extending one of the recognized React bases. Only the
//! outer shape is checked; the body is not required to return markup.

use serde::Serialize;

use crate::lang::Lang;
use crate::syntax::{text_to_tree, NodeId, NodeKind, SyntaxTree};

/// Base classes that make a class a stateful component
pub const SUPPORTED_BASES: &[&str] = &["Component", "PureComponent"];

/// Namespace the bases may be qualified with (`React.Component`)
pub const SUPPORTED_NAMESPACE: &str = "React";

/// How a component is defined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentShape {
    /// Plain function of its props
    Function,
    /// Class with a `render` method
    Class,
}

impl ComponentShape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
        }
    }
}

/// Detect the shape of a component definition, if it is one
pub fn detect_shape(text: &str) -> Option<ComponentShape> {
    let tree = text_to_tree(text, Lang::Tsx).ok()?;
    let statement = single_statement(&tree)?;

    if is_function_statement(&tree, statement) {
        Some(ComponentShape::Function)
    } else if is_class_statement(&tree, statement) {
        Some(ComponentShape::Class)
    } else {
        None
    }
}

/// True for `const X = () => ...`, `export function X() {}` and
/// `function X() {}` style definitions
pub fn is_function_component(text: &str) -> bool {
    detect_shape(text) == Some(ComponentShape::Function)
}

/// True for a (possibly exported) class extending `Component` or
/// `PureComponent`, bare or qualified with `React.`
pub fn is_class_component(text: &str) -> bool {
    detect_shape(text) == Some(ComponentShape::Class)
}

fn single_statement(tree: &SyntaxTree) -> Option<NodeId> {
    let mut statements = tree.significant_children(tree.root());
    let statement = statements.next()?;
    statements.next().is_none().then_some(statement)
}

/// Declaration or default value carried by an export statement
fn exported(tree: &SyntaxTree, export: NodeId) -> Option<NodeId> {
    tree.child_by_field(export, "declaration")
        .or_else(|| tree.child_by_field(export, "value"))
}

fn is_function_statement(tree: &SyntaxTree, statement: NodeId) -> bool {
    match tree.kind(statement) {
        NodeKind::Function(_) => true,
        NodeKind::VariableDeclaration => initializes_function(tree, statement),
        NodeKind::Export => exported(tree, statement)
            .map(|inner| match tree.kind(inner) {
                NodeKind::Function(_) => true,
                NodeKind::VariableDeclaration => initializes_function(tree, inner),
                _ => false,
            })
            .unwrap_or(false),
        _ => false,
    }
}

/// First declarator of a variable declaration holds a function
fn initializes_function(tree: &SyntaxTree, declaration: NodeId) -> bool {
    tree.significant_children(declaration)
        .find(|child| *tree.kind(*child) == NodeKind::VariableDeclarator)
        .and_then(|declarator| tree.child_by_field(declarator, "value"))
        .map(|value| unwrap_parentheses(tree, value))
        .map(|value| tree.kind(value).is_function())
        .unwrap_or(false)
}

fn is_class_statement(tree: &SyntaxTree, statement: NodeId) -> bool {
    let class = match tree.kind(statement) {
        NodeKind::Class => Some(statement),
        NodeKind::Export => {
            exported(tree, statement).filter(|inner| *tree.kind(*inner) == NodeKind::Class)
        }
        _ => None,
    };

    class
        .and_then(|class| superclass(tree, class))
        .map(|base| is_supported_base(tree, base))
        .unwrap_or(false)
}

/// Expression after `extends`.
///
/// The TypeScript grammars nest it in an `extends_clause`, the JavaScript
/// grammar puts it directly under the heritage node.
fn superclass(tree: &SyntaxTree, class: NodeId) -> Option<NodeId> {
    let heritage = tree
        .significant_children(class)
        .find(|child| *tree.kind(*child) == NodeKind::ClassHeritage)?;
    let first = tree.significant_children(heritage).next()?;

    if *tree.kind(first) == NodeKind::Other("extends_clause") {
        tree.child_by_field(first, "value")
            .or_else(|| tree.significant_children(first).next())
    } else {
        Some(first)
    }
}

fn is_supported_base(tree: &SyntaxTree, base: NodeId) -> bool {
    match tree.kind(base) {
        NodeKind::Identifier(name) => SUPPORTED_BASES.contains(&name.as_str()),
        NodeKind::Member { object, property } => {
            tree.kind(*object).name() == Some(SUPPORTED_NAMESPACE)
                && tree
                    .kind(*property)
                    .name()
                    .map(|name| SUPPORTED_BASES.contains(&name))
                    .unwrap_or(false)
        }
        _ => false,
    }
}

fn unwrap_parentheses(tree: &SyntaxTree, mut id: NodeId) -> NodeId {
    while *tree.kind(id) == NodeKind::Parenthesized {
        match tree.significant_children(id).next() {
            Some(inner) => id = inner,
            None => break,
        }
    }
    id
}
