//! Visit rules for fragment analysis
//!
//! The analyzer walks a fragment once in pre-order and offers every node to
//! each rule in turn. Rules only look at the node kinds they care about:
//!
//! - [`IdentifierRule`] collects free identifiers as argument bindings
//! - [`InstanceMemberRule`] classifies `this.*` accesses and rewrites them
//!
//! Nodes produced by a rewrite are recorded in [`AnalysisState`] so a later
//! visit never classifies them again.

use std::collections::HashSet;

use super::bindings::Bindings;
use crate::syntax::{FunctionKind, NodeId, NodeKind, SyntaxTree};

/// What the walker should do after a rule ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Do not descend into the node (it was replaced)
    SkipChildren,
}

/// Bindings found so far plus the ids already handled by a rewrite
#[derive(Debug, Default)]
pub struct AnalysisState {
    pub bindings: Bindings,
    processed: HashSet<NodeId>,
}

impl AnalysisState {
    pub fn is_processed(&self, id: NodeId) -> bool {
        self.processed.contains(&id)
    }

    pub fn mark_processed(&mut self, id: NodeId) {
        self.processed.insert(id);
    }
}

/// One classification concern applied to every node of a fragment
pub trait VisitRule {
    fn visit(&self, tree: &mut SyntaxTree, id: NodeId, state: &mut AnalysisState) -> Flow;
}

/// Records identifiers that must be supplied from the extraction site.
///
/// Skipped: identifiers inside any member access (`a.b`, `a[b]`), and names
/// bound by an enclosing function's parameters or local declarations.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentifierRule;

impl VisitRule for IdentifierRule {
    fn visit(&self, tree: &mut SyntaxTree, id: NodeId, state: &mut AnalysisState) -> Flow {
        match tree.kind(id) {
            NodeKind::Identifier(name) => {
                if !is_inside_member_access(tree, id) && !is_bound_locally(tree, id, name) {
                    state.bindings.argument_props.insert(name);
                }
            }
            NodeKind::Program
            | NodeKind::ExpressionStatement
            | NodeKind::VariableDeclaration
            | NodeKind::VariableDeclarator
            | NodeKind::Export
            | NodeKind::Class
            | NodeKind::ClassHeritage
            | NodeKind::Function(_)
            | NodeKind::Parameters
            | NodeKind::Parenthesized
            | NodeKind::Jsx(_)
            | NodeKind::PropertyName(_)
            | NodeKind::This
            | NodeKind::Member { .. }
            | NodeKind::Index
            | NodeKind::Comment
            | NodeKind::Other(_) => {}
        }
        Flow::Continue
    }
}

/// Classifies `this.<name>` accesses.
///
/// - `this.props.x` records `x` as a member prop, unchanged
/// - `this.state.x` records `x` as state and becomes `this.props.x`
/// - `this.x` records `x` as a component member and becomes `this.props.x`
///
/// Only the first property after `this` is inspected.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstanceMemberRule;

impl VisitRule for InstanceMemberRule {
    fn visit(&self, tree: &mut SyntaxTree, id: NodeId, state: &mut AnalysisState) -> Flow {
        let (object, property) = match tree.kind(id) {
            NodeKind::Member { object, property } => (*object, *property),
            NodeKind::Program
            | NodeKind::ExpressionStatement
            | NodeKind::VariableDeclaration
            | NodeKind::VariableDeclarator
            | NodeKind::Export
            | NodeKind::Class
            | NodeKind::ClassHeritage
            | NodeKind::Function(_)
            | NodeKind::Parameters
            | NodeKind::Parenthesized
            | NodeKind::Jsx(_)
            | NodeKind::Identifier(_)
            | NodeKind::PropertyName(_)
            | NodeKind::This
            | NodeKind::Index
            | NodeKind::Comment
            | NodeKind::Other(_) => return Flow::Continue,
        };

        if state.is_processed(id) || *tree.kind(object) != NodeKind::This {
            return Flow::Continue;
        }
        let Some(name) = tree.kind(property).name().map(str::to_string) else {
            return Flow::Continue;
        };

        let flow = match (name.as_str(), chained_property(tree, id)) {
            ("props", Some(next)) => {
                state.bindings.member_props.insert(&next);
                Flow::Continue
            }
            ("state", Some(next)) => {
                tree.rename(property, "props");
                state.bindings.state.insert(&next);
                Flow::Continue
            }
            _ => {
                state.bindings.component_members.insert(&name);

                let span = tree.node(id).span;
                let carrier = tree.synthesize_member(object, "props", span);
                let replacement = tree.synthesize_member(carrier, &name, span);
                tree.replace(id, replacement);
                state.mark_processed(replacement);
                Flow::SkipChildren
            }
        };

        state.mark_processed(id);
        flow
    }
}

/// Name accessed right after `id` when `id` is the object of a member access
fn chained_property(tree: &SyntaxTree, id: NodeId) -> Option<String> {
    let parent = tree.parent(id)?;
    match tree.kind(parent) {
        NodeKind::Member { object, property } if *object == id => {
            tree.kind(*property).name().map(str::to_string)
        }
        _ => None,
    }
}

fn is_inside_member_access(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.ancestors(id)
        .any(|ancestor| matches!(tree.kind(ancestor), NodeKind::Member { .. } | NodeKind::Index))
}

fn is_bound_locally(tree: &SyntaxTree, id: NodeId, name: &str) -> bool {
    tree.ancestors(id)
        .filter(|ancestor| tree.kind(*ancestor).is_function())
        .any(|function| local_names(tree, function).contains(name))
}

/// Parameter names and declared names of a function, plus the function's
/// own name when it is a named function expression
fn local_names(tree: &SyntaxTree, function: NodeId) -> HashSet<String> {
    let mut names = HashSet::new();

    if *tree.kind(function) == NodeKind::Function(FunctionKind::Expression) {
        insert_name_field(tree, function, &mut names);
    }

    for field in ["parameters", "parameter"] {
        if let Some(params) = tree.child_by_field(function, field) {
            collect_pattern_names(tree, params, &mut names);
        }
    }

    for id in tree.post_order(function) {
        match tree.kind(id) {
            NodeKind::VariableDeclarator => {
                if let Some(pattern) = tree.child_by_field(id, "name") {
                    collect_pattern_names(tree, pattern, &mut names);
                }
            }
            NodeKind::Function(FunctionKind::Declaration) if id != function => {
                insert_name_field(tree, id, &mut names);
            }
            _ => {}
        }
    }

    names
}

fn insert_name_field(tree: &SyntaxTree, function: NodeId, names: &mut HashSet<String>) {
    if let Some(NodeKind::Identifier(name)) = tree
        .child_by_field(function, "name")
        .map(|id| tree.kind(id))
    {
        names.insert(name.clone());
    }
}

/// Identifiers bound by a parameter list or destructuring pattern, leaving out
/// default values and type annotations
fn collect_pattern_names(tree: &SyntaxTree, id: NodeId, names: &mut HashSet<String>) {
    if let NodeKind::Identifier(name) = tree.kind(id) {
        names.insert(name.clone());
    }

    for child in tree.children(id) {
        let skip = match tree.node(*child).field {
            Some("right") | Some("type") => true,
            Some("value") => *tree.kind(id) != NodeKind::Other("pair_pattern"),
            _ => false,
        };
        if !skip {
            collect_pattern_names(tree, *child, names);
        }
    }
}
