//! Fragment extraction
//!
//! Turns a selected JSX fragment into a component definition:
//!
//! 1. parse the fragment into an arena tree
//! 2. walk it once, classifying references and rewriting `this.*` accesses
//! 3. print the rewritten tree and drop the statement terminator
//! 4. name the component after the target file and synthesize it
//!
//! The fragment is expected to have passed
//! [`is_fragment`](crate::detectors::fragment::is_fragment) already. A
//! fragment that does not parse is reported as
//! [`ExtractError::ParseFailure`](crate::error::ExtractError::ParseFailure).

pub mod bindings;
pub mod component;
pub mod instance;
pub mod plan;
pub mod rules;

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::syntax::{fragment_text_to_tree, NodeId, SyntaxTree};
use crate::utils::{component_name_from_path, preview};

pub use bindings::{BindingSet, Bindings};
pub use component::{build_component, ComponentDefinition};
pub use instance::instantiate;
pub use plan::{plan_extraction, ExtractionPlan};
pub use rules::{AnalysisState, Flow, IdentifierRule, InstanceMemberRule, VisitRule};

/// Metadata returned alongside the generated text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionMetadata {
    pub is_fragment: bool,
    pub component_properties: Bindings,
    pub name: String,
}

/// Result of extracting a selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedSelection {
    pub text: String,
    pub metadata: SelectionMetadata,
}

/// A fragment after classification and rewriting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedFragment {
    /// Rewritten fragment as a bare expression
    pub body: String,
    pub bindings: Bindings,
}

/// Single-pass walker applying every [`VisitRule`] to each node
pub struct ReferenceAnalyzer {
    rules: Vec<Box<dyn VisitRule>>,
}

impl Default for ReferenceAnalyzer {
    fn default() -> Self {
        Self::with_rules(vec![Box::new(IdentifierRule), Box::new(InstanceMemberRule)])
    }
}

impl ReferenceAnalyzer {
    pub fn with_rules(rules: Vec<Box<dyn VisitRule>>) -> Self {
        Self { rules }
    }

    /// Classify the references in `tree`, rewriting it in place
    pub fn analyze(&self, tree: &mut SyntaxTree) -> Bindings {
        let mut state = AnalysisState::default();
        let root = tree.root();
        self.walk(tree, root, &mut state);
        state.bindings
    }

    fn walk(&self, tree: &mut SyntaxTree, id: NodeId, state: &mut AnalysisState) {
        for rule in &self.rules {
            if rule.visit(tree, id, state) == Flow::SkipChildren {
                return;
            }
        }

        // Children may be swapped for synthetic nodes while we iterate
        let mut index = 0;
        while let Some(child) = tree.children(id).get(index).copied() {
            self.walk(tree, child, state);
            index += 1;
        }
    }
}

/// Parse, classify and rewrite a fragment
pub fn analyze_fragment(fragment: &str) -> Result<AnalyzedFragment> {
    let mut tree = fragment_text_to_tree(fragment)?;
    let bindings = ReferenceAnalyzer::default().analyze(&mut tree);
    // Comments around the markup are not part of the component body
    let body = match tree.single_expression() {
        Some(expression) => tree.node_text(expression),
        None => strip_terminator(&tree.to_text()),
    };

    debug!(
        fragment = %preview(fragment, 60),
        arguments = bindings.argument_props.len(),
        member_props = bindings.member_props.len(),
        state = bindings.state.len(),
        component_members = bindings.component_members.len(),
        "analyzed fragment"
    );

    Ok(AnalyzedFragment { body, bindings })
}

/// Extract `fragment` into a component named after `target_path`
pub fn wrap_with_component(target_path: &Path, fragment: &str) -> Result<ProcessedSelection> {
    let analyzed = analyze_fragment(fragment)?;
    let name = component_name_from_path(target_path);
    let definition = ComponentDefinition::new(name.clone(), analyzed.body, analyzed.bindings);

    info!(
        component = %name,
        shape = definition.shape.name(),
        "synthesized component"
    );

    Ok(ProcessedSelection {
        text: definition.render(),
        metadata: SelectionMetadata {
            is_fragment: true,
            component_properties: definition.bindings,
            name,
        },
    })
}

/// Remove the last `;`, which the printer adds to terminate the statement
fn strip_terminator(printed: &str) -> String {
    match printed.rfind(';') {
        Some(index) => format!("{}{}", &printed[..index], &printed[index + 1..]),
        None => printed.to_string(),
    }
}
