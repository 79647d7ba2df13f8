//! Serialization of the arena tree back to source text
//!
//! Parsed nodes are reproduced from the original source, with their children
//! spliced in at their original offsets. Synthetic nodes and renamed leaves
//! are printed from the model.

use super::{NodeId, NodeKind, SyntaxTree};

impl SyntaxTree {
    /// Print the whole program, one statement per line.
    ///
    /// Expression statements always end with `;`, the way a pretty-printer
    /// terminates them. The `;` goes before any trailing comment.
    pub fn to_text(&self) -> String {
        let root = self.root();
        if *self.kind(root) != NodeKind::Program {
            return self.node_text(root);
        }

        let statements: Vec<String> = self
            .children(root)
            .iter()
            .map(|statement| {
                if *self.kind(*statement) == NodeKind::ExpressionStatement {
                    self.terminated_statement_text(*statement)
                } else {
                    self.node_text(*statement)
                }
            })
            .collect();
        statements.join("\n")
    }

    /// Print a single subtree
    pub fn node_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn terminated_statement_text(&self, id: NodeId) -> String {
        let node = self.node(id);
        let split = node
            .children
            .iter()
            .rposition(|child| *self.kind(*child) != NodeKind::Comment)
            .map_or(0, |index| index + 1);
        let (body, trailing) = node.children.split_at(split);
        let cut = trailing
            .first()
            .map_or(node.span.end_byte, |comment| self.node(*comment).span.start_byte);

        let mut out = String::new();
        self.write_spliced(body, node.span.start_byte, cut, &mut out);
        let code_end = out.trim_end().len();
        if !out[..code_end].ends_with(';') {
            out.insert(code_end, ';');
        }
        self.write_spliced(trailing, cut, node.span.end_byte, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        match &node.kind {
            NodeKind::Identifier(name) | NodeKind::PropertyName(name) => out.push_str(name),
            NodeKind::Member { object, property } if node.synthetic => {
                self.write_node(*object, out);
                out.push('.');
                self.write_node(*property, out);
            }
            _ => self.write_spliced(&node.children, node.span.start_byte, node.span.end_byte, out),
        }
    }

    /// Source text of `[start, end)` with `children` printed in place
    fn write_spliced(&self, children: &[NodeId], start: usize, end: usize, out: &mut String) {
        let source = self.source();
        let mut cursor = start;
        for child in children {
            let span = self.node(*child).span;
            out.push_str(&source[cursor..span.start_byte]);
            self.write_node(*child, out);
            cursor = span.end_byte;
        }
        out.push_str(&source[cursor..end]);
    }
}
