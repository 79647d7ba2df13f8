//! Arena syntax tree for JavaScript-family sources
//!
//! tree-sitter gives us a concrete syntax tree that cannot be edited. The
//! extraction pass needs to rewrite member accesses in place, so parsed trees
//! are converted into an arena of [`SyntaxNode`]s addressed by [`NodeId`].
//! Node ids are assigned once at conversion time and never reused within a
//! tree, which lets passes keep side tables (such as a processed set) keyed
//! by id instead of stamping flags onto nodes.
//!
//! Only named tree-sitter nodes become arena nodes. Punctuation and keywords
//! are reproduced from the source text between children when printing.

mod parse;
mod print;

pub use parse::{fragment_text_to_tree, text_to_tree, wrap_fragment};

/// Stable identity of a node inside one [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Zero-based line/character position
///
/// Node spans count characters in bytes, matching tree-sitter columns.
/// Positions coming from an editor count UTF-16 code units and go through
/// [`SyntaxTree::byte_position`] before being compared with spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

impl From<tree_sitter::Point> for Position {
    fn from(point: tree_sitter::Point) -> Self {
        Self::new(point.row, point.column)
    }
}

/// Source range covered by a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// True if this span starts strictly before `start` and ends strictly
    /// after `end`
    pub fn strictly_contains(&self, start: Position, end: Position) -> bool {
        self.start < start && self.end > end
    }
}

/// Markup node flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsxKind {
    Element,
    SelfClosingElement,
    Fragment,
    OpeningElement,
    ClosingElement,
    Attribute,
    /// `{...}` embedded expression
    ExpressionContainer,
    Text,
    /// Tag or attribute name. Never a variable reference.
    Name,
}

impl JsxKind {
    /// Markup nodes that stand in expression position
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            Self::Element | Self::SelfClosingElement | Self::Fragment | Self::ExpressionContainer
        )
    }

    /// Elements and fragments, i.e. what a standalone markup expression can be
    pub fn is_root(self) -> bool {
        matches!(self, Self::Element | Self::SelfClosingElement | Self::Fragment)
    }
}

/// How a function introduces its own name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Arrow,
    /// `function f() {}` statement; `f` is bound in the enclosing scope
    Declaration,
    /// `function f() {}` expression; `f` is bound only inside its body
    Expression,
    Method,
}

/// Node shapes the extraction passes care about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    ExpressionStatement,
    VariableDeclaration,
    VariableDeclarator,
    Export,
    Class,
    ClassHeritage,
    Function(FunctionKind),
    Parameters,
    Parenthesized,
    Jsx(JsxKind),
    /// Identifier in reference or binding position
    Identifier(String),
    /// Property name after `.` or a private `#name`
    PropertyName(String),
    This,
    /// Non-computed member access `object.property`
    Member { object: NodeId, property: NodeId },
    /// Computed member access `object[index]`
    Index,
    Comment,
    /// Any other tree-sitter node, by grammar kind
    Other(&'static str),
}

impl NodeKind {
    /// Leaves are printed from the model and never have children
    fn is_leaf(&self) -> bool {
        matches!(
            self,
            Self::Identifier(_)
                | Self::PropertyName(_)
                | Self::This
                | Self::Comment
                | Self::Jsx(JsxKind::Name)
                | Self::Jsx(JsxKind::Text)
        )
    }

    pub fn is_jsx_expression(&self) -> bool {
        matches!(self, Self::Jsx(kind) if kind.is_expression())
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    /// Identifier or property name text
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) | Self::PropertyName(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: Span,
    /// tree-sitter field this node occupies in its parent
    pub field: Option<&'static str>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Created by a rewrite rather than parsed
    pub synthetic: bool,
}

/// Parsed source plus its arena of nodes
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<SyntaxNode>,
    root: NodeId,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// First child occupying the given tree-sitter field
    pub fn child_by_field(&self, id: NodeId, field: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| self.node(*child).field == Some(field))
    }

    /// Children that are not comments
    pub fn significant_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| *self.kind(*child) != NodeKind::Comment)
    }

    /// Walk from the parent of `id` up to the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// Original source text of a parsed node
    pub fn source_text(&self, id: NodeId) -> &str {
        let span = self.node(id).span;
        &self.source[span.start_byte..span.end_byte]
    }

    /// Convert an editor position (UTF-16 columns) into the byte columns
    /// used by node spans.
    ///
    /// Columns past the end of the line stay past it by the same amount.
    pub fn byte_position(&self, position: Position) -> Position {
        let Some(line) = self.source.split('\n').nth(position.line) else {
            return position;
        };

        let mut units = 0;
        for (offset, ch) in line.char_indices() {
            if units >= position.character {
                return Position::new(position.line, offset);
            }
            units += ch.len_utf16();
        }
        Position::new(
            position.line,
            line.len() + position.character.saturating_sub(units),
        )
    }

    /// The expression of a program made of exactly one expression statement,
    /// with parentheses removed
    pub fn single_expression(&self) -> Option<NodeId> {
        let mut statements = self.significant_children(self.root);
        let statement = statements.next()?;
        if statements.next().is_some() || *self.kind(statement) != NodeKind::ExpressionStatement {
            return None;
        }

        let mut expression = self.significant_children(statement).next()?;
        while *self.kind(expression) == NodeKind::Parenthesized {
            expression = self.significant_children(expression).next()?;
        }
        Some(expression)
    }

    /// Node ids of the subtree under `id` in depth-first post-order
    pub fn post_order(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        self.collect_post_order(id, &mut order);
        order
    }

    fn collect_post_order(&self, id: NodeId, order: &mut Vec<NodeId>) {
        for child in self.children(id) {
            self.collect_post_order(*child, order);
        }
        order.push(id);
    }

    /// Rename an identifier or property name in place
    pub fn rename(&mut self, id: NodeId, name: &str) {
        if let NodeKind::Identifier(current) | NodeKind::PropertyName(current) =
            &mut self.nodes[id.0].kind
        {
            *current = name.to_string();
        }
    }

    /// Build a synthetic `object.property` node.
    ///
    /// `object` is re-parented under the new node. The new node inherits
    /// `span` so the printer can splice it where the replaced node was.
    pub fn synthesize_member(&mut self, object: NodeId, property: &str, span: Span) -> NodeId {
        let member = NodeId(self.nodes.len());
        let property_id = NodeId(self.nodes.len() + 1);

        self.nodes.push(SyntaxNode {
            kind: NodeKind::Member {
                object,
                property: property_id,
            },
            span,
            field: None,
            parent: None,
            children: vec![object, property_id],
            synthetic: true,
        });
        self.nodes.push(SyntaxNode {
            kind: NodeKind::PropertyName(property.to_string()),
            span: Span::default(),
            field: Some("property"),
            parent: Some(member),
            children: Vec::new(),
            synthetic: true,
        });

        self.nodes[object.0].parent = Some(member);
        self.nodes[object.0].field = Some("object");
        member
    }

    /// Put `replacement` where `target` is in the tree
    pub fn replace(&mut self, target: NodeId, replacement: NodeId) {
        let parent = self.nodes[target.0].parent;
        let field = self.nodes[target.0].field;

        self.nodes[replacement.0].parent = parent;
        self.nodes[replacement.0].field = field;
        self.nodes[target.0].parent = None;

        let Some(parent) = parent else {
            self.root = replacement;
            return;
        };

        for child in self.nodes[parent.0].children.iter_mut() {
            if *child == target {
                *child = replacement;
            }
        }
        if let NodeKind::Member { object, property } = &mut self.nodes[parent.0].kind {
            if *object == target {
                *object = replacement;
            }
            if *property == target {
                *property = replacement;
            }
        }
    }
}
