#![forbid(unsafe_code)]

//! Arena-backed selector tree
//!
//! A tree owns every node in a flat vector. Nodes refer to their parent and
//! children through [`NodeId`] indices, so sibling navigation is a lookup in
//! the parent's child list rather than pointer chasing.

use std::fmt;

/// Index of a node inside its [`SelectorTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The closed set of selector node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Attribute,
    Class,
    Combinator,
    Comment,
    Id,
    Nesting,
    Pseudo,
    Root,
    Selector,
    String,
    Tag,
    Universal,
}

impl NodeKind {
    /// Whether the kind is one simple-selector component of a compound
    pub fn is_chaining(self) -> bool {
        match self {
            NodeKind::Attribute
            | NodeKind::Class
            | NodeKind::Id
            | NodeKind::Pseudo
            | NodeKind::Tag
            | NodeKind::Universal => true,
            NodeKind::Combinator
            | NodeKind::Comment
            | NodeKind::Nesting
            | NodeKind::Root
            | NodeKind::Selector
            | NodeKind::String => false,
        }
    }

    /// Lowercase label used in diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Attribute => "attribute",
            NodeKind::Class => "class",
            NodeKind::Combinator => "combinator",
            NodeKind::Comment => "comment",
            NodeKind::Id => "id",
            NodeKind::Nesting => "nesting",
            NodeKind::Pseudo => "pseudo",
            NodeKind::Root => "root",
            NodeKind::Selector => "selector",
            NodeKind::String => "string",
            NodeKind::Tag => "tag",
            NodeKind::Universal => "universal",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single node of a selector tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorNode {
    pub kind: NodeKind,
    /// Literal text of the node (`b` for `.b`, `>` for a child combinator)
    pub value: String,
    /// Byte offset of the node inside the selector string
    pub source_index: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Position inside the parent's child list
    position: usize,
}

impl SelectorNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Which kind of selector group a node sits directly inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enclosing {
    /// Selector groups and the root itself
    Structural,
    /// Direct child of a top-level selector group
    Group,
    /// Direct child of a selector group that is a pseudo-class argument
    PseudoArgument,
}

/// One step of a tree walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub id: NodeId,
    pub enclosing: Enclosing,
}

/// A parsed selector: a root owning one selector group per comma-separated
/// alternative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorTree {
    nodes: Vec<SelectorNode>,
}

impl SelectorTree {
    /// Creates a tree holding only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![SelectorNode {
                kind: NodeKind::Root,
                value: String::new(),
                source_index: 0,
                parent: None,
                children: Vec::new(),
                position: 0,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends a node as the last child of `parent`
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn append(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        value: impl Into<String>,
        source_index: usize,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let position = self.nodes[parent.0].children.len();
        self.nodes.push(SelectorNode {
            kind,
            value: value.into(),
            source_index,
            parent: Some(parent),
            children: Vec::new(),
            position,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Moves a node's offset, used once a group's first child is known
    pub(crate) fn set_source_index(&mut self, id: NodeId, source_index: usize) {
        self.nodes[id.0].source_index = source_index;
    }

    pub fn node(&self, id: NodeId) -> &SelectorNode {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Previous sibling, None for the first node of a sequence
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id.0];
        let parent = node.parent?;
        let position = node.position.checked_sub(1)?;
        self.nodes[parent.0].children.get(position).copied()
    }

    /// Next sibling, None for the last node of a sequence
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id.0];
        let parent = node.parent?;
        self.nodes[parent.0].children.get(node.position + 1).copied()
    }

    /// Every sibling after `id`, in order
    pub fn following_siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let node = &self.nodes[id.0];
        let siblings: &[NodeId] = match node.parent {
            Some(parent) => &self.nodes[parent.0].children[node.position + 1..],
            None => &[],
        };
        siblings.iter().copied()
    }

    /// Top-level selector groups
    pub fn groups(&self) -> &[NodeId] {
        &self.nodes[0].children
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Depth-first, document-order walk over every node below the root
    pub fn walk(&self) -> Walk<'_> {
        self.walk_from(self.root())
    }

    /// Depth-first walk over the descendants of `id`
    pub fn walk_from(&self, id: NodeId) -> Walk<'_> {
        let mut walk = Walk {
            tree: self,
            stack: Vec::new(),
        };
        walk.push_children(id);
        walk
    }

    fn enclosing_of_children(&self, id: NodeId) -> Enclosing {
        match self.kind(id) {
            NodeKind::Selector => match self.parent(id).map(|p| self.kind(p)) {
                Some(NodeKind::Pseudo) => Enclosing::PseudoArgument,
                _ => Enclosing::Group,
            },
            _ => Enclosing::Structural,
        }
    }

    /// Renders the tree back to a compact selector string
    #[cfg(test)]
    pub(crate) fn to_selector_string(&self) -> String {
        let mut out = String::new();
        for (i, &group) in self.groups().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.render_group(group, &mut out);
        }
        out
    }

    #[cfg(test)]
    fn render_group(&self, group: NodeId, out: &mut String) {
        for &child in self.node(group).children() {
            let node = self.node(child);
            match node.kind {
                NodeKind::Class => {
                    out.push('.');
                    out.push_str(&node.value);
                }
                NodeKind::Id => {
                    out.push('#');
                    out.push_str(&node.value);
                }
                NodeKind::Attribute => {
                    out.push('[');
                    out.push_str(&node.value);
                    out.push(']');
                }
                NodeKind::Combinator if node.value == " " => out.push(' '),
                NodeKind::Combinator => {
                    out.push(' ');
                    out.push_str(&node.value);
                    out.push(' ');
                }
                NodeKind::Pseudo => {
                    out.push_str(&node.value);
                    if !node.children().is_empty() {
                        out.push('(');
                        for (i, &arg) in node.children().iter().enumerate() {
                            if i > 0 {
                                out.push_str(", ");
                            }
                            self.render_group(arg, out);
                        }
                        out.push(')');
                    }
                }
                _ => out.push_str(&node.value),
            }
        }
    }
}

impl Default for SelectorTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`SelectorTree::walk`]
pub struct Walk<'a> {
    tree: &'a SelectorTree,
    stack: Vec<Visit>,
}

impl Walk<'_> {
    fn push_children(&mut self, id: NodeId) {
        let enclosing = self.tree.enclosing_of_children(id);
        for &child in self.tree.node(id).children().iter().rev() {
            self.stack.push(Visit {
                id: child,
                enclosing,
            });
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = Visit;

    fn next(&mut self) -> Option<Visit> {
        let visit = self.stack.pop()?;
        self.push_children(visit.id);
        Some(visit)
    }
}
