//! Read-only document tree the selection engine walks.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. A node is either a
//! text-bearing leaf or a structural element with ordered children. The tree
//! is built once (by hand or via [`markdown::render`]) and is not mutated
//! while a selection is being adjusted.

pub mod markdown;

use std::fmt;

/// Handle to a node in a [`DocumentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena (creation order).
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Literal character content. May be empty.
    Text(String),
    /// Structural wrapper, e.g. a paragraph or an emphasis span.
    Element { tag: String },
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
    #[error("Cannot append children to text node {0}")]
    TextNodeParent(NodeId),
}

/// Arena-backed tree of text and structural nodes.
#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<NodeData>,
}

impl DocumentTree {
    /// Creates a tree holding a single structural root element.
    pub fn new(root_tag: impl Into<String>) -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Element {
                    tag: root_tag.into(),
                },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has its root, so this is never true.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a structural element as the last child of `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        self.append(parent, NodeKind::Element { tag: tag.into() })
    }

    /// Appends a text-bearing leaf as the last child of `parent`.
    pub fn append_text(
        &mut self,
        parent: NodeId,
        text: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        self.append(parent, NodeKind::Text(text.into()))
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId, TreeError> {
        let parent_data = self
            .nodes
            .get(parent.0)
            .ok_or(TreeError::UnknownNode(parent))?;
        if matches!(parent_data.kind, NodeKind::Text(_)) {
            return Err(TreeError::TextNodeParent(parent));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.nodes.get(node.0).map(|n| &n.kind)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    /// Ordered children; empty for text nodes and unknown ids.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(self.kind(node), Some(NodeKind::Text(_)))
    }

    /// The node's own text, or `None` for structural nodes.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match self.kind(node)? {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match self.kind(node)? {
            NodeKind::Element { tag } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Concatenated text of every leaf under `node`, in document order.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match self.kind(node) {
            Some(NodeKind::Text(text)) => out.push_str(text),
            Some(NodeKind::Element { .. }) => {
                for &child in self.children(node) {
                    self.collect_text(child, out);
                }
            }
            None => {}
        }
    }

    /// True if `node` is `ancestor` or lies somewhere beneath it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if self.kind(node).is_none() {
            return false;
        }
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> (DocumentTree, NodeId, NodeId, NodeId) {
        let mut tree = DocumentTree::new("div");
        let p = tree.append_element(tree.root(), "p").unwrap();
        let hello = tree.append_text(p, "Hello ").unwrap();
        let em = tree.append_element(p, "em").unwrap();
        let world = tree.append_text(em, "world").unwrap();
        (tree, p, hello, world)
    }

    #[test]
    fn builds_nested_structure() {
        let (tree, p, hello, world) = sample();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.children(tree.root()), &[p]);
        assert_eq!(tree.parent(hello), Some(p));
        assert_eq!(tree.text(world), Some("world"));
        assert_eq!(tree.tag(p), Some("p"));
        assert!(tree.is_text(hello));
        assert!(!tree.is_text(p));
    }

    #[test]
    fn text_content_concatenates_in_document_order() {
        let (tree, p, _, _) = sample();
        assert_eq!(tree.text_content(tree.root()), "Hello world");
        assert_eq!(tree.text_content(p), "Hello world");
    }

    #[test]
    fn cannot_append_under_text_node() {
        let (mut tree, _, hello, _) = sample();
        assert_eq!(
            tree.append_text(hello, "x"),
            Err(TreeError::TextNodeParent(hello))
        );
    }

    #[test]
    fn cannot_append_under_unknown_node() {
        let (mut tree, ..) = sample();
        let bogus = NodeId(99);
        assert_eq!(
            tree.append_element(bogus, "p"),
            Err(TreeError::UnknownNode(bogus))
        );
    }

    #[test]
    fn contains_checks_ancestry() {
        let (tree, p, hello, world) = sample();
        assert!(tree.contains(p, world));
        assert!(tree.contains(p, p));
        assert!(!tree.contains(hello, world));
        assert!(!tree.contains(p, NodeId(42)));
    }

    #[test]
    fn unknown_nodes_have_no_children_or_text() {
        let (tree, ..) = sample();
        assert!(tree.children(NodeId(42)).is_empty());
        assert_eq!(tree.text(NodeId(42)), None);
        assert_eq!(tree.text_content(NodeId(42)), "");
    }
}
