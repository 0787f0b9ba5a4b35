//! DOM Tree (arena-based allocation)

use crate::{DomError, Node, NodeData, NodeId};

/// Arena-based DOM tree
///
/// Slot 0 is always the document node.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree holds nothing but the document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Allocate a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::element(tag))
    }

    /// Allocate a detached text node
    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.alloc(Node::text(content))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        match self.get(parent).map(|n| &n.data) {
            None => return Err(DomError::UnknownNode(parent)),
            Some(NodeData::Text(_)) => return Err(DomError::NotAContainer(parent)),
            Some(_) => {}
        }
        let Some(node) = self.get(child) else {
            return Err(DomError::UnknownNode(child));
        };
        if !node.parent.is_none() {
            return Err(DomError::AlreadyAttached(child));
        }
        if child == parent || self.is_ancestor_of(child, parent) {
            return Err(DomError::WouldCycle { parent, child });
        }

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_none() {
            self.nodes[parent.index()].first_child = child;
        } else {
            self.nodes[last.index()].next_sibling = child;
        }
        self.nodes[parent.index()].last_child = child;
        Ok(())
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| !p.is_none())
    }

    /// Children in order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// Ancestors, nearest first (excluding `id`)
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&n| self.parent(n))
    }

    /// Whether `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// The `<html>` element (first element child of the document)
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT).find(|&c| self.nodes[c.index()].is_element())
    }

    /// Pre-order traversal starting at (and including) `from`
    pub fn preorder(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if self.get(id).is_none() {
                continue;
            }
            out.push(id);
            let mut kids: Vec<NodeId> = self.children(id).collect();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.preorder(id)
            .into_iter()
            .filter_map(|n| self.nodes[n.index()].as_text())
            .collect()
    }

    /// First element with the given `id` attribute
    pub fn element_by_id(&self, value: &str) -> Option<NodeId> {
        self.preorder(NodeId::ROOT).into_iter().find(|&n| {
            self.nodes[n.index()]
                .as_element()
                .and_then(|e| e.id())
                .is_some_and(|id| id == value)
        })
    }

    /// Lowercase tag name for elements
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.tag.as_str())
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.next.is_none() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).map(|n| n.next_sibling).unwrap_or(NodeId::NONE);
        Some(current)
    }
}
