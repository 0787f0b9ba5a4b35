//! Serialized snapshots
//!
//! A detached description of a subtree (`nodeName`, `attributes`, `children`,
//! or `nodeValue` for `#text`) that carries no style or geometry.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{DomError, DomTree, NodeId};

const TEXT_NODE_TYPE: u8 = 3;

/// One serialized node
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub node_name: String,
    #[serde(default)]
    pub node_type: Option<u8>,
    #[serde(default)]
    pub node_value: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<Snapshot>,
}

impl Snapshot {
    pub fn element(name: &str) -> Self {
        Self {
            node_name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn text(value: &str) -> Self {
        Self {
            node_name: "#text".to_string(),
            node_type: Some(TEXT_NODE_TYPE),
            node_value: Some(value.to_string()),
            ..Self::default()
        }
    }

    pub fn with_child(mut self, child: Snapshot) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    fn is_text(&self) -> bool {
        self.node_type == Some(TEXT_NODE_TYPE) || self.node_name == "#text"
    }

    /// Build a tree whose document element is this snapshot
    pub fn to_tree(&self) -> Result<DomTree, DomError> {
        if self.is_text() {
            return Err(DomError::InvalidSnapshot("root must be an element".into()));
        }
        let mut tree = DomTree::new();
        self.attach(&mut tree, NodeId::ROOT)?;
        tracing::debug!(nodes = tree.len(), root = %self.node_name, "loaded snapshot");
        Ok(tree)
    }

    fn attach(&self, tree: &mut DomTree, parent: NodeId) -> Result<(), DomError> {
        if self.is_text() {
            let text = tree.create_text(self.node_value.clone().unwrap_or_default());
            return tree.append_child(parent, text);
        }
        if self.node_name.is_empty() {
            return Err(DomError::InvalidSnapshot("element without nodeName".into()));
        }

        let id = tree.create_element(&self.node_name);
        if let Some(el) = tree.get_mut(id).and_then(|n| n.as_element_mut()) {
            for (name, value) in &self.attributes {
                el.set_attr(name, value.as_str());
            }
        }
        tree.append_child(parent, id)?;
        for child in &self.children {
            child.attach(tree, id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_to_tree() {
        let snap = Snapshot::element("div")
            .with_attr("id", "target")
            .with_child(Snapshot::text("hello"));
        let tree = snap.to_tree().unwrap();
        let div = tree.document_element().unwrap();
        assert_eq!(tree.tag_name(div), Some("div"));
        assert_eq!(tree.element_by_id("target"), Some(div));
        assert_eq!(tree.text_content(div), "hello");
    }

    #[test]
    fn test_text_root_rejected() {
        assert!(Snapshot::text("x").to_tree().is_err());
    }
}
