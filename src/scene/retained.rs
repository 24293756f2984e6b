//! Slot-vector reference implementation of [`SceneGraph`].

use super::{NodeTag, RectNode, SceneGraph, TextNode};

/// Identifier for a node in a [`RetainedScene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Rect(RectNode),
    Text(TextNode),
}

/// In-memory retained scene.
///
/// Nodes live in slots; removal tombstones the slot so identifiers stay
/// stable across the lifetime of the scene. Software renderers iterate
/// [`RetainedScene::nodes_by_tag`] and paint the property sets directly.
#[derive(Debug, Clone, Default)]
pub struct RetainedScene {
    slots: Vec<Option<(NodeTag, Node)>>,
}

impl RetainedScene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Whether the scene holds no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    fn push(&mut self, tag: NodeTag, node: Node) -> NodeId {
        self.slots.push(Some((tag, node)));
        NodeId(self.slots.len() - 1)
    }
}

impl SceneGraph for RetainedScene {
    type NodeId = NodeId;

    fn create_rect(&mut self, tag: NodeTag) -> NodeId {
        self.push(tag, Node::Rect(RectNode::default()))
    }

    fn create_text(&mut self, tag: NodeTag) -> NodeId {
        self.push(tag, Node::Text(TextNode::default()))
    }

    fn remove(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            *slot = None;
        }
    }

    fn rect(&self, id: NodeId) -> Option<&RectNode> {
        match self.slots.get(id.0)? {
            Some((_, Node::Rect(rect))) => Some(rect),
            _ => None,
        }
    }

    fn rect_mut(&mut self, id: NodeId) -> Option<&mut RectNode> {
        match self.slots.get_mut(id.0)? {
            Some((_, Node::Rect(rect))) => Some(rect),
            _ => None,
        }
    }

    fn text(&self, id: NodeId) -> Option<&TextNode> {
        match self.slots.get(id.0)? {
            Some((_, Node::Text(text))) => Some(text),
            _ => None,
        }
    }

    fn text_mut(&mut self, id: NodeId) -> Option<&mut TextNode> {
        match self.slots.get_mut(id.0)? {
            Some((_, Node::Text(text))) => Some(text),
            _ => None,
        }
    }

    fn nodes_by_tag(&self, tag: NodeTag) -> Vec<NodeId> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Some((slot_tag, _)) if *slot_tag == tag => Some(NodeId(index)),
                _ => None,
            })
            .collect()
    }
}
