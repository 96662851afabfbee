//! Arena-backed span tree.
//!
//! Nodes live in a single `Vec` and are addressed by span id through an
//! index map. Parent links are plain indices, the arena is the only owner.

use crate::utils::config::TREE_ROOT_ID;
use std::collections::{HashMap, VecDeque};

/// Arena slot of the synthetic root
pub(crate) const ROOT_INDEX: usize = 0;

/// One node of the span tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    id: String,
    parent: Option<usize>,
    children: Vec<usize>,
    depth: usize,
}

impl TreeNode {
    fn new(id: String) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            depth: 0,
        }
    }

    /// Span id, or [`TREE_ROOT_ID`] for the synthetic root
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Distance from the synthetic root (root = 0)
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.id == TREE_ROOT_ID
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Rooted, ordered tree of span ids
///
/// Built by [`super::build_span_tree`]. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanTree {
    nodes: Vec<TreeNode>,
    index: HashMap<String, usize>,
}

impl SpanTree {
    /// Tree holding only the synthetic root
    pub(crate) fn with_root() -> Self {
        let mut index = HashMap::new();
        index.insert(TREE_ROOT_ID.to_string(), ROOT_INDEX);

        Self {
            nodes: vec![TreeNode::new(TREE_ROOT_ID.to_string())],
            index,
        }
    }

    /// Register a detached node, returning its arena slot
    pub(crate) fn insert(&mut self, id: String) -> usize {
        let slot = self.nodes.len();
        self.index.insert(id.clone(), slot);
        self.nodes.push(TreeNode::new(id));
        slot
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn is_attached(&self, slot: usize) -> bool {
        self.nodes[slot].parent.is_some()
    }

    /// Append `child` to the children of `parent`
    pub(crate) fn attach(&mut self, child: usize, parent: usize) {
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    /// True when `ancestor` is `slot` itself or lies on its parent chain
    pub(crate) fn is_ancestor_or_self(&self, ancestor: usize, slot: usize) -> bool {
        let mut current = Some(slot);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes[node].parent;
        }
        false
    }

    /// Assign depths top-down, breadth first from the root
    pub(crate) fn assign_depths(&mut self) {
        let mut queue = VecDeque::from([ROOT_INDEX]);
        self.nodes[ROOT_INDEX].depth = 0;

        while let Some(slot) = queue.pop_front() {
            let depth = self.nodes[slot].depth + 1;
            for i in 0..self.nodes[slot].children.len() {
                let child = self.nodes[slot].children[i];
                self.nodes[child].depth = depth;
                queue.push_back(child);
            }
        }
    }

    /// The synthetic root
    pub fn root(&self) -> &TreeNode {
        &self.nodes[ROOT_INDEX]
    }

    /// Look up a node by span id
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        self.index_of(id).map(|slot| &self.nodes[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of real spans in the tree (the root is not counted)
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of levels, counting the root's own level
    ///
    /// A root whose children are all leaves has depth 2, an empty tree 1.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0) + 1
    }

    /// Ordered children of a node
    pub fn children<'a>(&'a self, node: &'a TreeNode) -> impl Iterator<Item = &'a TreeNode> + 'a {
        node.children.iter().map(move |&slot| &self.nodes[slot])
    }

    /// Ordered child ids of the node with the given id
    pub fn children_of(&self, id: &str) -> Option<Vec<&str>> {
        self.find(id)
            .map(|node| self.children(node).map(TreeNode::id).collect())
    }

    /// Parent id of a node; top-level spans report [`TREE_ROOT_ID`]
    ///
    /// `None` for the root itself and for unknown ids.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        let slot = self.index_of(id)?;
        self.nodes[slot].parent.map(|p| self.nodes[p].id.as_str())
    }

    /// Node count of the subtree rooted at `id`, including the node itself
    pub fn size_of(&self, id: &str) -> Option<usize> {
        let slot = self.index_of(id)?;
        let mut size = 0;
        self.walk_from(slot, |_| size += 1);
        Some(size)
    }

    /// Ids from the root down to `id`, both ends included
    pub fn path_to(&self, id: &str) -> Option<Vec<&str>> {
        let mut current = Some(self.index_of(id)?);
        let mut path = Vec::new();

        while let Some(slot) = current {
            path.push(self.nodes[slot].id.as_str());
            current = self.nodes[slot].parent;
        }

        path.reverse();
        Some(path)
    }

    /// Strict descendants of `id` in pre-order
    pub fn descendants(&self, id: &str) -> Option<Vec<&str>> {
        let slot = self.index_of(id)?;
        let mut ids = Vec::new();
        let mut is_start = true;
        self.walk_from(slot, |node| {
            if is_start {
                is_start = false;
            } else {
                ids.push(node.id.as_str());
            }
        });
        Some(ids)
    }

    /// Visit every node in pre-order, starting at the root
    pub fn walk<'a, F>(&'a self, visit: F)
    where
        F: FnMut(&'a TreeNode),
    {
        self.walk_from(ROOT_INDEX, visit);
    }

    fn walk_from<'a, F>(&'a self, start: usize, mut visit: F)
    where
        F: FnMut(&'a TreeNode),
    {
        let mut stack = vec![start];
        while let Some(slot) = stack.pop() {
            let node = &self.nodes[slot];
            visit(node);
            stack.extend(node.children.iter().rev());
        }
    }
}
