//! Search nodes stored in an index-based arena
//!
//! A node records how its state was reached: the parent node, the action
//! applied to the parent, and the accumulated path cost. Parents are
//! referenced by [`NodeId`] rather than by pointer, so the tree owns every
//! node and path reconstruction is a walk over indices.

use super::graph::StateSpace;

/// Index of a node inside its [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node of the search tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<S, A> {
    pub state: S,
    /// `None` only for the root
    pub parent: Option<NodeId>,
    /// Action applied to the parent to reach this node (`None` for the root)
    pub action: Option<A>,
    /// Number of actions from the root (unit edge costs)
    pub path_cost: u32,
}

impl<S, A> Node<S, A> {
    pub fn root(state: S) -> Self {
        Self {
            state,
            parent: None,
            action: None,
            path_cost: 0,
        }
    }
}

/// Arena of nodes built by one search invocation.
///
/// Nodes are only appended, and a child is always created after its parent,
/// so parent indices are strictly smaller than child indices.
#[derive(Debug, Clone)]
pub struct SearchTree<S, A> {
    nodes: Vec<Node<S, A>>,
}

impl<S, A> SearchTree<S, A> {
    /// Create a tree containing only the root node
    pub fn new(root_state: S) -> (Self, NodeId) {
        let tree = Self {
            nodes: vec![Node::root(root_state)],
        };
        (tree, NodeId(0))
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<S, A> {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node produced by [`SearchTree::expand`]
    pub fn insert(&mut self, node: Node<S, A>) -> NodeId {
        debug_assert!(node.parent.map_or(true, |p| p.0 < self.nodes.len()));
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// One child node per successor of `id`'s state, each costing one more
    /// than its parent. Does not modify the tree.
    pub fn expand<P>(&self, id: NodeId, space: &P) -> Vec<Node<S, A>>
    where
        P: StateSpace<State = S, Action = A>,
    {
        let parent = self.get(id);
        space
            .successors(&parent.state)
            .into_iter()
            .map(|(action, state)| Node {
                state,
                parent: Some(id),
                action: Some(action),
                path_cost: parent.path_cost + 1,
            })
            .collect()
    }

    /// Actions leading from the root to `id`, in application order
    pub fn actions_to(&self, id: NodeId) -> Vec<A>
    where
        A: Clone,
    {
        let mut actions = Vec::with_capacity(self.get(id).path_cost as usize);
        let mut current = id;
        while let Some(parent) = self.get(current).parent {
            if let Some(action) = &self.get(current).action {
                actions.push(action.clone());
            }
            current = parent;
        }
        actions.reverse();
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Board, EightPuzzle, Move};

    #[test]
    fn test_root_node() {
        let (tree, root) = SearchTree::<Board, Move>::new(Board::goal());
        let node = tree.get(root);
        assert_eq!(node.parent, None);
        assert_eq!(node.action, None);
        assert_eq!(node.path_cost, 0);
        assert_eq!(tree.len(), 1);
        assert!(tree.actions_to(root).is_empty());
    }

    #[test]
    fn test_expand_is_pure() {
        let board: Board = "1234_5678".parse().unwrap();
        let (tree, root) = SearchTree::new(board);
        let children = tree.expand(root, &EightPuzzle);

        assert_eq!(children.len(), 4);
        assert_eq!(tree.len(), 1);
        for child in &children {
            assert_eq!(child.parent, Some(root));
            assert_eq!(child.path_cost, 1);
            let action = child.action.unwrap();
            assert_eq!(board.apply(action), Some(child.state));
        }
    }

    #[test]
    fn test_path_cost_accumulates() {
        let board: Board = "1234_5678".parse().unwrap();
        let (mut tree, root) = SearchTree::new(board);

        let child = tree.expand(root, &EightPuzzle).remove(0);
        let child_id = tree.insert(child);
        let grandchild = tree.expand(child_id, &EightPuzzle).remove(0);
        assert_eq!(grandchild.path_cost, 2);
        assert!(child_id.index() > root.index());

        let grandchild_id = tree.insert(grandchild);
        let actions = tree.actions_to(grandchild_id);
        assert_eq!(actions.len(), 2);
        assert_eq!(
            board.apply_all(&actions).unwrap(),
            tree.get(grandchild_id).state
        );
    }
}
