use crate::board::{BoardState, Player};

/// A board snapshot plus the metadata one search pass reads and writes.
///
/// Nodes live only for a single move selection; the whole tree is dropped
/// once the move is chosen.
#[derive(Debug, Clone)]
pub struct SearchNode<B> {
    board: B,
    /// Filled left to right by the expander, never beyond `capacity`.
    /// Allocated only when the node is expanded.
    children: Vec<SearchNode<B>>,
    capacity: usize,
    heuristic: i32,
    best_child: Option<usize>,
    mover: Player,
    time_expired: bool,
    quiescent: bool,
}

impl<B: BoardState> SearchNode<B> {
    /// Wraps `board`, which was produced by a move of `mover`.
    pub fn new(board: B, mover: Player) -> Self {
        let capacity = board.empty_cells();
        Self {
            board,
            children: Vec::new(),
            capacity,
            heuristic: 0,
            best_child: None,
            mover,
            time_expired: false,
            quiescent: true,
        }
    }

    pub fn board(&self) -> &B { &self.board }

    /// Side that made the move producing this board.
    pub fn mover(&self) -> Player { self.mover }

    /// Side whose move it is at this node.
    pub fn to_move(&self) -> Player { self.mover.opponent() }

    pub fn children(&self) -> &[SearchNode<B>] { &self.children }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<SearchNode<B>> { &mut self.children }

    /// Upper bound on the number of children: empty cells at creation.
    pub fn capacity(&self) -> usize { self.capacity }

    pub fn is_leaf(&self) -> bool { self.children.is_empty() }

    pub(crate) fn push_child(&mut self, child: SearchNode<B>) {
        debug_assert!(self.children.len() < self.capacity, "child slots exhausted");
        if self.children.len() < self.capacity {
            self.children.push(child);
        }
    }

    pub fn heuristic(&self) -> i32 { self.heuristic }

    pub(crate) fn set_heuristic(&mut self, h: i32) { self.heuristic = h; }

    /// Index of the best successor; only meaningful after a completed pass.
    pub fn best_child_index(&self) -> Option<usize> { self.best_child }

    pub fn best_child(&self) -> Option<&SearchNode<B>> {
        self.best_child.and_then(|i| self.children.get(i))
    }

    pub(crate) fn set_best_child(&mut self, idx: usize) { self.best_child = Some(idx); }

    /// Once set, `heuristic` and `best_child` must not be trusted.
    pub fn time_expired(&self) -> bool { self.time_expired }

    pub(crate) fn mark_time_expired(&mut self) { self.time_expired = true; }

    pub fn quiescent(&self) -> bool { self.quiescent }

    pub(crate) fn set_quiescent(&mut self, quiescent: bool) { self.quiescent = quiescent; }

    /// Total number of nodes in this subtree, including `self`.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(SearchNode::subtree_size).sum::<usize>()
    }

    /// Depth of the deepest leaf below this node.
    pub fn height(&self) -> usize {
        self.children.iter().map(|c| 1 + c.height()).max().unwrap_or(0)
    }
}
