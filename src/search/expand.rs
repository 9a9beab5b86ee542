use crate::board::{BoardState, Cell};
use crate::search::alphabeta::Searcher;
use crate::search::node::SearchNode;

impl<'c> Searcher<'c> {
    /// Grows the tree under `node` so that it reaches `plies` levels below it.
    ///
    /// Existing children are descended into; childless nodes at the last
    /// level get one child per empty cell, in scan order, for the side to
    /// move. Stops at the first missed deadline and marks `node` expired,
    /// which may leave the frontier partially built.
    pub fn extend<B: BoardState>(&mut self, node: &mut SearchNode<B>, plies: u32) {
        if plies == 0 {
            return;
        }
        if self.deadline.expired() {
            node.mark_time_expired();
            return;
        }
        if plies > 1 {
            let mut expired = false;
            for child in node.children_mut().iter_mut() {
                if self.deadline.expired() {
                    expired = true;
                    break;
                }
                self.extend(child, plies - 1);
                if child.time_expired() {
                    expired = true;
                    break;
                }
            }
            if expired {
                node.mark_time_expired();
            }
            return;
        }
        // Already expanded, e.g. by a quiescence pass at a shallower depth.
        if !node.is_leaf() {
            return;
        }
        let slots = node.capacity();
        node.children_mut().reserve_exact(slots);
        let acting = node.to_move();
        let (width, height) = (node.board().width(), node.board().height());
        for row in 0..height {
            for col in 0..width {
                if self.deadline.expired() {
                    node.mark_time_expired();
                    return;
                }
                let cell = Cell::new(col, row);
                if node.board().is_empty_at(cell) {
                    let next = node.board().place(cell, acting);
                    node.push_child(SearchNode::new(next, acting));
                }
            }
        }
    }
}
