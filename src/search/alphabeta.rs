use log::{debug, info, warn};
use serde::Serialize;

use crate::board::{diff, first_empty, validate, BoardState, Cell, Player};
use crate::error::{Error, Result};
use crate::search::clock::Deadline;
use crate::search::eval::{is_decided, Evaluator, LOSS_SCORE, WIN_SCORE};
use crate::search::node::SearchNode;
use crate::search::params::{Algorithm, SearchParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub best_move: Cell,
    /// Root value at `depth_reached`; meaningless when `fallback` is set.
    pub score: i32,
    pub depth_reached: u32,
    /// Number of static evaluations performed.
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub timed_out: bool,
    /// No depth completed in time; `best_move` is the first empty cell.
    pub fallback: bool,
}

/// Depth-first searcher for a single move decision.
///
/// All state lives for one turn. Every recursive step polls the deadline and
/// unwinds by marking nodes `time_expired` instead of returning an error.
pub struct Searcher<'c> {
    pub(crate) evaluator: Evaluator,
    pub(crate) params: SearchParams,
    pub(crate) deadline: Deadline<'c>,
    pub(crate) nodes: u64,
}

impl<'c> Searcher<'c> {
    pub fn new(side: Player, params: SearchParams, deadline: Deadline<'c>) -> Self {
        Self { evaluator: Evaluator::new(side, params.threat_weight), params, deadline, nodes: 0 }
    }

    pub fn side(&self) -> Player { self.evaluator.side() }

    pub fn nodes(&self) -> u64 { self.nodes }

    /// Root node for a search from `board`: the opponent is the last mover.
    pub fn root<B: BoardState>(&self, board: &B) -> SearchNode<B> {
        SearchNode::new(board.clone(), self.side().opponent())
    }

    /// Iterative deepening: grow the tree one ply, search it, keep the root's
    /// best move, repeat until the deadline, the depth cap or the number of
    /// empty cells is reached.
    pub fn search_with_params<B: BoardState>(&mut self, board: &B) -> Result<SearchResult> {
        validate(board)?;
        self.params.validate()?;
        self.nodes = 0;
        let started = self.deadline.elapsed();
        let empties = board.empty_cells() as u32;
        let max_depth = self.params.max_depth.map_or(empties, |d| d.min(empties));

        let mut root = self.root(board);
        let mut chosen: Option<(Cell, i32)> = None;
        let mut depth_reached = 0;
        let mut timed_out = false;

        for depth in 1..=max_depth {
            if self.deadline.expired() {
                timed_out = true;
                break;
            }
            self.extend(&mut root, depth);
            if root.time_expired() || self.deadline.expired() {
                timed_out = true;
                break;
            }
            self.search_depth(&mut root, depth);
            if root.time_expired() || self.deadline.expired() {
                timed_out = true;
                break;
            }
            let Some(cell) = root.best_child().and_then(|c| diff(board, c.board())) else { break };
            chosen = Some((cell, root.heuristic()));
            depth_reached = depth;
            debug!(
                "depth {} best {} score {} nodes {} tree {}",
                depth,
                cell,
                root.heuristic(),
                self.nodes,
                root.subtree_size()
            );
            if is_decided(root.heuristic()) {
                debug!("root value decided at depth {}", depth);
                break;
            }
        }

        let elapsed_ms = self.deadline.elapsed().saturating_sub(started).as_millis() as u64;
        let result = match chosen {
            Some((best_move, score)) => SearchResult {
                best_move,
                score,
                depth_reached,
                nodes: self.nodes,
                elapsed_ms,
                timed_out,
                fallback: false,
            },
            None => {
                let best_move = first_empty(board).ok_or(Error::BoardFull)?;
                warn!("no depth completed before the deadline; playing first empty cell {}", best_move);
                SearchResult {
                    best_move,
                    score: 0,
                    depth_reached: 0,
                    nodes: self.nodes,
                    elapsed_ms,
                    timed_out,
                    fallback: true,
                }
            }
        };
        info!(
            "{} plays {} (depth {}, score {}, nodes {}, {} ms)",
            self.side(),
            result.best_move,
            result.depth_reached,
            result.score,
            result.nodes,
            result.elapsed_ms
        );
        Ok(result)
    }

    /// One full-width pass over an already expanded tree with the configured algorithm.
    pub fn search_depth<B: BoardState>(&mut self, root: &mut SearchNode<B>, depth: u32) {
        match self.params.algorithm {
            Algorithm::AlphaBeta => self.alpha_beta(root, depth, LOSS_SCORE, WIN_SCORE, true),
            Algorithm::Minimax => self.minimax(root, depth, true),
        }
    }

    /// Evaluates `node` in place: updates its quiescence flag and marks it
    /// expired if the scan was cut short. Returns the score.
    pub fn evaluate<B: BoardState>(&mut self, node: &mut SearchNode<B>) -> i32 {
        self.nodes += 1;
        let e = self.evaluator.evaluate(node.board(), node.mover(), &self.deadline);
        if !e.complete {
            node.mark_time_expired();
        }
        node.set_quiescent(e.quiescent);
        e.score
    }

    /// Scores a node at the search horizon, extending it when it is not quiescent.
    fn settle_leaf<B: BoardState>(&mut self, node: &mut SearchNode<B>, score: i32, maximizing: bool) {
        node.set_heuristic(score);
        if self.params.quiescence && !node.quiescent() {
            self.quiescence(node, maximizing);
        }
    }

    /// Plain minimax. Ties go to the most recently examined child.
    pub fn minimax<B: BoardState>(&mut self, node: &mut SearchNode<B>, depth: u32, maximizing: bool) {
        if self.deadline.expired() {
            node.mark_time_expired();
            return;
        }
        let score = self.evaluate(node);
        if node.time_expired() {
            return;
        }
        if is_decided(score) {
            node.set_heuristic(score);
            return;
        }
        if depth == 0 || node.is_leaf() {
            self.settle_leaf(node, score, maximizing);
            return;
        }

        let mut best = if maximizing { LOSS_SCORE } else { WIN_SCORE };
        let mut best_idx = None;
        let mut expired = false;
        for (i, child) in node.children_mut().iter_mut().enumerate() {
            self.minimax(child, depth - 1, !maximizing);
            if child.time_expired() || self.deadline.expired() {
                expired = true;
                break;
            }
            let h = child.heuristic();
            if (maximizing && h >= best) || (!maximizing && h <= best) {
                best = h;
                best_idx = Some(i);
            }
        }
        if expired {
            node.mark_time_expired();
            return;
        }
        node.set_heuristic(best);
        if let Some(i) = best_idx {
            node.set_best_child(i);
        }
    }

    /// Alpha-beta with best-first ordering from the previous pass's values.
    /// Only a strict improvement replaces the recorded best child.
    pub fn alpha_beta<B: BoardState>(
        &mut self,
        node: &mut SearchNode<B>,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) {
        if self.deadline.expired() {
            node.mark_time_expired();
            return;
        }
        let score = self.evaluate(node);
        if node.time_expired() {
            return;
        }
        if is_decided(score) {
            node.set_heuristic(score);
            return;
        }
        if depth == 0 || node.is_leaf() {
            self.settle_leaf(node, score, maximizing);
            return;
        }

        // Stable sort keeps scan order among equal values.
        if maximizing {
            node.children_mut().sort_by(|a, b| b.heuristic().cmp(&a.heuristic()));
        } else {
            node.children_mut().sort_by_key(|c| c.heuristic());
        }

        let mut best = if maximizing { LOSS_SCORE } else { WIN_SCORE };
        let mut best_idx = None;
        let mut expired = false;
        for (i, child) in node.children_mut().iter_mut().enumerate() {
            if self.deadline.expired() {
                expired = true;
                break;
            }
            self.alpha_beta(child, depth - 1, alpha, beta, !maximizing);
            if child.time_expired() {
                expired = true;
                break;
            }
            let h = child.heuristic();
            if maximizing {
                if best_idx.is_none() || h > best {
                    best = h;
                    best_idx = Some(i);
                }
                alpha = alpha.max(best);
            } else {
                if best_idx.is_none() || h < best {
                    best = h;
                    best_idx = Some(i);
                }
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }
        if expired {
            node.mark_time_expired();
            return;
        }
        node.set_heuristic(best);
        if let Some(i) = best_idx {
            node.set_best_child(i);
        }
    }

    /// Extends a non-quiescent horizon node one ply at a time until every
    /// branch reaches a quiescent or decided position.
    pub fn quiescence<B: BoardState>(&mut self, node: &mut SearchNode<B>, maximizing: bool) {
        if self.deadline.expired() {
            node.mark_time_expired();
            return;
        }
        if node.quiescent() {
            return;
        }
        self.extend(node, 1);
        if node.time_expired() || node.is_leaf() {
            return;
        }

        let mut best = if maximizing { LOSS_SCORE } else { WIN_SCORE };
        let mut best_idx = None;
        let mut expired = false;
        for (i, child) in node.children_mut().iter_mut().enumerate() {
            let score = self.evaluate(child);
            if child.time_expired() {
                expired = true;
                break;
            }
            child.set_heuristic(score);
            if !is_decided(score) && !child.quiescent() {
                self.quiescence(child, !maximizing);
                if child.time_expired() {
                    expired = true;
                    break;
                }
            }
            let h = child.heuristic();
            if (maximizing && h >= best) || (!maximizing && h <= best) {
                best = h;
                best_idx = Some(i);
            }
        }
        if expired {
            node.mark_time_expired();
            return;
        }
        node.set_heuristic(best);
        if let Some(i) = best_idx {
            node.set_best_child(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Grid;
    use crate::search::clock::ManualClock;
    use std::time::Duration;

    fn frozen_searcher(clock: &ManualClock, params: SearchParams) -> Searcher<'_> {
        Searcher::new(Player::One, params, Deadline::new(clock, Duration::MAX))
    }

    #[test]
    fn minimax_ties_pick_last_alpha_beta_ties_keep_first() {
        // With O in the centre every edge move scores the same at depth 1
        // and beats every corner.
        let g = Grid::parse(3, ".../.O./...").unwrap();
        let clock = ManualClock::frozen();

        let mut mm = frozen_searcher(&clock, SearchParams::default());
        let mut root = mm.root(&g);
        mm.extend(&mut root, 1);
        mm.minimax(&mut root, 1, true);
        let mm_best = root.best_child().unwrap();
        assert_eq!(diff(&g, mm_best.board()), Some(Cell::new(1, 2)));

        let mut ab = frozen_searcher(&clock, SearchParams::default());
        let mut root = ab.root(&g);
        ab.extend(&mut root, 1);
        ab.alpha_beta(&mut root, 1, LOSS_SCORE, WIN_SCORE, true);
        let ab_best = root.best_child().unwrap();
        assert_eq!(diff(&g, ab_best.board()), Some(Cell::new(1, 0)));
        assert_eq!(ab_best.heuristic(), mm_best.heuristic());
    }

    #[test]
    fn non_quiescent_leaf_sees_forced_loss() {
        // O threatens the bottom row; X's move elsewhere leaves a node where
        // O completes next ply. Quiescence turns that leaf into a loss.
        let g = Grid::parse(3, ".../X../OO.").unwrap();
        let clock = ManualClock::frozen();
        let mut s = frozen_searcher(&clock, SearchParams::default());
        let mut root = s.root(&g);
        s.extend(&mut root, 1);
        s.alpha_beta(&mut root, 1, LOSS_SCORE, WIN_SCORE, true);
        let best = root.best_child().unwrap();
        assert_eq!(diff(&g, best.board()), Some(Cell::new(2, 0)));
        assert!(root.children().iter().filter(|c| c.heuristic() == LOSS_SCORE).count() >= 4);
    }

    #[test]
    fn quiescence_disabled_trusts_static_value() {
        let g = Grid::parse(3, ".../X../OO.").unwrap();
        let clock = ManualClock::frozen();
        let params = SearchParams { quiescence: false, ..SearchParams::default() };
        let mut s = frozen_searcher(&clock, params);
        let mut root = s.root(&g);
        s.extend(&mut root, 1);
        s.minimax(&mut root, 1, true);
        assert!(root.children().iter().all(|c| c.heuristic() != LOSS_SCORE));
        assert!(root.children().iter().all(|c| c.is_leaf()));
    }

    #[test]
    fn deadline_during_search_poisons_root() {
        let g = Grid::new(4, 4, 3).unwrap();
        let frozen = ManualClock::frozen();
        let mut root = frozen_searcher(&frozen, SearchParams::default()).root(&g);
        frozen_searcher(&frozen, SearchParams::default()).extend(&mut root, 2);

        let clock = ManualClock::stepping(Duration::from_millis(1));
        let mut s = Searcher::new(Player::One, SearchParams::default(), Deadline::new(&clock, Duration::from_millis(200)));
        s.minimax(&mut root, 2, true);
        assert!(root.time_expired());
    }
}
