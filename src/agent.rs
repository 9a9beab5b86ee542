use log::debug;

use crate::board::{BoardState, Cell, Player};
use crate::error::Result;
use crate::search::{Clock, Deadline, SearchParams, SearchResult, Searcher, SystemClock};

/// Budget used when the harness does not pass one.
pub const DEFAULT_BUDGET_MS: i64 = 5000;

/// A connect-K player. Holds no search state between turns.
#[derive(Debug, Clone)]
pub struct Agent {
    side: Player,
    params: SearchParams,
}

impl Agent {
    pub fn new<B: BoardState>(side: Player, initial: &B) -> Self {
        debug!(
            "agent for {} on {}x{} board, k={}",
            side,
            initial.width(),
            initial.height(),
            initial.k()
        );
        Self { side, params: SearchParams::default() }
    }

    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    pub fn side(&self) -> Player { self.side }

    pub fn params(&self) -> &SearchParams { &self.params }

    /// Chooses a cell within `deadline_ms` of wall-clock time.
    pub fn get_move<B: BoardState>(&self, board: &B, deadline_ms: i64) -> Result<Cell> {
        let clock = SystemClock::start();
        Ok(self.search_with_clock(board, deadline_ms, &clock)?.best_move)
    }

    pub fn get_move_default<B: BoardState>(&self, board: &B) -> Result<Cell> {
        self.get_move(board, DEFAULT_BUDGET_MS)
    }

    /// Full search against an injected clock.
    pub fn search_with_clock<B: BoardState>(
        &self,
        board: &B,
        deadline_ms: i64,
        clock: &dyn Clock,
    ) -> Result<SearchResult> {
        let deadline = Deadline::from_budget(clock, deadline_ms, self.params.deadline_fraction)?;
        let mut searcher = Searcher::new(self.side, self.params, deadline);
        searcher.search_with_params(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Grid;
    use crate::error::Error;
    use crate::search::ManualClock;

    #[test]
    fn rejects_nonpositive_budget_before_searching() {
        let g = Grid::new(3, 3, 3).unwrap();
        let agent = Agent::new(Player::One, &g);
        let clock = ManualClock::frozen();
        let err = agent.search_with_clock(&g, 0, &clock).unwrap_err();
        assert!(matches!(err, Error::InvalidTimeBudget { ms: 0 }));
        assert_eq!(clock.polls(), 0);
    }

    #[test]
    fn rejects_full_board() {
        let g = Grid::parse(2, "XO/OX").unwrap();
        let agent = Agent::new(Player::One, &g);
        assert!(matches!(agent.get_move(&g, 100), Err(Error::BoardFull)));
    }

    #[test]
    fn rejects_finished_game_without_fallback() {
        let g = Grid::parse(3, "O../XXX/O..").unwrap();
        let agent = Agent::new(Player::Two, &g);
        let clock = ManualClock::frozen();
        let err = agent.search_with_clock(&g, 100, &clock).unwrap_err();
        assert!(matches!(err, Error::GameOver { winner: Player::One }));
    }

    #[test]
    fn real_clock_returns_an_empty_cell() {
        let g = Grid::parse(3, "X../.O./...").unwrap();
        let agent = Agent::new(Player::One, &g);
        let cell = agent.get_move(&g, 200).unwrap();
        assert!(g.get(cell).is_none());
    }
}
