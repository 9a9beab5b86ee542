// Time-bounded alpha-beta engine for connect-K
pub mod agent;
pub mod board;
pub mod error;
pub mod search;
pub mod selfplay;

pub use agent::Agent;
pub use board::{BoardState, Cell, Grid, Player};
pub use error::{Error, Result};
pub use search::{SearchParams, SearchResult};
