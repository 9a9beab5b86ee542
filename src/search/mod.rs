pub mod alphabeta;
pub mod clock;
pub mod eval;
pub mod expand;
pub mod node;
pub mod params;
pub mod threat;

pub use alphabeta::{SearchResult, Searcher};
pub use clock::{Clock, Deadline, ManualClock, SystemClock};
pub use eval::{Evaluation, Evaluator, Features, LOSS_SCORE, WIN_SCORE};
pub use node::SearchNode;
pub use params::{Algorithm, SearchParams};
