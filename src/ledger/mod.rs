pub mod actions;
pub mod board;
pub mod lifecycle;
pub mod messages;
pub mod period;
pub mod stats;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use board::{build_board, BetBoard};
pub use lifecycle::{Outcome, Transition};
pub use period::{unique_months, Month, PeriodFilter};
pub use stats::{compute_stats, OverallStats};
