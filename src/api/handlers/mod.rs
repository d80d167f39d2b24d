pub mod bets;
pub mod ops;
pub mod stats;
pub mod transactions;
