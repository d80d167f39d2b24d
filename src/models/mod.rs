pub mod bet;
pub mod transaction;

pub use bet::{Bet, BetStatus, NewBet};
pub use transaction::{NewTransaction, Transaction, TransactionType};
