mod commands;
mod preferences;
mod seed;
mod transaction_store;

pub use commands::{Command, CommandOutcome};
pub use preferences::Theme;
pub use transaction_store::TransactionStore;
