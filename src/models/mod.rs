mod errors;
#[cfg(test)]
mod tests;
mod transaction;

pub use errors::LedgerError;
pub use transaction::{NewTransaction, Transaction, TransactionChanges};
