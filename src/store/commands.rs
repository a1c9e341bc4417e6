use crate::engine::FilterSpec;
use crate::models::{NewTransaction, Transaction, TransactionChanges};
use crate::store::Theme;
use crate::types::{Currency, TransactionId};

/// A discrete user intent applied to a [`TransactionStore`](crate::store::TransactionStore).
#[derive(Debug, Clone)]
pub enum Command {
    AddTransaction(NewTransaction),
    UpdateTransaction {
        id: TransactionId,
        changes: TransactionChanges
    },
    DeleteTransaction(TransactionId),
    ClearTransactions,
    ImportTransactions(Vec<Transaction>),
    SetFilter(FilterSpec),
    SetCurrency(Currency),
    SetTheme(Theme)
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Added(Transaction),
    Updated(Transaction),
    Deleted {
        removed: bool
    },
    Imported {
        count: usize
    },
    Applied,
    /// The command referenced a transaction that does not exist.
    Ignored
}
