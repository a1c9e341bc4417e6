use std::collections::HashSet;
use std::sync::Arc;

use time::Date;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::engine::{apply_view, FilterSpec};
use crate::models::{LedgerError, NewTransaction, Transaction, TransactionChanges};
use crate::stats::{compute_stats, StatsSnapshot};
use crate::storage::{Storage, StorageKeys};
use crate::store::seed::example_transactions;
use crate::store::{Command, CommandOutcome, Theme};
use crate::types::{Currency, TransactionId};

/// Owns the authoritative transaction list together with the view and display
/// preferences derived from it.
///
/// Every mutation serializes the whole collection and writes it before the
/// in-memory state is replaced, so a failed write leaves memory and storage
/// agreeing on the previous state. Subscribers are told about each successful
/// change through a revision counter.
pub struct TransactionStore<S: Storage> {
    storage: Arc<S>,
    keys: StorageKeys,
    transactions: Vec<Transaction>,
    filter: FilterSpec,
    currency: Currency,
    theme: Theme,
    revision: watch::Sender<u64>
}

impl<S: Storage> TransactionStore<S> {
    /// Creates an empty store. Call [`load`](Self::load) to read the persisted state.
    pub fn new(storage: Arc<S>, keys: StorageKeys) -> Self {
        let (revision, _) = watch::channel(0);

        Self {
            storage,
            keys,
            transactions: Vec::new(),
            filter: FilterSpec::default(),
            currency: Currency::default(),
            theme: Theme::default(),
            revision
        }
    }

    /// Reads the persisted snapshot and preferences.
    ///
    /// A missing snapshot is replaced by the example ledger, which is persisted
    /// immediately. An unreadable or corrupted snapshot resets the collection to
    /// empty and is never reported as an error.
    ///
    /// # Errors
    /// Returns `LedgerError` only when the example ledger cannot be written.
    pub fn load(&mut self, today: Date) -> Result<(), LedgerError> {
        self.currency = self.read_preference(&self.keys.currency)
            .map(|symbol| Currency::new(&symbol))
            .unwrap_or_default();

        self.theme = self.read_preference(&self.keys.theme)
            .and_then(|theme| Theme::parse(&theme))
            .unwrap_or_default();

        let raw = match self.storage.get(&self.keys.expenses) {
            Ok(raw) => raw,
            Err(error) => {
                warn!("Stored transactions could not be read, starting empty: {error}");
                self.transactions = Vec::new();
                self.notify();
                return Ok(());
            }
        };

        match raw {
            None => {
                info!("No stored transactions found, seeding example ledger");
                self.commit(example_transactions(today)?)?;
            }
            Some(raw) => {
                self.transactions = serde_json::from_str(&raw).unwrap_or_else(|error| {
                    warn!("Stored transactions are corrupted, starting empty: {error}");
                    Vec::new()
                });
                self.notify();
            }
        }

        debug!("Loaded {} transactions", self.transactions.len());

        Ok(())
    }

    /// Validates and stores a new transaction at the front of the collection.
    ///
    /// # Errors
    /// Returns `LedgerError::Validation` for a non-positive amount or an empty
    /// category, and `LedgerError::Persistence` if the snapshot cannot be written.
    pub fn add(&mut self, candidate: NewTransaction) -> Result<Transaction, LedgerError> {
        let transaction = candidate.into_transaction(TransactionId::generate())?;

        let mut next = Vec::with_capacity(self.transactions.len() + 1);
        next.push(transaction.clone());
        next.extend(self.transactions.iter().cloned());

        self.commit(next)?;

        debug!("Added transaction [{}] of {}{}", transaction.id, transaction.currency, transaction.amount);

        Ok(transaction)
    }

    /// Replaces the editable fields of an existing transaction, keeping its id.
    ///
    /// # Errors
    /// Returns `LedgerError::NotFound` if no transaction has `id`.
    pub fn update(&mut self, id: &TransactionId, changes: TransactionChanges) -> Result<Transaction, LedgerError> {
        let index = self.position(id).ok_or_else(|| LedgerError::not_found(id))?;
        let updated = changes.apply_to(&self.transactions[index])?;

        let mut next = self.transactions.clone();
        next[index] = updated.clone();

        self.commit(next)?;

        debug!("Updated transaction [{id}]");

        Ok(updated)
    }

    /// Removes the transaction with `id`. Removing an unknown id is not an error.
    ///
    /// Returns whether a transaction was removed.
    pub fn remove(&mut self, id: &TransactionId) -> Result<bool, LedgerError> {
        let next: Vec<Transaction> = self.transactions.iter()
            .filter(|transaction| transaction.id != *id)
            .cloned()
            .collect();

        let removed = next.len() != self.transactions.len();

        self.commit(next)?;

        debug!("Removed transaction [{id}]: {removed}");

        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<(), LedgerError> {
        self.commit(Vec::new())?;

        debug!("Cleared all transactions");

        Ok(())
    }

    /// Appends fully parsed imported records.
    ///
    /// Imported ids are kept unless they collide with an id already present, in
    /// which case the record gets a fresh one.
    pub fn import(&mut self, imported: Vec<Transaction>) -> Result<usize, LedgerError> {
        let mut seen: HashSet<TransactionId> = self.transactions.iter().map(|transaction| transaction.id.clone()).collect();
        let mut next = self.transactions.clone();
        let count = imported.len();

        for mut transaction in imported {
            if !seen.insert(transaction.id.clone()) {
                transaction.id = TransactionId::generate();
                seen.insert(transaction.id.clone());
            }

            next.push(transaction);
        }

        self.commit(next)?;

        info!("Imported {count} transactions");

        Ok(count)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn find(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|transaction| transaction.id == *id)
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
        self.notify();
    }

    /// The transactions matching the current filter, in its sort order.
    pub fn view(&self) -> Vec<Transaction> {
        apply_view(&self.transactions, &self.filter)
    }

    pub fn stats(&self, today: Date) -> StatsSnapshot {
        compute_stats(&self.transactions, &self.currency, today)
    }

    pub fn selected_currency(&self) -> &Currency {
        &self.currency
    }

    pub fn set_currency(&mut self, currency: Currency) -> Result<(), LedgerError> {
        self.storage.set(&self.keys.currency, currency.as_str())?;
        self.currency = currency;
        self.notify();

        Ok(())
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), LedgerError> {
        self.storage.set(&self.keys.theme, &theme.to_string())?;
        self.theme = theme;
        self.notify();

        Ok(())
    }

    /// Applies a single user intent.
    ///
    /// Edits that reference a missing transaction are logged and reported as
    /// [`CommandOutcome::Ignored`] rather than failing.
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, LedgerError> {
        match command {
            Command::AddTransaction(candidate) => self.add(candidate).map(CommandOutcome::Added),
            Command::UpdateTransaction { id, changes } => match self.update(&id, changes) {
                Ok(updated) => Ok(CommandOutcome::Updated(updated)),
                Err(LedgerError::NotFound { id }) => {
                    warn!("Ignoring edit of missing transaction [{id}]");
                    Ok(CommandOutcome::Ignored)
                }
                Err(error) => Err(error)
            },
            Command::DeleteTransaction(id) => self.remove(&id).map(|removed| CommandOutcome::Deleted { removed }),
            Command::ClearTransactions => self.clear().map(|_| CommandOutcome::Applied),
            Command::ImportTransactions(imported) => self.import(imported).map(|count| CommandOutcome::Imported { count }),
            Command::SetFilter(filter) => {
                self.set_filter(filter);
                Ok(CommandOutcome::Applied)
            }
            Command::SetCurrency(currency) => self.set_currency(currency).map(|_| CommandOutcome::Applied),
            Command::SetTheme(theme) => self.set_theme(theme).map(|_| CommandOutcome::Applied)
        }
    }

    /// Receives the revision number after every successful state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn position(&self, id: &TransactionId) -> Option<usize> {
        self.transactions.iter().position(|transaction| transaction.id == *id)
    }

    fn read_preference(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(error) => {
                warn!("Preference [{key}] could not be read, using default: {error}");
                None
            }
        }
    }

    fn commit(&mut self, next: Vec<Transaction>) -> Result<(), LedgerError> {
        let snapshot = serde_json::to_string(&next)?;
        self.storage.set(&self.keys.expenses, &snapshot)?;
        self.transactions = next;
        self.notify();

        Ok(())
    }

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}
