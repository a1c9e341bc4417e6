use crate::engine::FilterSpec;
use crate::models::Transaction;

/// Derives the ordered view described by `spec`.
///
/// The input is never reordered or modified; matching records are cloned and
/// filtered before they are sorted.
pub fn apply_view(transactions: &[Transaction], spec: &FilterSpec) -> Vec<Transaction> {
    let mut view: Vec<Transaction> = transactions.iter()
        .filter(|transaction| spec.matches(transaction))
        .cloned()
        .collect();

    view.sort_by(|left, right| spec.sort.compare(left, right));

    view
}
