use crate::storage::Subscription;

/// Sum the monthly price over a set of subscription records.
///
/// Every record contributes its full price exactly once; `end_date` is
/// not consulted. An empty set totals 0.
pub fn total_cost(subscriptions: &[Subscription]) -> i64 {
    subscriptions.iter().map(|sub| sub.price).sum()
}
