use std::collections::HashMap;

use crate::model::PaymentBreakdown;

/// Breakdown records keyed by `(item_id, payment_id)`
#[derive(Debug, Default, Clone)]
pub struct BreakdownIndex {
    entries: HashMap<(u64, u64), PaymentBreakdown>,
}

impl BreakdownIndex {
    /// Index breakdowns in one pass. A repeated key keeps the last record seen.
    pub fn build(breakdowns: &[PaymentBreakdown]) -> Self {
        let mut entries = HashMap::with_capacity(breakdowns.len());
        for b in breakdowns {
            if let Some(prev) = entries.insert((b.item_id, b.payment_id), b.clone()) {
                tracing::debug!(
                    item_id = b.item_id,
                    payment_id = b.payment_id,
                    replaced = %prev.id,
                    "duplicate payment breakdown key"
                );
            }
        }
        Self { entries }
    }

    pub fn lookup(&self, item_id: u64, payment_id: u64) -> Option<&PaymentBreakdown> {
        self.entries.get(&(item_id, payment_id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
