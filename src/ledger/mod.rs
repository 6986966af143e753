//! Filter, group, index and roll up one snapshot of purchase data.

mod filter;
mod group;
mod index;
mod totals;

pub use filter::{FilterOptions, Filters, ALL};
pub use group::{group_consumptions, GroupOrder, Grouping, SalesOrderGroup, SupplierItemGroup};
pub use index::BreakdownIndex;
pub use totals::{
    grand_total, item_ordered, item_payment, payment_grand_total, payment_subtotal, subtotal,
    Aggregate, Totals,
};

use crate::model::{Payment, PaymentBreakdown, Snapshot};

/// Everything the tables need, derived fresh from one snapshot
#[derive(Debug, Clone)]
pub struct Ledger {
    pub grouping: Grouping,
    pub payments: Vec<Payment>,
    pub index: BreakdownIndex,
    pub filters: Filters,
    /// Options come from the unfiltered records
    pub options: FilterOptions,
}

impl Ledger {
    pub fn build(snapshot: &Snapshot, filters: &Filters, order: GroupOrder) -> Self {
        let filtered = filters.apply(&snapshot.consumptions);
        tracing::debug!(
            total = snapshot.consumptions.len(),
            kept = filtered.len(),
            filters = %filters.describe(),
            "filtered consumptions"
        );

        let mut grouping = group_consumptions(filtered);
        grouping.sort(order);

        Self {
            grouping,
            payments: snapshot.payments.clone(),
            index: BreakdownIndex::build(&snapshot.payment_breakdowns),
            filters: filters.clone(),
            options: FilterOptions::from_consumptions(&snapshot.consumptions),
        }
    }

    pub fn lookup(&self, item_id: u64, payment_id: u64) -> Option<&PaymentBreakdown> {
        self.index.lookup(item_id, payment_id)
    }

    pub fn total(&self) -> Totals {
        self.grouping.ordered()
    }

    pub fn payment_total(&self, payment_id: u64) -> Totals {
        payment_grand_total(&self.grouping, payment_id, &self.index)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{breakdown, consumption, scenario};
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            consumptions: scenario(),
            payments: Vec::new(),
            payment_breakdowns: vec![breakdown(1, 100, 5.0, 25.0), breakdown(3, 100, 1.0, 10.0)],
        }
    }

    #[test]
    fn build_runs_the_whole_pipeline() {
        let ledger = Ledger::build(&snapshot(), &Filters::default(), GroupOrder::FirstSeen);

        assert_eq!(ledger.grouping.groups.len(), 2);
        assert_eq!(ledger.total().amount, 180.0);
        assert_eq!(ledger.payment_total(100), Totals::new(6.0, 35.0));
        assert!(ledger.lookup(2, 100).is_none());
        assert_eq!(ledger.options.style_numbers, vec!["S1"]);
    }

    #[test]
    fn filters_apply_before_grouping() {
        let mut snap = snapshot();
        snap.consumptions
            .push(consumption(4, 12, "S9", "C", "Linen", "Blue", 70.0));
        let filters = Filters {
            fabric_name: Some("Linen".to_string()),
            ..Default::default()
        };
        let ledger = Ledger::build(&snap, &filters, GroupOrder::FirstSeen);

        assert_eq!(ledger.grouping.groups.len(), 1);
        assert_eq!(ledger.grouping.groups[0].sales_order_id, 12);
        assert_eq!(ledger.total().amount, 70.0);
        assert_eq!(ledger.payment_total(100), Totals::ZERO);
        // options still list every value
        assert_eq!(ledger.options.fabric_names, vec!["Cotton", "Linen"]);
    }

    #[test]
    fn rebuild_is_independent() {
        let mut snap = snapshot();
        let first = Ledger::build(&snap, &Filters::default(), GroupOrder::FirstSeen);
        snap.consumptions[0].order_amount = 1_000.0;
        let second = Ledger::build(&snap, &Filters::default(), GroupOrder::FirstSeen);

        assert_eq!(first.total().amount, 180.0);
        assert_eq!(second.total().amount, 1_080.0);
    }
}
