//! Quantity/amount rollups at item, supplier-group, sales-order and report level.
//!
//! Every sum is a left fold in group traversal order, and each level folds the
//! totals of the level below it, so a grand total is exactly the sum of its
//! subtotals and repeated runs are bit-identical. No rounding happens here.

use serde::Serialize;
use std::ops::{Add, AddAssign};

use super::group::{Grouping, SalesOrderGroup, SupplierItemGroup};
use super::index::BreakdownIndex;
use crate::model::Consumption;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub quantity: f64,
    pub amount: f64,
}

impl Totals {
    pub const ZERO: Totals = Totals {
        quantity: 0.0,
        amount: 0.0,
    };

    pub fn new(quantity: f64, amount: f64) -> Self {
        Self { quantity, amount }
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, rhs: Totals) -> Totals {
        Totals {
            quantity: self.quantity + rhs.quantity,
            amount: self.amount + rhs.amount,
        }
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, rhs: Totals) {
        *self = *self + rhs;
    }
}

fn fold<I: IntoIterator<Item = Totals>>(parts: I) -> Totals {
    parts.into_iter().fold(Totals::ZERO, |acc, t| acc + t)
}

/// Ordered quantity and amount of one record
pub fn item_ordered(item: &Consumption) -> Totals {
    Totals::new(item.order_quantity, item.order_amount)
}

/// Shipped quantity and amount of one record under one payment; a missing
/// breakdown contributes zero
pub fn item_payment(item: &Consumption, payment_id: u64, index: &BreakdownIndex) -> Totals {
    index
        .lookup(item.id, payment_id)
        .map(|b| Totals::new(b.shipped_quantity, b.amount))
        .unwrap_or(Totals::ZERO)
}

/// Anything that rolls up ordered and per-payment totals
pub trait Aggregate {
    /// Sum of `orderQuantity` / `orderAmount`
    fn ordered(&self) -> Totals;

    /// Sum of `shippedQuantity` / `amount` over breakdowns for `payment_id`
    fn paid(&self, payment_id: u64, index: &BreakdownIndex) -> Totals;
}

impl Aggregate for SupplierItemGroup {
    fn ordered(&self) -> Totals {
        fold(self.items.iter().map(item_ordered))
    }

    fn paid(&self, payment_id: u64, index: &BreakdownIndex) -> Totals {
        fold(self.items.iter().map(|c| item_payment(c, payment_id, index)))
    }
}

impl Aggregate for SalesOrderGroup {
    fn ordered(&self) -> Totals {
        fold(self.suppliers.iter().map(Aggregate::ordered))
    }

    fn paid(&self, payment_id: u64, index: &BreakdownIndex) -> Totals {
        fold(self.suppliers.iter().map(|s| s.paid(payment_id, index)))
    }
}

impl Aggregate for Grouping {
    /// Ungrouped records are excluded
    fn ordered(&self) -> Totals {
        fold(self.groups.iter().map(Aggregate::ordered))
    }

    fn paid(&self, payment_id: u64, index: &BreakdownIndex) -> Totals {
        fold(self.groups.iter().map(|g| g.paid(payment_id, index)))
    }
}

/// "Sub.TTL" of a supplier item group
pub fn subtotal(group: &SupplierItemGroup) -> Totals {
    group.ordered()
}

/// "G.TTL" of a sales order group
pub fn grand_total(group: &SalesOrderGroup) -> Totals {
    group.ordered()
}

pub fn payment_subtotal<A: Aggregate + ?Sized>(
    group: &A,
    payment_id: u64,
    index: &BreakdownIndex,
) -> Totals {
    group.paid(payment_id, index)
}

/// Per-payment TOTAL row across every sales order group
pub fn payment_grand_total(grouping: &Grouping, payment_id: u64, index: &BreakdownIndex) -> Totals {
    grouping.paid(payment_id, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::group::group_consumptions;
    use crate::ledger::testing::{breakdown, consumption, scenario};

    #[test]
    fn scenario_subtotals_and_grand_totals() {
        let grouping = group_consumptions(&scenario());

        let order_10 = &grouping.groups[0];
        assert_eq!(subtotal(&order_10.suppliers[0]).amount, 150.0);
        assert_eq!(grand_total(order_10).amount, 150.0);

        let order_11 = &grouping.groups[1];
        assert_eq!(grand_total(order_11).amount, 30.0);
        assert_eq!(grouping.ordered().amount, 180.0);
    }

    #[test]
    fn payment_subtotal_treats_missing_breakdown_as_zero() {
        let grouping = group_consumptions(&scenario());
        let index = BreakdownIndex::build(&[breakdown(1, 100, 5.0, 25.0)]);

        let group = &grouping.groups[0].suppliers[0];
        assert_eq!(
            payment_subtotal(group, 100, &index),
            Totals::new(5.0, 25.0)
        );
        assert_eq!(
            payment_subtotal(&grouping.groups[0], 100, &index),
            Totals::new(5.0, 25.0)
        );
        assert_eq!(payment_subtotal(&grouping.groups[1], 100, &index), Totals::ZERO);
        assert_eq!(payment_subtotal(group, 999, &index), Totals::ZERO);
    }

    #[test]
    fn payment_grand_total_sums_sales_order_groups() {
        let grouping = group_consumptions(&scenario());
        let index = BreakdownIndex::build(&[
            breakdown(1, 100, 5.0, 25.0),
            breakdown(3, 100, 2.0, 12.0),
            breakdown(3, 101, 1.0, 6.0),
        ]);

        let by_group = grouping
            .groups
            .iter()
            .map(|g| payment_subtotal(g, 100, &index))
            .fold(Totals::ZERO, |acc, t| acc + t);
        assert_eq!(payment_grand_total(&grouping, 100, &index), by_group);
        assert_eq!(
            payment_grand_total(&grouping, 100, &index),
            Totals::new(7.0, 37.0)
        );
        assert_eq!(
            payment_grand_total(&grouping, 101, &index),
            Totals::new(1.0, 6.0)
        );
    }

    #[test]
    fn join_matches_only_its_own_payment() {
        let records = vec![consumption(1, 10, "S1", "A", "F", "C", 100.0)];
        let grouping = group_consumptions(&records);
        let index = BreakdownIndex::build(&[
            breakdown(1, 100, 2.0, 20.0),
            breakdown(1, 101, 3.0, 30.0),
            breakdown(2, 100, 7.0, 70.0),
        ]);

        let group = &grouping.groups[0];
        assert_eq!(group.paid(100, &index), Totals::new(2.0, 20.0));
        assert_eq!(group.paid(101, &index), Totals::new(3.0, 30.0));
        assert_eq!(item_payment(&records[0], 102, &index), Totals::ZERO);
    }

    #[test]
    fn grand_total_is_sum_of_subtotals() {
        let records = vec![
            consumption(1, 10, "S1", "A", "F", "C", 0.1),
            consumption(2, 10, "S1", "B", "F", "C", 0.2),
            consumption(3, 10, "S1", "A", "F", "C", 0.3),
            consumption(4, 10, "S1", "C", "F", "C", 1e-7),
        ];
        let grouping = group_consumptions(&records);
        let group = &grouping.groups[0];

        let from_subtotals = group
            .suppliers
            .iter()
            .map(subtotal)
            .fold(Totals::ZERO, |acc, t| acc + t);
        assert_eq!(grand_total(group), from_subtotals);

        for supplier in &group.suppliers {
            let direct: f64 = supplier.items.iter().fold(0.0, |acc, c| acc + c.order_amount);
            assert_eq!(subtotal(supplier).amount, direct);
        }
    }

    #[test]
    fn permutation_within_group_keeps_totals() {
        let a = vec![
            consumption(1, 10, "S1", "A", "F", "C", 100.0),
            consumption(2, 10, "S1", "A", "F", "C", 50.0),
            consumption(3, 11, "S1", "B", "F", "C", 30.0),
        ];
        let b = vec![a[2].clone(), a[1].clone(), a[0].clone()];

        let ga = group_consumptions(&a);
        let gb = group_consumptions(&b);

        let order_10_a = ga.groups.iter().find(|g| g.sales_order_id == 10).unwrap();
        let order_10_b = gb.groups.iter().find(|g| g.sales_order_id == 10).unwrap();
        assert_eq!(grand_total(order_10_a), grand_total(order_10_b));
        assert_eq!(ga.ordered(), gb.ordered());
    }

    #[test]
    fn quantities_roll_up() {
        let mut first = consumption(1, 10, "S1", "A", "F", "C", 10.0);
        first.order_quantity = 4.0;
        let mut second = consumption(2, 10, "S1", "A", "F", "C", 10.0);
        second.order_quantity = 6.0;
        let grouping = group_consumptions(&[first, second]);
        assert_eq!(grand_total(&grouping.groups[0]).quantity, 10.0);
    }

    #[test]
    fn empty_grouping_totals_are_zero() {
        let grouping = group_consumptions(std::iter::empty());
        let index = BreakdownIndex::build(&[]);
        assert_eq!(grouping.ordered(), Totals::ZERO);
        assert_eq!(grouping.paid(1, &index), Totals::ZERO);
    }
}
