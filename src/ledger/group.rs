use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::PayableError;
use crate::model::Consumption;

/// Records sharing one (sales order, supplier item code) pair
#[derive(Debug, Clone, Serialize)]
pub struct SupplierItemGroup {
    pub supplier_item_code: String,
    pub items: Vec<Consumption>,
}

/// All supplier groups of one sales order, in first-seen order
#[derive(Debug, Clone, Serialize)]
pub struct SalesOrderGroup {
    pub sales_order_id: u64,
    /// Style number of the first record seen for this order
    pub style_number: String,
    pub suppliers: Vec<SupplierItemGroup>,
}

impl SalesOrderGroup {
    fn new(sales_order_id: u64, style_number: &str) -> Self {
        Self {
            sales_order_id,
            style_number: style_number.to_string(),
            suppliers: Vec::new(),
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &Consumption> {
        self.suppliers.iter().flat_map(|s| s.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.suppliers.iter().map(|s| s.items.len()).sum()
    }
}

/// Result of grouping one filtered record set
#[derive(Debug, Clone, Default, Serialize)]
pub struct Grouping {
    pub groups: Vec<SalesOrderGroup>,
    /// Records with no sales order id or no supplier item code
    pub ungrouped: Vec<Consumption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupOrder {
    /// Order of first appearance in the input
    #[default]
    FirstSeen,
    /// Style number ascending, then sales order id
    StyleNumber,
}

impl FromStr for GroupOrder {
    type Err = PayableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-seen" | "input" => Ok(GroupOrder::FirstSeen),
            "style" | "style-number" => Ok(GroupOrder::StyleNumber),
            other => Err(PayableError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Partition records by sales order id, then by supplier item code.
///
/// Single pass; group and row order follow first appearance in `records`.
/// Grouping is keyed on `salesOrder.id` only, so two orders sharing a style
/// number stay apart.
pub fn group_consumptions<'a, I>(records: I) -> Grouping
where
    I: IntoIterator<Item = &'a Consumption>,
{
    let mut grouping = Grouping::default();
    let mut order_pos: HashMap<u64, usize> = HashMap::new();
    let mut supplier_pos: HashMap<(u64, String), usize> = HashMap::new();

    for record in records {
        let (Some(order_id), Some(code)) = (record.sales_order_id(), record.supplier_code()) else {
            tracing::warn!(
                item_id = record.id,
                sales_order = ?record.sales_order_id(),
                supplier_item_code = ?record.supplier_item_code,
                "consumption has no grouping key, leaving it ungrouped"
            );
            grouping.ungrouped.push(record.clone());
            continue;
        };

        let gi = *order_pos.entry(order_id).or_insert_with(|| {
            grouping.groups.push(SalesOrderGroup::new(
                order_id,
                record.style_number().unwrap_or_default(),
            ));
            grouping.groups.len() - 1
        });
        let group = &mut grouping.groups[gi];

        let si = *supplier_pos
            .entry((order_id, code.to_string()))
            .or_insert_with(|| {
                group.suppliers.push(SupplierItemGroup {
                    supplier_item_code: code.to_string(),
                    items: Vec::new(),
                });
                group.suppliers.len() - 1
            });
        group.suppliers[si].items.push(record.clone());
    }

    tracing::debug!(
        groups = grouping.groups.len(),
        ungrouped = grouping.ungrouped.len(),
        "grouped consumptions"
    );

    grouping
}

impl Grouping {
    /// One-time post-pass; never interleaved with grouping itself
    pub fn sort(&mut self, order: GroupOrder) {
        match order {
            GroupOrder::FirstSeen => {}
            GroupOrder::StyleNumber => self.groups.sort_by(|a, b| {
                a.style_number
                    .cmp(&b.style_number)
                    .then(a.sales_order_id.cmp(&b.sales_order_id))
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
