//! Presentation adapter: turns a `Ledger` into table rows.

pub mod format;
mod table;

pub use table::{render_payment_headers, render_rows, render_table, RowKind, TableRow};

use serde::Serialize;

use crate::ledger::{
    grand_total, item_ordered, payment_subtotal, subtotal, Aggregate, Filters, Ledger, Totals,
};
use crate::model::{Consumption, Payment, PaymentStatus};

/// Header data of one payment column block
#[derive(Debug, Serialize)]
pub struct ReportPayment {
    pub id: u64,
    pub status: PaymentStatus,
    pub due_date: String,
    pub paid_date: Option<String>,
    pub files: Vec<String>,
    pub memo: Option<String>,
}

impl From<&Payment> for ReportPayment {
    fn from(p: &Payment) -> Self {
        Self {
            id: p.id,
            status: p.payment_status,
            due_date: p.payment_due_date.clone(),
            paid_date: p.paid_at.clone(),
            files: p
                .sourcing_files
                .iter()
                .map(|f| match f {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            memo: p.memo.clone(),
        }
    }
}

/// Shipped figures of one item under one payment
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ReportCell {
    pub shipped_quantity: f64,
    pub unit_price: f64,
    pub amount: f64,
}

#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub item_id: u64,
    pub style_number: String,
    pub supplier_item_code: String,
    pub fabric_name: String,
    pub color_name: String,
    pub order_quantity: f64,
    pub unit_price: f64,
    pub order_amount: f64,
    /// One entry per payment, in payment order; `None` when nothing shipped
    pub payments: Vec<Option<ReportCell>>,
    pub total: Totals,
}

#[derive(Debug, Serialize)]
pub struct ReportSupplier {
    pub supplier_item_code: String,
    pub rows: Vec<ReportRow>,
    pub subtotal: Totals,
    pub payment_totals: Vec<Totals>,
}

#[derive(Debug, Serialize)]
pub struct ReportGroup {
    pub sales_order_id: u64,
    pub style_number: String,
    pub suppliers: Vec<ReportSupplier>,
    pub grand_total: Totals,
    pub payment_totals: Vec<Totals>,
}

/// Complete data for rendering the Ordered / Payable / Total table
#[derive(Debug, Serialize)]
pub struct ReportData {
    pub currency_symbol: String,
    pub filters: Filters,
    pub payments: Vec<ReportPayment>,
    pub groups: Vec<ReportGroup>,
    pub total: Totals,
    pub payment_totals: Vec<Totals>,
    /// Ids of records left out of grouping for lack of a key
    pub ungrouped: Vec<u64>,
}

fn per_payment(payment_ids: &[u64], total: impl Fn(u64) -> Totals) -> Vec<Totals> {
    payment_ids.iter().map(|&id| total(id)).collect()
}

impl ReportData {
    pub fn from_ledger(ledger: &Ledger, currency_symbol: &str) -> Self {
        let payment_ids: Vec<u64> = ledger.payments.iter().map(|p| p.id).collect();
        let row = |item: &Consumption| ReportRow {
            item_id: item.id,
            style_number: item.style_number().unwrap_or_default().to_string(),
            supplier_item_code: item.supplier_code().unwrap_or_default().to_string(),
            fabric_name: item.fabric_name.clone(),
            color_name: item.color_name.clone(),
            order_quantity: item.order_quantity,
            unit_price: item.unit_price,
            order_amount: item.order_amount,
            payments: payment_ids
                .iter()
                .map(|&pid| {
                    ledger.lookup(item.id, pid).map(|b| ReportCell {
                        shipped_quantity: b.shipped_quantity,
                        unit_price: b.unit_price,
                        amount: b.amount,
                    })
                })
                .collect(),
            total: item_ordered(item),
        };

        let groups = ledger
            .grouping
            .groups
            .iter()
            .map(|group| ReportGroup {
                sales_order_id: group.sales_order_id,
                style_number: group.style_number.clone(),
                suppliers: group
                    .suppliers
                    .iter()
                    .map(|supplier| ReportSupplier {
                        supplier_item_code: supplier.supplier_item_code.clone(),
                        rows: supplier.items.iter().map(&row).collect(),
                        subtotal: subtotal(supplier),
                        payment_totals: per_payment(&payment_ids, |pid| {
                            payment_subtotal(supplier, pid, &ledger.index)
                        }),
                    })
                    .collect(),
                grand_total: grand_total(group),
                payment_totals: per_payment(&payment_ids, |pid| {
                    payment_subtotal(group, pid, &ledger.index)
                }),
            })
            .collect();

        Self {
            currency_symbol: currency_symbol.to_string(),
            filters: ledger.filters.clone(),
            payments: ledger.payments.iter().map(ReportPayment::from).collect(),
            groups,
            total: ledger.grouping.ordered(),
            payment_totals: per_payment(&payment_ids, |pid| ledger.payment_total(pid)),
            ungrouped: ledger.grouping.ungrouped.iter().map(|c| c.id).collect(),
        }
    }
}
