use tabled::{builder::Builder, settings::Style, Table, Tabled};

use super::format::{format_currency, format_date, format_number, format_unit_price, with_symbol};
use super::{ReportData, ReportPayment};
use crate::ledger::Totals;

pub const ORDERED_HEADER_COLUMNS: [&str; 7] = [
    "Style No.",
    "Supplier Item #",
    "Fabric Name",
    "Fabric Color",
    "Q'ty",
    "U/price",
    "Amount",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Item,
    SubTotal,
    GrandTotal,
    Total,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub kind: RowKind,
    pub cells: Vec<String>,
}

fn header(report: &ReportData) -> Vec<String> {
    let mut cells: Vec<String> = ORDERED_HEADER_COLUMNS.iter().map(|c| c.to_string()).collect();
    for p in &report.payments {
        cells.push(format!("#{} Q'ty", p.id));
        cells.push(format!("#{} U/price", p.id));
        cells.push(format!("#{} Amount", p.id));
    }
    cells.push("TTL Q'ty".to_string());
    cells.push("TTL Amount".to_string());
    cells
}

fn money(report: &ReportData, amount: f64) -> String {
    with_symbol(&report.currency_symbol, &format_currency(amount))
}

/// A Sub.TTL / G.TTL / TOTAL line: ordered amount, per-payment qty and amount, totals
fn total_row(
    report: &ReportData,
    kind: RowKind,
    label: &str,
    detail: &str,
    ordered: Totals,
    payments: &[Totals],
) -> TableRow {
    let mut cells = vec![
        label.to_string(),
        detail.to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        money(report, ordered.amount),
    ];
    for t in payments {
        cells.push(format_number(t.quantity));
        cells.push(String::new());
        cells.push(money(report, t.amount));
    }
    cells.push(format_number(ordered.quantity));
    cells.push(money(report, ordered.amount));
    TableRow { kind, cells }
}

/// Flatten the report into display rows: items, Sub.TTL after each supplier
/// group, G.TTL after each sales order, and a closing TOTAL
pub fn render_rows(report: &ReportData) -> Vec<TableRow> {
    let mut rows = Vec::new();

    for group in &report.groups {
        for supplier in &group.suppliers {
            for item in &supplier.rows {
                let mut cells = vec![
                    item.style_number.clone(),
                    item.supplier_item_code.clone(),
                    item.fabric_name.clone(),
                    item.color_name.clone(),
                    format_number(item.order_quantity),
                    with_symbol(&report.currency_symbol, &format_unit_price(item.unit_price)),
                    money(report, item.order_amount),
                ];
                for cell in &item.payments {
                    match cell {
                        Some(c) => {
                            cells.push(format_number(c.shipped_quantity));
                            cells.push(with_symbol(
                                &report.currency_symbol,
                                &format_unit_price(c.unit_price),
                            ));
                            cells.push(money(report, c.amount));
                        }
                        None => cells.extend([String::new(), String::new(), String::new()]),
                    }
                }
                cells.push(format_number(item.total.quantity));
                cells.push(money(report, item.total.amount));
                rows.push(TableRow {
                    kind: RowKind::Item,
                    cells,
                });
            }

            rows.push(total_row(
                report,
                RowKind::SubTotal,
                "Sub.TTL",
                &supplier.supplier_item_code,
                supplier.subtotal,
                &supplier.payment_totals,
            ));
        }

        rows.push(total_row(
            report,
            RowKind::GrandTotal,
            "G.TTL",
            &format!("{} (SO #{})", group.style_number, group.sales_order_id),
            group.grand_total,
            &group.payment_totals,
        ));
    }

    if !report.groups.is_empty() {
        rows.push(total_row(
            report,
            RowKind::Total,
            "TOTAL",
            "",
            report.total,
            &report.payment_totals,
        ));
    }

    rows
}

/// Render the Ordered / Payable / Total table
pub fn render_table(report: &ReportData) -> String {
    let mut builder = Builder::default();
    builder.push_record(header(report));
    for row in render_rows(report) {
        builder.push_record(row.cells);
    }
    builder.build().with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct PaymentHeaderRow {
    #[tabled(rename = "PAYMENT")]
    id: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "PAYMENT DUE")]
    due: String,
    #[tabled(rename = "PAYMENT DATE")]
    paid: String,
    #[tabled(rename = "ATTACHMENT")]
    files: String,
    #[tabled(rename = "MEMO")]
    memo: String,
}

impl From<&ReportPayment> for PaymentHeaderRow {
    fn from(p: &ReportPayment) -> Self {
        Self {
            id: format!("#{}", p.id),
            status: p.status.to_string(),
            due: format_date(&p.due_date),
            paid: p.paid_date.as_deref().map(format_date).unwrap_or_else(|| "-".to_string()),
            files: p.files.join("\n"),
            memo: p.memo.clone().unwrap_or_default(),
        }
    }
}

/// Render the per-payment header block (due date, paid date, files, memo)
pub fn render_payment_headers(payments: &[ReportPayment]) -> String {
    let rows: Vec<PaymentHeaderRow> = payments.iter().map(PaymentHeaderRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
