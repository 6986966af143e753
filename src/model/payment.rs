use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    NotYet,
    Requested,
    Pending,
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::NotYet => write!(f, "NOT YET"),
            PaymentStatus::Requested => write!(f, "REQUESTED"),
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Paid => write!(f, "PAID"),
        }
    }
}

/// One scheduled or executed payment event
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: u64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub payment_due_date: String,
    #[serde(default)]
    pub requested_at: Option<String>,
    #[serde(default)]
    pub pending_at: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    /// Opaque file references, rendered as-is
    #[serde(default)]
    pub sourcing_files: Vec<serde_json::Value>,
    #[serde(default)]
    pub finance_files: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakdownType {
    #[default]
    Item,
}

/// Shipped/paid portion of one consumption item attributed to one payment
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: BreakdownType,
    pub shipped_quantity: f64,
    pub unit_price: f64,
    pub amount: f64,
    pub item_id: u64,
    pub payment_id: u64,
}
