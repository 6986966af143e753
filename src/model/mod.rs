mod consumption;
mod payment;

pub use consumption::{Consumption, GarmentSize, SalesOrder, User};
pub use payment::{BreakdownType, Payment, PaymentBreakdown, PaymentStatus};

use serde::{Deserialize, Serialize};

/// All three collections of one load, in the json-server `db.json` shape
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub consumptions: Vec<Consumption>,
    pub payments: Vec<Payment>,
    pub payment_breakdowns: Vec<PaymentBreakdown>,
}
