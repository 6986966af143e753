//! Where consumptions, payments and breakdowns come from.

mod file;
mod http;

pub use file::{write_snapshot, FileSource};
pub use http::{resolve_base_url, HttpSource, BASE_URL_ENV, DEFAULT_BASE_URL};

use crate::error::Result;
use crate::model::{Consumption, Payment, PaymentBreakdown, Snapshot};

pub const CONSUMPTIONS: &str = "consumptions";
pub const PAYMENTS: &str = "payments";
pub const PAYMENT_BREAKDOWNS: &str = "paymentBreakdowns";

/// A provider of the three collections. Each call fails with
/// `PayableError::DataLoad` when its resource cannot be fetched or decoded.
pub trait DataSource {
    fn describe(&self) -> String;

    fn get_consumptions(&self) -> Result<Vec<Consumption>>;

    fn get_payments(&self) -> Result<Vec<Payment>>;

    fn get_payment_breakdowns(&self) -> Result<Vec<PaymentBreakdown>>;
}

/// Load all three collections, or nothing
pub fn load_snapshot(source: &dyn DataSource) -> Result<Snapshot> {
    tracing::debug!(source = %source.describe(), "loading snapshot");

    let consumptions = source.get_consumptions()?;
    let payments = source.get_payments()?;
    let payment_breakdowns = source.get_payment_breakdowns()?;

    tracing::debug!(
        consumptions = consumptions.len(),
        payments = payments.len(),
        breakdowns = payment_breakdowns.len(),
        "snapshot loaded"
    );

    Ok(Snapshot {
        consumptions,
        payments,
        payment_breakdowns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayableError;

    struct Failing;

    impl DataSource for Failing {
        fn describe(&self) -> String {
            "failing".to_string()
        }

        fn get_consumptions(&self) -> Result<Vec<Consumption>> {
            Ok(Vec::new())
        }

        fn get_payments(&self) -> Result<Vec<Payment>> {
            Err(PayableError::data_load(PAYMENTS, "HTTP 500"))
        }

        fn get_payment_breakdowns(&self) -> Result<Vec<PaymentBreakdown>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn one_failing_collection_fails_the_load() {
        let err = load_snapshot(&Failing).unwrap_err();
        assert!(matches!(err, PayableError::DataLoad { ref resource, .. } if resource == "payments"));
        assert_eq!(err.to_string(), "Failed to load payments: HTTP 500");
    }
}
