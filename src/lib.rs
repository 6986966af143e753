pub mod config;
pub mod error;
pub mod ledger;
pub mod model;
pub mod report;
pub mod source;

pub use config::{Config, State};
pub use error::{PayableError, Result};
pub use ledger::{Filters, GroupOrder, Ledger, Totals};
pub use model::Snapshot;
pub use report::ReportData;
