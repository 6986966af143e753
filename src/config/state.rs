use serde::{Deserialize, Serialize};

use crate::ledger::Filters;

/// Filter selection kept between runs
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct State {
    #[serde(default)]
    pub filters: Filters,
}
