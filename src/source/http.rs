use serde::de::DeserializeOwned;
use std::time::Duration;
use ureq::Agent;

use super::{DataSource, CONSUMPTIONS, PAYMENTS, PAYMENT_BREAKDOWNS};
use crate::error::{PayableError, Result};
use crate::model::{Consumption, Payment, PaymentBreakdown};

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";
pub const BASE_URL_ENV: &str = "PAYABLE_API_BASE_URL";

/// Pick the API base URL: explicit flag, then environment, then config, then default
pub fn resolve_base_url(flag: Option<&str>, configured: Option<&str>) -> String {
    let env = std::env::var(BASE_URL_ENV).ok();
    pick_base_url(flag, env.as_deref(), configured)
}

fn pick_base_url(flag: Option<&str>, env: Option<&str>, configured: Option<&str>) -> String {
    let url = flag
        .or(env.filter(|v| !v.is_empty()))
        .or(configured)
        .unwrap_or(DEFAULT_BASE_URL);
    url.trim_end_matches('/').to_string()
}

/// REST source in the json-server layout (`/consumptions`, `/payments`, ...)
pub struct HttpSource {
    base_url: String,
    agent: Agent,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    fn fetch<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.base_url, resource);
        tracing::debug!(%url, "fetching");

        // Non-2xx statuses surface as ureq::Error::StatusCode
        let mut response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| PayableError::data_load(resource, format!("{e} ({url})")))?;

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| PayableError::data_load(resource, e))?;

        serde_json::from_str(&body).map_err(|e| PayableError::data_load(resource, e))
    }
}

impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    fn get_consumptions(&self) -> Result<Vec<Consumption>> {
        self.fetch(CONSUMPTIONS)
    }

    fn get_payments(&self) -> Result<Vec<Payment>> {
        self.fetch(PAYMENTS)
    }

    fn get_payment_breakdowns(&self) -> Result<Vec<PaymentBreakdown>> {
        self.fetch(PAYMENT_BREAKDOWNS)
    }
}
