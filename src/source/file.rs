use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::{DataSource, CONSUMPTIONS, PAYMENTS, PAYMENT_BREAKDOWNS};
use crate::error::{PayableError, Result};
use crate::model::{Consumption, Payment, PaymentBreakdown, Snapshot};

/// A `db.json` document holding all three collections
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| PayableError::data_load(key, format!("{}: {e}", self.path.display())))?;
        let mut doc: Value = serde_json::from_str(&content)
            .map_err(|e| PayableError::data_load(key, format!("{}: {e}", self.path.display())))?;

        let items = doc
            .get_mut(key)
            .map(Value::take)
            .ok_or_else(|| PayableError::data_load(key, format!("missing '{key}' in {}", self.path.display())))?;

        serde_json::from_value(items).map_err(|e| PayableError::data_load(key, e))
    }
}

impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn get_consumptions(&self) -> Result<Vec<Consumption>> {
        self.collection(CONSUMPTIONS)
    }

    fn get_payments(&self) -> Result<Vec<Payment>> {
        self.collection(PAYMENTS)
    }

    fn get_payment_breakdowns(&self) -> Result<Vec<PaymentBreakdown>> {
        self.collection(PAYMENT_BREAKDOWNS)
    }
}

/// Write a snapshot in the same document shape `FileSource` reads
pub fn write_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, content)?;
    Ok(())
}
