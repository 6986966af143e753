use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::Consumption;

/// Constraint value that imposes no restriction
pub const ALL: &str = "All";

/// Optional equality constraints applied before grouping
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_name: Option<String>,
}

fn active(constraint: &Option<String>) -> Option<&str> {
    constraint.as_deref().filter(|v| *v != ALL)
}

impl Filters {
    /// All active constraints must match exactly (case-sensitive)
    pub fn matches(&self, record: &Consumption) -> bool {
        if let Some(style) = active(&self.style_number) {
            if record.style_number() != Some(style) {
                return false;
            }
        }
        if let Some(fabric) = active(&self.fabric_name) {
            if record.fabric_name != fabric {
                return false;
            }
        }
        if let Some(color) = active(&self.color_name) {
            if record.color_name != color {
                return false;
            }
        }
        true
    }

    /// Records passing every constraint, in input order
    pub fn apply<'a>(&self, records: &'a [Consumption]) -> Vec<&'a Consumption> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    pub fn is_active(&self) -> bool {
        active(&self.style_number).is_some()
            || active(&self.fabric_name).is_some()
            || active(&self.color_name).is_some()
    }

    pub fn clear(&mut self) {
        *self = Filters::default();
    }

    /// Overlay the constraints set in `other` on top of `self`
    pub fn merged(&self, other: &Filters) -> Filters {
        Filters {
            style_number: other.style_number.clone().or_else(|| self.style_number.clone()),
            fabric_name: other.fabric_name.clone().or_else(|| self.fabric_name.clone()),
            color_name: other.color_name.clone().or_else(|| self.color_name.clone()),
        }
    }

    /// Short human description of the active constraints
    pub fn describe(&self) -> String {
        let parts: Vec<String> = [
            ("style", active(&self.style_number)),
            ("fabric", active(&self.fabric_name)),
            ("color", active(&self.color_name)),
        ]
        .iter()
        .filter_map(|(label, value)| value.map(|v| format!("{label}={v}")))
        .collect();

        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Distinct values per filterable column, sorted ascending
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub style_numbers: Vec<String>,
    pub fabric_names: Vec<String>,
    pub color_names: Vec<String>,
}

impl FilterOptions {
    pub fn from_consumptions(records: &[Consumption]) -> Self {
        let mut styles = BTreeSet::new();
        let mut fabrics = BTreeSet::new();
        let mut colors = BTreeSet::new();

        for r in records {
            if let Some(style) = r.style_number() {
                styles.insert(style.to_string());
            }
            fabrics.insert(r.fabric_name.clone());
            colors.insert(r.color_name.clone());
        }

        Self {
            style_numbers: styles.into_iter().collect(),
            fabric_names: fabrics.into_iter().collect(),
            color_names: colors.into_iter().collect(),
        }
    }
}
