use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub eng_name: String,
    #[serde(default)]
    pub profile_image: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    /// Stable identifier; the only key sales-order groups are built on.
    /// Missing or null ids leave the record ungrouped.
    #[serde(default)]
    pub id: Option<u64>,
    /// Display label, may repeat across orders
    #[serde(default)]
    pub style_number: String,
    #[serde(default)]
    pub style_code: String,
    #[serde(default)]
    pub create_user: Option<User>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GarmentSize {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order_num: u32,
}

/// A single ordered fabric line item
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Consumption {
    pub id: u64,
    pub unit_price: f64,
    pub order_quantity: f64,
    /// Authoritative amount; not recomputed from quantity and price
    pub order_amount: f64,
    #[serde(default)]
    pub fabric_name: String,
    #[serde(default)]
    pub fabric_class: String,
    #[serde(default)]
    pub fabric_detail: String,
    #[serde(default)]
    pub supplier_item_code: Option<String>,
    #[serde(default)]
    pub brand_item_code: Option<String>,
    #[serde(default)]
    pub color_name: String,
    #[serde(default)]
    pub sopo_no: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub garment_color_name: String,
    #[serde(default)]
    pub garment_size: Option<GarmentSize>,
    #[serde(default)]
    pub sales_order: Option<SalesOrder>,
}

impl Consumption {
    pub fn sales_order_id(&self) -> Option<u64> {
        self.sales_order.as_ref().and_then(|so| so.id)
    }

    pub fn style_number(&self) -> Option<&str> {
        self.sales_order.as_ref().map(|so| so.style_number.as_str())
    }

    /// Supplier item code, treating a blank code as missing
    pub fn supplier_code(&self) -> Option<&str> {
        self.supplier_item_code
            .as_deref()
            .filter(|code| !code.trim().is_empty())
    }
}
