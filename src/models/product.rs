//! Product catalog models

use serde::{Deserialize, Serialize};

/// Product entity as returned by the catalog API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    /// Price in minor units (cents)
    pub price: i64,
    pub image: Option<String>,
    pub category: Option<String>,
    pub seller_id: Option<String>,
    pub seller_name: Option<String>,
}

/// Seller entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: String,
    pub name: Option<String>,
}
