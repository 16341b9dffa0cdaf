//! Account models

use serde::{Deserialize, Serialize};

/// Signed-in account as returned by `/api/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}
