use serde::{Deserialize, Serialize};

use crate::models::item_model::ItemStatus;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemDTO {
    pub user_id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub due_date: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PatchStatusDTO {
    pub status: ItemStatus,
}
