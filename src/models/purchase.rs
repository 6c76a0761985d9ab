use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of the remote purchase call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub user_id: Uuid,
    pub ticket_id: Uuid,
    pub quantity: u32,
    pub ip_address: String,
    pub device_info: String,
    pub browser_info: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub transaction_id: String,
    #[serde(default)]
    pub status: Option<String>,
}
