//! Client side of the remote ticketing API.
//!
//! Events, ticket inventory and purchases all live behind this seam; the
//! storefront never stores them itself.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{EventSummary, PurchaseReceipt, PurchaseRequest, TicketType};

pub use http::HttpTicketingApi;

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("request to ticketing API failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("ticketing API rejected the request: {0}")]
    Rejected(String),

    #[error("ticketing API returned {status}: {message}")]
    Status { status: u16, message: String },
}

#[async_trait]
pub trait TicketingApi: Send + Sync {
    async fn fetch_event(&self, event_id: Uuid) -> Result<EventSummary, ApiClientError>;

    async fn fetch_ticket_types(&self, event_id: Uuid) -> Result<Vec<TicketType>, ApiClientError>;

    /// Submit a purchase; the receipt carries the transaction identifier.
    async fn purchase(&self, request: &PurchaseRequest) -> Result<PurchaseReceipt, ApiClientError>;
}
