use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{ApiClientError, TicketingApi};
use crate::models::{EventSummary, PurchaseReceipt, PurchaseRequest, TicketType};
use crate::utils::response::{ApiErrorResponse, ApiResponse};

/// `TicketingApi` over the remote REST service.
#[derive(Clone)]
pub struct HttpTicketingApi {
    client: Client,
    base_url: String,
}

impl HttpTicketingApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(
        response: Response,
        resource: &str,
    ) -> Result<T, ApiClientError> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiClientError::NotFound(resource.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|parsed| parsed.error.message)
                .unwrap_or(body);
            warn!(status = status.as_u16(), %message, resource, "Ticketing API error");
            return Err(ApiClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> = response.json().await?;
        match envelope.data {
            Some(data) if envelope.success => Ok(data),
            _ => Err(ApiClientError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| format!("no {} in response", resource)),
            )),
        }
    }
}

#[async_trait]
impl TicketingApi for HttpTicketingApi {
    async fn fetch_event(&self, event_id: Uuid) -> Result<EventSummary, ApiClientError> {
        debug!(%event_id, "Fetching event");
        let response = self
            .client
            .get(self.url(&format!("/events/{}", event_id)))
            .send()
            .await?;

        Self::decode(response, "event").await
    }

    async fn fetch_ticket_types(&self, event_id: Uuid) -> Result<Vec<TicketType>, ApiClientError> {
        debug!(%event_id, "Fetching ticket types");
        let response = self
            .client
            .get(self.url(&format!("/events/{}/ticket-types", event_id)))
            .send()
            .await?;

        Self::decode(response, "ticket types").await
    }

    async fn purchase(&self, request: &PurchaseRequest) -> Result<PurchaseReceipt, ApiClientError> {
        debug!(ticket_id = %request.ticket_id, quantity = request.quantity, "Submitting purchase");
        let response = self
            .client
            .post(self.url("/tickets/purchase"))
            .json(request)
            .send()
            .await?;

        Self::decode(response, "purchase receipt").await
    }
}
