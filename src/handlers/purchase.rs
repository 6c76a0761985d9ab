//! Purchase dialog and confirmation endpoints.
//!
//! - `GET  /events/:event_id/purchase` - open the dialog
//! - `POST /events/:event_id/purchase` - submit it; 303 to the confirmation page
//! - `GET  /purchase/confirm?...` - re-display the carried purchase
//! - `POST /purchase/confirm?...` - finalize with the ticketing API

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Path, Query, RawQuery, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::client::ClientMetadata;
use crate::models::{EventSummary, PurchaseRequest, TicketType};
use crate::purchase::handoff::CONFIRMATION_PATH;
use crate::purchase::{max_quantity, DialogState, PurchaseConfirmation, PurchaseDialog};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{see_other, success};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogQuery {
    pub ticket_type: Option<String>,
}

/// Quantity as typed; browsers may send the field as text or as a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Number(serde_json::Number),
    Text(String),
}

impl RawQuantity {
    fn as_text(&self) -> String {
        match self {
            RawQuantity::Number(number) => match number.as_i64() {
                Some(whole) => whole.to_string(),
                // fractional or beyond i64: truncate, saturating at the bounds
                None => number
                    .as_f64()
                    .map_or(0, |value| value.trunc() as i64)
                    .to_string(),
            },
            RawQuantity::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseForm {
    pub ticket_type: Option<String>,
    pub quantity: Option<RawQuantity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPurchaseBody {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeOption {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub available_quantity: u32,
    pub max_quantity: u32,
    pub sold_out: bool,
}

impl From<&TicketType> for TicketTypeOption {
    fn from(ticket_type: &TicketType) -> Self {
        Self {
            id: ticket_type.id,
            name: ticket_type.name.clone(),
            price: ticket_type.price,
            available_quantity: ticket_type.available_quantity,
            max_quantity: max_quantity(ticket_type.available_quantity),
            sold_out: ticket_type.is_sold_out(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogView {
    pub state: DialogState,
    pub event: Option<EventSummary>,
    pub ticket_types: Vec<TicketTypeOption>,
    pub selected_type: Option<String>,
    pub quantity: u32,
    pub max_quantity: u32,
    pub total: Option<Decimal>,
}

impl From<&PurchaseDialog> for DialogView {
    fn from(dialog: &PurchaseDialog) -> Self {
        Self {
            state: dialog.state(),
            event: dialog.event().cloned(),
            ticket_types: dialog.ticket_types().iter().map(Into::into).collect(),
            selected_type: dialog.selected_type().map(|t| t.name.clone()),
            quantity: dialog.quantity(),
            max_quantity: dialog.max_quantity(),
            total: dialog.total(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOutcome {
    pub transaction_id: String,
    pub status: Option<String>,
    pub confirmation: PurchaseConfirmation,
}

fn parse_event_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::ValidationError(format!("'{}' is not a valid event id", raw)))
}

async fn open_dialog(
    state: &AppState,
    event_id: Uuid,
    preselected: Option<&str>,
) -> Result<PurchaseDialog, AppError> {
    let (event, ticket_types) = tokio::try_join!(
        state.api.fetch_event(event_id),
        state.api.fetch_ticket_types(event_id),
    )?;

    let mut dialog = PurchaseDialog::new();
    dialog.open(event, ticket_types, preselected);
    Ok(dialog)
}

fn confirmation_from_query(query: Option<String>) -> Result<PurchaseConfirmation, AppError> {
    let query = query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::ValidationError("No purchase to confirm".to_string()))?;

    let confirmation = PurchaseConfirmation::from_query(&query)?;
    confirmation.verify()?;
    Ok(confirmation)
}

pub async fn show_purchase_dialog(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Query(query): Query<DialogQuery>,
) -> Result<Response, AppError> {
    let event_id = parse_event_id(&event_id)?;
    let dialog = open_dialog(&state, event_id, query.ticket_type.as_deref()).await?;

    Ok(success(DialogView::from(&dialog), "Purchase dialog opened").into_response())
}

pub async fn submit_purchase_dialog(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(form): Json<PurchaseForm>,
) -> Result<Response, AppError> {
    let event_id = parse_event_id(&event_id)?;
    let mut dialog = open_dialog(&state, event_id, form.ticket_type.as_deref()).await?;

    if let Some(raw) = &form.quantity {
        dialog.enter_quantity(&raw.as_text())?;
    }

    let handoff = dialog.confirm()?;
    let location = handoff.confirmation_url(CONFIRMATION_PATH)?;
    info!(
        %event_id,
        ticket_type = %handoff.confirmation().ticket_type,
        quantity = handoff.confirmation().quantity,
        "Handing purchase off to confirmation"
    );

    Ok(see_other(&location))
}

pub async fn show_confirmation(RawQuery(query): RawQuery) -> Result<Response, AppError> {
    let confirmation = confirmation_from_query(query)?;

    Ok(success(confirmation, "Review your purchase").into_response())
}

pub async fn confirm_purchase(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    Json(body): Json<ConfirmPurchaseBody>,
) -> Result<Response, AppError> {
    let confirmation = confirmation_from_query(query)?;

    // The envelope is client-held; hold it to the cap of what is left now
    let offered = state.api.fetch_ticket_types(confirmation.event_id).await?;
    confirmation.check_offer(&offered)?;

    let client = ClientMetadata::from_request(&headers, peer.map(|ConnectInfo(addr)| addr));

    let request = PurchaseRequest {
        user_id: body.user_id,
        ticket_id: confirmation.ticket_id,
        quantity: confirmation.quantity,
        ip_address: client.ip_address,
        device_info: client.device_info,
        browser_info: client.browser_info,
    };
    let receipt = state.api.purchase(&request).await?;
    info!(
        transaction_id = %receipt.transaction_id,
        ticket_id = %request.ticket_id,
        quantity = request.quantity,
        "Purchase completed"
    );

    let outcome = PurchaseOutcome {
        transaction_id: receipt.transaction_id,
        status: receipt.status,
        confirmation,
    };
    Ok(success(outcome, "Purchase completed").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantity(json: &str) -> String {
        serde_json::from_str::<RawQuantity>(json).unwrap().as_text()
    }

    #[test]
    fn test_text_quantity_is_passed_through() {
        assert_eq!(quantity(r#""3 tickets""#), "3 tickets");
    }

    #[test]
    fn test_numeric_quantity_becomes_plain_integer() {
        assert_eq!(quantity("4"), "4");
        assert_eq!(quantity("2.5"), "2");
        assert_eq!(quantity("1e30"), i64::MAX.to_string());
        assert_eq!(quantity("-1e30"), i64::MIN.to_string());
        assert_eq!(quantity("18446744073709551615"), i64::MAX.to_string());
    }
}
