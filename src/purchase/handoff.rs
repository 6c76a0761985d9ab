//! The envelope carried from the purchase dialog to the confirmation page.
//!
//! The draft transaction travels only as flat query parameters, so the
//! confirmation page can be reloaded on its own and never reads the dialog's
//! state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::policy::max_quantity;
use crate::models::{EventSummary, TicketType};

/// Route of the confirmation step.
pub const CONFIRMATION_PATH: &str = "/purchase/confirm";

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("failed to encode confirmation: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    #[error("malformed confirmation parameters: {0}")]
    Decode(#[from] serde_urlencoded::de::Error),

    #[error("quantity must be at least 1")]
    ZeroQuantity,

    #[error("total {total} does not match {quantity} x {unit_price}")]
    TotalMismatch {
        total: Decimal,
        quantity: u32,
        unit_price: Decimal,
    },

    #[error("{quantity} x {unit_price} is out of range")]
    Overflow { quantity: u32, unit_price: Decimal },

    #[error("ticket {0} is not offered for this event")]
    UnknownTicket(Uuid),

    #[error("{0} is sold out")]
    SoldOut(String),

    #[error("unit price {carried} no longer matches {current}")]
    PriceChanged { carried: Decimal, current: Decimal },

    #[error("at most {cap} tickets per purchase, {quantity} requested")]
    ExceedsCap { quantity: u32, cap: u32 },
}

/// `unit_price × quantity`, or `None` when it does not fit a `Decimal`.
pub fn line_total(unit_price: Decimal, quantity: u32) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity))
}

/// Flattened purchase intent. Field order is the query parameter order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseConfirmation {
    pub event_id: Uuid,
    pub event_name: String,
    pub ticket_id: Uuid,
    pub ticket_type: String,
    pub quantity: u32,
    pub total: Decimal,
    pub unit_price: Decimal,
    pub event_city: String,
    pub event_time_start: DateTime<Utc>,
}

impl PurchaseConfirmation {
    pub fn new(
        event: &EventSummary,
        ticket_type: &TicketType,
        quantity: u32,
    ) -> Result<Self, HandoffError> {
        let total = line_total(ticket_type.price, quantity).ok_or(HandoffError::Overflow {
            quantity,
            unit_price: ticket_type.price,
        })?;

        Ok(Self {
            event_id: event.id,
            event_name: event.name.clone(),
            ticket_id: ticket_type.id,
            ticket_type: ticket_type.name.clone(),
            quantity,
            total,
            unit_price: ticket_type.price,
            event_city: event.city.clone(),
            event_time_start: event.start_time,
        })
    }

    pub fn from_query(query: &str) -> Result<Self, HandoffError> {
        Ok(serde_urlencoded::from_str(query)?)
    }

    pub fn to_query(&self) -> Result<String, HandoffError> {
        Ok(serde_urlencoded::to_string(self)?)
    }

    /// Check that the envelope is self-consistent: a positive quantity and
    /// a total equal to `quantity × unitPrice`.
    ///
    /// An envelope whose quantity and total were edited together still
    /// passes; [`check_offer`](Self::check_offer) compares it with live
    /// inventory.
    pub fn verify(&self) -> Result<(), HandoffError> {
        if self.quantity == 0 {
            return Err(HandoffError::ZeroQuantity);
        }
        let expected = line_total(self.unit_price, self.quantity).ok_or(HandoffError::Overflow {
            quantity: self.quantity,
            unit_price: self.unit_price,
        })?;
        if self.total != expected {
            return Err(HandoffError::TotalMismatch {
                total: self.total,
                quantity: self.quantity,
                unit_price: self.unit_price,
            });
        }
        Ok(())
    }

    /// Check the carried ticket against the ticket types currently offered.
    ///
    /// The ticket must still be offered, not sold out, at the carried unit
    /// price, and the quantity must be within the purchase cap of what is
    /// left now.
    pub fn check_offer(&self, offered: &[TicketType]) -> Result<(), HandoffError> {
        let current = offered
            .iter()
            .find(|ticket_type| ticket_type.id == self.ticket_id)
            .ok_or(HandoffError::UnknownTicket(self.ticket_id))?;

        if current.is_sold_out() {
            return Err(HandoffError::SoldOut(current.name.clone()));
        }
        if current.price != self.unit_price {
            return Err(HandoffError::PriceChanged {
                carried: self.unit_price,
                current: current.price,
            });
        }

        let cap = max_quantity(current.available_quantity);
        if self.quantity > cap {
            return Err(HandoffError::ExceedsCap {
                quantity: self.quantity,
                cap,
            });
        }
        Ok(())
    }
}

/// A finished dialog, ready to navigate to the confirmation page.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationHandoff {
    confirmation: PurchaseConfirmation,
}

impl ConfirmationHandoff {
    pub(crate) fn new(confirmation: PurchaseConfirmation) -> Self {
        Self { confirmation }
    }

    pub fn confirmation(&self) -> &PurchaseConfirmation {
        &self.confirmation
    }

    pub fn query(&self) -> Result<String, HandoffError> {
        self.confirmation.to_query()
    }

    pub fn confirmation_url(&self, path: &str) -> Result<String, HandoffError> {
        Ok(format!("{}?{}", path, self.query()?))
    }
}
