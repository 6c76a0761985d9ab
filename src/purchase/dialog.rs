//! The purchase dialog controller.
//!
//! ```text
//! Closed → TypeSelection → QuantitySelection → Handoff
//!               ↑                  ↓
//!               └── Error(MissingSelection)
//! ```
//!
//! A dialog owns its selection exclusively. Opening it always starts from a
//! clean slate and closing it throws the selection away.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::handoff::{line_total, ConfirmationHandoff, PurchaseConfirmation};
use super::policy::{apply_quantity_input, max_quantity, QuantityEntry};
use super::PurchaseError;
use crate::models::{ticket, EventSummary, TicketType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogState {
    Closed,
    TypeSelection,
    QuantitySelection,
    MissingSelection,
    Handoff,
}

#[derive(Debug)]
struct OpenDialog {
    event: EventSummary,
    ticket_types: Vec<TicketType>,
    selected: Option<TicketType>,
    quantity: u32,
    error: Option<PurchaseError>,
    handed_off: bool,
}

#[derive(Debug, Default)]
pub struct PurchaseDialog {
    open: Option<OpenDialog>,
}

impl PurchaseDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog for `event`, optionally with a ticket type already chosen.
    pub fn open(
        &mut self,
        event: EventSummary,
        ticket_types: Vec<TicketType>,
        preselected: Option<&str>,
    ) {
        debug!(event_id = %event.id, offered = ticket_types.len(), "Opening purchase dialog");
        self.open = Some(OpenDialog {
            event,
            ticket_types,
            selected: None,
            quantity: 1,
            error: None,
            handed_off: false,
        });

        if let Some(name) = preselected {
            // An unknown preselection leaves the buyer on type selection.
            let _ = self.select_ticket_type(name);
        }
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn state(&self) -> DialogState {
        match &self.open {
            None => DialogState::Closed,
            Some(dialog) if dialog.handed_off => DialogState::Handoff,
            Some(dialog) if dialog.error.is_some() => DialogState::MissingSelection,
            Some(dialog) if dialog.selected.is_some() => DialogState::QuantitySelection,
            Some(_) => DialogState::TypeSelection,
        }
    }

    pub fn event(&self) -> Option<&EventSummary> {
        self.open.as_ref().map(|dialog| &dialog.event)
    }

    /// Every offered type, sold-out ones included for display.
    pub fn ticket_types(&self) -> &[TicketType] {
        self.open
            .as_ref()
            .map(|dialog| dialog.ticket_types.as_slice())
            .unwrap_or_default()
    }

    pub fn selected_type(&self) -> Option<&TicketType> {
        self.open.as_ref().and_then(|dialog| dialog.selected.as_ref())
    }

    pub fn quantity(&self) -> u32 {
        self.open.as_ref().map_or(1, |dialog| dialog.quantity)
    }

    /// Cap for the selected type; 1 until a type is chosen.
    pub fn max_quantity(&self) -> u32 {
        self.selected_type()
            .map_or(1, |selected| max_quantity(selected.available_quantity))
    }

    /// `None` only when the remote price is too large to multiply.
    pub fn total(&self) -> Option<Decimal> {
        match self.selected_type() {
            Some(selected) => line_total(selected.price, self.quantity()),
            None => Some(Decimal::ZERO),
        }
    }

    pub fn error(&self) -> Option<&PurchaseError> {
        self.open.as_ref().and_then(|dialog| dialog.error.as_ref())
    }

    /// Pick a ticket type by display name.
    ///
    /// Only types that are not sold out can be picked. A successful pick
    /// resets the quantity to 1 and clears any error; a miss changes nothing.
    pub fn select_ticket_type(&mut self, name: &str) -> Option<&TicketType> {
        let dialog = self.active_mut().ok()?;

        let chosen = ticket::selectable(&dialog.ticket_types)
            .find(|candidate| candidate.name == name)?
            .clone();

        dialog.quantity = 1;
        dialog.error = None;
        debug!(ticket_type = %name, "Ticket type selected");

        Some(dialog.selected.insert(chosen))
    }

    /// Apply raw text from the quantity field.
    pub fn enter_quantity(&mut self, raw: &str) -> Result<QuantityEntry, PurchaseError> {
        let cap = self.max_quantity();
        let dialog = self.active_mut()?;

        let entry = apply_quantity_input(dialog.quantity, raw, cap);
        match entry {
            QuantityEntry::Ignored { retained } => {
                debug!(input = %raw, retained, "Ignoring non-numeric quantity");
            }
            QuantityEntry::Clamped { requested, applied } => {
                debug!(requested, applied, cap, "Quantity clamped to purchase cap");
            }
            QuantityEntry::Accepted(_) => {}
        }
        dialog.quantity = entry.quantity();

        Ok(entry)
    }

    /// Finish the dialog and produce the confirmation envelope.
    ///
    /// Without a selected type this records `MissingSelection` and leaves the
    /// dialog open.
    pub fn confirm(&mut self) -> Result<ConfirmationHandoff, PurchaseError> {
        let dialog = self.active_mut()?;

        let Some(selected) = &dialog.selected else {
            dialog.error = Some(PurchaseError::MissingSelection);
            return Err(PurchaseError::MissingSelection);
        };

        let confirmation = PurchaseConfirmation::new(&dialog.event, selected, dialog.quantity)
            .map_err(|_| PurchaseError::TotalOverflow)?;
        dialog.handed_off = true;

        Ok(ConfirmationHandoff::new(confirmation))
    }

    fn active_mut(&mut self) -> Result<&mut OpenDialog, PurchaseError> {
        match self.open.as_mut() {
            Some(dialog) if !dialog.handed_off => Ok(dialog),
            _ => Err(PurchaseError::DialogClosed),
        }
    }
}
