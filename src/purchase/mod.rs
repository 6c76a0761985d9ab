//! Client-side purchase flow: quantity limits, the purchase dialog, and the
//! handoff envelope passed to the confirmation step.

pub mod dialog;
pub mod handoff;
pub mod policy;

use thiserror::Error;

pub use dialog::{DialogState, PurchaseDialog};
pub use handoff::{ConfirmationHandoff, PurchaseConfirmation};
pub use policy::{clamp_quantity, max_quantity, QuantityEntry};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("Please select a ticket type")]
    MissingSelection,

    #[error("The purchase dialog is not open")]
    DialogClosed,

    #[error("The order total is too large")]
    TotalOverflow,
}
