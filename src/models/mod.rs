pub mod event;
pub mod purchase;
pub mod ticket;

pub use event::EventSummary;
pub use purchase::{PurchaseReceipt, PurchaseRequest};
pub use ticket::TicketType;
