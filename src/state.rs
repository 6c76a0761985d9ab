use std::sync::Arc;

use crate::api::TicketingApi;

/// Shared by every request; holds no per-buyer state.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn TicketingApi>,
}

impl AppState {
    pub fn new(api: Arc<dyn TicketingApi>) -> Self {
        Self { api }
    }
}
