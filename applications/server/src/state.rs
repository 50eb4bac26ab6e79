/// Shared application state
use crate::services::SessionService;
use capsule_core::Storage;
use capsule_identity::IdentityProvider;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub sessions: Arc<SessionService>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn Storage>,
        sessions: Arc<SessionService>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            storage,
            sessions,
            identity,
        }
    }
}
