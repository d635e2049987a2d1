use std::sync::Arc;

use crate::db::DocumentStore;
use crate::services::admin_accounts::PasswordVerifier;
use crate::services::token_service::TokenService;

/// Everything a handler needs, built once at startup and shared through `web::Data`.
pub struct AppContext {
    pub store: Arc<dyn DocumentStore>,
    pub tokens: TokenService,
    pub passwords: PasswordVerifier,
}

impl AppContext {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        tokens: TokenService,
        passwords: PasswordVerifier,
    ) -> Self {
        AppContext {
            store,
            tokens,
            passwords,
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}
