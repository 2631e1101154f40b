/// Shared application state
use crate::services::{AccountService, CatalogueService, CredentialStore, TokenIssuer};
use mockable::Clock;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub accounts: Arc<AccountService>,
    pub catalogue: Arc<CatalogueService>,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        credentials: CredentialStore,
        tokens: TokenIssuer,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        let tokens = Arc::new(tokens);
        let accounts = AccountService::new(
            pool.clone(),
            Arc::new(credentials),
            Arc::clone(&tokens),
            Arc::clone(&clock),
        );
        let catalogue = CatalogueService::new(pool.clone(), clock);

        Self {
            pool,
            accounts: Arc::new(accounts),
            catalogue: Arc::new(catalogue),
            tokens,
        }
    }
}
