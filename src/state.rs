//! Application state management
//!
//! Contains shared state accessible across all handlers. The store and
//! asset client are constructed once at startup and injected here; no
//! handler reaches for globals.

use crate::assets::AssetClient;
use crate::db::DocStore;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Document store backed by the connection pool
    pub store: DocStore,

    /// Client for the external asset host
    pub assets: AssetClient,

    /// JWT secret key for session token signing
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(store: DocStore, assets: AssetClient, jwt_secret: String) -> Self {
        Self {
            store,
            assets,
            jwt_secret,
        }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
