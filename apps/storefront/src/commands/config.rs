//! # Config Commands
//!
//! Read-only view of the store configuration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::{Scope, StoreConfig};

/// What the view needs from the configuration.
///
/// Internal settings (database path, slot key) are not exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub store_name: String,
    pub currency_code: String,
    pub currency_symbol: String,
    pub auth_latency_ms: u64,
}

impl From<&StoreConfig> for ConfigResponse {
    fn from(config: &StoreConfig) -> Self {
        ConfigResponse {
            store_name: config.store.name.clone(),
            currency_code: config.store.currency_code.clone(),
            currency_symbol: config.store.currency_symbol.clone(),
            auth_latency_ms: config.auth.latency_ms,
        }
    }
}

/// Gets the current store configuration.
pub fn get_config(scope: &Scope) -> ConfigResponse {
    debug!("get_config command");
    ConfigResponse::from(scope.state::<StoreConfig>())
}
