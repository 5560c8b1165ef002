//! Store and bridge settings.
//!
//! Defaults match the markup the server renders; an embedding page can
//! override any subset by passing a JSON object to `from_json`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TTL_MS: u64 = 7 * 24 * 60 * 60 * 1000;

/// Where and for how long the option collection is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key holding the serialized option collection.
    pub storage_key: String,
    /// Key holding the absolute expiry timestamp (epoch ms, as a string).
    pub expiry_key: String,
    /// Sliding expiry window.
    pub ttl_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: "wheel_options".into(),
            expiry_key: "wheel_options_expiry".into(),
            ttl_ms: DEFAULT_TTL_MS,
        }
    }
}

impl StoreConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Element ids and endpoints the bridge writes to or talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Modal container for the management surface.
    pub modal_target: String,
    /// Container for the option list inside the modal.
    pub options_list_target: String,
    /// Id of the result card, removed on dismiss.
    pub result_card_id: String,
    /// Server endpoint accepting the migrated option array.
    pub migration_endpoint: String,
    /// Event name in the trigger header that requests migration.
    pub sync_trigger: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            modal_target: "manage-modal".into(),
            options_list_target: "options-list".into(),
            result_card_id: "result-card".into(),
            migration_endpoint: "/api/sync-local-options".into(),
            sync_trigger: "syncLocalStorage".into(),
        }
    }
}

impl BridgeConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
