//! Repository for singleton site settings.

use vitrine_core::collection::COLLECTION_SETTINGS;
use vitrine_core::settings::{MaintenanceSetting, SettingKey};

use crate::store::{DocumentStore, StoreError};

/// Reads and writes the maintenance switches.
pub struct SettingsRepo;

impl SettingsRepo {
    /// Read a switch. A missing or unreadable document reads as disabled.
    pub async fn get(
        store: &dyn DocumentStore,
        key: SettingKey,
    ) -> Result<MaintenanceSetting, StoreError> {
        let Some(data) = store.get_singleton(COLLECTION_SETTINGS, key.as_str()).await? else {
            return Ok(MaintenanceSetting::default());
        };
        match serde_json::from_value(data) {
            Ok(setting) => Ok(setting),
            Err(e) => {
                tracing::warn!(key = key.as_str(), error = %e, "Unreadable setting document");
                Ok(MaintenanceSetting::default())
            }
        }
    }

    /// Replace a switch.
    pub async fn set(
        store: &dyn DocumentStore,
        key: SettingKey,
        setting: &MaintenanceSetting,
    ) -> Result<(), StoreError> {
        let data = serde_json::to_value(setting)
            .map_err(|e| StoreError::Unavailable(format!("Failed to encode setting: {e}")))?;
        store
            .put_singleton(COLLECTION_SETTINGS, key.as_str(), data)
            .await
    }
}
