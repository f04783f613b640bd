//! Singleton site settings (maintenance switches).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Site-wide maintenance page switch.
pub const SETTING_MAINTENANCE: &str = "maintenance";

/// Maintenance switch for the audio showcase only.
pub const SETTING_AUDIO_MAINTENANCE: &str = "audioMaintenance";

/// Which settings document is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Maintenance,
    AudioMaintenance,
}

impl SettingKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Maintenance => SETTING_MAINTENANCE,
            Self::AudioMaintenance => SETTING_AUDIO_MAINTENANCE,
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            SETTING_MAINTENANCE => Ok(Self::Maintenance),
            SETTING_AUDIO_MAINTENANCE => Ok(Self::AudioMaintenance),
            other => Err(CoreError::Validation(format!(
                "Unknown setting '{other}'. Must be one of: {SETTING_MAINTENANCE}, {SETTING_AUDIO_MAINTENANCE}"
            ))),
        }
    }
}

/// A maintenance switch. Absent documents read as disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceSetting {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for key in [SettingKey::Maintenance, SettingKey::AudioMaintenance] {
            assert_eq!(SettingKey::parse(key.as_str()).unwrap(), key);
        }
        assert!(SettingKey::parse("theme").is_err());
    }

    #[test]
    fn default_is_disabled_without_audit_fields() {
        let json = serde_json::to_value(MaintenanceSetting::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "enabled": false }));
    }
}
