//! Bridge configuration and confirmation notification defaults.

use desk_api_contract::ConfirmationSetting;
use desk_host::NotificationOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed notification id shared by every removal confirmation.
pub const DEFAULT_CONFIRMATION_NOTIFICATION_ID: &str = "desk_removal_confirmation";

#[derive(Debug, Error)]
/// Errors raised while loading [`BridgeConfig`].
pub enum ConfigError {
    /// The TOML text could not be parsed into a config.
    #[error("invalid bridge config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A loaded value violates a config invariant.
    #[error("invalid bridge config: {0}")]
    Invalid(String),
}

/// Notification copy used when a removal request carries no overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationDefaults {
    /// Notification id reused for every confirmation; at most one is pending at a time.
    pub notification_id: String,
    /// Title line.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Icon URL.
    pub icon_url: String,
    /// Label of button 0, which accepts the removal.
    pub accept_label: String,
    /// Label of button 1, which keeps the desk.
    pub reject_label: String,
    /// Keep the notification on screen until the user acts on it.
    pub require_interaction: bool,
}

impl Default for ConfirmationDefaults {
    fn default() -> Self {
        Self {
            notification_id: DEFAULT_CONFIRMATION_NOTIFICATION_ID.to_string(),
            title: "Close desk and windows?".to_string(),
            message: "All windows on this desk will be closed.".to_string(),
            icon_url: "icon.png".to_string(),
            accept_label: "Close windows".to_string(),
            reject_label: "Keep windows".to_string(),
            require_interaction: true,
        }
    }
}

impl ConfirmationDefaults {
    /// Builds the two-button notification, applying caller overrides field by field.
    pub fn notification_options(
        &self,
        setting: Option<&ConfirmationSetting>,
    ) -> NotificationOptions {
        let pick = |value: Option<&String>, fallback: &String| value.unwrap_or(fallback).clone();
        let setting = setting.cloned().unwrap_or_default();
        NotificationOptions {
            title: pick(setting.title.as_ref(), &self.title),
            message: pick(setting.message.as_ref(), &self.message),
            icon_url: pick(setting.icon_url.as_ref(), &self.icon_url),
            buttons: vec![
                pick(setting.accept_message.as_ref(), &self.accept_label),
                pick(setting.reject_message.as_ref(), &self.reject_label),
            ],
            require_interaction: self.require_interaction,
        }
    }
}

/// Top-level bridge configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Removal confirmation defaults.
    pub confirmation: ConfirmationDefaults,
}

impl BridgeConfig {
    /// Parses a config from TOML; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the text is not valid TOML for this schema or the
    /// notification id is empty.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks config invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the confirmation notification id is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.confirmation.notification_id.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "confirmation.notification_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_buttons_close_and_keep_windows() {
        let options = ConfirmationDefaults::default().notification_options(None);
        assert_eq!(
            options.buttons,
            vec!["Close windows".to_string(), "Keep windows".to_string()]
        );
        assert!(options.require_interaction);
    }

    #[test]
    fn caller_overrides_replace_only_provided_fields() {
        let setting = ConfirmationSetting {
            title: Some("Remove Work?".to_string()),
            accept_message: Some("Remove".to_string()),
            ..ConfirmationSetting::default()
        };
        let options = ConfirmationDefaults::default().notification_options(Some(&setting));
        assert_eq!(options.title, "Remove Work?");
        assert_eq!(options.message, "All windows on this desk will be closed.");
        assert_eq!(
            options.buttons,
            vec!["Remove".to_string(), "Keep windows".to_string()]
        );
    }

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let config = BridgeConfig::from_toml_str(
            r#"
            [confirmation]
            notification_id = "remove_desk_prompt"
            reject_label = "Cancel"
            "#,
        )
        .expect("parse config");
        assert_eq!(config.confirmation.notification_id, "remove_desk_prompt");
        assert_eq!(config.confirmation.reject_label, "Cancel");
        assert_eq!(config.confirmation.accept_label, "Close windows");
    }

    #[test]
    fn empty_toml_yields_defaults() {
        assert_eq!(
            BridgeConfig::from_toml_str("").expect("parse"),
            BridgeConfig::default()
        );
    }

    #[test]
    fn blank_notification_id_is_rejected() {
        let err = BridgeConfig::from_toml_str("[confirmation]\nnotification_id = \" \"\n")
            .expect_err("blank id");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
