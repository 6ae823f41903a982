use crate::domain::message::{Message, MessageParams, TemplateKey};
use crate::domain::ports::MessageCatalog;
use crate::error::{GrantError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

const ALL_KEYS: [TemplateKey; 4] = [
    TemplateKey::SendSender,
    TemplateKey::SendRecipient,
    TemplateKey::RemoveSender,
    TemplateKey::RemoveRecipient,
];

/// Template catalog backed by a static map.
///
/// Ships with built-in templates for the four notification keys; overrides
/// can be loaded from a JSON object of `key -> template`. Keys missing from
/// an override fall back to the built-ins.
pub struct StaticMessageCatalog {
    templates: HashMap<String, String>,
}

impl StaticMessageCatalog {
    /// Loads template overrides from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let overrides: HashMap<String, String> = serde_json::from_reader(file)
            .map_err(|e| GrantError::InternalError(Box::new(e)))?;
        let mut catalog = Self::default();
        catalog.templates.extend(overrides);
        Ok(catalog)
    }

    fn builtin(key: TemplateKey) -> &'static str {
        match key {
            TemplateKey::SendSender => "You sent {amount} to {recipient}.",
            TemplateKey::SendRecipient => "You received {amount} from {sender}.",
            TemplateKey::RemoveSender => "You removed {amount} from {recipient}.",
            TemplateKey::RemoveRecipient => "{sender} removed {amount} from your balance.",
        }
    }
}

impl Default for StaticMessageCatalog {
    fn default() -> Self {
        let templates = ALL_KEYS
            .iter()
            .map(|key| (key.as_str().to_string(), Self::builtin(*key).to_string()))
            .collect();
        Self { templates }
    }
}

impl MessageCatalog for StaticMessageCatalog {
    fn render(&self, key: TemplateKey, params: &MessageParams) -> Message {
        let template = self
            .templates
            .get(key.as_str())
            .map(String::as_str)
            .unwrap_or_else(|| Self::builtin(key));
        let text = template
            .replace("{sender}", &params.sender)
            .replace("{recipient}", &params.recipient)
            .replace("{amount}", &params.amount);
        Message(text)
    }
}
