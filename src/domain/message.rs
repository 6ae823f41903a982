use std::fmt;

/// Keys of the four notification templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKey {
    SendSender,
    SendRecipient,
    RemoveSender,
    RemoveRecipient,
}

impl TemplateKey {
    /// Sender-facing variant for a grant. `removal` is true when the raw
    /// amount string carried a literal minus sign.
    pub fn sender(removal: bool) -> Self {
        if removal {
            TemplateKey::RemoveSender
        } else {
            TemplateKey::SendSender
        }
    }

    /// Recipient-facing variant, selected the same way.
    pub fn recipient(removal: bool) -> Self {
        if removal {
            TemplateKey::RemoveRecipient
        } else {
            TemplateKey::SendRecipient
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKey::SendSender => "send.sender",
            TemplateKey::SendRecipient => "send.recipient",
            TemplateKey::RemoveSender => "remove.sender",
            TemplateKey::RemoveRecipient => "remove.recipient",
        }
    }
}

/// Parameters available to every notification template.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageParams {
    pub sender: String,
    pub recipient: String,
    pub amount: String,
}

/// A rendered, ready-to-deliver message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message(pub String);

impl Message {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
