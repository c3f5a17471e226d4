use crate::models::discord::DiscordEmbed;

/// Who gets to see a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    /// Only the requester (ephemeral).
    Private,
}

/// A message the bot sends (or edits in) as the answer to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: Option<String>,
    pub embeds: Vec<DiscordEmbed>,
    pub visibility: Visibility,
}

impl Reply {
    pub fn public(embed: DiscordEmbed) -> Self {
        Self {
            content: None,
            embeds: vec![embed],
            visibility: Visibility::Public,
        }
    }

    pub fn private(embed: DiscordEmbed) -> Self {
        Self {
            content: None,
            embeds: vec![embed],
            visibility: Visibility::Private,
        }
    }

    pub fn private_text(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            embeds: Vec::new(),
            visibility: Visibility::Private,
        }
    }

    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }
}

/// Identity of a message previously sent through a transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageHandle {
    pub message_id: String,
}

impl MessageHandle {
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
        }
    }
}
