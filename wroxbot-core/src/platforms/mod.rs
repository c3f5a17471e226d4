pub mod discord;

use async_trait::async_trait;

use crate::Error;
use wroxbot_common::models::{MessageHandle, Reply};

/// What the command layer needs from the chat platform for one invocation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionTransport: Send + Sync {
    /// Sends a new message (the first one answers the interaction itself).
    async fn send_message(&self, reply: &Reply) -> Result<MessageHandle, Error>;

    /// Replaces the content of a message sent earlier through this transport.
    async fn edit_message(&self, handle: &MessageHandle, reply: &Reply) -> Result<(), Error>;

    /// The bot account's avatar URL as of right now.
    async fn current_identity_avatar_url(&self) -> Result<String, Error>;
}
