// File: wroxbot-core/src/platforms/discord/transport.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::debug;
use twilight_http::Client as HttpClient;
use twilight_model::channel::message::MessageFlags;
use twilight_model::http::interaction::{
    InteractionResponse, InteractionResponseData, InteractionResponseType,
};
use twilight_model::id::marker::{ApplicationMarker, InteractionMarker, MessageMarker};
use twilight_model::id::Id;

use crate::Error;
use crate::platforms::InteractionTransport;
use crate::platforms::discord::embed::{avatar_url, to_twilight_embeds};
use wroxbot_common::models::{MessageHandle, Reply};

/// Handle of the interaction's own response. Editing it only needs the token.
pub const ORIGINAL_RESPONSE: &str = "@original";

/// Answers one interaction. The first `send_message` becomes the interaction
/// response; later sends are follow-ups.
pub struct DiscordInteractionTransport {
    http: Arc<HttpClient>,
    application_id: Id<ApplicationMarker>,
    interaction_id: Id<InteractionMarker>,
    token: String,
    responded: AtomicBool,
}

impl DiscordInteractionTransport {
    pub fn new(
        http: Arc<HttpClient>,
        application_id: Id<ApplicationMarker>,
        interaction_id: Id<InteractionMarker>,
        token: String,
    ) -> Self {
        Self {
            http,
            application_id,
            interaction_id,
            token,
            responded: AtomicBool::new(false),
        }
    }

    async fn create_initial_response(&self, reply: &Reply) -> Result<MessageHandle, Error> {
        let client = self.http.interaction(self.application_id);
        let response = InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(InteractionResponseData {
                content: reply.content.clone(),
                embeds: Some(to_twilight_embeds(&reply.embeds)?),
                flags: reply.is_private().then_some(MessageFlags::EPHEMERAL),
                ..Default::default()
            }),
        };

        client
            .create_response(self.interaction_id, &self.token, &response)
            .await
            .map_err(|e| Error::Platform(format!("Error responding to interaction: {e}")))?;
        self.responded.store(true, Ordering::SeqCst);

        Ok(MessageHandle::new(ORIGINAL_RESPONSE))
    }

    async fn create_followup(&self, reply: &Reply) -> Result<MessageHandle, Error> {
        let client = self.http.interaction(self.application_id);
        let embeds = to_twilight_embeds(&reply.embeds)?;

        let mut followup = client.create_followup(&self.token).embeds(&embeds);
        if let Some(content) = reply.content.as_deref() {
            followup = followup.content(content);
        }
        if reply.is_private() {
            followup = followup.flags(MessageFlags::EPHEMERAL);
        }

        let message = followup
            .await
            .map_err(|e| Error::Platform(format!("Error sending follow-up: {e}")))?
            .model()
            .await
            .map_err(|e| Error::Platform(format!("Error parsing follow-up: {e}")))?;
        Ok(MessageHandle::new(message.id.to_string()))
    }
}

#[async_trait]
impl InteractionTransport for DiscordInteractionTransport {
    async fn send_message(&self, reply: &Reply) -> Result<MessageHandle, Error> {
        if self.responded.load(Ordering::SeqCst) {
            self.create_followup(reply).await
        } else {
            self.create_initial_response(reply).await
        }
    }

    async fn edit_message(&self, handle: &MessageHandle, reply: &Reply) -> Result<(), Error> {
        let client = self.http.interaction(self.application_id);
        let embeds = to_twilight_embeds(&reply.embeds)?;
        if is_original_response(handle) {
            client
                .update_response(&self.token)
                .content(reply.content.as_deref())
                .embeds(Some(embeds.as_slice()))
                .await
                .map_err(|e| Error::Platform(format!("Error editing interaction response: {e}")))?;
        } else {
            let message_id = parse_message_id(&handle.message_id)?;
            client
                .update_followup(&self.token, message_id)
                .content(reply.content.as_deref())
                .embeds(Some(embeds.as_slice()))
                .await
                .map_err(|e| Error::Platform(format!("Error editing follow-up: {e}")))?;
        }
        debug!("Edited message {}", handle.message_id);
        Ok(())
    }

    async fn current_identity_avatar_url(&self) -> Result<String, Error> {
        let me = self
            .http
            .current_user()
            .await
            .map_err(|e| Error::Platform(format!("Error fetching current user: {e}")))?
            .model()
            .await
            .map_err(|e| Error::Platform(format!("Error parsing current user: {e}")))?;
        Ok(avatar_url(me.id, me.avatar))
    }
}

fn is_original_response(handle: &MessageHandle) -> bool {
    handle.message_id == ORIGINAL_RESPONSE
}

fn parse_message_id(raw: &str) -> Result<Id<MessageMarker>, Error> {
    raw.parse::<u64>()
        .ok()
        .and_then(Id::new_checked)
        .ok_or_else(|| Error::Platform(format!("Invalid message ID: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn original_response_handle_needs_no_message_id() {
        let handle = MessageHandle::new(ORIGINAL_RESPONSE);
        assert!(is_original_response(&handle));
        assert!(parse_message_id(&handle.message_id).is_err());
    }

    #[test]
    fn follow_up_handles_carry_a_message_id() {
        let handle = MessageHandle::new("123456789012345678");
        assert!(!is_original_response(&handle));
        assert_eq!(parse_message_id(&handle.message_id).unwrap().get(), 123456789012345678);
        assert!(parse_message_id("0").is_err());
    }
}
