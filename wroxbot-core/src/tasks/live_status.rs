// wroxbot-core/src/tasks/live_status.rs

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::platforms::InteractionTransport;
use crate::utils::time::Clock;
use wroxbot_common::models::{DiscordColor, DiscordEmbed, DiscordEmbedFooter, MessageHandle, Reply};

/// Edits performed after the initial send.
pub const LIVE_TICK_COUNT: u32 = 15;
pub const LIVE_INTERVAL: Duration = Duration::from_secs(1);

/// Passed to the renderer on every render. `tick` is 0 for the initial send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickContext {
    pub now: DateTime<Utc>,
    pub tick: u32,
}

pub type Renderer = Box<dyn Fn(&TickContext) -> DiscordEmbed + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveState {
    Created,
    Running { handle: MessageHandle, edits: u32 },
    Completed,
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveOutcome {
    /// All renders delivered and the terminal notice is in place.
    Completed { renders: u32 },
    /// A transport call failed; `renders` counts what was delivered before that.
    Aborted { renders: u32 },
}

/// One bounded live-update session: a public message re-rendered on a fixed
/// cadence, then replaced by a terminal notice.
pub struct LiveSession {
    renderer: Renderer,
    tick_count: u32,
    interval: Duration,
    terminal_notice: DiscordEmbed,
    failure_notice: String,
    state: LiveState,
    renders: u32,
}

impl LiveSession {
    pub fn new(renderer: Renderer) -> Self {
        Self {
            renderer,
            tick_count: LIVE_TICK_COUNT,
            interval: LIVE_INTERVAL,
            terminal_notice: default_terminal_notice(None),
            failure_notice: "❌ An error occurred while starting live updates.".to_string(),
            state: LiveState::Created,
            renders: 0,
        }
    }

    pub fn with_schedule(mut self, tick_count: u32, interval: Duration) -> Self {
        self.tick_count = tick_count;
        self.interval = interval;
        self
    }

    pub fn with_terminal_notice(mut self, embed: DiscordEmbed) -> Self {
        self.terminal_notice = embed;
        self
    }

    pub fn with_failure_notice(mut self, text: impl Into<String>) -> Self {
        self.failure_notice = text.into();
        self
    }

    pub fn state(&self) -> &LiveState {
        &self.state
    }

    pub fn renders(&self) -> u32 {
        self.renders
    }

    /// Drives the session to a terminal state. Never retries a failed transport call.
    pub async fn run(
        &mut self,
        transport: &dyn InteractionTransport,
        clock: &dyn Clock,
    ) -> LiveOutcome {
        if self.state != LiveState::Created {
            debug!("LiveSession::run called in state {:?}; ignoring", self.state);
            return self.outcome();
        }

        let first = self.render(clock, 0);
        let handle = match transport.send_message(&Reply::public(first)).await {
            Ok(handle) => handle,
            Err(e) => {
                error!("Live updates: initial send failed => {e}");
                if let Err(notify_err) = transport
                    .send_message(&Reply::private_text(self.failure_notice.clone()))
                    .await
                {
                    debug!("Live updates: could not report failure privately => {notify_err}");
                }
                self.state = LiveState::Aborted;
                return self.outcome();
            }
        };
        self.renders = 1;
        self.state = LiveState::Running {
            handle: handle.clone(),
            edits: 0,
        };

        for tick in 1..=self.tick_count {
            clock.sleep(self.interval).await;
            let embed = self.render(clock, tick);
            if let Err(e) = transport.edit_message(&handle, &Reply::public(embed)).await {
                error!("Live updates: edit #{tick} failed, stopping => {e}");
                self.state = LiveState::Aborted;
                return self.outcome();
            }
            self.renders += 1;
            self.state = LiveState::Running { handle: handle.clone(), edits: tick };
        }

        let mut notice = self.terminal_notice.clone();
        notice.timestamp = Some(clock.now());
        if let Err(e) = transport.edit_message(&handle, &Reply::public(notice)).await {
            error!("Live updates: terminal edit failed => {e}");
            self.state = LiveState::Aborted;
            return self.outcome();
        }

        info!("Live updates finished after {} renders.", self.renders);
        self.state = LiveState::Completed;
        self.outcome()
    }

    fn render(&self, clock: &dyn Clock, tick: u32) -> DiscordEmbed {
        let ctx = TickContext { now: clock.now(), tick };
        (self.renderer)(&ctx)
    }

    fn outcome(&self) -> LiveOutcome {
        match self.state {
            LiveState::Completed => LiveOutcome::Completed { renders: self.renders },
            _ => LiveOutcome::Aborted { renders: self.renders },
        }
    }
}

/// "Live Updates Ended" notice that replaces the live message once the session is over.
pub fn default_terminal_notice(footer_icon: Option<String>) -> DiscordEmbed {
    let mut embed = DiscordEmbed::titled(
        "⏳ Live Updates Ended",
        "The live updates for this embed have stopped. Thank you for using `/bot-info`.",
        DiscordColor::ORANGE,
    );
    embed.footer = Some(DiscordEmbedFooter {
        text: "Live Updates Expired".to_string(),
        icon_url: footer_icon,
    });
    embed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::platforms::MockInteractionTransport;
    use crate::test_utils::helpers::FakeClock;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting_renderer(counter: Arc<AtomicU32>) -> Renderer {
        Box::new(move |ctx: &TickContext| {
            counter.fetch_add(1, Ordering::SeqCst);
            DiscordEmbed::titled("status", format!("tick {}", ctx.tick), DiscordColor::BLUE)
        })
    }

    #[tokio::test]
    async fn completes_with_sixteen_renders_and_one_terminal_edit() {
        let renders = Arc::new(AtomicU32::new(0));
        let mut transport = MockInteractionTransport::new();
        transport
            .expect_send_message()
            .times(1)
            .returning(|_| Ok(MessageHandle::new("42")));
        transport
            .expect_edit_message()
            .times(16)
            .returning(|handle, _| {
                assert_eq!(handle.message_id, "42");
                Ok(())
            });

        let clock = FakeClock::default();
        let mut session = LiveSession::new(counting_renderer(renders.clone()));
        let outcome = session.run(&transport, &clock).await;

        assert_eq!(outcome, LiveOutcome::Completed { renders: 16 });
        assert_eq!(renders.load(Ordering::SeqCst), 16);
        assert_eq!(clock.sleeps(), 15);
        assert_eq!(session.state(), &LiveState::Completed);
    }

    #[tokio::test]
    async fn posted_response_is_edited_in_place_without_a_failure_notice() {
        use crate::platforms::discord::transport::ORIGINAL_RESPONSE;

        let mut transport = MockInteractionTransport::new();
        transport
            .expect_send_message()
            .times(1)
            .withf(|reply| !reply.is_private())
            .returning(|_| Ok(MessageHandle::new(ORIGINAL_RESPONSE)));
        transport
            .expect_edit_message()
            .times(16)
            .withf(|handle, _| handle.message_id == ORIGINAL_RESPONSE)
            .returning(|_, _| Ok(()));

        let clock = FakeClock::default();
        let mut session = LiveSession::new(counting_renderer(Arc::new(AtomicU32::new(0))));
        let outcome = session.run(&transport, &clock).await;

        assert_eq!(outcome, LiveOutcome::Completed { renders: 16 });
    }

    #[tokio::test]
    async fn failed_initial_send_is_reported_privately() {
        let mut transport = MockInteractionTransport::new();
        let mut seq = mockall::Sequence::new();
        transport
            .expect_send_message()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|reply| !reply.is_private())
            .returning(|_| Err(Error::Platform("gateway closed".into())));
        transport
            .expect_send_message()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|reply| reply.is_private())
            .returning(|_| Ok(MessageHandle::new("err")));
        transport.expect_edit_message().never();

        let clock = FakeClock::default();
        let mut session = LiveSession::new(counting_renderer(Arc::new(AtomicU32::new(0))));
        let outcome = session.run(&transport, &clock).await;

        assert_eq!(outcome, LiveOutcome::Aborted { renders: 0 });
        assert_eq!(clock.sleeps(), 0);
    }
}
