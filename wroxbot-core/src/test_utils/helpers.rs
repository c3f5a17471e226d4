// File: wroxbot-core/src/test_utils/helpers.rs

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;

use crate::Error;
use crate::db::Database;
use crate::platforms::InteractionTransport;
use crate::services::command_dispatcher::{BotProfile, InvocationMeta, Requester};
use crate::services::config_store::ConfigStore;
use crate::utils::time::Clock;
use wroxbot_common::models::{MessageHandle, Reply};

/// Fresh in-memory database with migrations applied.
pub async fn setup_test_database() -> Result<Database, Error> {
    let db = Database::new(":memory:").await?;
    db.migrate().await?;
    Ok(db)
}

/// In-memory database plus a seeded, loaded `ConfigStore`.
pub async fn setup_test_store() -> Result<(Database, ConfigStore), Error> {
    let db = Database::new(":memory:").await?;
    let store = ConfigStore::open(&db).await?;
    Ok((db, store))
}

pub fn test_bot_profile() -> BotProfile {
    BotProfile {
        name: "Wrox".to_string(),
        version: "1.2".to_string(),
        developer: "Wrox/Zpyrx".to_string(),
        started_at: Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap(),
        latency_ms: Some(40),
    }
}

pub fn test_invocation(requester_name: &str) -> InvocationMeta {
    InvocationMeta {
        requester: Requester {
            id: "1001".to_string(),
            name: requester_name.to_string(),
            avatar_url: Some(format!("https://cdn.example/{requester_name}.png")),
        },
        guild_joined_at: Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()),
    }
}

/// A clock that only moves when `sleep` is called. No real waiting.
pub struct FakeClock {
    now: Mutex<DateTime<Utc>>,
    sleeps: Mutex<u32>,
}

impl FakeClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
            sleeps: Mutex::new(0),
        }
    }

    pub fn sleeps(&self) -> u32 {
        *self.sleeps.lock()
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::starting_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }

    async fn sleep(&self, duration: Duration) {
        let step = chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero());
        *self.now.lock() += step;
        *self.sleeps.lock() += 1;
    }
}

/// Something the transport was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    Send(Reply),
    Edit(MessageHandle, Reply),
}

/// Records every call; can be told to fail the n-th edit (1-based).
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<TransportCall>>,
    fail_send: bool,
    fail_edit_at: Option<usize>,
    avatar_url: Option<String>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_send() -> Self {
        Self {
            fail_send: true,
            ..Self::default()
        }
    }

    pub fn failing_edit_at(n: usize) -> Self {
        Self {
            fail_edit_at: Some(n),
            ..Self::default()
        }
    }

    pub fn with_avatar(mut self, url: &str) -> Self {
        self.avatar_url = Some(url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().clone()
    }

    pub fn sends(&self) -> Vec<Reply> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                TransportCall::Send(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn edits(&self) -> Vec<Reply> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                TransportCall::Edit(_, r) => Some(r),
                _ => None,
            })
            .collect()
    }

    /// The single reply a plain command produced.
    pub fn only_reply(&self) -> Reply {
        let sends = self.sends();
        assert_eq!(sends.len(), 1, "expected exactly one reply, got {sends:?}");
        sends[0].clone()
    }
}

#[async_trait]
impl InteractionTransport for RecordingTransport {
    async fn send_message(&self, reply: &Reply) -> Result<MessageHandle, Error> {
        let mut calls = self.calls.lock();
        // A failing transport still lets the private failure notice through.
        if self.fail_send && !reply.is_private() {
            return Err(Error::Platform("send rejected".into()));
        }
        calls.push(TransportCall::Send(reply.clone()));
        Ok(MessageHandle::new(format!("msg-{}", calls.len())))
    }

    async fn edit_message(&self, handle: &MessageHandle, reply: &Reply) -> Result<(), Error> {
        let mut calls = self.calls.lock();
        let attempt = calls
            .iter()
            .filter(|c| matches!(c, TransportCall::Edit(..)))
            .count()
            + 1;
        if self.fail_edit_at == Some(attempt) {
            return Err(Error::Platform(format!("edit #{attempt} rejected")));
        }
        calls.push(TransportCall::Edit(handle.clone(), reply.clone()));
        Ok(())
    }

    async fn current_identity_avatar_url(&self) -> Result<String, Error> {
        self.avatar_url
            .clone()
            .ok_or_else(|| Error::Platform("no avatar configured".into()))
    }
}
