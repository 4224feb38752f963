// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::iam::AdminSession;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

const ADMIN_SESSION_CHANNEL_DEPTH: usize = 64;
const MAX_ADMIN_SESSIONS: usize = 10000;

struct SessionEntry {
    session: AdminSession,
    last_seen: Instant,
}

/// In-process store of operator sessions, keyed by the id carried in the
/// session cookie. Entries expire after the configured idle timeout.
///
/// Must be created inside a tokio runtime; the owning task is spawned there.
#[derive(Clone)]
pub struct AdminSessionStore {
    sender: mpsc::Sender<SessionCommand>,
}

enum SessionCommand {
    Set {
        session: AdminSession,
        reply: oneshot::Sender<String>,
    },
    Get {
        id: String,
        reply: oneshot::Sender<Option<AdminSession>>,
    },
    Destroy {
        id: String,
        reply: oneshot::Sender<bool>,
    },
    Count {
        reply: oneshot::Sender<usize>,
    },
}

impl AdminSessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        let (sender, receiver) = mpsc::channel(ADMIN_SESSION_CHANNEL_DEPTH);
        tokio::spawn(async move {
            let mut state = SessionState::new(idle_timeout);
            state.run(receiver).await;
        });
        Self { sender }
    }

    /// Stores a session and returns its new id. Empty if the store is gone.
    pub async fn set(&self, session: AdminSession) -> String {
        let (reply, receive) = oneshot::channel();
        if !self.send(SessionCommand::Set { session, reply }).await {
            return String::new();
        }
        receive.await.unwrap_or_default()
    }

    /// Looks a session up and refreshes its idle timer.
    pub async fn get(&self, id: &str) -> Option<AdminSession> {
        if id.is_empty() {
            return None;
        }
        let (reply, receive) = oneshot::channel();
        let command = SessionCommand::Get {
            id: id.to_string(),
            reply,
        };
        if !self.send(command).await {
            return None;
        }
        receive.await.unwrap_or(None)
    }

    pub async fn destroy(&self, id: &str) -> bool {
        let (reply, receive) = oneshot::channel();
        let command = SessionCommand::Destroy {
            id: id.to_string(),
            reply,
        };
        self.send(command).await && receive.await.unwrap_or(false)
    }

    pub async fn len(&self) -> usize {
        let (reply, receive) = oneshot::channel();
        if !self.send(SessionCommand::Count { reply }).await {
            return 0;
        }
        receive.await.unwrap_or(0)
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn send(&self, command: SessionCommand) -> bool {
        if self.sender.send(command).await.is_err() {
            log::error!("AdminSessionStore task is not running");
            return false;
        }
        true
    }
}

struct SessionState {
    sessions: HashMap<String, SessionEntry>,
    idle_timeout: Duration,
}

impl SessionState {
    fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            idle_timeout,
        }
    }

    async fn run(&mut self, mut receiver: mpsc::Receiver<SessionCommand>) {
        while let Some(command) = receiver.recv().await {
            let now = Instant::now();
            self.purge_idle(now);
            match command {
                SessionCommand::Set { session, reply } => {
                    let _ = reply.send(self.insert(session, now));
                }
                SessionCommand::Get { id, reply } => {
                    let found = self.sessions.get_mut(&id).map(|entry| {
                        entry.last_seen = now;
                        entry.session.clone()
                    });
                    let _ = reply.send(found);
                }
                SessionCommand::Destroy { id, reply } => {
                    let _ = reply.send(self.sessions.remove(&id).is_some());
                }
                SessionCommand::Count { reply } => {
                    let _ = reply.send(self.sessions.len());
                }
            }
        }
    }

    fn purge_idle(&mut self, now: Instant) {
        let idle_timeout = self.idle_timeout;
        self.sessions
            .retain(|_, entry| now.duration_since(entry.last_seen) < idle_timeout);
    }

    fn insert(&mut self, session: AdminSession, now: Instant) -> String {
        if self.sessions.len() >= MAX_ADMIN_SESSIONS
            && let Some(oldest) = self
                .sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| id.clone())
        {
            self.sessions.remove(&oldest);
        }
        let id = Uuid::new_v4().simple().to_string();
        self.sessions.insert(
            id.clone(),
            SessionEntry {
                session,
                last_seen: now,
            },
        );
        id
    }
}
