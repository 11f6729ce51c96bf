//! # Push Channel
//!
//! Session, mailbox and room registries behind sharded maps, with
//! fire-and-forget broadcast delivery.

use crate::payload::{PushPayload, RoomKey};
use crate::{MAILBOX_CHANNEL_CAPACITY, MAX_ROOMS_PER_SESSION, ROOM_CHANNEL_CAPACITY};
use dashmap::DashMap;
use shared_types::{Identity, SessionId, UserId};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

/// Push channel errors.
///
/// Only session/room management errors exist; delivery itself never errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PushError {
    /// A session with this id is already connected.
    #[error("session already connected")]
    SessionAlreadyConnected,
    /// The session is not connected (or was never authenticated).
    #[error("unknown session")]
    UnknownSession,
    /// The session is joined to too many rooms.
    #[error("too many rooms for this session")]
    TooManyRooms,
}

/// A connected session's receiving end.
///
/// Holds the mailbox receiver; dropping the handle ends delivery to this
/// session (the registry entry is cleaned up on `disconnect`).
#[derive(Debug)]
pub struct SessionHandle {
    /// The session's id.
    pub session_id: SessionId,
    /// The authenticated user the session belongs to.
    pub user_id: UserId,
    /// Receiving end of the user's mailbox channel.
    pub mailbox: broadcast::Receiver<PushPayload>,
}

/// Per-session bookkeeping.
#[derive(Debug, Clone)]
struct SessionInfo {
    user_id: UserId,
    rooms: Vec<RoomKey>,
}

/// Session, mailbox and room registry.
///
/// A user may hold zero or more simultaneous sessions, all subscribed to the
/// same mailbox channel. Connecting requires an already-resolved identity;
/// there is no unauthenticated path into a subscription.
pub struct PushChannel {
    /// Mailbox sender per user, created on first session.
    mailboxes: DashMap<UserId, broadcast::Sender<PushPayload>>,
    /// Room sender per question room, created on first join.
    rooms: DashMap<RoomKey, broadcast::Sender<PushPayload>>,
    /// Connected sessions.
    sessions: DashMap<SessionId, SessionInfo>,
    /// Payloads that reached at least one live session.
    delivered: AtomicU64,
    /// Payloads dropped because the recipient had no live session.
    missed: AtomicU64,
    /// Max rooms per session.
    max_rooms_per_session: u32,
}

impl PushChannel {
    /// Create a channel with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_room_limit(MAX_ROOMS_PER_SESSION)
    }

    /// Create a channel with an explicit per-session room limit.
    #[must_use]
    pub fn with_room_limit(max_rooms_per_session: u32) -> Self {
        Self {
            mailboxes: DashMap::new(),
            rooms: DashMap::new(),
            sessions: DashMap::new(),
            delivered: AtomicU64::new(0),
            missed: AtomicU64::new(0),
            max_rooms_per_session,
        }
    }

    /// Connect a session for an authenticated identity.
    ///
    /// Subscribes the session to the user's mailbox channel, creating the
    /// channel on the user's first session.
    pub fn connect(
        &self,
        session_id: SessionId,
        identity: &Identity,
    ) -> Result<SessionHandle, PushError> {
        if self.sessions.contains_key(&session_id) {
            return Err(PushError::SessionAlreadyConnected);
        }

        let mailbox = self
            .mailboxes
            .entry(identity.user_id)
            .or_insert_with(|| broadcast::channel(MAILBOX_CHANNEL_CAPACITY).0)
            .subscribe();

        self.sessions.insert(
            session_id,
            SessionInfo {
                user_id: identity.user_id,
                rooms: Vec::new(),
            },
        );

        debug!(session_id = %session_id, user = %identity.user_id, "Session connected");

        Ok(SessionHandle {
            session_id,
            user_id: identity.user_id,
            mailbox,
        })
    }

    /// Disconnect a session, leaving all its rooms.
    ///
    /// Idle mailbox and room channels (no remaining receivers) are removed.
    pub fn disconnect(&self, session_id: &SessionId) {
        let Some((_, info)) = self.sessions.remove(session_id) else {
            return;
        };

        for room in &info.rooms {
            self.drop_room_if_idle(room);
        }
        self.drop_mailbox_if_idle(&info.user_id);

        debug!(session_id = %session_id, user = %info.user_id, "Session disconnected");
    }

    /// Publish a payload to a user's mailbox.
    ///
    /// Fire-and-forget: returns how many live sessions received it; a user
    /// with no connected session only counts a miss. The persisted store,
    /// not this channel, is the durable record.
    pub fn publish(&self, user_id: &UserId, payload: PushPayload) -> usize {
        let receivers = self
            .mailboxes
            .get(user_id)
            .filter(|tx| tx.receiver_count() > 0)
            .and_then(|tx| tx.send(payload).ok())
            .unwrap_or(0);

        if receivers > 0 {
            self.delivered.fetch_add(1, Ordering::Relaxed);
        } else {
            self.missed.fetch_add(1, Ordering::Relaxed);
            debug!(user = %user_id, "Push missed (no connected session)");
        }
        receivers
    }

    /// Join a session to a question room.
    ///
    /// Returns the room's receiving end. Rooms are a convenience channel with
    /// no delivery guarantee, separate from the mailbox.
    pub fn join_room(
        &self,
        session_id: &SessionId,
        room: RoomKey,
    ) -> Result<broadcast::Receiver<PushPayload>, PushError> {
        let mut session = self
            .sessions
            .get_mut(session_id)
            .ok_or(PushError::UnknownSession)?;

        if !session.rooms.contains(&room) {
            if session.rooms.len() as u32 >= self.max_rooms_per_session {
                return Err(PushError::TooManyRooms);
            }
            session.rooms.push(room);
        }

        let receiver = self
            .rooms
            .entry(room)
            .or_insert_with(|| broadcast::channel(ROOM_CHANNEL_CAPACITY).0)
            .subscribe();

        debug!(session_id = %session_id, room = %room, "Joined room");
        Ok(receiver)
    }

    /// Remove a session from a room.
    ///
    /// Returns whether the session was joined. The caller drops its room
    /// receiver; an idle room channel is removed.
    pub fn leave_room(&self, session_id: &SessionId, room: &RoomKey) -> bool {
        let Some(mut session) = self.sessions.get_mut(session_id) else {
            return false;
        };

        let before = session.rooms.len();
        session.rooms.retain(|r| r != room);
        let was_joined = session.rooms.len() != before;
        drop(session);

        if was_joined {
            self.drop_room_if_idle(room);
            debug!(session_id = %session_id, room = %room, "Left room");
        }
        was_joined
    }

    /// Broadcast a payload to a question room.
    ///
    /// Returns how many subscribers received it; an empty room drops the
    /// payload silently.
    pub fn broadcast_room(&self, room: &RoomKey, payload: PushPayload) -> usize {
        self.rooms
            .get(room)
            .filter(|tx| tx.receiver_count() > 0)
            .and_then(|tx| tx.send(payload).ok())
            .unwrap_or(0)
    }

    /// Number of connected sessions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Payloads that reached at least one live session.
    #[must_use]
    pub fn delivered_count(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    /// Payloads dropped because no session was connected.
    #[must_use]
    pub fn missed_count(&self) -> u64 {
        self.missed.load(Ordering::Relaxed)
    }

    fn drop_mailbox_if_idle(&self, user_id: &UserId) {
        self.mailboxes
            .remove_if(user_id, |_, tx| tx.receiver_count() == 0);
    }

    fn drop_room_if_idle(&self, room: &RoomKey) {
        self.rooms.remove_if(room, |_, tx| tx.receiver_count() == 0);
    }
}

impl Default for PushChannel {
    fn default() -> Self {
        Self::new()
    }
}
