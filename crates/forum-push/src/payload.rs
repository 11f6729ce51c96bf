//! Push payload and room key types.

use serde::{Deserialize, Serialize};
use shared_types::{Notification, QuestionId};
use std::fmt;

/// Key of a per-question room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomKey(pub QuestionId);

impl RoomKey {
    /// Room for a question's live viewers.
    pub fn question(id: QuestionId) -> Self {
        Self(id)
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "question:{}", self.0)
    }
}

/// A payload delivered over the push channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PushPayload {
    /// A freshly persisted notification, forwarded to its recipient's
    /// mailbox.
    Notification(Notification),

    /// Activity scoped to one question, broadcast to its room. The body is
    /// free-form JSON the client renders (score changes, new answers).
    QuestionActivity {
        /// The question the activity belongs to.
        question_id: QuestionId,
        /// Client-facing activity body.
        body: serde_json::Value,
    },
}
