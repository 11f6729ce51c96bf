//! # Acting Identity
//!
//! The resolved identity handed to the core by the authentication layer.
//! The core trusts this value and performs no credential verification itself.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular registered user.
    User,
    /// Moderator with elevated content privileges.
    Moderator,
    /// Site administrator.
    Admin,
}

/// A resolved `{user, role}` pair supplied with every inbound action.
///
/// Identity is always passed explicitly into core operations as a parameter,
/// never read from ambient/global request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The authenticated user's id.
    pub user_id: UserId,
    /// The authenticated user's role.
    pub role: Role,
}

impl Identity {
    /// Identity for a regular user.
    pub fn user(user_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::User,
        }
    }

    /// Identity for a moderator.
    pub fn moderator(user_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::Moderator,
        }
    }
}
