//! # Vote Ledger
//!
//! Toggle semantics over an entity's [`VoteRecord`], implemented once and
//! applied to both votable entity types.
//!
//! ## Invariants
//!
//! - A user appears in at most one of the two vote sets after any toggle.
//! - Casting the same direction twice returns the record to its prior state.
//! - Casting the opposite direction atomically clears the existing vote.

use shared_types::{Answer, Question, UserId, VoteDirection, VoteRecord};

/// Capability set required of a votable entity: it has an author and carries
/// a vote record. Questions and answers both qualify.
pub trait Votable {
    /// The entity's author.
    fn author(&self) -> UserId;

    /// The entity's vote record.
    fn votes(&self) -> &VoteRecord;

    /// The entity's vote record, mutable.
    fn votes_mut(&mut self) -> &mut VoteRecord;

    /// Soft-delete tombstone. Deleted entities are not votable.
    fn is_deleted(&self) -> bool;
}

impl Votable for Question {
    fn author(&self) -> UserId {
        self.author
    }

    fn votes(&self) -> &VoteRecord {
        &self.votes
    }

    fn votes_mut(&mut self) -> &mut VoteRecord {
        &mut self.votes
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

impl Votable for Answer {
    fn author(&self) -> UserId {
        self.author
    }

    fn votes(&self) -> &VoteRecord {
        &self.votes
    }

    fn votes_mut(&mut self) -> &mut VoteRecord {
        &mut self.votes
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

/// Result of one vote toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    /// Whether the toggle cast a new vote or retracted an existing one.
    pub cast: bool,
    /// Direction the user acted in.
    pub direction: VoteDirection,
    /// Score after the toggle.
    pub score: i64,
    /// The entity's author, for downstream notification fan-out.
    pub author: UserId,
}

impl VoteOutcome {
    /// Whether this toggle should produce a notification: only a cast by
    /// someone other than the entity's author qualifies.
    pub fn notifies(&self, voter: &UserId) -> bool {
        self.cast && self.author != *voter
    }
}

/// Apply one user's vote action to an entity.
///
/// - Same-direction vote present: remove it (toggle off, no notification).
/// - Otherwise: add to the matching set and clear any opposite vote in the
///   same mutation.
///
/// The caller is responsible for running this inside the entity's critical
/// section so concurrent toggles from different users both land.
pub fn toggle_vote<V: Votable>(entity: &mut V, voter: UserId, direction: VoteDirection) -> VoteOutcome {
    let author = entity.author();
    let votes = entity.votes_mut();

    let cast = if votes.has_vote(&voter, direction) {
        // Toggle off
        votes.set_mut(direction).remove(&voter);
        false
    } else {
        votes.set_mut(direction.opposite()).remove(&voter);
        votes.set_mut(direction).insert(voter);
        true
    };

    VoteOutcome {
        cast,
        direction,
        score: votes.score(),
        author,
    }
}
