//! Toggle pairings: favorites, shopping cart entries and follows.
//!
//! All three are a uniqueness-constrained (owner, target) pair with exactly
//! two transitions, add and remove. The state machine lives here once; stores
//! only have to insert and delete atomically.

use std::collections::HashSet;
use std::convert::Infallible;

use thiserror::Error;
use uuid::Uuid;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// user -> recipe
    Favorite,
    /// user -> recipe
    ShoppingCart,
    /// user -> author
    Follow,
}

impl RelationKind {
    pub fn allows_self_pair(self) -> bool {
        self.self_pair_message().is_none()
    }

    /// Rejection message for owner == target, for kinds that forbid it
    fn self_pair_message(self) -> Option<&'static str> {
        match self {
            RelationKind::Favorite | RelationKind::ShoppingCart => None,
            RelationKind::Follow => Some("Cannot subscribe to yourself"),
        }
    }

    fn target_field(self) -> &'static str {
        match self {
            RelationKind::Favorite | RelationKind::ShoppingCart => "recipe",
            RelationKind::Follow => "author",
        }
    }

    fn already_present_message(self) -> &'static str {
        match self {
            RelationKind::Favorite => "Recipe is already in favorites",
            RelationKind::ShoppingCart => "Recipe is already in the shopping cart",
            RelationKind::Follow => "Already subscribed to this author",
        }
    }

    fn not_present_message(self) -> &'static str {
        match self {
            RelationKind::Favorite => "Recipe is not in favorites",
            RelationKind::ShoppingCart => "Recipe is not in the shopping cart",
            RelationKind::Follow => "Not subscribed to this author",
        }
    }

    fn target_missing_message(self) -> &'static str {
        match self {
            RelationKind::Favorite | RelationKind::ShoppingCart => "Recipe not found",
            RelationKind::Follow => "User not found",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyPresent,
    /// The target row does not exist (or vanished mid-request)
    TargetMissing,
}

/// Storage for toggle pairings.
///
/// `insert_pair` must be a single atomic insert guarded by the store's
/// uniqueness constraint: of two racing inserts for the same pair exactly
/// one reports `Inserted`.
pub trait PairStore {
    type Error;

    fn insert_pair(
        &mut self,
        kind: RelationKind,
        owner: Uuid,
        target: Uuid,
    ) -> Result<InsertOutcome, Self::Error>;

    /// Returns whether a pair was deleted.
    fn delete_pair(
        &mut self,
        kind: RelationKind,
        owner: Uuid,
        target: Uuid,
    ) -> Result<bool, Self::Error>;
}

#[derive(Debug, Error)]
pub enum PairingError<E> {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Pairing storage failed: {0}")]
    Storage(E),
}

pub fn add_pair<S: PairStore>(
    store: &mut S,
    kind: RelationKind,
    owner: Uuid,
    target: Uuid,
) -> Result<(), PairingError<S::Error>> {
    if owner == target {
        if let Some(message) = kind.self_pair_message() {
            return Err(DomainError::validation(kind.target_field(), message).into());
        }
    }

    match store
        .insert_pair(kind, owner, target)
        .map_err(PairingError::Storage)?
    {
        InsertOutcome::Inserted => Ok(()),
        InsertOutcome::AlreadyPresent => {
            Err(DomainError::Conflict(kind.already_present_message().to_string()).into())
        }
        InsertOutcome::TargetMissing => {
            Err(DomainError::NotFound(kind.target_missing_message().to_string()).into())
        }
    }
}

pub fn remove_pair<S: PairStore>(
    store: &mut S,
    kind: RelationKind,
    owner: Uuid,
    target: Uuid,
) -> Result<(), PairingError<S::Error>> {
    if store
        .delete_pair(kind, owner, target)
        .map_err(PairingError::Storage)?
    {
        Ok(())
    } else {
        Err(DomainError::NotFound(kind.not_present_message().to_string()).into())
    }
}

/// In-memory [`PairStore`] for tests and tooling.
#[derive(Debug, Default, Clone)]
pub struct MemoryPairStore {
    pairs: HashSet<(RelationKind, Uuid, Uuid)>,
    missing_targets: HashSet<Uuid>,
}

impl MemoryPairStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make inserts pointing at `target` report [`InsertOutcome::TargetMissing`]
    pub fn mark_missing(&mut self, target: Uuid) {
        self.missing_targets.insert(target);
    }

    pub fn contains(&self, kind: RelationKind, owner: Uuid, target: Uuid) -> bool {
        self.pairs.contains(&(kind, owner, target))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl PairStore for MemoryPairStore {
    type Error = Infallible;

    fn insert_pair(
        &mut self,
        kind: RelationKind,
        owner: Uuid,
        target: Uuid,
    ) -> Result<InsertOutcome, Self::Error> {
        if self.missing_targets.contains(&target) {
            return Ok(InsertOutcome::TargetMissing);
        }
        if self.pairs.insert((kind, owner, target)) {
            Ok(InsertOutcome::Inserted)
        } else {
            Ok(InsertOutcome::AlreadyPresent)
        }
    }

    fn delete_pair(
        &mut self,
        kind: RelationKind,
        owner: Uuid,
        target: Uuid,
    ) -> Result<bool, Self::Error> {
        Ok(self.pairs.remove(&(kind, owner, target)))
    }
}
