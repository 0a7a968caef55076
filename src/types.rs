//! Shared result, outcome and key types for the codenest application.
use std::fmt;

use crate::CodeNestError;

/// A specialized Result type for codenest operations.
pub type Result<T> = std::result::Result<T, CodeNestError>;

/// Identifier of a tutorial within a store.
pub type TutorialId = u64;

/// Why a draft was not turned into a tutorial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Title was empty or whitespace-only
    EmptyTitle,
    /// Every tutorial id is already taken
    IdsExhausted,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::EmptyTitle => write!(f, "title must not be empty"),
            RejectReason::IdsExhausted => write!(f, "no tutorial ids left"),
        }
    }
}

/// Result of submitting a draft to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The tutorial was appended with the given id
    Added(TutorialId),
    /// Nothing was stored
    Rejected(RejectReason),
}

impl AddOutcome {
    pub fn id(&self) -> Option<TutorialId> {
        match self {
            AddOutcome::Added(id) => Some(*id),
            AddOutcome::Rejected(_) => None,
        }
    }
}

/// Identity of a copy button, used by the copied indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKey {
    /// A code block of the tutorial being read, by extraction id
    Block(usize),
    /// The code preview of a tutorial in the list view
    Preview(TutorialId),
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKey::Block(id) => write!(f, "block-{}", id),
            BlockKey::Preview(id) => write!(f, "preview-{}", id),
        }
    }
}
