//! Rejected-command taxonomy
//!
//! Every command on the engine surface re-validates its preconditions. A
//! failed precondition is never fatal: callers log it and carry on.

use thiserror::Error;

use crate::sim::Species;

/// Result type for progression and shop commands.
pub type CommandResult<T = ()> = Result<T, CommandError>;

/// Reasons a command was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The session is not in the playing phase.
    #[error("session is not playing")]
    NotPlaying,

    /// Species has not been unlocked yet.
    #[error("{0} is locked")]
    Locked(Species),

    /// Species was already bought this session.
    #[error("{0} is already purchased")]
    AlreadyPurchased(Species),

    /// Another species is still being raised.
    #[error("{0} is still being raised")]
    AnotherSpeciesCurrent(Species),

    /// Species has not been bought.
    #[error("{0} is not purchased")]
    NotPurchased(Species),

    /// Species is mid-evolution.
    #[error("{0} is evolving")]
    Evolving(Species),

    /// Species has eaten all it can before evolving.
    #[error("{0} is fully fed")]
    FullyFed(Species),

    /// Species has not been fed enough to evolve.
    #[error("{species} needs {remaining} more feeds")]
    NotReady { species: Species, remaining: u32 },

    /// No species is currently being raised.
    #[error("no species to feed")]
    NoCurrentSpecies,

    /// Score does not cover the price.
    #[error("need {cost} points, have {score}")]
    InsufficientFunds { cost: u64, score: u64 },
}
