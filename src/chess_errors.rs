//! Errors used throughout the rules engine.
//!
//! `ChessErrors` is the single error type for failures that are not rule
//! violations. Illegal moves and promotions are reported through plain
//! return values (`MoveReport`, `bool`) because they are an expected part of
//! interactive play; the variants below cover malformed input and setup
//! problems that the caller has to correct.
//!
//! Usage guidelines:
//! - Parsing helpers (`FromStr` impls for squares, kinds, colours, presets)
//!   return the `Invalid*` variants with the offending text.
//! - `Board::start_game` returns `InvalidKingCount`; its `Display` output is
//!   the message handed back to the player.
//! - Session command parsing uses `InvalidCommand` and `MissingArgument`.
//! - Deserializing a `Board` returns `InvalidSnapshot` when the square list
//!   is not the full board in index order.

use thiserror::Error;

/// Unified error type for the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// A square id outside `A1`..`H8`.
    #[error("invalid square id: {0:?}")]
    InvalidSquareId(String),

    /// A piece kind that is not one of pawn, knight, bishop, rook, queen, king.
    #[error("invalid piece kind: {0:?}")]
    InvalidPieceClass(String),

    /// A colour that is not black or white.
    #[error("invalid colour: {0:?}")]
    InvalidPieceTeam(String),

    /// A game can only start with exactly one king per side.
    #[error("a game needs exactly one king per side (white has {white}, black has {black})")]
    InvalidKingCount { white: usize, black: usize },

    /// `start_game` was called while a game was running.
    #[error("a game is already in progress")]
    GameAlreadyInProgress,

    /// Preset name not recognised.
    #[error("unknown preset: {0:?}")]
    UnknownPreset(String),

    /// Session command not recognised.
    #[error("unknown command: {0:?}")]
    InvalidCommand(String),

    /// Session command is missing a required argument.
    #[error("command {command:?} is missing its {argument} argument")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// A deserialized board does not hold the 64 squares in index order.
    #[error("invalid board snapshot: {0}")]
    InvalidSnapshot(String),

    /// A numeric argument failed to parse.
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),
}
