use thiserror::Error;

use crate::board::{Color, Coord, Move};

/// Recoverable faults raised by a search primitive. The driver folds both into the same
/// "keep the last completed depth" path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchFault {
    #[error("search deadline exceeded")]
    DeadlineExceeded,
    #[error("search resources exhausted")]
    ResourceExhausted,
}

/// Contract violations surfaced to the agent's caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    #[error("asked to move in a position with no legal moves")]
    NoLegalMoves,
    #[error("{agent:?} agent asked to move while {to_move:?} is to move")]
    WrongSide { agent: Color, to_move: Color },
    #[error("search primitive returned a move that is not legal here: {0}")]
    IllegalMove(Move),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("turns per round (k) must be at least 1")]
    ZeroTurnsPerRound,
    #[error("time per round must be positive, got {0:?}")]
    NonPositiveRoundTime(std::time::Duration),
    #[error("depth split fraction {fraction} at depth {depth} is outside (0, 1]")]
    SplitFraction { depth: usize, fraction: f64 },
    #[error("max depth must be at least 1")]
    ZeroMaxDepth,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("position text needs at least 2 fields, got {0}")]
    FieldCount(usize),
    #[error("expected 8 rows, got {0}")]
    RowCount(usize),
    #[error("row {0} does not span exactly 8 cells")]
    RowWidth(u8),
    #[error("invalid piece char: {0}")]
    PieceChar(char),
    #[error("piece placed on light square {0}")]
    LightSquare(Coord),
    #[error("invalid side to move: {0}")]
    SideToMove(String),
    #[error("invalid turns-since-capture counter: {0}")]
    Counter(String),
}
