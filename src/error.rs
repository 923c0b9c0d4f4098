use thiserror::Error;

use crate::types::pieces::Color;

/// Position text that does not describe a board
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("position text is empty")]
    Empty,
    #[error("expected 8 ranks, found {0}")]
    WrongRankCount(usize),
    #[error("rank {rank} spans {files} files instead of 8")]
    WrongFileCount { rank: u8, files: usize },
    #[error("unknown piece character '{0}'")]
    UnknownPiece(char),
    #[error("side to move must be 'w' or 'b', found '{0}'")]
    InvalidSideToMove(String),
    #[error("invalid en passant square '{0}'")]
    InvalidEnPassant(String),
    #[error("{0:?} has more than 16 pieces")]
    TooManyPieces(Color),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("malformed move text '{0}'")]
    Malformed(String),
    #[error("'{0}' is not a legal move in this position")]
    Illegal(String),
}

/// A command loop request that cannot be searched
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("expected <side>,<depth>,<position>, found {0} field(s)")]
    FieldCount(usize),
    #[error("side must be 1, -1, w or b, found '{0}'")]
    InvalidSide(String),
    #[error("depth must be an integer between 1 and {max}, found '{found}'")]
    InvalidDepth { found: String, max: i32 },
    #[error(transparent)]
    Position(#[from] PositionError),
}
