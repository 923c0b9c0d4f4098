pub mod board;
pub mod fen;
pub mod undo;
pub mod zobrist;
