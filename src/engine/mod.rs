pub mod command;
pub mod perft;
pub mod transposition;
