#![allow(clippy::module_inception)]
pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod moves;
pub mod search;
pub mod types;
