pub mod attack_boards;
pub mod movegenerator;
pub mod movelist;
pub mod moves;
