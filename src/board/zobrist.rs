use lazy_static::lazy_static;
use strum::IntoEnumIterator;

use crate::{
    board::board::Board,
    moves::moves::Castle,
    types::{
        pieces::{Color, Piece, PieceName},
        square::Square,
    },
};

/// Xorshift64 https://en.wikipedia.org/wiki/Xorshift
#[derive(Copy, Clone)]
pub struct Rng(u64);

impl Default for Rng {
    fn default() -> Self {
        Self(0xE926E6210D9E3487)
    }
}

impl Rng {
    pub fn next_u64(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }
}

pub struct Zobrist {
    piece_square_hashes: [[[u64; 64]; 6]; 2],
    turn_hash: u64,
    castling: [u64; 4],
    en_passant_file: [u64; 8],
}

impl Default for Zobrist {
    fn default() -> Self {
        let mut rng = Rng::default();
        let mut piece_square_hashes = [[[0; 64]; 6]; 2];
        piece_square_hashes
            .iter_mut()
            .flatten()
            .flatten()
            .for_each(|x| *x = rng.next_u64());
        let turn_hash = rng.next_u64();
        let mut castling = [0; 4];
        castling.iter_mut().for_each(|x| *x = rng.next_u64());
        let mut en_passant_file = [0; 8];
        en_passant_file.iter_mut().for_each(|x| *x = rng.next_u64());
        Self {
            piece_square_hashes,
            turn_hash,
            castling,
            en_passant_file,
        }
    }
}

lazy_static! {
    static ref ZOBRIST: Zobrist = Zobrist::default();
}

/// Key of one (piece, square) occupancy term
#[inline(always)]
pub fn piece_square_key(piece: Piece, sq: Square) -> u64 {
    ZOBRIST.piece_square_hashes[piece.color][piece.name][sq]
}

impl Board {
    /// Hash of the piece placement recomputed from scratch. The incrementally maintained
    /// `zobrist_hash` must always equal this value.
    pub fn generate_hash(&self) -> u64 {
        let mut hash = 0;

        for color in Color::iter() {
            for piece in PieceName::iter() {
                for sq in self.bitboard(color, piece) {
                    hash ^= piece_square_key(Piece::new(piece, color), sq);
                }
            }
        }

        hash
    }

    /// Placement hash extended with side to move, castling rights and en passant file. Two
    /// positions with the same key are interchangeable for search purposes.
    pub fn position_key(&self) -> u64 {
        let mut key = self.zobrist_hash;
        if self.to_move == Color::Black {
            key ^= ZOBRIST.turn_hash;
        }
        for c in Castle::iter() {
            if self.can_castle(c) {
                key ^= ZOBRIST.castling[c];
            }
        }
        if let Some(sq) = self.en_passant_square {
            key ^= ZOBRIST.en_passant_file[sq.file() as usize];
        }
        key
    }
}

#[cfg(test)]
mod hashing_test {
    use crate::board::fen::{self, build_board};

    #[test]
    fn test_hashing() {
        let board1 = build_board(fen::STARTING_FEN).unwrap();
        let board2 = build_board("4r3/4k3/8/4K3/8/8/8/8 w - - 0 1").unwrap();
        let board3 = build_board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_ne!(board1.generate_hash(), board2.generate_hash());
        assert_eq!(board1.generate_hash(), board3.generate_hash());
        assert_eq!(board1.zobrist_hash, board1.generate_hash());
    }

    #[test]
    fn test_position_key_separates_side_and_rights() {
        let white = build_board("4k3/8/8/8/8/8/8/R3K3 w Q -").unwrap();
        let black = build_board("4k3/8/8/8/8/8/8/R3K3 b Q -").unwrap();
        let no_rights = build_board("4k3/8/8/8/8/8/8/R3K3 w - -").unwrap();
        assert_eq!(white.zobrist_hash, black.zobrist_hash);
        assert_ne!(white.position_key(), black.position_key());
        assert_ne!(white.position_key(), no_rights.position_key());
    }
}
