use core::fmt;
use strum::IntoEnumIterator;

use crate::{
    moves::{
        attack_boards::{king_attacks, knight_attacks, pawn_attacks, ray_attacks},
        movegenerator::generate_legal_moves,
        moves::{Castle, Move, DIAGONALS, ORTHOGONALS},
    },
    types::{
        bitboard::Bitboard,
        pieces::{Color, Piece, PieceName, NUM_COLORS, NUM_PIECES},
        square::Square,
    },
};

use super::{
    undo::{UndoRecord, UndoStack},
    zobrist::piece_square_key,
};

/// Bitboard position. Mutated only through `make_move` and `unmake_move` once constructed.
#[derive(Clone)]
pub struct Board {
    bitboards: [[Bitboard; NUM_PIECES]; NUM_COLORS],
    color_occupancies: [Bitboard; NUM_COLORS],
    occupancies: Bitboard,
    pub(crate) to_move: Color,
    pub(crate) castling: [bool; 4],
    pub(crate) en_passant_square: Option<Square>,
    pub(crate) zobrist_hash: u64,
    history: UndoStack,
    king_squares: [Option<Square>; NUM_COLORS],
    live_pieces: u32,
}

impl Default for Board {
    fn default() -> Self {
        Board {
            bitboards: [[Bitboard::EMPTY; NUM_PIECES]; NUM_COLORS],
            color_occupancies: [Bitboard::EMPTY; NUM_COLORS],
            occupancies: Bitboard::EMPTY,
            castling: [false; 4],
            to_move: Color::White,
            en_passant_square: None,
            zobrist_hash: 0,
            history: UndoStack::default(),
            king_squares: [None; NUM_COLORS],
            live_pieces: 0,
        }
    }
}

impl Board {
    #[inline(always)]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    #[inline(always)]
    pub fn zobrist_hash(&self) -> u64 {
        self.zobrist_hash
    }

    #[inline(always)]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline(always)]
    pub fn can_castle(&self, c: Castle) -> bool {
        self.castling[c]
    }

    /// Rights in the order white kingside, white queenside, black kingside, black queenside
    pub fn castling_rights(&self) -> [bool; 4] {
        self.castling
    }

    #[inline(always)]
    pub fn bitboard(&self, side: Color, piece: PieceName) -> Bitboard {
        self.bitboards[side][piece]
    }

    #[inline(always)]
    pub fn color_occupancies(&self, color: Color) -> Bitboard {
        self.color_occupancies[color]
    }

    #[inline(always)]
    pub fn occupancies(&self) -> Bitboard {
        self.occupancies
    }

    /// Linear scan over the twelve piece boards
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        for color in Color::iter() {
            for name in PieceName::iter() {
                if self.bitboards[color][name].square_occupied(sq) {
                    return Some(Piece::new(name, color));
                }
            }
        }
        None
    }

    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king_squares[color]
    }

    pub fn live_piece_count(&self) -> u32 {
        self.live_pieces
    }

    /// Number of moves applied and not yet undone
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Overrides the side to move of a freshly constructed position. An en passant square only
    /// makes sense for the side it was recorded for, so it is dropped when the side changes.
    pub fn with_side_to_move(mut self, side: Color) -> Self {
        debug_assert!(self.history.is_empty());
        if side != self.to_move {
            self.to_move = side;
            self.en_passant_square = None;
        }
        self
    }

    /// Adds a piece during construction from position text
    pub(crate) fn add_piece(&mut self, piece: Piece, sq: Square) {
        self.place_piece(piece, sq);
        if piece.name == PieceName::King {
            self.king_squares[piece.color] = Some(sq);
        }
        self.live_pieces += 1;
        self.update_occupancies();
    }

    #[inline(always)]
    fn place_piece(&mut self, piece: Piece, sq: Square) {
        debug_assert!(self.piece_at(sq).is_none(), "{sq} is already occupied");
        self.bitboards[piece.color][piece.name] |= sq.bitboard();
        self.zobrist_hash ^= piece_square_key(piece, sq);
    }

    #[inline(always)]
    fn remove_piece(&mut self, piece: Piece, sq: Square) {
        debug_assert!(self.bitboards[piece.color][piece.name].square_occupied(sq));
        self.bitboards[piece.color][piece.name] &= !sq.bitboard();
        self.zobrist_hash ^= piece_square_key(piece, sq);
    }

    /// Occupancy sets are always derived from the piece boards, never trusted on their own
    fn update_occupancies(&mut self) {
        for color in Color::iter() {
            self.color_occupancies[color] = self.bitboards[color]
                .iter()
                .fold(Bitboard::EMPTY, |acc, &bb| acc | bb);
        }
        self.occupancies = self.color_occupancies[Color::White] | self.color_occupancies[Color::Black];
    }

    /// Returns true if any piece of color `attacker` attacks `sq`
    pub fn square_under_attack(&self, attacker: Color, sq: Square) -> bool {
        let occupancies = self.occupancies();
        let queens = self.bitboard(attacker, PieceName::Queen);
        let rooks = self.bitboard(attacker, PieceName::Rook) | queens;
        let bishops = self.bitboard(attacker, PieceName::Bishop) | queens;

        ray_attacks(sq, occupancies, &ORTHOGONALS) & rooks != Bitboard::EMPTY
            || ray_attacks(sq, occupancies, &DIAGONALS) & bishops != Bitboard::EMPTY
            || knight_attacks(sq) & self.bitboard(attacker, PieceName::Knight) != Bitboard::EMPTY
            || king_attacks(sq) & self.bitboard(attacker, PieceName::King) != Bitboard::EMPTY
            || pawn_attacks(sq, !attacker) & self.bitboard(attacker, PieceName::Pawn) != Bitboard::EMPTY
    }

    /// A side without a king is never in check
    pub fn in_check(&self, side: Color) -> bool {
        self.king_square(side)
            .is_some_and(|king_sq| self.square_under_attack(!side, king_sq))
    }

    pub fn is_checkmate(&mut self) -> bool {
        let side = self.to_move;
        self.in_check(side) && generate_legal_moves(self, side).is_empty()
    }

    pub fn is_stalemate(&mut self) -> bool {
        let side = self.to_move;
        !self.in_check(side) && generate_legal_moves(self, side).is_empty()
    }

    /// Function makes a move and modifies board state to reflect the move that just happened.
    /// Legality is the caller's concern.
    pub fn make_move(&mut self, m: Move) {
        let piece_moving = m.piece_moving();
        let color = piece_moving.color;
        let origin = m.origin_square();
        let dest = m.dest_square();

        self.history.push(UndoRecord {
            captured: m.captured().map(|c| (c, m.capture_square())),
            castling: self.castling,
            en_passant_square: self.en_passant_square,
            castled: m.castle_type(),
            side_to_move: self.to_move,
        });

        // En passant captures land behind the captured pawn, so capture_square handles both cases
        if let Some(captured) = m.captured() {
            self.remove_piece(captured, m.capture_square());
            if captured.name == PieceName::King {
                self.king_squares[captured.color] = None;
            }
            self.live_pieces -= 1;
        }

        self.remove_piece(piece_moving, origin);
        let placed = match m.promotion() {
            Some(p) => Piece::new(p.piece_name(), color),
            None => piece_moving,
        };
        self.place_piece(placed, dest);

        // Move rooks if a castle move is applied
        if let Some(c) = m.castle_type() {
            let rook = Piece::new(PieceName::Rook, color);
            self.remove_piece(rook, c.rook_origin());
            self.place_piece(rook, c.rook_dest());
        }

        // Update board's king square if king moves and remove ability to castle
        if piece_moving.name == PieceName::King {
            self.king_squares[color] = Some(dest);
            for c in Castle::for_color(color) {
                self.castling[c] = false;
            }
        }

        // A rook leaving or being captured on its home square loses that side's right
        for c in Castle::iter() {
            if origin == c.rook_origin() || dest == c.rook_origin() {
                self.castling[c] = false;
            }
        }

        self.en_passant_square = if piece_moving.name == PieceName::Pawn && origin.rank().abs_diff(dest.rank()) == 2 {
            Some(Square((origin.0 + dest.0) / 2))
        } else {
            None
        };

        self.to_move = !color;
        self.update_occupancies();

        debug_assert_eq!(self.zobrist_hash, self.generate_hash());
    }

    /// Reverses the most recent `make_move`, which must have been given the same move
    pub fn unmake_move(&mut self, m: Move) {
        let record = self
            .history
            .pop()
            .expect("unmake_move called without a matching make_move");
        let piece_moving = m.piece_moving();
        let color = piece_moving.color;
        let origin = m.origin_square();
        let dest = m.dest_square();

        let placed = match m.promotion() {
            Some(p) => Piece::new(p.piece_name(), color),
            None => piece_moving,
        };
        self.remove_piece(placed, dest);
        self.place_piece(piece_moving, origin);

        if let Some(c) = record.castled {
            let rook = Piece::new(PieceName::Rook, color);
            self.remove_piece(rook, c.rook_dest());
            self.place_piece(rook, c.rook_origin());
        }

        if let Some((captured, sq)) = record.captured {
            self.place_piece(captured, sq);
            if captured.name == PieceName::King {
                self.king_squares[captured.color] = Some(sq);
            }
            self.live_pieces += 1;
        }

        if piece_moving.name == PieceName::King {
            self.king_squares[color] = Some(origin);
        }

        self.castling = record.castling;
        self.en_passant_square = record.en_passant_square;
        self.to_move = record.side_to_move;
        self.update_occupancies();

        debug_assert_eq!(self.zobrist_hash, self.generate_hash());
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut str = String::new();

        for row in (0..8).rev() {
            str.push_str(&(row + 1).to_string());
            str.push_str(" | ");

            for col in 0..8 {
                match self.piece_at(Square::new(row, col)) {
                    Some(piece) => str.push(piece.to_char()),
                    None => str.push('_'),
                }
                str.push_str(" | ");
            }

            str.push('\n');
        }

        str.push_str("    a   b   c   d   e   f   g   h\n");

        write!(f, "{}", str)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut str = String::new();
        str += match self.to_move {
            Color::White => "White to move\n",
            Color::Black => "Black to move\n",
        };
        str += &self.to_string();
        str += "Castles available: ";
        for c in Castle::iter().filter(|&c| self.can_castle(c)) {
            str.push(c.to_char());
        }
        str += "\n";
        if let Some(s) = &self.en_passant_square {
            str += "En Passant Square: ";
            str += &s.to_string();
            str += "\n";
        }
        str += "Hash: ";
        str += &format!("{:#018x}", self.zobrist_hash);
        write!(f, "{}", str)
    }
}
