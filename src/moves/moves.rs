use core::fmt;
use std::fmt::Display;

use crate::{
    board::board::Board,
    error::MoveParseError,
    impl_index,
    moves::moves::Direction::*,
    types::{
        bitboard::Bitboard,
        pieces::{Color, Piece, PieceName},
        square::Square,
    },
};
use std::ops::{Index, IndexMut};

use strum_macros::EnumIter;

use super::movegenerator::generate_legal_moves;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveType {
    Normal,
    Promotion,
    EnPassant,
    Castle,
}

/// Cardinal directions from the point of view of white side
#[derive(EnumIter, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    North = 8,
    NorthWest = 7,
    West = -1,
    SouthWest = -9,
    South = -8,
    SouthEast = -7,
    East = 1,
    NorthEast = 9,
}

impl Direction {
    /// Returns the opposite direction of the given direction
    pub fn opp(&self) -> Self {
        match self {
            North => South,
            NorthWest => SouthEast,
            West => East,
            SouthWest => NorthEast,
            South => North,
            SouthEast => NorthWest,
            East => West,
            NorthEast => SouthWest,
        }
    }
}

pub const ORTHOGONALS: [Direction; 4] = [North, South, East, West];
pub const DIAGONALS: [Direction; 4] = [NorthWest, NorthEast, SouthWest, SouthEast];
pub const ALL_DIRECTIONS: [Direction; 8] = [North, NorthWest, West, SouthWest, South, SouthEast, East, NorthEast];

const NO_CAPTURE: u32 = 0b1111;

/// A move is packed into 24 bits of a u32
///
/// bit  0- 5: origin square (from 0 to 63)
/// bit  6-11: destination square (from 0 to 63)
/// bit 12-13: promotion piece
/// bit 14-15: special move flag: normal move(0), promotion (1), en passant (2), castling (3)
/// bit 16-19: moving piece (0 to 11)
/// bit 20-23: captured piece (0 to 11), or 15 when nothing is captured
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    /// A promotion without an explicit target promotes to a queen
    pub fn new(
        origin: Square,
        destination: Square,
        piece: Piece,
        captured: Option<Piece>,
        promotion: Option<Promotion>,
        move_type: MoveType,
    ) -> Self {
        let promotion = match (move_type, promotion) {
            (MoveType::Promotion, None) => 3,
            (_, Some(Promotion::Queen)) => 3,
            (_, Some(Promotion::Rook)) => 2,
            (_, Some(Promotion::Bishop)) => 1,
            (_, Some(Promotion::Knight)) => 0,
            (_, None) => 0,
        };
        let move_type = match move_type {
            MoveType::Normal => 0,
            MoveType::Promotion => 1,
            MoveType::EnPassant => 2,
            MoveType::Castle => 3,
        };
        let captured = captured.map_or(NO_CAPTURE, |p| p.idx() as u32);
        let m = origin.0 as u32
            | ((destination.0 as u32) << 6)
            | (promotion << 12)
            | (move_type << 14)
            | ((piece.idx() as u32) << 16)
            | (captured << 20);
        Move(m)
    }

    #[inline(always)]
    fn flag(self) -> u32 {
        (self.0 >> 14) & 0b11
    }

    #[inline(always)]
    pub fn move_type(self) -> MoveType {
        match self.flag() {
            0 => MoveType::Normal,
            1 => MoveType::Promotion,
            2 => MoveType::EnPassant,
            _ => MoveType::Castle,
        }
    }

    #[inline(always)]
    pub fn is_castle(self) -> bool {
        self.flag() == 3
    }

    #[inline(always)]
    pub fn is_en_passant(self) -> bool {
        self.flag() == 2
    }

    #[inline(always)]
    pub fn is_promotion(self) -> bool {
        self.flag() == 1
    }

    #[inline(always)]
    pub fn promotion(self) -> Option<Promotion> {
        if !self.is_promotion() {
            return None;
        }
        match (self.0 >> 12) & 0b11 {
            0 => Some(Promotion::Knight),
            1 => Some(Promotion::Bishop),
            2 => Some(Promotion::Rook),
            _ => Some(Promotion::Queen),
        }
    }

    #[inline(always)]
    pub fn origin_square(self) -> Square {
        Square((self.0 & 0b111111) as u8)
    }

    #[inline(always)]
    pub fn dest_square(self) -> Square {
        Square(((self.0 >> 6) & 0b111111) as u8)
    }

    #[inline(always)]
    pub fn piece_moving(self) -> Piece {
        Piece::try_from_idx((self.0 >> 16) & 0b1111).expect("Move always packs a valid moving piece")
    }

    #[inline(always)]
    pub fn captured(self) -> Option<Piece> {
        Piece::try_from_idx((self.0 >> 20) & 0b1111)
    }

    #[inline(always)]
    pub fn is_capture(self) -> bool {
        self.captured().is_some()
    }

    /// Square holding the captured piece. Differs from the destination only for en passant.
    pub fn capture_square(self) -> Square {
        if self.is_en_passant() {
            match self.piece_moving().color {
                Color::White => self.dest_square().shift(South),
                Color::Black => self.dest_square().shift(North),
            }
        } else {
            self.dest_square()
        }
    }

    pub fn castle_type(self) -> Option<Castle> {
        if !self.is_castle() {
            return None;
        }
        match self.dest_square() {
            Square(6) => Some(Castle::WhiteKing),
            Square(2) => Some(Castle::WhiteQueen),
            Square(62) => Some(Castle::BlackKing),
            Square(58) => Some(Castle::BlackQueen),
            _ => None,
        }
    }

    /// To Long Algebraic Notation
    pub fn to_lan(self) -> String {
        let mut str = format!("{}{}", self.origin_square(), self.dest_square());
        if let Some(p) = self.promotion() {
            str.push(p.piece_name().to_char());
        }
        str
    }

    /// Coordinate notation with capture and promotion markers, e.g. `e4xd5`, `e7e8=Q`, `O-O`
    pub fn to_notation(self) -> String {
        match self.castle_type() {
            Some(Castle::WhiteKing | Castle::BlackKing) => return "O-O".to_string(),
            Some(Castle::WhiteQueen | Castle::BlackQueen) => return "O-O-O".to_string(),
            None => (),
        }
        let separator = if self.is_capture() { "x" } else { "" };
        let mut str = format!("{}{separator}{}", self.origin_square(), self.dest_square());
        if let Some(p) = self.promotion() {
            str.push('=');
            str.push(p.piece_name().to_char().to_ascii_uppercase());
        }
        str
    }
}

/// Method converts a lan move into the matching legal move of the given position
pub fn from_lan(str: &str, board: &mut Board) -> Result<Move, MoveParseError> {
    let str = str.trim();
    if !(4..=5).contains(&str.len()) || !str.is_ascii() {
        return Err(MoveParseError::Malformed(str.to_string()));
    }
    let origin_sq = Square::from_algebraic(&str[0..2]).ok_or_else(|| MoveParseError::Malformed(str.to_string()))?;
    let dest_sq = Square::from_algebraic(&str[2..4]).ok_or_else(|| MoveParseError::Malformed(str.to_string()))?;
    let promotion = match str.chars().nth(4) {
        None => None,
        Some('q') => Some(Promotion::Queen),
        Some('r') => Some(Promotion::Rook),
        Some('b') => Some(Promotion::Bishop),
        Some('n') => Some(Promotion::Knight),
        Some(_) => return Err(MoveParseError::Malformed(str.to_string())),
    };

    let side = board.to_move;
    generate_legal_moves(board, side)
        .into_iter()
        .find(|m| {
            m.origin_square() == origin_sq
                && m.dest_square() == dest_sq
                && (m.promotion() == promotion || (promotion.is_none() && m.promotion() == Some(Promotion::Queen)))
        })
        .ok_or_else(|| MoveParseError::Illegal(str.to_string()))
}

#[derive(Clone, Copy, Debug, EnumIter, PartialEq, Eq)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    pub fn piece_name(self) -> PieceName {
        match self {
            Promotion::Queen => PieceName::Queen,
            Promotion::Rook => PieceName::Rook,
            Promotion::Bishop => PieceName::Bishop,
            Promotion::Knight => PieceName::Knight,
        }
    }
}

impl_index!(Castle);
#[derive(Clone, Copy, Debug, EnumIter, PartialEq, Eq)]
pub enum Castle {
    WhiteKing,
    WhiteQueen,
    BlackKing,
    BlackQueen,
}

impl Castle {
    pub fn color(self) -> Color {
        match self {
            Castle::WhiteKing | Castle::WhiteQueen => Color::White,
            Castle::BlackKing | Castle::BlackQueen => Color::Black,
        }
    }

    pub fn for_color(color: Color) -> [Castle; 2] {
        match color {
            Color::White => [Castle::WhiteKing, Castle::WhiteQueen],
            Color::Black => [Castle::BlackKing, Castle::BlackQueen],
        }
    }

    pub fn king_origin(self) -> Square {
        match self.color() {
            Color::White => Square(4),
            Color::Black => Square(60),
        }
    }

    pub fn king_dest(self) -> Square {
        match self {
            Castle::WhiteKing => Square(6),
            Castle::WhiteQueen => Square(2),
            Castle::BlackKing => Square(62),
            Castle::BlackQueen => Square(58),
        }
    }

    /// Home square of the rook this right belongs to
    pub fn rook_origin(self) -> Square {
        match self {
            Castle::WhiteKing => Square(7),
            Castle::WhiteQueen => Square(0),
            Castle::BlackKing => Square(63),
            Castle::BlackQueen => Square(56),
        }
    }

    pub fn rook_dest(self) -> Square {
        match self {
            Castle::WhiteKing => Square(5),
            Castle::WhiteQueen => Square(3),
            Castle::BlackKing => Square(61),
            Castle::BlackQueen => Square(59),
        }
    }

    /// Squares between king and rook that must be empty
    pub fn vacancies(self) -> Bitboard {
        match self {
            Castle::WhiteKing => Bitboard(0b0110_0000),
            Castle::WhiteQueen => Bitboard(0b0000_1110),
            Castle::BlackKing => Bitboard(0x6000_0000_0000_0000),
            Castle::BlackQueen => Bitboard(0x0e00_0000_0000_0000),
        }
    }

    /// King start, transit and destination squares, none of which may be attacked
    pub fn king_path(self) -> [Square; 3] {
        let (origin, dest) = (self.king_origin(), self.king_dest());
        let transit = Square((origin.0 + dest.0) / 2);
        [origin, transit, dest]
    }

    pub fn to_char(self) -> char {
        match self {
            Castle::WhiteKing => 'K',
            Castle::WhiteQueen => 'Q',
            Castle::BlackKing => 'k',
            Castle::BlackQueen => 'q',
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_lan())
    }
}

#[cfg(test)]
mod move_test {
    use super::*;
    use crate::board::fen::{build_board, STARTING_FEN};

    const WHITE_PAWN: Piece = Piece { name: PieceName::Pawn, color: Color::White };
    const BLACK_PAWN: Piece = Piece { name: PieceName::Pawn, color: Color::Black };
    const WHITE_KING: Piece = Piece { name: PieceName::King, color: Color::White };

    #[test]
    fn test_move_creation() {
        let normal_move = Move::new(Square(10), Square(20), WHITE_PAWN, None, None, MoveType::Normal);
        assert_eq!(normal_move.origin_square(), Square(10));
        assert_eq!(normal_move.dest_square(), Square(20));
        assert_eq!(normal_move.piece_moving(), WHITE_PAWN);
        assert_eq!(normal_move.captured(), None);
        assert!(!normal_move.is_castle());
        assert!(!normal_move.is_en_passant());
        assert_eq!(normal_move.promotion(), None);

        let promotion_move =
            Move::new(Square(52), Square(61), WHITE_PAWN, Some(BLACK_PAWN), Some(Promotion::Rook), MoveType::Promotion);
        assert_eq!(promotion_move.origin_square(), Square(52));
        assert_eq!(promotion_move.dest_square(), Square(61));
        assert_eq!(promotion_move.captured(), Some(BLACK_PAWN));
        assert!(promotion_move.is_promotion());
        assert_eq!(promotion_move.promotion(), Some(Promotion::Rook));

        let castle_move = Move::new(Square(4), Square(2), WHITE_KING, None, None, MoveType::Castle);
        assert!(castle_move.is_castle());
        assert_eq!(castle_move.castle_type(), Some(Castle::WhiteQueen));
        assert_eq!(castle_move.promotion(), None);

        let en_passant_move = Move::new(Square(35), Square(44), WHITE_PAWN, Some(BLACK_PAWN), None, MoveType::EnPassant);
        assert!(en_passant_move.is_en_passant());
        assert_eq!(en_passant_move.capture_square(), Square(36));
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let m = Move::new(Square(52), Square(60), WHITE_PAWN, None, None, MoveType::Promotion);
        assert_eq!(m.promotion(), Some(Promotion::Queen));
        assert_eq!(m.to_lan(), "e7e8q");
        assert_eq!(m.to_notation(), "e7e8=Q");
    }

    #[test]
    fn test_notation() {
        let capture = Move::new(Square(28), Square(35), WHITE_PAWN, Some(BLACK_PAWN), None, MoveType::Normal);
        assert_eq!(capture.to_lan(), "e4d5");
        assert_eq!(capture.to_notation(), "e4xd5");
        let castle = Move::new(Square(60), Square(62), Piece::new(PieceName::King, Color::Black), None, None, MoveType::Castle);
        assert_eq!(castle.to_notation(), "O-O");
        assert_eq!(castle.to_lan(), "e8g8");
    }

    #[test]
    fn test_from_lan() {
        let mut board = build_board(STARTING_FEN).unwrap();
        let m = from_lan("e2e4", &mut board).unwrap();
        assert_eq!(m.origin_square(), Square(12));
        assert_eq!(m.dest_square(), Square(28));
        assert_eq!(m.piece_moving(), WHITE_PAWN);
        assert!(matches!(from_lan("e2e5", &mut board), Err(MoveParseError::Illegal(_))));
        assert!(matches!(from_lan("z2e5", &mut board), Err(MoveParseError::Malformed(_))));
        assert!(matches!(from_lan("e2", &mut board), Err(MoveParseError::Malformed(_))));
    }

    #[test]
    fn test_from_lan_resolves_promotion_target() {
        let mut board = build_board("8/4P3/8/8/8/8/8/k6K w - -").unwrap();
        let queen: Move = from_lan("e7e8", &mut board).unwrap();
        assert_eq!(queen.promotion(), Some(Promotion::Queen));
        let knight: Move = from_lan("e7e8n", &mut board).unwrap();
        assert_eq!(knight.promotion(), Some(Promotion::Knight));
        assert_eq!(knight.piece_moving(), WHITE_PAWN);
        assert!(matches!(from_lan("e7e8k", &mut board), Err(MoveParseError::Malformed(_))));
        assert_eq!(board.ply_count(), 0);
    }

    #[test]
    fn test_castle_geometry() {
        assert_eq!(Castle::WhiteKing.king_path(), [Square(4), Square(5), Square(6)]);
        assert_eq!(Castle::BlackQueen.king_path(), [Square(60), Square(59), Square(58)]);
        for c in [Castle::WhiteKing, Castle::WhiteQueen, Castle::BlackKing, Castle::BlackQueen] {
            assert!(c.vacancies().square_occupied(c.rook_dest()));
            assert!(c.vacancies().square_is_empty(c.rook_origin()));
        }
    }
}
