use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::{
    error::PositionError,
    moves::moves::Castle,
    types::{
        pieces::{Color, Piece},
        square::Square,
    },
};

use super::board::Board;

/// A legal game never has more than this many pieces of one color
pub const MAX_PIECES_PER_SIDE: u32 = 16;

/// Fen string for the starting position of a board
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Takes in a string in fen notation and returns a board state. Only the placement section is
/// required; a missing side defaults to white and missing castling or en passant sections to none.
/// Move counters are accepted and ignored.
pub fn build_board(fen_string: &str) -> Result<Board, PositionError> {
    let mut board = Board::default();
    let mut iter = fen_string.split_whitespace();
    let placement = iter.next().ok_or(PositionError::Empty)?;

    let ranks = placement.split('/').collect_vec();
    if ranks.len() != 8 {
        return Err(PositionError::WrongRankCount(ranks.len()));
    }
    // Placement lists rank 8 first
    for (entry, row) in ranks.iter().zip((0..8u8).rev()) {
        let mut files: usize = 0;
        for c in entry.chars() {
            match c {
                '1'..='8' => files += c as usize - '0' as usize,
                _ => {
                    let piece = Piece::from_char(c).ok_or(PositionError::UnknownPiece(c))?;
                    if files < 8 {
                        board.add_piece(piece, Square::new(row, files as u8));
                    }
                    files += 1;
                }
            }
            if files > 8 {
                return Err(PositionError::WrongFileCount { rank: row + 1, files });
            }
        }
        if files != 8 {
            return Err(PositionError::WrongFileCount { rank: row + 1, files });
        }
    }

    for color in Color::iter() {
        if board.color_occupancies(color).count_bits() > MAX_PIECES_PER_SIDE {
            return Err(PositionError::TooManyPieces(color));
        }
    }

    board.to_move = match iter.next() {
        None | Some("w") => Color::White,
        Some("b") => Color::Black,
        Some(other) => return Err(PositionError::InvalidSideToMove(other.to_string())),
    };

    // Order of array is white king castle, white queen castle, black king castle, black queen castle
    if let Some(rights) = iter.next() {
        board.castling = parse_castling(rights);
    }

    if let Some(ep) = iter.next() {
        board.en_passant_square = find_en_passant_square(ep, board.to_move)?;
    }

    board.zobrist_hash = board.generate_hash();
    Ok(board)
}

fn parse_castling(buf: &str) -> [bool; 4] {
    let mut rights = [false; 4];
    for c in Castle::iter() {
        rights[c] = buf.contains(c.to_char());
    }
    rights
}

/// The square must lie behind a pawn the opponent just advanced two ranks
fn find_en_passant_square(buf: &str, side: Color) -> Result<Option<Square>, PositionError> {
    if buf == "-" {
        return Ok(None);
    }
    let rank = match side {
        Color::White => 5,
        Color::Black => 2,
    };
    match Square::from_algebraic(buf) {
        Some(sq) if sq.rank() == rank => Ok(Some(sq)),
        _ => Err(PositionError::InvalidEnPassant(buf.to_string())),
    }
}

impl Board {
    /// Serializes the placement, side to move, castling rights and en passant square
    pub fn to_fen(&self) -> String {
        let placement = (0..8u8)
            .rev()
            .map(|row| {
                let mut rank = String::new();
                let mut empty = 0;
                for col in 0..8 {
                    match self.piece_at(Square::new(row, col)) {
                        Some(piece) => {
                            if empty > 0 {
                                rank.push_str(&empty.to_string());
                                empty = 0;
                            }
                            rank.push(piece.to_char());
                        }
                        None => empty += 1,
                    }
                }
                if empty > 0 {
                    rank.push_str(&empty.to_string());
                }
                rank
            })
            .join("/");

        let side = match self.to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        let castling: String = Castle::iter().filter(|&c| self.can_castle(c)).map(Castle::to_char).collect();
        let castling = if castling.is_empty() { "-".to_string() } else { castling };

        let en_passant = self.en_passant_square.map_or("-".to_string(), |sq| sq.to_string());

        format!("{placement} {side} {castling} {en_passant}")
    }
}

#[cfg(test)]
mod fen_tests {
    use super::*;
    use crate::types::pieces::PieceName;

    #[test]
    fn test_en_passant_square() {
        assert_eq!(Ok(None), find_en_passant_square("-", Color::White));
        assert_eq!(Ok(Some(Square(20))), find_en_passant_square("e3", Color::Black));
        assert_eq!(Ok(Some(Square(45))), find_en_passant_square("f6", Color::White));
        assert!(find_en_passant_square("e4", Color::White).is_err());
        assert!(find_en_passant_square("z9", Color::Black).is_err());
    }

    #[test]
    fn test_en_passant_square_must_face_side_to_move() {
        assert_eq!(
            build_board("4k3/8/8/8/8/8/3Pp3/7K w - e3").unwrap_err(),
            PositionError::InvalidEnPassant("e3".to_string())
        );
        assert_eq!(
            build_board("4k3/8/8/3Pp3/8/8/8/7K b - e6").unwrap_err(),
            PositionError::InvalidEnPassant("e6".to_string())
        );
        let board = build_board("4k3/8/8/8/3Pp3/8/8/7K b - d3").unwrap();
        assert_eq!(board.en_passant_square(), Square::from_algebraic("d3"));
    }

    #[test]
    fn test_digit_runs_are_bounded() {
        let long_run = format!("{}4K7/8/8/8/8/8/8/8 w", "9".repeat(28));
        assert_eq!(build_board(&long_run).unwrap_err(), PositionError::UnknownPiece('9'));
        assert_eq!(
            build_board("8/8/8/8/0K7/8/8/8 w").unwrap_err(),
            PositionError::UnknownPiece('0')
        );
        assert_eq!(
            build_board("44444444/8/8/8/8/8/8/8 w").unwrap_err(),
            PositionError::WrongFileCount { rank: 8, files: 12 }
        );
        assert_eq!(
            build_board("8/8/8/8/81/8/8/8 w").unwrap_err(),
            PositionError::WrongFileCount { rank: 4, files: 9 }
        );
        assert_eq!(
            build_board("8/8/8/8/8/8/8/K8 w").unwrap_err(),
            PositionError::WrongFileCount { rank: 1, files: 9 }
        );
    }

    #[test]
    fn test_piece_count_is_bounded() {
        assert_eq!(
            build_board("QQQQQQQQ/QQQQQQQQ/K7/8/8/8/8/7k w - -").unwrap_err(),
            PositionError::TooManyPieces(Color::White)
        );
        let board = build_board("QQQQQQQQ/QQQQQQQK/8/8/8/8/8/7k w - -").unwrap();
        assert_eq!(board.live_piece_count(), 17);
    }

    #[test]
    fn test_parse_castling() {
        assert_eq!(parse_castling("K"), [true, false, false, false]);
        assert_eq!(parse_castling("q"), [false, false, false, true]);
        assert_eq!(parse_castling("KQkq"), [true; 4]);
        assert_eq!(parse_castling("Kk"), [true, false, true, false]);
        assert_eq!(parse_castling("-"), [false; 4]);
    }

    #[test]
    fn test_starting_position() {
        let board = build_board(STARTING_FEN).unwrap();
        assert_eq!(board.to_move(), Color::White);
        assert_eq!(board.castling_rights(), [true; 4]);
        assert_eq!(board.en_passant_square(), None);
        assert_eq!(board.piece_at(Square(3)), Some(Piece::new(PieceName::Queen, Color::White)));
        assert_eq!(board.piece_at(Square(60)), Some(Piece::new(PieceName::King, Color::Black)));
        assert_eq!(board.to_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -");
    }

    #[test]
    fn test_optional_sections_default_to_none() {
        let board = build_board("8/8/8/3Pp3/8/8/8/8").unwrap();
        assert_eq!(board.to_move(), Color::White);
        assert_eq!(board.castling_rights(), [false; 4]);
        assert_eq!(board.en_passant_square(), None);
        assert_eq!(board.live_piece_count(), 2);
        assert_eq!(board.to_fen(), "8/8/8/3Pp3/8/8/8/8 w - -");
    }

    #[test]
    fn test_serialization_reproduces_position() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - -",
        ] {
            let board = build_board(fen).unwrap();
            assert_eq!(board.to_fen(), fen);
            assert_eq!(build_board(&board.to_fen()).unwrap().zobrist_hash(), board.zobrist_hash());
        }
    }

    #[test]
    fn test_malformed_placement() {
        assert_eq!(build_board("").unwrap_err(), PositionError::Empty);
        assert_eq!(
            build_board("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w").unwrap_err(),
            PositionError::WrongRankCount(7)
        );
        assert_eq!(
            build_board("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w").unwrap_err(),
            PositionError::WrongFileCount { rank: 7, files: 7 }
        );
        assert_eq!(
            build_board("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w").unwrap_err(),
            PositionError::WrongFileCount { rank: 7, files: 9 }
        );
        assert_eq!(
            build_board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w").unwrap_err(),
            PositionError::UnknownPiece('X')
        );
        assert_eq!(
            build_board("8/8/8/8/8/8/8/8 x").unwrap_err(),
            PositionError::InvalidSideToMove("x".to_string())
        );
    }
}
