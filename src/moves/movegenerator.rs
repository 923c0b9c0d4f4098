use crate::{
    board::board::Board,
    moves::moves::Direction::*,
    types::{
        bitboard::Bitboard,
        pieces::PieceName::*,
        pieces::{Color, Piece, PieceName},
        square::Square,
    },
};

use super::{
    attack_boards::{king_attacks, knight_attacks, pawn_attacks, ray_attacks},
    movelist::MoveList,
    moves::{Castle, Direction, Move, MoveType, Promotion, ALL_DIRECTIONS, DIAGONALS, ORTHOGONALS},
};

const PROMOTIONS: [Promotion; 4] = [Promotion::Queen, Promotion::Rook, Promotion::Bishop, Promotion::Knight];

/// Generates all moves with no respect to legality via leaving itself in check.
/// Order is pawn, knight, bishop, rook, queen, king, then castling.
pub fn generate_psuedolegal_moves(board: &Board, side: Color) -> MoveList {
    let mut moves = MoveList::default();
    generate_pawn_moves(board, side, &mut moves);
    generate_bitboard_moves(board, side, Knight, &mut moves);
    generate_bitboard_moves(board, side, Bishop, &mut moves);
    generate_bitboard_moves(board, side, Rook, &mut moves);
    generate_bitboard_moves(board, side, Queen, &mut moves);
    generate_bitboard_moves(board, side, King, &mut moves);
    generate_castling_moves(board, side, &mut moves);
    moves
}

/// Filters out the moves that leave the mover's own king attacked. The board is restored to its
/// original state before returning.
pub fn generate_legal_moves(board: &mut Board, side: Color) -> MoveList {
    let mut moves = generate_psuedolegal_moves(board, side);
    moves.retain(|m| {
        board.make_move(m);
        let legal = !board.in_check(side);
        board.unmake_move(m);
        legal
    });
    moves
}

fn generate_castling_moves(board: &Board, side: Color, moves: &mut MoveList) {
    let king = Piece::new(King, side);
    for c in Castle::for_color(side) {
        if !board.can_castle(c)
            || board.occupancies() & c.vacancies() != Bitboard::EMPTY
            || board.bitboard(side, King).square_is_empty(c.king_origin())
            || board.bitboard(side, Rook).square_is_empty(c.rook_origin())
        {
            continue;
        }
        if c.king_path().iter().any(|&sq| board.square_under_attack(!side, sq)) {
            continue;
        }
        moves.push(Move::new(c.king_origin(), c.king_dest(), king, None, None, MoveType::Castle));
    }
}

fn generate_pawn_moves(board: &Board, side: Color, moves: &mut MoveList) {
    let pawn = Piece::new(Pawn, side);
    let (up, start_rank, last_rank) = match side {
        Color::White => (North, 1, 7),
        Color::Black => (South, 6, 0),
    };
    let vacancies = !board.occupancies();
    let enemies = board.color_occupancies(!side);

    for sq in board.bitboard(side, Pawn) {
        if let Some(push) = sq.checked_shift(up).filter(|&s| vacancies.square_occupied(s)) {
            push_pawn_move(moves, sq, push, pawn, None, push.rank() == last_rank);
            if sq.rank() == start_rank {
                if let Some(double) = push.checked_shift(up).filter(|&s| vacancies.square_occupied(s)) {
                    moves.push(Move::new(sq, double, pawn, None, None, MoveType::Normal));
                }
            }
        }

        // Both attacked squares share a rank, so ascending order is lower file first
        for dest in pawn_attacks(sq, side) {
            if enemies.square_occupied(dest) {
                push_pawn_move(moves, sq, dest, pawn, board.piece_at(dest), dest.rank() == last_rank);
            } else if board.en_passant_square() == Some(dest) && en_passant_target(board, side, dest, up) {
                let captured = Piece::new(Pawn, !side);
                moves.push(Move::new(sq, dest, pawn, Some(captured), None, MoveType::EnPassant));
            }
        }
    }
}

/// An en passant square is only usable if it is empty and an enemy pawn stands behind it
fn en_passant_target(board: &Board, side: Color, dest: Square, up: Direction) -> bool {
    board.occupancies().square_is_empty(dest)
        && dest
            .checked_shift(up.opp())
            .is_some_and(|behind| board.bitboard(!side, Pawn).square_occupied(behind))
}

fn push_pawn_move(
    moves: &mut MoveList,
    origin: Square,
    dest: Square,
    pawn: Piece,
    captured: Option<Piece>,
    promotes: bool,
) {
    if promotes {
        for p in PROMOTIONS {
            moves.push(Move::new(origin, dest, pawn, captured, Some(p), MoveType::Promotion));
        }
    } else {
        moves.push(Move::new(origin, dest, pawn, captured, None, MoveType::Normal));
    }
}

fn generate_bitboard_moves(board: &Board, side: Color, piece_name: PieceName, moves: &mut MoveList) {
    let piece = Piece::new(piece_name, side);
    let occupancies = board.occupancies();
    let allies = board.color_occupancies(side);
    let enemies = board.color_occupancies(!side);

    for sq in board.bitboard(side, piece_name) {
        let attacks = match piece_name {
            Knight => knight_attacks(sq),
            King => king_attacks(sq),
            Bishop => ray_attacks(sq, occupancies, &DIAGONALS),
            Rook => ray_attacks(sq, occupancies, &ORTHOGONALS),
            Queen => ray_attacks(sq, occupancies, &ALL_DIRECTIONS),
            Pawn => unreachable!("pawns have their own generator"),
        };
        for dest in attacks & !allies {
            let captured = if enemies.square_occupied(dest) { board.piece_at(dest) } else { None };
            moves.push(Move::new(sq, dest, piece, captured, None, MoveType::Normal));
        }
    }
}
