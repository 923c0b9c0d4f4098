use crate::const_array;

use crate::types::bitboard::Bitboard;
use crate::types::pieces::Color;
use crate::types::square::Square;

use super::moves::Direction;

const FILE_A_U64: u64 = 0x101010101010101;
const FILE_H_U64: u64 = 0x101010101010101 << 7;

/// Vertical
pub const FILES: [Bitboard; 8] = const_array!(|f, 8| Bitboard(FILE_A_U64 << f));

pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq]
}

pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq]
}

/// Squares a pawn of color `attacker` standing on `sq` attacks
pub fn pawn_attacks(sq: Square, attacker: Color) -> Bitboard {
    PAWN_ATTACKS[attacker][sq]
}

pub const fn pawn_set_attacks(pawns: Bitboard, side: Color) -> Bitboard {
    let pawns = pawns.0;
    if side.idx() == Color::White.idx() {
        Bitboard((pawns & !FILE_A_U64) << 7 | (pawns & !FILE_H_U64) << 9)
    } else {
        Bitboard((pawns & !FILE_A_U64) >> 9 | (pawns & !FILE_H_U64) >> 7)
    }
}

/// Walks each ray from `sq` until it leaves the board or reaches an occupied square. The first
/// occupied square on a ray is included, whoever owns it.
pub fn ray_attacks(sq: Square, occupancies: Bitboard, dirs: &[Direction]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &dir in dirs {
        let mut curr = sq;
        while let Some(next) = curr.checked_shift(dir) {
            attacks |= next.bitboard();
            if occupancies.square_occupied(next) {
                break;
            }
            curr = next;
        }
    }
    attacks
}

pub const KING_ATTACKS: [Bitboard; 64] = const_array!(|sq, 64| {
    let sq = 1 << sq;
    // Create a bitboard out of the square
    let mut bb = sq;
    // Put in the bits above and below - These won't have any effect if they are outside of the range
    // of the board
    bb |= sq << 8 | sq >> 8;
    // Then literally shake your column of bits back and forth to get diagonals and horizontal moves
    bb |= (bb & !FILE_A_U64) >> 1 | (bb & !FILE_H_U64) << 1;
    // Remove the square the piece is currently on from possible attacks
    Bitboard(bb ^ sq)
});

pub const KNIGHT_ATTACKS: [Bitboard; 64] = const_array!(|sq, 64| {
    let sq = 1 << sq;
    let mut bb = sq;
    // Get squares two rows above and below current occupied square
    let vert = sq << 16 | sq >> 16;
    // Shake those bits back and forth as long as it wouldn't end up in another row
    bb |= (vert & !FILE_A_U64) >> 1 | (vert & !FILE_H_U64) << 1;
    // Get squares two columns to the left and right of current occupied square. Constants ensure you
    // won't go to a different row
    let horizontal = (sq & 0x3f3f3f3f3f3f3f3f) << 2 | (sq & 0xfcfcfcfcfcfcfcfc) >> 2;
    // Shake those bits back and forth - can't go out of bounds vertically
    bb |= horizontal << 8 | horizontal >> 8;
    // Remove current occupied square from final attack board
    Bitboard(bb ^ sq)
});

pub const PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    const_array!(|sq, 64| pawn_set_attacks(Bitboard(1 << sq), Color::White)),
    const_array!(|sq, 64| pawn_set_attacks(Bitboard(1 << sq), Color::Black)),
];

#[macro_export]
/// Credit for this macro goes to akimbo
macro_rules! const_array {
    (| $i:ident, $size:literal | $($r:tt)+) => {{
        let mut $i = 0;
        let mut res = [{$($r)+}; $size];
        while $i < $size - 1 {
            $i += 1;
            res[$i] = {$($r)+};
        }
        res
    }}
}
