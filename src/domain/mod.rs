//! Pure match-domain types.
//! No engine or I/O dependencies - this is the domain layer.

mod cursor;
mod history;

pub use cursor::SquareCursor;
pub use history::{HISTORY_LEN, HistoryEntry, HistoryLog};

use std::fmt;

use serde::{Deserialize, Serialize};

/// A board square, indexed 0..64 row-major from white's side:
/// a1 = 0, h1 = 7, a8 = 56, h8 = 63.
///
/// "No square" is `Option::<Square>::None`; there is no sentinel index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Square(u8);

impl Square {
    pub const COUNT: u8 = 64;

    /// Checked constructor; indices outside 0..64 are rejected.
    pub const fn new(index: u8) -> Option<Self> {
        if index < Self::COUNT { Some(Self(index)) } else { None }
    }

    /// Wrapping constructor used for modulo-64 cursor arithmetic.
    pub(crate) const fn from_index(index: u8) -> Self {
        Self(index % Self::COUNT)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// File 0..8, a = 0.
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Rank 0..8, rank 1 = 0.
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

/// A set of board squares backed by a u64 bitboard.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: Self = Self(0);

    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.index();
    }

    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1u64 << square.index());
    }

    pub fn contains(self, square: Square) -> bool {
        self.0 & (1u64 << square.index()) != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate contained squares in ascending index order.
    pub fn iter(self) -> impl Iterator<Item = Square> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Some(Square::from_index(index))
        })
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}

/// One side of the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Lowercase display name used in history messages.
    pub fn name(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

/// Piece a pawn promotes to. Queen unless the caller says otherwise.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Promotion {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A piece on the board, as reported by the engine for rendering.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

/// Terminal or non-terminal game state reported by the engine after a move.
///
/// Matched exhaustively wherever it drives display text.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    Playing,
    WhiteWin,
    BlackWin,
    DrawStalemate,
    DrawRepetition,
    /// Insufficient material.
    DrawDead,
    /// 50-move rule.
    Draw50,
    /// Draw for any other reason.
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_bounds() {
        assert_eq!(Square::new(0).map(Square::index), Some(0));
        assert_eq!(Square::new(63).map(Square::index), Some(63));
        assert!(Square::new(64).is_none());
    }

    #[test]
    fn square_coords_and_display() {
        let e4 = Square::new(28).unwrap();
        assert_eq!(e4.file(), 4);
        assert_eq!(e4.rank(), 3);
        assert_eq!(e4.to_string(), "e4");
        assert_eq!(Square::new(0).unwrap().to_string(), "a1");
        assert_eq!(Square::new(63).unwrap().to_string(), "h8");
    }

    #[test]
    fn square_set_basics() {
        let mut set = SquareSet::EMPTY;
        assert!(set.is_empty());

        let a1 = Square::new(0).unwrap();
        let h8 = Square::new(63).unwrap();
        set.insert(a1);
        set.insert(h8);
        assert_eq!(set.len(), 2);
        assert!(set.contains(a1));
        assert!(set.contains(h8));
        assert!(!set.contains(Square::new(28).unwrap()));

        let squares: Vec<_> = set.iter().collect();
        assert_eq!(squares, vec![a1, h8]);

        set.remove(a1);
        assert!(!set.contains(a1));
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn side_opponent() {
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::White.name(), "white");
    }

    #[test]
    fn promotion_defaults_to_queen() {
        assert_eq!(Promotion::default(), Promotion::Queen);
    }

    #[test]
    fn status_over() {
        assert!(!GameStatus::Playing.is_over());
        assert!(GameStatus::WhiteWin.is_over());
        assert!(GameStatus::Draw50.is_over());
    }
}
