use std::fmt::{self, Debug};
use std::iter::FusedIterator;

use crate::bitset::bitset_traits;

/// Side length of the square playing grid.
pub const BOARD_SIZE: i8 = 10;

/// Number of cells on the playing grid.
pub const NUM_CELLS: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

const BOARD_MASK: u128 = (1u128 << NUM_CELLS) - 1;

/// A [`Copy`] set of cells on the 10x10 grid that stores a single bit per cell.
///
/// Cell `(x, y)` lives at bit `x * 10 + y`. It can be converted back into a
/// list of coordinate pairs by means of its [`IntoIterator`] instance, which
/// yields cells in ascending bit order.
///
/// Note that its "mutating" methods return a new object instead of really mutating.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitBoard {
    /// Only the low 100 bits are used.
    bits: u128,
}

bitset_traits!(BitBoard, BOARD_MASK);

/// Whether `(x, y)` lies on the playing grid.
pub fn in_bounds(x: i8, y: i8) -> bool {
    (0..BOARD_SIZE).contains(&x) && (0..BOARD_SIZE).contains(&y)
}

/// The in-bounds cells around `(x, y)`, diagonals included.
pub fn neighbors(x: i8, y: i8) -> impl Iterator<Item = (i8, i8)> {
    (-1..=1)
        .flat_map(move |dx| (-1..=1).map(move |dy| (x + dx, y + dy)))
        .filter(move |&(nx, ny)| (nx, ny) != (x, y) && in_bounds(nx, ny))
}

impl BitBoard {
    pub fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Every cell of the grid.
    pub fn full() -> Self {
        Self { bits: BOARD_MASK }
    }

    /// Set the bit at the specified location to `true`.
    ///
    /// Coordinates outside of the grid cause a panic in debug mode.
    #[must_use]
    pub fn insert(self, x: i8, y: i8) -> Self {
        Self {
            bits: self.bits | (1u128 << arr_idx(x, y)),
        }
    }

    #[must_use]
    pub fn remove(self, x: i8, y: i8) -> Self {
        Self {
            bits: self.bits & !(1u128 << arr_idx(x, y)),
        }
    }

    /// Out-of-bounds coordinates are never contained.
    pub fn contains(self, x: i8, y: i8) -> bool {
        in_bounds(x, y) && self.bits & (1u128 << arr_idx(x, y)) != 0
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn num_entries(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_subset(self, other: BitBoard) -> bool {
        self.bits & !other.bits == 0
    }

    pub fn intersects(self, other: BitBoard) -> bool {
        self.bits & other.bits != 0
    }

    /// The cell with the lowest bit index, if any.
    pub fn first(self) -> Option<(i8, i8)> {
        if self.is_empty() {
            None
        } else {
            Some(coords(self.bits.trailing_zeros()))
        }
    }
}

fn arr_idx(x: i8, y: i8) -> u32 {
    debug_assert!(in_bounds(x, y), "({x}, {y}) is not on the board");
    x as u32 * BOARD_SIZE as u32 + y as u32
}

fn coords(idx: u32) -> (i8, i8) {
    // idx < 100, so both parts fit in an i8
    ((idx / BOARD_SIZE as u32) as i8, (idx % BOARD_SIZE as u32) as i8)
}

impl Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // One text row per y, so that the picture lines up with the visualization
        let mut s = String::with_capacity(NUM_CELLS * 2);
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                s.push(if self.contains(x, y) { '1' } else { '0' });
                s.push(if x == BOARD_SIZE - 1 { '\n' } else { ' ' });
            }
        }
        write!(f, "{}", s)
    }
}

impl FromIterator<(i8, i8)> for BitBoard {
    fn from_iter<T: IntoIterator<Item = (i8, i8)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(BitBoard::empty(), |board, (x, y)| board.insert(x, y))
    }
}

/// Iterator produced by [`BitBoard::into_iter()`].
#[derive(Clone, Copy, Debug)]
pub struct BitBoardIter {
    bits: u128,
}

impl IntoIterator for BitBoard {
    type Item = (i8, i8);

    type IntoIter = BitBoardIter;

    fn into_iter(self) -> Self::IntoIter {
        BitBoardIter { bits: self.bits }
    }
}

impl Iterator for BitBoardIter {
    type Item = (i8, i8);

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let idx = self.bits.trailing_zeros();
            // Clear the flag corresponding to this coordinate
            self.bits ^= 1u128 << idx;
            Some(coords(idx))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BitBoardIter {}

impl FusedIterator for BitBoardIter {}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    quickcheck! {
        fn insert_then_contains(x: u8, y: u8) -> bool {
            let (x, y) = ((x % 10) as i8, (y % 10) as i8);
            let board = BitBoard::empty().insert(x, y);
            board.contains(x, y) && board.num_entries() == 1 && board.first() == Some((x, y))
        }

        fn complement_stays_on_board(cells: Vec<(u8, u8)>) -> bool {
            let board: BitBoard = cells
                .into_iter()
                .map(|(x, y)| ((x % 10) as i8, (y % 10) as i8))
                .collect();
            (!board).num_entries() + board.num_entries() == NUM_CELLS as u32
                && (!board & board).is_empty()
        }
    }

    #[test]
    fn out_of_bounds_is_never_contained() {
        let board = BitBoard::full();
        assert!(!board.contains(-1, 0));
        assert!(!board.contains(0, 10));
        assert!(board.contains(9, 9));
    }

    #[test]
    fn corner_has_three_neighbors() {
        assert_eq!(neighbors(0, 0).count(), 3);
        assert_eq!(neighbors(0, 5).count(), 5);
        assert_eq!(neighbors(4, 4).count(), 8);
    }

    #[test]
    fn iterates_in_bit_order() {
        let board = BitBoard::empty().insert(3, 1).insert(0, 9).insert(3, 0);
        assert_eq!(Vec::from_iter(board), vec![(0, 9), (3, 0), (3, 1)]);
        assert!(BitBoard::empty().insert(3, 1).is_subset(board));
        assert!(!board.is_subset(BitBoard::empty().insert(3, 1)));
    }
}
