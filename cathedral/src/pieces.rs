//! The fifteen piece shapes and the transforms applied to them.
//!
//! Shapes are stored as offsets from a reference cell. Player B plays the
//! mirror images of the Abbey and the Academy, and has no cathedral.

use std::iter::FusedIterator;

use crate::bitset::bitset_traits;
use crate::{in_bounds, Agent, BitBoard, Rotation};

/// Index of a piece template within an agent's catalog.
pub type PieceId = usize;

pub const TAVERN_1: PieceId = 0;
pub const TAVERN_2: PieceId = 1;
pub const STABLE_1: PieceId = 2;
pub const STABLE_2: PieceId = 3;
pub const INN_1: PieceId = 4;
pub const INN_2: PieceId = 5;
pub const BRIDGE: PieceId = 6;
pub const SQUARE: PieceId = 7;
pub const MANOR: PieceId = 8;
pub const ABBEY: PieceId = 9;
pub const ACADEMY: PieceId = 10;
pub const INFIRMARY: PieceId = 11;
pub const CASTLE: PieceId = 12;
pub const TOWER: PieceId = 13;
pub const CATHEDRAL: PieceId = 14;

/// How many of the four quarter turns produce a new shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symmetry {
    /// Every quarter turn yields a new shape.
    Asymmetric,
    /// Half a turn gives back the original shape.
    HalfTurn,
    /// Rotating never changes the shape.
    Invariant,
}

/// An immutable piece shape.
#[derive(Debug)]
pub struct PieceTemplate {
    pub label: &'static str,
    offsets: &'static [(i8, i8)],
    pub symmetry: Symmetry,
    /// Reflect the offsets along the x axis before rotating.
    mirrored: bool,
}

//    [x]
static SINGLE: [(i8, i8); 1] = [(0, 0)];
//    [ ]
//    [x]
static DOUBLE: [(i8, i8); 2] = [(0, 0), (0, 1)];
//    [ ]
//    [x][ ]
static CORNER: [(i8, i8); 3] = [(0, 0), (0, 1), (1, 0)];
//    [ ]
//    [x]
//    [ ]
static LINE: [(i8, i8); 3] = [(0, 0), (0, 1), (0, -1)];
//    [ ][ ]
//    [x][ ]
static SQUARE_SHAPE: [(i8, i8); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];
//       [ ]
//    [ ][x][ ]
static T_SHAPE: [(i8, i8); 4] = [(0, 0), (-1, 0), (1, 0), (0, 1)];
//       [ ][ ]
//    [ ][x]
static Z_SHAPE: [(i8, i8); 4] = [(0, 0), (-1, 0), (0, 1), (1, 1)];
//          [ ]
//    [ ][x][ ]
//       [ ]
static F_SHAPE: [(i8, i8); 5] = [(0, 0), (-1, 0), (1, 0), (0, -1), (1, 1)];
//       [ ]
//    [ ][x][ ]
//       [ ]
static PLUS: [(i8, i8); 5] = [(0, 0), (-1, 0), (1, 0), (0, 1), (0, -1)];
//    [ ]   [ ]
//    [ ][x][ ]
static U_SHAPE: [(i8, i8); 5] = [(0, 0), (-1, 0), (1, 0), (-1, 1), (1, 1)];
//    [ ][ ]
//       [x][ ]
//          [ ]
static W_SHAPE: [(i8, i8); 5] = [(0, 0), (1, 0), (1, -1), (0, 1), (-1, 1)];
//       [ ]
//    [ ][ ][ ]
//       [x]
//       [ ]
static TALL_CROSS: [(i8, i8); 6] = [(0, 0), (0, -1), (0, 1), (-1, 1), (1, 1), (0, 2)];

const fn template(
    label: &'static str,
    offsets: &'static [(i8, i8)],
    symmetry: Symmetry,
) -> PieceTemplate {
    PieceTemplate {
        label,
        offsets,
        symmetry,
        mirrored: false,
    }
}

const fn mirrored(
    label: &'static str,
    offsets: &'static [(i8, i8)],
    symmetry: Symmetry,
) -> PieceTemplate {
    PieceTemplate {
        label,
        offsets,
        symmetry,
        mirrored: true,
    }
}

/// The pieces of player A, indexed by [`PieceId`]. The last one is the cathedral.
pub static PLAYER_A_PIECES: [PieceTemplate; 15] = [
    template("Tavern1", &SINGLE, Symmetry::Invariant),
    template("Tavern2", &SINGLE, Symmetry::Invariant),
    template("Stable1", &DOUBLE, Symmetry::HalfTurn),
    template("Stable2", &DOUBLE, Symmetry::HalfTurn),
    template("Inn1", &CORNER, Symmetry::Asymmetric),
    template("Inn2", &CORNER, Symmetry::Asymmetric),
    template("Bridge", &LINE, Symmetry::HalfTurn),
    template("Square", &SQUARE_SHAPE, Symmetry::Invariant),
    template("Manor", &T_SHAPE, Symmetry::Asymmetric),
    template("Abbey", &Z_SHAPE, Symmetry::Asymmetric),
    template("Academy", &F_SHAPE, Symmetry::Asymmetric),
    template("Infirmary", &PLUS, Symmetry::Invariant),
    template("Castle", &U_SHAPE, Symmetry::Asymmetric),
    template("Tower", &W_SHAPE, Symmetry::Asymmetric),
    template("Cathedral", &TALL_CROSS, Symmetry::Asymmetric),
];

/// The pieces of player B, indexed by [`PieceId`].
pub static PLAYER_B_PIECES: [PieceTemplate; 14] = [
    template("Tavern1", &SINGLE, Symmetry::Invariant),
    template("Tavern2", &SINGLE, Symmetry::Invariant),
    template("Stable1", &DOUBLE, Symmetry::HalfTurn),
    template("Stable2", &DOUBLE, Symmetry::HalfTurn),
    template("Inn1", &CORNER, Symmetry::Asymmetric),
    template("Inn2", &CORNER, Symmetry::Asymmetric),
    template("Bridge", &LINE, Symmetry::HalfTurn),
    template("Square", &SQUARE_SHAPE, Symmetry::Invariant),
    template("Manor", &T_SHAPE, Symmetry::Asymmetric),
    mirrored("AbbeyFlipped", &Z_SHAPE, Symmetry::Asymmetric),
    mirrored("AcademyFlipped", &F_SHAPE, Symmetry::Asymmetric),
    template("Infirmary", &PLUS, Symmetry::Invariant),
    template("Castle", &U_SHAPE, Symmetry::Asymmetric),
    template("Tower", &W_SHAPE, Symmetry::Asymmetric),
];

/// All piece templates of an agent.
pub fn catalog(agent: Agent) -> &'static [PieceTemplate] {
    match agent {
        Agent::PlayerA => &PLAYER_A_PIECES,
        Agent::PlayerB => &PLAYER_B_PIECES,
    }
}

impl PieceTemplate {
    pub fn size(&self) -> u32 {
        self.offsets.len() as u32
    }

    /// The offsets after applying the reflection (if any) and `rotation`.
    ///
    /// Symmetric pieces skip the quarter turns that would not change their shape.
    pub fn offsets(&self, rotation: Rotation) -> impl Iterator<Item = (i8, i8)> + '_ {
        let quarter_turns = match self.symmetry {
            Symmetry::Asymmetric => rotation.quarter_turns(),
            Symmetry::HalfTurn => rotation.quarter_turns() % 2,
            Symmetry::Invariant => 0,
        };
        let mirrored = self.mirrored;
        self.offsets.iter().map(move |&(dx, dy)| {
            let dx = if mirrored { -dx } else { dx };
            (0..quarter_turns).fold((dx, dy), |(dx, dy), _| (dy, -dx))
        })
    }

    /// The absolute cells covered when the reference cell is at `(x, y)`.
    ///
    /// Returns `None` if any cell would be off the board.
    pub fn cells_at(&self, (x, y): (i8, i8), rotation: Rotation) -> Option<BitBoard> {
        let mut cells = BitBoard::empty();
        for (dx, dy) in self.offsets(rotation) {
            let (cx, cy) = (x + dx, y + dy);
            if !in_bounds(cx, cy) {
                return None;
            }
            cells = cells.insert(cx, cy);
        }
        Some(cells)
    }
}

/// A compact set of [`PieceId`]s of one agent.
///
/// This is an immutable type, so its "mutating" methods return a new value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceSet {
    // Only the low 15 bits are used.
    bits: u16,
}

bitset_traits!(PieceSet, 0x7fff);

impl PieceSet {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn contains(self, piece: PieceId) -> bool {
        piece < 15 && self.bits & (1 << piece) != 0
    }

    #[must_use]
    pub fn insert(self, piece: PieceId) -> Self {
        debug_assert!(piece < 15);
        Self {
            bits: self.bits | (1 << piece),
        }
    }

    #[must_use]
    pub fn remove(self, piece: PieceId) -> Self {
        Self {
            bits: self.bits & !(1 << piece),
        }
    }
}

impl FromIterator<PieceId> for PieceSet {
    fn from_iter<T: IntoIterator<Item = PieceId>>(iter: T) -> Self {
        iter.into_iter().fold(PieceSet::new(), PieceSet::insert)
    }
}

impl IntoIterator for PieceSet {
    type Item = PieceId;

    type IntoIter = PieceSetIter;

    fn into_iter(self) -> Self::IntoIter {
        PieceSetIter { bits: self.bits }
    }
}

/// Iterator for a [`PieceSet`] that returns pieces by ascending id.
#[derive(Clone, Copy, Debug)]
pub struct PieceSetIter {
    bits: u16,
}

impl Iterator for PieceSetIter {
    type Item = PieceId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let piece = self.bits.trailing_zeros() as PieceId;
            self.bits ^= 1 << piece;
            Some(piece)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for PieceSetIter {}

impl FusedIterator for PieceSetIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs() {
        assert_eq!(catalog(Agent::PlayerA).len(), 15);
        assert_eq!(catalog(Agent::PlayerB).len(), 14);
        assert_eq!(PLAYER_A_PIECES[CATHEDRAL].label, "Cathedral");
        assert_eq!(PLAYER_A_PIECES[CATHEDRAL].size(), 6);
        let total = |agent| catalog(agent).iter().map(PieceTemplate::size).sum::<u32>();
        assert_eq!(total(Agent::PlayerA), total(Agent::PlayerB) + 6);
    }

    #[test]
    fn quarter_turn_is_clockwise() {
        let stable = &PLAYER_A_PIECES[STABLE_1];
        assert_eq!(stable.cells_at((4, 4), Rotation::R0), Some(BitBoard::from_iter([(4, 4), (4, 5)])));
        assert_eq!(stable.cells_at((4, 4), Rotation::R90), Some(BitBoard::from_iter([(4, 4), (5, 4)])));
        // A half turn is skipped for half-turn symmetric pieces
        assert_eq!(stable.cells_at((4, 4), Rotation::R180), stable.cells_at((4, 4), Rotation::R0));
        assert_eq!(stable.cells_at((4, 9), Rotation::R0), None);
    }

    #[test]
    fn invariant_pieces_ignore_rotation() {
        let infirmary = &PLAYER_A_PIECES[INFIRMARY];
        for rotation in Rotation::ALL {
            assert_eq!(
                infirmary.cells_at((5, 5), rotation),
                infirmary.cells_at((5, 5), Rotation::R0)
            );
        }
    }

    #[test]
    fn flipped_pieces_are_reflections() {
        let abbey = PLAYER_A_PIECES[ABBEY].cells_at((5, 5), Rotation::R0).unwrap();
        let flipped = PLAYER_B_PIECES[ABBEY].cells_at((5, 5), Rotation::R0).unwrap();
        assert_ne!(abbey, flipped);
        let reflected: BitBoard = abbey.into_iter().map(|(x, y)| (10 - x, y)).collect();
        assert_eq!(reflected, flipped);
        for rotation in Rotation::ALL {
            assert_ne!(
                PLAYER_B_PIECES[ACADEMY].cells_at((5, 5), rotation),
                PLAYER_A_PIECES[ACADEMY].cells_at((5, 5), Rotation::R0)
            );
        }
    }

    #[test]
    fn piece_set() {
        let set = PieceSet::from_iter([CATHEDRAL, TAVERN_1, MANOR]);
        assert_eq!(Vec::from_iter(set), vec![TAVERN_1, MANOR, CATHEDRAL]);
        assert!(!set.remove(MANOR).contains(MANOR));
        assert_eq!((!set).len(), 12);
    }
}
