use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use std::fmt;

use crate::point::Point;

/// White moves up the board (+y), Black down (-y). The sign drives every
/// direction-sensitive piece of geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    None,
    White,
    Black,
}

impl Side {
    /// +1 for White, -1 for Black, 0 otherwise.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Side::White => 1,
            Side::Black => -1,
            Side::None => 0,
        }
    }

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
            Side::None => Side::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    None,
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Identity of a piece for the lifetime of a board. `PieceId::NONE` is
/// reserved for the sentinel none-piece and never assigned to a real piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PieceId(u32);

impl PieceId {
    pub const NONE: PieceId = PieceId(0);

    #[inline]
    pub(crate) fn new(raw: u32) -> Self {
        PieceId(raw)
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == PieceId::NONE
    }
}

pub type OffsetSet = SmallVec<[Point; 8]>;

/// Movement geometry of a piece in a given state: the relative steps it may
/// take, and whether those steps extend into sliding rays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementProfile {
    pub offsets: OffsetSet,
    pub sliding: bool,
}

const ORTHOGONAL: [Point; 4] = [
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(0, -1),
];

const DIAGONAL: [Point; 4] = [
    Point::new(1, 1),
    Point::new(-1, 1),
    Point::new(-1, -1),
    Point::new(1, -1),
];

const KNIGHT_JUMPS: [Point; 8] = [
    Point::new(1, 2),
    Point::new(2, 1),
    Point::new(-1, 2),
    Point::new(2, -1),
    Point::new(-1, -2),
    Point::new(-2, -1),
    Point::new(1, -2),
    Point::new(-2, 1),
];

/// Movement geometry for a piece in the given state.
///
/// Only the pawn's profile depends on `side` and `has_moved`: its forward
/// and capture steps point in the side's direction and the double-step is
/// granted only before the first move. The capture diagonals are included
/// unconditionally; whether a diagonal step actually captures is the
/// validator's concern, not the profile's.
pub fn compute_offsets(kind: PieceKind, side: Side, has_moved: bool) -> MovementProfile {
    match kind {
        PieceKind::None => MovementProfile {
            offsets: SmallVec::new(),
            sliding: false,
        },
        PieceKind::Pawn => {
            let dir = side.sign();
            let mut offsets: OffsetSet = smallvec![
                Point::new(0, dir),
                Point::new(-1, dir),
                Point::new(1, dir),
            ];
            if !has_moved {
                offsets.push(Point::new(0, 2 * dir));
            }
            MovementProfile {
                offsets,
                sliding: false,
            }
        }
        PieceKind::Knight => MovementProfile {
            offsets: SmallVec::from_slice(&KNIGHT_JUMPS),
            sliding: false,
        },
        PieceKind::Bishop => MovementProfile {
            offsets: SmallVec::from_slice(&DIAGONAL),
            sliding: true,
        },
        PieceKind::Rook => MovementProfile {
            offsets: SmallVec::from_slice(&ORTHOGONAL),
            sliding: true,
        },
        PieceKind::Queen => MovementProfile {
            offsets: ORTHOGONAL.iter().chain(DIAGONAL.iter()).copied().collect(),
            sliding: true,
        },
        PieceKind::King => MovementProfile {
            offsets: ORTHOGONAL.iter().chain(DIAGONAL.iter()).copied().collect(),
            sliding: false,
        },
    }
}

/// A piece on the board. Position, has-moved flag and movement profile
/// change together in one step whenever the piece is relocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub side: Side,
    pub position: Point,
    pub has_moved: bool,
    pub profile: MovementProfile,
}

impl Piece {
    pub(crate) fn new(id: PieceId, kind: PieceKind, side: Side, position: Point) -> Self {
        Piece {
            id,
            kind,
            side,
            position,
            has_moved: false,
            profile: compute_offsets(kind, side, false),
        }
    }

    /// The sentinel standing for "no piece here". It compares unequal to
    /// every real piece and never enters a board's live collection.
    pub fn none() -> Self {
        Piece::new(PieceId::NONE, PieceKind::None, Side::None, Point::new(0, 0))
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.id.is_none()
    }

    #[inline]
    pub fn is_sliding(&self) -> bool {
        self.profile.sliding
    }

    /// Move the piece to `target`: position, has-moved flag and offsets
    /// update as a single step.
    pub(crate) fn relocate(&mut self, target: Point) {
        self.position = target;
        self.has_moved = true;
        self.refresh_profile();
    }

    /// Put the piece back on `source` as if it had never moved.
    pub(crate) fn restore(&mut self, source: Point) {
        self.position = source;
        self.has_moved = false;
        self.refresh_profile();
    }

    fn refresh_profile(&mut self) {
        self.profile = compute_offsets(self.kind, self.side, self.has_moved);
    }

    /// Placement character: uppercase for White, lowercase for Black, `-`
    /// for the none kind.
    pub fn fen_char(&self) -> char {
        let c = match self.kind {
            PieceKind::None => '-',
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };
        if self.side == Side::Black {
            c.to_ascii_lowercase()
        } else {
            c
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} at {}", self.side, self.kind, self.position)
    }
}
