use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::pieces::{Piece, PieceId, Side};
use crate::point::Point;

/// Out-of-window probes tolerated before a sliding-ray search gives up.
pub const DEFAULT_MISFIRE_BUDGET: u32 = 100;

/// Rectangular inclusive view window bounding move generation. Stands in
/// for the visible area of an otherwise unbounded board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub bottom_left: Point,
    pub top_right: Point,
}

impl Window {
    /// Corners are normalized, so either ordering of the two points works.
    pub fn new(a: Point, b: Point) -> Self {
        Window {
            bottom_left: Point::new(a.x.min(b.x), a.y.min(b.y)),
            top_right: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bottom_left.x <= p.x
            && p.x <= self.top_right.x
            && self.bottom_left.y <= p.y
            && p.y <= self.top_right.y
    }
}

/// Rule annotations on a move. Nothing in the board core ever sets these;
/// they exist so embedders extending the rules have somewhere to put them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFlags {
    pub promotion: bool,
    pub castling: bool,
    pub en_passant: bool,
    pub check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
}

/// A candidate or applied move.
///
/// `moved` and `captured` are populated by the validator; `PieceId::NONE`
/// marks "no piece there". `legal` starts out true and is cleared when
/// validation rejects the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub side: Side,
    pub source: Point,
    pub target: Point,
    pub moved: PieceId,
    pub captured: PieceId,
    pub legal: bool,
    pub flags: MoveFlags,
}

impl Move {
    pub fn new(side: Side, source: Point, target: Point) -> Self {
        Move {
            side,
            source,
            target,
            moved: PieceId::NONE,
            captured: PieceId::NONE,
            legal: true,
            flags: MoveFlags::default(),
        }
    }
}

/// Streams the legal moves of one piece, restricted to a window.
///
/// Non-sliding pieces submit each base offset once. Sliding pieces extend
/// every base offset by multipliers 1, 2, 3, ...; a ray stops at the first
/// occupied square (the landing move itself is still submitted, so captures
/// surface), and every out-of-window probe counts against the misfire
/// budget so iteration terminates on the unbounded plane.
///
/// The sequence is restartable by asking the board for a fresh generator;
/// it borrows the board for its whole lifetime, so the board cannot be
/// mutated mid-iteration.
#[derive(Debug)]
pub struct MoveGenerator<'a> {
    board: &'a Board,
    piece: &'a Piece,
    window: Window,
    budget: u32,
    idx: usize,
    multiplier: i64,
    misfires: u32,
    blocked: [bool; 8],
}

impl<'a> MoveGenerator<'a> {
    pub(crate) fn new(board: &'a Board, piece: &'a Piece, window: Window, budget: u32) -> Self {
        MoveGenerator {
            board,
            piece,
            window,
            budget,
            idx: 0,
            multiplier: 1,
            misfires: 0,
            blocked: [false; 8],
        }
    }

    /// Out-of-window probes seen so far.
    pub fn misfires(&self) -> u32 {
        self.misfires
    }

    fn next_fixed(&mut self) -> Option<Move> {
        while self.idx < self.piece.profile.offsets.len() {
            let offset = self.piece.profile.offsets[self.idx];
            self.idx += 1;
            let target = self.piece.position + offset;
            if !self.window.contains(target) {
                continue;
            }
            if let Some(mv) = self.submit(target) {
                return Some(mv);
            }
        }
        None
    }

    fn next_sliding(&mut self) -> Option<Move> {
        let count = self.piece.profile.offsets.len();
        loop {
            if self.misfires >= self.budget {
                return None;
            }
            if self.blocked[..count].iter().all(|&b| b) {
                return None;
            }
            if self.idx >= count {
                self.idx = 0;
                self.multiplier += 1;
            }
            let ray = self.idx;
            self.idx += 1;
            if self.blocked[ray] {
                continue;
            }
            let target = self.piece.position + self.piece.profile.offsets[ray] * self.multiplier;
            if !self.window.contains(target) {
                self.misfires += 1;
                continue;
            }
            if !self.board.piece_at(target).is_none() {
                // Ray ends here; the landing square may still be a capture.
                self.blocked[ray] = true;
            }
            if let Some(mv) = self.submit(target) {
                return Some(mv);
            }
        }
    }

    /// Run the candidate through the validator; only legal moves surface.
    fn submit(&self, target: Point) -> Option<Move> {
        let mv = Move::new(self.piece.side, self.piece.position, target);
        self.board
            .validate(mv)
            .ok()
            .and_then(|(mv, legal)| legal.then_some(mv))
    }
}

impl Iterator for MoveGenerator<'_> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        if self.piece.profile.sliding {
            self.next_sliding()
        } else {
            self.next_fixed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::errors::ChessError;
    use crate::pieces::PieceKind;

    fn standard_window() -> Window {
        Window::new(Point::new(1, 1), Point::new(8, 8))
    }

    #[test]
    fn window_normalizes_corners() {
        let w = Window::new(Point::new(8, 1), Point::new(1, 8));
        assert_eq!(w.bottom_left, Point::new(1, 1));
        assert_eq!(w.top_right, Point::new(8, 8));
        assert!(w.contains(Point::new(1, 8)));
        assert!(!w.contains(Point::new(0, 4)));
    }

    #[test]
    fn rook_alone_reaches_fourteen_squares() {
        let mut board = Board::new();
        let id = board.create_piece(PieceKind::Rook, Point::new(1, 1), Side::White);
        let rook = board.piece(id).unwrap();
        let moves: Vec<Move> = board
            .possible_moves(rook, standard_window())
            .unwrap()
            .collect();
        assert_eq!(moves.len(), 14);
        for mv in &moves {
            assert!(mv.legal);
            assert!(mv.source.x == mv.target.x || mv.source.y == mv.target.y);
        }
    }

    #[test]
    fn sliding_ray_stops_at_first_occupant() {
        let mut board = Board::new();
        let id = board.create_piece(PieceKind::Rook, Point::new(1, 1), Side::White);
        board.create_piece(PieceKind::Pawn, Point::new(1, 3), Side::White);
        board.create_piece(PieceKind::Pawn, Point::new(4, 1), Side::Black);

        let rook = board.piece(id).unwrap();
        let targets: Vec<Point> = board
            .possible_moves(rook, standard_window())
            .unwrap()
            .map(|m| m.target)
            .collect();

        // Up the file: only the square below the friendly pawn.
        assert!(targets.contains(&Point::new(1, 2)));
        assert!(!targets.contains(&Point::new(1, 3)));
        assert!(!targets.contains(&Point::new(1, 4)));
        // Along the rank: up to and including the enemy pawn, nothing past.
        assert!(targets.contains(&Point::new(3, 1)));
        assert!(targets.contains(&Point::new(4, 1)));
        assert!(!targets.contains(&Point::new(5, 1)));
    }

    #[test]
    fn misfire_budget_bounds_out_of_window_probing() {
        let mut board = Board::new();
        let id = board.create_piece(PieceKind::Queen, Point::new(0, 0), Side::White);
        let queen = board.piece(id).unwrap();
        // Window far away from the queen: every probe misfires, nothing is
        // yielded, and iteration still terminates.
        let window = Window::new(Point::new(1000, 1000), Point::new(1008, 1008));
        let mut generator = board.possible_moves_with_budget(queen, window, 16).unwrap();
        assert_eq!(generator.next(), None);
        assert_eq!(generator.misfires(), 16);
    }

    #[test]
    fn generator_restarts_from_scratch() {
        let mut board = Board::new();
        let id = board.create_piece(PieceKind::Knight, Point::new(4, 4), Side::White);
        let knight = board.piece(id).unwrap();
        let first: Vec<Move> = board
            .possible_moves(knight, standard_window())
            .unwrap()
            .collect();
        let second: Vec<Move> = board
            .possible_moves(knight, standard_window())
            .unwrap()
            .collect();
        assert_eq!(first.len(), 8);
        assert_eq!(first, second);
    }

    #[test]
    fn generating_for_the_opponent_is_rejected() {
        let mut board = Board::new();
        let id = board.create_piece(PieceKind::Knight, Point::new(4, 4), Side::Black);
        let knight = board.piece(id).unwrap();
        let err = board.possible_moves(knight, standard_window()).unwrap_err();
        assert!(matches!(err, ChessError::InvalidPlayer(_)));
    }

    #[test]
    fn generating_for_the_sentinel_is_rejected() {
        let board = Board::new();
        let sentinel = board.piece_at(Point::new(4, 4));
        let err = board
            .possible_moves(sentinel, standard_window())
            .unwrap_err();
        assert!(matches!(err, ChessError::InvalidPlayer(_)));
    }

    #[test]
    fn pawn_moves_from_the_initial_rank() {
        let mut board = Board::new();
        let id = board.create_piece(PieceKind::Pawn, Point::new(5, 2), Side::White);
        let pawn = board.piece(id).unwrap();
        let targets: Vec<Point> = board
            .possible_moves(pawn, standard_window())
            .unwrap()
            .map(|m| m.target)
            .collect();
        // Single and double step; the capture diagonals have no enemy.
        assert_eq!(targets, vec![Point::new(5, 3), Point::new(5, 4)]);
    }

    #[test]
    fn pawn_captures_diagonally_once_an_enemy_is_there() {
        let mut board = Board::new();
        let id = board.create_piece(PieceKind::Pawn, Point::new(5, 2), Side::White);
        board.create_piece(PieceKind::Knight, Point::new(6, 3), Side::Black);
        let pawn = board.piece(id).unwrap();
        let targets: Vec<Point> = board
            .possible_moves(pawn, standard_window())
            .unwrap()
            .map(|m| m.target)
            .collect();
        assert!(targets.contains(&Point::new(6, 3)));
    }

    #[test]
    fn window_excludes_reachable_squares() {
        let mut board = Board::new();
        let id = board.create_piece(PieceKind::Knight, Point::new(1, 1), Side::White);
        let knight = board.piece(id).unwrap();
        let window = Window::new(Point::new(1, 1), Point::new(2, 2));
        let moves: Vec<Move> = board.possible_moves(knight, window).unwrap().collect();
        // Both in-board knight targets (2,3) and (3,2) fall outside the
        // window.
        assert!(moves.is_empty());
    }
}
