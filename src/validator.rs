use std::rc::Rc;

use crate::board::Board;
use crate::diagnostics::{DiagnosticSink, NullSink};
use crate::errors::ChessError;
use crate::moves::Move;
use crate::pieces::{Piece, PieceKind};
use crate::point::Point;

/// Classifies a candidate move as legal or illegal and annotates it with
/// the moved and captured pieces.
///
/// An illegal move is an expected outcome, reported as `legal = false` with
/// one warning on the injected sink naming the rule that failed. Asking to
/// move from an empty square is caller misuse and a hard error instead.
#[derive(Clone)]
pub struct Validator {
    sink: Rc<dyn DiagnosticSink>,
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Validator {
            sink: Rc::new(NullSink),
        }
    }
}

impl Validator {
    pub fn new(sink: Rc<dyn DiagnosticSink>) -> Self {
        Validator { sink }
    }

    /// Validate `mv` against `board`. The returned move carries the
    /// resolved moved/captured pieces and a `legal` field mirroring the
    /// returned flag.
    pub fn validate(&self, board: &Board, mut mv: Move) -> Result<(Move, bool), ChessError> {
        let moved = board.piece_at(mv.source);
        if moved.is_none() {
            self.sink
                .warn(format_args!("cannot move from empty square {}", mv.source));
            return Err(ChessError::NonePiece(mv.source));
        }
        let captured = board.piece_at(mv.target);
        mv.moved = moved.id;
        mv.captured = captured.id;

        let rejection = if mv.source == mv.target {
            Some("source and target are the same square")
        } else if moved.position != mv.source {
            Some("move does not match the piece's current position")
        } else if !moved.profile.sliding
            && !moved
                .profile
                .offsets
                .iter()
                .any(|&offset| moved.position + offset == mv.target)
        {
            // Sliding pieces skip the membership test; the ray construction
            // in the generator already bounds them.
            Some("target is not reachable by this piece")
        } else if !captured.is_none() && captured.side == moved.side {
            Some("target square is held by a friendly piece")
        } else if moved.kind == PieceKind::Pawn {
            pawn_rejection(board, captured, &mv)
        } else {
            None
        };

        if let Some(reason) = rejection {
            self.sink.warn(format_args!(
                "rejected {} -> {}: {}",
                mv.source, mv.target, reason
            ));
            mv.legal = false;
            return Ok((mv, false));
        }
        mv.legal = true;
        Ok((mv, true))
    }
}

/// Pawn legality beyond plain offset membership: diagonals must capture,
/// forward steps must not, and the double-step cannot jump an occupant.
fn pawn_rejection(board: &Board, captured: &Piece, mv: &Move) -> Option<&'static str> {
    let delta = mv.target - mv.source;
    if delta.x != 0 {
        if captured.is_none() {
            return Some("pawns only step diagonally to capture");
        }
    } else {
        if !captured.is_none() {
            return Some("pawns cannot capture straight ahead");
        }
        if delta.y.abs() == 2 {
            let step = Point::new(0, delta.y.signum());
            if !board.piece_at(mv.source + step).is_none() {
                return Some("pawn double-step is blocked");
            }
        }
    }
    None
}
