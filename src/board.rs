use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use crate::diagnostics::DiagnosticSink;
use crate::errors::ChessError;
use crate::moves::{DEFAULT_MISFIRE_BUDGET, Move, MoveGenerator, Window};
use crate::pieces::{Piece, PieceId, PieceKind, Side};
use crate::point::Point;
use crate::utils::fen_char_to_kind;
use crate::validator::Validator;

/// The game board: live pieces, captured pieces, the history of applied
/// moves and the side to move.
///
/// The board lives on an unbounded plane; nothing constrains positions to
/// `1..=8`. At most one live piece occupies a square at a time; the
/// validator enforces this, not storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pieces: Vec<Piece>,
    captured: Vec<Piece>,
    history: Vec<Move>,
    current_player: Side,
    none_piece: Piece,
    next_id: u32,
    #[serde(skip)]
    validator: Validator,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Board {
            pieces: Vec::new(),
            captured: Vec::new(),
            history: Vec::new(),
            current_player: Side::White,
            none_piece: Piece::none(),
            next_id: 1,
            validator: Validator::default(),
        }
    }

    /// A board whose validator reports rejections to `sink`.
    pub fn with_sink(sink: Rc<dyn DiagnosticSink>) -> Self {
        let mut board = Board::new();
        board.validator = Validator::new(sink);
        board
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn current_player(&self) -> Side {
        self.current_player
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.side == side)
    }

    pub fn white_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces_of(Side::White)
    }

    pub fn black_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces_of(Side::Black)
    }

    /// Create a piece bound to this board and place it. No legality checks;
    /// duplicate occupancy is the caller's problem.
    pub fn create_piece(&mut self, kind: PieceKind, position: Point, side: Side) -> PieceId {
        let id = PieceId::new(self.next_id);
        self.next_id += 1;
        self.pieces.push(Piece::new(id, kind, side, position));
        id
    }

    /// Put a previously removed piece back on the board.
    pub fn add_piece(&mut self, piece: Piece) {
        self.pieces.push(piece);
    }

    pub fn remove_piece(&mut self, id: PieceId) -> Option<Piece> {
        let index = self.pieces.iter().position(|p| p.id == id)?;
        Some(self.pieces.remove(index))
    }

    pub fn clear_pieces(&mut self) {
        self.pieces.clear();
    }

    /// The piece occupying `position`, or the none-piece sentinel. Should
    /// the collection ever hold duplicate occupants, the most recently
    /// placed one wins.
    pub fn piece_at(&self, position: Point) -> &Piece {
        self.pieces
            .iter()
            .rev()
            .find(|p| p.position == position)
            .unwrap_or(&self.none_piece)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    fn piece_index(&self, id: PieceId) -> Option<usize> {
        self.pieces.iter().position(|p| p.id == id)
    }

    /// Populate the board from the placement field of a board-description
    /// string: eight `/`-separated ranks from rank 8 down to rank 1, digits
    /// for runs of empty files, letters for pieces, uppercase = White.
    /// Unknown letters become pieces of the none kind. The trailing five
    /// fields (side to move, castling, en passant, clocks) are tolerated
    /// but not interpreted.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), ChessError> {
        let placement = fen
            .split(' ')
            .next()
            .filter(|field| !field.is_empty())
            .ok_or_else(|| ChessError::InvalidPosition("empty board description".into()))?;
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::InvalidPosition(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }
        for (i, rank) in ranks.iter().enumerate() {
            let y = 8 - i as i64;
            let mut x: i64 = 1;
            for c in rank.chars() {
                if let Some(run) = c.to_digit(10) {
                    x += i64::from(run);
                } else {
                    let side = if c.is_uppercase() {
                        Side::White
                    } else {
                        Side::Black
                    };
                    self.create_piece(fen_char_to_kind(c), Point::new(x, y), side);
                    x += 1;
                }
            }
        }
        Ok(())
    }

    /// Legal moves for `piece` within `window`, with the default misfire
    /// budget. Fails when `piece` is the sentinel or its side is not the
    /// side to move.
    pub fn possible_moves<'a>(
        &'a self,
        piece: &'a Piece,
        window: Window,
    ) -> Result<MoveGenerator<'a>, ChessError> {
        self.possible_moves_with_budget(piece, window, DEFAULT_MISFIRE_BUDGET)
    }

    pub fn possible_moves_with_budget<'a>(
        &'a self,
        piece: &'a Piece,
        window: Window,
        misfire_budget: u32,
    ) -> Result<MoveGenerator<'a>, ChessError> {
        if piece.is_none() {
            return Err(ChessError::InvalidPlayer(
                "cannot generate moves for an empty square".into(),
            ));
        }
        if piece.side != self.current_player {
            return Err(ChessError::InvalidPlayer(format!(
                "{:?} piece cannot move on {:?}'s turn",
                piece.side, self.current_player
            )));
        }
        Ok(MoveGenerator::new(self, piece, window, misfire_budget))
    }

    /// Run a candidate move through the validator. See [`Validator`].
    pub fn validate(&self, mv: Move) -> Result<(Move, bool), ChessError> {
        self.validator.validate(self, mv)
    }

    /// Apply a move. The move is re-validated first and nothing mutates
    /// unless every check passes: then the side to move flips, the move is
    /// pushed onto the history, the piece relocates (refreshing has-moved
    /// and offsets) and a captured piece leaves the live collection for the
    /// captured list.
    pub fn make_move(&mut self, mv: Move) -> Result<(), ChessError> {
        if !mv.legal {
            return Err(ChessError::InvalidMove {
                source: mv.source,
                target: mv.target,
            });
        }
        let (validated, legal) = self.validator.validate(self, mv)?;
        if !legal {
            return Err(ChessError::InvalidMove {
                source: validated.source,
                target: validated.target,
            });
        }

        self.current_player = self.current_player.opponent();
        self.history.push(validated);
        let index = self
            .piece_index(validated.moved)
            .expect("validated move references a live piece");
        self.pieces[index].relocate(validated.target);
        if !validated.captured.is_none() {
            let index = self
                .piece_index(validated.captured)
                .expect("captured piece is on the board");
            let piece = self.pieces.remove(index);
            self.captured.push(piece);
        }
        Ok(())
    }

    /// Revert the most recent move: the piece returns to its source square
    /// with has-moved cleared and offsets refreshed, a captured piece
    /// rejoins the live collection, and the side to move flips back.
    pub fn undo_move(&mut self) -> Result<Move, ChessError> {
        let mv = self.history.pop().ok_or(ChessError::EmptyHistory)?;
        let index = self
            .piece_index(mv.moved)
            .expect("moved piece is still live");
        self.pieces[index].restore(mv.source);
        if !mv.captured.is_none() {
            let index = self
                .captured
                .iter()
                .position(|p| p.id == mv.captured)
                .expect("captured piece awaits restore");
            let piece = self.captured.remove(index);
            self.pieces.push(piece);
        }
        self.current_player = self.current_player.opponent();
        Ok(mv)
    }

    /// Toggle the side to move.
    pub fn change_player(&mut self) -> Result<(), ChessError> {
        match self.current_player {
            Side::White => {
                self.current_player = Side::Black;
                Ok(())
            }
            Side::Black => {
                self.current_player = Side::White;
                Ok(())
            }
            Side::None => Err(ChessError::InvalidPlayer("side to move is unset".into())),
        }
    }

    /// The check flag of the most recent move. Nothing in this core ever
    /// sets it, so this is permanently false. A known gap, kept for the
    /// embedding surface.
    pub fn is_check(&self) -> bool {
        self.history.last().is_some_and(|m| m.flags.check)
    }

    /// The checkmate flag of the most recent move. Permanently false, like
    /// [`Board::is_check`].
    pub fn is_checkmate(&self) -> bool {
        self.history.last().is_some_and(|m| m.flags.checkmate)
    }

    /// Count move-tree leaves at `depth` for the side to move, generating
    /// within `window` at every level.
    pub fn perft(&mut self, depth: usize, window: Window) -> Result<u64, ChessError> {
        if depth == 0 {
            return Ok(1);
        }
        let ids: Vec<PieceId> = self.pieces_of(self.current_player).map(|p| p.id).collect();
        let mut nodes = 0;
        for id in ids {
            let moves: Vec<Move> = match self.piece(id) {
                Some(piece) => self.possible_moves(piece, window)?.collect(),
                None => continue,
            };
            for mv in moves {
                self.make_move(mv)?;
                nodes += self.perft(depth - 1, window)?;
                self.undo_move()?;
            }
        }
        Ok(nodes)
    }
}

impl fmt::Display for Board {
    /// Textual dump of the classic area, rank 8 down to rank 1. A debug
    /// affordance, not a durable format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (1..=8).rev() {
            for x in 1..=8 {
                write!(f, "{} ", self.piece_at(Point::new(x, y)).fen_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
