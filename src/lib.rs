//! Board and move-generation core for chess played on an unbounded
//! coordinate plane.
//!
//! The plane has no edges, so move generation is bounded by a caller-
//! supplied [`Window`] instead of board geometry: sliding rays extend by
//! increasing offset multiples and give up once a misfire budget of
//! out-of-window probes is exhausted. A [`Validator`] classifies each
//! candidate and the [`Board`] applies and reverts moves against a history
//! stack, which is exercised exhaustively by perft counting.
//!
//! Rendering, input handling and logging live outside this crate; they
//! consume the core through [`Board::piece_at`], [`Board::possible_moves`],
//! [`Board::make_move`] and [`Board::undo_move`].

pub mod board;
pub mod diagnostics;
pub mod errors;
pub mod moves;
pub mod pieces;
pub mod point;
pub mod utils;
pub mod validator;

pub use board::Board;
pub use diagnostics::{DiagnosticSink, NullSink, StderrSink};
pub use errors::ChessError;
pub use moves::{DEFAULT_MISFIRE_BUDGET, Move, MoveFlags, MoveGenerator, Window};
pub use pieces::{MovementProfile, OffsetSet, Piece, PieceId, PieceKind, Side, compute_offsets};
pub use point::{Point, PointOperand};
pub use utils::{POSITION_5_FEN, STARTING_FEN, standard_notation_to_point};
pub use validator::Validator;
