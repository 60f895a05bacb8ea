//! Helpers shared by the board core and its embedders: well-known board
//! descriptions, the placement-character table and square-notation parsing.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::errors::ChessError;
use crate::pieces::PieceKind;
use crate::point::Point;

/// The standard initial placement.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// "Position 5" from the common perft suites.
pub const POSITION_5_FEN: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

static FEN_PIECE_KINDS: Lazy<FxHashMap<char, PieceKind>> = Lazy::new(|| {
    FxHashMap::from_iter([
        ('P', PieceKind::Pawn),
        ('N', PieceKind::Knight),
        ('B', PieceKind::Bishop),
        ('R', PieceKind::Rook),
        ('Q', PieceKind::Queen),
        ('K', PieceKind::King),
    ])
});

/// Piece kind for a placement character, case-insensitively. Unknown
/// letters map to the none kind.
pub fn fen_char_to_kind(c: char) -> PieceKind {
    FEN_PIECE_KINDS
        .get(&c.to_ascii_uppercase())
        .copied()
        .unwrap_or(PieceKind::None)
}

/// Convert a square in standard notation (e.g. `e2`) to a [`Point`]
/// (e.g. `Point::new(5, 2)`): file letter `a`-`h` then rank digit `1`-`8`.
pub fn standard_notation_to_point(square: &str) -> Result<Point, ChessError> {
    let mut chars = square.chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(ChessError::InvalidSquareNotation(square.to_string()));
    };
    if !('1'..='8').contains(&rank) {
        return Err(ChessError::InvalidSquareNotation(square.to_string()));
    }
    if !('a'..='h').contains(&file) {
        return Err(ChessError::InvalidSquareNotation(square.to_string()));
    }
    Ok(Point::new(
        file as i64 - 'a' as i64 + 1,
        rank as i64 - '0' as i64,
    ))
}
