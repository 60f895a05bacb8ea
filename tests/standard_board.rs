//! Exercises the core against the standard position assembled by hand,
//! without going through the board-description parser.

use planar_chess::{
    Board, ChessError, Move, PieceKind, Point, Side, Window, standard_notation_to_point,
};

fn standard_window() -> Window {
    Window::new(Point::new(1, 1), Point::new(8, 8))
}

fn setup_standard_board(board: &mut Board) {
    let back_rank = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    for (i, &kind) in back_rank.iter().enumerate() {
        let x = i as i64 + 1;
        board.create_piece(kind, Point::new(x, 1), Side::White);
        board.create_piece(kind, Point::new(x, 8), Side::Black);
    }
    for x in 1..=8 {
        board.create_piece(PieceKind::Pawn, Point::new(x, 2), Side::White);
        board.create_piece(PieceKind::Pawn, Point::new(x, 7), Side::Black);
    }
}

fn count_moves(board: &Board, side: Side) -> usize {
    board
        .pieces_of(side)
        .map(|piece| {
            board
                .possible_moves(piece, standard_window())
                .unwrap()
                .count()
        })
        .sum()
}

#[test]
fn hand_built_position_matches_the_parsed_one() {
    let mut by_hand = Board::new();
    setup_standard_board(&mut by_hand);

    let mut parsed = Board::new();
    parsed.load_fen(planar_chess::STARTING_FEN).unwrap();

    assert_eq!(by_hand.pieces().len(), parsed.pieces().len());
    for y in 1..=8 {
        for x in 1..=8 {
            let square = Point::new(x, y);
            let a = by_hand.piece_at(square);
            let b = parsed.piece_at(square);
            assert_eq!(a.kind, b.kind, "kind at {square}");
            assert_eq!(a.side, b.side, "side at {square}");
        }
    }
}

#[test]
fn white_has_twenty_opening_moves() {
    let mut board = Board::new();
    setup_standard_board(&mut board);
    assert_eq!(count_moves(&board, Side::White), 20);
}

#[test]
fn black_cannot_move_until_white_has() {
    let mut board = Board::new();
    setup_standard_board(&mut board);

    let knight = board.piece_at(standard_notation_to_point("b8").unwrap());
    assert!(matches!(
        board.possible_moves(knight, standard_window()),
        Err(ChessError::InvalidPlayer(_))
    ));

    let (mv, _) = board
        .validate(Move::new(
            Side::White,
            standard_notation_to_point("e2").unwrap(),
            standard_notation_to_point("e4").unwrap(),
        ))
        .unwrap();
    board.make_move(mv).unwrap();

    assert_eq!(count_moves(&board, Side::Black), 20);
}

#[test]
fn serde_round_trip_preserves_the_position() {
    let mut board = Board::new();
    setup_standard_board(&mut board);

    let (mv, _) = board
        .validate(Move::new(
            Side::White,
            standard_notation_to_point("g1").unwrap(),
            standard_notation_to_point("f3").unwrap(),
        ))
        .unwrap();
    board.make_move(mv).unwrap();

    let json = serde_json::to_string(&board).unwrap();
    let restored: Board = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.pieces(), board.pieces());
    assert_eq!(restored.captured_pieces(), board.captured_pieces());
    assert_eq!(restored.history(), board.history());
    assert_eq!(restored.current_player(), board.current_player());

    // The restored board keeps working: undo the knight move.
    let mut restored = restored;
    let undone = restored.undo_move().unwrap();
    assert_eq!(undone.target, standard_notation_to_point("f3").unwrap());
    assert_eq!(restored.current_player(), Side::White);
}
