//! Board tests

use target_tetris::core::{get_shape, Board};
use target_tetris::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
    for x in 0..board.width() as i8 {
        board.set(x, y, Some(kind));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None));
        }
    }
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(PieceKind::T)));
}

#[test]
fn test_collision_walls_and_floor() {
    let board = Board::new();
    let o = get_shape(PieceKind::O, Rotation::North);

    assert!(!board.check_collision(o, 0, 0));
    assert!(!board.check_collision(o, 8, 18));
    assert!(board.check_collision(o, -1, 0));
    assert!(board.check_collision(o, 9, 0));
    assert!(board.check_collision(o, 0, 19));
}

#[test]
fn test_collision_with_locked_cell() {
    let mut board = Board::new();
    board.set(4, 10, Some(PieceKind::Z));
    let t = get_shape(PieceKind::T, Rotation::North);

    // T North occupies (x+1, y) and (x..x+3, y+1).
    assert!(board.check_collision(t, 3, 9));
    assert!(board.check_collision(t, 3, 10));
    assert!(!board.check_collision(t, 3, 8));
    assert!(!board.check_collision(t, 5, 9));
}

#[test]
fn test_place_shape_clips_above_top() {
    let mut board = Board::new();
    let i = get_shape(PieceKind::I, Rotation::East);
    board.place_shape(i, 0, -2, PieceKind::I);

    assert_eq!(board.filled_count(), 2);
    assert!(board.is_occupied(0, 0));
    assert!(board.is_occupied(0, 1));

    board.clear_shape(i, 0, -2);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_first_full_row_scans_bottom_up() {
    let mut board = Board::new();
    assert_eq!(board.first_full_row(), None);

    fill_row(&mut board, 5, PieceKind::I);
    fill_row(&mut board, 12, PieceKind::J);
    assert_eq!(board.first_full_row(), Some(12));
    assert!(board.is_row_full(5));
    assert!(!board.is_row_full(6));
    assert!(!board.is_row_full(40));
}

#[test]
fn test_filled_columns() {
    let mut board = Board::new();
    board.set(1, 19, Some(PieceKind::S));
    board.set(7, 19, Some(PieceKind::S));
    assert_eq!(board.filled_columns(19), vec![1, 7]);
    assert!(board.filled_columns(0).is_empty());
}

#[test]
fn test_clear_row_shifts_down() {
    let mut board = Board::new();
    fill_row(&mut board, 19, PieceKind::I);
    board.set(3, 18, Some(PieceKind::T));
    board.set(6, 0, Some(PieceKind::O));

    assert_eq!(board.clear_row(19), 1);

    assert_eq!(board.get(3, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.get(6, 1), Some(Some(PieceKind::O)));
    assert!(board.filled_columns(0).is_empty());
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_clear_row_middle_keeps_rows_below() {
    let mut board = Board::new();
    fill_row(&mut board, 10, PieceKind::I);
    board.set(2, 15, Some(PieceKind::L));
    board.set(2, 9, Some(PieceKind::J));

    board.clear_row(10);
    assert_eq!(board.get(2, 15), Some(Some(PieceKind::L)));
    assert_eq!(board.get(2, 10), Some(Some(PieceKind::J)));
    assert_eq!(board.get(2, 9), Some(None));
}

#[test]
fn test_clear_row_out_of_range() {
    let mut board = Board::new();
    board.set(0, 19, Some(PieceKind::I));
    assert_eq!(board.clear_row(20), 0);
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_drop_distance_onto_stack() {
    let mut board = Board::new();
    fill_row(&mut board, 15, PieceKind::Z);
    let i = get_shape(PieceKind::I, Rotation::North);
    assert_eq!(board.drop_distance(i, 3, -1), 15);
}

#[test]
fn test_custom_size_board() {
    let mut board = Board::with_size(6, 8);
    assert_eq!(board.cells().len(), 48);
    fill_row(&mut board, 7, PieceKind::O);
    assert_eq!(board.first_full_row(), Some(7));
    board.clear();
    assert_eq!(board.filled_count(), 0);
}
