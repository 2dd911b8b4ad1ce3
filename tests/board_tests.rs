//! Board tests

use mini_tetris::core::{Board, Shape};
use mini_tetris::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.is_valid(x, y), "Cell ({}, {}) should be valid", x, y);
            assert_eq!(board.get(x, y), Some(None));
        }
    }
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
    assert!(board.is_occupied(5, 10));

    assert!(!board.set(10, 0, Some(PieceKind::T)));
    assert!(!board.set(0, -1, Some(PieceKind::T)));
}

#[test]
fn test_single_full_row_clears_and_keeps_height() {
    let mut board = Board::from_rows(&["..T.......", "IIIIIIIIII"]);
    let cleared = board.clear_full_rows();

    assert_eq!(cleared.as_slice(), &[19]);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.filled_count(), 1);
    // The T cell sank into the bottom row.
    assert_eq!(board.get(2, 19), Some(Some(PieceKind::T)));
}

#[test]
fn test_non_adjacent_rows_clear_together() {
    let mut board = Board::from_rows(&[
        "ZZZZZZZZZZ",
        "S.........",
        "ZZZZZZZZZZ",
        ".J........",
    ]);
    let cleared = board.clear_full_rows();

    assert_eq!(cleared.as_slice(), &[18, 16]);
    assert_eq!(board.get(0, 18), Some(Some(PieceKind::S)));
    assert_eq!(board.get(1, 19), Some(Some(PieceKind::J)));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_no_full_rows_is_noop() {
    let mut board = Board::from_rows(&["OOOOOOOOO."]);
    let before = board.clone();
    assert!(board.clear_full_rows().is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_collision_is_translation_consistent() {
    // Collision of a shape at (x, y) equals the collision of the same shape
    // shifted inside a bigger box at (x - dx, y - dy).
    let board = Board::from_rows(&["...LL.....", "..LLL....."]);
    let t = Shape::from_rows([[0, 1, 0], [1, 1, 1]]);
    let padded = Shape::from_rows([[0, 0, 0, 0], [0, 0, 1, 0], [0, 1, 1, 1], [0, 0, 0, 0]]);

    for y in -2..BOARD_HEIGHT as i8 {
        for x in -2..BOARD_WIDTH as i8 {
            assert_eq!(
                board.collides(&t, x, y),
                board.collides(&padded, x - 1, y - 1),
                "mismatch at ({}, {})",
                x,
                y
            );
        }
    }
}

#[test]
fn test_free_translation_never_collides() {
    // Stack with an overhang at column 3 and a well at column 9.
    let board = Board::from_rows(&[
        "...J......",
        "...J......",
        "..SS.....O",
        ".SS...ZZ.O",
        "IIII.ZZ...",
    ]);

    for kind in PieceKind::ALL {
        let mut shape = Shape::spawn(kind);
        for _ in 0..4 {
            for y in -2..BOARD_HEIGHT as i8 {
                for x in -2..BOARD_WIDTH as i8 {
                    if board.collides(&shape, x, y) {
                        continue;
                    }
                    for dy in -3..=3i8 {
                        for dx in -3..=3i8 {
                            let free = shape
                                .filled_cells()
                                .all(|(cx, cy)| board.is_valid(x + dx + cx, y + dy + cy));
                            if free {
                                assert!(
                                    !board.collides(&shape, x + dx, y + dy),
                                    "{:?} at ({}, {}) moved by ({}, {})",
                                    kind,
                                    x,
                                    y,
                                    dx,
                                    dy
                                );
                            }
                        }
                    }
                }
            }
            shape = shape.rotated_cw();
        }
    }
}

#[test]
fn test_color_grid_uses_piece_indices() {
    let board = Board::from_rows(&["IJLOSTZ..."]);
    let mut grid = [[0u8; 10]; 20];
    board.write_color_grid(&mut grid);
    assert_eq!(&grid[19][..8], &[1, 2, 3, 4, 5, 6, 7, 0]);
    assert!(grid[..19].iter().all(|row| row.iter().all(|&v| v == 0)));
}
