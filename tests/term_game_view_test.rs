use target_tetris::core::{GameSnapshot, GameState, TargetSnapshot};
use target_tetris::term::{GameView, Viewport};
use target_tetris::types::PieceKind;

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1 the board is 20x20, plus border => 22x22.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameSnapshot::default();
    snap.board[19 * 10] = Some(PieceKind::I);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_and_ghost() {
    let mut state = GameState::new(7);
    state.start();
    for _ in 0..3 {
        state.move_down();
    }
    let snap = state.snapshot();
    let active = snap.active.unwrap();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    let shape = state.active_shape().unwrap();
    let ghost_y = snap.ghost_y.unwrap();
    for (dx, dy) in shape.cells() {
        let col = 1 + (active.x + dx) as u16 * 2;
        assert_eq!(fb.get(col, 1 + (active.y + dy) as u16).unwrap().ch, '█');
        assert_eq!(fb.get(col, 1 + (ghost_y + dy) as u16).unwrap().ch, '░');
    }
}

#[test]
fn term_view_marks_live_and_hit_targets() {
    let mut snap = GameSnapshot::default();
    for x in 0..10 {
        snap.board[19 * 10 + x] = Some(PieceKind::Z);
    }
    snap.targets.push(TargetSnapshot { x: 2, y: 19, hit: false });
    snap.targets.push(TargetSnapshot { x: 6, y: 19, hit: true });
    snap.target_episode = Some(1);

    let fb = GameView::default().render(&snap, Viewport::new(40, 22));
    let layout = GameView::default().layout(10, 20, Viewport::new(40, 22));
    let row = layout.origin_row + 19;

    assert_eq!(fb.get(layout.origin_col + 4, row).unwrap().ch, '◎');
    assert_eq!(fb.get(layout.origin_col + 12, row).unwrap().ch, '×');
    assert_eq!(fb.get(layout.origin_col + 2, row).unwrap().ch, '█');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = GameState::new(1).snapshot();
    snap.score = 1234;
    snap.lines = 10;
    snap.next = PieceKind::T;
    snap.target_episode = Some(3);
    snap.targets.push(TargetSnapshot { x: 0, y: 19, hit: true });
    snap.targets.push(TargetSnapshot { x: 1, y: 19, hit: false });

    let fb = GameView::default().render(&snap, Viewport::new(60, 22));
    let text: String = (0..22).map(|y| fb.row_text(y) + "\n").collect();

    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));
    assert!(text.contains("LINES"));
    assert!(text.contains("NEXT"));
    assert!(text.contains("TARGETS"));
    assert!(text.contains("1/2"));
}

#[test]
fn term_view_shows_game_over_banner() {
    let mut snap = GameSnapshot::default();
    snap.game_over = true;
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    let text: String = (0..22).map(|y| fb.row_text(y)).collect();
    assert!(text.contains("GAME OVER"));
}

#[test]
fn term_view_side_panel_lists_keys_and_target_rule() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(60, 22));
    let text: String = (0..22).map(|y| fb.row_text(y) + "\n").collect();

    assert!(text.contains("KEYS"));
    for line in ["W   rotate", "A D move", "SPC drop", "R   swap", "ENT restart"] {
        assert!(text.contains(line), "missing {line:?}");
    }
    assert!(text.contains("every ◎ clicked"));
    assert!(!text.contains("click them!"));
}
