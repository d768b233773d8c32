//! Pointer mapping: terminal mouse clicks to board-space hits.
//!
//! A board cell is drawn `cell_w` columns wide and `cell_h` rows tall starting
//! at terminal position (`origin_col`, `origin_row`). A click lands on a
//! terminal character, so it is reported at that character's center.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerMap {
    pub origin_col: u16,
    pub origin_row: u16,
    pub cell_w: u16,
    pub cell_h: u16,
    pub board_width: u8,
    pub board_height: u8,
}

impl PointerMap {
    /// Board-space position of the terminal character at (col, row).
    ///
    /// None when the click is outside the board area.
    pub fn to_board(&self, col: u16, row: u16) -> Option<(f32, f32)> {
        if self.cell_w == 0 || self.cell_h == 0 {
            return None;
        }
        let dx = col.checked_sub(self.origin_col)?;
        let dy = row.checked_sub(self.origin_row)?;
        let x = (dx as f32 + 0.5) / self.cell_w as f32;
        let y = (dy as f32 + 0.5) / self.cell_h as f32;
        if x >= self.board_width as f32 || y >= self.board_height as f32 {
            return None;
        }
        Some((x, y))
    }

    /// Translate a left-button press into a pointer hit.
    pub fn handle_mouse_event(&self, mouse: MouseEvent) -> Option<GameEvent> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (x, y) = self.to_board(mouse.column, mouse.row)?;
                Some(GameEvent::PointerHit { x, y })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn map() -> PointerMap {
        PointerMap {
            origin_col: 10,
            origin_row: 2,
            cell_w: 2,
            cell_h: 1,
            board_width: 10,
            board_height: 20,
        }
    }

    fn click(column: u16, row: u16, kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_click_maps_inside_cell() {
        let m = map();
        // Both characters of cell (3, 5) map into that cell's hitbox.
        let (x, y) = m.to_board(16, 7).unwrap();
        assert_eq!((x, y), (3.25, 5.5));
        let (x, _) = m.to_board(17, 7).unwrap();
        assert_eq!(x, 3.75);
    }

    #[test]
    fn test_click_outside_board() {
        let m = map();
        assert_eq!(m.to_board(9, 7), None);
        assert_eq!(m.to_board(10, 1), None);
        assert_eq!(m.to_board(30, 7), None);
        assert_eq!(m.to_board(12, 22), None);
    }

    #[test]
    fn test_only_left_press_hits() {
        let m = map();
        assert_eq!(
            m.handle_mouse_event(click(10, 21, MouseEventKind::Down(MouseButton::Left))),
            Some(GameEvent::PointerHit { x: 0.25, y: 19.5 })
        );
        assert_eq!(
            m.handle_mouse_event(click(10, 21, MouseEventKind::Down(MouseButton::Right))),
            None
        );
        assert_eq!(m.handle_mouse_event(click(10, 21, MouseEventKind::Moved)), None);
    }
}
