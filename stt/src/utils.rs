use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, BorderType},
};

/// A block with a rounded border
pub const ROUNDED_BLOCK: Block = Block::bordered().border_type(BorderType::Rounded);

/// A centered `Rect` of the given size inside `area`
pub fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area_horizontal] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical])
        .flex(Flex::Center)
        .areas(area_horizontal);
    area
}

/// Helper methods for key events
pub trait KeyEventHelper {
    /// Returns true if the key is being pressed, not released or repeated
    fn is_press(&self) -> bool;

    /// Returns true if the key is pressed together with CTRL
    fn is_ctrl(&self) -> bool;

    /// Returns true if the given character is pressed together with CTRL
    fn is_ctrl_press_char(&self, character: char) -> bool;
}

impl KeyEventHelper for KeyEvent {
    fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }

    fn is_ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn is_ctrl_press_char(&self, character: char) -> bool {
        self.is_press() && self.is_ctrl() && self.code == KeyCode::Char(character)
    }
}
