//! Global actions - not tied to any specific screen

use ratatui::crossterm::event::{KeyEvent, MouseEvent};

#[derive(Debug, Clone)]
pub enum GlobalAction {
    /// Raw key pressed (before translation)
    KeyPressed(KeyEvent),
    /// Raw mouse event (before translation)
    Mouse(MouseEvent),
    /// Terminal size changed
    Resize { width: u16, height: u16 },
    /// Close the current screen; closing the last one quits
    Close,
    /// Quit the application
    Quit,
}
