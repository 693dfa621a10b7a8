//! Translation of raw window events into the small input vocabulary the
//! tutorial programs react to.

use glutin::event::{ElementState, VirtualKeyCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Q,
    Other,
}

impl From<VirtualKeyCode> for KeyboardKey {
    fn from(code: VirtualKeyCode) -> Self {
        match code {
            VirtualKeyCode::Up => Self::ArrowUp,
            VirtualKeyCode::Down => Self::ArrowDown,
            VirtualKeyCode::Left => Self::ArrowLeft,
            VirtualKeyCode::Right => Self::ArrowRight,
            VirtualKeyCode::Escape => Self::Escape,
            VirtualKeyCode::Q => Self::Q,
            _ => Self::Other,
        }
    }
}

impl KeyboardKey {
    pub fn closes_window(self) -> bool {
        matches!(self, Self::Escape | Self::Q)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressState {
    Pressed,
    Released,
}

impl From<ElementState> for PressState {
    fn from(state: ElementState) -> Self {
        match state {
            ElementState::Pressed => Self::Pressed,
            ElementState::Released => Self::Released,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

impl From<glutin::event::MouseButton> for MouseButton {
    fn from(button: glutin::event::MouseButton) -> Self {
        match button {
            glutin::event::MouseButton::Left => Self::Left,
            glutin::event::MouseButton::Right => Self::Right,
            glutin::event::MouseButton::Middle => Self::Middle,
            glutin::event::MouseButton::Other(_) => Self::Other,
        }
    }
}

/// Tracks what the viewer needs to turn raw mouse motion into drags.
#[derive(Debug)]
pub struct InputState {
    /// Held buttons in press order.
    held_buttons: Vec<MouseButton>,
    is_window_focused: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held_buttons: Vec::new(),
            is_window_focused: true,
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.is_window_focused = focused;
        if !focused {
            self.held_buttons.clear();
        }
    }

    pub fn mouse_input(&mut self, button: MouseButton, state: PressState) {
        self.held_buttons.retain(|&held| held != button);

        if state == PressState::Pressed {
            self.held_buttons.push(button);
        }
    }

    /// The most recently pressed button still held, if motion should count
    /// as a drag.
    pub fn drag_button(&self) -> Option<MouseButton> {
        if self.is_window_focused {
            self.held_buttons.last().copied()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(KeyboardKey::from(VirtualKeyCode::Up), KeyboardKey::ArrowUp);
        assert_eq!(KeyboardKey::from(VirtualKeyCode::Down), KeyboardKey::ArrowDown);
        assert_eq!(KeyboardKey::from(VirtualKeyCode::Left), KeyboardKey::ArrowLeft);
        assert_eq!(KeyboardKey::from(VirtualKeyCode::Right), KeyboardKey::ArrowRight);
        assert_eq!(KeyboardKey::from(VirtualKeyCode::W), KeyboardKey::Other);
    }

    #[test]
    fn test_close_keys() {
        assert!(KeyboardKey::Escape.closes_window());
        assert!(KeyboardKey::Q.closes_window());
        assert!(!KeyboardKey::ArrowUp.closes_window());
    }

    #[test]
    fn test_drag_requires_pressed_button() {
        let mut state = InputState::new();
        assert_eq!(state.drag_button(), None);

        state.mouse_input(MouseButton::Left, PressState::Pressed);
        assert_eq!(state.drag_button(), Some(MouseButton::Left));

        state.mouse_input(MouseButton::Right, PressState::Released);
        assert_eq!(state.drag_button(), Some(MouseButton::Left));

        state.mouse_input(MouseButton::Left, PressState::Released);
        assert_eq!(state.drag_button(), None);
    }

    #[test]
    fn test_releasing_second_button_keeps_drag() {
        let mut state = InputState::new();

        state.mouse_input(MouseButton::Left, PressState::Pressed);
        state.mouse_input(MouseButton::Right, PressState::Pressed);
        assert_eq!(state.drag_button(), Some(MouseButton::Right));

        state.mouse_input(MouseButton::Right, PressState::Released);
        assert_eq!(state.drag_button(), Some(MouseButton::Left));

        state.mouse_input(MouseButton::Left, PressState::Released);
        assert_eq!(state.drag_button(), None);
    }

    #[test]
    fn test_repeated_press_is_tracked_once() {
        let mut state = InputState::new();

        state.mouse_input(MouseButton::Middle, PressState::Pressed);
        state.mouse_input(MouseButton::Middle, PressState::Pressed);
        state.mouse_input(MouseButton::Middle, PressState::Released);

        assert_eq!(state.drag_button(), None);
    }

    #[test]
    fn test_losing_focus_ends_drag() {
        let mut state = InputState::new();
        state.mouse_input(MouseButton::Left, PressState::Pressed);

        state.set_focused(false);
        assert_eq!(state.drag_button(), None);

        state.set_focused(true);
        assert_eq!(state.drag_button(), None);
    }
}
