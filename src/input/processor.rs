//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! held buttons, modifier keys) and the key-binding map. It is the only
//! thing that sits between raw window events and
//! [`HaloEngine::execute`](crate::engine::HaloEngine::execute).

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use crate::engine::HaloCommand;
use crate::options::KeybindingOptions;

/// Which camera gesture a held button drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Orbit,
    Pan,
}

/// Converts raw window events into [`HaloCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
///
/// if let Some(cmd) = input_processor.handle_key_press("Space") {
///     engine.execute(cmd);
/// }
/// ```
pub struct InputProcessor {
    /// Last known cursor position, `None` until the first move.
    cursor: Option<Vec2>,
    /// Active drag gesture, if a button is held.
    drag: Option<Drag>,
    /// Whether the shift modifier is currently held.
    shift_pressed: bool,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeybindingOptions::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            cursor: None,
            drag: None,
            shift_pressed: false,
            key_bindings,
        }
    }

    /// Replace the key bindings (e.g. after reloading options).
    pub fn set_key_bindings(&mut self, key_bindings: KeybindingOptions) {
        self.key_bindings = key_bindings;
    }

    /// Whether a camera drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<HaloCommand> {
        self.key_bindings.lookup(key).map(|action| action.to_command())
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<HaloCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y))
            }
            InputEvent::CursorLeft => {
                self.cursor = None;
                self.drag = None;
                None
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed);
                None
            }
            InputEvent::Scroll { delta } => Some(HaloCommand::Zoom { delta }),
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
        }
    }

    fn handle_cursor_moved(&mut self, pos: Vec2) -> Option<HaloCommand> {
        let last = self.cursor.replace(pos)?;
        let delta = pos - last;
        if delta == Vec2::ZERO {
            return None;
        }

        match self.drag? {
            Drag::Pan => Some(HaloCommand::PanCamera { delta }),
            Drag::Orbit if self.shift_pressed => {
                Some(HaloCommand::PanCamera { delta })
            }
            Drag::Orbit => Some(HaloCommand::RotateCamera { delta }),
        }
    }

    fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        let gesture = match button {
            MouseButton::Left => Drag::Orbit,
            MouseButton::Right => Drag::Pan,
            MouseButton::Middle => return,
        };

        if pressed {
            self.drag = Some(gesture);
        } else if self.drag == Some(gesture) {
            self.drag = None;
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    fn button(button: MouseButton, pressed: bool) -> InputEvent {
        InputEvent::MouseButton { button, pressed }
    }

    #[test]
    fn hover_without_button_does_nothing() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(moved(10.0, 10.0)), None);
        assert_eq!(input.handle_event(moved(20.0, 15.0)), None);
    }

    #[test]
    fn left_drag_rotates() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(10.0, 10.0));
        let _ = input.handle_event(button(MouseButton::Left, true));
        assert_eq!(
            input.handle_event(moved(13.0, 6.0)),
            Some(HaloCommand::RotateCamera {
                delta: Vec2::new(3.0, -4.0)
            })
        );

        let _ = input.handle_event(button(MouseButton::Left, false));
        assert!(!input.is_dragging());
        assert_eq!(input.handle_event(moved(20.0, 6.0)), None);
    }

    #[test]
    fn shift_or_right_drag_pans() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(0.0, 0.0));
        let _ = input.handle_event(InputEvent::ModifiersChanged { shift: true });
        let _ = input.handle_event(button(MouseButton::Left, true));
        assert!(matches!(
            input.handle_event(moved(1.0, 0.0)),
            Some(HaloCommand::PanCamera { .. })
        ));

        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(0.0, 0.0));
        let _ = input.handle_event(button(MouseButton::Right, true));
        assert!(matches!(
            input.handle_event(moved(0.0, 2.0)),
            Some(HaloCommand::PanCamera { .. })
        ));
    }

    #[test]
    fn first_move_after_leaving_has_no_delta() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(0.0, 0.0));
        let _ = input.handle_event(button(MouseButton::Left, true));
        let _ = input.handle_event(InputEvent::CursorLeft);
        assert!(!input.is_dragging());
        assert_eq!(input.handle_event(moved(500.0, 500.0)), None);
    }

    #[test]
    fn scroll_zooms() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::Scroll { delta: -2.0 }),
            Some(HaloCommand::Zoom { delta: -2.0 })
        );
    }

    #[test]
    fn bound_keys_map_to_commands() {
        let input = InputProcessor::new();
        assert_eq!(
            input.handle_key_press("Space"),
            Some(HaloCommand::TogglePause)
        );
        assert_eq!(
            input.handle_key_press("KeyQ"),
            Some(HaloCommand::ResetCamera)
        );
        assert_eq!(input.handle_key_press("KeyZ"), None);
    }
}
