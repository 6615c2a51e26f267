/// Window-system-independent input events.
///
/// The viewer translates winit events into these and feeds them to an
/// [`InputProcessor`](super::InputProcessor), which turns them into
/// [`HaloCommand`](crate::engine::HaloCommand)s:
///
/// ```
/// use halo::input::{InputEvent, InputProcessor};
///
/// let mut input = InputProcessor::new();
/// assert!(input.handle_event(InputEvent::Scroll { delta: 1.0 }).is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to an absolute position in physical pixels.
    CursorMoved {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Cursor left the window; any drag in progress ends.
    CursorLeft,
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel, in lines (positive = zoom in).
    Scroll {
        /// Scroll amount.
        delta: f32,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether a shift key is held.
        shift: bool,
    },
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button; drags orbit the camera.
    Left,
    /// Secondary button; drags pan the camera.
    Right,
    /// Wheel click.
    Middle,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}
