//! Input handling: event types, key actions, and the input processor that
//! converts raw window events into engine commands.

/// Window-system-independent input events.
pub mod event;
/// Bindable keyboard actions.
pub mod keyboard;
/// Converts raw events into engine commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
