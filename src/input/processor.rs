//! Converts raw platform events into scene commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! drag detection, modifier keys, viewport size). It is the only thing that
//! sits between raw window events and the scene's
//! [`execute`](crate::scene::TieredScene::execute) method, and it clamps
//! every pick position to the viewport before the picking layer sees it.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::mouse::InputState;
use crate::camera::Viewport;

/// A camera or picking action produced from input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneCommand {
    /// Pick at a pointer position already clamped to the viewport.
    Pick {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Orbit the camera by a pointer delta in pixels.
    Orbit(Vec2),
    /// Pan the camera by a pointer delta in pixels.
    Pan(Vec2),
    /// Zoom the camera (positive = closer).
    Zoom(f32),
    /// Resize the drawing surface.
    Resize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
}

/// Converts raw window events into [`SceneCommand`]s.
///
/// A left press and release without a drag produces
/// [`SceneCommand::Pick`]. Dragging with the left button orbits, with the
/// right button (or shift + left) pans.
#[derive(Debug, Clone)]
pub struct InputProcessor {
    /// Cursor tracking and drag state.
    state: InputState,
    /// Button that started the current gesture.
    active_button: Option<MouseButton>,
    /// Whether the shift modifier is currently held.
    shift_pressed: bool,
    viewport: Viewport,
}

impl InputProcessor {
    /// Create a processor for a surface of the given size.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: InputState::default(),
            active_button: None,
            shift_pressed: false,
            viewport,
        }
    }

    /// Current cursor position in physical pixels, clamped to the viewport.
    #[must_use]
    pub fn mouse_pos(&self) -> (f32, f32) {
        let pos = self.state.mouse_pos;
        self.viewport.clamp(pos.x, pos.y)
    }

    /// Whether a mouse button is held.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.state.is_pressed()
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// Viewport used for clamping.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<SceneCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y))
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => Some(SceneCommand::Zoom(delta)),
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
            InputEvent::Resized { width, height } => {
                self.viewport = Viewport::new(width, height);
                Some(SceneCommand::Resize {
                    width: self.viewport.width,
                    height: self.viewport.height,
                })
            }
        }
    }

    /// Cursor moved: compute delta, possibly produce a camera command.
    fn handle_cursor_moved(&mut self, pos: Vec2) -> Option<SceneCommand> {
        let delta = self.state.handle_mouse_position(pos);
        if !self.state.is_dragging() {
            return None;
        }
        match self.active_button? {
            MouseButton::Left if !self.shift_pressed => {
                Some(SceneCommand::Orbit(delta))
            }
            MouseButton::Left | MouseButton::Right => {
                Some(SceneCommand::Pan(delta))
            }
            MouseButton::Middle => None,
        }
    }

    /// Mouse button press/release: track state, produce a pick on a
    /// left click.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<SceneCommand> {
        if pressed {
            if self.active_button.is_none() {
                self.active_button = Some(button);
                self.state.handle_mouse_down();
            }
            return None;
        }

        if self.active_button != Some(button) {
            return None;
        }
        self.active_button = None;
        let clicked = self.state.handle_mouse_up();
        if clicked && button == MouseButton::Left {
            let (x, y) = self.mouse_pos();
            return Some(SceneCommand::Pick { x, y });
        }
        None
    }
}
