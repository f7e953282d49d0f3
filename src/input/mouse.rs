use glam::Vec2;

/// Pointer travel (pixels) between press and release beyond which the
/// gesture is a drag rather than a click.
pub(crate) const DRAG_THRESHOLD: f32 = 3.0;

/// Tracks cursor position and the press-to-release drag state of one
/// button at a time.
#[derive(Debug, Clone, Default)]
pub(crate) struct InputState {
    pub mouse_pos: Vec2,
    press_pos: Option<Vec2>,
    is_dragging: bool,
}

impl InputState {
    /// Update cursor position. Returns the movement since the last update,
    /// and flips into dragging once the press travel exceeds the threshold.
    pub fn handle_mouse_position(&mut self, pos: Vec2) -> Vec2 {
        let delta = pos - self.mouse_pos;
        self.mouse_pos = pos;
        if let Some(press) = self.press_pos {
            if press.distance(pos) > DRAG_THRESHOLD {
                self.is_dragging = true;
            }
        }
        delta
    }

    /// Record the press position.
    pub fn handle_mouse_down(&mut self) {
        self.press_pos = Some(self.mouse_pos);
        self.is_dragging = false;
    }

    /// End the gesture. Returns `true` for a click (press without drag).
    pub fn handle_mouse_up(&mut self) -> bool {
        let was_pressed = self.press_pos.take().is_some();
        let was_dragging = std::mem::take(&mut self.is_dragging);
        was_pressed && !was_dragging
    }

    /// Whether a button is held.
    pub fn is_pressed(&self) -> bool {
        self.press_pos.is_some()
    }

    /// Whether the held button has travelled past the drag threshold.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }
}
