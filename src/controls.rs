//! Keyboard mapping.
//!
//! Matches on both `KeyboardEvent.code` (layout independent) and
//! `KeyboardEvent.key`, so W/S keep working on a Russian layout where the same
//! physical keys produce `ц` / `ы`. Arrow keys are accepted as well.

use crate::flight::FlightInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Up,
    Down,
    Pause,
}

pub fn control_for(code: &str, key: &str) -> Option<Control> {
    match (code, key) {
        ("KeyW" | "ArrowUp", _) | (_, "w" | "W" | "ц" | "Ц") => Some(Control::Up),
        ("KeyS" | "ArrowDown", _) | (_, "s" | "S" | "ы" | "Ы") => Some(Control::Down),
        ("Escape", _) => Some(Control::Pause),
        _ => None,
    }
}

impl FlightInput {
    /// Record a key going down (`pressed = true`) or up. `Pause` is a one-shot
    /// action and does not change held state.
    pub fn apply(&mut self, control: Control, pressed: bool) {
        match control {
            Control::Up => self.up = pressed,
            Control::Down => self.down = pressed,
            Control::Pause => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_codes_and_layout_keys() {
        assert_eq!(control_for("KeyW", "w"), Some(Control::Up));
        assert_eq!(control_for("", "ц"), Some(Control::Up));
        assert_eq!(control_for("ArrowDown", "ArrowDown"), Some(Control::Down));
        assert_eq!(control_for("KeyS", "ы"), Some(Control::Down));
        assert_eq!(control_for("Escape", "Escape"), Some(Control::Pause));
        assert_eq!(control_for("KeyA", "a"), None);
    }

    #[test]
    fn press_and_release_update_held_state() {
        let mut input = FlightInput::default();
        input.apply(Control::Up, true);
        input.apply(Control::Down, true);
        assert!(input.up && input.down);
        input.apply(Control::Up, false);
        input.apply(Control::Pause, true);
        assert_eq!(input, FlightInput { up: false, down: true });
    }
}
