//! Latched logical controls
//!
//! The platform layer feeds press/release events in; the simulation polls.

/// A logical control the knight responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Attack,
}

impl Control {
    pub const ALL: [Control; 5] = [
        Control::Up,
        Control::Down,
        Control::Left,
        Control::Right,
        Control::Attack,
    ];

    /// Map a DOM `KeyboardEvent.code` to a control
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Control::Up),
            "ArrowDown" => Some(Control::Down),
            "ArrowLeft" => Some(Control::Left),
            "ArrowRight" => Some(Control::Right),
            "Space" => Some(Control::Attack),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Control::Up => 0,
            Control::Down => 1,
            Control::Left => 2,
            Control::Right => 3,
            Control::Attack => 4,
        }
    }
}

/// Held state of every control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; 5],
}

impl InputState {
    pub fn press(&mut self, control: Control) {
        self.held[control.index()] = true;
    }

    pub fn release(&mut self, control: Control) {
        self.held[control.index()] = false;
    }

    /// Force every control up (focus or visibility lost, game over)
    pub fn reset(&mut self) {
        self.held = [false; 5];
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.index()]
    }

    pub fn up(&self) -> bool {
        self.is_held(Control::Up)
    }

    pub fn down(&self) -> bool {
        self.is_held(Control::Down)
    }

    pub fn left(&self) -> bool {
        self.is_held(Control::Left)
    }

    pub fn right(&self) -> bool {
        self.is_held(Control::Right)
    }

    pub fn attack(&self) -> bool {
        self.is_held(Control::Attack)
    }

    /// Any of the four directions held
    pub fn any_direction(&self) -> bool {
        self.up() || self.down() || self.left() || self.right()
    }

    /// Builder used by tests and the autopilot
    pub fn with(mut self, control: Control) -> Self {
        self.press(control);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut input = InputState::default();
        input.press(Control::Left);
        assert!(input.left());
        assert!(input.any_direction());
        input.release(Control::Left);
        assert!(!input.left());
        assert!(!input.any_direction());
    }

    #[test]
    fn test_attack_is_not_a_direction() {
        let input = InputState::default().with(Control::Attack);
        assert!(input.attack());
        assert!(!input.any_direction());
    }

    #[test]
    fn test_reset_clears_all() {
        let mut input = InputState::default();
        for control in Control::ALL {
            input.press(control);
        }
        input.reset();
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(Control::from_key_code("Space"), Some(Control::Attack));
        assert_eq!(Control::from_key_code("ArrowUp"), Some(Control::Up));
        assert_eq!(Control::from_key_code("KeyW"), None);
    }
}
