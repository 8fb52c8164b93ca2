// Input collection for the orrery

use glam::Vec2;
use winit::event::{ElementState, KeyEvent, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels of touchpad scroll that count as one wheel line.
const PIXELS_PER_LINE: f32 = 40.0;

/// Held movement keys. Any combination may be held; opposing keys cancel out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub sprint: bool,
}

/// Continuous input gathered over one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub movement: MovementIntent,
    /// Mouse motion in screen space, +y pointing down.
    pub mouse_delta: Vec2,
    /// Wheel lines, positive away from the user.
    pub scroll_delta: f32,
}

/// Key-edge commands handled once per press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    LockBody(String),
    CycleLock,
    Unlock,
    SelectSpeed(usize),
    ToggleFullscreen,
    Quit,
}

/// Accumulates winit events between frames.
#[derive(Debug, Default)]
pub struct InputState {
    movement: MovementIntent,
    mouse_delta: Vec2,
    scroll_delta: f32,
    // Default is focused.
    unfocused: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates held keys and returns the command bound to a fresh key press.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<InputAction> {
        self.handle_key_code(event.physical_key, event.state, event.repeat)
    }

    pub fn handle_key_code(
        &mut self,
        key: PhysicalKey,
        state: ElementState,
        repeat: bool,
    ) -> Option<InputAction> {
        let PhysicalKey::Code(keycode) = key else {
            return None;
        };
        let is_pressed = state == ElementState::Pressed;
        match keycode {
            KeyCode::KeyW => self.movement.forward = is_pressed,
            KeyCode::KeyS => self.movement.backward = is_pressed,
            KeyCode::KeyA => self.movement.left = is_pressed,
            KeyCode::KeyD => self.movement.right = is_pressed,
            KeyCode::Space => self.movement.up = is_pressed,
            KeyCode::ShiftLeft => self.movement.down = is_pressed,
            KeyCode::ControlLeft => self.movement.sprint = is_pressed,
            _ => {}
        }
        if !is_pressed || repeat {
            return None;
        }
        action_for_key(keycode)
    }

    /// Raw device motion, unaffected by cursor confinement.
    /// Raw device motion also arrives while another window has focus, so it is dropped then.
    pub fn handle_mouse_motion(&mut self, dx: f64, dy: f64) {
        if self.unfocused {
            return;
        }
        self.mouse_delta += Vec2::new(dx as f32, dy as f32);
    }

    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll_delta += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
        };
    }

    /// Drops held keys, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.movement = MovementIntent::default();
    }

    /// Losing focus releases held keys and discards pending deltas.
    pub fn set_focused(&mut self, focused: bool) {
        self.unfocused = !focused;
        if !focused {
            self.release_all();
            self.mouse_delta = Vec2::ZERO;
            self.scroll_delta = 0.0;
        }
    }

    /// Returns this frame's input and resets the accumulated deltas.
    pub fn take_frame(&mut self) -> FrameInput {
        let frame = FrameInput {
            movement: self.movement,
            mouse_delta: self.mouse_delta,
            scroll_delta: self.scroll_delta,
        };
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
        frame
    }
}

/// Discrete command bound to a key, if any.
pub fn action_for_key(keycode: KeyCode) -> Option<InputAction> {
    let action = match keycode {
        KeyCode::Digit1 => InputAction::SelectSpeed(0),
        KeyCode::Digit2 => InputAction::SelectSpeed(1),
        KeyCode::Digit3 => InputAction::SelectSpeed(2),
        KeyCode::Digit4 => InputAction::SelectSpeed(3),
        KeyCode::Digit5 => InputAction::SelectSpeed(4),
        KeyCode::KeyE => InputAction::LockBody("Earth".to_string()),
        KeyCode::KeyM => InputAction::LockBody("Mars".to_string()),
        KeyCode::Tab => InputAction::CycleLock,
        KeyCode::KeyN => InputAction::Unlock,
        KeyCode::F11 => InputAction::ToggleFullscreen,
        KeyCode::Escape => InputAction::Quit,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn number_keys_select_speed_presets() {
        assert_eq!(action_for_key(KeyCode::Digit1), Some(InputAction::SelectSpeed(0)));
        assert_eq!(action_for_key(KeyCode::Digit5), Some(InputAction::SelectSpeed(4)));
    }

    #[test]
    fn lock_keys_name_their_bodies() {
        assert_eq!(
            action_for_key(KeyCode::KeyE),
            Some(InputAction::LockBody("Earth".into()))
        );
        assert_eq!(action_for_key(KeyCode::KeyN), Some(InputAction::Unlock));
        assert_eq!(action_for_key(KeyCode::KeyW), None);
    }

    fn press(input: &mut InputState, code: KeyCode, repeat: bool) -> Option<InputAction> {
        input.handle_key_code(PhysicalKey::Code(code), ElementState::Pressed, repeat)
    }

    fn release(input: &mut InputState, code: KeyCode) -> Option<InputAction> {
        input.handle_key_code(PhysicalKey::Code(code), ElementState::Released, false)
    }

    #[test]
    fn actions_fire_once_per_press() {
        let mut input = InputState::new();
        assert_eq!(press(&mut input, KeyCode::F11, false), Some(InputAction::ToggleFullscreen));
        assert_eq!(press(&mut input, KeyCode::F11, true), None);
        assert_eq!(press(&mut input, KeyCode::F11, true), None);
        assert_eq!(release(&mut input, KeyCode::F11), None);
        assert_eq!(press(&mut input, KeyCode::F11, false), Some(InputAction::ToggleFullscreen));
    }

    #[test]
    fn movement_keys_are_held_until_released() {
        let mut input = InputState::new();
        assert_eq!(press(&mut input, KeyCode::KeyW, false), None);
        assert_eq!(press(&mut input, KeyCode::ControlLeft, false), None);
        assert!(press(&mut input, KeyCode::KeyW, true).is_none());
        let held = input.take_frame().movement;
        assert!(held.forward && held.sprint);

        release(&mut input, KeyCode::KeyW);
        let held = input.take_frame().movement;
        assert!(!held.forward);
        assert!(held.sprint);
    }

    #[test]
    fn unidentified_keys_are_ignored() {
        let mut input = InputState::new();
        let key = PhysicalKey::Unidentified(winit::keyboard::NativeKeyCode::Unidentified);
        assert_eq!(input.handle_key_code(key, ElementState::Pressed, false), None);
        assert_eq!(input.take_frame().movement, MovementIntent::default());
    }

    #[test]
    fn take_frame_drains_deltas_but_keeps_held_keys() {
        let mut input = InputState::new();
        input.movement.forward = true;
        input.handle_mouse_motion(3.0, -2.0);
        input.handle_mouse_motion(1.0, 1.0);
        input.handle_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        input.handle_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 40.0)));

        let frame = input.take_frame();
        assert_eq!(frame.mouse_delta, Vec2::new(4.0, -1.0));
        assert_eq!(frame.scroll_delta, 2.0);
        assert!(frame.movement.forward);

        let next = input.take_frame();
        assert_eq!(next.mouse_delta, Vec2::ZERO);
        assert_eq!(next.scroll_delta, 0.0);
        assert!(next.movement.forward);
    }

    #[test]
    fn release_all_clears_movement() {
        let mut input = InputState::new();
        input.movement.left = true;
        input.movement.sprint = true;
        input.release_all();
        assert_eq!(input.take_frame().movement, MovementIntent::default());
    }

    #[test]
    fn mouse_motion_is_dropped_while_unfocused() {
        let mut input = InputState::new();
        input.handle_mouse_motion(2.0, 2.0);
        press(&mut input, KeyCode::KeyW, false);
        input.set_focused(false);
        input.handle_mouse_motion(50.0, -50.0);
        let frame = input.take_frame();
        assert_eq!(frame.mouse_delta, Vec2::ZERO);
        assert_eq!(frame.movement, MovementIntent::default());

        input.set_focused(true);
        input.handle_mouse_motion(1.0, 0.5);
        assert_eq!(input.take_frame().mouse_delta, Vec2::new(1.0, 0.5));
    }
}
