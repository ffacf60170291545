//! Per-frame user input.
//!
//! Window events are translated into a small [`InputEvent`] vocabulary, and
//! [`UserInput`] folds those into a quit flag and an accumulated player
//! position. Shapes never see raw input.

use cgmath::Vector3;
use winit::{
    event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Player units moved per arrow key press
pub const KEY_STEP: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
    Space,
    Other,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::ArrowLeft => Key::Left,
            KeyCode::ArrowRight => Key::Right,
            KeyCode::ArrowUp => Key::Up,
            KeyCode::ArrowDown => Key::Down,
            KeyCode::Escape => Key::Escape,
            KeyCode::Space => Key::Space,
            _ => Key::Other,
        }
    }
}

/// Bit mask of held mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MouseButtons(pub u8);

impl MouseButtons {
    pub const LEFT: MouseButtons = MouseButtons(1);
    pub const MIDDLE: MouseButtons = MouseButtons(2);
    pub const RIGHT: MouseButtons = MouseButtons(4);

    pub fn contains(self, other: MouseButtons) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn set(&mut self, other: MouseButtons, held: bool) {
        if held {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    MouseMove { dx: f32, dy: f32, buttons: MouseButtons },
    MouseWheel(f32),
}

/// Input state accumulated across frames
#[derive(Debug, Clone, PartialEq)]
pub struct UserInput {
    pub player: Vector3<f32>,
    pub quit: bool,
    pub last_key: Option<Key>,
}

impl Default for UserInput {
    fn default() -> Self {
        Self {
            player: Vector3::new(0.0, 0.0, 0.0),
            quit: false,
            last_key: None,
        }
    }
}

impl UserInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Quit => self.quit = true,
            InputEvent::KeyDown(key) => {
                self.last_key = Some(key);
                match key {
                    Key::Escape => self.quit = true,
                    Key::Left => self.player.x -= KEY_STEP,
                    Key::Right => self.player.x += KEY_STEP,
                    Key::Up => self.player.y -= KEY_STEP,
                    Key::Down => self.player.y += KEY_STEP,
                    Key::Space | Key::Other => {}
                }
            }
            InputEvent::MouseMove { dx, dy, buttons } => {
                if buttons.contains(MouseButtons::LEFT) {
                    self.player.x += dx;
                    self.player.y -= dy;
                }
            }
            InputEvent::MouseWheel(delta) => self.player.z += delta,
        }
    }
}

/// Wheel movement in lines; pixel deltas are taken as-is
pub fn wheel_delta(delta: &MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => *y,
        MouseScrollDelta::PixelDelta(p) => p.y as f32,
    }
}

/// Turns winit events into [`InputEvent`]s, tracking held mouse buttons
#[derive(Debug, Default)]
pub struct InputTranslator {
    buttons: MouseButtons,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    pub fn window_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CloseRequested => Some(InputEvent::Quit),
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(code) if event.state == ElementState::Pressed => {
                    Some(InputEvent::KeyDown(code.into()))
                }
                _ => None,
            },
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_button(*button, *state == ElementState::Pressed);
                None
            }
            WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::MouseWheel(wheel_delta(delta))),
            _ => None,
        }
    }

    pub fn device_event(&mut self, event: &DeviceEvent) -> Option<InputEvent> {
        match event {
            DeviceEvent::MouseMotion { delta } => Some(InputEvent::MouseMove {
                dx: delta.0 as f32,
                dy: delta.1 as f32,
                buttons: self.buttons,
            }),
            _ => None,
        }
    }

    pub fn mouse_button(&mut self, button: MouseButton, held: bool) {
        let mask = match button {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Middle => MouseButtons::MIDDLE,
            MouseButton::Right => MouseButtons::RIGHT,
            _ => return,
        };
        self.buttons.set(mask, held);
    }
}
