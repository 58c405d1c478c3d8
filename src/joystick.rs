use std::fmt;
use uinput::event::controller::{Controller, JoyStick};
use uinput::event::Event;

pub const DEFAULT_DEVICE_NAME: &str = "midi_feeder joystick";
pub const BUTTON_COUNT: u32 = 12;

#[derive(Debug)]
pub enum JoystickError {
    Uinput(uinput::Error),
    ButtonOutOfRange { button: u32, count: u32 },
}

impl fmt::Display for JoystickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoystickError::Uinput(e) => write!(f, "uinput error: {}", e),
            JoystickError::ButtonOutOfRange { button, count } => {
                write!(f, "button {} outside 1..={}", button, count)
            }
        }
    }
}

impl std::error::Error for JoystickError {}

impl From<uinput::Error> for JoystickError {
    fn from(value: uinput::Error) -> Self {
        JoystickError::Uinput(value)
    }
}

/// Write-only view of a virtual joystick. Buttons are numbered from 1.
pub trait JoystickSink {
    fn button_count(&self) -> u32;

    fn set_button(&mut self, button: u32, pressed: bool) -> Result<(), JoystickError>;

    /// Releases every button.
    fn reset_buttons(&mut self) -> Result<(), JoystickError>;
}

fn joystick_button(button: u32) -> Option<JoyStick> {
    let code = match button {
        1 => JoyStick::Trigger,
        2 => JoyStick::Thumb,
        3 => JoyStick::Thumb2,
        4 => JoyStick::Top,
        5 => JoyStick::Top2,
        6 => JoyStick::Pinkie,
        7 => JoyStick::Base,
        8 => JoyStick::Base2,
        9 => JoyStick::Base3,
        10 => JoyStick::Base4,
        11 => JoyStick::Base5,
        12 => JoyStick::Base6,
        _ => return None,
    };
    Some(code)
}

fn button_event(button: u32) -> Option<Event> {
    joystick_button(button).map(|b| Event::Controller(Controller::JoyStick(b)))
}

/// Virtual joystick backed by a Linux uinput device. The device node is
/// removed when this is dropped.
pub struct UinputJoystick {
    device: uinput::Device,
}

impl UinputJoystick {
    pub fn create(name: &str) -> Result<Self, JoystickError> {
        let mut builder = uinput::default()?.name(name)?;
        for button in 1..=BUTTON_COUNT {
            if let Some(event) = button_event(button) {
                builder = builder.event(event)?;
            }
        }
        let device = builder.create()?;
        log::info!("Created virtual joystick \"{}\" with {} buttons", name, BUTTON_COUNT);

        let mut joystick = Self { device };
        joystick.reset_buttons()?;
        Ok(joystick)
    }
}

impl JoystickSink for UinputJoystick {
    fn button_count(&self) -> u32 {
        BUTTON_COUNT
    }

    fn set_button(&mut self, button: u32, pressed: bool) -> Result<(), JoystickError> {
        let event = button_event(button).ok_or(JoystickError::ButtonOutOfRange {
            button,
            count: BUTTON_COUNT,
        })?;
        self.device.send(event, i32::from(pressed))?;
        self.device.synchronize()?;
        Ok(())
    }

    fn reset_buttons(&mut self) -> Result<(), JoystickError> {
        for button in 1..=BUTTON_COUNT {
            if let Some(event) = button_event(button) {
                self.device.send(event, 0)?;
            }
        }
        self.device.synchronize()?;
        Ok(())
    }
}
