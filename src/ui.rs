extern crate sdl2;

use crate::events::Signal;
use sdl2::event::Event;
use std::fmt;

const WINDOW_TITLE: &str = "midi_feeder";
const WINDOW_SIZE: (u32, u32) = (240, 80);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalError(pub String);

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SDL error: {}", self.0)
    }
}

impl std::error::Error for SignalError {}

impl From<String> for SignalError {
    fn from(value: String) -> Self {
        SignalError(value)
    }
}

/// Source of quit/key signals from the windowing layer.
pub trait SignalSource {
    /// Everything pending since the last call, oldest first.
    fn drain(&mut self) -> Vec<Signal>;
}

pub fn signal_from(event: &Event) -> Signal {
    match event {
        Event::Quit { .. } => Signal::Quit,
        Event::KeyDown { .. } => Signal::KeyDown,
        _ => Signal::Other,
    }
}

/// SDL2 event pump. SDL turns SIGINT into a quit event, so Ctrl-C stops the loop.
pub struct SdlSignals {
    pump: sdl2::EventPump,
    _window: Option<sdl2::video::Window>,
    _context: sdl2::Sdl,
}

impl SdlSignals {
    /// With `with_window` set a small window is opened; key presses only reach
    /// SDL while one of its windows has focus.
    pub fn new(with_window: bool) -> Result<Self, SignalError> {
        let context = sdl2::init()?;
        let window = if with_window {
            let video = context.video()?;
            let window = video
                .window(WINDOW_TITLE, WINDOW_SIZE.0, WINDOW_SIZE.1)
                .position_centered()
                .build()
                .map_err(|e| format!("can't open window: {}", e))?;
            Some(window)
        } else {
            None
        };
        let pump = context.event_pump()?;
        Ok(Self {
            pump,
            _window: window,
            _context: context,
        })
    }
}

impl SignalSource for SdlSignals {
    fn drain(&mut self) -> Vec<Signal> {
        self.pump.poll_iter().map(|e| signal_from(&e)).collect()
    }
}
