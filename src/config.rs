use crate::event_loop::LoopConfig;
use crate::joystick::DEFAULT_DEVICE_NAME;
use crate::midi::{self, MidiError};
use clap::Parser;
use portmidi as pm;
use std::time::Duration;

/// Control a virtual joystick with a MIDI pad controller.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "midi_feeder")]
pub struct Cli {
    /// MIDI device ID to listen for events on (default: system default input)
    #[arg(short = 'm')]
    pub midi_device: Option<pm::PortMidiDeviceId>,

    /// List available MIDI devices and their IDs, then exit
    #[arg(short = 'l')]
    pub list: bool,

    /// Name of the virtual joystick device
    #[arg(long, default_value = DEFAULT_DEVICE_NAME)]
    pub name: String,

    /// Sleep between polls when no MIDI input is pending, in milliseconds
    #[arg(long, default_value_t = 2)]
    pub poll_ms: u64,

    /// Open a small window so key presses can stop the program
    #[arg(long, default_value_t = false)]
    pub window: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSelection {
    Explicit(pm::PortMidiDeviceId),
    Default,
}

impl InputSelection {
    /// Resolves to a concrete device id. Only `Default` consults the MIDI subsystem.
    pub fn resolve<F>(self, default_id: F) -> Result<pm::PortMidiDeviceId, MidiError>
    where
        F: FnOnce() -> Result<pm::PortMidiDeviceId, MidiError>,
    {
        match self {
            InputSelection::Explicit(id) => Ok(id),
            InputSelection::Default => default_id(),
        }
    }

    pub fn resolve_with(self, context: &pm::PortMidi) -> Result<pm::PortMidiDeviceId, MidiError> {
        self.resolve(|| midi::default_input_id(context))
    }
}

impl Cli {
    pub fn input(&self) -> InputSelection {
        self.midi_device
            .map_or(InputSelection::Default, InputSelection::Explicit)
    }

    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            idle_sleep: Duration::from_millis(self.poll_ms),
            ..LoopConfig::default()
        }
    }
}
