use crate::events::NoteEvent;
use portmidi as pm;
use std::fmt;

/// Events read from the input per poll.
pub const READ_BATCH: usize = 10;
pub const INPUT_BUFFER_SIZE: usize = 1024;

#[derive(Debug)]
pub enum MidiError {
    PortMidi(pm::Error),
    NoDefaultInput,
    NotAnInput(pm::PortMidiDeviceId),
}

impl fmt::Display for MidiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MidiError::PortMidi(e) => write!(f, "PortMidi error: {:?}", e),
            MidiError::NoDefaultInput => write!(f, "no default MIDI input device"),
            MidiError::NotAnInput(id) => write!(f, "MIDI device {} is not an input", id),
        }
    }
}

impl std::error::Error for MidiError {}

impl From<pm::Error> for MidiError {
    fn from(value: pm::Error) -> Self {
        MidiError::PortMidi(value)
    }
}

/// An opened MIDI input that can be polled and read in batches.
pub trait MidiSource {
    fn has_pending(&mut self) -> Result<bool, MidiError>;

    fn read_batch(&mut self, max: usize) -> Result<Vec<NoteEvent>, MidiError>;
}

impl MidiSource for pm::InputPort<'_> {
    fn has_pending(&mut self) -> Result<bool, MidiError> {
        Ok(pm::InputPort::poll(self)?)
    }

    fn read_batch(&mut self, max: usize) -> Result<Vec<NoteEvent>, MidiError> {
        let events = pm::InputPort::read_n(self, max)?.unwrap_or_default();
        Ok(events.into_iter().map(NoteEvent::from).collect())
    }
}

/// Opens `device_id` for input. Output-only devices are refused up front.
pub fn open_input(
    context: &pm::PortMidi,
    device_id: pm::PortMidiDeviceId,
) -> Result<pm::InputPort<'_>, MidiError> {
    let device = context.device(device_id)?;
    if !device.is_input() {
        return Err(MidiError::NotAnInput(device_id));
    }
    log::info!("Opening MIDI input {}: {}", device_id, device.name());
    Ok(context.input_port(device, INPUT_BUFFER_SIZE)?)
}

pub fn default_input_id(context: &pm::PortMidi) -> Result<pm::PortMidiDeviceId, MidiError> {
    context
        .default_input_device_id()
        .map_err(|_| MidiError::NoDefaultInput)
}
