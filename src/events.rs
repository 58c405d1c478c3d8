use portmidi as pm;

pub const NOTE_ON: u8 = 144;
pub const NOTE_OFF: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    NoteOn,
    NoteOff,
    Other(u8),
}

impl From<u8> for NoteKind {
    fn from(status: u8) -> Self {
        match status {
            NOTE_ON => NoteKind::NoteOn,
            NOTE_OFF => NoteKind::NoteOff,
            other => NoteKind::Other(other),
        }
    }
}

/// A MIDI message decoded at the input boundary. Lives for one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub kind: NoteKind,
    pub note: u8,
    pub velocity: u8,
    pub timestamp: u32,
}

impl NoteEvent {
    pub fn new(status: u8, note: u8, velocity: u8, timestamp: u32) -> Self {
        Self {
            kind: NoteKind::from(status),
            note,
            velocity,
            timestamp,
        }
    }
}

impl From<pm::MidiEvent> for NoteEvent {
    fn from(event: pm::MidiEvent) -> Self {
        NoteEvent::new(
            event.message.status,
            event.message.data1,
            event.message.data2,
            event.timestamp,
        )
    }
}

/// Signals from the windowing layer that the loop cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Quit,
    KeyDown,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    KeyDown,
}
