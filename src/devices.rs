use crate::midi::MidiError;
use portmidi as pm;
use std::fmt;
use std::io::{self, Write};

/// One MIDI interface as reported by the MIDI subsystem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceEntry {
    pub index: pm::PortMidiDeviceId,
    /// PortMidi's Rust binding does not surface the host API name.
    pub interface: Option<String>,
    pub name: String,
    pub is_input: bool,
    pub is_output: bool,
    pub is_opened: bool,
}

impl DeviceEntry {
    fn direction_label(&self) -> &'static str {
        // Output wins when a device reports both.
        if self.is_output {
            "(output)"
        } else if self.is_input {
            "(input)"
        } else {
            ""
        }
    }
}

impl fmt::Display for DeviceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:2}: interface: {}, name: {}, opened: {} {}",
            self.index,
            self.interface.as_deref().unwrap_or("-"),
            self.name,
            self.is_opened,
            self.direction_label()
        )
    }
}

impl From<&pm::DeviceInfo> for DeviceEntry {
    fn from(info: &pm::DeviceInfo) -> Self {
        DeviceEntry {
            index: info.id(),
            interface: None,
            name: info.name().to_string(),
            is_input: info.is_input(),
            is_output: info.is_output(),
            is_opened: false,
        }
    }
}

pub fn list_devices(context: &pm::PortMidi) -> Result<Vec<DeviceEntry>, MidiError> {
    let devices = context.devices()?;
    Ok(devices.iter().map(DeviceEntry::from).collect())
}

pub fn print_devices<W: Write>(out: &mut W, devices: &[DeviceEntry]) -> io::Result<()> {
    writeln!(out, "Available MIDI devices:")?;
    for device in devices {
        writeln!(out, "{}", device)?;
    }
    Ok(())
}
