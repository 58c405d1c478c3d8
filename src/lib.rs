pub mod config;
pub mod devices;
pub mod event_loop;
pub mod events;
pub mod joystick;
pub mod midi;
pub mod remap;
pub mod ui;

pub use config::{Cli, InputSelection};
pub use devices::{list_devices, print_devices, DeviceEntry};
pub use event_loop::{EventLoop, LoopConfig, LoopError};
pub use events::{NoteEvent, NoteKind, Signal, StopReason};
pub use joystick::{JoystickSink, UinputJoystick};
pub use midi::MidiSource;
pub use remap::{remap, Calibration};
pub use ui::{SdlSignals, SignalSource};
