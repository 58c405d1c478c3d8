use crate::events::{NoteEvent, NoteKind, Signal, StopReason};
use crate::joystick::{JoystickError, JoystickSink};
use crate::midi::{MidiError, MidiSource, READ_BATCH};
use crate::remap::Calibration;
use crate::ui::SignalSource;
use std::fmt;
use std::thread;
use std::time::Duration;

pub const DEFAULT_IDLE_SLEEP: Duration = Duration::from_millis(2);

#[derive(Debug)]
pub enum LoopError {
    Midi(MidiError),
    Joystick(JoystickError),
}

impl fmt::Display for LoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopError::Midi(e) => write!(f, "MIDI input failed: {}", e),
            LoopError::Joystick(e) => write!(f, "virtual joystick failed: {}", e),
        }
    }
}

impl std::error::Error for LoopError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoopError::Midi(e) => Some(e),
            LoopError::Joystick(e) => Some(e),
        }
    }
}

impl From<MidiError> for LoopError {
    fn from(value: MidiError) -> Self {
        LoopError::Midi(value)
    }
}

impl From<JoystickError> for LoopError {
    fn from(value: JoystickError) -> Self {
        LoopError::Joystick(value)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    pub calibration: Calibration,
    pub idle_sleep: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            calibration: Calibration::default(),
            idle_sleep: DEFAULT_IDLE_SLEEP,
        }
    }
}

/// Translates MIDI notes into joystick button presses until a quit or key-down
/// signal arrives.
pub struct EventLoop<S, M, J> {
    signals: S,
    midi: M,
    joystick: J,
    config: LoopConfig,
}

impl<S, M, J> EventLoop<S, M, J>
where
    S: SignalSource,
    M: MidiSource,
    J: JoystickSink,
{
    pub fn new(signals: S, midi: M, joystick: J, config: LoopConfig) -> Self {
        Self {
            signals,
            midi,
            joystick,
            config,
        }
    }

    /// Runs until stopped. Device errors end the loop and are returned as-is.
    pub fn run(&mut self) -> Result<StopReason, LoopError> {
        log::info!("Logging started:");
        loop {
            if let Some(reason) = self.step()? {
                log::info!("Stopping on {:?}", reason);
                return Ok(reason);
            }
        }
    }

    /// One iteration. Returns the stop reason once a stop signal is seen; MIDI is
    /// not polled in that iteration.
    pub fn step(&mut self) -> Result<Option<StopReason>, LoopError> {
        for signal in self.signals.drain() {
            match signal {
                Signal::Quit => return Ok(Some(StopReason::Quit)),
                Signal::KeyDown => return Ok(Some(StopReason::KeyDown)),
                Signal::Other => {}
            }
        }

        if self.midi.has_pending()? {
            for event in self.midi.read_batch(READ_BATCH)? {
                self.handle_note(event)?;
            }
        } else if !self.config.idle_sleep.is_zero() {
            thread::sleep(self.config.idle_sleep);
        }
        Ok(None)
    }

    fn handle_note(&mut self, event: NoteEvent) -> Result<(), LoopError> {
        let pressed = match event.kind {
            NoteKind::NoteOn => {
                log::info!("note {} on", event.note);
                true
            }
            NoteKind::NoteOff => {
                log::info!("note {} off", event.note);
                false
            }
            NoteKind::Other(status) => {
                log::trace!("dropping status {} (data1 {})", status, event.note);
                return Ok(());
            }
        };

        let button = self.config.calibration.button_for(event.note);
        let count = self.joystick.button_count();
        let button = match u32::try_from(button) {
            Ok(b) if (1..=count).contains(&b) => b,
            _ => {
                log::warn!(
                    "note {} maps to button {}, outside 1..={}; ignored",
                    event.note,
                    button,
                    count
                );
                return Ok(());
            }
        };

        self.joystick.set_button(button, pressed)?;
        if pressed {
            log::info!("You pressed button {}", button);
        } else {
            log::info!("You released button {}", button);
        }
        Ok(())
    }

    /// Releases all buttons and hands back the devices.
    pub fn shutdown(mut self) -> Result<(S, M, J), LoopError> {
        self.joystick.reset_buttons()?;
        Ok((self.signals, self.midi, self.joystick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{NOTE_OFF, NOTE_ON};
    use std::collections::VecDeque;

    #[derive(Default)]
    struct ScriptedSignals {
        batches: VecDeque<Vec<Signal>>,
    }

    impl ScriptedSignals {
        fn then(mut self, batch: Vec<Signal>) -> Self {
            self.batches.push_back(batch);
            self
        }
    }

    impl SignalSource for ScriptedSignals {
        fn drain(&mut self) -> Vec<Signal> {
            // Quit once the script runs out so `run` always terminates.
            self.batches.pop_front().unwrap_or_else(|| vec![Signal::Quit])
        }
    }

    #[derive(Default)]
    struct ScriptedMidi {
        batches: VecDeque<Vec<NoteEvent>>,
        polls: usize,
        fail: bool,
    }

    impl ScriptedMidi {
        fn with(batches: Vec<Vec<NoteEvent>>) -> Self {
            Self {
                batches: batches.into(),
                ..Default::default()
            }
        }
    }

    impl MidiSource for ScriptedMidi {
        fn has_pending(&mut self) -> Result<bool, MidiError> {
            self.polls += 1;
            if self.fail {
                return Err(MidiError::NoDefaultInput);
            }
            Ok(self.batches.front().map_or(false, |b| !b.is_empty()))
        }

        fn read_batch(&mut self, max: usize) -> Result<Vec<NoteEvent>, MidiError> {
            let batch = self.batches.front_mut().expect("read without pending input");
            let taken: Vec<NoteEvent> = batch.drain(..batch.len().min(max)).collect();
            if batch.is_empty() {
                self.batches.pop_front();
            }
            Ok(taken)
        }
    }

    #[derive(Default)]
    struct RecordingJoystick {
        calls: Vec<(u32, bool)>,
        resets: usize,
    }

    impl JoystickSink for RecordingJoystick {
        fn button_count(&self) -> u32 {
            8
        }

        fn set_button(&mut self, button: u32, pressed: bool) -> Result<(), JoystickError> {
            self.calls.push((button, pressed));
            Ok(())
        }

        fn reset_buttons(&mut self) -> Result<(), JoystickError> {
            self.resets += 1;
            Ok(())
        }
    }

    fn on(note: u8) -> NoteEvent {
        NoteEvent::new(NOTE_ON, note, 100, 0)
    }

    fn off(note: u8) -> NoteEvent {
        NoteEvent::new(NOTE_OFF, note, 0, 0)
    }

    fn config() -> LoopConfig {
        LoopConfig {
            idle_sleep: Duration::ZERO,
            ..LoopConfig::default()
        }
    }

    fn run_with(
        signals: ScriptedSignals,
        midi: ScriptedMidi,
    ) -> (StopReason, ScriptedMidi, RecordingJoystick) {
        let mut event_loop = EventLoop::new(signals, midi, RecordingJoystick::default(), config());
        let reason = event_loop.run().unwrap();
        let (_, midi, joystick) = (event_loop.signals, event_loop.midi, event_loop.joystick);
        (reason, midi, joystick)
    }

    #[test]
    fn note_on_lowest_pad_presses_button_one() {
        let signals = ScriptedSignals::default().then(vec![]);
        let (_, _, joystick) = run_with(signals, ScriptedMidi::with(vec![vec![on(36)]]));
        assert_eq!(joystick.calls, vec![(1, true)]);
    }

    #[test]
    fn note_on_highest_pad_presses_button_eight() {
        let signals = ScriptedSignals::default().then(vec![]);
        let (_, _, joystick) = run_with(signals, ScriptedMidi::with(vec![vec![on(43)]]));
        assert_eq!(joystick.calls, vec![(8, true)]);
    }

    #[test]
    fn note_off_releases_the_remapped_button() {
        let signals = ScriptedSignals::default().then(vec![]);
        let (_, _, joystick) = run_with(signals, ScriptedMidi::with(vec![vec![off(40)]]));
        assert_eq!(joystick.calls, vec![(5, false)]);
    }

    #[test]
    fn other_statuses_have_no_effect() {
        let cc = NoteEvent::new(0xB0, 38, 64, 0);
        let note_on_ch2 = NoteEvent::new(0x91, 38, 64, 0);
        let signals = ScriptedSignals::default().then(vec![]);
        let (_, _, joystick) =
            run_with(signals, ScriptedMidi::with(vec![vec![cc, note_on_ch2, on(37)]]));
        assert_eq!(joystick.calls, vec![(2, true)]);
    }

    #[test]
    fn reads_at_most_ten_events_per_iteration() {
        let batch: Vec<NoteEvent> = (0..12).map(|i| on(36 + (i % 8) as u8)).collect();
        let signals = ScriptedSignals::default().then(vec![]);
        let (_, midi, joystick) = run_with(signals, ScriptedMidi::with(vec![batch]));
        assert_eq!(joystick.calls.len(), 10);
        assert_eq!(midi.batches.front().map(Vec::len), Some(2));
    }

    #[test]
    fn quit_stops_before_midi_is_polled() {
        let signals = ScriptedSignals::default().then(vec![Signal::Quit, Signal::KeyDown]);
        let (reason, midi, joystick) = run_with(signals, ScriptedMidi::with(vec![vec![on(36)]]));
        assert_eq!(reason, StopReason::Quit);
        assert_eq!(midi.polls, 0);
        assert!(joystick.calls.is_empty());
    }

    #[test]
    fn key_down_after_other_signals_stops_the_loop() {
        let signals = ScriptedSignals::default()
            .then(vec![])
            .then(vec![Signal::Other, Signal::KeyDown]);
        let midi = ScriptedMidi::with(vec![vec![on(36)], vec![off(36)]]);
        let (reason, midi, joystick) = run_with(signals, midi);
        assert_eq!(reason, StopReason::KeyDown);
        assert_eq!(midi.polls, 1);
        assert_eq!(joystick.calls, vec![(1, true)]);
    }

    #[test]
    fn out_of_range_buttons_are_skipped() {
        let signals = ScriptedSignals::default().then(vec![]);
        let midi = ScriptedMidi::with(vec![vec![on(35), on(44), on(20), on(38)]]);
        let (_, _, joystick) = run_with(signals, midi);
        assert_eq!(joystick.calls, vec![(3, true)]);
    }

    #[test]
    fn midi_errors_end_the_loop() {
        let midi = ScriptedMidi {
            fail: true,
            ..Default::default()
        };
        let signals = ScriptedSignals::default().then(vec![]);
        let mut event_loop = EventLoop::new(signals, midi, RecordingJoystick::default(), config());
        match event_loop.run() {
            Err(LoopError::Midi(MidiError::NoDefaultInput)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn shutdown_releases_all_buttons() {
        let event_loop = EventLoop::new(
            ScriptedSignals::default(),
            ScriptedMidi::default(),
            RecordingJoystick::default(),
            config(),
        );
        let (_, _, joystick) = event_loop.shutdown().unwrap();
        assert_eq!(joystick.resets, 1);
    }
}
