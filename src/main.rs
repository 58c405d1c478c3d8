extern crate portmidi as pm;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use env_logger::Env;
use midi_feeder::{list_devices, midi, print_devices, Cli, EventLoop, SdlSignals, UinputJoystick};
use std::io;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    // Initialize the PortMidi context.
    let context =
        pm::PortMidi::new().map_err(|e| anyhow!("initializing PortMidi: {:?}", e))?;

    // If the user just wants the device list, print it and leave.
    if cli.list {
        let devices = list_devices(&context).context("listing MIDI devices")?;
        print_devices(&mut io::stdout().lock(), &devices)?;
        return Ok(());
    }

    let signals = SdlSignals::new(cli.window).context("initializing SDL events")?;
    let joystick = UinputJoystick::create(&cli.name).context("creating virtual joystick")?;

    for device in list_devices(&context).context("listing MIDI devices")? {
        log::debug!("{}", device);
    }
    let input_id = cli
        .input()
        .resolve_with(&context)
        .context("choosing MIDI input")?;
    log::info!("Using input_id: {}", input_id);
    let input = midi::open_input(&context, input_id)
        .with_context(|| format!("opening MIDI input {}", input_id))?;

    let mut event_loop = EventLoop::new(signals, input, joystick, cli.loop_config());
    event_loop.run()?;
    event_loop.shutdown()?;
    Ok(())
}
