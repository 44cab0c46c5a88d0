use brailleboard::{
    args::{
        BoardArgs,
        CommandTask::{Decode, Monitor, Ports, Render, Replay},
        DecodeCommand, MonitorCommand, ReplayCommand,
    },
    component::run_component,
    decoder::BrailleDecoder,
    dummy_device::DummyDevice,
    frame_queue::FrameQueue,
    frame_script::FrameScript,
    gui::{device_selector, typing_monitor},
    renderer::render_text,
    serial_device::SerialDevice,
    transport::BrailleTransport,
    typed_line::TypedLine,
};

use clap::Parser;
use log::{error, info};
use std::{error::Error, path::PathBuf, sync::mpsc::channel, time::Duration};

// Example:
// cargo run -- monitor --port /dev/ttyACM0 --mode letters
// cargo run -- decode 0x32 0x14 OK
// cargo run -- render "hello world"
// cargo run -- replay session.frames --interval 20 --noise 0.1

fn main() {
    env_logger::init();
    let args = BoardArgs::parse();

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: BoardArgs) -> Result<(), Box<dyn Error>> {
    match args.command {
        Ports => {
            println!("Available devices:");
            for port in SerialDevice::available_ports() {
                println!("\t{}", port.to_string_lossy());
            }
        }
        Monitor(cmd) => monitor(cmd)?,
        Decode(cmd) => decode(cmd),
        Render(cmd) => println!("{}", render_text(&cmd.text.join(" "))),
        Replay(cmd) => replay(cmd)?,
    }
    Ok(())
}

fn monitor(cmd: MonitorCommand) -> Result<(), Box<dyn Error>> {
    let config = cmd.resolve_config()?;

    let port = match &config.port {
        Some(port) => PathBuf::from(port),
        None => match device_selector(SerialDevice::available_ports())? {
            Some(port) => port,
            None => return Ok(()),
        },
    };

    let mut device = SerialDevice::new(port)
        .with_baud_rate(config.baud_rate)
        .with_read_timeout(config.read_timeout());
    let frames = FrameQueue::new();
    let _subscription = frames.attach(device.bus());

    if !device.connect() {
        return Err(format!("could not open {}", device.path().display()).into());
    }

    let line = typing_monitor(frames, BrailleDecoder::new(config.mode))?;
    device.disconnect();

    println!("{}", line.text());
    println!("{}", line.glyphs());
    Ok(())
}

fn decode(cmd: DecodeCommand) {
    let decoder = BrailleDecoder::new(cmd.mode);
    for frame in cmd.frames {
        println!("{:#010b} -> {}", frame, decoder.decode(frame));
    }
}

fn replay(cmd: ReplayCommand) -> Result<(), Box<dyn Error>> {
    let script = FrameScript::from_path(&cmd.script)?;
    info!("Replaying {} frames from {}", script.frames().len(), cmd.script.display());

    let mut device = DummyDevice::builder().noise(cmd.noise).build();

    let (frame_tx, frame_rx) = channel();
    let (event_tx, event_rx) = channel();
    let subscription = device.subscribe(Box::new(move |frame| {
        let _ = frame_tx.send(frame);
    }));
    let decoder = run_component(Box::new(BrailleDecoder::new(cmd.mode)), frame_rx, event_tx);

    device.connect();
    device.play(script.into_frames(), Duration::from_millis(cmd.interval_ms));
    device.wait();
    device.disconnect();

    // Dropping the subscription drops the last frame sender, which lets the
    // decoder thread finish and close the event channel.
    drop(subscription);

    let mut line = TypedLine::new();
    for event in event_rx {
        println!("{}", event);
        line.apply(&event);
    }
    if decoder.join().is_err() {
        return Err("decoder thread panicked".into());
    }

    println!("{}", line.text());
    println!("{}", line.glyphs());
    Ok(())
}
