// nes-rs binary entrypoint
//
// Parses the command-line surface the core asks for (ROM path, optional
// scale factor, optional log-enable flag), loads the ROM, and drives the
// emulator for a handful of frames to prove the core runs end to end.
// A real host event loop (window, audio device, input mapping) is outside
// this crate's scope; see `Emulator::tick_to_frame`/`audio_pull`/
// `set_buttons` for the interface such a loop would drive.

use nes_rs::Emulator;
use std::env;
use std::process::ExitCode;

struct Args {
    rom_path: String,
    scale: u32,
    log_enabled: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = env::args().skip(1);
    let rom_path = args.next().ok_or("missing ROM path argument")?;

    let mut scale = 1;
    let mut log_enabled = false;

    for arg in args {
        if let Some(value) = arg.strip_prefix("--scale=") {
            scale = value
                .parse()
                .map_err(|_| format!("invalid scale factor: {value}"))?;
        } else if arg == "--log" {
            log_enabled = true;
        } else {
            return Err(format!("unrecognized argument: {arg}"));
        }
    }

    Ok(Args {
        rom_path,
        scale,
        log_enabled,
    })
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    if args.log_enabled {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    log::info!("loading {} at scale {}x", args.rom_path, args.scale);

    let mut emulator = Emulator::new();
    emulator
        .load_rom(&args.rom_path)
        .map_err(|e| format!("failed to load ROM: {e}"))?;

    for frame_index in 0..60 {
        let frame = emulator.tick_to_frame();
        log::debug!("rendered frame {frame_index} ({} bytes)", frame.len());
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
