use std::fs;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context};
use log::info;
use rand::SeedableRng;

use chip8_core::{Chip8, Keypad, Pcg};

use crate::Args;

pub fn run(args: &Args) -> anyhow::Result<()> {
    ensure!(args.frame_rate > 0, "frame rate must be at least 1");

    let mut chip8 = if args.random_seed {
        Chip8::from_rng(Pcg::from_entropy())
    } else {
        Chip8::with_seed(args.seed)
    };

    // Load ROM
    let rom = fs::read(&args.rom).with_context(|| format!("unable to read {}", args.rom.display()))?;
    chip8
        .load_rom(&rom)
        .with_context(|| format!("unable to load {}", args.rom.display()))?;

    let mut keypad = Keypad::new();
    for &key in &args.hold {
        keypad.press(key)?;
    }

    // Set initial timing
    let frame_time = Duration::from_secs(1) / args.frame_rate;
    let started = Instant::now();
    let mut last_frame = started;
    let mut frames = 0;

    while frames < args.frames {
        let now = Instant::now();
        let delta = now - last_frame;
        last_frame = now;

        let tick = chip8
            .run_cycle_batch(args.cycles, &keypad, delta.as_secs_f64())
            .with_context(|| format!("halted after {} frames", frames))?;
        frames += 1;
        if tick.sound_stopped {
            info!("sound stopped on frame {}", frames);
        }

        // Handle timing
        let elapsed = last_frame.elapsed();
        if !args.unthrottled && frame_time > elapsed {
            thread::sleep(frame_time - elapsed);
        }
    }

    if frames > 0 {
        info!(
            "ran {} frames, {:.3}ms per frame",
            frames,
            started.elapsed().as_secs_f64() * 1000.0 / frames as f64
        );
    }

    if args.dump {
        print!("{}", chip8.frame_buffer());
    }
    Ok(())
}
