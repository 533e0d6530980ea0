use std::path::PathBuf;

use clap::Parser;

use chip8_core::constants::{DEFAULT_CYCLES_PER_FRAME, DEFAULT_SEED};

mod run;

/// Runs a Chip-8 ROM without a window, feeding it a fixed set of held keys
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    #[arg(short, long, default_value_t = DEFAULT_CYCLES_PER_FRAME, help = "Instructions executed per frame")]
    cycles: usize,

    #[arg(short, long, default_value_t = 60, help = "Frame rate in frames per second")]
    frame_rate: u32,

    #[arg(short = 'n', long, default_value_t = 600, help = "Frames to run before exiting")]
    frames: u64,

    #[arg(short, long, default_value_t = DEFAULT_SEED, help = "Seed for the random number generator")]
    seed: u32,

    #[arg(long, conflicts_with = "seed", help = "Seed the random number generator from the OS")]
    random_seed: bool,

    #[arg(long, value_parser = parse_key, help = "Hex key (0-F) held down for the whole run, repeatable")]
    hold: Vec<u8>,

    #[arg(short, long, help = "Run frames back to back instead of at the frame rate")]
    unthrottled: bool,

    #[arg(short, long, help = "Print the screen when the run ends")]
    dump: bool,
}

fn parse_key(s: &str) -> Result<u8, String> {
    match u8::from_str_radix(s.trim_start_matches("0x"), 16) {
        Ok(key) if key <= 0xF => Ok(key),
        _ => Err(format!("`{}` isn't a key between 0 and F", s)),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    run::run(&args)
}
