use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use chipvm_core::constants::CLOCK_SPEED_HZ;

mod keymap;
mod rom;
mod run;

#[derive(Parser, Debug)]
#[command(version, about = "Runs a program for the chip instruction set")]
struct Args {
    /// Path to the program image to run
    rom: PathBuf,

    /// Instructions per second; the delay and sound timers tick once per instruction
    #[arg(long, default_value_t = CLOCK_SPEED_HZ)]
    hz: u32,

    /// Size of each pixel on screen
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Quit once execution runs past the end of the loaded program
    #[arg(long)]
    exit_at_end: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let rom = rom::load(&args.rom)?;
    run::run(
        &rom,
        &run::Options {
            hz: args.hz,
            scale: args.scale,
            exit_at_end: args.exit_at_end,
        },
    )
}
