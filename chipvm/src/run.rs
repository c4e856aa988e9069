use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use log::{error, info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chipvm_core::{Keypad, Machine, Status};
use chipvm_display::Display;

use crate::keymap::keymap;

/// How the host drives a Machine
pub struct Options {
    /// Instructions per second; the timers tick at the same rate
    pub hz: u32,
    /// Size multiplier for each pixel
    pub scale: u32,
    /// Stop once the program counter leaves the loaded program
    pub exit_at_end: bool,
}

pub fn run(rom: &[u8], options: &Options) -> Result<()> {
    let mut machine = Machine::new(rom)?;

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, options.scale)?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;
    let mut keypad = Keypad::new();

    display.render(machine.frame_buffer())?;

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / options.hz.max(1);
    let mut last_cycle = Instant::now();

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        keypad.press(kc)
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        keypad.release(kc)
                    }
                }
                _ => continue,
            };
        }

        // Update state; a halted machine keeps its last frame on screen until quit
        if !machine.is_halted() {
            if let Err(err) = machine.step(&keypad) {
                error!("machine halted: {}", err);
            }
            if options.exit_at_end && !machine.is_awaiting_key() && !machine.pc_in_program() {
                info!("end of program reached at {:#06X}", machine.pc());
                break 'event;
            }
        }

        // Redraw when the frame buffer changed
        if let Some(frame) = machine.take_frame() {
            display.render(frame)?;
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    if let Status::Halted(err) = machine.status() {
        warn!("exited with the machine halted: {}", err);
    }
    Ok(())
}
