use log::{debug, error, trace};

use crate::constants::{MAX_PROGRAM_SIZE, PROGRAM_START};
use crate::error::MachineError;
use crate::framebuffer::FrameBuffer;
use crate::instruction::from_op;
use crate::keyboard::Keyboard;
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::state::State;

/// What the Machine will do on its next `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Fetching and executing instructions
    Running,
    /// Polling the keyboard for a key to store in `register`
    AwaitingKey { register: u8 },
    /// Stopped by a fatal error; no further state changes will happen
    Halted(MachineError),
}

/// # Machine
/// A virtual machine for the chip instruction set.
///
/// Tracks:
///  - current `state`
///  - the size of the loaded program, so hosts can tell when execution leaves it
///  - the fatal error that halted it, if any
///
/// Supplies interfaces for:
/// - loading a program
/// - advancing the CPU one instruction (or one key-wait poll) at a time
/// - inspecting its frame buffer for rendering by some display
/// - inspecting registers, timers and memory
///
/// Each Machine owns all of its state, so any number of them can run side by side.
pub struct Machine {
    state: State,
    program_len: usize,
    halted: Option<MachineError>,
}

impl Machine {
    /// Creates a Machine with `program` loaded at `PROGRAM_START`
    ///
    /// # Arguments
    /// * `program` the raw program image; must be non-empty and fit in memory
    pub fn new(program: &[u8]) -> Result<Self, MachineError> {
        if program.is_empty() || program.len() > MAX_PROGRAM_SIZE {
            return Err(MachineError::OutOfSpace {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }

        let mut state = State::new();
        state.memory.write(PROGRAM_START, program)?;
        debug!("loaded {} byte program at {:#05X}", program.len(), PROGRAM_START);

        Ok(Machine {
            state,
            program_len: program.len(),
            halted: None,
        })
    }

    /// Advances the Machine by a single cycle
    /// - while halted, returns the error that halted it
    /// - while awaiting a key, polls `keyboard` and captures the lowest pressed key
    /// - otherwise fetches, decodes and executes one instruction then ticks the timers
    ///
    /// A fatal error leaves the state as it was before the failing instruction.
    pub fn step(&mut self, keyboard: &dyn Keyboard) -> Result<(), MachineError> {
        if let Some(err) = self.halted {
            return Err(err);
        }

        if let Some(register) = self.state.register_needing_key {
            if let Some(key) = keyboard.pressed_key() {
                debug!("key {:X} pressed; stored in V{:X}", key, register);
                self.state.v[register as usize] = key;
                self.state.register_needing_key = None;
                self.state.pc += 0x2;
            }
            return Ok(());
        }

        match self.execute(keyboard) {
            Ok(state) => {
                self.state = state;
                self.state.tick_timers();
                Ok(())
            }
            Err(err) => {
                error!("halting at {:#06X}: {}", self.state.pc, err);
                self.halted = Some(err);
                Err(err)
            }
        }
    }

    fn execute(&self, keyboard: &dyn Keyboard) -> Result<State, MachineError> {
        let op = self.state.memory.word(self.state.pc)?;
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc
        );

        let fetched = State {
            pc: self.state.pc + 0x2,
            ..self.state
        };
        let next = from_op(&op)(&op, &fetched, keyboard)?;
        if let Some(register) = next.register_needing_key {
            debug!("{:04X} awaiting key for V{:X}", op.word(), register);
        }
        Ok(next)
    }

    pub fn status(&self) -> Status {
        match (self.halted, self.state.register_needing_key) {
            (Some(err), _) => Status::Halted(err),
            (None, Some(register)) => Status::AwaitingKey { register },
            (None, None) => Status::Running,
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    pub fn is_awaiting_key(&self) -> bool {
        self.state.register_needing_key.is_some()
    }

    /// The current frame, whether or not it changed
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if it changed since the last call
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Whether a tone should currently be playing
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Whether `pc` still points inside the loaded program.
    /// Leaving it is not an error for the Machine, but a host may treat it as the end.
    pub fn pc_in_program(&self) -> bool {
        let start = PROGRAM_START as usize;
        (start..start + self.program_len).contains(&(self.state.pc as usize))
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn i(&self) -> u16 {
        self.state.i
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.state.v
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// How many return addresses are on the call stack
    pub fn stack_depth(&self) -> usize {
        self.state.stack.len()
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }
}
