use crate::constants::PROGRAM_START;
use crate::framebuffer::FrameBuffer;
use crate::memory::Memory;
use crate::stack::CallStack;

/// A snapshot of the Machine's internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the flag register, clobbered by carry/borrow/collision
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented once per executed instruction
///
/// ## Memory
/// - a call stack of up to 16 return addresses
/// - 4096 bytes of addressable memory
/// - a 64x32 frame buffer
///
/// ## Input
/// - execution halts until a key's value is written to `register_needing_key`
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub stack: CallStack,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub register_needing_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            stack: CallStack::new(),
            delay_timer: 0,
            sound_timer: 0,
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            register_needing_key: None,
        }
    }

    /// Counts both timers down by one, stopping at zero
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_program() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.v, [0; 16]);
        assert!(state.stack.is_empty());
        assert!(state.frame_buffer.is_blank());
        assert_eq!(state.register_needing_key, None);
    }

    #[test]
    fn test_timers_floor_at_zero() {
        let mut state = State::new();
        state.delay_timer = 1;
        state.tick_timers();
        state.tick_timers();
        assert_eq!((state.delay_timer, state.sound_timer), (0, 0));
    }
}
