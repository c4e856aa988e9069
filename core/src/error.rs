use thiserror::Error;

/// Everything that can stop a Machine.
///
/// `OutOfSpace` is only produced while constructing a Machine. The others are
/// fatal at runtime: the Machine halts and keeps returning the same error.
/// Unknown opcodes are deliberately absent; they execute as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MachineError {
    #[error("program of {size} bytes does not fit in the {max} bytes available")]
    OutOfSpace { size: usize, max: usize },

    #[error("stack overflow: more than {capacity} nested subroutine calls")]
    StackOverflow { capacity: usize },

    #[error("stack underflow: return at {pc:#06X} with no subroutine to return from")]
    StackUnderflow { pc: u16 },

    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },
}
