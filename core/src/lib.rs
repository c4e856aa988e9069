pub use error::MachineError;
pub use framebuffer::FrameBuffer;
pub use keyboard::{Keyboard, Keypad};
pub use machine::{Machine, Status};
pub use memory::Memory;

pub mod constants;
mod error;
pub mod framebuffer;
mod instruction;
mod keyboard;
mod machine;
mod memory;
mod opcode;
mod operations;
mod stack;
mod state;
