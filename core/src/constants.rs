/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Where programs are loaded and where execution starts
pub const PROGRAM_START: u16 = 0x200;

/// Largest program that fits between `PROGRAM_START` and the end of memory
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Where the sprite sheet lives in the reserved interpreter area
pub const FONT_START: u16 = 0x050;

/// Bytes per glyph in the sprite sheet
pub const GLYPH_SIZE: u16 = 5;

/// Maximum depth of nested subroutine calls
pub const STACK_CAPACITY: usize = 16;

/// Number of keys on the hex keypad
pub const KEY_COUNT: u8 = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Pixels are packed 8 to a byte, so each row is this many bytes wide
pub const DISPLAY_ROW_BYTES: usize = DISPLAY_WIDTH / 8;

/// Default instructions per second; timers tick once per instruction
pub const CLOCK_SPEED_HZ: u32 = 500;

/// # Sprite Sheet
/// The built-in hexadecimal digits 0..F.
///
/// Each glyph is 4 pixels wide and 5 rows tall; only the high nibble of each
/// byte is drawn. For example `0`:
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
