use ::rand::random;

use crate::constants::{FONT_START, GLYPH_SIZE};
use crate::error::MachineError;
use crate::keyboard::Keyboard;
use crate::opcode::Opcode;
use crate::state::State;

// Every operation receives the state with `pc` already pointing past the
// instruction being executed, so jumps assign `pc` and skips add 2 to it.

type Result = std::result::Result<State, MachineError>;

fn skip_if(condition: bool, state: &State) -> Result {
    let pc = if condition { state.pc + 0x2 } else { state.pc };
    Ok(State { pc, ..*state })
}

/// Stores `value` in Vx and then `flag` in VF, so the flag wins when x is F
fn with_flag(state: &State, x: u8, value: u8, flag: bool) -> Result {
    let mut v = state.v;
    v[x as usize] = value;
    v[0xF] = u8::from(flag);
    Ok(State { v, ..*state })
}

fn with_register(state: &State, x: u8, value: u8) -> Result {
    let mut v = state.v;
    v[x as usize] = value;
    Ok(State { v, ..*state })
}

/// nop; also the fate of legacy SYS calls and unrecognised opcodes
pub fn nop(_op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    Ok(*state)
}

/// clear
pub fn clr(_op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let mut frame_buffer = state.frame_buffer;
    frame_buffer.clear();
    Ok(State {
        frame_buffer,
        draw_flag: true,
        ..*state
    })
}

/// PC = STACK.pop()
pub fn rts(_op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let mut stack = state.stack;
    let pc = stack.pop().ok_or(MachineError::StackUnderflow {
        pc: state.pc.wrapping_sub(0x2),
    })?;
    Ok(State { pc, stack, ..*state })
}

/// PC = addr
pub fn jump(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    Ok(State {
        pc: op.nnn(),
        ..*state
    })
}

/// STACK.push(PC); PC = addr
pub fn call(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let mut stack = state.stack;
    stack.push(state.pc)?;
    Ok(State {
        pc: op.nnn(),
        stack,
        ..*state
    })
}

/// if Vx == kk then pc += 2
pub fn ske(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    skip_if(state.v[op.x() as usize] == op.kk(), state)
}

/// if Vx != kk then pc += 2
pub fn skne(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    skip_if(state.v[op.x() as usize] != op.kk(), state)
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    skip_if(state.v[op.x() as usize] == state.v[op.y() as usize], state)
}

/// Vx = kk
pub fn load(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    with_register(state, op.x(), op.kk())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let res = state.v[op.x() as usize].wrapping_add(op.kk());
    with_register(state, op.x(), res)
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    with_register(state, op.x(), state.v[op.y() as usize])
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let res = state.v[op.x() as usize] | state.v[op.y() as usize];
    with_register(state, op.x(), res)
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let res = state.v[op.x() as usize] & state.v[op.y() as usize];
    with_register(state, op.x(), res)
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let res = state.v[op.x() as usize] ^ state.v[op.y() as usize];
    with_register(state, op.x(), res)
}

/// Vx += Vy; VF = carry
pub fn addr(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let sum = u16::from(state.v[op.x() as usize]) + u16::from(state.v[op.y() as usize]);
    with_flag(state, op.x(), sum as u8, sum > 0xFF)
}

/// Vx -= Vy; VF = !borrow
pub fn sub(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let (vx, vy) = (state.v[op.x() as usize], state.v[op.y() as usize]);
    with_flag(state, op.x(), vx.wrapping_sub(vy), vx > vy)
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let vx = state.v[op.x() as usize];
    with_flag(state, op.x(), vx >> 1, vx & 0x1 == 0x1)
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let (vx, vy) = (state.v[op.x() as usize], state.v[op.y() as usize]);
    with_flag(state, op.x(), vy.wrapping_sub(vx), vy > vx)
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let vx = state.v[op.x() as usize];
    with_flag(state, op.x(), vx << 1, vx & 0x80 == 0x80)
}

/// if Vx != Vy then pc +=2
pub fn skrne(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    skip_if(state.v[op.x() as usize] != state.v[op.y() as usize], state)
}

/// I = addr
pub fn loadi(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    Ok(State {
        i: op.nnn(),
        ..*state
    })
}

/// PC = V0 + addr
pub fn jumpi(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    Ok(State {
        pc: u16::from(state.v[0x0]) + op.nnn(),
        ..*state
    })
}

/// Vx = rand_byte & kk
pub fn rand(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let rand_byte: u8 = random();
    with_register(state, op.x(), rand_byte & op.kk())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let sprite = state.memory.read(state.i, op.n() as usize)?;
    let mut frame_buffer = state.frame_buffer;
    let collision = frame_buffer.draw_sprite(
        state.v[op.x() as usize],
        state.v[op.y() as usize],
        sprite,
    );

    let mut v = state.v;
    v[0xF] = u8::from(collision);
    Ok(State {
        draw_flag: true,
        v,
        frame_buffer,
        ..*state
    })
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &dyn Opcode, state: &State, keys: &dyn Keyboard) -> Result {
    skip_if(keys.is_pressed(state.v[op.x() as usize] & 0xF), state)
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &dyn Opcode, state: &State, keys: &dyn Keyboard) -> Result {
    skip_if(!keys.is_pressed(state.v[op.x() as usize] & 0xF), state)
}

/// Vx = DT
pub fn moved(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    with_register(state, op.x(), state.delay_timer)
}

/// await keypress for Vx
/// The pc is wound back onto this instruction; once a key arrives the Machine
/// moves it past again.
pub fn keyd(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    Ok(State {
        pc: state.pc.wrapping_sub(0x2),
        register_needing_key: Some(op.x()),
        ..*state
    })
}

/// DT = Vx
pub fn loads(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    Ok(State {
        delay_timer: state.v[op.x() as usize],
        ..*state
    })
}

/// ST = Vx
pub fn ld(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    Ok(State {
        sound_timer: state.v[op.x() as usize],
        ..*state
    })
}

/// I += Vx
pub fn addi(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    Ok(State {
        i: state.i.wrapping_add(u16::from(state.v[op.x() as usize])),
        ..*state
    })
}

/// I = FONT_START + Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    Ok(State {
        i: FONT_START + u16::from(state.v[op.x() as usize]) * GLYPH_SIZE,
        ..*state
    })
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let vx = state.v[op.x() as usize];
    let mut memory = state.memory;
    memory.write(state.i, &[vx / 100, vx / 10 % 10, vx % 10])?;
    Ok(State { memory, ..*state })
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let mut memory = state.memory;
    memory.write(state.i, &state.v[..=op.x() as usize])?;
    Ok(State { memory, ..*state })
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: &dyn Opcode, state: &State, _keys: &dyn Keyboard) -> Result {
    let count = op.x() as usize + 1;
    let mut v = state.v;
    v[..count].copy_from_slice(state.memory.read(state.i, count)?);
    Ok(State { v, ..*state })
}
