use log::debug;

use crate::constants::{FONT_START, GLYPH_SIZE, MEMORY_SIZE, VF};
use crate::error::Chip8Error;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::state::{RunState, State};

// The pc already points at the next instruction when these run, so skipping means += 2.

/// call machine code routine at addr; not supported, so it does nothing
pub fn sys(op: Opcode, _state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    debug!("ignoring machine code call {}", op);
    Ok(())
}

/// clear
pub fn clr(_op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.frame_buffer.clear();
    state.draw_flag = true;
    Ok(())
}

/// PC = STACK.pop()
pub fn ret(_op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.pc = state.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.pc = op.nnn();
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.push(state.pc)?;
    state.pc = op.nnn();
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let skip = state.v[op.x()] == op.kk();
    skip_if(state, skip);
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let skip = state.v[op.x()] != op.kk();
    skip_if(state, skip);
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let skip = state.v[op.x()] == state.v[op.y()];
    skip_if(state, skip);
    Ok(())
}

/// Vx = kk
pub fn load(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.v[op.x()] = op.kk();
    Ok(())
}

/// Vx += kk
/// Overflow wraps and VF is left alone
pub fn add(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.kk());
    Ok(())
}

/// Vx = Vy
pub fn mv(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.v[op.x()] = state.v[op.y()];
    Ok(())
}

/// Vx |= Vy
pub fn or(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.v[op.x()] |= state.v[op.y()];
    Ok(())
}

/// Vx &= Vy
pub fn and(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.v[op.x()] &= state.v[op.y()];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.v[op.x()] ^= state.v[op.y()];
    Ok(())
}

/// Vx += Vy; VF = carry
pub fn addr(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let (res, carry) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    state.v[op.x()] = res;
    state.v[VF] = carry as u8;
    Ok(())
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vx.wrapping_sub(vy);
    state.v[VF] = (vx > vy) as u8;
    Ok(())
}

/// Vx >>= 1; VF = lsb
pub fn shr(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let vx = state.v[op.x()];
    state.v[op.x()] = vx >> 1;
    state.v[VF] = vx & 0x1;
    Ok(())
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vy.wrapping_sub(vx);
    state.v[VF] = (vy > vx) as u8;
    Ok(())
}

/// Vx <<= 1; VF = msb
pub fn shl(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let vx = state.v[op.x()];
    state.v[op.x()] = vx << 1;
    state.v[VF] = vx >> 7;
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let skip = state.v[op.x()] != state.v[op.y()];
    skip_if(state, skip);
    Ok(())
}

/// I = addr
pub fn loadi(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.i = op.nnn();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.pc = op.nnn() + u16::from(state.v[0x0]);
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rnd(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.v[op.x()] = state.rng.random_byte() & op.kk();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let x = state.v[op.x()] as usize;
    let y = state.v[op.y()] as usize;
    let sprite = state.memory.read_slice(state.i, op.n() as usize)?;
    let collision = state.frame_buffer.draw_sprite(x, y, sprite);
    state.v[VF] = collision as u8;
    state.draw_flag = true;
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: Opcode, state: &mut State, keypad: &Keypad) -> Result<(), Chip8Error> {
    let pressed = keypad.is_down(state.v[op.x()])?;
    skip_if(state, pressed);
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: Opcode, state: &mut State, keypad: &Keypad) -> Result<(), Chip8Error> {
    let pressed = keypad.is_down(state.v[op.x()])?;
    skip_if(state, !pressed);
    Ok(())
}

/// Vx = DT
pub fn moved(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.v[op.x()] = state.delay_timer;
    Ok(())
}

/// await keypress for Vx
pub fn keyd(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    debug!("waiting for a key to store in V{:X}", op.x());
    state.run_state = RunState::AwaitingKeypress { register: op.x() };
    Ok(())
}

/// DT = Vx
pub fn loadd(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.delay_timer = state.v[op.x()];
    Ok(())
}

/// ST = Vx
pub fn loads(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.sound_timer = state.v[op.x()];
    Ok(())
}

/// I += Vx
/// I has to stay a valid address
pub fn addi(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let vx = u16::from(state.v[op.x()]);
    state.i = state
        .i
        .checked_add(vx)
        .filter(|&i| usize::from(i) < MEMORY_SIZE)
        .ok_or(Chip8Error::AddressOutOfBounds {
            address: usize::from(state.i) + usize::from(vx),
        })?;
    Ok(())
}

/// I = sprite address of the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let digit = u16::from(state.v[op.x()] & 0xF);
    state.i = FONT_START + digit * GLYPH_SIZE;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store the hundreds, tens and ones of Vx in memory starting at address i
pub fn bcd(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let vx = state.v[op.x()];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    state.memory.write_slice(state.i, &digits)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.memory.write_slice(state.i, &state.v[..=op.x()])
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let bytes = state.memory.read_slice(state.i, op.x() + 1)?;
    state.v[..=op.x()].copy_from_slice(bytes);
    Ok(())
}

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.pc += 2;
    }
}
