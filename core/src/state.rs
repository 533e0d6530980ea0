use log::trace;

use crate::constants::{PROGRAM_START, REGISTER_COUNT, STACK_SIZE};
use crate::error::Chip8Error;
use crate::frame_buffer::FrameBuffer;
use crate::instruction::from_op;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::rng::Pcg;

/// Where the interpreter is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Nothing has been loaded yet
    Uninitialized,
    /// Memory and registers are reset, the program is being copied in
    AwaitingRomLoad,
    /// `Fx0A` ran; nothing executes until a key goes down, which is stored in `register`
    AwaitingKeypress { register: usize },
    Running,
    /// A load or an instruction failed; only loading a new program gets out of here
    Halted,
}

/// The Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the flag register, clobbered by arithmetic, shifts and draws
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, advanced by 2 as each instruction is fetched
///
/// Stack
/// - 16 return addresses, (sp) counts how many are in use
///
/// Timers
/// - 2 8-bit timers (delay & sound), counted down at 60Hz by the driver
///
/// ## Memory
/// - 4096 bytes of addressable memory with the font at 0x000
/// - 64x32 frame buffer
///
/// ## Randomness
/// - the generator behind `Cxkk`, seeded once per session
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: usize,
    pub stack: [u16; STACK_SIZE],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub rng: Pcg,
    pub run_state: RunState,
    pub draw_flag: bool,
}

impl State {
    pub fn new(rng: Pcg) -> Self {
        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_SIZE],
            delay_timer: 0,
            sound_timer: 0,
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
            rng,
            run_state: RunState::Uninitialized,
            draw_flag: false,
        }
    }

    /// Puts everything but the random generator back to power-on values.
    /// The generator is seeded once per session and keeps its position.
    pub fn reset(&mut self) {
        self.v = [0; REGISTER_COUNT];
        self.i = 0;
        self.pc = PROGRAM_START;
        self.sp = 0;
        self.stack = [0; STACK_SIZE];
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.memory.reset();
        self.frame_buffer.clear();
        self.draw_flag = true;
        self.run_state = RunState::AwaitingRomLoad;
    }

    /// Executes a single instruction
    /// - fetches the opcode at the pc and moves the pc past it
    /// - decodes and executes it
    ///
    /// If anything fails the pc is put back, so a failed instruction leaves no trace.
    pub fn step(&mut self, keypad: &Keypad) -> Result<(), Chip8Error> {
        let op = Opcode(self.memory.read_word(self.pc)?);
        let operation = from_op(op)?;
        trace!(
            "{} v{:02X?} i{:04X} pc{:04X} sp{}",
            op,
            self.v,
            self.i,
            self.pc,
            self.sp
        );

        let pc = self.pc;
        self.pc += 2;
        operation(op, self, keypad).map_err(|e| {
            self.pc = pc;
            e
        })
    }

    pub fn push(&mut self, addr: u16) -> Result<(), Chip8Error> {
        let slot = self.stack.get_mut(self.sp).ok_or(Chip8Error::StackOverflow)?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(Pcg::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_uninitialized() {
        let state = State::default();
        assert_eq!(state.run_state, RunState::Uninitialized);
        assert_eq!(state.pc, PROGRAM_START);
    }

    #[test]
    fn test_step_advances_pc() {
        let mut state = State::default();
        // insert a cls opcode so there's something to execute
        state.memory.write_slice(0x200, &[0x00, 0xE0]).unwrap();
        state.step(&Keypad::new()).unwrap();
        assert_eq!(state.pc, 0x202);
    }

    #[test]
    fn test_failed_step_leaves_pc() {
        let mut state = State::default();
        // 00EE with nothing on the stack
        state.memory.write_slice(0x200, &[0x00, 0xEE]).unwrap();
        assert!(matches!(
            state.step(&Keypad::new()),
            Err(Chip8Error::StackUnderflow)
        ));
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_unknown_opcode_is_an_error() {
        let mut state = State::default();
        state.memory.write_slice(0x200, &[0xE1, 0x00]).unwrap();
        assert!(matches!(
            state.step(&Keypad::new()),
            Err(Chip8Error::UnknownOpcode { opcode: 0xE100 })
        ));
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_fetch_past_end_of_memory() {
        let mut state = State::default();
        state.pc = 0xFFF;
        assert!(matches!(
            state.step(&Keypad::new()),
            Err(Chip8Error::AddressOutOfBounds { address: 0x1000 })
        ));
    }

    #[test]
    fn test_stack_holds_sixteen_addresses() {
        let mut state = State::default();
        for addr in 0..STACK_SIZE as u16 {
            state.push(addr).unwrap();
        }
        assert!(matches!(state.push(0xABC), Err(Chip8Error::StackOverflow)));
        assert_eq!(state.sp, STACK_SIZE);
        assert_eq!(state.pop().unwrap(), STACK_SIZE as u16 - 1);
    }

    #[test]
    fn test_reset_keeps_generator() {
        let mut state = State::new(Pcg::new(7));
        state.rng.random_byte();
        let rng = state.rng;
        state.v[0x3] = 0x33;
        state.i = 0x123;
        state.pc = 0x456;
        state.push(0x208).unwrap();
        state.delay_timer = 9;
        state.frame_buffer.set(1, 1);
        state.reset();
        assert_eq!(state.v, [0; REGISTER_COUNT]);
        assert_eq!((state.i, state.pc, state.sp, state.delay_timer), (0, 0x200, 0, 0));
        assert!(!state.frame_buffer.is_set(1, 1));
        assert_eq!(state.rng, rng);
        assert_eq!(state.run_state, RunState::AwaitingRomLoad);
    }
}
