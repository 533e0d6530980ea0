use std::io::Read;
use std::mem;

use log::{debug, info, warn};

use crate::constants::TIMER_PERIOD;
use crate::error::Chip8Error;
use crate::frame_buffer::FrameBuffer;
use crate::keypad::Keypad;
use crate::rng::Pcg;
use crate::state::{RunState, State};

/// What happened during one call to `Chip8::run_cycle_batch`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Instructions executed
    pub cycles: usize,
    /// A clear or a draw ran
    pub redraw: bool,
    /// The sound timer ran out during this tick
    pub sound_stopped: bool,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - time that has passed towards the next 60Hz timer decrement
///  - the keypad snapshot from the previous tick, to tell when keys go down
///
/// Supplies interfaces for:
/// - loading roms
/// - running a batch of instructions per host frame and advancing the timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    timer_accumulator: f64,
    previous_keypad: Keypad,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::from_rng(Pcg::default())
    }

    /// A session whose `Cxkk` results are determined by `seed`
    pub fn with_seed(seed: u32) -> Self {
        Self::from_rng(Pcg::new(seed))
    }

    pub fn from_rng(rng: Pcg) -> Self {
        Chip8 {
            state: State::new(rng),
            timer_accumulator: 0.0,
            previous_keypad: Keypad::new(),
        }
    }

    /// Resets the machine and loads a program at 0x200
    ///
    /// A program that doesn't fit leaves the machine `Halted` until another load succeeds.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        self.state.reset();
        self.timer_accumulator = 0.0;
        self.previous_keypad = Keypad::new();

        match self.state.memory.load_program(rom) {
            Ok(()) => {
                info!("loaded {} byte ROM", rom.len());
                self.state.run_state = RunState::Running;
                Ok(())
            }
            Err(e) => Err(self.halt(e)),
        }
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM, read to the end before loading
    pub fn load_rom_from(&mut self, reader: &mut dyn Read) -> Result<(), Chip8Error> {
        let mut rom = Vec::new();
        if let Err(e) = reader.read_to_end(&mut rom) {
            return Err(self.halt(e.into()));
        }
        self.load_rom(&rom)
    }

    /// Runs one host frame
    /// - resumes a pending `Fx0A` if a key went down since the last tick, otherwise returns
    ///   without running anything, timers included
    /// - executes up to `cycles` instructions, stopping early if one waits for a key
    /// - advances the timers by `delta_seconds`
    ///
    /// Does nothing before a program is loaded or after the machine halted.
    /// A failing instruction halts the machine and its error is returned.
    pub fn run_cycle_batch(
        &mut self,
        cycles: usize,
        keypad: &Keypad,
        delta_seconds: f64,
    ) -> Result<Tick, Chip8Error> {
        let mut tick = Tick::default();
        let previous = mem::replace(&mut self.previous_keypad, *keypad);
        let mut sounding = self.state.sound_timer > 0;

        match self.state.run_state {
            RunState::Uninitialized | RunState::AwaitingRomLoad | RunState::Halted => {
                return Ok(tick)
            }
            RunState::AwaitingKeypress { register } => match keypad.first_newly_down(&previous) {
                Some(key) => {
                    debug!("key {:X} stored in V{:X}", key, register);
                    self.state.v[register] = key;
                    self.state.run_state = RunState::Running;
                }
                None => return Ok(tick),
            },
            RunState::Running => {}
        }

        let pending_draw = mem::replace(&mut self.state.draw_flag, false);
        for _ in 0..cycles {
            if let Err(e) = self.state.step(keypad) {
                self.state.draw_flag |= pending_draw;
                return Err(self.halt(e));
            }
            tick.cycles += 1;
            if let RunState::AwaitingKeypress { .. } = self.state.run_state {
                break;
            }
        }
        tick.redraw = self.state.draw_flag;
        self.state.draw_flag |= pending_draw;

        sounding |= self.state.sound_timer > 0;
        self.advance_timers(delta_seconds);
        tick.sound_stopped = sounding && self.state.sound_timer == 0;
        Ok(tick)
    }

    /// Handles the 60Hz timers
    /// - the elapsed time is only counted while a timer is running
    /// - once a full period has passed each running timer is decremented and the count starts over
    fn advance_timers(&mut self, delta_seconds: f64) {
        if self.state.delay_timer == 0 && self.state.sound_timer == 0 {
            self.timer_accumulator = 0.0;
            return;
        }

        self.timer_accumulator += delta_seconds;
        if self.timer_accumulator >= TIMER_PERIOD {
            self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
            self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
            self.timer_accumulator = 0.0;
        }
    }

    fn halt(&mut self, e: Chip8Error) -> Chip8Error {
        warn!("halting: {}", e);
        self.state.run_state = RunState::Halted;
        e
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if mem::replace(&mut self.state.draw_flag, false) {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// The buzzer should be on
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
