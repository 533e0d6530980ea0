pub use chip8::{Chip8, Tick};
pub use error::Chip8Error;
pub use frame_buffer::FrameBuffer;
pub use keypad::Keypad;
pub use memory::Memory;
pub use rng::Pcg;
pub use state::RunState;

mod chip8;
pub mod constants;
mod error;
mod frame_buffer;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod rng;
pub mod state;
