use thiserror::Error;

/// Everything that can stop the interpreter.
///
/// Content errors (a bad ROM or opcode) and invariant violations are reported the same way:
/// the instruction or load that hit them is abandoned and the interpreter halts.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("memory access out of bounds at address {address:#06X}")]
    AddressOutOfBounds { address: usize },

    #[error("stack overflow: subroutine calls nested deeper than the stack")]
    StackOverflow,

    #[error("stack underflow: attempted to return with an empty call stack")]
    StackUnderflow,

    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },

    #[error("key {key:#04X} is not on the keypad")]
    InvalidKey { key: u8 },

    #[error("unable to read ROM")]
    Io(#[from] std::io::Error),
}
