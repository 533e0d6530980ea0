/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Everything below this address is reserved for the interpreter (the font lives there)
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const REGISTER_COUNT: usize = 16;

/// Index of VF, the implicit flag register
pub const VF: usize = 0xF;

pub const STACK_SIZE: usize = 16;

pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Timers count down at 60Hz regardless of how many instructions run per tick
pub const TIMER_FREQUENCY: f64 = 60.0;
pub const TIMER_PERIOD: f64 = 1.0 / TIMER_FREQUENCY;

/// How many instructions a host should run per tick unless told otherwise
pub const DEFAULT_CYCLES_PER_FRAME: usize = 15;

pub const DEFAULT_SEED: u32 = 0x8293_A8DE;

/// Address of the first glyph in the sprite sheet
pub const FONT_START: u16 = 0x000;

/// Each glyph is 5 rows of a 4 pixel wide bitmap
pub const GLYPH_SIZE: u16 = 5;

/// # Sprite Sheet
/// The built-in hexadecimal font, one glyph per digit `0..F`.
///
/// Only the high nibble of each row is drawn, e.g. `0`:
/// ```text
/// 0xF0  ####
/// 0x90  #..#
/// 0x90  #..#
/// 0x90  #..#
/// 0xF0  ####
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
