use crate::constants::KEY_COUNT;
use crate::error::Chip8Error;

/// # Keypad
/// A snapshot of the 16 key hexadecimal keypad, `true` meaning held down.
///
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
/// How physical keys map onto this layout is up to the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: u8) -> Result<(), Chip8Error> {
        *self.key_mut(key)? = true;
        Ok(())
    }

    pub fn release(&mut self, key: u8) -> Result<(), Chip8Error> {
        *self.key_mut(key)? = false;
        Ok(())
    }

    pub fn is_down(&self, key: u8) -> Result<bool, Chip8Error> {
        self.keys
            .get(key as usize)
            .copied()
            .ok_or(Chip8Error::InvalidKey { key })
    }

    /// The lowest key that is down now but wasn't in `previous`
    pub fn first_newly_down(&self, previous: &Keypad) -> Option<u8> {
        self.keys
            .iter()
            .zip(previous.keys.iter())
            .position(|(&now, &before)| now && !before)
            .map(|key| key as u8)
    }

    fn key_mut(&mut self, key: u8) -> Result<&mut bool, Chip8Error> {
        self.keys
            .get_mut(key as usize)
            .ok_or(Chip8Error::InvalidKey { key })
    }
}

impl From<[bool; KEY_COUNT]> for Keypad {
    fn from(keys: [bool; KEY_COUNT]) -> Self {
        Keypad { keys }
    }
}
