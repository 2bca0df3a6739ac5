//! Realtime MIDI plugin image and its record format.
//!
//! An image is a flat run of 16-bit words grouped as
//! `(register, count, words...)`. When bit 15 of `count` is set the record
//! is run-length encoded: the single word that follows is written
//! `count & 0x7FFF` times.

use crate::error::PluginError;

/// VLSI realtime MIDI patch. Switches the decoder into realtime MIDI mode
/// so MIDI bytes on the data interface are played immediately.
pub const REALTIME_MIDI_PLUGIN: [u16; 28] = [
    0x0007, 0x0001, 0x8050, 0x0006, 0x0014, 0x0030, 0x0715, 0xb080, //
    0x3400, 0x0007, 0x9255, 0x3d00, 0x0024, 0x0030, 0x0295, 0x6890, //
    0x3400, 0x0030, 0x0495, 0x3d00, 0x0024, 0x2908, 0x4d40, 0x0030, //
    0x0200, 0x000a, 0x0001, 0x0050,
];

const RLE_FLAG: u16 = 0x8000;

/// One register write decoded from a plugin image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PluginWrite {
    pub register: u8,
    pub value: u16,
}

/// Iterator over the register writes encoded in a plugin image.
///
/// Yields an error once and then stops if the image is malformed.
#[derive(Clone, Debug)]
pub struct PluginWrites<'a> {
    image: &'a [u16],
    pos: usize,
    register: u8,
    remaining: u16,
    repeat: Option<u16>,
    failed: bool,
}

impl<'a> PluginWrites<'a> {
    pub fn new(image: &'a [u16]) -> Self {
        Self {
            image,
            pos: 0,
            register: 0,
            remaining: 0,
            repeat: None,
            failed: false,
        }
    }

    /// Parse the next record header, leaving `pos` on its first payload word.
    fn next_record(&mut self) -> Result<(), PluginError> {
        let offset = self.pos;
        let Some(&[address, count]) = self.image.get(offset..offset + 2) else {
            return Err(PluginError::Truncated { offset });
        };
        self.register =
            u8::try_from(address).map_err(|_| PluginError::InvalidRegister { offset, address })?;
        self.pos += 2;

        if count & RLE_FLAG != 0 {
            let value = *self.image.get(self.pos).ok_or(PluginError::Truncated { offset })?;
            self.pos += 1;
            self.repeat = Some(value);
            self.remaining = count & !RLE_FLAG;
        } else {
            if self.pos + count as usize > self.image.len() {
                return Err(PluginError::Truncated { offset });
            }
            self.repeat = None;
            self.remaining = count;
        }
        Ok(())
    }
}

impl Iterator for PluginWrites<'_> {
    type Item = Result<PluginWrite, PluginError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        while self.remaining == 0 {
            if self.pos >= self.image.len() {
                return None;
            }
            if let Err(e) = self.next_record() {
                self.failed = true;
                return Some(Err(e));
            }
        }

        self.remaining -= 1;
        let value = match self.repeat {
            Some(value) => value,
            None => {
                let value = self.image[self.pos];
                self.pos += 1;
                value
            }
        };
        Some(Ok(PluginWrite { register: self.register, value }))
    }
}
