//! MIDI note numbers.
//!
//! Scientific pitch notation: middle C (MIDI 60) is `C4`, concert A is `A4`.
//! Sharps are spelled with an `s` (`Cs4` = C#4); octave -1 uses an `m1` suffix.

/// A MIDI note number (0-127).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Note {
    // Octave -1 (MIDI 0-11)
    Cm1 = 0,
    Csm1 = 1,
    Dm1 = 2,
    Dsm1 = 3,
    Em1 = 4,
    Fm1 = 5,
    Fsm1 = 6,
    Gm1 = 7,
    Gsm1 = 8,
    Am1 = 9,
    Asm1 = 10,
    Bm1 = 11,
    // Octave 0 (MIDI 12-23)
    C0 = 12,
    Cs0 = 13,
    D0 = 14,
    Ds0 = 15,
    E0 = 16,
    F0 = 17,
    Fs0 = 18,
    G0 = 19,
    Gs0 = 20,
    A0 = 21,
    As0 = 22,
    B0 = 23,
    // Octave 1 (MIDI 24-35)
    C1 = 24,
    Cs1 = 25,
    D1 = 26,
    Ds1 = 27,
    E1 = 28,
    F1 = 29,
    Fs1 = 30,
    G1 = 31,
    Gs1 = 32,
    A1 = 33,
    As1 = 34,
    B1 = 35,
    // Octave 2 (MIDI 36-47)
    C2 = 36,
    Cs2 = 37,
    D2 = 38,
    Ds2 = 39,
    E2 = 40,
    F2 = 41,
    Fs2 = 42,
    G2 = 43,
    Gs2 = 44,
    A2 = 45,
    As2 = 46,
    B2 = 47,
    // Octave 3 (MIDI 48-59)
    C3 = 48,
    Cs3 = 49,
    D3 = 50,
    Ds3 = 51,
    E3 = 52,
    F3 = 53,
    Fs3 = 54,
    G3 = 55,
    Gs3 = 56,
    A3 = 57,
    As3 = 58,
    B3 = 59,
    // Octave 4 (MIDI 60-71)
    C4 = 60,
    Cs4 = 61,
    D4 = 62,
    Ds4 = 63,
    E4 = 64,
    F4 = 65,
    Fs4 = 66,
    G4 = 67,
    Gs4 = 68,
    A4 = 69,
    As4 = 70,
    B4 = 71,
    // Octave 5 (MIDI 72-83)
    C5 = 72,
    Cs5 = 73,
    D5 = 74,
    Ds5 = 75,
    E5 = 76,
    F5 = 77,
    Fs5 = 78,
    G5 = 79,
    Gs5 = 80,
    A5 = 81,
    As5 = 82,
    B5 = 83,
    // Octave 6 (MIDI 84-95)
    C6 = 84,
    Cs6 = 85,
    D6 = 86,
    Ds6 = 87,
    E6 = 88,
    F6 = 89,
    Fs6 = 90,
    G6 = 91,
    Gs6 = 92,
    A6 = 93,
    As6 = 94,
    B6 = 95,
    // Octave 7 (MIDI 96-107)
    C7 = 96,
    Cs7 = 97,
    D7 = 98,
    Ds7 = 99,
    E7 = 100,
    F7 = 101,
    Fs7 = 102,
    G7 = 103,
    Gs7 = 104,
    A7 = 105,
    As7 = 106,
    B7 = 107,
    // Octave 8 (MIDI 108-119)
    C8 = 108,
    Cs8 = 109,
    D8 = 110,
    Ds8 = 111,
    E8 = 112,
    F8 = 113,
    Fs8 = 114,
    G8 = 115,
    Gs8 = 116,
    A8 = 117,
    As8 = 118,
    B8 = 119,
    // Octave 9 (MIDI 120-127)
    C9 = 120,
    Cs9 = 121,
    D9 = 122,
    Ds9 = 123,
    E9 = 124,
    F9 = 125,
    Fs9 = 126,
    G9 = 127,
}

const ALL: [Note; 128] = [
    Note::Cm1, Note::Csm1, Note::Dm1, Note::Dsm1, Note::Em1, Note::Fm1,
    Note::Fsm1, Note::Gm1, Note::Gsm1, Note::Am1, Note::Asm1, Note::Bm1,
    Note::C0, Note::Cs0, Note::D0, Note::Ds0, Note::E0, Note::F0,
    Note::Fs0, Note::G0, Note::Gs0, Note::A0, Note::As0, Note::B0,
    Note::C1, Note::Cs1, Note::D1, Note::Ds1, Note::E1, Note::F1,
    Note::Fs1, Note::G1, Note::Gs1, Note::A1, Note::As1, Note::B1,
    Note::C2, Note::Cs2, Note::D2, Note::Ds2, Note::E2, Note::F2,
    Note::Fs2, Note::G2, Note::Gs2, Note::A2, Note::As2, Note::B2,
    Note::C3, Note::Cs3, Note::D3, Note::Ds3, Note::E3, Note::F3,
    Note::Fs3, Note::G3, Note::Gs3, Note::A3, Note::As3, Note::B3,
    Note::C4, Note::Cs4, Note::D4, Note::Ds4, Note::E4, Note::F4,
    Note::Fs4, Note::G4, Note::Gs4, Note::A4, Note::As4, Note::B4,
    Note::C5, Note::Cs5, Note::D5, Note::Ds5, Note::E5, Note::F5,
    Note::Fs5, Note::G5, Note::Gs5, Note::A5, Note::As5, Note::B5,
    Note::C6, Note::Cs6, Note::D6, Note::Ds6, Note::E6, Note::F6,
    Note::Fs6, Note::G6, Note::Gs6, Note::A6, Note::As6, Note::B6,
    Note::C7, Note::Cs7, Note::D7, Note::Ds7, Note::E7, Note::F7,
    Note::Fs7, Note::G7, Note::Gs7, Note::A7, Note::As7, Note::B7,
    Note::C8, Note::Cs8, Note::D8, Note::Ds8, Note::E8, Note::F8,
    Note::Fs8, Note::G8, Note::Gs8, Note::A8, Note::As8, Note::B8,
    Note::C9, Note::Cs9, Note::D9, Note::Ds9, Note::E9, Note::F9,
    Note::Fs9, Note::G9,
];

const SEMITONE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

impl Note {
    /// Middle C.
    pub const MIDDLE_C: Note = Note::C4;

    /// MIDI note number.
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Octave in scientific pitch notation (-1 to 9).
    pub const fn octave(self) -> i8 {
        (self as u8 / 12) as i8 - 1
    }

    /// Semitone within the octave (0 = C, 11 = B).
    pub const fn semitone(self) -> u8 {
        self as u8 % 12
    }

    /// Build a note from octave (-1..=9) and semitone, which may spill into
    /// the neighbouring octave (`-1` is the B below, `12` the next C).
    pub fn from_octave_semitone(octave: i8, semitone: i8) -> Option<Note> {
        let number = (octave as i16 + 1) * 12 + semitone as i16;
        u8::try_from(number).ok().and_then(|n| Note::try_from(n).ok())
    }

    /// Parse a note name such as `"C4"`, `"F#3"`, `"Bb2"` or `"C-1"`.
    ///
    /// `H` is accepted as an alias of `B`. Flats and sharps shift across
    /// octave boundaries (`"Cb4"` is B3).
    pub fn from_name(name: &str) -> Option<Note> {
        let bytes = name.as_bytes();
        let (&letter, rest) = bytes.split_first()?;
        let base: i8 = match letter.to_ascii_uppercase() {
            b'C' => 0,
            b'D' => 2,
            b'E' => 4,
            b'F' => 5,
            b'G' => 7,
            b'A' => 9,
            b'B' | b'H' => 11,
            _ => return None,
        };
        let (shift, octave_digits) = match rest.first() {
            Some(b'#') => (1, &rest[1..]),
            Some(b'b') => (-1, &rest[1..]),
            _ => (0, rest),
        };
        let octave: i8 = core::str::from_utf8(octave_digits).ok()?.parse().ok()?;
        if !(-1..=9).contains(&octave) {
            return None;
        }
        Note::from_octave_semitone(octave, base + shift)
    }

    /// Iterate every note in ascending order.
    pub fn all() -> impl Iterator<Item = Note> {
        ALL.iter().copied()
    }
}

impl From<Note> for u8 {
    fn from(note: Note) -> u8 {
        note as u8
    }
}

impl TryFrom<u8> for Note {
    type Error = u8;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        ALL.get(number as usize).copied().ok_or(number)
    }
}

impl core::fmt::Display for Note {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", SEMITONE_NAMES[self.semitone() as usize], self.octave())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_pitches() {
        assert_eq!(Note::C4.number(), 60);
        assert_eq!(Note::A4.number(), 69);
        assert_eq!(Note::C0.number(), 12);
        assert_eq!(Note::G9.number(), 127);
    }

    #[test]
    fn octave_and_semitone() {
        assert_eq!(Note::Fs3.octave(), 3);
        assert_eq!(Note::Fs3.semitone(), 6);
        assert_eq!(Note::Cm1.octave(), -1);
    }

    #[test]
    fn parse_names() {
        assert_eq!(Note::from_name("C4"), Some(Note::C4));
        assert_eq!(Note::from_name("F#3"), Some(Note::Fs3));
        assert_eq!(Note::from_name("Bb2"), Some(Note::As2));
        assert_eq!(Note::from_name("H4"), Some(Note::B4));
        assert_eq!(Note::from_name("Cb4"), Some(Note::B3));
        assert_eq!(Note::from_name("C-1"), Some(Note::Cm1));
        assert_eq!(Note::from_name("g5"), Some(Note::G5));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Note::from_name(""), None);
        assert_eq!(Note::from_name("X4"), None);
        assert_eq!(Note::from_name("C"), None);
        assert_eq!(Note::from_name("C#"), None);
        assert_eq!(Note::from_name("G#9"), None);
        assert_eq!(Note::from_name("Cb-1"), None);
        assert_eq!(Note::from_name("C10"), None);
    }

    #[test]
    fn display_round_trips_through_parser() {
        assert_eq!(Note::Cs4.to_string(), "C#4");
        assert_eq!(Note::from_name(&Note::Cm1.to_string()), Some(Note::Cm1));
    }
}
