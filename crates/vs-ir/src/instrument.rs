//! General MIDI program numbers.

/// A General MIDI level 1 program (instrument), sent as the data byte of a
/// program change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Instrument {
    // Piano
    #[default]
    AcousticGrandPiano = 0,
    BrightAcousticPiano,
    ElectricGrandPiano,
    HonkyTonkPiano,
    ElectricPiano1,
    ElectricPiano2,
    Harpsichord,
    Clavinet,
    // Chromatic percussion
    Celesta,
    Glockenspiel,
    MusicBox,
    Vibraphone,
    Marimba,
    Xylophone,
    TubularBells,
    Dulcimer,
    // Organ
    DrawbarOrgan,
    PercussiveOrgan,
    RockOrgan,
    ChurchOrgan,
    ReedOrgan,
    Accordion,
    Harmonica,
    TangoAccordion,
    // Guitar
    AcousticGuitarNylon,
    AcousticGuitarSteel,
    ElectricGuitarJazz,
    ElectricGuitarClean,
    ElectricGuitarMuted,
    OverdrivenGuitar,
    DistortionGuitar,
    GuitarHarmonics,
    // Bass
    AcousticBass,
    ElectricBassFinger,
    ElectricBassPick,
    FretlessBass,
    SlapBass1,
    SlapBass2,
    SynthBass1,
    SynthBass2,
    // Strings
    Violin,
    Viola,
    Cello,
    Contrabass,
    TremoloStrings,
    PizzicatoStrings,
    OrchestralHarp,
    Timpani,
    // Ensemble
    StringEnsemble1,
    StringEnsemble2,
    SynthStrings1,
    SynthStrings2,
    ChoirAahs,
    VoiceOohs,
    SynthVoice,
    OrchestraHit,
    // Brass
    Trumpet,
    Trombone,
    Tuba,
    MutedTrumpet,
    FrenchHorn,
    BrassSection,
    SynthBrass1,
    SynthBrass2,
    // Reed
    SopranoSax,
    AltoSax,
    TenorSax,
    BaritoneSax,
    Oboe,
    EnglishHorn,
    Bassoon,
    Clarinet,
    // Pipe
    Piccolo,
    Flute,
    Recorder,
    PanFlute,
    BlownBottle,
    Shakuhachi,
    Whistle,
    Ocarina,
    // Synth lead
    Lead1Square,
    Lead2Sawtooth,
    Lead3Calliope,
    Lead4Chiff,
    Lead5Charang,
    Lead6Voice,
    Lead7Fifths,
    Lead8BassLead,
    // Synth pad
    Pad1NewAge,
    Pad2Warm,
    Pad3Polysynth,
    Pad4Choir,
    Pad5Bowed,
    Pad6Metallic,
    Pad7Halo,
    Pad8Sweep,
    // Synth effects
    Fx1Rain,
    Fx2Soundtrack,
    Fx3Crystal,
    Fx4Atmosphere,
    Fx5Brightness,
    Fx6Goblins,
    Fx7Echoes,
    Fx8SciFi,
    // Ethnic
    Sitar,
    Banjo,
    Shamisen,
    Koto,
    Kalimba,
    Bagpipe,
    Fiddle,
    Shanai,
    // Percussive
    TinkleBell,
    Agogo,
    SteelDrums,
    Woodblock,
    TaikoDrum,
    MelodicTom,
    SynthDrum,
    ReverseCymbal,
    // Sound effects
    GuitarFretNoise,
    BreathNoise,
    Seashore,
    BirdTweet,
    TelephoneRing,
    Helicopter,
    Applause,
    Gunshot,
}

const ALL: [Instrument; 128] = [
    Instrument::AcousticGrandPiano, Instrument::BrightAcousticPiano, Instrument::ElectricGrandPiano, Instrument::HonkyTonkPiano,
    Instrument::ElectricPiano1, Instrument::ElectricPiano2, Instrument::Harpsichord, Instrument::Clavinet,
    Instrument::Celesta, Instrument::Glockenspiel, Instrument::MusicBox, Instrument::Vibraphone,
    Instrument::Marimba, Instrument::Xylophone, Instrument::TubularBells, Instrument::Dulcimer,
    Instrument::DrawbarOrgan, Instrument::PercussiveOrgan, Instrument::RockOrgan, Instrument::ChurchOrgan,
    Instrument::ReedOrgan, Instrument::Accordion, Instrument::Harmonica, Instrument::TangoAccordion,
    Instrument::AcousticGuitarNylon, Instrument::AcousticGuitarSteel, Instrument::ElectricGuitarJazz, Instrument::ElectricGuitarClean,
    Instrument::ElectricGuitarMuted, Instrument::OverdrivenGuitar, Instrument::DistortionGuitar, Instrument::GuitarHarmonics,
    Instrument::AcousticBass, Instrument::ElectricBassFinger, Instrument::ElectricBassPick, Instrument::FretlessBass,
    Instrument::SlapBass1, Instrument::SlapBass2, Instrument::SynthBass1, Instrument::SynthBass2,
    Instrument::Violin, Instrument::Viola, Instrument::Cello, Instrument::Contrabass,
    Instrument::TremoloStrings, Instrument::PizzicatoStrings, Instrument::OrchestralHarp, Instrument::Timpani,
    Instrument::StringEnsemble1, Instrument::StringEnsemble2, Instrument::SynthStrings1, Instrument::SynthStrings2,
    Instrument::ChoirAahs, Instrument::VoiceOohs, Instrument::SynthVoice, Instrument::OrchestraHit,
    Instrument::Trumpet, Instrument::Trombone, Instrument::Tuba, Instrument::MutedTrumpet,
    Instrument::FrenchHorn, Instrument::BrassSection, Instrument::SynthBrass1, Instrument::SynthBrass2,
    Instrument::SopranoSax, Instrument::AltoSax, Instrument::TenorSax, Instrument::BaritoneSax,
    Instrument::Oboe, Instrument::EnglishHorn, Instrument::Bassoon, Instrument::Clarinet,
    Instrument::Piccolo, Instrument::Flute, Instrument::Recorder, Instrument::PanFlute,
    Instrument::BlownBottle, Instrument::Shakuhachi, Instrument::Whistle, Instrument::Ocarina,
    Instrument::Lead1Square, Instrument::Lead2Sawtooth, Instrument::Lead3Calliope, Instrument::Lead4Chiff,
    Instrument::Lead5Charang, Instrument::Lead6Voice, Instrument::Lead7Fifths, Instrument::Lead8BassLead,
    Instrument::Pad1NewAge, Instrument::Pad2Warm, Instrument::Pad3Polysynth, Instrument::Pad4Choir,
    Instrument::Pad5Bowed, Instrument::Pad6Metallic, Instrument::Pad7Halo, Instrument::Pad8Sweep,
    Instrument::Fx1Rain, Instrument::Fx2Soundtrack, Instrument::Fx3Crystal, Instrument::Fx4Atmosphere,
    Instrument::Fx5Brightness, Instrument::Fx6Goblins, Instrument::Fx7Echoes, Instrument::Fx8SciFi,
    Instrument::Sitar, Instrument::Banjo, Instrument::Shamisen, Instrument::Koto,
    Instrument::Kalimba, Instrument::Bagpipe, Instrument::Fiddle, Instrument::Shanai,
    Instrument::TinkleBell, Instrument::Agogo, Instrument::SteelDrums, Instrument::Woodblock,
    Instrument::TaikoDrum, Instrument::MelodicTom, Instrument::SynthDrum, Instrument::ReverseCymbal,
    Instrument::GuitarFretNoise, Instrument::BreathNoise, Instrument::Seashore, Instrument::BirdTweet,
    Instrument::TelephoneRing, Instrument::Helicopter, Instrument::Applause, Instrument::Gunshot,
];

const NAMES: [&str; 128] = [
    "Acoustic Grand Piano",
    "Bright Acoustic Piano",
    "Electric Grand Piano",
    "Honky-tonk Piano",
    "Electric Piano 1",
    "Electric Piano 2",
    "Harpsichord",
    "Clavinet",
    "Celesta",
    "Glockenspiel",
    "Music Box",
    "Vibraphone",
    "Marimba",
    "Xylophone",
    "Tubular Bells",
    "Dulcimer",
    "Drawbar Organ",
    "Percussive Organ",
    "Rock Organ",
    "Church Organ",
    "Reed Organ",
    "Accordion",
    "Harmonica",
    "Tango Accordion",
    "Acoustic Guitar (nylon)",
    "Acoustic Guitar (steel)",
    "Electric Guitar (jazz)",
    "Electric Guitar (clean)",
    "Electric Guitar (muted)",
    "Overdriven Guitar",
    "Distortion Guitar",
    "Guitar Harmonics",
    "Acoustic Bass",
    "Electric Bass (finger)",
    "Electric Bass (pick)",
    "Fretless Bass",
    "Slap Bass 1",
    "Slap Bass 2",
    "Synth Bass 1",
    "Synth Bass 2",
    "Violin",
    "Viola",
    "Cello",
    "Contrabass",
    "Tremolo Strings",
    "Pizzicato Strings",
    "Orchestral Harp",
    "Timpani",
    "String Ensemble 1",
    "String Ensemble 2",
    "Synth Strings 1",
    "Synth Strings 2",
    "Choir Aahs",
    "Voice Oohs",
    "Synth Voice",
    "Orchestra Hit",
    "Trumpet",
    "Trombone",
    "Tuba",
    "Muted Trumpet",
    "French Horn",
    "Brass Section",
    "Synth Brass 1",
    "Synth Brass 2",
    "Soprano Sax",
    "Alto Sax",
    "Tenor Sax",
    "Baritone Sax",
    "Oboe",
    "English Horn",
    "Bassoon",
    "Clarinet",
    "Piccolo",
    "Flute",
    "Recorder",
    "Pan Flute",
    "Blown Bottle",
    "Shakuhachi",
    "Whistle",
    "Ocarina",
    "Lead 1 (square)",
    "Lead 2 (sawtooth)",
    "Lead 3 (calliope)",
    "Lead 4 (chiff)",
    "Lead 5 (charang)",
    "Lead 6 (voice)",
    "Lead 7 (fifths)",
    "Lead 8 (bass + lead)",
    "Pad 1 (new age)",
    "Pad 2 (warm)",
    "Pad 3 (polysynth)",
    "Pad 4 (choir)",
    "Pad 5 (bowed)",
    "Pad 6 (metallic)",
    "Pad 7 (halo)",
    "Pad 8 (sweep)",
    "FX 1 (rain)",
    "FX 2 (soundtrack)",
    "FX 3 (crystal)",
    "FX 4 (atmosphere)",
    "FX 5 (brightness)",
    "FX 6 (goblins)",
    "FX 7 (echoes)",
    "FX 8 (sci-fi)",
    "Sitar",
    "Banjo",
    "Shamisen",
    "Koto",
    "Kalimba",
    "Bagpipe",
    "Fiddle",
    "Shanai",
    "Tinkle Bell",
    "Agogo",
    "Steel Drums",
    "Woodblock",
    "Taiko Drum",
    "Melodic Tom",
    "Synth Drum",
    "Reverse Cymbal",
    "Guitar Fret Noise",
    "Breath Noise",
    "Seashore",
    "Bird Tweet",
    "Telephone Ring",
    "Helicopter",
    "Applause",
    "Gunshot",
];

const FAMILIES: [&str; 16] = [
    "Piano",
    "Chromatic percussion",
    "Organ",
    "Guitar",
    "Bass",
    "Strings",
    "Ensemble",
    "Brass",
    "Reed",
    "Pipe",
    "Synth lead",
    "Synth pad",
    "Synth effects",
    "Ethnic",
    "Percussive",
    "Sound effects",
];

impl Instrument {
    /// Program number (0-127).
    pub const fn program(self) -> u8 {
        self as u8
    }

    /// General MIDI display name, e.g. "Acoustic Grand Piano".
    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// General MIDI family the program belongs to (groups of eight).
    pub fn family(self) -> &'static str {
        FAMILIES[self as usize / 8]
    }

    /// Iterate every program in ascending order.
    pub fn all() -> impl Iterator<Item = Instrument> {
        ALL.iter().copied()
    }
}

impl From<Instrument> for u8 {
    fn from(instrument: Instrument) -> u8 {
        instrument as u8
    }
}

impl TryFrom<u8> for Instrument {
    type Error = u8;

    fn try_from(program: u8) -> Result<Self, Self::Error> {
        ALL.get(program as usize).copied().ok_or(program)
    }
}

impl core::fmt::Display for Instrument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_numbers_are_dense() {
        for (i, instrument) in Instrument::all().enumerate() {
            assert_eq!(instrument.program() as usize, i);
        }
    }

    #[test]
    fn try_from_rejects_out_of_range() {
        assert_eq!(Instrument::try_from(0), Ok(Instrument::AcousticGrandPiano));
        assert_eq!(Instrument::try_from(127), Ok(Instrument::Gunshot));
        assert_eq!(Instrument::try_from(128), Err(128));
    }

    #[test]
    fn names_and_families() {
        assert_eq!(Instrument::Violin.name(), "Violin");
        assert_eq!(Instrument::Violin.family(), "Strings");
        assert_eq!(Instrument::Fx8SciFi.family(), "Synth effects");
    }
}
