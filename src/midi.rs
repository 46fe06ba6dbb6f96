//! Standard MIDI File export of a sequence of pitch classes.
//!
//! Every pitch class becomes one note of equal length in the octave above
//! middle C. Output is SMF format 0, with the tempo and program change at the
//! head of the single track.

use std::path::Path;

use midly::num::{u15, u24, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::pitch::{to_midi, PitchClass};

const MICROSECONDS_PER_MINUTE: u32 = 60_000_000;

/// Settings for MIDI export.
///
/// Missing fields take their default values when deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MidiConfig {
    /// Tempo in quarter notes per minute
    pub bpm: u32,

    /// Resolution of the file in ticks per quarter note
    pub ticks_per_quarter: u16,

    /// Length of every note in ticks
    pub note_ticks: u32,

    /// Note-on velocity, `0..=127`
    pub velocity: u8,

    /// MIDI channel, `0..=15`
    pub channel: u8,

    /// General MIDI program, `0..=127`
    pub program: u8,
}

impl Default for MidiConfig {
    fn default() -> MidiConfig {
        MidiConfig {
            bpm: 120,
            ticks_per_quarter: 480,
            note_ticks: 480,
            velocity: 100,
            channel: 0,
            program: 0,
        }
    }
}

impl MidiConfig {
    /// Reads a config from JSON.
    pub fn from_json(text: &str) -> Result<MidiConfig> {
        Ok(serde_json::from_str(text)?)
    }

    /// Returns the tempo in microseconds per quarter note.
    fn tempo(&self) -> Result<u32> {
        if self.bpm == 0 {
            return Err(Error::InvalidMidiConfig("bpm must be positive".to_string()));
        }

        let tempo = MICROSECONDS_PER_MINUTE / self.bpm;
        if tempo == 0 || tempo > u24::max_value().as_int() {
            return Err(Error::InvalidMidiConfig(format!("bpm out of range: {}", self.bpm)));
        }
        Ok(tempo)
    }

    fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidMidiConfig(msg));

        if self.ticks_per_quarter == 0 || self.ticks_per_quarter > u15::max_value().as_int() {
            return invalid(format!("ticks per quarter out of range: {}", self.ticks_per_quarter));
        }
        if self.note_ticks == 0 || self.note_ticks > u28::max_value().as_int() {
            return invalid(format!("note length out of range: {}", self.note_ticks));
        }
        if self.velocity > u7::max_value().as_int() {
            return invalid(format!("velocity out of range: {}", self.velocity));
        }
        if self.channel > u4::max_value().as_int() {
            return invalid(format!("channel out of range: {}", self.channel));
        }
        if self.program > u7::max_value().as_int() {
            return invalid(format!("program out of range: {}", self.program));
        }
        Ok(())
    }
}

/// Convert a sequence of pitch classes to an in-memory SMF.
pub fn melody_to_smf(notes: &[PitchClass], config: &MidiConfig) -> Result<Smf<'static>> {
    config.validate()?;
    let tempo = config.tempo()?;
    let keys = notes.iter()
        .map(|&pc| to_midi(pc))
        .collect::<Result<Vec<_>>>()?;

    let channel = u4::new(config.channel);
    let velocity = u7::new(config.velocity);

    let mut track: Track<'static> = Vec::with_capacity(keys.len() * 2 + 3);
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo))),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::ProgramChange { program: u7::new(config.program) },
        },
    });

    for &key in &keys {
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn { key: u7::new(key), vel: velocity },
            },
        });
        track.push(TrackEvent {
            delta: u28::new(config.note_ticks),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff { key: u7::new(key), vel: u7::new(0) },
            },
        });
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(config.ticks_per_quarter)),
    ));
    smf.tracks.push(track);

    debug!(notes = keys.len(), tempo, "built MIDI track");
    Ok(smf)
}

/// Convert a sequence of pitch classes to MIDI and write it to `path`.
pub fn write_midi<P: AsRef<Path>>(notes: &[PitchClass], config: &MidiConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    let smf = melody_to_smf(notes, config)?;

    let mut buf = Vec::new();
    smf.write(&mut buf).map_err(|e| Error::Midi(e.to_string()))?;
    std::fs::write(path, &buf)?;

    info!(path = %path.display(), notes = notes.len(), bpm = config.bpm, "wrote MIDI file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: [PitchClass; 12] = [3, 1, 9, 5, 4, 6, 8, 7, 0, 10, 11, 2];

    fn note_on_keys(smf: &Smf) -> Vec<u8> {
        smf.tracks[0].iter()
            .filter_map(|event| match event.kind {
                TrackEventKind::Midi { message: MidiMessage::NoteOn { key, .. }, .. } => {
                    Some(key.as_int())
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn melody_to_smf_basic() {
        let smf = melody_to_smf(&ROW, &MidiConfig::default()).unwrap();

        assert_eq!(smf.tracks.len(), 1);
        assert_eq!(smf.header.format, Format::SingleTrack);

        let keys = note_on_keys(&smf);
        let expected: Vec<u8> = ROW.iter().map(|&pc| pc + 60).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn tempo_event() {
        let config = MidiConfig { bpm: 200, ..MidiConfig::default() };
        let smf = melody_to_smf(&ROW, &config).unwrap();

        match smf.tracks[0][0].kind {
            TrackEventKind::Meta(MetaMessage::Tempo(t)) => assert_eq!(t.as_int(), 300_000),
            ref other => panic!("expected tempo event, found {:?}", other),
        }
    }

    #[test]
    fn invalid_pitch_class() {
        let result = melody_to_smf(&[0, 1, 12], &MidiConfig::default());
        assert!(matches!(result, Err(Error::InvalidPitchClass(12))));
    }

    #[test]
    fn invalid_config() {
        let zero_bpm = MidiConfig { bpm: 0, ..MidiConfig::default() };
        assert!(matches!(melody_to_smf(&ROW, &zero_bpm), Err(Error::InvalidMidiConfig(_))));

        let loud = MidiConfig { velocity: 128, ..MidiConfig::default() };
        assert!(matches!(melody_to_smf(&ROW, &loud), Err(Error::InvalidMidiConfig(_))));

        let channel = MidiConfig { channel: 16, ..MidiConfig::default() };
        assert!(matches!(melody_to_smf(&ROW, &channel), Err(Error::InvalidMidiConfig(_))));
    }

    #[test]
    fn config_from_json() {
        let config = MidiConfig::from_json(r#"{ "bpm": 90, "channel": 2 }"#).unwrap();
        assert_eq!(config.bpm, 90);
        assert_eq!(config.channel, 2);
        assert_eq!(config.velocity, 100);

        assert!(matches!(MidiConfig::from_json("{ bpm"), Err(Error::Config(_))));
    }

    #[test]
    fn write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("melody.mid");

        write_midi(&ROW, &MidiConfig::default(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let smf = Smf::parse(&bytes).unwrap();
        assert_eq!(note_on_keys(&smf).len(), 12);
    }

    #[test]
    fn write_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("melody.mid");

        let result = write_midi(&ROW, &MidiConfig::default(), &path);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
