//! Loaded subtitle track with point-in-time lookup.

use std::path::Path;

use crate::cue::Cue;
use crate::parse::{parse_srt, ParseError};

/// An immutable, load-order sequence of cues. Input is assumed sorted and
/// non-overlapping; lookups scan linearly and the first match wins, which
/// is exact under that assumption and cheap at typical track sizes.
#[derive(Clone, Debug, Default)]
pub struct SubtitleTrack {
    cues: Vec<Cue>,
    errors: Vec<ParseError>,
}

impl SubtitleTrack {
    /// Parse a track from SRT text. Never fails as a whole: malformed cues
    /// are dropped and reported by `errors()`.
    pub fn from_srt(input: &str) -> Self {
        let (cues, errors) = parse_srt(input);
        if !errors.is_empty() {
            log::warn!(
                "subtitle track loaded with {} cue(s) dropped of {}",
                errors.len(),
                errors.len() + cues.len()
            );
        }
        Self { cues, errors }
    }

    /// Read and parse an `.srt` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("read {}: {e}", path.display()))?;
        Ok(Self::from_srt(&text))
    }

    /// The cue active at `time_ms`, if any. Bounds are inclusive; with
    /// overlapping input the earliest cue in load order wins.
    pub fn active_at(&self, time_ms: u32) -> Option<&Cue> {
        self.cues.iter().find(|c| c.contains(time_ms))
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Cues dropped at load time.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Start timestamps of every cue, for timeline markers.
    pub fn cue_starts(&self) -> impl Iterator<Item = u32> + '_ {
        self.cues.iter().map(|c| c.start_ms)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::StyledRun;

    fn track(cues: Vec<Cue>) -> SubtitleTrack {
        SubtitleTrack {
            cues,
            errors: Vec::new(),
        }
    }

    fn cue(start_ms: u32, end_ms: u32, text: &str) -> Cue {
        Cue {
            start_ms,
            end_ms,
            runs: vec![StyledRun::plain(text)],
        }
    }

    #[test]
    fn lookup_boundaries() {
        let t = track(vec![cue(0, 1000, "A"), cue(1000, 2000, "B")]);
        assert_eq!(t.active_at(999).unwrap().plain_text(), "A");
        // Shared boundary: first match in load order wins.
        assert_eq!(t.active_at(1000).unwrap().plain_text(), "A");
        assert_eq!(t.active_at(1001).unwrap().plain_text(), "B");
        assert!(t.active_at(2500).is_none());
    }

    #[test]
    fn empty_track_answers_none() {
        assert!(track(Vec::new()).active_at(0).is_none());
    }

    #[test]
    fn cue_starts_in_load_order() {
        let t = track(vec![cue(500, 600, "a"), cue(900, 950, "b")]);
        assert_eq!(t.cue_starts().collect::<Vec<_>>(), vec![500, 900]);
    }

    #[test]
    fn from_srt_keeps_good_cues_and_errors() {
        let t = SubtitleTrack::from_srt(
            "1\n00:00:00,000 --> 00:00:01,000\nok\n\nbogus\nbogus\n",
        );
        assert_eq!(t.len(), 1);
        assert_eq!(t.errors().len(), 1);
    }
}
