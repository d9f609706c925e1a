//! Subtitle timeline: parse an SRT track into ordered, style-annotated cues
//! and answer "what is active at time t" against a playback clock.

pub mod cue;
pub mod parse;
pub mod track;

pub use cue::{Cue, StyledRun};
pub use parse::{format_mm_ss, parse_srt, parse_timestamp, ParseError};
pub use track::SubtitleTrack;
