//! Decoder trait. The viewer core never decodes video itself; a host supplies
//! an implementation (platform media player, file demuxer, test pattern) and
//! the render tick pulls frames through this interface.

use crate::frame::VideoFrame;

/// Transport + frame supply for one media stream. Object-safe so the bridge
/// can own `Box<dyn MediaDecoder>` regardless of the host's decoder.
///
/// All calls are made from the rendering thread; implementations must not
/// block it (return the latest state immediately, decode elsewhere).
pub trait MediaDecoder: Send {
    /// Begin or resume playback.
    fn start(&mut self);

    /// Pause playback. Position is retained.
    fn pause(&mut self);

    fn is_playing(&self) -> bool;

    /// Jump to an absolute position in milliseconds. Clamped by the
    /// implementation to the stream duration.
    fn seek(&mut self, position_ms: u32);

    /// Current playback position in milliseconds.
    fn position_ms(&self) -> u32;

    /// Total stream duration in milliseconds.
    fn duration_ms(&self) -> u32;

    /// Restart from the beginning when the end is reached.
    fn set_looping(&mut self, looping: bool);

    /// Pixel dimensions of decoded frames.
    fn frame_size(&self) -> (u32, u32);

    /// Most recent decoded frame, if a new one became ready since the last
    /// call. `None` means the bound texture is already current.
    fn next_frame(&mut self) -> Option<VideoFrame<'_>>;
}

/// Opens a decoder for a source URI. Split from `MediaDecoder` so hosts can
/// hand the bridge a factory without constructing a decoder up front.
pub trait MediaSource: Send {
    fn open(&self, uri: &str) -> Result<Box<dyn MediaDecoder>, String>;
}
