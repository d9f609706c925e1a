//! Cross-thread control surface. The UI side polls progress/orientation and
//! pushes play/seek/pointer input; the render tick is the only thread that
//! touches the decoder. Everything crossing threads is one word-sized atomic
//! per scalar; no field pair carries a composite invariant, so no mutex,
//! and no call here ever blocks the render loop.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use media_api::MediaDecoder;
use pano_renderer::CameraOrientation;

/// Sentinel for "no seek pending". u32::MAX ms is ~49 days of video; a real
/// seek never lands there.
const NO_SEEK: u32 = u32::MAX;

/// Playback state mirrored between the render tick and polling readers.
/// Writers: UI side for `playing`/`pending_seek`, render tick for
/// `position_ms`/`duration_ms`/`ready`. One writer per field.
pub struct SharedPlayback {
    position_ms: AtomicU32,
    duration_ms: AtomicU32,
    pending_seek: AtomicU32,
    playing: AtomicBool,
    ready: AtomicBool,
}

impl Default for SharedPlayback {
    fn default() -> Self {
        Self {
            position_ms: AtomicU32::new(0),
            duration_ms: AtomicU32::new(0),
            pending_seek: AtomicU32::new(NO_SEEK),
            playing: AtomicBool::new(true),
            ready: AtomicBool::new(false),
        }
    }
}

impl SharedPlayback {
    /// Called once per render tick: apply pending transport commands to the
    /// decoder, then publish its position/duration for polling readers.
    pub fn sync_decoder(&self, decoder: &mut dyn MediaDecoder) {
        let seek = self.pending_seek.swap(NO_SEEK, Ordering::Relaxed);
        if seek != NO_SEEK {
            decoder.seek(seek);
        }
        let want_playing = self.playing.load(Ordering::Relaxed);
        if want_playing != decoder.is_playing() {
            if want_playing {
                decoder.start();
            } else {
                decoder.pause();
            }
        }
        self.position_ms
            .store(decoder.position_ms(), Ordering::Relaxed);
        self.duration_ms
            .store(decoder.duration_ms(), Ordering::Relaxed);
        self.ready.store(true, Ordering::Relaxed);
    }

    /// Mark the decoder gone (surface lost / teardown). Progress reads fall
    /// back to the sentinel.
    pub fn set_unavailable(&self) {
        self.ready.store(false, Ordering::Relaxed);
    }
}

/// Handle the UI collaborator polls and pushes input through. Cheap to clone,
/// valid from any thread, never blocking.
#[derive(Clone)]
pub struct Controls {
    playback: Arc<SharedPlayback>,
    camera: Arc<CameraOrientation>,
}

impl Controls {
    pub fn new(playback: Arc<SharedPlayback>, camera: Arc<CameraOrientation>) -> Self {
        Self { playback, camera }
    }

    /// Request play or pause. Applied by the next render tick.
    pub fn set_playing(&self, playing: bool) {
        self.playback.playing.store(playing, Ordering::Relaxed);
    }

    /// Request an absolute seek. Applied by the next render tick; a newer
    /// request overwrites an unapplied older one.
    pub fn seek(&self, position_ms: u32) {
        self.playback
            .pending_seek
            .store(position_ms.min(NO_SEEK - 1), Ordering::Relaxed);
    }

    /// `(position_ms, duration_ms)`. While the decoder is not ready this
    /// returns `(0, 1)` so pollers can divide by duration unconditionally.
    pub fn progress(&self) -> (u32, u32) {
        if !self.playback.ready.load(Ordering::Relaxed) {
            return (0, 1);
        }
        (
            self.playback.position_ms.load(Ordering::Relaxed),
            self.playback.duration_ms.load(Ordering::Relaxed),
        )
    }

    /// Current camera (yaw, pitch) in degrees.
    pub fn orientation(&self) -> (f32, f32) {
        self.camera.yaw_pitch()
    }

    /// Forward one pointer-move sample to the orientation model.
    pub fn pointer_delta(&self, delta_x: f32, delta_y: f32) {
        self.camera.apply_delta(delta_x, delta_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_api::VideoFrame;

    /// Minimal scripted decoder for exercising command application.
    struct FakeDecoder {
        playing: bool,
        position_ms: u32,
        duration_ms: u32,
        looping: bool,
    }

    impl FakeDecoder {
        fn new() -> Self {
            Self {
                playing: false,
                position_ms: 0,
                duration_ms: 60_000,
                looping: false,
            }
        }
    }

    impl MediaDecoder for FakeDecoder {
        fn start(&mut self) {
            self.playing = true;
        }
        fn pause(&mut self) {
            self.playing = false;
        }
        fn is_playing(&self) -> bool {
            self.playing
        }
        fn seek(&mut self, position_ms: u32) {
            self.position_ms = position_ms.min(self.duration_ms);
        }
        fn position_ms(&self) -> u32 {
            self.position_ms
        }
        fn duration_ms(&self) -> u32 {
            self.duration_ms
        }
        fn set_looping(&mut self, looping: bool) {
            self.looping = looping;
        }
        fn frame_size(&self) -> (u32, u32) {
            (2, 1)
        }
        fn next_frame(&mut self) -> Option<VideoFrame<'_>> {
            None
        }
    }

    fn harness() -> (Controls, Arc<SharedPlayback>) {
        let playback = Arc::new(SharedPlayback::default());
        let camera = Arc::new(CameraOrientation::new());
        (Controls::new(Arc::clone(&playback), camera), playback)
    }

    #[test]
    fn progress_sentinel_before_decoder_ready() {
        let (controls, _playback) = harness();
        assert_eq!(controls.progress(), (0, 1));
    }

    #[test]
    fn sync_publishes_progress_and_applies_seek() {
        let (controls, playback) = harness();
        let mut dec = FakeDecoder::new();
        controls.seek(12_345);
        playback.sync_decoder(&mut dec);
        assert_eq!(dec.position_ms, 12_345);
        assert_eq!(controls.progress(), (12_345, 60_000));
    }

    #[test]
    fn play_pause_reaches_decoder_once_per_change() {
        let (controls, playback) = harness();
        let mut dec = FakeDecoder::new();
        playback.sync_decoder(&mut dec);
        assert!(dec.playing, "default desired state is playing");
        controls.set_playing(false);
        playback.sync_decoder(&mut dec);
        assert!(!dec.playing);
    }

    #[test]
    fn unavailable_restores_sentinel() {
        let (controls, playback) = harness();
        let mut dec = FakeDecoder::new();
        playback.sync_decoder(&mut dec);
        assert_ne!(controls.progress(), (0, 1));
        playback.set_unavailable();
        assert_eq!(controls.progress(), (0, 1));
    }

    #[test]
    fn pointer_delta_drives_orientation() {
        let (controls, _playback) = harness();
        controls.pointer_delta(100.0, 0.0);
        assert_eq!(controls.orientation(), (10.0, 0.0));
    }
}
