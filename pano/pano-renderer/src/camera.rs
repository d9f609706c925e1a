//! Drag-look camera orientation: yaw wraps in [0, 360), pitch clamps to
//! +/-75 degrees. Raw pointer deltas apply 1:1 (no inertia).
//!
//! Shared across threads as one atomic per scalar. Single-writer discipline:
//! only the pointer-input path calls `apply_delta`/`set_yaw_pitch`; the
//! render tick and UI poll only read. No invariant spans both fields, so
//! relaxed word-sized atomics replace any lock.

use std::sync::atomic::{AtomicU32, Ordering};

/// Degrees of rotation per pixel of pointer travel. Tuned so a full-width
/// drag on a typical viewport is roughly one horizontal revolution.
pub const SENSITIVITY: f32 = 0.1;

/// Pitch clamp, degrees. Keeps the up-vector math away from the poles.
pub const PITCH_LIMIT_DEG: f32 = 75.0;

/// Yaw/pitch camera state, in degrees, stored as f32 bit patterns.
pub struct CameraOrientation {
    yaw_bits: AtomicU32,
    pitch_bits: AtomicU32,
}

impl Default for CameraOrientation {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraOrientation {
    /// Level view along +Z (yaw 0, pitch 0).
    pub fn new() -> Self {
        Self {
            yaw_bits: AtomicU32::new(0f32.to_bits()),
            pitch_bits: AtomicU32::new(0f32.to_bits()),
        }
    }

    /// Apply one pointer-move sample (pixel delta since the previous sample).
    /// Screen-right drag turns right; screen-down drag tilts the view up,
    /// hence the inverted pitch sign.
    pub fn apply_delta(&self, delta_x: f32, delta_y: f32) {
        let yaw = f32::from_bits(self.yaw_bits.load(Ordering::Relaxed));
        let pitch = f32::from_bits(self.pitch_bits.load(Ordering::Relaxed));
        let yaw = (yaw + delta_x * SENSITIVITY).rem_euclid(360.0);
        let pitch =
            (pitch - delta_y * SENSITIVITY).clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
        self.yaw_bits.store(yaw.to_bits(), Ordering::Relaxed);
        self.pitch_bits.store(pitch.to_bits(), Ordering::Relaxed);
    }

    /// Set an absolute heading, subject to the same wrap and clamp.
    pub fn set_yaw_pitch(&self, yaw_deg: f32, pitch_deg: f32) {
        self.yaw_bits
            .store(yaw_deg.rem_euclid(360.0).to_bits(), Ordering::Relaxed);
        self.pitch_bits.store(
            pitch_deg
                .clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG)
                .to_bits(),
            Ordering::Relaxed,
        );
    }

    /// Current (yaw, pitch) in degrees. Never blocks.
    pub fn yaw_pitch(&self) -> (f32, f32) {
        (
            f32::from_bits(self.yaw_bits.load(Ordering::Relaxed)),
            f32::from_bits(self.pitch_bits.load(Ordering::Relaxed)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delta_is_idempotent() {
        let cam = CameraOrientation::new();
        cam.apply_delta(37.0, -12.0);
        let before = cam.yaw_pitch();
        for _ in 0..100 {
            cam.apply_delta(0.0, 0.0);
        }
        assert_eq!(cam.yaw_pitch(), before);
    }

    #[test]
    fn sensitivity_is_exact() {
        let cam = CameraOrientation::new();
        cam.apply_delta(100.0, 0.0);
        assert_eq!(cam.yaw_pitch().0, 10.0);
    }

    #[test]
    fn yaw_wraps_into_zero_to_360() {
        let cam = CameraOrientation::new();
        cam.apply_delta(-100.0, 0.0);
        assert_eq!(cam.yaw_pitch().0, 350.0);
        cam.apply_delta(3700.0, 0.0);
        let (yaw, _) = cam.yaw_pitch();
        assert!((0.0..360.0).contains(&yaw));
    }

    #[test]
    fn pitch_clamps_both_ways() {
        let cam = CameraOrientation::new();
        cam.apply_delta(0.0, 1000.0);
        assert_eq!(cam.yaw_pitch().1, -PITCH_LIMIT_DEG);
        cam.apply_delta(0.0, -10_000.0);
        assert_eq!(cam.yaw_pitch().1, PITCH_LIMIT_DEG);
    }

    #[test]
    fn clamp_holds_under_delta_sequences() {
        let cam = CameraOrientation::new();
        for i in 0..500 {
            cam.apply_delta((i * 13) as f32 - 300.0, (i * 7) as f32 - 200.0);
            let (yaw, pitch) = cam.yaw_pitch();
            assert!((0.0..360.0).contains(&yaw), "yaw {yaw}");
            assert!((-PITCH_LIMIT_DEG..=PITCH_LIMIT_DEG).contains(&pitch));
        }
    }

    #[test]
    fn set_heading_wraps_and_clamps() {
        let cam = CameraOrientation::new();
        cam.set_yaw_pitch(540.0, -90.0);
        assert_eq!(cam.yaw_pitch(), (180.0, -PITCH_LIMIT_DEG));
    }
}
