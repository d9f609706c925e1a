//! Pano bridge: glues the renderer core to a host. Owns the surface
//! lifecycle and the decoder, and exposes a poll-friendly control surface
//! that never reaches back into host state.

pub mod controls;
pub mod plugin;
pub mod window_backend;

pub use controls::{Controls, SharedPlayback};
pub use plugin::{PanoPlugin, SurfacePhase};
pub use window_backend::PanoWindowBackend;
