//! Shared media API: the decoder-facing types and traits that the renderer,
//! the bridge, and host applications agree on. Keeps concrete decoders
//! (platform players, test patterns) out of the rendering crates.

pub mod decode;
pub mod frame;

pub use decode::{MediaDecoder, MediaSource};
pub use frame::VideoFrame;
