//! Frame data exchanged between a decoder and the renderer.

/// One decoded video frame. Tightly packed RGBA8, row-major, no padding:
/// `data.len() == width * height * 4`.
#[derive(Clone, Copy, Debug)]
pub struct VideoFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub data: &'a [u8],
}

impl<'a> VideoFrame<'a> {
    /// Byte length a well-formed frame of this size must have.
    pub fn expected_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 4
    }

    /// Whether the payload length matches the stated dimensions.
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == Self::expected_len(self.width, self.height)
    }
}
