use crate::foundation::core::Rgba8;
use crate::foundation::error::{VfxError, VfxResult};

/// A frame as straight-alpha RGBA8 pixels.
///
/// Frames are owned by whoever created them. The engine reads caller frames by reference and
/// always hands back a new buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Fully transparent frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba8::TRANSPARENT)
    }

    /// Frame with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Rgba8) -> Self {
        let px = color.to_array();
        Self {
            width,
            height,
            data: px.repeat((width as usize) * (height as usize)),
        }
    }

    /// Wrap an existing RGBA8 buffer, checking its length against the dimensions.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> VfxResult<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(VfxError::validation(format!(
                "frame data has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Return `true` when both frames have identical dimensions.
    pub fn same_size(&self, other: &FrameRGBA) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Check that `data` matches `width * height * 4`.
    pub fn validate(&self) -> VfxResult<()> {
        if self.data.len() != byte_len(self.width, self.height)? {
            return Err(VfxError::validation(
                "frame data size mismatch with width*height*4",
            ));
        }
        Ok(())
    }

    /// Read the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        let idx = self.index_of(x, y)?;
        let p = &self.data[idx..idx + 4];
        Some(Rgba8::new(p[0], p[1], p[2], p[3]))
    }

    /// Overwrite the pixel at `(x, y)`; out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        if let Some(idx) = self.index_of(x, y) {
            self.data[idx..idx + 4].copy_from_slice(&color.to_array());
        }
    }

    /// Return `true` when the signed pixel coordinate lies inside the frame.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    pub(crate) fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }

    pub(crate) fn row_bytes(&self) -> usize {
        (self.width as usize) * 4
    }
}

fn byte_len(width: u32, height: u32) -> VfxResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| VfxError::validation("frame buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
