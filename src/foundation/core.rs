use crate::foundation::error::{CertError, CertResult};

/// Opaque sRGB color used for certificate text.
///
/// Serialized as a `[r, g, b]` triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(v: [u8; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(c: Rgb8) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Pixel dimensions of a raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Dimensions as the `u16` pair `vello_cpu` surfaces require.
    pub(crate) fn to_u16(self) -> CertResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| CertError::asset(format!("image width {} exceeds u16", self.width)))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| CertError::asset(format!("image height {} exceeds u16", self.height)))?;
        Ok((w, h))
    }

    pub(crate) fn rgba8_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// Horizontal origin that centers a line of `text_width` on a canvas of `canvas_width`.
///
/// Text wider than the canvas gets a negative origin and overflows both edges evenly.
pub fn centered_origin(canvas_width: u32, text_width: f32) -> f32 {
    (canvas_width as f32 - text_width) / 2.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
