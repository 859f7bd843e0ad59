use std::io::Cursor;
use std::path::Path;

use crate::foundation::error::{CertError, CertResult};

/// How the text on a certificate was produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderNotes {
    /// The configured font was unavailable and the default font was used.
    pub font_fallback: bool,
    /// Lines drawn without the script hint because the shaper could not take it.
    pub unhinted_lines: u8,
}

/// A rendered certificate as straight (non-premultiplied) RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct Certificate {
    /// Width in pixels; always the template width.
    pub width: u32,
    /// Height in pixels; always the template height.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    pub notes: RenderNotes,
}

impl Certificate {
    pub fn to_rgba_image(&self) -> CertResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| CertError::encode("certificate byte length does not match dimensions"))
    }

    /// Encode as PNG bytes, ready to be offered for download.
    pub fn encode_png(&self) -> CertResult<Vec<u8>> {
        let img = self.to_rgba_image()?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| CertError::encode(format!("encode png: {e}")))?;
        Ok(buf)
    }

    /// Write the PNG to `path`, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> CertResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                CertError::encode(format!("create output dir '{}': {e}", parent.display()))
            })?;
        }
        let png = self.encode_png()?;
        std::fs::write(path, png)
            .map_err(|e| CertError::encode(format!("write png '{}': {e}", path.display())))
    }
}
