use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::Size;
use crate::foundation::error::{CertError, CertResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded certificate background in premultiplied RGBA8 form.
///
/// Pixels are shared and never written; renders copy them into a fresh buffer.
#[derive(Clone, Debug)]
pub struct TemplateImage {
    size: Size,
    rgba8_premul: Arc<Vec<u8>>,
}

impl TemplateImage {
    /// Read and decode a template from disk.
    pub fn load(path: &Path) -> CertResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CertError::AssetNotFound(path.to_path_buf()),
            _ => CertError::asset(format!("failed to read template '{}': {e}", path.display())),
        })?;
        Self::decode(&bytes).map_err(|e| match e {
            CertError::Asset(msg) => {
                CertError::asset(format!("template '{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Decode a template from encoded image bytes (PNG, JPEG, ...).
    pub fn decode(bytes: &[u8]) -> CertResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .map_err(|e| CertError::asset(format!("decode image: {e}")))?;
        Ok(Self::from_rgba8(dyn_img.to_rgba8()))
    }

    pub fn from_rgba8(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut rgba8_premul = img.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Self {
            size: Size { width, height },
            rgba8_premul: Arc::new(rgba8_premul),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn premul_pixels(&self) -> &[u8] {
        self.rgba8_premul.as_slice()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/template.rs"]
mod tests;
