use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::Digest as _;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{CertError, CertResult};

/// Generic family used when the configured font cannot be loaded.
pub(crate) const FALLBACK_FAMILY: &str = "sans-serif";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Language tag passed to the shaper so complex scripts form the right clusters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptHint(String);

impl ScriptHint {
    /// Accept a language tag (`km`, `km-KH`, `km-Khmr-KH`) that the shaper maps to an OpenType
    /// language system.
    ///
    /// Anything else is reported as [`CertError::ShapingUnsupported`]; the shaper would silently
    /// ignore such a tag.
    pub fn parse(tag: &str) -> CertResult<Self> {
        let tag = tag.trim();
        let mut parts = tag.split(['-', '_']);
        let lang = parts.next().unwrap_or_default();
        let lang_ok = (2..=3).contains(&lang.len()) && lang.chars().all(|c| c.is_ascii_alphabetic());
        let rest_ok = parts.all(|p| {
            (1..=8).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphanumeric())
        });
        if !lang_ok || !rest_ok {
            return Err(CertError::shaping_unsupported(format!(
                "script hint '{tag}' is not a language tag the shaper understands"
            )));
        }

        let normalized = tag.replace('_', "-").to_ascii_lowercase();
        let langsys = parley::swash::text::Language::parse(&normalized)
            .and_then(|language| language.to_opentype());
        if langsys.is_none() {
            return Err(CertError::shaping_unsupported(format!(
                "script hint '{tag}' has no OpenType language system"
            )));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Font chosen for a render.
#[derive(Clone, Debug)]
pub enum ResolvedFont {
    /// Font file from the configuration, registered with the layout engine.
    Configured {
        path: PathBuf,
        family: String,
        bytes: Arc<Vec<u8>>,
    },
    /// Default font from the layout engine's collection.
    Fallback,
}

impl ResolvedFont {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ResolvedFont::Fallback)
    }

    /// Family name the layout engine resolves against.
    pub fn family(&self) -> &str {
        match self {
            ResolvedFont::Configured { family, .. } => family,
            ResolvedFont::Fallback => FALLBACK_FAMILY,
        }
    }

    /// SHA-256 of the configured font bytes, hex-encoded.
    pub fn sha256_hex(&self) -> Option<String> {
        let ResolvedFont::Configured { bytes, .. } = self else {
            return None;
        };
        let digest = sha2::Sha256::digest(bytes.as_slice());
        Some(digest.iter().map(|b| format!("{b:02x}")).collect())
    }
}

/// Stateful helper for shaping single lines of text with Parley.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Load a font file and register it with the font collection.
    ///
    /// Fails with [`CertError::FontUnavailable`] when the file is missing or holds no usable face.
    pub(crate) fn load_font(&mut self, path: &Path) -> CertResult<ResolvedFont> {
        let bytes = std::fs::read(path).map_err(|e| {
            CertError::font_unavailable(format!("read font '{}': {e}", path.display()))
        })?;
        let family = self.register_font_bytes(&bytes).map_err(|e| match e {
            CertError::FontUnavailable(msg) => {
                CertError::font_unavailable(format!("'{}': {msg}", path.display()))
            }
            other => other,
        })?;
        Ok(ResolvedFont::Configured {
            path: path.to_path_buf(),
            family,
            bytes: Arc::new(bytes),
        })
    }

    fn register_font_bytes(&mut self, font_bytes: &[u8]) -> CertResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CertError::font_unavailable("no font families registered from bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CertError::font_unavailable("registered font family has no name"))?
            .to_string();
        Ok(family_name)
    }

    /// Shape and lay out one unwrapped line.
    ///
    /// With `hint` set, the tag is checked first; an unusable tag returns
    /// [`CertError::ShapingUnsupported`] without shaping anything.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        size_px: f32,
        brush: TextBrushRgba8,
        hint: Option<&str>,
    ) -> CertResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CertError::validation("text size_px must be finite and > 0"));
        }
        let hint = hint.map(ScriptHint::parse).transpose()?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(font.family().to_string())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        if let Some(hint) = &hint {
            builder.push_default(parley::style::StyleProperty::Locale(Some(hint.as_str())));
        }

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
