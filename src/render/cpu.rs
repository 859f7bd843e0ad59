use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::assets::template::TemplateImage;
use crate::assets::text::{ResolvedFont, TextBrushRgba8, TextLayoutEngine};
use crate::config::{CertificateConfig, TextSlot};
use crate::foundation::core::centered_origin;
use crate::foundation::error::{CertError, CertResult};
use crate::foundation::math::{over_in_place, unpremultiply_rgba8_in_place};
use crate::render::certificate::{Certificate, RenderNotes};

/// Text placed by one render: the donor's name and the formatted amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateRequest {
    pub donor_name: String,
    pub amount_text: String,
}

impl CertificateRequest {
    pub fn new(donor_name: impl Into<String>, amount_text: impl Into<String>) -> Self {
        Self {
            donor_name: donor_name.into(),
            amount_text: amount_text.into(),
        }
    }
}

/// Measured placement of one drawn line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LinePlacement {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) hinted: bool,
}

type FontKey = (u64, u32);

/// CPU certificate renderer backed by Parley shaping and `vello_cpu` rasterisation.
///
/// The template is read from disk on every render; fonts are registered once and reused.
pub struct CertificateRenderer {
    config: CertificateConfig,
    text_engine: TextLayoutEngine,
    font: Option<(Option<PathBuf>, ResolvedFont)>,
    draw_fonts: HashMap<FontKey, vello_cpu::peniko::FontData>,
    ctx: Option<vello_cpu::RenderContext>,
}

impl CertificateRenderer {
    pub fn new(config: CertificateConfig) -> CertResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            text_engine: TextLayoutEngine::new(),
            font: None,
            draw_fonts: HashMap::new(),
            ctx: None,
        })
    }

    pub fn config(&self) -> &CertificateConfig {
        &self.config
    }

    /// Resolve the configured font, falling back to the default font when it is unavailable.
    pub fn resolved_font(&mut self) -> ResolvedFont {
        if let Some((path, font)) = &self.font
            && *path == self.config.font_path
        {
            return font.clone();
        }

        let font = match self.config.font_path.clone() {
            None => ResolvedFont::Fallback,
            Some(path) => match self.text_engine.load_font(&path) {
                Ok(font) => {
                    debug!(family = font.family(), path = %path.display(), "font registered");
                    font
                }
                Err(CertError::FontUnavailable(reason)) => {
                    warn!(%reason, "configured font unavailable; using default font");
                    ResolvedFont::Fallback
                }
                Err(e) => {
                    warn!(error = %e, "font resolution failed; using default font");
                    ResolvedFont::Fallback
                }
            },
        };
        self.font = Some((self.config.font_path.clone(), font.clone()));
        font
    }

    /// Render a certificate for `request` onto a fresh copy of the template.
    #[tracing::instrument(skip_all, fields(template = %self.config.template_path.display()))]
    pub fn render(&mut self, request: &CertificateRequest) -> CertResult<Certificate> {
        let template = TemplateImage::load(&self.config.template_path)?;
        self.render_on(&template, request)
    }

    /// Render onto an already decoded template.
    pub fn render_on(
        &mut self,
        template: &TemplateImage,
        request: &CertificateRequest,
    ) -> CertResult<Certificate> {
        let size = template.size();
        let (w, h) = size.to_u16()?;
        let font = self.resolved_font();

        let name_slot = self.config.name.clone();
        let amount_slot = self.config.amount.clone();

        let (text_layer, placements) = self.with_ctx_mut(w, h, |this, ctx| {
            let name = this.draw_line(ctx, &request.donor_name, &name_slot, &font, size.width)?;
            let amount =
                this.draw_line(ctx, &request.amount_text, &amount_slot, &font, size.width)?;
            ctx.flush();
            let mut layer = vello_cpu::Pixmap::new(w, h);
            ctx.render_to_pixmap(&mut layer);
            Ok((layer.data_as_u8_slice().to_vec(), [name, amount]))
        })?;

        let mut data = template.premul_pixels().to_vec();
        if data.len() != size.rgba8_len() {
            return Err(CertError::asset("template byte length does not match dimensions"));
        }
        over_in_place(&mut data, &text_layer)?;
        unpremultiply_rgba8_in_place(&mut data);

        for (what, p) in ["name", "amount"].iter().zip(placements.iter()) {
            debug!(line = *what, x = p.x, y = p.y, width = p.width, hinted = p.hinted, "placed");
        }

        Ok(Certificate {
            width: size.width,
            height: size.height,
            data,
            notes: RenderNotes {
                font_fallback: font.is_fallback(),
                unhinted_lines: placements.iter().filter(|p| !p.hinted).count() as u8,
            },
        })
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> CertResult<R>,
    ) -> CertResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    /// Shape, center and fill one line. The script hint is dropped only when the shaper reports
    /// it cannot take it.
    fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        slot: &TextSlot,
        font: &ResolvedFont,
        canvas_width: u32,
    ) -> CertResult<LinePlacement> {
        let brush = TextBrushRgba8::from(slot.color);
        let hint = self.config.script_hint.clone();
        let (layout, hinted) = match self.text_engine.layout_line(
            text,
            font,
            slot.size_px,
            brush,
            hint.as_deref(),
        ) {
            Ok(layout) => (layout, true),
            Err(CertError::ShapingUnsupported(reason)) => {
                warn!(%reason, "shaping without script hint");
                let layout = self
                    .text_engine
                    .layout_line(text, font, slot.size_px, brush, None)?;
                (layout, false)
            }
            Err(e) => return Err(e),
        };

        let width = layout.width();
        let x = centered_origin(canvas_width, width);
        let y = slot.y;

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((f64::from(x), f64::from(y))));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let run_font = run.run().font();
                let draw_font =
                    self.draw_font_for(run_font.data.id(), run_font.data.data(), run_font.index);
                // Positioned glyphs carry the pen position and the line baseline.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&draw_font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        Ok(LinePlacement {
            x,
            y,
            width,
            hinted,
        })
    }

    fn draw_font_for(
        &mut self,
        blob_id: u64,
        bytes: &[u8],
        index: u32,
    ) -> vello_cpu::peniko::FontData {
        self.draw_fonts
            .entry((blob_id, index))
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.to_vec()),
                    index,
                )
            })
            .clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
