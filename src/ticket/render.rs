// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Paint a solved [`TicketPlan`] onto a CPU pixmap and export it as PNG.

use super::layout::{
    self, CountBox, PlacedText, TicketContent, TicketPlan, BOX_RADIUS, CANVAS_HEIGHT,
    CANVAS_WIDTH, CARD_H, CARD_RADIUS, CARD_W, CARD_X, CARD_Y,
};
use super::measure::{FontAsset, FontMeasure, FontSource};
use super::{RenderError, TicketText};
use crate::services::naming::ticket_file_name;
use image::{DynamicImage, ImageFormat, RgbaImage};
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::Path;
use vello_cpu::kurbo::{Affine, BezPath, Circle, Rect, RoundedRect, Shape, Stroke};
use vello_cpu::peniko::{Color, FontData, Gradient};

const BUBBLE_COUNT: u32 = 18;
const BUBBLE_ALPHA: f32 = 0.32;
const OUTLINE_WIDTH: f64 = 3.0;
const SHADOW_OFFSET_Y: f64 = 14.0;
const SHADOW_STD_DEV: f32 = 14.0;
const PATH_TOLERANCE: f64 = 0.1;

const BG_START: Color = Color::from_rgba8(0xba, 0xf3, 0xff, 0xff);
const BG_END: Color = Color::from_rgba8(0xff, 0xe0, 0xea, 0xff);

/// Ink color at the given opacity.
fn ink(alpha: f32) -> Color {
    Color::from_rgba8(21, 50, 62, (alpha * 255.0).round() as u8)
}

/// A finished ticket image.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub image: RgbaImage,
    pub file_name: String,
}

impl Ticket {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(self.image.clone())
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        Ok(buf)
    }
}

/// Produces ticket images. Cheap to share; each render builds its own
/// font and raster contexts.
#[derive(Debug, Clone)]
pub struct TicketRenderer {
    font: FontAsset,
    text: TicketText,
}

impl TicketRenderer {
    /// Use the font at `font_path` if given and readable, else a system font,
    /// else the bundled one.
    pub fn new(font_path: Option<&Path>) -> Self {
        let font = FontAsset::discover(font_path);
        tracing::info!(font = %font.source, "Ticket font loaded");
        Self {
            font,
            text: TicketText::default(),
        }
    }

    /// A renderer on the bundled font, skipping font discovery.
    pub fn bundled() -> Self {
        Self {
            font: FontAsset::bundled(),
            text: TicketText::default(),
        }
    }

    pub fn with_text(mut self, text: TicketText) -> Self {
        self.text = text;
        self
    }

    pub fn text(&self) -> &TicketText {
        &self.text
    }

    pub fn font_source(&self) -> &FontSource {
        &self.font.source
    }

    /// Solve the layout for a ticket without painting it.
    pub fn plan(&self, name: &str, adults: u32, kids: u32) -> Result<TicketPlan, RenderError> {
        let mut measurer = FontMeasure::for_font(&self.font)?;
        Ok(layout::solve_layout(
            &mut measurer,
            &self.content(name, adults, kids),
        ))
    }

    fn content<'a>(&'a self, name: &'a str, adults: u32, kids: u32) -> TicketContent<'a> {
        TicketContent {
            name,
            adults,
            kids,
            text: &self.text,
        }
    }

    /// Render the ticket for one confirmed RSVP.
    pub fn render(&self, name: &str, adults: u32, kids: u32) -> Result<Ticket, RenderError> {
        let mut measurer = FontMeasure::for_font(&self.font)?;
        let plan = layout::solve_layout(&mut measurer, &self.content(name, adults, kids));

        let width = u16::try_from(CANVAS_WIDTH).map_err(|e| RenderError::Raster(e.to_string()))?;
        let height =
            u16::try_from(CANVAS_HEIGHT).map_err(|e| RenderError::Raster(e.to_string()))?;
        let mut ctx = vello_cpu::RenderContext::new(width, height);

        paint_background(&mut ctx, name);
        paint_card(&mut ctx);
        paint_box_frame(&mut ctx, &plan.adults_box);
        paint_box_frame(&mut ctx, &plan.kids_box);
        paint_text(&mut ctx, &mut measurer, &plan);

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let mut straight = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_in_place(&mut straight);
        let image = RgbaImage::from_raw(CANVAS_WIDTH, CANVAS_HEIGHT, straight)
            .ok_or_else(|| RenderError::Raster("invalid rgba buffer size".into()))?;

        tracing::debug!(
            name_lines = plan.name_lines.len(),
            message_lines = plan.message.lines.len(),
            box_height = plan.adults_box.h,
            "Ticket rendered"
        );

        Ok(Ticket {
            image,
            file_name: ticket_file_name(name),
        })
    }
}

fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

fn to_path(shape: &impl Shape) -> BezPath {
    shape.to_path(PATH_TOLERANCE)
}

fn card_rect() -> RoundedRect {
    RoundedRect::new(
        CARD_X as f64,
        CARD_Y as f64,
        (CARD_X + CARD_W) as f64,
        (CARD_Y + CARD_H) as f64,
        CARD_RADIUS as f64,
    )
}

fn box_rect(b: &CountBox) -> RoundedRect {
    let radius = BOX_RADIUS.min(b.w / 2.0).min(b.h / 2.0);
    RoundedRect::new(
        b.x as f64,
        b.y as f64,
        (b.x + b.w) as f64,
        (b.y + b.h) as f64,
        radius as f64,
    )
}

/// Bubble position and radius, derived from the name so the same guest
/// always gets the same ticket.
fn bubble(name: &str, index: u32) -> (f64, f64, f64) {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(index.to_le_bytes());
    let digest = hasher.finalize();

    let unit = |i: usize| u16::from_le_bytes([digest[i], digest[i + 1]]) as f64 / u16::MAX as f64;
    let w = CANVAS_WIDTH as f64;
    let h = CANVAS_HEIGHT as f64;

    let r = 16.0 + unit(0) * 28.0;
    let x = 60.0 + unit(2) * (w - 120.0);
    let y = 60.0 + unit(4) * (h - 120.0);
    (x, y, r)
}

fn paint_background(ctx: &mut vello_cpu::RenderContext, name: &str) {
    let w = CANVAS_WIDTH as f64;
    let h = CANVAS_HEIGHT as f64;

    ctx.set_transform(Affine::IDENTITY);
    ctx.set_paint(
        Gradient::new_linear((0.0, 0.0), (w, h)).with_stops([(0.0, BG_START), (1.0, BG_END)]),
    );
    ctx.fill_rect(&Rect::new(0.0, 0.0, w, h));

    ctx.push_opacity_layer(BUBBLE_ALPHA);
    ctx.set_stroke(Stroke::new(OUTLINE_WIDTH));
    for i in 0..BUBBLE_COUNT {
        let (x, y, r) = bubble(name, i);
        let path = to_path(&Circle::new((x, y), r));
        ctx.set_paint(Color::from_rgba8(255, 255, 255, 230));
        ctx.fill_path(&path);
        ctx.set_paint(Color::from_rgba8(125, 227, 246, 128));
        ctx.stroke_path(&path);
    }
    ctx.pop_layer();
}

fn paint_card(ctx: &mut vello_cpu::RenderContext) {
    let shadow = Rect::new(
        CARD_X as f64,
        CARD_Y as f64 + SHADOW_OFFSET_Y,
        (CARD_X + CARD_W) as f64,
        (CARD_Y + CARD_H) as f64 + SHADOW_OFFSET_Y,
    );
    ctx.set_paint(ink(0.22));
    ctx.fill_blurred_rounded_rect(&shadow, CARD_RADIUS, SHADOW_STD_DEV);

    let card = to_path(&card_rect());
    ctx.set_paint(Color::from_rgba8(255, 255, 255, 219));
    ctx.fill_path(&card);

    ctx.set_stroke(Stroke::new(OUTLINE_WIDTH));
    ctx.set_paint(ink(0.10));
    ctx.stroke_path(&card);
}

fn paint_box_frame(ctx: &mut vello_cpu::RenderContext, b: &CountBox) {
    let path = to_path(&box_rect(b));
    ctx.set_paint(Color::from_rgba8(255, 242, 214, 140));
    ctx.fill_path(&path);
    ctx.set_stroke(Stroke::new(OUTLINE_WIDTH));
    ctx.set_paint(ink(0.10));
    ctx.stroke_path(&path);
}

fn paint_text(ctx: &mut vello_cpu::RenderContext, fm: &mut FontMeasure, plan: &TicketPlan) {
    let font = FontData::new(fm.font().bytes.as_ref().clone().into(), 0);

    draw_line(ctx, fm, &font, &plan.title, ink(0.9));
    draw_line(ctx, fm, &font, &plan.subtitle, ink(0.85));

    // A single unbreakable word can be wider than the card; keep it inside.
    ctx.push_clip_layer(&to_path(&card_rect()));
    for line in &plan.name_lines {
        draw_line(ctx, fm, &font, line, ink(1.0));
    }
    ctx.pop_layer();

    for b in [&plan.adults_box, &plan.kids_box] {
        ctx.push_clip_layer(&to_path(&box_rect(b)));
        draw_line(ctx, fm, &font, &b.number, ink(0.86));
        draw_line(ctx, fm, &font, &b.label, ink(0.70));
        ctx.pop_layer();
    }

    for line in &plan.message.lines {
        draw_line(ctx, fm, &font, line, ink(0.9));
    }
    for line in &plan.details {
        draw_line(ctx, fm, &font, line, ink(0.78));
    }
    draw_line(ctx, fm, &font, &plan.footer, ink(0.58));
}

fn draw_line(
    ctx: &mut vello_cpu::RenderContext,
    fm: &mut FontMeasure,
    font: &FontData,
    placed: &PlacedText,
    color: Color,
) {
    if placed.text.is_empty() {
        return;
    }

    let text_layout = fm.layout(&placed.text, placed.size);
    ctx.set_paint(color);

    for line in text_layout.lines() {
        let offset_y = placed.baseline - line.metrics().baseline;
        ctx.set_transform(Affine::translate((placed.x as f64, offset_y as f64)));

        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }

    ctx.set_transform(Affine::IDENTITY);
}
