// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Text measurement for ticket layout.
//!
//! Layout only ever asks two questions: how wide is this string at this size,
//! and what are the vertical metrics of the font at this size. A loaded font
//! answers both through Parley. The estimating measurer answers the first
//! and declines the second; it exists for pure layout work only.
//!
//! A font is always available: the configured file, else a sans-serif face
//! found through the system font database, else the bundled DejaVu Sans Bold.

use super::RenderError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use usvg::fontdb;

/// DejaVu Sans Bold, shipped with the binary.
static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// Vertical font metrics in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
}

/// Metrics used when the measurer cannot provide real ones.
pub const FALLBACK_METRICS: FontMetrics = FontMetrics {
    ascent: 30.0,
    descent: 10.0,
};

/// Something that can measure single-line text.
pub trait TextMeasure {
    /// Advance width of `text` at `size_px`.
    fn width(&mut self, text: &str, size_px: f32) -> f32;

    /// Vertical metrics at `size_px`, if known.
    fn metrics(&mut self, size_px: f32) -> Option<FontMetrics>;

    /// Metrics, or [`FALLBACK_METRICS`] when unavailable.
    fn metrics_or_fallback(&mut self, size_px: f32) -> FontMetrics {
        self.metrics(size_px)
            .filter(|m| m.ascent.is_finite() && m.descent.is_finite())
            .unwrap_or(FALLBACK_METRICS)
    }
}

/// Width estimate without any font.
///
/// Every char counts as `em_ratio` of the font size. Metrics are unknown.
#[derive(Debug, Clone, Copy)]
pub struct EstimatedMeasure {
    pub em_ratio: f32,
}

impl Default for EstimatedMeasure {
    fn default() -> Self {
        Self { em_ratio: 0.56 }
    }
}

impl TextMeasure for EstimatedMeasure {
    fn width(&mut self, text: &str, size_px: f32) -> f32 {
        text.chars().count() as f32 * size_px * self.em_ratio
    }

    fn metrics(&mut self, _size_px: f32) -> Option<FontMetrics> {
        None
    }
}

/// Where a ticket font came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    File(PathBuf),
    System { family: String },
    Bundled,
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::File(path) => write!(f, "{}", path.display()),
            FontSource::System { family } => write!(f, "system:{family}"),
            FontSource::Bundled => f.write_str("bundled:DejaVu Sans Bold"),
        }
    }
}

/// Raw font file bytes shared between measurement and painting.
#[derive(Clone)]
pub struct FontAsset {
    pub bytes: Arc<Vec<u8>>,
    pub source: FontSource,
}

impl fmt::Debug for FontAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontAsset")
            .field("source", &self.source)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Sans-serif families asked of the system font database, in order.
const SYSTEM_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
];

impl FontAsset {
    /// Read a font file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| RenderError::Font(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            bytes: Arc::new(bytes),
            source: FontSource::File(path.to_path_buf()),
        })
    }

    /// The font compiled into the binary.
    pub fn bundled() -> Self {
        Self {
            bytes: Arc::new(BUNDLED_FONT.to_vec()),
            source: FontSource::Bundled,
        }
    }

    /// A bold sans-serif face from the system font database.
    pub fn system() -> Option<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self::from_database(&db)
    }

    fn from_database(db: &fontdb::Database) -> Option<Self> {
        SYSTEM_FAMILIES.iter().find_map(|family| {
            let query = fontdb::Query {
                families: &[fontdb::Family::Name(*family)],
                weight: fontdb::Weight::BOLD,
                ..fontdb::Query::default()
            };
            let id = db.query(&query)?;
            // Collections are registered whole; only their first face is usable.
            if db.face(id)?.index != 0 {
                return None;
            }
            let bytes = db.with_face_data(id, |data, _| data.to_vec())?;
            Some(Self {
                bytes: Arc::new(bytes),
                source: FontSource::System {
                    family: (*family).to_string(),
                },
            })
        })
    }

    /// Configured font, else a system font, else the bundled one.
    pub fn discover(configured: Option<&Path>) -> Self {
        if let Some(path) = configured {
            match Self::load(path) {
                Ok(font) => return font,
                Err(e) => {
                    tracing::warn!(error = %e, "Configured ticket font unavailable, trying system fonts")
                }
            }
        }

        Self::system().unwrap_or_else(|| {
            tracing::info!("No system sans-serif font found, using bundled font");
            Self::bundled()
        })
    }
}

/// Parley-backed measurer over one font.
pub struct FontMeasure {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
    font: FontAsset,
}

impl FontMeasure {
    /// Register the font bytes with a fresh Parley context.
    pub fn new(font: FontAsset) -> Result<Self, RenderError> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.as_ref().clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| RenderError::Font("no font families registered from font bytes".into()))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| RenderError::Font("registered font family has no name".into()))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    /// Register `font`, or the bundled font if `font` cannot be used.
    pub fn for_font(font: &FontAsset) -> Result<Self, RenderError> {
        match Self::new(font.clone()) {
            Ok(measure) => Ok(measure),
            Err(e) if font.source != FontSource::Bundled => {
                tracing::warn!(font = %font.source, error = %e, "Ticket font unusable, using bundled font");
                Self::new(FontAsset::bundled())
            }
            Err(e) => Err(e),
        }
    }

    pub fn font(&self) -> &FontAsset {
        &self.font
    }

    /// Shape one unwrapped line of text.
    pub fn layout(&mut self, text: &str, size_px: f32) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextMeasure for FontMeasure {
    fn width(&mut self, text: &str, size_px: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout(text, size_px)
            .lines()
            .map(|line| line.metrics().advance)
            .fold(0.0, f32::max)
    }

    fn metrics(&mut self, size_px: f32) -> Option<FontMetrics> {
        let layout = self.layout("Mg", size_px);
        let line = layout.lines().next()?;
        let m = line.metrics();
        Some(FontMetrics {
            ascent: m.ascent,
            descent: m.descent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimated_width_counts_chars() {
        let mut m = EstimatedMeasure { em_ratio: 0.5 };
        assert_eq!(m.width("abcd", 10.0), 20.0);
        assert_eq!(m.width("ñá", 10.0), 10.0);
    }

    #[test]
    fn test_estimated_uses_fallback_metrics() {
        let mut m = EstimatedMeasure::default();
        assert_eq!(m.metrics(38.0), None);
        assert_eq!(m.metrics_or_fallback(38.0), FALLBACK_METRICS);
    }

    #[test]
    fn test_missing_font_file() {
        assert!(FontAsset::load("/definitely/not/a/font.ttf").is_err());
    }

    #[test]
    fn test_bundled_font_measures() {
        let mut m = FontMeasure::new(FontAsset::bundled()).unwrap();
        assert_eq!(m.width("", 38.0), 0.0);
        assert!(m.width("Evan", 38.0) > 0.0);
        assert!(m.width("Evan Fonseca", 38.0) > m.width("Evan", 38.0));

        let metrics = m.metrics(38.0).unwrap();
        assert!(metrics.ascent > 20.0 && metrics.ascent < 45.0);
        assert!(metrics.descent > 0.0);
    }

    #[test]
    fn test_missing_configured_font_still_discovers_one() {
        let font = FontAsset::discover(Some(Path::new("/definitely/not/a/font.ttf")));
        assert!(!matches!(font.source, FontSource::File(_)));
        assert!(FontMeasure::for_font(&font).is_ok());
    }

    #[test]
    fn test_empty_database_finds_no_system_font() {
        assert!(FontAsset::from_database(&fontdb::Database::new()).is_none());
    }

    #[test]
    fn test_garbage_font_falls_back_to_bundled() {
        let font = FontAsset {
            bytes: Arc::new(b"not a font".to_vec()),
            source: FontSource::File(PathBuf::from("garbage.ttf")),
        };
        let measure = FontMeasure::for_font(&font).unwrap();
        assert_eq!(measure.font().source, FontSource::Bundled);
    }
}
