//! Fonts for container labels.
//!
//! Label geometry needs glyph metrics. Instead of a global font that may or
//! may not have finished loading, the layout receives a [`LabelFont`] with an
//! explicit [`LabelFont::Unavailable`] state: when no font is available,
//! labels are skipped and every volume is still produced.

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{info, warn};

use crate::geometry::Size3;

/// The font used to build label primitives.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LabelFont {
    /// No glyph data is available; label emission is skipped.
    #[default]
    Unavailable,
    /// Labels are measured and built with this face.
    Loaded(FontFace),
}

impl LabelFont {
    /// Returns the loaded face, if any.
    pub fn face(&self) -> Option<&FontFace> {
        match self {
            Self::Unavailable => None,
            Self::Loaded(face) => Some(face),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// A font family at a given size, extruded to a given depth.
///
/// All values are in world units: a face of size 5 produces glyphs roughly
/// five units tall.
#[derive(Debug, Clone, PartialEq)]
pub struct FontFace {
    family: String,
    size: f32,
    depth: f32,
}

impl FontFace {
    pub fn new(family: impl Into<String>, size: f32, depth: f32) -> Self {
        Self {
            family: family.into(),
            size,
            depth,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Measures `text` laid out on a single line with this face.
    ///
    /// Returns the extents of the extruded text: shaped width, line height and
    /// the face depth.
    pub fn measure(&self, text: &str) -> Size3 {
        let (width, height) = GLYPH_METRICS
            .get_or_init(GlyphMetrics::new)
            .line_extent(text, self);
        Size3::new(width, height, self.depth)
    }
}

/// Shapes text with a shared `FontSystem`, which is expensive to create.
struct GlyphMetrics {
    font_system: Mutex<FontSystem>,
}

impl GlyphMetrics {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    fn line_extent(&self, text: &str, face: &FontFace) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }

        let line_height = face.size * 1.15;
        let fallback_width = text.chars().count() as f32 * face.size * 0.55;

        let Ok(mut font_system) = self.font_system.lock() else {
            warn!("FontSystem lock poisoned, using estimated label width");
            return (fallback_width, line_height);
        };

        let metrics = Metrics::new(face.size, line_height);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);
        let attrs = Attrs::new().family(Family::Name(face.family()));

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|glyph| glyph.x + glyph.w))
            .fold(0.0_f32, f32::max);

        // Without any installed fonts shaping yields no glyphs.
        if width > 0.0 {
            (width, line_height)
        } else {
            (fallback_width, line_height)
        }
    }
}

static GLYPH_METRICS: OnceLock<GlyphMetrics> = OnceLock::new();
