//! Font selection state carried by the graphics state.
//!
//! Text shaping and glyph rendering live outside this crate; the context only
//! records which face, size, and options the caller selected so that text
//! components can read them back.

use crate::style::Antialias;
use std::sync::Arc;

/// Default family used before any face is selected.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ToyFace {
    family: String,
    slant: FontSlant,
    weight: FontWeight,
}

/// A reference-counted "toy" font face: a family name plus slant and weight.
#[derive(Debug, Clone)]
pub struct FontFace {
    inner: Arc<ToyFace>,
}

impl FontFace {
    pub fn toy(family: &str, slant: FontSlant, weight: FontWeight) -> Self {
        Self {
            inner: Arc::new(ToyFace {
                family: family.to_string(),
                slant,
                weight,
            }),
        }
    }

    pub fn family(&self) -> &str {
        &self.inner.family
    }

    pub fn slant(&self) -> FontSlant {
        self.inner.slant
    }

    pub fn weight(&self) -> FontWeight {
        self.inner.weight
    }

    pub fn reference(&self) -> FontFace {
        self.clone()
    }

    pub fn reference_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl Default for FontFace {
    fn default() -> Self {
        Self::toy(DEFAULT_FONT_FAMILY, FontSlant::Normal, FontWeight::Normal)
    }
}

impl PartialEq for FontFace {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubpixelOrder {
    #[default]
    Default,
    Rgb,
    Bgr,
    Vrgb,
    Vbgr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HintStyle {
    #[default]
    Default,
    None,
    Slight,
    Medium,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HintMetrics {
    #[default]
    Default,
    Off,
    On,
}

/// Rendering hints for text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontOptions {
    pub antialias: Antialias,
    pub subpixel_order: SubpixelOrder,
    pub hint_style: HintStyle,
    pub hint_metrics: HintMetrics,
}

impl FontOptions {
    /// Overlay every non-default field of `other` onto `self`.
    pub fn merge(&mut self, other: &FontOptions) {
        if other.antialias != Antialias::Default {
            self.antialias = other.antialias;
        }
        if other.subpixel_order != SubpixelOrder::Default {
            self.subpixel_order = other.subpixel_order;
        }
        if other.hint_style != HintStyle::Default {
            self.hint_style = other.hint_style;
        }
        if other.hint_metrics != HintMetrics::Default {
            self.hint_metrics = other.hint_metrics;
        }
    }
}
