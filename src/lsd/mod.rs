//! Psychedelic text: every character restyled at random on a timer
//!
//! Deterministic for a given seed. The platform layer owns the timer and the
//! DOM; this module only decides what each character looks like.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::LsdConfig;

/// Font stacks drawn from on each restyle
pub const FONT_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "Georgia",
    "Courier New",
    "Impact",
    "Comic Sans MS",
    "Trebuchet MS",
];

pub const TEXT_TRANSFORMS: &[&str] = &["none", "uppercase", "lowercase", "capitalize"];

const HEX_DIGITS: &[u8] = b"0123456789abcdef";

/// Class applied to every character span
pub const GLYPH_CLASS: &str = "inline-block leading-none";
/// Extra class giving whitespace a visible width
pub const SPACER_CLASS: &str = "w-2";
/// Classes the host element needs so glyphs of mixed sizes share a baseline
pub const HOST_CLASS: &str = "h-16 flex items-end";

/// `existing` class list with any missing `HOST_CLASS` tokens appended
pub fn host_class_name(existing: &str) -> String {
    let mut tokens: Vec<&str> = existing.split_whitespace().collect();
    for class in HOST_CLASS.split_whitespace() {
        if !tokens.contains(&class) {
            tokens.push(class);
        }
    }
    tokens.join(" ")
}

/// Random 3-digit hex color, e.g. `#a3f`
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut color = String::with_capacity(4);
    color.push('#');
    for _ in 0..3 {
        color.push(char::from(HEX_DIGITS[rng.random_range(0..HEX_DIGITS.len())]));
    }
    color
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextShadow {
    pub color: String,
    pub x: u32,
    pub y: u32,
    pub blur: u32,
}

/// Inline style of one character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharStyle {
    pub font_family: &'static str,
    pub font_size: u32,
    pub color: String,
    pub text_transform: &'static str,
    pub shadow: TextShadow,
}

impl CharStyle {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, config: &LsdConfig) -> Self {
        let jitter = rng.random_range(0..=config.font_size_jitter);
        let font_size = if rng.random_bool(0.5) {
            config.base_font_size + jitter
        } else {
            config.base_font_size.saturating_sub(jitter)
        };

        Self {
            font_family: pick(rng, FONT_FAMILIES),
            font_size,
            color: random_color(rng),
            text_transform: pick(rng, TEXT_TRANSFORMS),
            shadow: TextShadow {
                color: random_color(rng),
                x: rng.random_range(0..=config.shadow_max),
                y: rng.random_range(0..=config.shadow_max),
                blur: rng.random_range(0..=config.shadow_max),
            },
        }
    }

    /// Value for the `style` attribute
    pub fn to_css(&self) -> String {
        let family = if self.font_family.contains(' ') {
            format!("'{}'", self.font_family)
        } else {
            self.font_family.to_string()
        };
        format!(
            "font-family: {}; font-size: {}px; color: {}; text-transform: {}; text-shadow: {} {}px {}px {}px;",
            family,
            self.font_size,
            self.color,
            self.text_transform,
            self.shadow.color,
            self.shadow.x,
            self.shadow.y,
            self.shadow.blur
        )
    }
}

/// One character and its current style (`None` until the first restyle)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Option<CharStyle>,
}

impl Glyph {
    pub fn is_spacer(&self) -> bool {
        self.ch.is_whitespace()
    }

    pub fn class_name(&self) -> String {
        if self.is_spacer() {
            format!("{} {}", GLYPH_CLASS, SPACER_CLASS)
        } else {
            GLYPH_CLASS.to_string()
        }
    }

    pub fn css(&self) -> String {
        self.style.as_ref().map(CharStyle::to_css).unwrap_or_default()
    }
}

/// A line of text whose characters are restyled together
#[derive(Debug, Clone)]
pub struct LsdText {
    glyphs: Vec<Glyph>,
    config: LsdConfig,
    rng: Pcg32,
}

impl LsdText {
    pub fn new(text: &str, seed: u64, config: LsdConfig) -> Self {
        Self {
            glyphs: text.chars().map(|ch| Glyph { ch, style: None }).collect(),
            config,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Give every glyph a fresh random style
    pub fn restyle(&mut self) {
        for glyph in &mut self.glyphs {
            glyph.style = Some(CharStyle::random(&mut self.rng, &self.config));
        }
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn config(&self) -> &LsdConfig {
        &self.config
    }

    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.ch).collect()
    }
}
