//! Effect configuration
//!
//! Every field is optional. Hosts pass configuration as JSON, typically in a
//! `data-*` attribute on the mount element. Nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, WarpError};
use crate::grid::{BulgeProfile, DistortionParams};

/// Kind of element the warp grid draws into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SurfaceKind {
    #[default]
    Canvas,
    Svg,
}

impl SurfaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::Canvas => "canvas",
            SurfaceKind::Svg => "svg",
        }
    }

    /// Match an element tag name (case-insensitive)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "canvas" => Some(SurfaceKind::Canvas),
            "svg" => Some(SurfaceKind::Svg),
            _ => None,
        }
    }
}

/// Warp grid configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpConfig {
    /// Grid spacing in pixels
    pub gap: f32,
    /// Influence radius in pixels
    pub mass: f32,
    /// Line color (any CSS color)
    pub stroke_style: String,
    /// Bulge shape
    pub profile: BulgeProfile,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            mass: DEFAULT_MASS,
            stroke_style: DEFAULT_STROKE_STYLE.to_string(),
            profile: BulgeProfile::default(),
        }
    }
}

impl WarpConfig {
    /// Attribute read by the wasm mount
    pub const ATTRIBUTE: &'static str = "data-warp-config";

    /// Parse JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| WarpError::Config(e.to_string()))?;
        Ok(config.validated())
    }

    /// Config from an optional attribute value; malformed JSON falls back to defaults
    pub fn from_attribute(value: Option<String>) -> Self {
        match value {
            Some(json) => Self::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring {}: {}", Self::ATTRIBUTE, e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Replace unusable values with defaults
    pub fn validated(mut self) -> Self {
        if !(self.gap.is_finite() && self.gap > 0.0) {
            log::warn!("Invalid gap {}, using {}", self.gap, DEFAULT_GAP);
            self.gap = DEFAULT_GAP;
        } else if self.gap < MIN_GAP {
            log::warn!("Gap {} below {}px, clamping", self.gap, MIN_GAP);
            self.gap = MIN_GAP;
        }
        if !(self.mass.is_finite() && self.mass >= 0.0) {
            log::warn!("Invalid mass {}, using {}", self.mass, DEFAULT_MASS);
            self.mass = DEFAULT_MASS;
        }
        if self.stroke_style.trim().is_empty() {
            self.stroke_style = DEFAULT_STROKE_STYLE.to_string();
        }
        self
    }

    pub fn params(&self) -> DistortionParams {
        DistortionParams {
            mass: self.mass,
            gap: self.gap,
            profile: self.profile,
        }
    }
}

/// Psychedelic text configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LsdConfig {
    /// Milliseconds between restyles
    pub interval_ms: u32,
    /// Font size in pixels before jitter
    pub base_font_size: u32,
    /// Maximum font size change in either direction
    pub font_size_jitter: u32,
    /// Maximum shadow offset and blur in pixels
    pub shadow_max: u32,
}

impl Default for LsdConfig {
    fn default() -> Self {
        Self {
            interval_ms: LSD_INTERVAL_MS,
            base_font_size: LSD_BASE_FONT_SIZE,
            font_size_jitter: LSD_FONT_SIZE_JITTER,
            shadow_max: LSD_SHADOW_MAX,
        }
    }
}

impl LsdConfig {
    pub const ATTRIBUTE: &'static str = "data-lsd-config";

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| WarpError::Config(e.to_string()))?;
        Ok(config.validated())
    }

    pub fn from_attribute(value: Option<String>) -> Self {
        match value {
            Some(json) => Self::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring {}: {}", Self::ATTRIBUTE, e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn validated(mut self) -> Self {
        if self.interval_ms < LSD_MIN_INTERVAL_MS {
            log::warn!(
                "Restyle interval {}ms too short, using {}ms",
                self.interval_ms,
                LSD_MIN_INTERVAL_MS
            );
            self.interval_ms = LSD_MIN_INTERVAL_MS;
        }
        // Keep sizes positive
        self.font_size_jitter = self.font_size_jitter.min(self.base_font_size.saturating_sub(1));
        self
    }
}
