//! Bulge profile: the fixed-topology shape of a deformed line
//!
//! A deformed line is a straight run into the arc, four quadratic segments
//! forming a rounded dimple centered on the pointer, and a straight run out:
//!
//! ```text
//! Start ── PreArc ╮ArcEntry ╮ArcPeak ╭ArcExit ╭PostArc ── End
//! ```
//!
//! Knot positions are expressed relative to the pointer: `along` is a pixel
//! offset from the pointer along the line's run, `lateral` is a ratio that the
//! distortion weight scales into a perpendicular displacement.

use serde::{Deserialize, Serialize};

/// Role of a control point within a line path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveRole {
    Start,
    PreArc,
    ArcEntry,
    ArcPeak,
    ArcExit,
    PostArc,
    End,
}

impl CurveRole {
    /// Order of roles along a deformed path
    pub const ORDER: [CurveRole; 7] = [
        CurveRole::Start,
        CurveRole::PreArc,
        CurveRole::ArcEntry,
        CurveRole::ArcPeak,
        CurveRole::ArcExit,
        CurveRole::PostArc,
        CurveRole::End,
    ];

    /// Roles reached through a quadratic segment
    pub fn is_arc(self) -> bool {
        matches!(
            self,
            CurveRole::ArcEntry | CurveRole::ArcPeak | CurveRole::ArcExit | CurveRole::PostArc
        )
    }
}

/// Position of a knot relative to the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnotOffset {
    /// Multiplied by the distortion weight
    pub lateral: f32,
    /// Pixels from the pointer along the line's run
    pub along: f32,
}

impl KnotOffset {
    const fn new(lateral: f32, along: f32) -> Self {
        Self { lateral, along }
    }
}

/// One quadratic segment of the arc: the control point and the point it reaches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcKnot {
    pub role: CurveRole,
    pub control: KnotOffset,
    pub to: KnotOffset,
}

/// Tunable shape of the dimple
///
/// `shoulder` and `peak` are lateral ratios. `entry`, `shoulder_span` and
/// `peak_span` place knots along the run, measured in grid gaps inward from the
/// edge of the influence radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulgeProfile {
    pub shoulder: f32,
    pub peak: f32,
    pub entry: f32,
    pub shoulder_span: f32,
    pub peak_span: f32,
}

impl Default for BulgeProfile {
    fn default() -> Self {
        Self {
            shoulder: 0.05,
            peak: 0.1,
            entry: 2.5,
            shoulder_span: 3.25,
            peak_span: 4.5,
        }
    }
}

impl BulgeProfile {
    /// The four quadratic segments of the arc, in path order
    pub fn knots(&self, mass: f32, gap: f32) -> [ArcKnot; 4] {
        let entry = gap * self.entry;
        let shoulder = gap * self.shoulder_span;
        let peak = gap * self.peak_span;

        [
            ArcKnot {
                role: CurveRole::ArcEntry,
                control: KnotOffset::new(0.0, -mass + entry),
                to: KnotOffset::new(self.shoulder, -mass + shoulder),
            },
            ArcKnot {
                role: CurveRole::ArcPeak,
                control: KnotOffset::new(self.peak, -mass + peak),
                to: KnotOffset::new(self.peak, 0.0),
            },
            ArcKnot {
                role: CurveRole::ArcExit,
                control: KnotOffset::new(self.peak, mass - peak),
                to: KnotOffset::new(self.shoulder, mass - shoulder),
            },
            ArcKnot {
                role: CurveRole::PostArc,
                control: KnotOffset::new(0.0, mass - entry),
                to: KnotOffset::new(0.0, mass),
            },
        ]
    }

    /// Lateral ratios of the five displaced points between PreArc and PostArc
    pub fn lateral_ratios(&self) -> [f32; 5] {
        [self.shoulder, self.peak, self.peak, self.peak, self.shoulder]
    }
}
